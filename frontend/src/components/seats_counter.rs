use taurus_funnel::seats::seats_for_today;
use taurus_funnel::time_source::{today, Clock, SystemClock};
use yew::prelude::*;

use crate::utils::storage::local_store;

#[function_component(SeatsCounter)]
pub fn seats_counter() -> Html {
    let seats = use_state(|| {
        let store = local_store();
        seats_for_today(&*store, today(SystemClock.now()), &mut rand::thread_rng())
    });

    html! {
        <p class="seats-counter">
            {"Plus que "}<span>{ *seats }</span>{" places disponibles aujourd'hui"}
        </p>
    }
}
