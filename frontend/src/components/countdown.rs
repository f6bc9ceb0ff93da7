use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use taurus_funnel::countdown::{CountdownTicker, Tick};
use taurus_funnel::time_source::{Clock, SystemClock};
use yew::prelude::*;

const TICK_MS: u32 = 1_000;
const PULSE_MS: u32 = 300;

/// Time left until the weekly reset (Sunday 00:00, Paris time).
#[function_component(WeeklyCountdown)]
pub fn weekly_countdown() -> Html {
    let ticker = use_mut_ref(|| CountdownTicker::new(SystemClock.now()));
    let tick = {
        let ticker = ticker.clone();
        use_state(move || ticker.borrow_mut().tick(SystemClock.now()))
    };
    let pulse = use_state(|| false);
    let pulse_timer: Rc<RefCell<Option<Timeout>>> = use_mut_ref(|| None);

    {
        let tick = tick.clone();
        let pulse = pulse.clone();
        use_effect_with_deps(
            move |_| {
                let interval = Interval::new(TICK_MS, move || {
                    let next: Tick = ticker.borrow_mut().tick(SystemClock.now());
                    if next.seconds_changed {
                        pulse.set(true);
                        let pulse = pulse.clone();
                        *pulse_timer.borrow_mut() =
                            Some(Timeout::new(PULSE_MS, move || pulse.set(false)));
                    }
                    tick.set(next);
                });
                move || drop(interval)
            },
            (),
        );
    }

    let countdown = &tick.countdown;
    let unit = |value: String, label: &'static str, pulsing: bool| {
        html! {
            <div class="countdown-unit">
                <span class={classes!("digit", pulsing.then_some("pulse"))}>{ value }</span>
                <span class="label">{ label }</span>
            </div>
        }
    };

    html! {
        <div class="countdown" aria-live="off">
            { unit(countdown.days_label(), "jours", false) }
            { unit(countdown.hours_label(), "heures", false) }
            { unit(countdown.minutes_label(), "min", false) }
            { unit(countdown.seconds_label(), "sec", *pulse) }
        </div>
    }
}
