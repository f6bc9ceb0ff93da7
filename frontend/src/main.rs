use std::rc::Rc;

use taurus_funnel::modal::OpenerRef;
use taurus_funnel::submission::{Submitter, TicketTier};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod context;
mod utils {
    pub mod reveal;
    pub mod storage;
    pub mod transport;
}
mod components {
    pub mod application_modal;
    pub mod carousel;
    pub mod carousel_3d;
    pub mod contact_modal;
    pub mod countdown;
    pub mod modal;
    pub mod nav;
    pub mod offers;
    pub mod seats_counter;
    pub mod slide_carousel;
    pub mod ticket_modal;
}
mod pages {
    pub mod home;
    pub mod vip;
}

use components::application_modal::ApplicationModal;
use components::contact_modal::ContactModal;
use components::modal::ModalRuntime;
use components::nav::Nav;
use context::{ApplicationRequest, FunnelContext};
use pages::home::Home;
use pages::vip::Vip;
use utils::transport::GlooTransport;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/vip")]
    Vip,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Vip => html! { <Vip /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

const MODAL_CSS: &str = r#"
.modal {
    display: none;
    position: fixed;
    inset: 0;
    z-index: 1000;
    align-items: center;
    justify-content: center;
}
.modal.show {
    display: flex;
}
.modal-overlay {
    position: absolute;
    inset: 0;
    background: rgba(0, 0, 0, 0.75);
}
.modal-content {
    position: relative;
    max-width: 480px;
    width: 90%;
    padding: 2rem;
    border-radius: 12px;
    background: #141414;
    color: #f5f5f5;
}
.modal-close {
    position: absolute;
    top: 0.75rem;
    right: 0.75rem;
    background: none;
    border: none;
    color: inherit;
    font-size: 1.5rem;
    cursor: pointer;
}
.form-status.success { color: #4caf50; }
.form-status.error { color: #ff4d4d; }
"#;

#[function_component(App)]
fn app() -> Html {
    let shared = use_memo(
        |_| {
            let config = Rc::new(config::load());
            let submitter = Rc::new(Submitter::new(&config, GlooTransport));
            if !submitter.backend().is_available() {
                log::warn!("No submission backend configured, forms will report an error");
            }
            (config, submitter, ModalRuntime::new())
        },
        (),
    );
    let application_request = use_state(|| None::<ApplicationRequest>);

    let apply = {
        let application_request = application_request.clone();
        Callback::from(move |(tier, opener): (TicketTier, OpenerRef)| {
            let seq = (*application_request).as_ref().map_or(0, |r| r.seq.wrapping_add(1));
            application_request.set(Some(ApplicationRequest { tier, opener, seq }));
        })
    };

    let (config, submitter, modals) = &*shared;
    let context = FunnelContext {
        config: config.clone(),
        submitter: submitter.clone(),
        modals: modals.clone(),
        apply,
    };

    html! {
        <ContextProvider<FunnelContext> {context}>
            <BrowserRouter>
                <style>{ MODAL_CSS }</style>
                <Nav />
                <main>
                    <Switch<Route> render={switch} />
                </main>
                <ApplicationModal request={(*application_request).clone()} />
                <ContactModal />
            </BrowserRouter>
        </ContextProvider<FunnelContext>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    yew::Renderer::<App>::new().render();
}
