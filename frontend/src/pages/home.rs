use taurus_funnel::modal::{ModalId, OpenerRef};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::components::Link;

use crate::components::countdown::WeeklyCountdown;
use crate::components::offers::Offers;
use crate::components::seats_counter::SeatsCounter;
use crate::components::slide_carousel::{ServiceSlide, SlideCarousel};
use crate::components::ticket_modal::TicketModal;
use crate::context::use_funnel;
use crate::utils::reveal::use_scroll_reveal;
use crate::Route;

const CONTACT_OPENER_ID: &str = "openContactModal";

fn services() -> Vec<ServiceSlide> {
    vec![
        ServiceSlide {
            title: "Pronostics quotidiens".into(),
            description: "Une sélection de matchs analysés chaque jour, avec la cote et la mise conseillée.".into(),
            image: "/assets/services/pronostics.jpg".into(),
        },
        ServiceSlide {
            title: "Gestion de bankroll".into(),
            description: "Une méthode simple pour miser sans se brûler, semaine après semaine.".into(),
            image: "/assets/services/bankroll.jpg".into(),
        },
        ServiceSlide {
            title: "Live coaching".into(),
            description: "Les paris en direct commentés dans le groupe pendant les grosses affiches.".into(),
            image: "/assets/services/live.jpg".into(),
        },
    ]
}

/// Hero overlay darkens as the visitor scrolls away from it.
#[hook]
fn use_hero_dim() -> f64 {
    let dim_opacity = use_state(|| 0.0);
    {
        let dim_opacity = dim_opacity.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let update = {
                    let dim_opacity = dim_opacity.clone();
                    move || {
                        if let Some(scroll_y) = web_sys::window().and_then(|w| w.scroll_y().ok()) {
                            dim_opacity.set((scroll_y / 500.0).min(1.0) * 0.6);
                        }
                    }
                };
                update();
                let callback = Closure::<dyn Fn()>::new(update);
                if let Some(window) = &window {
                    let _ = window
                        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                }
                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }
    *dim_opacity
}

#[function_component(Home)]
pub fn home() -> Html {
    let funnel = use_funnel();
    let dim_opacity = use_hero_dim();
    use_scroll_reveal();

    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    let open_contact = Callback::from(move |_: MouseEvent| {
        if let Some(funnel) = &funnel {
            funnel
                .modals
                .open(ModalId::Contact, Some(OpenerRef::new(CONTACT_OPENER_ID)));
        }
    });

    let home_css = r#"
        .hero {
            position: relative;
            min-height: 100vh;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            text-align: center;
            padding: 6rem 2rem 4rem;
            background: url('/assets/hero.jpg') center / cover no-repeat;
        }
        .hero-dim {
            position: absolute;
            inset: 0;
            background: #000;
            pointer-events: none;
        }
        .hero > *:not(.hero-dim) {
            position: relative;
            z-index: 1;
        }
        .hero h1 {
            font-size: 3rem;
            color: #d4af37;
            margin-bottom: 1rem;
        }
        .seats-counter span {
            font-weight: 700;
            color: #ff4d4d;
        }
        .countdown {
            display: flex;
            gap: 1rem;
            margin: 2rem 0;
        }
        .countdown-unit {
            display: flex;
            flex-direction: column;
            align-items: center;
        }
        .countdown .digit {
            font-size: 2.5rem;
            font-variant-numeric: tabular-nums;
            transition: transform 0.3s ease;
        }
        .countdown .digit.pulse {
            transform: scale(1.15);
        }
        .fade-in {
            opacity: 0;
            transform: translateY(30px);
            transition: opacity 0.8s ease, transform 0.8s ease;
        }
        .fade-in.visible {
            opacity: 1;
            transform: none;
        }
        .slide-carousel {
            position: relative;
            overflow: hidden;
            max-width: 900px;
            margin: 0 auto;
        }
        .slide {
            display: none;
        }
        .slide.active {
            display: block;
        }
        .slide-indicators .indicator.active {
            background: #d4af37;
        }
    "#;

    html! {
        <div class="home">
            <style>{home_css}</style>
            <section class="hero">
                <div class="hero-dim" style={format!("opacity: {};", dim_opacity)}></div>
                <h1>{"Rejoins le VIP TaurusBet"}</h1>
                <p>{"Les pronostics qui se partagent entre passionnés."}</p>
                <SeatsCounter />
                <p>{"Fin des inscriptions de la semaine dans"}</p>
                <WeeklyCountdown />
                <a href="#offres" class="btn btn-primary">{"Voir les offres"}</a>
            </section>

            <Offers />

            <section id="services" class="services fade-in">
                <h2>{"Ce que tu trouves dans le VIP"}</h2>
                <SlideCarousel slides={services()} />
            </section>

            <section id="tickets" class="tickets fade-in">
                <h2>{"Tu as gagné avec nous ?"}</h2>
                <p>{"Envoie la capture de ton ticket, on le partage avec la communauté."}</p>
                <TicketModal />
            </section>

            <section class="contact fade-in">
                <h2>{"Une question avant de te lancer ?"}</h2>
                <button type="button" id={CONTACT_OPENER_ID} class="btn" onclick={open_contact}>
                    {"Nous contacter"}
                </button>
                <p>
                    {"Envie d'en voir plus ? "}
                    <Link<Route> to={Route::Vip}>{"Découvre l'espace VIP"}</Link<Route>>
                </p>
            </section>
        </div>
    }
}
