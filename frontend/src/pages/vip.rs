use taurus_funnel::modal::{ModalId, OpenerRef};
use yew::prelude::*;

use crate::components::carousel_3d::{Carousel3d, RingItem};
use crate::components::offers::Offers;
use crate::components::seats_counter::SeatsCounter;
use crate::context::use_funnel;
use crate::utils::reveal::use_scroll_reveal;

const CONTACT_OPENER_ID: &str = "vipContactButton";

fn wins() -> Vec<RingItem> {
    [
        ("/assets/wins/ticket-1.jpg", "Combiné Ligue 1 validé"),
        ("/assets/wins/ticket-2.jpg", "Cote 4.20 sur la Premier League"),
        ("/assets/wins/ticket-3.jpg", "Triplé du week-end"),
        ("/assets/wins/ticket-4.jpg", "Live basket gagnant"),
        ("/assets/wins/ticket-5.jpg", "Série de 6 paris verts"),
    ]
    .into_iter()
    .map(|(image, caption)| RingItem {
        image: image.into(),
        caption: caption.into(),
    })
    .collect()
}

#[function_component(Vip)]
pub fn vip() -> Html {
    let funnel = use_funnel();
    use_scroll_reveal();

    let open_contact = Callback::from(move |_: MouseEvent| {
        if let Some(funnel) = &funnel {
            funnel
                .modals
                .open(ModalId::Contact, Some(OpenerRef::new(CONTACT_OPENER_ID)));
        }
    });

    let vip_css = r#"
        .vip {
            padding: 6rem 2rem 4rem;
            text-align: center;
        }
        .carousel-3d {
            position: relative;
            height: 420px;
            perspective: 1200px;
            margin: 3rem auto;
        }
        .carousel-inner {
            position: absolute;
            inset: 0;
            transform-style: preserve-3d;
            transition: transform 0.8s ease;
        }
        .carousel-item {
            position: absolute;
            inset: 0;
            margin: auto;
            width: 260px;
            height: 180px;
            backface-visibility: hidden;
            opacity: 0.5;
        }
        .carousel-item.active {
            opacity: 1;
        }
    "#;

    html! {
        <div class="vip">
            <style>{vip_css}</style>
            <section class="fade-in">
                <h1>{"L'espace VIP"}</h1>
                <p>{"Les derniers tickets gagnants de la communauté."}</p>
                <SeatsCounter />
            </section>
            <Carousel3d items={wins()} />
            <Offers />
            <section class="fade-in">
                <button type="button" id={CONTACT_OPENER_ID} class="btn btn-primary" onclick={open_contact}>
                    {"Parler à Taurus"}
                </button>
            </section>
        </div>
    }
}
