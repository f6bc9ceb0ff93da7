use taurus_funnel::modal::OpenerRef;
use taurus_funnel::submission::TicketTier;
use web_sys::Element;
use yew::prelude::*;

use crate::context::{use_funnel, FunnelContext};

struct Offer {
    tier: TicketTier,
    card_class: &'static str,
    price: &'static str,
    perks: &'static [&'static str],
}

const OFFERS: [Offer; 3] = [
    Offer {
        tier: TicketTier::Low,
        card_class: "ticket-decouverte",
        price: "Gratuit",
        perks: &["Accès au canal Telegram", "Pronostics du week-end"],
    },
    Offer {
        tier: TicketTier::Mid,
        card_class: "ticket-taurus",
        price: "40€ / mois",
        perks: &["Maillot Taurus offert", "Accès VIP complet", "Résiliable à tout moment"],
    },
    Offer {
        tier: TicketTier::High,
        card_class: "ticket-taurus-plus",
        price: "Sur demande",
        perks: &["Suivi personnalisé", "Places limitées"],
    },
];

/// Tier carried by the clicked card: its `data-ticket`, else its classes.
fn tier_of(card: &Element) -> Option<TicketTier> {
    card.get_attribute("data-ticket")
        .and_then(|value| value.parse().ok())
        .or_else(|| TicketTier::from_card_classes(&card.class_name()))
}

fn ask_for_tier(funnel: &FunnelContext, button: &Element) {
    let Some(card) = button.closest(".ticket").ok().flatten() else {
        return;
    };
    match tier_of(&card) {
        Some(tier) => funnel.apply.emit((tier, OpenerRef::new(button.id()))),
        None => log::warn!("Offer card without a tier: {}", card.class_name()),
    }
}

#[function_component(Offers)]
pub fn offers() -> Html {
    let funnel = use_funnel();

    let onclick = Callback::from(move |e: MouseEvent| {
        if let (Some(funnel), Some(button)) = (&funnel, e.target_dyn_into::<Element>()) {
            ask_for_tier(funnel, &button);
        }
    });

    html! {
        <section id="offres" class="offers fade-in">
            <h2>{"Nos offres"}</h2>
            <div class="ticket-grid">
                { for OFFERS.iter().map(|offer| html! {
                    <div class={classes!("ticket", offer.card_class)} data-ticket={offer.tier.as_str()}>
                        <h3>{ offer.tier.header() }</h3>
                        <p class="price">{ offer.price }</p>
                        <ul>
                            { for offer.perks.iter().map(|perk| html! { <li>{ *perk }</li> }) }
                        </ul>
                        <button
                            type="button"
                            id={format!("cta-{}", offer.tier)}
                            class="btn ticket-cta"
                            onclick={onclick.clone()}
                        >
                            {"Je choisis ce ticket"}
                        </button>
                    </div>
                }) }
            </div>
        </section>
    }
}
