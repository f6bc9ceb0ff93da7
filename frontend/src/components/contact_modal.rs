use taurus_funnel::contact::{contact_links, ContactChannel};
use taurus_funnel::modal::ModalId;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::modal::ModalShell;
use crate::context::use_funnel;

#[function_component(ContactModal)]
pub fn contact_modal() -> Html {
    let funnel = match use_funnel() {
        Some(funnel) => funnel,
        None => return html! {},
    };

    let links = contact_links(&funnel.config.contact).into_iter().map(|link| {
        let channel = link.channel;
        // Navigation goes ahead without waiting for the record.
        let onclick = {
            let submitter = funnel.submitter.clone();
            Callback::from(move |_: MouseEvent| {
                let submitter = submitter.clone();
                spawn_local(async move { submitter.record_contact_intent(channel).await });
            })
        };
        let class = match channel {
            ContactChannel::Telegram => "contact-telegram",
            ContactChannel::Whatsapp => "contact-whatsapp",
        };
        html! {
            <a
                class={classes!("btn", "contact-link", class)}
                href={link.href}
                target="_blank"
                rel="noopener noreferrer"
                {onclick}
            >
                { channel.label() }
            </a>
        }
    });

    html! {
        <ModalShell modal={ModalId::Contact} modals={funnel.modals.clone()}>
            <h3>{"Rejoindre le VIP"}</h3>
            <p>{"Choisis ton canal, le message est déjà prêt."}</p>
            <div class="contact-links">{ for links }</div>
        </ModalShell>
    }
}
