use js_sys::Uint8Array;
use taurus_funnel::flow;
use taurus_funnel::modal::{ModalId, OpenerRef};
use taurus_funnel::submission::{ImageAttachment, SubmissionStage, TicketPayload};
use taurus_funnel::time_source::{Clock, SystemClock};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::modal::{run_follow_up, ModalShell};
use crate::context::use_funnel;

const OPENER_ID: &str = "openTicketModal";

#[derive(Clone, PartialEq)]
struct Status {
    message: String,
    success: bool,
}

async fn read_image(input: &HtmlInputElement) -> Result<Option<ImageAttachment>, String> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(Some(ImageAttachment::new(file.name(), file.type_(), bytes)))
}

/// "Share your ticket" button and the modal it opens.
#[function_component(TicketModal)]
pub fn ticket_modal() -> Html {
    let funnel = use_funnel();
    let form_ref = use_node_ref();
    let pseudo_ref = use_node_ref();
    let comment_ref = use_node_ref();
    let image_ref = use_node_ref();
    let status = use_state(|| None::<Status>);

    let funnel = match funnel {
        Some(funnel) => funnel,
        None => return html! {},
    };

    let open = {
        let modals = funnel.modals.clone();
        let form_ref = form_ref.clone();
        let status = status.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                form.reset();
            }
            status.set(None);
            modals.open(ModalId::Ticket, Some(OpenerRef::new(OPENER_ID)));
        })
    };

    let onsubmit = {
        let funnel = funnel.clone();
        let status = status.clone();
        let (form_ref, pseudo_ref, comment_ref, image_ref) = (
            form_ref.clone(),
            pseudo_ref.clone(),
            comment_ref.clone(),
            image_ref.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let pseudo = pseudo_ref
                .cast::<HtmlInputElement>()
                .map(|i| i.value())
                .unwrap_or_default();
            let comment = comment_ref
                .cast::<HtmlTextAreaElement>()
                .map(|t| t.value())
                .unwrap_or_default();
            let image_input = image_ref.cast::<HtmlInputElement>();
            let form = form_ref.cast::<HtmlFormElement>();
            let funnel = funnel.clone();
            let status = status.clone();

            spawn_local(async move {
                let image = match &image_input {
                    Some(input) => match read_image(input).await {
                        Ok(image) => image,
                        Err(e) => {
                            log::error!("Could not read ticket image: {}", e);
                            status.set(Some(Status {
                                message: "Erreur : impossible de lire l'image.".to_string(),
                                success: false,
                            }));
                            return;
                        }
                    },
                    None => None,
                };
                let ticket = TicketPayload::new(&pseudo, &comment, image);
                let progress = |stage: SubmissionStage| {
                    status.set(Some(Status {
                        message: stage.message().to_string(),
                        success: true,
                    }))
                };

                let outcome =
                    flow::submit_ticket(&funnel.submitter, &ticket, SystemClock.now(), &progress).await;
                status.set(Some(Status {
                    message: outcome.message.clone(),
                    success: outcome.succeeded,
                }));
                if outcome.reset_form {
                    if let Some(form) = &form {
                        form.reset();
                    }
                }
                run_follow_up(funnel.modals.clone(), ModalId::Ticket, outcome.follow_up).await;
            });
        })
    };

    html! {
        <>
            <button type="button" id={OPENER_ID} class="btn btn-primary" onclick={open}>
                {"Partager mon ticket"}
            </button>
            <ModalShell modal={ModalId::Ticket} modals={funnel.modals.clone()}>
                <h3>{"Partage ton ticket"}</h3>
                <form ref={form_ref} {onsubmit}>
                    <label for="ticketPseudo">{"Pseudo"}</label>
                    <input ref={pseudo_ref} id="ticketPseudo" name="pseudo" type="text" required=true />
                    <label for="ticketComment">{"Commentaire"}</label>
                    <textarea ref={comment_ref} id="ticketComment" name="comment" rows="3"></textarea>
                    <label for="ticketImage">{"Capture du ticket"}</label>
                    <input ref={image_ref} id="ticketImage" name="image" type="file" accept="image/*" />
                    <button type="submit" class="btn btn-primary">{"Envoyer"}</button>
                </form>
                {
                    match &*status {
                        Some(status) => html! {
                            <p class={classes!("form-status", if status.success { "success" } else { "error" })}>
                                { status.message.clone() }
                            </p>
                        },
                        None => html! {},
                    }
                }
            </ModalShell>
        </>
    }
}
