use taurus_funnel::flow;
use taurus_funnel::modal::ModalId;
use taurus_funnel::submission::{ApplicationForm, ApplicationPayload, SubmissionStage, TicketTier};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::modal::{run_follow_up, ModalShell};
use crate::context::{use_funnel, ApplicationRequest};

#[derive(Properties, PartialEq)]
pub struct ApplicationModalProps {
    pub request: Option<ApplicationRequest>,
}

fn field_value(node: &NodeRef) -> String {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(select) = node.cast::<HtmlSelectElement>() {
        return select.value();
    }
    node.cast::<HtmlTextAreaElement>()
        .map(|t| t.value())
        .unwrap_or_default()
}

/// VIP application form; header, fields and button follow the requested tier.
#[function_component(ApplicationModal)]
pub fn application_modal(props: &ApplicationModalProps) -> Html {
    let funnel = use_funnel();
    let form_ref = use_node_ref();
    let email_ref = use_node_ref();
    let anciennete_ref = use_node_ref();
    let frequence_ref = use_node_ref();
    let why_ref = use_node_ref();
    let status = use_state(|| None::<(String, bool)>);

    {
        let modals = funnel.as_ref().map(|f| f.modals.clone());
        let form_ref = form_ref.clone();
        let status = status.clone();
        use_effect_with_deps(
            move |request: &Option<ApplicationRequest>| {
                if let (Some(request), Some(modals)) = (request, modals) {
                    if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                        form.reset();
                    }
                    status.set(None);
                    modals.open(ModalId::Application, Some(request.opener.clone()));
                }
                || ()
            },
            props.request.clone(),
        );
    }

    let funnel = match funnel {
        Some(funnel) => funnel,
        None => return html! {},
    };
    let tier = props.request.as_ref().map_or(TicketTier::Low, |r| r.tier);

    let onsubmit = {
        let funnel = funnel.clone();
        let status = status.clone();
        let refs = (
            email_ref.clone(),
            anciennete_ref.clone(),
            frequence_ref.clone(),
            why_ref.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (email, anciennete, frequence, why) = &refs;
            let form = ApplicationForm {
                email: field_value(email),
                anciennete: field_value(anciennete),
                frequence: field_value(frequence),
                why: field_value(why),
            };
            let payload = ApplicationPayload::from_form(tier, &form);
            let funnel = funnel.clone();
            let status = status.clone();

            spawn_local(async move {
                let progress =
                    |stage: SubmissionStage| status.set(Some((stage.message().to_string(), true)));
                let outcome = flow::submit_application(
                    &funnel.submitter,
                    &payload,
                    &funnel.config.invite_url,
                    &progress,
                )
                .await;
                status.set(Some((outcome.message.clone(), outcome.succeeded)));
                run_follow_up(funnel.modals.clone(), ModalId::Application, outcome.follow_up).await;
            });
        })
    };

    let profile_fields = if tier.shows_profile_fields() {
        html! {
            <>
                <div class="form-group">
                    <label for="anciennete">{"Depuis combien de temps paries-tu ?"}</label>
                    <select ref={anciennete_ref} id="anciennete" name="anciennete">
                        <option value="moins-6-mois">{"Moins de 6 mois"}</option>
                        <option value="6-mois-2-ans">{"6 mois à 2 ans"}</option>
                        <option value="plus-2-ans">{"Plus de 2 ans"}</option>
                    </select>
                </div>
                <div class="form-group">
                    <label for="frequence">{"À quelle fréquence ?"}</label>
                    <select ref={frequence_ref} id="frequence" name="frequence">
                        <option value="occasionnel">{"Occasionnellement"}</option>
                        <option value="hebdomadaire">{"Chaque semaine"}</option>
                        <option value="quotidien">{"Tous les jours"}</option>
                    </select>
                </div>
                <div class="form-group">
                    <label for="why">{"Pourquoi rejoindre le VIP ?"}</label>
                    <textarea ref={why_ref} id="why" name="why" rows="3"></textarea>
                </div>
            </>
        }
    } else {
        html! {}
    };

    html! {
        <ModalShell modal={ModalId::Application} modals={funnel.modals.clone()}>
            <h3 class="application-header">{ tier.header() }</h3>
            <form ref={form_ref} {onsubmit}>
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input ref={email_ref} id="email" name="email" type="email" required=true />
                </div>
                { profile_fields }
                <button type="submit" class="btn btn-primary">{ tier.submit_label() }</button>
            </form>
            {
                match &*status {
                    Some((message, ok)) => html! {
                        <p class={classes!("form-status", if *ok { "success" } else { "error" })}>
                            { message.clone() }
                        </p>
                    },
                    None => html! {},
                }
            }
        </ModalShell>
    }
}
