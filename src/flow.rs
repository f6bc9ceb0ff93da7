//! What a form shows and does after a submission attempt.

use chrono::{DateTime, Utc};

use crate::submission::{ApplicationPayload, SubmissionStage, Submitter, TicketPayload, TicketTier, Transport};

pub const TICKET_CLOSE_DELAY_MS: u32 = 3_000;
pub const APPLICATION_CLOSE_DELAY_MS: u32 = 3_000;
pub const INVITE_REDIRECT_DELAY_MS: u32 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Leave the modal open so the visitor can retry.
    StayOpen,
    CloseAfter { delay_ms: u32 },
    RedirectAfter { url: String, delay_ms: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub succeeded: bool,
    pub message: String,
    pub follow_up: FollowUp,
    /// The form should be cleared.
    pub reset_form: bool,
}

impl FormOutcome {
    fn failure(message: String) -> Self {
        Self {
            succeeded: false,
            message,
            follow_up: FollowUp::StayOpen,
            reset_form: false,
        }
    }
}

pub async fn submit_ticket<T: Transport>(
    submitter: &Submitter<T>,
    ticket: &TicketPayload,
    submitted_at: DateTime<Utc>,
    progress: &dyn Fn(SubmissionStage),
) -> FormOutcome {
    progress(SubmissionStage::Sending);
    match submitter.submit_ticket(ticket, submitted_at, progress).await {
        Ok(()) => {
            let message = if submitter.backend().is_relay() {
                "Merci pour votre ticket ! (Mode développement)"
            } else {
                "Merci pour votre ticket !"
            };
            FormOutcome {
                succeeded: true,
                message: message.to_string(),
                follow_up: FollowUp::CloseAfter { delay_ms: TICKET_CLOSE_DELAY_MS },
                reset_form: true,
            }
        }
        Err(e) => {
            tracing::error!("Ticket submission failed: {:?}", e);
            FormOutcome::failure(e.user_message())
        }
    }
}

pub async fn submit_application<T: Transport>(
    submitter: &Submitter<T>,
    application: &ApplicationPayload,
    invite_url: &str,
    progress: &dyn Fn(SubmissionStage),
) -> FormOutcome {
    progress(SubmissionStage::Sending);
    match submitter.submit_application(application, progress).await {
        Ok(()) => {
            let tier = application.ticket_type;
            let follow_up = match tier {
                TicketTier::Low => FollowUp::RedirectAfter {
                    url: invite_url.to_string(),
                    delay_ms: INVITE_REDIRECT_DELAY_MS,
                },
                TicketTier::Mid | TicketTier::High => FollowUp::CloseAfter {
                    delay_ms: APPLICATION_CLOSE_DELAY_MS,
                },
            };
            FormOutcome {
                succeeded: true,
                message: tier.success_message().to_string(),
                follow_up,
                reset_form: false,
            }
        }
        Err(e) => {
            tracing::error!(tier = %application.ticket_type, "Application submission failed: {:?}", e);
            FormOutcome::failure(e.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, FirebaseProject, FunnelConfig};
    use crate::submission::transport::{HttpResponse, MockTransport, RequestBody, TransportError};
    use crate::submission::ApplicationForm;
    use std::cell::RefCell;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-15T10:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_dev_ticket_thanks_and_closes_after_three_seconds() {
        let config = FunnelConfig::for_host("localhost");
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|req| req.url == "https://httpbin.org/post" && matches!(req.body, RequestBody::Multipart(_)))
            .returning(|_| Box::pin(async { Ok(HttpResponse::new(200, "{}")) }));
        let submitter = Submitter::new(&config, transport);

        let messages = RefCell::new(Vec::new());
        let outcome = submit_ticket(
            &submitter,
            &TicketPayload::new("Taurus75", "Combiné du soir", None),
            now(),
            &|stage| messages.borrow_mut().push(stage.message()),
        )
        .await;

        assert_eq!(
            outcome,
            FormOutcome {
                succeeded: true,
                message: "Merci pour votre ticket ! (Mode développement)".to_string(),
                follow_up: FollowUp::CloseAfter { delay_ms: 3_000 },
                reset_form: true,
            }
        );
        assert_eq!(
            messages.into_inner(),
            vec!["Envoi en cours...", "Envoi en mode développement..."]
        );
    }

    #[tokio::test]
    async fn test_relay_rejection_keeps_modal_open() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Box::pin(async { Ok(HttpResponse::new(500, "")) }));
        let submitter = Submitter::new(&FunnelConfig::for_host("localhost"), transport);

        let outcome = submit_ticket(&submitter, &TicketPayload::new("a", "b", None), now(), &|_| {}).await;
        assert!(!outcome.succeeded);
        assert_eq!(outcome.follow_up, FollowUp::StayOpen);
        assert!(outcome.message.starts_with("Erreur : "));
        assert!(outcome.message.contains("500"));
    }

    #[tokio::test]
    async fn test_low_application_redirects_to_invite_after_two_seconds() {
        let config = FunnelConfig {
            environment: Environment::Production,
            firebase: Some(FirebaseProject {
                project_id: "taurus-demo".to_string(),
                api_key: "demo-key".to_string(),
                storage_bucket: "taurus-demo.appspot.com".to_string(),
            }),
            ..FunnelConfig::default()
        };
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|req| req.url.contains("documents:commit"))
            .returning(|_| Box::pin(async { Ok(HttpResponse::new(200, r#"{"writeResults":[{}]}"#)) }));
        let submitter = Submitter::new(&config, transport);

        let payload = ApplicationPayload::from_form(
            TicketTier::Low,
            &ApplicationForm {
                email: "fan@example.com".to_string(),
                anciennete: "1 an".to_string(),
                frequence: "hebdo".to_string(),
                why: "progresser".to_string(),
            },
        );
        let outcome = submit_application(&submitter, &payload, &config.invite_url, &|_| {}).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.message, "Inscription réussie ! Redirection...");
        assert_eq!(
            outcome.follow_up,
            FollowUp::RedirectAfter {
                url: "https://t.me/+Ltq0JPVy73E0ZTU0".to_string(),
                delay_ms: 2_000,
            }
        );
    }

    #[tokio::test]
    async fn test_mid_and_high_applications_close() {
        for tier in [TicketTier::Mid, TicketTier::High] {
            let mut transport = MockTransport::new();
            transport
                .expect_send()
                .times(1)
                .returning(|_| Box::pin(async { Ok(HttpResponse::new(200, "{}")) }));
            let submitter = Submitter::new(&FunnelConfig::for_host("localhost"), transport);
            let payload = ApplicationPayload::from_form(tier, &ApplicationForm::default());

            let outcome = submit_application(&submitter, &payload, "https://t.me/+x", &|_| {}).await;
            assert_eq!(outcome.message, tier.success_message());
            assert_eq!(outcome.follow_up, FollowUp::CloseAfter { delay_ms: 3_000 });
        }
    }

    #[tokio::test]
    async fn test_network_failure_message() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Box::pin(async { Err(TransportError("Failed to fetch".to_string())) }));
        let submitter = Submitter::new(&FunnelConfig::for_host("localhost"), transport);
        let payload = ApplicationPayload::from_form(TicketTier::Low, &ApplicationForm::default());

        let outcome = submit_application(&submitter, &payload, "https://t.me/+x", &|_| {}).await;
        assert_eq!(outcome.message, "Erreur : Failed to fetch");
        assert_eq!(outcome.follow_up, FollowUp::StayOpen);
    }
}
