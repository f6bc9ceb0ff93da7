use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::{CollectionNames, FunnelConfig};
use crate::contact::{ContactChannel, ContactIntent};
use crate::error::SubmissionError;
use crate::submission::document_store::{generate_document_id, DocumentStore};
use crate::submission::payload::{
    tagged, ApplicationPayload, TicketPayload, APPLICATION_KIND, CONTACT_INTENT_KIND,
};
use crate::submission::relay::RelayEndpoint;
use crate::submission::transport::{HttpResponse, OutboundRequest, Transport};

/// Where submissions go, decided once from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionBackend {
    /// Production without a configured project: every submission fails before the network.
    Unavailable,
    Relay(RelayEndpoint),
    DocumentStore(DocumentStore),
}

impl SubmissionBackend {
    pub fn from_config(config: &FunnelConfig) -> Self {
        if config.is_development() {
            return SubmissionBackend::Relay(RelayEndpoint::new(config.relay_endpoint.clone()));
        }
        match &config.firebase {
            Some(project) => SubmissionBackend::DocumentStore(DocumentStore::new(project.clone())),
            None => {
                tracing::warn!("No Firebase project configured, submissions are disabled");
                SubmissionBackend::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, SubmissionBackend::Unavailable)
    }

    pub fn is_relay(&self) -> bool {
        matches!(self, SubmissionBackend::Relay(_))
    }
}

/// Progress of a submission, shown in the form's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Sending,
    SendingDevelopment,
    UploadingImage,
    SavingDocument,
}

impl SubmissionStage {
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionStage::Sending => "Envoi en cours...",
            SubmissionStage::SendingDevelopment => "Envoi en mode développement...",
            SubmissionStage::UploadingImage => "Upload de l'image...",
            SubmissionStage::SavingDocument => "Sauvegarde des données...",
        }
    }
}

/// Sends form payloads through the selected backend. One attempt per call, no retry,
/// no de-duplication: submitting twice creates two records.
pub struct Submitter<T> {
    backend: SubmissionBackend,
    transport: T,
    collections: CollectionNames,
    storage_folder: String,
}

impl<T: Transport> Submitter<T> {
    pub fn new(config: &FunnelConfig, transport: T) -> Self {
        Self::with_backend(SubmissionBackend::from_config(config), config, transport)
    }

    pub fn with_backend(backend: SubmissionBackend, config: &FunnelConfig, transport: T) -> Self {
        Self {
            backend,
            transport,
            collections: config.collections.clone(),
            storage_folder: config.storage_folder.clone(),
        }
    }

    pub fn backend(&self) -> &SubmissionBackend {
        &self.backend
    }

    async fn send(&self, request: OutboundRequest) -> Result<HttpResponse, SubmissionError> {
        self.transport
            .send(request)
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))
    }

    async fn write_document(
        &self,
        store: &DocumentStore,
        collection: &str,
        data: &Value,
    ) -> Result<(), SubmissionError> {
        let document_id = generate_document_id(&mut rand::thread_rng());
        let request = store.commit_request(collection, &document_id, data)?;
        let response = self.send(request).await?;
        DocumentStore::check_response(&response)?;
        tracing::info!(collection, document_id = %document_id, "Document written");
        Ok(())
    }

    pub async fn submit_ticket(
        &self,
        ticket: &TicketPayload,
        submitted_at: DateTime<Utc>,
        progress: &dyn Fn(SubmissionStage),
    ) -> Result<(), SubmissionError> {
        match &self.backend {
            SubmissionBackend::Unavailable => Err(SubmissionError::BackendUnavailable),
            SubmissionBackend::Relay(relay) => {
                progress(SubmissionStage::SendingDevelopment);
                let response = self.send(relay.ticket_request(ticket)).await?;
                RelayEndpoint::check_response(&response)
            }
            SubmissionBackend::DocumentStore(store) => {
                let mut image_url = String::new();
                if let Some(image) = &ticket.image {
                    progress(SubmissionStage::UploadingImage);
                    let path = DocumentStore::object_path(
                        &self.storage_folder,
                        &image.file_name,
                        submitted_at,
                    );
                    let response = self.send(store.upload_request(&path, image)).await?;
                    DocumentStore::check_response(&response)?;
                    image_url = store.download_url(&response)?;
                }
                progress(SubmissionStage::SavingDocument);
                self.write_document(store, &self.collections.tickets, &ticket.document(&image_url))
                    .await
            }
        }
    }

    pub async fn submit_application(
        &self,
        application: &ApplicationPayload,
        progress: &dyn Fn(SubmissionStage),
    ) -> Result<(), SubmissionError> {
        self.submit_json(&self.collections.applications, APPLICATION_KIND, application, progress)
            .await
    }

    async fn submit_json<P: Serialize>(
        &self,
        collection: &str,
        kind: &str,
        payload: &P,
        progress: &dyn Fn(SubmissionStage),
    ) -> Result<(), SubmissionError> {
        match &self.backend {
            SubmissionBackend::Unavailable => Err(SubmissionError::BackendUnavailable),
            SubmissionBackend::Relay(relay) => {
                progress(SubmissionStage::SendingDevelopment);
                let response = self.send(relay.json_request(kind, payload)?).await?;
                RelayEndpoint::check_response(&response)
            }
            SubmissionBackend::DocumentStore(store) => {
                progress(SubmissionStage::SavingDocument);
                self.write_document(store, collection, &tagged(kind, payload)?).await
            }
        }
    }

    /// Best effort: failures are logged and dropped, never reported to the caller.
    pub async fn record_contact_intent(&self, channel: ContactChannel) {
        let intent = ContactIntent { channel };
        let result = self
            .submit_json(&self.collections.contact_intents, CONTACT_INTENT_KIND, &intent, &|_| {})
            .await;
        if let Err(e) = result {
            tracing::debug!(channel = channel.label(), "Contact intent not recorded: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, FirebaseProject};
    use crate::submission::payload::{ApplicationForm, ImageAttachment, TicketTier};
    use crate::submission::transport::{MockTransport, RequestBody, TransportError};
    use std::cell::RefCell;

    fn production_config() -> FunnelConfig {
        FunnelConfig {
            environment: Environment::Production,
            firebase: Some(FirebaseProject {
                project_id: "taurus-demo".to_string(),
                api_key: "demo-key".to_string(),
                storage_bucket: "taurus-demo.appspot.com".to_string(),
            }),
            ..FunnelConfig::default()
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-15T10:00:00Z").unwrap().with_timezone(&Utc)
    }

    fn ok(status: u16, body: &'static str) -> futures::future::LocalBoxFuture<'static, Result<HttpResponse, TransportError>> {
        Box::pin(async move { Ok(HttpResponse::new(status, body)) })
    }

    #[test]
    fn test_backend_selection() {
        assert!(SubmissionBackend::from_config(&FunnelConfig::for_host("localhost")).is_relay());
        assert_eq!(
            SubmissionBackend::from_config(&FunnelConfig::for_host("taurusbet.fr")),
            SubmissionBackend::Unavailable
        );
        assert!(matches!(
            SubmissionBackend::from_config(&production_config()),
            SubmissionBackend::DocumentStore(_)
        ));
    }

    #[test]
    fn test_backend_keeps_the_configured_target() {
        let config = production_config();
        let project = config.firebase.clone().unwrap();
        assert_eq!(
            SubmissionBackend::from_config(&config),
            SubmissionBackend::DocumentStore(DocumentStore::new(project))
        );
        assert_eq!(
            SubmissionBackend::from_config(&FunnelConfig::for_host("127.0.0.1")),
            SubmissionBackend::Relay(RelayEndpoint::new("https://httpbin.org/post"))
        );
    }

    #[tokio::test]
    async fn test_unavailable_backend_never_touches_network() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let submitter = Submitter::new(&FunnelConfig::for_host("taurusbet.fr"), transport);

        let result = submitter
            .submit_ticket(&TicketPayload::new("a", "b", None), now(), &|_| {})
            .await;
        assert_eq!(result, Err(SubmissionError::BackendUnavailable));
    }

    #[tokio::test]
    async fn test_production_ticket_uploads_then_writes() {
        let mut transport = MockTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| {
                req.url.starts_with("https://firebasestorage.googleapis.com/v0/b/taurus-demo.appspot.com/o?")
                    && matches!(req.body, RequestBody::Bytes { .. })
            })
            .returning(|_| {
                ok(200, r#"{"name":"ticket_images/1736935200000_t.png","downloadTokens":"tok"}"#)
            });
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| {
                let body = req.json_body().unwrap_or_default();
                let fields = &body["writes"][0]["update"]["fields"];
                req.url.contains("documents:commit")
                    && fields["pseudo"]["stringValue"] == "Taurus75"
                    && fields["type"]["stringValue"] == "ticket_submission"
                    && fields["imageUrl"]["stringValue"]
                        == "https://firebasestorage.googleapis.com/v0/b/taurus-demo.appspot.com/o/ticket_images%2F1736935200000_t.png?alt=media&token=tok"
            })
            .returning(|_| ok(200, r#"{"writeResults":[{}]}"#));

        let submitter = Submitter::new(&production_config(), transport);
        let stages = RefCell::new(Vec::new());
        let ticket = TicketPayload::new(
            "Taurus75",
            "Combiné",
            Some(ImageAttachment::new("t.png", "image/png", vec![1, 2, 3])),
        );
        let result = submitter
            .submit_ticket(&ticket, now(), &|stage| stages.borrow_mut().push(stage))
            .await;

        assert_eq!(result, Ok(()));
        assert_eq!(
            stages.into_inner(),
            vec![SubmissionStage::UploadingImage, SubmissionStage::SavingDocument]
        );
    }

    #[tokio::test]
    async fn test_upload_permission_error_stops_before_write() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| ok(403, r#"{"error":{"code":403,"message":"Permission denied."}}"#));

        let submitter = Submitter::new(&production_config(), transport);
        let ticket = TicketPayload::new(
            "Taurus75",
            "",
            Some(ImageAttachment::new("t.png", "image/png", vec![1])),
        );
        let err = submitter.submit_ticket(&ticket, now(), &|_| {}).await.unwrap_err();
        assert!(err.user_message().contains("Permissions Firebase insuffisantes"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Box::pin(async { Err(TransportError("Failed to fetch".to_string())) })
        });
        let submitter = Submitter::new(&FunnelConfig::for_host("localhost"), transport);
        let payload = ApplicationPayload::from_form(TicketTier::Mid, &ApplicationForm::default());
        let err = submitter.submit_application(&payload, &|_| {}).await.unwrap_err();
        assert_eq!(err, SubmissionError::Transport("Failed to fetch".to_string()));
    }

    #[tokio::test]
    async fn test_application_written_to_configured_collection() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|req| {
                let body = req.json_body().unwrap_or_default();
                let name = body["writes"][0]["update"]["name"].as_str().unwrap_or_default().to_string();
                name.starts_with("projects/taurus-demo/databases/(default)/documents/vip_applications/")
                    && body["writes"][0]["update"]["fields"]["ticketType"]["stringValue"] == "mid"
            })
            .returning(|_| ok(200, "{}"));
        let submitter = Submitter::new(&production_config(), transport);
        let payload = ApplicationPayload::from_form(TicketTier::Mid, &ApplicationForm::default());
        assert_eq!(submitter.submit_application(&payload, &|_| {}).await, Ok(()));
    }

    #[tokio::test]
    async fn test_contact_intent_failure_is_swallowed() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|req| {
                req.json_body()
                    .map(|body| body["type"] == "contact_intent" && body["channel"] == "telegram")
                    .unwrap_or(false)
            })
            .returning(|_| ok(500, ""));
        let submitter = Submitter::new(&FunnelConfig::for_host("localhost"), transport);
        submitter.record_contact_intent(ContactChannel::Telegram).await;
    }

    #[tokio::test]
    async fn test_contact_intent_skipped_when_unavailable() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let submitter = Submitter::new(&FunnelConfig::for_host("taurusbet.fr"), transport);
        submitter.record_contact_intent(ContactChannel::Whatsapp).await;
    }
}
