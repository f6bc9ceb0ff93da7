use serde::Serialize;

use crate::error::SubmissionError;
use crate::submission::payload::{tagged, TicketPayload, TICKET_KIND};
use crate::submission::transport::{HttpResponse, MultipartField, OutboundRequest};

/// Form relay used while developing locally: payloads are posted as-is and any
/// 2xx answer counts as accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEndpoint {
    url: String,
}

impl RelayEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Multipart body mirroring the ticket form, with the image as a file part.
    pub fn ticket_request(&self, ticket: &TicketPayload) -> OutboundRequest {
        let mut fields = vec![
            MultipartField::text("pseudo", &ticket.pseudo),
            MultipartField::text("comment", &ticket.comment),
            MultipartField::text("type", TICKET_KIND),
        ];
        if let Some(image) = &ticket.image {
            fields.push(MultipartField::File {
                name: "image".to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                data: image.bytes.clone(),
            });
        }
        OutboundRequest::post_multipart(&self.url, fields)
    }

    /// JSON body with the `type` discriminator.
    pub fn json_request<T: Serialize>(
        &self,
        kind: &str,
        payload: &T,
    ) -> Result<OutboundRequest, SubmissionError> {
        let body = tagged(kind, payload)?;
        Ok(OutboundRequest::post_json(&self.url, &body)?.header("Accept", "application/json"))
    }

    pub fn check_response(response: &HttpResponse) -> Result<(), SubmissionError> {
        if response.is_success() {
            Ok(())
        } else {
            Err(SubmissionError::RelayRejected(response.status))
        }
    }
}
