pub mod backend;
pub mod document_store;
pub mod payload;
pub mod relay;
pub mod transport;

pub use backend::{SubmissionBackend, SubmissionStage, Submitter};
pub use payload::{ApplicationForm, ApplicationPayload, ImageAttachment, TicketPayload, TicketTier};
pub use transport::{HttpResponse, MultipartField, OutboundRequest, RequestBody, Transport, TransportError};
