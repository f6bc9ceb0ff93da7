//! Firebase production sink over its public REST endpoints: Cloud Storage for
//! ticket images and Firestore `documents:commit` for the records.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::FirebaseProject;
use crate::error::{BackendErrorCode, SubmissionError};
use crate::submission::payload::ImageAttachment;
use crate::submission::transport::{HttpResponse, OutboundRequest};

pub const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1";
pub const STORAGE_API: &str = "https://firebasestorage.googleapis.com/v0";

/// Field set to the server's commit time on every written document.
pub const CREATED_AT_FIELD: &str = "createdAt";

const DOCUMENT_ID_LEN: usize = 20;
const DOCUMENT_ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    name: String,
    #[serde(rename = "downloadTokens")]
    download_tokens: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStore {
    project: FirebaseProject,
}

impl DocumentStore {
    pub fn new(project: FirebaseProject) -> Self {
        Self { project }
    }

    /// `<folder>/<unix millis>_<file name>`, unique enough for one visitor's uploads.
    pub fn object_path(folder: &str, file_name: &str, at: DateTime<Utc>) -> String {
        format!("{}/{}_{}", folder, at.timestamp_millis(), file_name)
    }

    pub fn upload_request(&self, object_path: &str, image: &ImageAttachment) -> OutboundRequest {
        let url = format!(
            "{}/b/{}/o?uploadType=media&name={}",
            STORAGE_API,
            self.project.storage_bucket,
            urlencoding::encode(object_path)
        );
        OutboundRequest::post_bytes(&url, &image.content_type, image.bytes.clone())
    }

    /// Public download URL of an uploaded object, from the upload response.
    pub fn download_url(&self, response: &HttpResponse) -> Result<String, SubmissionError> {
        let upload: UploadResponse = serde_json::from_str(&response.body)?;
        let base = format!(
            "{}/b/{}/o/{}?alt=media",
            STORAGE_API,
            self.project.storage_bucket,
            urlencoding::encode(&upload.name)
        );
        let token = upload
            .download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').next())
            .filter(|token| !token.is_empty());
        Ok(match token {
            Some(token) => format!("{}&token={}", base, token),
            None => base,
        })
    }

    fn document_name(&self, collection: &str, document_id: &str) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.project.project_id, collection, document_id
        )
    }

    /// Creates `collection/document_id` with `data` plus a server-side `createdAt`.
    pub fn commit_request(
        &self,
        collection: &str,
        document_id: &str,
        data: &Value,
    ) -> Result<OutboundRequest, SubmissionError> {
        let url = format!(
            "{}/projects/{}/databases/(default)/documents:commit?key={}",
            FIRESTORE_API,
            self.project.project_id,
            urlencoding::encode(&self.project.api_key)
        );
        let body = json!({
            "writes": [{
                "update": {
                    "name": self.document_name(collection, document_id),
                    "fields": encode_fields(data),
                },
                "updateTransforms": [{
                    "fieldPath": CREATED_AT_FIELD,
                    "setToServerValue": "REQUEST_TIME",
                }],
                "currentDocument": { "exists": false },
            }]
        });
        Ok(OutboundRequest::post_json(&url, &body)?)
    }

    /// Maps a non-2xx REST answer to a classified backend error.
    pub fn check_response(response: &HttpResponse) -> Result<(), SubmissionError> {
        if response.is_success() {
            return Ok(());
        }
        let (status, message) = match serde_json::from_str::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => (envelope.error.status, envelope.error.message),
            Err(_) => (None, String::new()),
        };
        let message = if message.is_empty() {
            format!("HTTP {}", response.status)
        } else {
            message
        };
        Err(SubmissionError::Backend {
            code: BackendErrorCode::classify(status.as_deref(), response.status),
            message,
        })
    }
}

/// Random 20 character id, same alphabet as Firestore auto ids.
pub fn generate_document_id<R: Rng>(rng: &mut R) -> String {
    (0..DOCUMENT_ID_LEN)
        .map(|_| DOCUMENT_ID_CHARS[rng.gen_range(0..DOCUMENT_ID_CHARS.len())] as char)
        .collect()
}

/// Encodes a JSON value as a Firestore typed `Value`.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // integerValue is transported as a decimal string
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(_) => json!({ "mapValue": { "fields": encode_fields(value) } }),
    }
}

/// Encodes the members of a JSON object as a Firestore `fields` map.
pub fn encode_fields(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
        _ => Map::new(),
    }
}
