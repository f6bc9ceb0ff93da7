use futures::future::LocalBoxFuture;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl MultipartField {
    pub fn text(name: &str, value: &str) -> Self {
        MultipartField::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MultipartField::Text { name, .. } | MultipartField::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(String),
    Multipart(Vec<MultipartField>),
    Bytes { content_type: String, data: Vec<u8> },
}

/// A POST request, independent of the HTTP client that ends up sending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl OutboundRequest {
    pub fn post_json<T: Serialize + ?Sized>(url: &str, data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            url: url.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: RequestBody::Json(serde_json::to_string(data)?),
        })
    }

    pub fn post_multipart(url: &str, fields: Vec<MultipartField>) -> Self {
        Self {
            url: url.to_string(),
            headers: Vec::new(),
            body: RequestBody::Multipart(fields),
        }
    }

    pub fn post_bytes(url: &str, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            url: url.to_string(),
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body: RequestBody::Bytes {
                content_type: content_type.to_string(),
                data,
            },
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Option<serde_json::Value> {
        match &self.body {
            RequestBody::Json(body) => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced an HTTP response (offline, CORS, DNS...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one request, once. Implemented over `fetch` in the browser.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>>;
}
