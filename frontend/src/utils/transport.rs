use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use js_sys::{Array, Uint8Array};
use taurus_funnel::submission::{
    HttpResponse, MultipartField, OutboundRequest, RequestBody, Transport, TransportError,
};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// `fetch` backed transport used by the submission adapters.
pub struct GlooTransport;

impl Transport for GlooTransport {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let url = request.url.clone();
            let response = build_request(request)?.send().await.map_err(|e| {
                gloo_console::log!(format!("Request to {} failed: {}", url, e));
                TransportError(e.to_string())
            })?;
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Ok(HttpResponse::new(status, text))
        })
    }
}

/// POST request ready to send. Multipart bodies let the browser pick the
/// boundary, so they carry no Content-Type header.
fn build_request(request: OutboundRequest) -> Result<Request, TransportError> {
    let OutboundRequest { url, headers, body } = request;
    let mut builder = Request::post(&url);
    for (name, value) in &headers {
        builder = builder.header(name, value);
    }
    let built = match body {
        RequestBody::Json(json) => builder.body(json),
        RequestBody::Bytes { data, .. } => builder.body(Uint8Array::from(data.as_slice())),
        RequestBody::Multipart(fields) => builder.body(form_data(&fields)?),
    };
    built.map_err(|e| TransportError(e.to_string()))
}

fn form_data(fields: &[MultipartField]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error)?;
    for field in fields {
        match field {
            MultipartField::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_error)?;
            }
            MultipartField::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let blob = blob_from_bytes(data, content_type)?;
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

fn blob_from_bytes(data: &[u8], content_type: &str) -> Result<Blob, TransportError> {
    let parts = Array::of1(&Uint8Array::from(data));
    let mut options = BlobPropertyBag::new();
    options.type_(content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)
}

fn js_error(value: JsValue) -> TransportError {
    TransportError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_net::http::Method;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn json_request_keeps_url_and_headers() {
        let outbound = OutboundRequest::post_json("https://httpbin.org/post", &serde_json::json!({ "a": 1 }))
            .unwrap()
            .header("Accept", "application/json");
        let request = build_request(outbound).unwrap();

        assert_eq!(request.url(), "https://httpbin.org/post");
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.headers().get("content-type").as_deref(), Some("application/json"));
        assert_eq!(request.headers().get("accept").as_deref(), Some("application/json"));
    }

    #[wasm_bindgen_test]
    fn bytes_request_has_a_single_content_type() {
        let outbound = OutboundRequest::post_bytes("https://example.com/o", "image/png", vec![1, 2, 3]);
        let request = build_request(outbound).unwrap();
        assert_eq!(request.headers().get("content-type").as_deref(), Some("image/png"));
    }

    #[wasm_bindgen_test]
    fn multipart_request_leaves_content_type_to_the_browser() {
        let outbound = OutboundRequest::post_multipart(
            "https://httpbin.org/post",
            vec![
                MultipartField::text("pseudo", "Taurus75"),
                MultipartField::File {
                    name: "image".to_string(),
                    file_name: "ticket.png".to_string(),
                    content_type: "image/png".to_string(),
                    data: vec![137, 80, 78, 71],
                },
            ],
        );
        let request = build_request(outbound).unwrap();
        assert_eq!(request.headers().get("content-type"), None);
    }
}
