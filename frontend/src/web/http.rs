//! Browser transport for the Resource Client, built on `fetch` via gloo-net.

use gloo_net::http::{Method, RequestBuilder};
use icycon::request::{FileUpload, FormPart, RequestBody};
use icycon::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

#[derive(Clone, Copy, Default)]
pub struct FetchHttpClient;

fn js_error(context: &str, e: JsValue) -> TransportError {
    TransportError(format!("{}: {:?}", context, e))
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn file_blob(file: &FileUpload) -> Result<Blob, TransportError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("building file blob", e))
}

/// The browser adds the multipart boundary header itself.
fn form_data(parts: &[FormPart]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(|e| js_error("creating form data", e))?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form
                .append_with_str(name, value)
                .map_err(|e| js_error("appending form field", e))?,
            FormPart::File { name, file } => form
                .append_with_blob_and_filename(name, &file_blob(file)?, &file.file_name)
                .map_err(|e| js_error("appending file", e))?,
        }
    }
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match &req.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(body) => builder.body(body.as_str()),
            RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = resp.status();
        let content_type = resp.headers().get("content-type");
        let body = resp
            .binary()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
