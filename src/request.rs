use crate::error::TransportError;
use std::collections::BTreeMap;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::{HashMap, VecDeque};

// =========================================================
// HTTP abstraction
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A file picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    /// The transport sets the multipart boundary header itself.
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body.to_string());
        self
    }

    pub fn with_multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| {
                let mime = ct.split(';').next().unwrap_or("").trim();
                mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
            })
            .unwrap_or(false)
    }
}

/// Transport seam. A non-2xx status is still `Ok`; only failures to get any
/// response at all are `Err`.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Several clients (and tests) may share one transport.
#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for std::rc::Rc<T> {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.as_ref().send(req).await
    }
}

// =========================================================
// Native client (reqwest)
// =========================================================

#[cfg(feature = "native")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(feature = "native")]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "native")]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);
        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        builder = match req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    form = match part {
                        FormPart::Text { name, value } => form.text(name, value),
                        FormPart::File { name, file } => {
                            let part = reqwest::multipart::Part::bytes(file.bytes)
                                .file_name(file.file_name)
                                .mime_str(&file.mime)
                                .map_err(|e| TransportError(format!("Invalid MIME type: {}", e)))?;
                            form.part(name, part)
                        }
                    };
                }
                builder.multipart(form)
            }
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError(format!("Reqwest Body Error: {}", e)))?
            .to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

// =========================================================
// Test utility: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(HttpResponse),
    Fail(String),
}

#[cfg(test)]
#[derive(Default)]
struct Script {
    pending: VecDeque<MockReply>,
    last: Option<MockReply>,
}

/// Scripted transport. Replies are consumed in order per `(method, url)`;
/// once a route runs dry its last reply repeats. Unscripted routes answer 404.
#[cfg(test)]
#[derive(Default)]
pub struct MockHttpClient {
    scripts: RefCell<HashMap<(HttpMethod, String), Script>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: HttpMethod, url: &str, reply: MockReply) {
        self.scripts
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .pending
            .push_back(reply);
    }

    pub fn mock_json(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.push(
            method,
            url,
            MockReply::Respond(HttpResponse {
                status,
                content_type: Some("application/json".to_string()),
                body: body.to_string().into_bytes(),
            }),
        );
    }

    pub fn mock_raw(
        &self,
        method: HttpMethod,
        url: &str,
        status: u16,
        content_type: Option<&str>,
        body: &[u8],
    ) {
        self.push(
            method,
            url,
            MockReply::Respond(HttpResponse {
                status,
                content_type: content_type.map(str::to_string),
                body: body.to_vec(),
            }),
        );
    }

    pub fn mock_no_content(&self, method: HttpMethod, url: &str) {
        self.mock_raw(method, url, 204, None, b"");
    }

    pub fn mock_failure(&self, method: HttpMethod, url: &str, reason: &str) {
        self.push(method, url, MockReply::Fail(reason.to_string()));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = (req.method, req.url.clone());
        self.requests.borrow_mut().push(req);

        let reply = self.scripts.borrow_mut().get_mut(&key).and_then(|script| {
            if let Some(next) = script.pending.pop_front() {
                script.last = Some(next);
            }
            script.last.clone()
        });

        match reply {
            Some(MockReply::Respond(resp)) => Ok(resp),
            Some(MockReply::Fail(reason)) => Err(TransportError(reason)),
            None => Ok(HttpResponse {
                status: 404,
                content_type: Some("text/html".to_string()),
                body: b"Not Found".to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_detection_ignores_parameters() {
        let resp = HttpResponse {
            status: 200,
            content_type: Some("application/json; charset=utf-8".into()),
            body: vec![],
        };
        assert!(resp.is_json());
        let csv = HttpResponse {
            content_type: Some("text/csv".into()),
            ..resp.clone()
        };
        assert!(!csv.is_json());
        let problem = HttpResponse {
            content_type: Some("application/problem+json".into()),
            ..resp
        };
        assert!(problem.is_json());
    }

    #[tokio::test]
    async fn mock_replies_in_order_then_repeats_the_last() {
        let mock = MockHttpClient::new();
        mock.mock_json(HttpMethod::Get, "http://x/a", 200, serde_json::json!([1]));
        mock.mock_json(HttpMethod::Get, "http://x/a", 200, serde_json::json!([2]));

        let first = mock.send(HttpRequest::new("http://x/a", HttpMethod::Get)).await.unwrap();
        let second = mock.send(HttpRequest::new("http://x/a", HttpMethod::Get)).await.unwrap();
        let third = mock.send(HttpRequest::new("http://x/a", HttpMethod::Get)).await.unwrap();

        assert_eq!(first.body, b"[1]");
        assert_eq!(second.body, b"[2]");
        assert_eq!(third.body, b"[2]");
        assert_eq!(mock.request_count(), 3);

        mock.mock_json(HttpMethod::Get, "http://x/a", 500, serde_json::json!({}));
        let fourth = mock.send(HttpRequest::new("http://x/a", HttpMethod::Get)).await.unwrap();
        assert_eq!(fourth.status, 500);
    }
}
