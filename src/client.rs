//! Resource Client: one uniform entry point to every backend collection.
//!
//! Each call attaches the stored token, targets `base_url + path` and turns
//! the HTTP answer into parsed JSON or a [`ClientError`]. Nothing is cached.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ValidationError, extract_error_message};
use crate::request::{FileUpload, FormPart, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::session::{KeyValueStorage, SessionContext};
use icycon_shared::{
    AVATAR_FIELD, AuthResponse, ChangeEmailRequest, ChangePasswordRequest, ListPayload,
    LoginRequest, PATH_ANALYTICS_EXPORT, PATH_CHANGE_EMAIL, PATH_CHANGE_PASSWORD, PATH_LOGIN,
    PATH_PROFILE_AVATAR, PATH_SIGNUP, ProfileUpdate, RecordId, Resource, Session, SignupRequest, UploadedFile,
    User, UserProfile, Writable,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;

#[cfg(test)]
mod tests;

// =========================================================
// Response shapes
// =========================================================

/// A decoded 2xx body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Json(Value),
    /// Anything not declared as JSON (CSV exports, files). Never parsed.
    Binary {
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
    /// 204 or a blank body.
    Empty,
}

/// Outcome of a create or update.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    /// The authoritative record as the server stored it.
    Record(T),
    /// The server accepted the change without echoing it back (204).
    NoContent,
}

impl<T> Mutation<T> {
    pub fn into_record(self) -> Option<T> {
        match self {
            Mutation::Record(r) => Some(r),
            Mutation::NoContent => None,
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, Mutation::NoContent)
    }
}

// =========================================================
// Client
// =========================================================

#[derive(Clone)]
pub struct ResourceClient<C, S> {
    config: Rc<ClientConfig>,
    http: C,
    session: SessionContext<S>,
}

impl<C: HttpClient, S: KeyValueStorage> ResourceClient<C, S> {
    pub fn new(config: ClientConfig, http: C, session: SessionContext<S>) -> Self {
        Self {
            config: Rc::new(config),
            http,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    // --- request plumbing ---

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(&self.config.url(path), method).with_header("Accept", "application/json")
    }

    /// Attach the token, or fail before anything is sent.
    fn authorized(&self, req: HttpRequest) -> ClientResult<HttpRequest> {
        let token = self.session.token().ok_or(ClientError::Unauthenticated)?;
        Ok(req.with_header(
            "Authorization",
            &self.config.auth_scheme.header_value(&token),
        ))
    }

    fn with_json_body<B: Serialize>(req: HttpRequest, body: &B) -> ClientResult<HttpRequest> {
        let value = serde_json::to_value(body)?;
        Ok(req
            .with_header("Content-Type", "application/json")
            .with_json(value))
    }

    /// Send and map non-2xx answers to [`ClientError::Server`].
    ///
    /// `fallback` is shown when the error body carries no message.
    async fn execute(&self, req: HttpRequest, fallback: &str) -> ClientResult<HttpResponse> {
        let method = req.method.as_str();
        let url = req.url.clone();
        tracing::debug!(method, url = %url, "sending request");

        let resp = self.http.send(req).await.map_err(|e| {
            tracing::warn!(method, url = %url, error = %e, "transport failure");
            ClientError::from(e)
        })?;

        if resp.ok() {
            return Ok(resp);
        }

        let message =
            extract_error_message(&resp.body).unwrap_or_else(|| fallback.to_string());
        tracing::warn!(method, url = %url, status = resp.status, %message, "request rejected");
        Err(ClientError::Server {
            status: resp.status,
            message,
        })
    }

    fn payload(resp: HttpResponse) -> ClientResult<ApiPayload> {
        // A missing content type is read as JSON: that is all the API speaks
        // outside of downloads, which always declare their type.
        let json = resp.is_json() || resp.content_type.is_none();
        if resp.status == 204 || (json && resp.body.iter().all(u8::is_ascii_whitespace)) {
            return Ok(ApiPayload::Empty);
        }
        if json {
            let value = serde_json::from_slice(&resp.body)?;
            return Ok(ApiPayload::Json(value));
        }
        Ok(ApiPayload::Binary {
            content_type: resp.content_type,
            bytes: resp.body,
        })
    }

    fn decode<T: DeserializeOwned>(resp: HttpResponse) -> ClientResult<Option<T>> {
        match Self::payload(resp)? {
            ApiPayload::Json(value) => Ok(Some(serde_json::from_value(value)?)),
            ApiPayload::Empty => Ok(None),
            ApiPayload::Binary { content_type, .. } => Err(ClientError::Decode(format!(
                "expected JSON, got {}",
                content_type.unwrap_or_default()
            ))),
        }
    }

    fn failed(label: &str) -> String {
        format!("{} request failed", label)
    }

    // --- path level operations ---

    pub async fn list_at<T: DeserializeOwned>(&self, path: &str, label: &str) -> ClientResult<Vec<T>> {
        let req = self.authorized(self.request(HttpMethod::Get, path))?;
        let resp = self.execute(req, &Self::failed(label)).await?;
        Ok(Self::decode::<ListPayload<T>>(resp)?
            .map(ListPayload::into_records)
            .unwrap_or_default())
    }

    pub async fn get_at<T: DeserializeOwned>(&self, path: &str, label: &str) -> ClientResult<T> {
        let req = self.authorized(self.request(HttpMethod::Get, path))?;
        let resp = self.execute(req, &Self::failed(label)).await?;
        Self::decode(resp)?.ok_or_else(|| ClientError::Decode("empty body".to_string()))
    }

    pub async fn create_at<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        label: &str,
        body: &B,
    ) -> ClientResult<Mutation<T>> {
        self.mutate(HttpMethod::Post, path, label, body).await
    }

    /// Partial update (`PATCH`); fields left out of `body` are untouched.
    pub async fn update_at<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        label: &str,
        body: &B,
    ) -> ClientResult<Mutation<T>> {
        self.mutate(HttpMethod::Patch, path, label, body).await
    }

    async fn mutate<T: DeserializeOwned, B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        label: &str,
        body: &B,
    ) -> ClientResult<Mutation<T>> {
        let req = self.authorized(self.request(method, path))?;
        let req = Self::with_json_body(req, body)?;
        let resp = self.execute(req, &Self::failed(label)).await?;
        Ok(match Self::decode(resp)? {
            Some(record) => Mutation::Record(record),
            None => Mutation::NoContent,
        })
    }

    pub async fn remove_at(&self, path: &str, label: &str) -> ClientResult<bool> {
        let req = self.authorized(self.request(HttpMethod::Delete, path))?;
        self.execute(req, &Self::failed(label)).await?;
        Ok(true)
    }

    // --- typed operations ---

    pub async fn list<R: Resource>(&self) -> ClientResult<Vec<R>> {
        self.list_at(R::PATH, R::LABEL).await
    }

    pub async fn get<R: Resource>(&self, id: &RecordId) -> ClientResult<R> {
        self.get_at(&R::item_path(id), R::LABEL).await
    }

    pub async fn create<R: Writable>(&self, draft: &R::Draft) -> ClientResult<Mutation<R>> {
        self.create_at(R::PATH, R::LABEL, draft).await
    }

    pub async fn update<R: Writable>(
        &self,
        id: &RecordId,
        draft: &R::Draft,
    ) -> ClientResult<Mutation<R>> {
        self.update_at(&R::item_path(id), R::LABEL, draft).await
    }

    pub async fn remove<R: Resource>(&self, id: &RecordId) -> ClientResult<bool> {
        self.remove_at(&R::item_path(id), R::LABEL).await
    }

    // --- authentication ---

    /// Exchange credentials for a token and persist the session.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ValidationError::new("email", "Please enter email and password.").into());
        }
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let req = Self::with_json_body(self.request(HttpMethod::Post, PATH_LOGIN), &body)?;
        self.authenticate(req, "Login failed").await
    }

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<Session> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(ValidationError::new("email", "Please enter email and password.").into());
        }
        if request.password != request.password_confirm {
            return Err(ValidationError::new("password_confirm", "Passwords do not match").into());
        }
        let req = Self::with_json_body(self.request(HttpMethod::Post, PATH_SIGNUP), request)?;
        self.authenticate(req, "Signup failed").await
    }

    async fn authenticate(&self, req: HttpRequest, fallback: &str) -> ClientResult<Session> {
        let resp = self.execute(req, fallback).await?;
        let auth: AuthResponse = Self::decode(resp)?
            .ok_or_else(|| ClientError::Decode("authentication response was empty".to_string()))?;
        let session = Session::from(auth);
        self.session.save(&session);
        tracing::info!(email = %session.user.email, "signed in");
        Ok(session)
    }

    /// Forget the session. Purely local: the token is simply dropped.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("signed out");
    }

    // --- account ---

    pub async fn profile(&self) -> ClientResult<UserProfile> {
        self.get::<UserProfile>(&RecordId::Str("me".into())).await
    }

    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> ClientResult<Mutation<UserProfile>> {
        self.update::<UserProfile>(&RecordId::Str("me".into()), update)
            .await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        let req = self.authorized(self.request(HttpMethod::Post, PATH_CHANGE_PASSWORD))?;
        let req = Self::with_json_body(req, request)?;
        self.execute(req, "Password change failed").await?;
        Ok(())
    }

    pub async fn change_email(&self, request: &ChangeEmailRequest) -> ClientResult<()> {
        let req = self.authorized(self.request(HttpMethod::Post, PATH_CHANGE_EMAIL))?;
        let req = Self::with_json_body(req, request)?;
        self.execute(req, "Email change failed").await?;

        if let Some(mut user) = self.session.user() {
            user.email = request.new_email.clone();
            self.session.update_user(&user);
        }
        Ok(())
    }

    // --- files ---

    /// Multipart upload of a single file. Returns the stored file's URL.
    pub async fn upload(&self, path: &str, field: &str, file: FileUpload) -> ClientResult<String> {
        let req = self.authorized(self.request(HttpMethod::Post, path))?;
        let req = req.with_multipart(vec![FormPart::File {
            name: field.to_string(),
            file,
        }]);
        let resp = self.execute(req, "Upload failed").await?;
        let uploaded: UploadedFile = Self::decode(resp)?
            .ok_or_else(|| ClientError::Decode("upload response was empty".to_string()))?;
        uploaded
            .location()
            .map(str::to_string)
            .ok_or_else(|| ClientError::Decode("upload response carried no URL".to_string()))
    }

    pub async fn upload_avatar(&self, file: FileUpload) -> ClientResult<String> {
        self.upload(PATH_PROFILE_AVATAR, AVATAR_FIELD, file).await
    }

    /// Export endpoints answer either JSON (often a `download_url`) or the
    /// file itself; the declared content type decides which.
    pub async fn export<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<ApiPayload> {
        let req = self.authorized(self.request(HttpMethod::Post, path))?;
        let req = Self::with_json_body(req, body)?;
        let resp = self.execute(req, "Export failed").await?;
        Self::payload(resp)
    }

    pub async fn export_analytics(
        &self,
        request: &icycon_shared::ExportRequest,
    ) -> ClientResult<ApiPayload> {
        self.export(PATH_ANALYTICS_EXPORT, request).await
    }
}
