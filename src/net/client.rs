//! Authenticated HTTP client for the BlazingSocial API.
//!
//! ARCHITECTURE
//! ============
//! Every request goes through [`ApiClient::send`], which attaches the bearer
//! token from the injected [`TokenStore`]. A `401` triggers one refresh
//! exchange and one replay of the request. When the exchange fails
//! the store is cleared and the session-expired hook fires.
//!
//! TRADE-OFFS
//! ==========
//! Refreshes are serialized behind a mutex. A request that lost the race
//! notices the stored access token already changed and replays with it, so a
//! burst of `401`s costs a single exchange. Request bodies are kept as owned
//! descriptions rather than `reqwest` builders because multipart forms cannot
//! be cloned and must be rebuilt for the replay.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::query::QueryParams;
use super::session::TokenStore;
use super::types::{RefreshRequest, RefreshResponse};
use crate::config::ClientConfig;
use crate::error::ApiError;

pub const TOKEN_REFRESH_PATH: &str = "/api/auth/token/refresh/";

const USER_AGENT: &str = concat!("blazing-admin/", env!("CARGO_PKG_VERSION"));

type ExpiredHook = Arc<dyn Fn() + Send + Sync>;

// =============================================================================
// REQUEST DESCRIPTION
// =============================================================================

/// One `multipart/form-data` field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormPart {
    Text { name: String, value: String },
    File { name: String, file_name: String, mime: Option<String>, bytes: Vec<u8> },
}

/// A multipart body that can be turned into a fresh `reqwest` form per attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<FormPart>,
}

impl MultipartBody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field. Blank values are skipped like query parameters.
    #[must_use]
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.parts.push(FormPart::Text { name: name.to_owned(), value });
        }
        self
    }

    #[must_use]
    pub fn text_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    #[must_use]
    pub fn file(mut self, name: &str, file_name: &str, mime: Option<&str>, bytes: Vec<u8>) -> Self {
        self.parts.push(FormPart::File {
            name: name.to_owned(),
            file_name: file_name.to_owned(),
            mime: mime.map(str::to_owned),
            bytes,
        });
        self
    }

    /// Read `path` and add it as a file field named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upload`] if the file cannot be read.
    pub async fn file_from_path(self, name: &str, path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::Upload { path: path.display().to_string(), source })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        let mime = guess_mime(&file_name);
        Ok(self.file(name, &file_name, mime, bytes))
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .map(|p| match p {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
            })
            .collect()
    }

    fn to_form(&self) -> Result<reqwest::multipart::Form, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File { name, file_name, mime, bytes } => {
                    let mut file = reqwest::multipart::Part::bytes(bytes.clone()).file_name(file_name.clone());
                    if let Some(mime) = mime {
                        file = file.mime_str(mime)?;
                    }
                    form.part(name.clone(), file)
                }
            };
        }
        Ok(form)
    }
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => Some("text/html"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "pdf" => Some("application/pdf"),
        "csv" => Some("text/csv"),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

/// Owned description of one API call; replayable after a token refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub body: Body,
    authenticated: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: QueryParams::new(), body: Body::Empty, authenticated: true }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = Body::Multipart(body);
        self
    }

    /// Send without a bearer token and without the refresh path (login).
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Cheaply cloneable handle; clones share the token store and refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    refresh_lock: Mutex<()>,
    on_expired: OnceLock<ExpiredHook>,
}

impl ApiClient {
    /// Build a client from config and an injected token store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: crate::config::normalize_base_url(&config.base_url),
                store,
                refresh_lock: Mutex::new(()),
                on_expired: OnceLock::new(),
            }),
        })
    }

    /// Register a callback fired once each time the session is discarded
    /// after a failed refresh. See [`Self::set_session_expired_hook`].
    #[must_use]
    pub fn with_session_expired_hook(self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        if !self.set_session_expired_hook(hook) {
            warn!("session-expired hook already registered; keeping the first");
        }
        self
    }

    /// Register the session-expired callback for this client and every clone
    /// of it. Only the first registration takes effect; returns `false` if a
    /// hook was already set.
    pub fn set_session_expired_hook(&self, hook: impl Fn() + Send + Sync + 'static) -> bool {
        self.inner.on_expired.set(Arc::new(hook)).is_ok()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Send a request and decode the JSON response as `T`.
    ///
    /// # Errors
    ///
    /// Returns the transport error, the non-success status with its raw
    /// body, [`ApiError::SessionExpired`], or a decode error.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose response body is irrelevant (`204`, deletes).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`].
    pub async fn send_empty(&self, request: &ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    /// Send a request and return the raw JSON body (`Null` when empty).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send_json`] minus decoding.
    pub async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let token = if request.authenticated { self.inner.store.access_token() } else { None };
        let response = self.dispatch(request, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || token.is_none() {
            return read_body(request, response).await;
        }

        debug!(method = %request.method, path = %request.path, "access token rejected; refreshing");
        let fresh = self.refresh_after(token.as_deref()).await?;
        let replay = self.dispatch(request, Some(&fresh)).await?;
        read_body(request, replay).await
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<reqwest::Response, ApiError> {
        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(request.query.pairs());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            // reqwest sets the multipart content type with its boundary.
            Body::Multipart(form) => builder.multipart(form.to_form()?),
        };
        let response = builder.send().await?;
        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status().as_u16(),
            "api request"
        );
        Ok(response)
    }

    /// Refresh the access token unless another task already replaced `stale`.
    async fn refresh_after(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.inner.refresh_lock.lock().await;

        let Some(session) = self.inner.store.get() else {
            self.expire();
            return Err(ApiError::SessionExpired);
        };
        if stale != Some(session.access.as_str()) {
            return Ok(session.access);
        }

        match self.exchange_refresh(&session.refresh).await {
            Ok(refreshed) => {
                let session = session.refreshed(refreshed.access, refreshed.refresh);
                let access = session.access.clone();
                self.inner.store.set(session)?;
                info!("access token refreshed");
                Ok(access)
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed; clearing session");
                self.expire();
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn exchange_refresh(&self, refresh: &str) -> Result<RefreshResponse, ApiError> {
        let response = self
            .inner
            .http
            .post(self.url(TOKEN_REFRESH_PATH))
            .json(&RefreshRequest { refresh })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body: parse_body(&body) });
        }
        response
            .json::<RefreshResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn expire(&self) {
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "failed clearing session store");
        }
        if let Some(hook) = self.inner.on_expired.get() {
            hook();
        }
    }
}

async fn read_body(request: &ApiRequest, response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()));
    }
    debug!(method = %request.method, path = %request.path, status = status.as_u16(), "api request failed");
    Err(ApiError::Status { status: status.as_u16(), body: parse_body(&text) })
}

/// Non-success bodies are kept as JSON when they parse, else as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
