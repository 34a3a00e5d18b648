use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::notice::{Notice, Notifier, API_ERROR_KEY};
use crate::FilePart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(String),
    /// `application/x-www-form-urlencoded`, already encoded.
    Form(String),
    /// A single file field. The transport picks the boundary.
    Multipart { field: String, file: FilePart },
}

/// A backend call, independent of how it goes over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path plus query, e.g. `/post/?title=cats`.
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn json<B: Serialize>(self, body: &B) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let mut req = self.header("Content-Type", "application/json");
        req.body = RequestBody::Json(encoded);
        Ok(req)
    }

    pub fn form(self, fields: &[(&str, &str)]) -> Self {
        let encoded = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let mut req = self.header("Content-Type", "application/x-www-form-urlencoded");
        req.body = RequestBody::Form(encoded);
        req
    }

    pub fn multipart(mut self, field: &str, file: FilePart) -> Self {
        self.body = RequestBody::Multipart {
            field: field.to_string(),
            file,
        };
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            status_text: "No Content".to_string(),
            content_type: None,
            body: String::new(),
        }
    }
}

/// Sends requests over some wire. Futures are not `Send`: in the browser
/// everything runs on the one UI thread.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn execute(&self, url: &str, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Where the bearer token lives between page loads.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryTokens(RwLock<Option<String>>);

impl MemoryTokens {
    pub fn with_token(token: &str) -> Self {
        Self(RwLock::new(Some(token.to_string())))
    }
}

impl TokenStore for MemoryTokens {
    fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, token: &str) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Interpret a response: 204 or a non-JSON body is `None`; non-2xx is an
/// error carrying the best message available.
pub fn classify(raw: RawResponse) -> Result<Option<Value>, ApiError> {
    let is_json = raw.status != 204
        && raw
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"));

    let has_body = is_json && !raw.body.trim().is_empty();

    if !(200..300).contains(&raw.status) {
        // An unparsable error body still fails with its status.
        let body = has_body
            .then(|| serde_json::from_str::<Value>(&raw.body).ok())
            .flatten();
        return Err(ApiError::Status {
            status: raw.status,
            message: error_message(body.as_ref(), &raw.status_text),
        });
    }

    if !has_body {
        return Ok(None);
    }
    serde_json::from_str::<Value>(&raw.body)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn error_message(body: Option<&Value>, status_text: &str) -> String {
    let detail = body.and_then(|b| b.get("detail"));
    match detail {
        Some(Value::String(s)) if !s.is_empty() => return s.clone(),
        // Validation errors come back as a list of `{ loc, msg, type }`.
        Some(Value::Array(items)) => {
            if let Some(msg) = items.iter().find_map(|i| i.get("msg").and_then(Value::as_str)) {
                return msg.to_string();
            }
        }
        _ => {}
    }
    if !status_text.is_empty() {
        return status_text.to_string();
    }
    GENERIC_ERROR_MESSAGE.to_string()
}

/// Authenticated access to the backend. Every failure is logged and
/// reported to the notifier under [`API_ERROR_KEY`], then returned.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            tokens,
            notifier,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.tokens.get().is_some()
    }

    pub fn resolve_url(&self, relative: &str) -> String {
        self.config.resolve_url(relative)
    }

    pub async fn send(&self, mut request: ApiRequest) -> Result<Option<Value>, ApiError> {
        if let Some(token) = self.tokens.get() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let url = self.config.endpoint_url(&request.endpoint);
        tracing::debug!(method = %request.method, endpoint = %request.endpoint, "api request");

        let outcome = match self.transport.execute(&url, &request).await {
            Ok(raw) => classify(raw),
            Err(e) => Err(e),
        };
        if let Err(err) = &outcome {
            self.report(&request, err);
        }
        outcome
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let summary = ApiRequest::new(request.method, request.endpoint.clone());
        let value = match self.send(request).await? {
            Some(v) => v,
            None => {
                self.report(&summary, &ApiError::Empty);
                return Err(ApiError::Empty);
            }
        };
        serde_json::from_value(value).map_err(|e| {
            let err = ApiError::Decode(e.to_string());
            self.report(&summary, &err);
            err
        })
    }

    /// Like [`send_json`](Self::send_json) but a null or empty body is `None`.
    pub async fn send_optional<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>, ApiError> {
        let summary = ApiRequest::new(request.method, request.endpoint.clone());
        match self.send(request).await? {
            None | Some(Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v).map(Some).map_err(|e| {
                let err = ApiError::Decode(e.to_string());
                self.report(&summary, &err);
                err
            }),
        }
    }

    /// For calls whose response body is irrelevant.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    fn report(&self, request: &ApiRequest, err: &ApiError) {
        tracing::warn!(
            method = %request.method,
            endpoint = %request.endpoint,
            status = ?err.status(),
            "api request failed: {}",
            err
        );
        self.notifier.notify(Notice::error(API_ERROR_KEY, err.to_string()));
    }
}
