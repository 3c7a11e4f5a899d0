//! REST client core.
//!
//! Every endpoint goes through [`Call`], which builds the request, injects
//! headers, wraps the exchange in a tracing span and records metrics. The
//! three response conventions the backend uses are the terminal methods
//! [`Call::raw`], [`Call::wrapped`] and [`Call::lenient`]. Bodies that
//! arrive are handed back as parsed, whatever their shape.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use servicelink_models::{ApiResponse, Session};
use tracing::{debug, error, info_span, warn, Instrument};
use url::Url;

use crate::api::{
    AuthApi, ChatApi, ClientsApi, NotificationsApi, ProvidersApi, ServicesApi, UsersApi,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, GENERIC_FAILURE};
use crate::file_url::resolve_file_url;
use crate::metrics::record_request;
use crate::query::QueryParams;
use crate::session::SessionStore;
use crate::upload::MultipartForm;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the ServiceLink REST API.
///
/// Cheap to clone; clones share the connection pool and the session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> ApiResult<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Network)?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    /// Create from environment variables.
    pub fn from_env(session: Arc<dyn SessionStore>) -> ApiResult<Self> {
        Self::new(ClientConfig::from_env(), session)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Current session, read on the calling thread. A store that cannot be
    /// read counts as signed out.
    pub fn session(&self) -> Session {
        self.session.load().unwrap_or_else(|e| {
            warn!("Failed to read session, continuing without token: {}", e);
            Session::default()
        })
    }

    /// Current session, read on the blocking pool so file-backed stores do
    /// not stall the runtime.
    pub async fn load_session(&self) -> Session {
        let store = Arc::clone(&self.session);
        match tokio::task::spawn_blocking(move || store.load()).await {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => {
                warn!("Failed to read session, continuing without token: {}", e);
                Session::default()
            }
            Err(e) => {
                warn!("Session read task failed, continuing without token: {}", e);
                Session::default()
            }
        }
    }

    /// Headers for an authenticated JSON call.
    ///
    /// Without a stored token the `Authorization` header is left out and the
    /// call proceeds anyway.
    pub fn auth_headers(&self) -> HeaderMap {
        json_auth_headers(&self.session())
    }

    /// Absolute URL for an asset path returned by the backend.
    pub fn file_url(&self, path: Option<&str>) -> String {
        resolve_file_url(&self.config.file_server_url, path)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn services(&self) -> ServicesApi<'_> {
        ServicesApi::new(self)
    }

    pub fn providers(&self) -> ProvidersApi<'_> {
        ProvidersApi::new(self)
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(self)
    }

    pub(crate) fn call(
        &self,
        operation: &'static str,
        method: Method,
        path: impl Into<String>,
    ) -> Call<'_> {
        Call {
            client: self,
            operation,
            method,
            path: path.into(),
            query: QueryParams::new(),
            auth: Auth::None,
            body: Body::Empty,
            error: None,
        }
    }

    pub(crate) fn get(&self, operation: &'static str, path: impl Into<String>) -> Call<'_> {
        self.call(operation, Method::GET, path)
    }

    pub(crate) fn post(&self, operation: &'static str, path: impl Into<String>) -> Call<'_> {
        self.call(operation, Method::POST, path)
    }

    pub(crate) fn put(&self, operation: &'static str, path: impl Into<String>) -> Call<'_> {
        self.call(operation, Method::PUT, path)
    }

    pub(crate) fn patch(&self, operation: &'static str, path: impl Into<String>) -> Call<'_> {
        self.call(operation, Method::PATCH, path)
    }

    pub(crate) fn delete(&self, operation: &'static str, path: impl Into<String>) -> Call<'_> {
        self.call(operation, Method::DELETE, path)
    }
}

fn json_auth_headers(session: &Session) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    match session.token().and_then(bearer) {
        Some(value) => {
            headers.insert(AUTHORIZATION, value);
        }
        None => warn!("No authentication token found in session"),
    }
    headers
}

fn bearer(token: &str) -> Option<HeaderValue> {
    match HeaderValue::from_str(&format!("Bearer {}", token)) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Token is not a valid header value: {}", e);
            None
        }
    }
}

/// Percent-encode a value used as a path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[derive(Debug, Clone, Copy)]
enum Auth<'a> {
    None,
    Session,
    Token(&'a str),
}

#[derive(Debug)]
enum Body {
    Empty,
    Json(Vec<u8>),
    Multipart(MultipartForm),
}

/// A single request being assembled.
#[must_use]
pub(crate) struct Call<'a> {
    client: &'a ApiClient,
    operation: &'static str,
    method: Method,
    path: String,
    query: QueryParams,
    auth: Auth<'a>,
    body: Body,
    error: Option<ApiError>,
}

impl<'a> Call<'a> {
    pub(crate) fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Bearer token from the session store.
    pub(crate) fn with_session(mut self) -> Self {
        self.auth = Auth::Session;
        self
    }

    /// Bearer token supplied by the caller.
    pub(crate) fn with_token(mut self, token: &'a str) -> Self {
        self.auth = Auth::Token(token);
        self
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.body = Body::Json(bytes),
            Err(e) => self.error = Some(e.into()),
        }
        self
    }

    pub(crate) fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    fn url(&self) -> ApiResult<Url> {
        let base = self.client.config.api_base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, self.path))?;
        self.query.apply_to(&mut url);
        Ok(url)
    }

    /// Request headers. `session` is only consulted for session auth.
    fn headers(&self, session: &Session) -> HeaderMap {
        let multipart = matches!(self.body, Body::Multipart(_));

        match (self.auth, multipart) {
            (Auth::Session, false) => json_auth_headers(session),
            (auth, _) => {
                let mut headers = HeaderMap::new();
                if matches!(self.body, Body::Json(_)) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                }
                let token = match auth {
                    Auth::None => None,
                    Auth::Token(token) => Some(token.to_string()),
                    Auth::Session => session.token().map(str::to_string),
                };
                match token.as_deref() {
                    Some(token) => {
                        if let Some(value) = bearer(token) {
                            headers.insert(AUTHORIZATION, value);
                        }
                    }
                    None if matches!(auth, Auth::Session) => {
                        warn!("No authentication token found in session")
                    }
                    None => {}
                }
                headers
            }
        }
    }

    async fn exchange(mut self) -> ApiResult<(StatusCode, Value)> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let url = self.url()?;
        let session = match self.auth {
            Auth::Session => self.client.load_session().await,
            _ => Session::default(),
        };
        let headers = self.headers(&session);
        debug!("{} {}", self.method, url);

        let mut request = self.client.http.request(self.method, url).headers(headers);
        request = match self.body {
            Body::Empty => request,
            Body::Json(bytes) => request.body(bytes),
            Body::Multipart(form) => request.multipart(form.into_reqwest()?),
        };

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok((status, body))
    }

    /// Send and parse the body as JSON, tracing and timing the exchange.
    async fn send(self) -> ApiResult<(StatusCode, Value)> {
        let operation = self.operation;
        let span = info_span!(
            "api_request",
            operation = %operation,
            method = %self.method,
            path = %self.path
        );

        let start = Instant::now();
        let result = self.exchange().instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok((status, _)) => status.as_u16(),
            Err(e) => e.http_status().unwrap_or(0),
        };
        record_request(operation, status, latency_ms);

        result
    }

    /// Body as is, whatever the status. Transport and parse errors propagate.
    pub(crate) async fn raw(self) -> ApiResult<Value> {
        self.send().await.map(|(_, body)| body)
    }

    /// Status-checked body. A 2xx body is returned untouched; every failure
    /// becomes `{ success: false, message, data: null }`.
    pub(crate) async fn wrapped(self) -> ApiResponse {
        let operation = self.operation;
        match self.checked().await {
            Ok(response) => response,
            Err(e) => {
                error!(operation, "API error: {}", e);
                e.into_response()
            }
        }
    }

    async fn checked(self) -> ApiResult<ApiResponse> {
        let (status, body) = self.send().await?;
        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_FAILURE);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: message.to_string(),
            });
        }
        Ok(ApiResponse::from_body(status.as_u16(), body))
    }

    /// Body as is whatever the status. Transport and parse errors become a
    /// failure carrying `fallback_message` and `fallback_data`.
    pub(crate) async fn lenient(
        self,
        fallback_message: &str,
        fallback_data: Option<Value>,
    ) -> ApiResponse {
        let operation = self.operation;
        match self.send().await {
            Ok((status, body)) => ApiResponse::from_body(status.as_u16(), body),
            Err(e) => {
                error!(operation, "API error: {}", e);
                let message = e.message_or(fallback_message);
                match fallback_data {
                    Some(data) => ApiResponse::failure_with_data(message, data),
                    None => ApiResponse::failure(message),
                }
            }
        }
    }
}
