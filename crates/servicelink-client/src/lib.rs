//! HTTP client facade for the ServiceLink REST API.
//!
//! [`ApiClient`] owns the connection pool, configuration and session store,
//! and hands out one borrowed handle per backend domain:
//!
//! ```no_run
//! use std::sync::Arc;
//! use servicelink_client::{ApiClient, ClientConfig, MemorySessionStore};
//!
//! # async fn run() -> servicelink_client::ApiResult<()> {
//! let client = ApiClient::new(ClientConfig::default(), Arc::new(MemorySessionStore::default()))?;
//! let categories = client.services().categories_with_services().await;
//! if !categories.is_success() {
//!     eprintln!("{}", categories.message().unwrap_or("request failed"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Legacy endpoints return the parsed body and propagate transport errors.
//! The rest never fail: a body the backend sent is returned as parsed, and
//! anything else becomes a `{ success: false, message, data: null }` failure.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod file_url;
pub mod metrics;
pub mod query;
pub mod session;
pub mod upload;

pub use api::{AuthApi, ChatApi, ClientsApi, NotificationsApi, ProvidersApi, ServicesApi, UsersApi};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use file_url::resolve_file_url;
pub use query::QueryParams;
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
pub use upload::{FileUpload, MultipartForm};

pub use servicelink_models::ApiResponse;
