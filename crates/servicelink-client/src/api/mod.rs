//! Endpoint groups.
//!
//! Each handle borrows the [`ApiClient`](crate::ApiClient) and exposes one
//! backend domain. Which response convention an endpoint uses is visible in
//! its return type: `ApiResult<Value>` for raw endpoints, [`ApiResponse`]
//! for normalized ones.
//!
//! [`ApiResponse`]: servicelink_models::ApiResponse

mod auth;
mod chat;
mod clients;
mod notifications;
mod providers;
mod services;
mod uploads;
mod users;

pub use auth::AuthApi;
pub use chat::{ChatApi, LOAD_MESSAGES_FAILURE, SEND_MESSAGE_FAILURE};
pub use clients::ClientsApi;
pub use notifications::{NotificationsApi, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use providers::{ProvidersApi, EMPTY_PROFILE_UPDATE};
pub use services::ServicesApi;
pub use uploads::{AUTH_REQUIRED, PROFILE_PICTURE_REQUIRED};
pub use users::UsersApi;
