//! Shared data models for the ServiceLink client.
//!
//! This crate provides Serde-serializable types for:
//! - Normalized endpoint responses and the `{ success, message, data }` envelope
//! - The persisted session and user roles
//! - Catalog asset path rewriting
//! - Request bodies and query filters used by the API facade

pub mod catalog;
pub mod envelope;
pub mod requests;
pub mod response;
pub mod session;

// Re-export common types
pub use catalog::{rewrite_category_assets, Pagination, ProviderQuery, ServiceFilters};
pub use envelope::ApiEnvelope;
pub use response::ApiResponse;
pub use requests::{
    ChangePasswordRequest, ChatMessageRequest, DeclineBookingRequest, EmailRequest, LoginRequest,
    ProviderProfileUpdate, ResetPasswordRequest, ReviewForm, VerifyEmailRequest,
};
pub use session::{Role, RoleParseError, Session, TOKEN_KEY, USER_ROLE_KEY};
