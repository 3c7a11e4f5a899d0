//! Client-side routing for ServiceLink.
//!
//! This crate provides:
//! - The static route table with per-route auth/role metadata
//! - Path matching with `:param` segments
//! - The navigation guard deciding proceed / redirect for a session

pub mod error;
pub mod guard;
pub mod route;
pub mod table;

pub use error::{RouteError, RouteResult};
pub use guard::{check, GuardDecision, Navigation, Navigator, HOME_PATH, LOGIN_PATH};
pub use route::{Page, RouteDescriptor, RouteMatch, RouteMeta};
pub use table::RouteTable;
