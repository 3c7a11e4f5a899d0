//! Navigation guard.
//!
//! The guard only looks at the locally persisted session. It never checks
//! whether the token is still accepted by the backend; an expired or forged
//! token passes here and is rejected on the next API call instead.

use serde::Serialize;
use servicelink_models::Session;
use tracing::debug;

use crate::route::{RouteDescriptor, RouteMatch};
use crate::table::RouteTable;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where users with the wrong role are sent.
pub const HOME_PATH: &str = "/";

/// Outcome of guarding a single route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
    RedirectToHome,
}

impl GuardDecision {
    /// Redirect target, if any.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Proceed => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToHome => Some(HOME_PATH),
        }
    }
}

/// Decide whether `session` may enter `route`.
///
/// Role restrictions only apply to routes that also require auth.
pub fn check(route: &RouteDescriptor, session: &Session) -> GuardDecision {
    let meta = &route.meta;

    if meta.requires_auth && !session.is_authenticated() {
        GuardDecision::RedirectToLogin
    } else if meta.requires_auth && !meta.allows_role(session.role()) {
        GuardDecision::RedirectToHome
    } else {
        GuardDecision::Proceed
    }
}

/// Result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Navigation<'a> {
    Render(RouteMatch<'a>),
    Redirect {
        to: &'static str,
        decision: GuardDecision,
    },
    NotFound,
}

/// Resolves paths against a route table and applies the guard.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    table: RouteTable,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve `path` and guard it for `session`.
    pub fn navigate(&self, path: &str, session: &Session) -> Navigation<'_> {
        let Some(matched) = self.table.resolve(path) else {
            debug!(path = %path, "No route matches path");
            return Navigation::NotFound;
        };

        let decision = check(matched.route, session);
        debug!(
            path = %path,
            route = %matched.route.name,
            decision = ?decision,
            "Navigation guard decision"
        );

        match decision.redirect_path() {
            Some(to) => Navigation::Redirect { to, decision },
            None => Navigation::Render(matched),
        }
    }
}
