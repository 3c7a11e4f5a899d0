//! Route descriptors and path matching.

use std::collections::BTreeMap;

use serde::Serialize;
use servicelink_models::Role;

use crate::error::{RouteError, RouteResult};

/// View rendered by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    Landing,
    Login,
    RegisterOption,
    RegisterClient,
    RegisterProvider,
    EmailVerification,
    ForgotPassword,
    ResetPassword,
    ProviderProfile,
    ProviderServices,
    ProviderBookings,
    ProviderBookingDetails,
    ClientProfile,
    ClientServices,
    ClientBookings,
    ClientBookingDetails,
    Notifications,
    Messages,
}

/// Access metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// Navigation needs a session token
    pub requires_auth: bool,
    /// Roles allowed in; `None` means any authenticated user.
    /// An empty list admits nobody.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

impl RouteMeta {
    /// Whether `role` passes this route's role restriction.
    pub fn allows_role(&self, role: Option<Role>) -> bool {
        match &self.roles {
            None => true,
            Some(roles) => role.is_some_and(|r| roles.contains(&r)),
        }
    }
}

/// A static route: path pattern, name, page and access metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// Pattern such as `/client/booking/:bookingId`
    pub path: String,
    pub name: String,
    pub page: Page,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    /// Public route with no access restriction.
    pub fn new(path: impl Into<String>, name: impl Into<String>, page: Page) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            page,
            meta: RouteMeta::default(),
        }
    }

    /// Require a session token.
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    /// Restrict to the given roles.
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.meta.roles = Some(roles.into_iter().collect());
        self
    }

    pub(crate) fn validate(&self) -> RouteResult<()> {
        if !self.path.starts_with('/') {
            return Err(RouteError::RelativePath(self.path.clone()));
        }
        if segments(&self.path).any(|s| s == ":") {
            return Err(RouteError::EmptyParam(self.path.clone()));
        }
        Ok(())
    }

    /// Match a concrete path, returning the bound `:param` values.
    ///
    /// Query string, fragment and trailing slash are ignored; static
    /// segments compare case-insensitively.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = segments(&self.path).collect();
        let actual: Vec<&str> = segments(strip_suffixes(path)).collect();

        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, got) in pattern.iter().zip(actual.iter()) {
            if let Some(name) = expected.strip_prefix(':') {
                let value = urlencoding::decode(got)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| (*got).to_string());
                params.insert(name.to_string(), value);
            } else if !expected.eq_ignore_ascii_case(got) {
                return None;
            }
        }

        Some(params)
    }
}

/// A resolved route with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDescriptor,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_route() -> RouteDescriptor {
        RouteDescriptor::new("/client/booking/:bookingId", "ClientBookingDetails", Page::ClientBookingDetails)
            .requires_auth()
            .roles([Role::Client])
    }

    #[test]
    fn test_static_match() {
        let route = RouteDescriptor::new("/login", "Login", Page::Login);
        assert!(route.matches("/login").is_some());
        assert!(route.matches("/login/").is_some());
        assert!(route.matches("/LOGIN?next=/messages").is_some());
        assert!(route.matches("/login/extra").is_none());
        assert!(route.matches("/").is_none());
    }

    #[test]
    fn test_root_match() {
        let route = RouteDescriptor::new("/", "Home", Page::Landing);
        assert!(route.matches("/").is_some());
        assert!(route.matches("").is_some());
        assert!(route.matches("/#top").is_some());
        assert!(route.matches("/login").is_none());
    }

    #[test]
    fn test_param_binding() {
        let route = booking_route();
        let params = route.matches("/client/booking/b%2042").unwrap();
        assert_eq!(params.get("bookingId").map(String::as_str), Some("b 42"));
        assert!(route.matches("/client/booking").is_none());
    }

    #[test]
    fn test_meta_allows_role() {
        let meta = booking_route().meta;
        assert!(meta.allows_role(Some(Role::Client)));
        assert!(!meta.allows_role(Some(Role::Provider)));
        assert!(!meta.allows_role(None));
        assert!(RouteMeta::default().allows_role(None));

        let nobody = RouteMeta {
            requires_auth: true,
            roles: Some(vec![]),
        };
        assert!(!nobody.allows_role(Some(Role::Client)));
    }

    #[test]
    fn test_validate() {
        assert!(booking_route().validate().is_ok());
        assert_eq!(
            RouteDescriptor::new("login", "Login", Page::Login).validate(),
            Err(RouteError::RelativePath("login".into()))
        );
        assert_eq!(
            RouteDescriptor::new("/booking/:", "B", Page::ClientBookings).validate(),
            Err(RouteError::EmptyParam("/booking/:".into()))
        );
    }
}
