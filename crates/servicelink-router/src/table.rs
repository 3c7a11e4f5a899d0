//! The application route table.

use std::collections::HashSet;

use servicelink_models::Role;

use crate::error::{RouteError, RouteResult};
use crate::route::{Page, RouteDescriptor, RouteMatch};

/// Ordered set of routes. The first matching route wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Build a table, rejecting malformed patterns and duplicate names/paths.
    pub fn new(routes: Vec<RouteDescriptor>) -> RouteResult<Self> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();

        for route in &routes {
            route.validate()?;
            if !names.insert(route.name.as_str()) {
                return Err(RouteError::DuplicateName(route.name.clone()));
            }
            if !paths.insert(route.path.as_str()) {
                return Err(RouteError::DuplicatePath(route.path.clone()));
            }
        }

        Ok(Self { routes })
    }

    /// The ServiceLink route table.
    pub fn builtin() -> Self {
        Self {
            routes: builtin_routes(),
        }
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Find the route for a concrete path.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .matches(path)
                .map(|params| RouteMatch { route, params })
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_routes() -> Vec<RouteDescriptor> {
    vec![
        // Public
        RouteDescriptor::new("/", "Home", Page::Landing),
        RouteDescriptor::new("/login", "Login", Page::Login),
        RouteDescriptor::new("/register", "RegisterOption", Page::RegisterOption),
        RouteDescriptor::new("/register/client", "RegisterClient", Page::RegisterClient),
        RouteDescriptor::new("/register/provider", "RegisterProvider", Page::RegisterProvider),
        RouteDescriptor::new("/verify-email", "EmailVerification", Page::EmailVerification),
        RouteDescriptor::new("/forgot-password", "ForgotPassword", Page::ForgotPassword),
        RouteDescriptor::new("/reset-password", "ResetPassword", Page::ResetPassword),
        // Provider area
        RouteDescriptor::new("/provider/profile", "ProviderProfile", Page::ProviderProfile)
            .requires_auth()
            .roles([Role::Provider]),
        RouteDescriptor::new("/provider/services", "ProviderServices", Page::ProviderServices)
            .requires_auth()
            .roles([Role::Provider]),
        RouteDescriptor::new("/provider/bookings", "ProviderBookings", Page::ProviderBookings)
            .requires_auth()
            .roles([Role::Provider]),
        RouteDescriptor::new(
            "/provider/booking/:bookingId",
            "ProviderBookingDetails",
            Page::ProviderBookingDetails,
        )
        .requires_auth()
        .roles([Role::Provider]),
        // Client area
        RouteDescriptor::new("/client/profile", "ClientProfile", Page::ClientProfile)
            .requires_auth()
            .roles([Role::Client]),
        RouteDescriptor::new("/client/services", "ClientServices", Page::ClientServices)
            .requires_auth()
            .roles([Role::Client]),
        RouteDescriptor::new("/client/bookings", "ClientBookings", Page::ClientBookings)
            .requires_auth()
            .roles([Role::Client]),
        RouteDescriptor::new(
            "/client/booking/:bookingId",
            "ClientBookingDetails",
            Page::ClientBookingDetails,
        )
        .requires_auth()
        .roles([Role::Client]),
        // Shared, any logged-in user
        RouteDescriptor::new("/notifications", "Notifications", Page::Notifications).requires_auth(),
        RouteDescriptor::new("/messages", "Messages", Page::Messages).requires_auth(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = RouteTable::builtin();
        assert_eq!(table.routes().len(), 18);
        assert!(RouteTable::new(table.routes().to_vec()).is_ok());
    }

    #[test]
    fn test_resolve_with_params() {
        let table = RouteTable::builtin();
        let m = table.resolve("/provider/booking/42").unwrap();
        assert_eq!(m.route.name, "ProviderBookingDetails");
        assert_eq!(m.param("bookingId"), Some("42"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(RouteTable::builtin().resolve("/admin").is_none());
    }

    #[test]
    fn test_by_name() {
        let table = RouteTable::builtin();
        assert_eq!(table.by_name("Messages").unwrap().path, "/messages");
        assert!(table.by_name("Nope").is_none());
    }

    #[test]
    fn test_rejects_duplicates() {
        let dup_name = vec![
            RouteDescriptor::new("/a", "Same", Page::Landing),
            RouteDescriptor::new("/b", "Same", Page::Login),
        ];
        assert_eq!(
            RouteTable::new(dup_name),
            Err(RouteError::DuplicateName("Same".into()))
        );

        let dup_path = vec![
            RouteDescriptor::new("/a", "A", Page::Landing),
            RouteDescriptor::new("/a", "B", Page::Login),
        ];
        assert_eq!(
            RouteTable::new(dup_path),
            Err(RouteError::DuplicatePath("/a".into()))
        );
    }
}
