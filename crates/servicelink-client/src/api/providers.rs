//! Provider endpoints.
//!
//! Public provider pages live under `/providers/{id}`; the signed-in
//! provider's own resources live under `/provider`. Everything except
//! search is normalized into an [`ApiResponse`].

use serde::Serialize;
use serde_json::Value;
use servicelink_models::{
    ApiResponse, DeclineBookingRequest, Pagination, ProviderProfileUpdate, ProviderQuery,
};
use tracing::error;

use crate::client::{segment, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::query::QueryParams;
use crate::upload::MultipartForm;

/// Failure message for a profile update with nothing to send.
pub const EMPTY_PROFILE_UPDATE: &str = "At least one field is required for update";

pub struct ProvidersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProvidersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // Public Directory
    // =========================================================================

    pub async fn search(&self, query: &ProviderQuery, pagination: &Pagination) -> ApiResult<Value> {
        self.client
            .get("search_providers", "/providers/search")
            .query(QueryParams::for_provider_search(query, pagination))
            .raw()
            .await
    }

    pub async fn details(&self, provider_id: &str) -> ApiResponse {
        self.directory("provider_details", provider_id, "").await
    }

    pub async fn documents(&self, provider_id: &str) -> ApiResponse {
        self.directory("provider_documents", provider_id, "/documents").await
    }

    pub async fn portfolio(&self, provider_id: &str) -> ApiResponse {
        self.directory("provider_portfolio", provider_id, "/portfolio").await
    }

    pub async fn availability_of(&self, provider_id: &str) -> ApiResponse {
        self.directory("provider_availability", provider_id, "/availability").await
    }

    pub async fn reviews_of(&self, provider_id: &str) -> ApiResponse {
        self.directory("provider_reviews", provider_id, "/reviews").await
    }

    async fn directory(
        &self,
        operation: &'static str,
        provider_id: &str,
        suffix: &str,
    ) -> ApiResponse {
        let path = format!("/providers/{}{}", segment(provider_id), suffix);
        self.client.get(operation, path).with_session().wrapped().await
    }

    // =========================================================================
    // Registration & Profile
    // =========================================================================

    /// Register a provider account. The form carries the account fields
    /// and identity documents.
    pub async fn register(&self, form: MultipartForm) -> ApiResponse {
        self.client
            .post("register_provider", "/provider/register")
            .multipart(form)
            .wrapped()
            .await
    }

    pub async fn profile(&self) -> ApiResponse {
        self.client
            .get("provider_profile", "/provider/profile")
            .with_session()
            .wrapped()
            .await
    }

    /// Patch the profile with the fields that are set.
    ///
    /// Nothing is sent when no field is set.
    pub async fn update_profile(&self, update: &ProviderProfileUpdate) -> ApiResponse {
        if update.is_empty() {
            error!("Provider profile update has no fields");
            return ApiError::validation(EMPTY_PROFILE_UPDATE).into_response();
        }

        self.client
            .patch("update_provider_profile", "/provider/profile")
            .with_session()
            .json(update)
            .wrapped()
            .await
    }

    pub async fn verification_status(&self) -> ApiResponse {
        self.client
            .get("verification_status", "/provider/verification-status")
            .with_session()
            .wrapped()
            .await
    }

    pub async fn add_experience<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.create("add_experience", "/provider/experience".to_string(), body).await
    }

    pub async fn add_education<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.create("add_education", "/provider/education".to_string(), body).await
    }

    pub async fn add_skill<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.create("add_skill", "/provider/skill".to_string(), body).await
    }

    pub async fn add_portfolio<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.create("add_portfolio", "/provider/portfolio".to_string(), body).await
    }

    pub async fn add_portfolio_with_files(&self, form: MultipartForm) -> ApiResponse {
        self.upload("add_portfolio_with_files", "/provider/portfolio/upload", form).await
    }

    pub async fn add_document(&self, form: MultipartForm) -> ApiResponse {
        self.upload("add_document", "/provider/document", form).await
    }

    // =========================================================================
    // Services
    // =========================================================================

    pub async fn create_service<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.create("create_service", "/provider/service".to_string(), body).await
    }

    pub async fn services(&self) -> ApiResponse {
        self.fetch("provider_services", "/provider/services".to_string()).await
    }

    pub async fn update_service<B: Serialize + ?Sized>(
        &self,
        service_id: &str,
        body: &B,
    ) -> ApiResponse {
        self.client
            .put("update_service", format!("/provider/services/{}", segment(service_id)))
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    /// Category list for service forms. Public.
    pub async fn categories(&self) -> ApiResponse {
        self.client
            .get("provider_categories", "/provider/categories")
            .wrapped()
            .await
    }

    // =========================================================================
    // Bookings
    // =========================================================================

    pub async fn bookings(&self, status: Option<&str>) -> ApiResponse {
        let mut query = QueryParams::new();
        query.push("status", status);
        self.client
            .get("provider_bookings", "/provider/bookings")
            .query(query)
            .with_session()
            .wrapped()
            .await
    }

    pub async fn booking(&self, booking_id: &str) -> ApiResponse {
        self.fetch("provider_booking", booking_path(booking_id, "")).await
    }

    pub async fn accept_booking(&self, booking_id: &str) -> ApiResponse {
        self.action("accept_booking", booking_path(booking_id, "/accept")).await
    }

    pub async fn decline_booking(&self, booking_id: &str, reason: Option<&str>) -> ApiResponse {
        let body = DeclineBookingRequest {
            reason: reason.map(str::to_string),
        };
        self.create("decline_booking", booking_path(booking_id, "/decline"), &body).await
    }

    pub async fn start_service(&self, booking_id: &str) -> ApiResponse {
        self.action("start_service", booking_path(booking_id, "/start")).await
    }

    pub async fn complete_service(&self, booking_id: &str) -> ApiResponse {
        self.action("complete_service", booking_path(booking_id, "/complete")).await
    }

    pub async fn mark_payment_received(&self, booking_id: &str) -> ApiResponse {
        self.action("mark_payment_received", booking_path(booking_id, "/payment/complete"))
            .await
    }

    // =========================================================================
    // Contracts
    // =========================================================================

    pub async fn contract(&self, contract_id: &str) -> ApiResponse {
        self.fetch("provider_contract", contract_path(contract_id, "")).await
    }

    pub async fn create_contract<B: Serialize + ?Sized>(
        &self,
        booking_id: &str,
        body: &B,
    ) -> ApiResponse {
        self.create("create_contract", booking_path(booking_id, "/contracts"), body).await
    }

    pub async fn update_contract<B: Serialize + ?Sized>(
        &self,
        contract_id: &str,
        body: &B,
    ) -> ApiResponse {
        self.client
            .put("update_contract", contract_path(contract_id, ""))
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    pub async fn sign_contract(&self, contract_id: &str) -> ApiResponse {
        self.action("sign_provider_contract", contract_path(contract_id, "/sign")).await
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Review the client of a completed booking.
    pub async fn create_review<B: Serialize + ?Sized>(
        &self,
        booking_id: &str,
        body: &B,
    ) -> ApiResponse {
        self.create("create_client_review", booking_path(booking_id, "/reviews"), body).await
    }

    pub async fn reviews_received(&self) -> ApiResponse {
        self.fetch("provider_reviews_received", "/provider/reviews/received".to_string())
            .await
    }

    pub async fn reviews_given(&self) -> ApiResponse {
        self.fetch("provider_reviews_given", "/provider/reviews/given".to_string()).await
    }

    // =========================================================================
    // Availability
    // =========================================================================

    pub async fn add_availability<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.create("add_availability", "/provider/availability".to_string(), body).await
    }

    pub async fn availability(&self) -> ApiResponse {
        self.fetch("provider_availability_slots", "/provider/availability".to_string())
            .await
    }

    pub async fn update_availability<B: Serialize + ?Sized>(
        &self,
        slot_id: &str,
        body: &B,
    ) -> ApiResponse {
        self.client
            .put("update_availability", availability_path(slot_id))
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    pub async fn delete_availability(&self, slot_id: &str) -> ApiResponse {
        self.client
            .delete("delete_availability", availability_path(slot_id))
            .with_session()
            .wrapped()
            .await
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    async fn fetch(&self, operation: &'static str, path: String) -> ApiResponse {
        self.client.get(operation, path).with_session().wrapped().await
    }

    async fn action(&self, operation: &'static str, path: String) -> ApiResponse {
        self.client.post(operation, path).with_session().wrapped().await
    }

    async fn create<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: String,
        body: &B,
    ) -> ApiResponse {
        self.client
            .post(operation, path)
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    async fn upload(
        &self,
        operation: &'static str,
        path: &str,
        form: MultipartForm,
    ) -> ApiResponse {
        self.client
            .post(operation, path)
            .with_session()
            .multipart(form)
            .wrapped()
            .await
    }
}

fn booking_path(booking_id: &str, suffix: &str) -> String {
    format!("/provider/bookings/{}{}", segment(booking_id), suffix)
}

fn contract_path(contract_id: &str, suffix: &str) -> String {
    format!("/provider/contracts/{}{}", segment(contract_id), suffix)
}

fn availability_path(slot_id: &str) -> String {
    format!("/provider/availability/{}", segment(slot_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_encode_ids() {
        assert_eq!(booking_path("b 1", "/accept"), "/provider/bookings/b%201/accept");
        assert_eq!(contract_path("c1", "/sign"), "/provider/contracts/c1/sign");
        assert_eq!(availability_path("s/2"), "/provider/availability/s%2F2");
    }
}
