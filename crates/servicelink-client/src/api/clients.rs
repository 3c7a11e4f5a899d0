//! Client (customer) endpoints.

use serde::Serialize;
use serde_json::Value;
use servicelink_models::{ApiResponse, ReviewForm};

use crate::client::{segment, ApiClient};
use crate::error::ApiResult;
use crate::query::QueryParams;
use crate::upload::{FileUpload, MultipartForm};

pub struct ClientsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ClientsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.client
            .post("register_client", "/client/register")
            .json(body)
            .wrapped()
            .await
    }

    // =========================================================================
    // Profile & Addresses
    // =========================================================================

    pub async fn profile(&self) -> ApiResponse {
        self.client
            .get("client_profile", "/client/profile")
            .with_session()
            .wrapped()
            .await
    }

    pub async fn update_profile<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.client
            .put("update_client_profile", "/client/profile")
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    pub async fn add_address<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.client
            .post("add_address", "/client/address")
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    pub async fn update_address<B: Serialize + ?Sized>(
        &self,
        address_id: &str,
        body: &B,
    ) -> ApiResponse {
        self.client
            .patch("update_address", address_path(address_id))
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    pub async fn delete_address(&self, address_id: &str) -> ApiResponse {
        self.client
            .delete("delete_address", address_path(address_id))
            .with_session()
            .wrapped()
            .await
    }

    // =========================================================================
    // Bookings & Payment
    // =========================================================================

    pub async fn book_service<B: Serialize + ?Sized>(&self, body: &B) -> ApiResponse {
        self.client
            .post("book_service", "/client/booking")
            .with_session()
            .json(body)
            .wrapped()
            .await
    }

    pub async fn bookings(&self, status: Option<&str>) -> ApiResponse {
        let mut query = QueryParams::new();
        query.push("status", status);
        self.client
            .get("client_bookings", "/client/booking")
            .query(query)
            .with_session()
            .wrapped()
            .await
    }

    pub async fn booking(&self, booking_id: &str) -> ApiResponse {
        self.client
            .get("client_booking", booking_path(booking_id, ""))
            .with_session()
            .wrapped()
            .await
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> ApiResponse {
        self.client
            .post("cancel_booking", booking_path(booking_id, "/cancel"))
            .with_session()
            .wrapped()
            .await
    }

    /// Submit payment, optionally with a proof-of-payment file.
    pub async fn process_payment(
        &self,
        booking_id: &str,
        payment_proof: Option<FileUpload>,
    ) -> ApiResponse {
        let form = match payment_proof {
            Some(file) => MultipartForm::new().file("paymentProof", file),
            None => MultipartForm::new(),
        };
        self.client
            .post("process_payment", booking_path(booking_id, "/payment"))
            .with_session()
            .multipart(form)
            .wrapped()
            .await
    }

    pub async fn mark_payment_completed(&self, booking_id: &str, token: &str) -> ApiResult<Value> {
        self.client
            .post("mark_payment_completed", booking_path(booking_id, "/payment/complete"))
            .with_token(token)
            .raw()
            .await
    }

    // =========================================================================
    // Contracts
    // =========================================================================

    pub async fn contracts(&self, token: &str) -> ApiResult<Value> {
        self.client
            .get("client_contracts", "/client/contracts")
            .with_token(token)
            .raw()
            .await
    }

    pub async fn contract(&self, contract_id: &str, token: &str) -> ApiResult<Value> {
        self.client
            .get("client_contract", contract_path(contract_id, ""))
            .with_token(token)
            .raw()
            .await
    }

    pub async fn sign_contract(&self, contract_id: &str, token: &str) -> ApiResult<Value> {
        self.client
            .post("sign_client_contract", contract_path(contract_id, "/sign"))
            .with_token(token)
            .raw()
            .await
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Review the provider of a booking, with optional photos.
    ///
    /// An empty comment is left out of the form.
    pub async fn submit_review(
        &self,
        booking_id: &str,
        review: &ReviewForm,
        images: Vec<FileUpload>,
    ) -> ApiResponse {
        self.client
            .post("submit_review", format!("/client/bookings/{}/reviews", segment(booking_id)))
            .with_session()
            .multipart(review_form(booking_id, review, images))
            .wrapped()
            .await
    }

    pub async fn reviews_received(&self) -> ApiResponse {
        self.client
            .get("client_reviews_received", "/client/reviews/received")
            .with_session()
            .wrapped()
            .await
    }

    pub async fn reviews_given(&self) -> ApiResponse {
        self.client
            .get("client_reviews_given", "/client/reviews/given")
            .with_session()
            .wrapped()
            .await
    }
}

fn review_form(booking_id: &str, review: &ReviewForm, images: Vec<FileUpload>) -> MultipartForm {
    let mut form = MultipartForm::new().text("rating", review.rating.to_string());
    if let Some(comment) = review.comment.as_deref().filter(|c| !c.is_empty()) {
        form = form.text("comment", comment);
    }
    form.text("bookingId", booking_id).files("images", images)
}

fn address_path(address_id: &str) -> String {
    format!("/client/address/{}", segment(address_id))
}

fn booking_path(booking_id: &str, suffix: &str) -> String {
    format!("/client/booking/{}{}", segment(booking_id), suffix)
}

fn contract_path(contract_id: &str, suffix: &str) -> String {
    format!("/client/contracts/{}{}", segment(contract_id), suffix)
}
