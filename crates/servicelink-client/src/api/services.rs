//! Public service catalogue.

use serde_json::Value;
use servicelink_models::{rewrite_category_assets, ApiResponse, Pagination, ServiceFilters};

use crate::client::{segment, ApiClient};
use crate::error::ApiResult;
use crate::query::QueryParams;

pub struct ServicesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ServicesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Filtered, paginated listing.
    pub async fn list(&self, filters: &ServiceFilters, pagination: &Pagination) -> ApiResult<Value> {
        self.client
            .get("list_services", "/services")
            .query(QueryParams::for_services(filters, pagination))
            .raw()
            .await
    }

    pub async fn details(&self, service_id: &str) -> ApiResponse {
        self.client
            .get("service_details", format!("/services/{}", segment(service_id)))
            .wrapped()
            .await
    }

    /// Categories with their services, asset paths resolved against the
    /// file server.
    ///
    /// Paths are only rewritten when the body reports `success: true` with
    /// a list under `data`; any other body is returned as it came.
    pub async fn categories_with_services(&self) -> ApiResponse {
        let mut response = self
            .client
            .get("categories_with_services", "/categories-with-services")
            .wrapped()
            .await;

        if let Some(body) = response.body_mut() {
            if body.get("success").and_then(Value::as_bool) == Some(true) {
                if let Some(data) = body.get_mut("data").filter(|d| d.is_array()) {
                    rewrite_category_assets(data, &|path| self.client.file_url(path));
                }
            }
        }
        response
    }
}
