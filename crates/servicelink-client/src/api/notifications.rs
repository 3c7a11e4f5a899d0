use servicelink_models::ApiResponse;

use crate::client::{segment, ApiClient};
use crate::query::QueryParams;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

pub struct NotificationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of notifications. `page` and `limit` are always sent and
    /// default to 1 and 10.
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> ApiResponse {
        let mut query = QueryParams::new();
        query
            .push_always("page", page.unwrap_or(DEFAULT_PAGE))
            .push_always("limit", limit.unwrap_or(DEFAULT_LIMIT));
        self.client
            .get("notifications", "/notifications")
            .query(query)
            .with_session()
            .wrapped()
            .await
    }

    pub async fn unread_count(&self) -> ApiResponse {
        self.client
            .get("unread_notifications", "/notifications/count")
            .with_session()
            .wrapped()
            .await
    }

    pub async fn mark_as_read(&self, notification_id: &str) -> ApiResponse {
        self.client
            .post(
                "mark_notification_read",
                format!("/notifications/{}/read", segment(notification_id)),
            )
            .with_session()
            .wrapped()
            .await
    }

    pub async fn mark_all_as_read(&self) -> ApiResponse {
        self.client
            .post("mark_all_notifications_read", "/notifications/read-all")
            .with_session()
            .wrapped()
            .await
    }
}
