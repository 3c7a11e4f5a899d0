use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiResult;

pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// The account owning `token`.
    pub async fn me(&self, token: &str) -> ApiResult<Value> {
        self.client.get("me", "/me").with_token(token).raw().await
    }
}
