//! Conversations. Every call takes the caller's token explicitly.

use serde_json::{json, Value};
use servicelink_models::{ApiResponse, ChatMessageRequest};

use crate::client::{segment, ApiClient};
use crate::error::ApiResult;
use crate::upload::{FileUpload, MultipartForm};

pub const LOAD_MESSAGES_FAILURE: &str = "Failed to load messages";
pub const SEND_MESSAGE_FAILURE: &str = "Failed to send message";

pub struct ChatApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ChatApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn conversations(&self, token: &str) -> ApiResult<Value> {
        self.client
            .get("conversations", "/conversations")
            .with_token(token)
            .raw()
            .await
    }

    /// Messages of a conversation.
    ///
    /// The body is returned whatever its shape (a bare message list or a
    /// list plus conversation status). If the request fails the result is a
    /// failure with empty data.
    pub async fn messages(&self, conversation_id: &str, token: &str) -> ApiResponse {
        self.client
            .get("conversation_messages", messages_path(conversation_id))
            .with_token(token)
            .lenient(LOAD_MESSAGES_FAILURE, Some(json!([])))
            .await
    }

    pub async fn send_message(
        &self,
        conversation_id: &str,
        content: &str,
        image_url: Option<&str>,
        token: &str,
    ) -> ApiResponse {
        let body = ChatMessageRequest {
            content: content.to_string(),
            image_url: image_url.map(str::to_string),
        };
        self.client
            .post("send_message", messages_path(conversation_id))
            .with_token(token)
            .json(&body)
            .lenient(SEND_MESSAGE_FAILURE, None)
            .await
    }

    /// Upload an image to attach to a message.
    pub async fn upload_image(&self, image: FileUpload, token: &str) -> ApiResult<Value> {
        self.client
            .post("upload_chat_image", "/upload-image")
            .with_token(token)
            .multipart(MultipartForm::new().file("image", image))
            .raw()
            .await
    }
}

fn messages_path(conversation_id: &str) -> String {
    format!("/conversations/{}/messages", segment(conversation_id))
}
