//! Profile picture upload, shared by clients and providers.

use servicelink_models::ApiResponse;
use tracing::error;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::upload::{FileUpload, MultipartForm};

pub const PROFILE_PICTURE_REQUIRED: &str = "Profile picture file is required";
pub const AUTH_REQUIRED: &str = "Authentication required";

impl ApiClient {
    /// Upload a new profile picture for the signed-in user.
    ///
    /// Nothing is sent when `file` is missing or there is no session token.
    pub async fn upload_profile_picture(&self, file: Option<FileUpload>) -> ApiResponse {
        let Some(file) = file else {
            error!("No file provided for profile picture upload");
            return ApiError::validation(PROFILE_PICTURE_REQUIRED).into_response();
        };

        if !self.load_session().await.is_authenticated() {
            error!("Profile picture upload without a session token");
            return ApiError::validation(AUTH_REQUIRED).into_response();
        }

        self.post("upload_profile_picture", "/upload-profile-picture")
            .with_session()
            .multipart(MultipartForm::new().file("profilePicture", file))
            .wrapped()
            .await
    }
}
