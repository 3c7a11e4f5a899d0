//! Account endpoints. All return the body as is.

use serde_json::Value;
use servicelink_models::{
    ChangePasswordRequest, EmailRequest, LoginRequest, ResetPasswordRequest, VerifyEmailRequest,
};

use crate::client::ApiClient;
use crate::error::ApiResult;

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Value> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post("login", "/login").json(&body).raw().await
    }

    /// Change the password of the account owning `token`.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        token: &str,
    ) -> ApiResult<Value> {
        let body = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.client
            .post("change_password", "/change-password")
            .with_token(token)
            .json(&body)
            .raw()
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<Value> {
        let body = EmailRequest {
            email: email.to_string(),
        };
        self.client
            .post("forgot_password", "/forgot-password")
            .json(&body)
            .raw()
            .await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> ApiResult<Value> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.client
            .post("reset_password", "/reset-password")
            .json(&body)
            .raw()
            .await
    }

    pub async fn resend_verification(&self, email: &str) -> ApiResult<Value> {
        let body = EmailRequest {
            email: email.to_string(),
        };
        self.client
            .post("resend_verification", "/resend-verification")
            .json(&body)
            .raw()
            .await
    }

    pub async fn verify_email(&self, email: &str, code: &str) -> ApiResult<Value> {
        let body = VerifyEmailRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.client
            .post("verify_email", "/verify-email")
            .json(&body)
            .raw()
            .await
    }
}
