// src/api/auth.rs

use reqwest::Method;
use validator::Validate;

use crate::{
    api::ApiClient,
    error::ClientError,
    models::user::{AuthResponse, HomeResponse, LoginRequest, RegisterRequest, UserRef},
    utils::cancel::CancelToken,
};

impl ApiClient {
    /// Logs in and stores the session cookie in the client's cookie jar.
    ///
    /// The backend answers a bad login with 401 and a plain-text body,
    /// surfaced as `ClientError::Auth`.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        cancel: &CancelToken,
    ) -> Result<AuthResponse, ClientError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let url = self.endpoint(&["api", "auth", "login"])?;
        self.send_json(Method::POST, url, &payload, cancel).await
    }

    /// Registers a new account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        cancel: &CancelToken,
    ) -> Result<AuthResponse, ClientError> {
        let payload = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let url = self.endpoint(&["api", "auth", "register"])?;
        self.send_json(Method::POST, url, &payload, cancel).await
    }

    pub async fn logout(&self, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "auth", "logout"])?;
        self.send_empty(Method::POST, url, cancel).await?;
        Ok(())
    }

    /// Who the session cookie belongs to. `user` is `None` when not signed in.
    pub async fn home(&self, cancel: &CancelToken) -> Result<HomeResponse, ClientError> {
        let url = self.endpoint(&["api", "home"])?;
        self.get_json(url, cancel).await
    }

    pub async fn user_by_username(&self, username: &str, cancel: &CancelToken) -> Result<UserRef, ClientError> {
        let url = self.endpoint(&["api", "auth", "user", username])?;
        self.get_json(url, cancel).await
    }
}
