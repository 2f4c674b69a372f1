// src/state.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::ApiClient,
    config::Config,
    error::ClientError,
    models::user::CurrentUser,
    session::{QuizSession, SessionOptions},
    utils::cancel::CancelToken,
};

/// Everything a view needs: the API client, the configuration and the
/// signed-in user. Clones share the cookie jar and the cached user.
#[derive(Clone)]
pub struct SessionContext {
    pub api: ApiClient,
    pub config: Config,
    user: Arc<RwLock<Option<CurrentUser>>>,
}

impl SessionContext {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config)?;
        Ok(Self {
            api,
            config,
            user: Arc::new(RwLock::new(None)),
        })
    }

    /// Logs in, then asks the backend who we are so the role is known.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        cancel: &CancelToken,
    ) -> Result<CurrentUser, ClientError> {
        self.api.login(username, password, cancel).await?;
        let user = self.refresh(cancel).await?.ok_or_else(|| ClientError::Auth {
            status: 401,
            message: "Login did not establish a session".to_string(),
        })?;
        tracing::info!("Logged in as {}", user.username);
        Ok(user)
    }

    pub async fn logout(&self, cancel: &CancelToken) -> Result<(), ClientError> {
        self.api.logout(cancel).await?;
        if let Some(user) = self.user.write().await.take() {
            tracing::info!("Logged out {}", user.username);
        }
        Ok(())
    }

    /// Re-reads the session's user from `GET /api/home` and updates the cache.
    pub async fn refresh(&self, cancel: &CancelToken) -> Result<Option<CurrentUser>, ClientError> {
        let home = self.api.home(cancel).await?;
        let user = home.user.map(|username| CurrentUser {
            username,
            role: home.role,
        });
        *self.user.write().await = user.clone();
        Ok(user)
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.user.read().await.clone()
    }

    /// The cached user, or an `Auth` 401 when nobody is signed in.
    pub async fn require_user(&self) -> Result<CurrentUser, ClientError> {
        self.current_user().await.ok_or_else(|| ClientError::Auth {
            status: 401,
            message: "Not logged in".to_string(),
        })
    }

    pub fn session_options(&self, practice_mode: bool) -> SessionOptions {
        SessionOptions {
            practice_mode,
            ..SessionOptions::from_config(&self.config)
        }
    }

    /// A fresh quiz-taking session backed by this context's client.
    pub fn quiz_session(&self, practice_mode: bool) -> QuizSession<ApiClient> {
        QuizSession::new(self.api.clone(), self.session_options(practice_mode))
    }
}
