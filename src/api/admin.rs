// src/api/admin.rs

use reqwest::Method;
use validator::Validate;

use crate::{
    api::ApiClient,
    error::ClientError,
    models::{
        social::AnnouncementRequest,
        user::{AdminStatistics, AdminUser},
    },
    utils::cancel::CancelToken,
};

// Every call here answers 403 for non-admin sessions, surfaced as `ClientError::Auth`.
impl ApiClient {
    pub async fn admin_users(&self, cancel: &CancelToken) -> Result<Vec<AdminUser>, ClientError> {
        let url = self.endpoint(&["api", "admin", "users"])?;
        self.get_json(url, cancel).await
    }

    pub async fn promote_user(&self, user_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "admin", "promote", &user_id.to_string()])?;
        self.send_empty(Method::POST, url, cancel).await?;
        tracing::info!("Promoted user {} to admin", user_id);
        Ok(())
    }

    pub async fn delete_user(&self, user_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "admin", "users", &user_id.to_string()])?;
        self.send_empty(Method::DELETE, url, cancel).await?;
        tracing::info!("Deleted user {}", user_id);
        Ok(())
    }

    pub async fn admin_statistics(&self, cancel: &CancelToken) -> Result<AdminStatistics, ClientError> {
        let url = self.endpoint(&["api", "admin", "statistics"])?;
        self.get_json(url, cancel).await
    }

    pub async fn create_announcement(
        &self,
        title: &str,
        content: &str,
        cancel: &CancelToken,
    ) -> Result<(), ClientError> {
        let payload = AnnouncementRequest {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
        };
        payload.validate()?;

        let url = self.endpoint(&["api", "admin", "announcements"])?;
        self.send_json_text(Method::POST, url, &payload, cancel).await?;
        Ok(())
    }
}
