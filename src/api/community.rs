// src/api/community.rs

use crate::{
    api::ApiClient,
    error::ClientError,
    models::social::{Announcement, UserAchievement},
    utils::cancel::CancelToken,
};

impl ApiClient {
    /// Public; no session required.
    pub async fn announcements(&self, cancel: &CancelToken) -> Result<Vec<Announcement>, ClientError> {
        let url = self.endpoint(&["api", "announcements"])?;
        self.get_json(url, cancel).await
    }

    pub async fn achievements_by_username(
        &self,
        username: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<UserAchievement>, ClientError> {
        let url = self.endpoint(&["api", "achievements", "username", username])?;
        self.get_json(url, cancel).await
    }

    pub async fn achievements_by_user_id(
        &self,
        user_id: i64,
        cancel: &CancelToken,
    ) -> Result<Vec<UserAchievement>, ClientError> {
        let url = self.endpoint(&["api", "achievements", "user", &user_id.to_string()])?;
        self.get_json(url, cancel).await
    }
}
