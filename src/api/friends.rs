// src/api/friends.rs

use reqwest::Method;
use serde_json::json;

use crate::{
    api::ApiClient,
    error::ClientError,
    models::social::FriendRequest,
    utils::cancel::CancelToken,
};

impl ApiClient {
    /// Usernames of the current user's friends.
    pub async fn friends(&self, cancel: &CancelToken) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["api", "friends", "list"])?;
        self.get_json(url, cancel).await
    }

    /// Friends whose username contains `query`, case-insensitively.
    pub async fn find_friends(&self, query: &str, cancel: &CancelToken) -> Result<Vec<String>, ClientError> {
        let needle = query.to_lowercase();
        let friends = self.friends(cancel).await?;
        Ok(friends
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn pending_friend_requests(&self, cancel: &CancelToken) -> Result<Vec<FriendRequest>, ClientError> {
        let url = self.endpoint(&["api", "friends", "requests"])?;
        self.get_json(url, cancel).await
    }

    /// Searches all users (not only friends) by username.
    pub async fn search_users(&self, username: &str, cancel: &CancelToken) -> Result<Vec<String>, ClientError> {
        let mut url = self.endpoint(&["api", "friends", "search"])?;
        url.query_pairs_mut().append_pair("username", username);
        self.get_json(url, cancel).await
    }

    /// Returns the server's confirmation text.
    pub async fn send_friend_request(&self, username: &str, cancel: &CancelToken) -> Result<String, ClientError> {
        let url = self.endpoint(&["api", "friends", "request"])?;
        self.send_json_text(Method::POST, url, &json!({ "username": username }), cancel)
            .await
    }

    pub async fn accept_friend_request(&self, request_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "friends", "accept", &request_id.to_string()])?;
        self.send_empty(Method::POST, url, cancel).await?;
        Ok(())
    }

    pub async fn reject_friend_request(&self, request_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "friends", "reject", &request_id.to_string()])?;
        self.send_empty(Method::POST, url, cancel).await?;
        Ok(())
    }

    pub async fn remove_friend(&self, username: &str, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "friends", "remove"])?;
        self.send_json_text(Method::POST, url, &json!({ "username": username }), cancel)
            .await?;
        Ok(())
    }
}
