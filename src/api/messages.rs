// src/api/messages.rs

use reqwest::Method;
use validator::Validate;

use crate::{
    api::ApiClient,
    error::ClientError,
    models::social::{Message, SendMessageRequest},
    utils::cancel::CancelToken,
};

impl ApiClient {
    /// Latest messages received by the current user.
    pub async fn received_messages(&self, cancel: &CancelToken) -> Result<Vec<Message>, ClientError> {
        let url = self.endpoint(&["api", "messages", "received"])?;
        self.get_json(url, cancel).await
    }

    pub async fn send_message(
        &self,
        receiver_username: &str,
        content: &str,
        cancel: &CancelToken,
    ) -> Result<(), ClientError> {
        let payload = SendMessageRequest {
            receiver_username: receiver_username.to_string(),
            content: content.trim().to_string(),
        };
        payload.validate()?;

        let url = self.endpoint(&["api", "messages", "send"])?;
        self.send_json_text(Method::POST, url, &payload, cancel).await?;
        tracing::debug!("Message sent to {}", receiver_username);
        Ok(())
    }
}
