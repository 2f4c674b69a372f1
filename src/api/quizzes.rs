// src/api/quizzes.rs

use reqwest::Method;

use crate::{
    api::ApiClient,
    error::ClientError,
    models::quiz::{CreatedQuiz, QuizDetail, QuizPayload, QuizSummary},
    utils::cancel::CancelToken,
};

impl ApiClient {
    pub async fn list_quizzes(&self, cancel: &CancelToken) -> Result<Vec<QuizSummary>, ClientError> {
        let url = self.endpoint(&["api", "quizzes"])?;
        self.get_json(url, cancel).await
    }

    pub async fn get_quiz(&self, quiz_id: i64, cancel: &CancelToken) -> Result<QuizDetail, ClientError> {
        let url = self.endpoint(&["api", "quizzes", &quiz_id.to_string()])?;
        self.get_json(url, cancel).await
    }

    /// Creates a quiz and returns its id.
    pub async fn create_quiz(&self, quiz: &QuizPayload, cancel: &CancelToken) -> Result<i64, ClientError> {
        let url = self.endpoint(&["api", "quizzes"])?;
        let created: CreatedQuiz = self.send_json(Method::POST, url, quiz, cancel).await?;
        tracing::info!("Created quiz {} ('{}')", created.id, quiz.title);
        Ok(created.id)
    }

    /// Replaces an existing quiz. Questions carrying an `id` update in place.
    pub async fn update_quiz(
        &self,
        quiz_id: i64,
        quiz: &QuizPayload,
        cancel: &CancelToken,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "quizzes", &quiz_id.to_string()])?;
        self.send_json_text(Method::PUT, url, quiz, cancel).await?;
        tracing::info!("Updated quiz {}", quiz_id);
        Ok(())
    }

    pub async fn delete_quiz(&self, quiz_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "quizzes", &quiz_id.to_string()])?;
        self.send_empty(Method::DELETE, url, cancel).await?;
        tracing::info!("Deleted quiz {}", quiz_id);
        Ok(())
    }

    /// Removes every attempt recorded for a quiz; the quiz itself stays.
    pub async fn clear_quiz_history(&self, quiz_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "quizzes", &quiz_id.to_string(), "clear-history"])?;
        self.send_empty(Method::DELETE, url, cancel).await?;
        Ok(())
    }
}
