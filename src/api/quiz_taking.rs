// src/api/quiz_taking.rs

use reqwest::Method;

use crate::{
    api::ApiClient,
    config::BOARD_LIST_LIMIT,
    error::ClientError,
    models::attempt::{
        AnswerSheet, AttemptRecord, CheckAnswerRequest, CheckAnswerResponse, QuizBoard, QuizResult,
        QuizStatistics, StartedAttempt,
    },
    utils::cancel::CancelToken,
};

impl ApiClient {
    /// Starts an attempt. The returned question order is the one to display.
    pub async fn start_attempt(
        &self,
        quiz_id: i64,
        practice_mode: bool,
        cancel: &CancelToken,
    ) -> Result<StartedAttempt, ClientError> {
        let mut url = self.endpoint(&["api", "quiz-taking", "start", &quiz_id.to_string()])?;
        if practice_mode {
            url.query_pairs_mut().append_pair("practiceMode", "true");
        }
        let started: StartedAttempt = self.send_json(Method::POST, url, &serde_json::json!({}), cancel).await?;
        tracing::info!("Started attempt {} on quiz {}", started.attempt_id, quiz_id);
        Ok(started)
    }

    /// Submits every collected answer and returns the scored result.
    pub async fn submit_attempt(
        &self,
        attempt_id: i64,
        answers: &AnswerSheet,
        cancel: &CancelToken,
    ) -> Result<QuizResult, ClientError> {
        let url = self.endpoint(&["api", "quiz-taking", "submit", &attempt_id.to_string()])?;
        self.send_json(Method::POST, url, answers, cancel).await
    }

    pub async fn check_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        answer: &str,
        cancel: &CancelToken,
    ) -> Result<bool, ClientError> {
        let url = self.endpoint(&[
            "api",
            "quiz-taking",
            "check",
            &attempt_id.to_string(),
            &question_id.to_string(),
        ])?;
        let response: CheckAnswerResponse = self
            .send_json(Method::POST, url, &CheckAnswerRequest { answer }, cancel)
            .await?;
        Ok(response.correct)
    }

    pub async fn top_scores(
        &self,
        quiz_id: i64,
        limit: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<AttemptRecord>, ClientError> {
        self.attempt_list("top-scores", quiz_id, limit, cancel).await
    }

    pub async fn top_scores_today(
        &self,
        quiz_id: i64,
        limit: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<AttemptRecord>, ClientError> {
        self.attempt_list("top-scores-today", quiz_id, limit, cancel).await
    }

    pub async fn recent_attempts(
        &self,
        quiz_id: i64,
        limit: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<AttemptRecord>, ClientError> {
        self.attempt_list("recent", quiz_id, limit, cancel).await
    }

    async fn attempt_list(
        &self,
        kind: &str,
        quiz_id: i64,
        limit: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<AttemptRecord>, ClientError> {
        let mut url = self.endpoint(&["api", "quiz-taking", kind, &quiz_id.to_string()])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.get_json(url, cancel).await
    }

    pub async fn quiz_statistics(&self, quiz_id: i64, cancel: &CancelToken) -> Result<QuizStatistics, ClientError> {
        let url = self.endpoint(&["api", "quiz-taking", "statistics", &quiz_id.to_string()])?;
        self.get_json(url, cancel).await
    }

    pub async fn user_history(&self, user_id: i64, cancel: &CancelToken) -> Result<Vec<AttemptRecord>, ClientError> {
        let url = self.endpoint(&["api", "quiz-taking", "history", "user", &user_id.to_string()])?;
        self.get_json(url, cancel).await
    }

    pub async fn user_quiz_history(
        &self,
        user_id: i64,
        quiz_id: i64,
        cancel: &CancelToken,
    ) -> Result<Vec<AttemptRecord>, ClientError> {
        let url = self.endpoint(&[
            "api",
            "quiz-taking",
            "history",
            "user",
            &user_id.to_string(),
            "quiz",
            &quiz_id.to_string(),
        ])?;
        self.get_json(url, cancel).await
    }

    /// Fetches the four summary lists concurrently.
    ///
    /// A part that fails is left empty and logged; it never fails the board.
    /// Only cancellation aborts the whole call.
    pub async fn quiz_board(&self, quiz_id: i64, cancel: &CancelToken) -> Result<QuizBoard, ClientError> {
        let (top, today, recent, stats) = tokio::join!(
            self.top_scores(quiz_id, BOARD_LIST_LIMIT, cancel),
            self.top_scores_today(quiz_id, BOARD_LIST_LIMIT, cancel),
            self.recent_attempts(quiz_id, BOARD_LIST_LIMIT, cancel),
            self.quiz_statistics(quiz_id, cancel),
        );

        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        Ok(QuizBoard {
            top_scores: or_default("top scores", quiz_id, top),
            top_scores_today: or_default("today's top scores", quiz_id, today),
            recent: or_default("recent attempts", quiz_id, recent),
            statistics: stats
                .map_err(|e| tracing::warn!("Failed to load statistics for quiz {}: {}", quiz_id, e))
                .ok(),
        })
    }
}

fn or_default<T: Default>(part: &str, quiz_id: i64, result: Result<T, ClientError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to load {} for quiz {}: {}", part, quiz_id, e);
        T::default()
    })
}
