// src/api/mod.rs

pub mod admin;
pub mod auth;
pub mod challenges;
pub mod community;
pub mod friends;
pub mod messages;
pub mod quiz_taking;
pub mod quizzes;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::{
    config::Config,
    error::ClientError,
    models::{
        attempt::{AnswerSheet, QuizResult, StartedAttempt},
        quiz::{QuizDetail, QuizPayload},
    },
    utils::cancel::CancelToken,
};

/// Cookie-authenticated HTTP client for the quiz backend.
///
/// Cheap to clone: clones share the connection pool and the cookie jar,
/// so a login through one clone authenticates all of them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "'{}' cannot be used as an API base URL",
                config.api_base_url
            )));
        }

        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL from path segments. Each segment is percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and returns the body of a 2xx response.
    ///
    /// Non-2xx responses become `Auth` (401/403) or `Server` errors carrying the
    /// message extracted from the body.
    async fn execute(&self, request: RequestBuilder, cancel: &CancelToken) -> Result<String, ClientError> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!("{} {}", method, path);

        let response = cancel.run(self.http.execute(request)).await??;
        let status = response.status();
        let body = cancel.run(response.text()).await??;

        if status.is_success() {
            return Ok(body);
        }

        let message = extract_error_message(&body, status);
        tracing::debug!("{} {} failed with {}: {}", method, path, status, message);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Auth {
                status: status.as_u16(),
                message,
            },
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        cancel: &CancelToken,
    ) -> Result<T, ClientError> {
        let body = self.execute(self.http.get(url), cancel).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        payload: &B,
        cancel: &CancelToken,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send_json_text(method, url, payload, cancel).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like `send_json` but returns the raw body, for endpoints answering with plain text.
    pub(crate) async fn send_json_text<B>(
        &self,
        method: Method,
        url: Url,
        payload: &B,
        cancel: &CancelToken,
    ) -> Result<String, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.http.request(method, url).json(payload), cancel).await
    }

    /// Sends a request without a body and returns the raw response body.
    pub(crate) async fn send_empty(
        &self,
        method: Method,
        url: Url,
        cancel: &CancelToken,
    ) -> Result<String, ClientError> {
        self.execute(self.http.request(method, url), cancel).await
    }
}

/// Best-effort error text from a failed response body.
///
/// JSON `message` or `error` fields win, then a bare JSON string, then the raw
/// body, then the status reason phrase.
fn extract_error_message(body: &str, status: StatusCode) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(message)) => message,
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_string()),
        _ => trimmed.to_string(),
    }
}

/// Backend calls needed by the authoring and quiz-taking flows.
///
/// `ApiClient` is the production implementation; the flows are written against
/// this trait so they can run against any backend.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn fetch_quiz(&self, quiz_id: i64, cancel: &CancelToken) -> Result<QuizDetail, ClientError>;

    async fn start_attempt(
        &self,
        quiz_id: i64,
        practice_mode: bool,
        cancel: &CancelToken,
    ) -> Result<StartedAttempt, ClientError>;

    async fn submit_attempt(
        &self,
        attempt_id: i64,
        answers: &AnswerSheet,
        cancel: &CancelToken,
    ) -> Result<QuizResult, ClientError>;

    /// Whether `answer` is correct for one question of a running attempt.
    async fn check_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        answer: &str,
        cancel: &CancelToken,
    ) -> Result<bool, ClientError>;

    /// Returns the id of the created quiz.
    async fn create_quiz(&self, quiz: &QuizPayload, cancel: &CancelToken) -> Result<i64, ClientError>;

    async fn update_quiz(
        &self,
        quiz_id: i64,
        quiz: &QuizPayload,
        cancel: &CancelToken,
    ) -> Result<(), ClientError>;
}

#[async_trait]
impl QuizBackend for ApiClient {
    async fn fetch_quiz(&self, quiz_id: i64, cancel: &CancelToken) -> Result<QuizDetail, ClientError> {
        ApiClient::get_quiz(self, quiz_id, cancel).await
    }

    async fn start_attempt(
        &self,
        quiz_id: i64,
        practice_mode: bool,
        cancel: &CancelToken,
    ) -> Result<StartedAttempt, ClientError> {
        ApiClient::start_attempt(self, quiz_id, practice_mode, cancel).await
    }

    async fn submit_attempt(
        &self,
        attempt_id: i64,
        answers: &AnswerSheet,
        cancel: &CancelToken,
    ) -> Result<QuizResult, ClientError> {
        ApiClient::submit_attempt(self, attempt_id, answers, cancel).await
    }

    async fn check_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        answer: &str,
        cancel: &CancelToken,
    ) -> Result<bool, ClientError> {
        ApiClient::check_answer(self, attempt_id, question_id, answer, cancel).await
    }

    async fn create_quiz(&self, quiz: &QuizPayload, cancel: &CancelToken) -> Result<i64, ClientError> {
        ApiClient::create_quiz(self, quiz, cancel).await
    }

    async fn update_quiz(
        &self,
        quiz_id: i64,
        quiz: &QuizPayload,
        cancel: &CancelToken,
    ) -> Result<(), ClientError> {
        ApiClient::update_quiz(self, quiz_id, quiz, cancel).await
    }
}

#[async_trait]
impl<T: QuizBackend + ?Sized> QuizBackend for Arc<T> {
    async fn fetch_quiz(&self, quiz_id: i64, cancel: &CancelToken) -> Result<QuizDetail, ClientError> {
        (**self).fetch_quiz(quiz_id, cancel).await
    }

    async fn start_attempt(
        &self,
        quiz_id: i64,
        practice_mode: bool,
        cancel: &CancelToken,
    ) -> Result<StartedAttempt, ClientError> {
        (**self).start_attempt(quiz_id, practice_mode, cancel).await
    }

    async fn submit_attempt(
        &self,
        attempt_id: i64,
        answers: &AnswerSheet,
        cancel: &CancelToken,
    ) -> Result<QuizResult, ClientError> {
        (**self).submit_attempt(attempt_id, answers, cancel).await
    }

    async fn check_answer(
        &self,
        attempt_id: i64,
        question_id: i64,
        answer: &str,
        cancel: &CancelToken,
    ) -> Result<bool, ClientError> {
        (**self).check_answer(attempt_id, question_id, answer, cancel).await
    }

    async fn create_quiz(&self, quiz: &QuizPayload, cancel: &CancelToken) -> Result<i64, ClientError> {
        (**self).create_quiz(quiz, cancel).await
    }

    async fn update_quiz(
        &self,
        quiz_id: i64,
        quiz: &QuizPayload,
        cancel: &CancelToken,
    ) -> Result<(), ClientError> {
        (**self).update_quiz(quiz_id, quiz, cancel).await
    }
}
