// src/models/attempt.rs

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{null_as_default, question::Question};

/// Answers keyed by question id.
/// Serialized as a JSON object with stringified ids as keys.
pub type AnswerSheet = BTreeMap<i64, String>;

/// Response of `POST /api/quiz-taking/start/{quizId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedAttempt {
    pub attempt_id: i64,
    /// Display order chosen by the server, possibly randomized.
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_questions: Option<u32>,
}

/// Scored outcome of `POST /api/quiz-taking/submit/{attemptId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(default)]
    pub attempt_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_questions: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub percentage: f64,
    /// Minutes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_taken: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

/// An attempt row in history, top-score and recent lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub id: i64,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub total_questions: Option<i64>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub is_practice_mode: Option<bool>,
    #[serde(default)]
    pub time_taken_minutes: Option<i64>,
}

/// Aggregates of `GET /api/quiz-taking/statistics/{quizId}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_attempts: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_time: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highest_score: i64,
}

/// Body of `POST /api/quiz-taking/check/{attemptId}/{questionId}`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckAnswerRequest<'a> {
    pub answer: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckAnswerResponse {
    pub correct: bool,
}

/// Everything shown on a quiz's summary page, fetched concurrently.
/// Parts that failed to load stay empty.
#[derive(Debug, Clone, Default)]
pub struct QuizBoard {
    pub top_scores: Vec<AttemptRecord>,
    pub top_scores_today: Vec<AttemptRecord>,
    pub recent: Vec<AttemptRecord>,
    pub statistics: Option<QuizStatistics>,
}
