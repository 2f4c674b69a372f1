// src/models/quiz.rs

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{
    null_as_default,
    question::{DraftQuestion, Question, QuestionPayload},
};

/// Client-held, unsubmitted quiz form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQuiz {
    pub title: String,
    pub description: String,
    pub randomize_questions: bool,
    pub single_page: bool,
    /// Only meaningful when `single_page` is false.
    pub immediate_correction: bool,
    pub practice_mode: bool,
    pub questions: Vec<DraftQuestion>,
}

impl DraftQuiz {
    /// An empty form holding one blank question.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            randomize_questions: false,
            single_page: true,
            immediate_correction: false,
            practice_mode: false,
            questions: vec![DraftQuestion::new(1)],
        }
    }
}

impl Default for DraftQuiz {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of `POST /api/quizzes` and `PUT /api/quizzes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub title: String,
    pub description: String,
    pub randomize_questions: bool,
    pub single_page: bool,
    pub immediate_correction: bool,
    pub practice_mode: bool,
    pub questions: Vec<QuestionPayload>,
}

/// Full quiz as returned by `GET /api/quizzes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetail {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Creator's username.
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub randomize_questions: bool,
    #[serde(default = "default_single_page", deserialize_with = "null_as_single_page")]
    pub single_page: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub immediate_correction: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub practice_mode: bool,
}

fn default_single_page() -> bool {
    true
}

fn null_as_single_page<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_single_page))
}

/// List item of `GET /api/quizzes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// The part of the create response the client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedQuiz {
    pub id: i64,
}
