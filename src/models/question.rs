// src/models/question.rs

use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

/// Question kinds understood by the backend.
/// Serialized as `QUESTION_RESPONSE`, `FILL_IN_THE_BLANK`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    #[default]
    QuestionResponse,
    FillInTheBlank,
    MultipleChoice,
    PictureResponse,
}

impl QuestionType {
    pub fn is_multiple_choice(self) -> bool {
        self == QuestionType::MultipleChoice
    }
}

/// One choice of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    /// Present only on options loaded from the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: None,
            text: text.into(),
            is_correct,
        }
    }
}

/// Authoring-side question, mutated field by field while the form is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQuestion {
    /// Set when the draft edits a question that already exists on the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Accepted answers, used by every type except multiple choice.
    pub correct_answers: Vec<String>,
    /// Choices, used by multiple choice only.
    pub options: Vec<AnswerOption>,
    /// Used by picture response only.
    pub image_url: String,
    pub question_order: u32,
}

impl DraftQuestion {
    /// A blank question-response question at the given position.
    pub fn new(question_order: u32) -> Self {
        Self {
            id: None,
            question_text: String::new(),
            question_type: QuestionType::QuestionResponse,
            correct_answers: vec![String::new()],
            options: Vec::new(),
            image_url: String::new(),
            question_order,
        }
    }
}

/// Question as served by `GET /api/quizzes/{id}` and the start-attempt call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question_text: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub question_order: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub correct_answers: Option<Vec<String>>,
    #[serde(default)]
    pub order_matters: Option<bool>,
}

/// Submission form of a question: only the fields relevant to its type are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<AnswerOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub question_order: u32,
}
