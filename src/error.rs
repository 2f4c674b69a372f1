// src/error.rs

use std::fmt;

/// A broken authoring rule.
///
/// `question` fields are 1-based positions in the draft's question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingTitleOrDescription,
    NoQuestions,
    DuplicateQuestionOrder { order: u32 },
    MissingQuestionText { question: usize },
    TooFewOptions { question: usize },
    CorrectOptionCount { question: usize, found: usize },
    MissingCorrectAnswer { question: usize },
    InvalidImageUrl { question: usize },
    MissingBlankMarker { question: usize },

    // Rejected edits. The draft is left unchanged.
    MinimumOptionsViolation,
    MinimumAnswersViolation,
    MinimumQuestionsViolation,
    QuestionIndexOutOfRange { index: usize },
    OptionIndexOutOfRange { index: usize },
    AnswerIndexOutOfRange { index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingTitleOrDescription => {
                write!(f, "Title and description are required")
            }
            ValidationError::NoQuestions => write!(f, "Quiz must have at least one question"),
            ValidationError::DuplicateQuestionOrder { order } => {
                write!(f, "Question orders must be unique (order {} is repeated)", order)
            }
            ValidationError::MissingQuestionText { question } => {
                write!(f, "All questions must have text (question {})", question)
            }
            ValidationError::TooFewOptions { question } => write!(
                f,
                "Multiple-choice questions must have at least two options (question {})",
                question
            ),
            ValidationError::CorrectOptionCount { question, found } => write!(
                f,
                "Multiple-choice questions must have exactly one correct option (question {} has {})",
                question, found
            ),
            ValidationError::MissingCorrectAnswer { question } => write!(
                f,
                "Each question must have at least one valid correct answer (question {})",
                question
            ),
            ValidationError::InvalidImageUrl { question } => write!(
                f,
                "Picture-response questions must have a valid image URL (question {})",
                question
            ),
            ValidationError::MissingBlankMarker { question } => write!(
                f,
                "Fill-in-the-blank questions must contain \"____\" (question {})",
                question
            ),
            ValidationError::MinimumOptionsViolation => {
                write!(f, "Multiple-choice question must have at least two options")
            }
            ValidationError::MinimumAnswersViolation => {
                write!(f, "Question must have at least one correct answer")
            }
            ValidationError::MinimumQuestionsViolation => {
                write!(f, "Quiz must have at least one question")
            }
            ValidationError::QuestionIndexOutOfRange { index } => {
                write!(f, "No question at index {}", index)
            }
            ValidationError::OptionIndexOutOfRange { index } => {
                write!(f, "No option at index {}", index)
            }
            ValidationError::AnswerIndexOutOfRange { index } => {
                write!(f, "No correct answer at index {}", index)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Global client error.
/// Every API call, session transition and submission reports through it.
#[derive(Debug)]
pub enum ClientError {
    // Local authoring rule, never reaches the network
    Validation(ValidationError),

    // Local DTO check (validator crate)
    InvalidInput(String),

    // Transport failure (connect, reset, timeout)
    Network(String),

    // Non-2xx response other than 401/403, message extracted from the body
    Server { status: u16, message: String },

    // 401 Unauthorized / 403 Forbidden
    Auth { status: u16, message: String },

    // Response body did not match the expected shape
    Decode(String),

    // The operation's cancel token fired before the response arrived
    Cancelled,

    // Operation not allowed in the current session state
    InvalidState(String),

    Config(String),
}

impl ClientError {
    /// Whether re-invoking the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Server { .. })
    }

    /// HTTP status of a server-reported failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } | ClientError::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(err) => write!(f, "{}", err),
            ClientError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Server { message, .. } => write!(f, "{}", message),
            ClientError::Auth { message, .. } => write!(f, "{}", message),
            ClientError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ClientError::Cancelled => write!(f, "Operation cancelled"),
            ClientError::InvalidState(msg) => write!(f, "{}", msg),
            ClientError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err)
    }
}

/// Converts `reqwest::Error` so `?` works on raw transport calls.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}
