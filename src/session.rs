// src/session.rs

//! Quiz-taking session.
//!
//! `Loading → Active → Submitting → Completed`, with a terminal `Error` when
//! the quiz cannot be loaded. Single-page quizzes collect answers freely.
//! Paginated quizzes show one question at a time and gate "Next" on the
//! current answer. With immediate correction, each advance flashes feedback
//! first.

use std::time::Duration;

use crate::{
    api::QuizBackend,
    config::Config,
    error::ClientError,
    models::{
        attempt::{AnswerSheet, QuizResult},
        question::Question,
        quiz::QuizDetail,
    },
    utils::cancel::CancelToken,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Active,
    Submitting,
    Completed(QuizResult),
    /// Loading failed. The session cannot be reused.
    Error(String),
}

/// The main button of a paginated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    SubmitQuiz,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::Next => "Next",
            PrimaryAction::SubmitQuiz => "Submit Quiz",
        }
    }
}

/// Immediate-correction flash shown before moving on. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
    /// The answer was kept but not checked.
    Recorded,
}

impl Feedback {
    pub fn label(self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Incorrect => "Incorrect.",
            Feedback::Recorded => "Answer submitted!",
        }
    }
}

/// Where immediate-correction feedback comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackMode {
    /// Ask the backend whether the answer is correct.
    Server,
    /// Acknowledge locally without checking.
    Local,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub practice_mode: bool,
    pub feedback_mode: FeedbackMode,
    pub feedback_delay: Duration,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            practice_mode: false,
            feedback_mode: if config.server_feedback {
                FeedbackMode::Server
            } else {
                FeedbackMode::Local
            },
            feedback_delay: Duration::from_millis(config.feedback_delay_ms),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct QuizSession<B> {
    backend: B,
    options: SessionOptions,
    state: SessionState,
    quiz: Option<QuizDetail>,
    attempt_id: Option<i64>,
    questions: Vec<Question>,
    answers: AnswerSheet,
    current_index: usize,
    feedback: Option<Feedback>,
    last_error: Option<String>,
}

impl<B: QuizBackend> QuizSession<B> {
    pub fn new(backend: B, options: SessionOptions) -> Self {
        Self {
            backend,
            options,
            state: SessionState::Loading,
            quiz: None,
            attempt_id: None,
            questions: Vec::new(),
            answers: AnswerSheet::new(),
            current_index: 0,
            feedback: None,
            last_error: None,
        }
    }

    /// Fetches the quiz, then starts an attempt on it.
    ///
    /// The attempt's question order wins over the quiz metadata's. Either
    /// failure moves the session to `Error`.
    pub async fn load(&mut self, quiz_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        if self.state != SessionState::Loading {
            return Err(ClientError::InvalidState("Quiz session already loaded".to_string()));
        }

        let loaded = async {
            let quiz = self.backend.fetch_quiz(quiz_id, cancel).await?;
            let started = self
                .backend
                .start_attempt(quiz_id, self.options.practice_mode, cancel)
                .await?;
            Ok::<_, ClientError>((quiz, started))
        }
        .await;

        match loaded {
            Ok((quiz, started)) => {
                self.questions = started.questions.unwrap_or_else(|| quiz.questions.clone());
                self.attempt_id = Some(started.attempt_id);
                tracing::info!(
                    "Quiz {} loaded: attempt {}, {} questions, {}",
                    quiz.id,
                    started.attempt_id,
                    self.questions.len(),
                    if quiz.single_page { "single page" } else { "paginated" }
                );
                self.quiz = Some(quiz);
                self.state = SessionState::Active;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load quiz {}: {}", quiz_id, e);
                self.state = SessionState::Error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn quiz(&self) -> Option<&QuizDetail> {
        self.quiz.as_ref()
    }

    pub fn attempt_id(&self) -> Option<i64> {
        self.attempt_id
    }

    /// All questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn answer(&self, question_id: i64) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn is_paginated(&self) -> bool {
        self.quiz.as_ref().is_some_and(|quiz| !quiz.single_page)
    }

    /// Immediate correction only applies to paginated quizzes.
    pub fn immediate_correction(&self) -> bool {
        self.quiz
            .as_ref()
            .is_some_and(|quiz| !quiz.single_page && quiz.immediate_correction)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// What to render: every question on a single page, else the current one.
    pub fn visible_questions(&self) -> &[Question] {
        if !self.is_paginated() {
            return &self.questions;
        }
        match self.questions.get(self.current_index) {
            Some(_) => &self.questions[self.current_index..=self.current_index],
            None => &[],
        }
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Message of the last failed submission, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        match &self.state {
            SessionState::Completed(result) => Some(result),
            _ => None,
        }
    }

    /// Records the answer to `question_id`, replacing any previous one.
    pub fn set_answer(&mut self, question_id: i64, value: impl Into<String>) -> Result<(), ClientError> {
        self.ensure_active()?;
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(ClientError::InvalidState(format!(
                "Question {} is not part of this quiz",
                question_id
            )));
        }
        self.answers.insert(question_id, value.into());
        Ok(())
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answer(q.id).is_some_and(|a| !a.is_empty()))
            .count()
    }

    fn current_answered(&self) -> bool {
        self.current_question()
            .and_then(|q| self.answer(q.id))
            .is_some_and(|a| !a.is_empty())
    }

    fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.is_paginated() && !self.is_last() {
            PrimaryAction::Next
        } else {
            PrimaryAction::SubmitQuiz
        }
    }

    /// Whether the primary button is clickable.
    ///
    /// Paginated pages need an answer to the current question. Nothing is
    /// clickable while feedback shows or outside `Active`.
    pub fn primary_enabled(&self) -> bool {
        self.state == SessionState::Active
            && self.feedback.is_none()
            && (!self.is_paginated() || self.current_answered())
    }

    pub fn previous_enabled(&self) -> bool {
        self.state == SessionState::Active
            && self.is_paginated()
            && self.feedback.is_none()
            && self.current_index > 0
    }

    /// Percentage through the quiz: page position when paginated, answered share otherwise.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let done = if self.is_paginated() {
            self.current_index + 1
        } else {
            self.answered_count()
        };
        done as f64 / self.questions.len() as f64 * 100.0
    }

    /// Moves to the next page. Stays put on the last page.
    pub fn next(&mut self) -> Result<usize, ClientError> {
        self.ensure_paging()?;
        if !self.current_answered() {
            return Err(ClientError::InvalidState(
                "Answer the current question before moving on".to_string(),
            ));
        }
        if !self.is_last() {
            self.current_index += 1;
        }
        Ok(self.current_index)
    }

    /// Moves to the previous page. Stays put on the first page.
    pub fn previous(&mut self) -> Result<usize, ClientError> {
        self.ensure_paging()?;
        self.current_index = self.current_index.saturating_sub(1);
        Ok(self.current_index)
    }

    /// Produces the immediate-correction flash for the current answer.
    ///
    /// In `Server` mode the backend checks the answer. A failed check falls
    /// back to `Recorded`, since feedback never affects the score.
    pub async fn begin_feedback(&mut self, cancel: &CancelToken) -> Result<Feedback, ClientError> {
        self.ensure_paging()?;
        if !self.immediate_correction() {
            return Err(ClientError::InvalidState(
                "Immediate correction is off for this quiz".to_string(),
            ));
        }
        if self.is_last() {
            return Err(ClientError::InvalidState(
                "Last question: submit the quiz instead".to_string(),
            ));
        }

        let (question_id, answer) = match self.current_question() {
            Some(question) => match self.answer(question.id) {
                Some(answer) if !answer.is_empty() => (question.id, answer.to_string()),
                _ => {
                    return Err(ClientError::InvalidState(
                        "Answer the current question before moving on".to_string(),
                    ));
                }
            },
            None => return Err(ClientError::InvalidState("No question to check".to_string())),
        };
        let attempt_id = self
            .attempt_id
            .ok_or_else(|| ClientError::InvalidState("No active quiz attempt found".to_string()))?;

        let feedback = match self.options.feedback_mode {
            FeedbackMode::Local => Feedback::Recorded,
            FeedbackMode::Server => {
                match self.backend.check_answer(attempt_id, question_id, &answer, cancel).await {
                    Ok(true) => Feedback::Correct,
                    Ok(false) => Feedback::Incorrect,
                    Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
                    Err(e) => {
                        tracing::warn!("Answer check for question {} failed: {}", question_id, e);
                        Feedback::Recorded
                    }
                }
            }
        };

        self.feedback = Some(feedback);
        Ok(feedback)
    }

    /// Clears the flash and advances to the next page.
    pub fn finish_feedback(&mut self) -> Result<usize, ClientError> {
        if self.feedback.take().is_none() {
            return Err(ClientError::InvalidState("No feedback is showing".to_string()));
        }
        if !self.is_last() {
            self.current_index += 1;
        }
        Ok(self.current_index)
    }

    /// Flash feedback, hold it for the configured delay, then advance.
    pub async fn advance_with_feedback(&mut self, cancel: &CancelToken) -> Result<Feedback, ClientError> {
        let feedback = self.begin_feedback(cancel).await?;
        if let Err(e) = cancel.run(tokio::time::sleep(self.options.feedback_delay)).await {
            self.feedback = None;
            return Err(e);
        }
        self.finish_feedback()?;
        Ok(feedback)
    }

    /// Posts every collected answer and completes the session.
    ///
    /// On failure the session returns to `Active` with answers intact and
    /// `last_error` set, so the user can retry.
    ///
    /// Submission is not gated on the current page or answer. Callers are
    /// expected to check `primary_enabled` and `primary_action` first.
    pub async fn submit(&mut self, cancel: &CancelToken) -> Result<QuizResult, ClientError> {
        self.ensure_active()?;
        if self.feedback.is_some() {
            return Err(ClientError::InvalidState("Wait for the feedback to clear".to_string()));
        }
        let attempt_id = self
            .attempt_id
            .ok_or_else(|| ClientError::InvalidState("No active quiz attempt found".to_string()))?;

        self.state = SessionState::Submitting;
        self.last_error = None;

        match self.backend.submit_attempt(attempt_id, &self.answers, cancel).await {
            Ok(result) => {
                tracing::info!(
                    "Attempt {} scored {}/{} ({}%)",
                    attempt_id,
                    result.score,
                    result.total_questions,
                    result.percentage
                );
                self.state = SessionState::Completed(result.clone());
                Ok(result)
            }
            Err(e) => {
                if !matches!(e, ClientError::Cancelled) {
                    tracing::error!("Failed to submit attempt {}: {}", attempt_id, e);
                }
                self.state = SessionState::Active;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn ensure_active(&self) -> Result<(), ClientError> {
        match &self.state {
            SessionState::Active => Ok(()),
            other => Err(ClientError::InvalidState(format!(
                "Quiz session is not active ({})",
                state_name(other)
            ))),
        }
    }

    fn ensure_paging(&self) -> Result<(), ClientError> {
        self.ensure_active()?;
        if !self.is_paginated() {
            return Err(ClientError::InvalidState(
                "Single-page quizzes have no pages".to_string(),
            ));
        }
        if self.feedback.is_some() {
            return Err(ClientError::InvalidState("Wait for the feedback to clear".to_string()));
        }
        Ok(())
    }
}

fn state_name(state: &SessionState) -> &'static str {
    match state {
        SessionState::Loading => "loading",
        SessionState::Active => "active",
        SessionState::Submitting => "submitting",
        SessionState::Completed(_) => "completed",
        SessionState::Error(_) => "error",
    }
}
