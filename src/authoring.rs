// src/authoring.rs

//! Quiz authoring: draft mutations, structural validation and submission.
//!
//! Edits are applied in place on a [`DraftQuiz`]. An edit that would break a
//! minimum (two options, one correct answer, one question) is refused and the
//! draft stays as it was. [`validate`] turns a draft into a [`ValidatedQuiz`],
//! the only value [`submit`] accepts.

use std::{
    collections::{BTreeSet, HashSet},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    api::QuizBackend,
    error::{ClientError, ValidationError},
    models::{
        question::{AnswerOption, DraftQuestion, QuestionPayload, QuestionType},
        quiz::{DraftQuiz, QuizDetail, QuizPayload},
    },
    utils::cancel::CancelToken,
};

/// Marks the blank in a fill-in-the-blank question text.
pub const BLANK_MARKER: &str = "____";

static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(http|https)://.*$").expect("image URL pattern is valid"));

impl DraftQuiz {
    /// Appends a blank question ordered after the existing ones.
    pub fn add_question(&mut self) -> &mut DraftQuestion {
        let order = self.questions.len() as u32 + 1;
        self.questions.push(DraftQuestion::new(order));
        let last = self.questions.len() - 1;
        &mut self.questions[last]
    }

    /// Removes the question at `index`. A quiz keeps at least one question.
    pub fn remove_question(&mut self, index: usize) -> Result<DraftQuestion, ValidationError> {
        if self.questions.len() <= 1 {
            return Err(ValidationError::MinimumQuestionsViolation);
        }
        if index >= self.questions.len() {
            return Err(ValidationError::QuestionIndexOutOfRange { index });
        }
        Ok(self.questions.remove(index))
    }

    pub fn question_mut(&mut self, index: usize) -> Result<&mut DraftQuestion, ValidationError> {
        self.questions
            .get_mut(index)
            .ok_or(ValidationError::QuestionIndexOutOfRange { index })
    }

    pub fn validate(&self) -> Result<ValidatedQuiz, ValidationError> {
        validate(self)
    }

    pub fn violations(&self) -> Vec<ValidationError> {
        violations(self)
    }

    /// Editable draft of a quiz loaded from the server. Question ids are kept
    /// so the update replaces questions in place.
    pub fn from_detail(detail: &QuizDetail) -> Self {
        let questions = detail
            .questions
            .iter()
            .enumerate()
            .map(|(position, question)| {
                let correct_answers = if question.question_type.is_multiple_choice() {
                    Vec::new()
                } else {
                    match &question.correct_answers {
                        Some(answers) if !answers.is_empty() => answers.clone(),
                        _ => vec![String::new()],
                    }
                };

                DraftQuestion {
                    id: Some(question.id),
                    question_text: question.question_text.clone(),
                    question_type: question.question_type,
                    correct_answers,
                    options: question.options.clone(),
                    image_url: question.image_url.clone().unwrap_or_default(),
                    question_order: question.question_order.unwrap_or(position as u32 + 1),
                }
            })
            .collect();

        Self {
            title: detail.title.clone(),
            description: detail.description.clone(),
            randomize_questions: detail.randomize_questions,
            single_page: detail.single_page,
            immediate_correction: detail.immediate_correction,
            practice_mode: detail.practice_mode,
            questions,
        }
    }
}

impl DraftQuestion {
    /// Switches the question to `new_type`, resetting its answers.
    ///
    /// Destructive: options or correct answers entered for the previous type
    /// are discarded. Multiple choice starts with two empty incorrect options,
    /// every other type with a single empty correct answer. Re-selecting the
    /// current type changes nothing.
    pub fn change_question_type(&mut self, new_type: QuestionType) {
        if self.question_type == new_type {
            return;
        }
        self.question_type = new_type;
        if new_type.is_multiple_choice() {
            self.correct_answers = Vec::new();
            self.options = vec![AnswerOption::default(), AnswerOption::default()];
        } else {
            self.options = Vec::new();
            self.correct_answers = vec![String::new()];
        }
    }

    /// Marks option `index` as the single correct option.
    pub fn set_option_correct(&mut self, index: usize) -> Result<(), ValidationError> {
        if index >= self.options.len() {
            return Err(ValidationError::OptionIndexOutOfRange { index });
        }
        for (i, option) in self.options.iter_mut().enumerate() {
            option.is_correct = i == index;
        }
        Ok(())
    }

    /// Unticks option `index`, leaving the question with no correct option.
    pub fn set_option_incorrect(&mut self, index: usize) -> Result<(), ValidationError> {
        let option = self
            .options
            .get_mut(index)
            .ok_or(ValidationError::OptionIndexOutOfRange { index })?;
        option.is_correct = false;
        Ok(())
    }

    pub fn add_option(&mut self) {
        self.options.push(AnswerOption::default());
    }

    pub fn set_option_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), ValidationError> {
        let option = self
            .options
            .get_mut(index)
            .ok_or(ValidationError::OptionIndexOutOfRange { index })?;
        option.text = text.into();
        Ok(())
    }

    /// Removes option `index`. A question keeps at least two options.
    pub fn remove_option(&mut self, index: usize) -> Result<AnswerOption, ValidationError> {
        if self.options.len() <= 2 {
            return Err(ValidationError::MinimumOptionsViolation);
        }
        if index >= self.options.len() {
            return Err(ValidationError::OptionIndexOutOfRange { index });
        }
        Ok(self.options.remove(index))
    }

    pub fn add_correct_answer(&mut self) {
        self.correct_answers.push(String::new());
    }

    pub fn set_correct_answer(&mut self, index: usize, value: impl Into<String>) -> Result<(), ValidationError> {
        let answer = self
            .correct_answers
            .get_mut(index)
            .ok_or(ValidationError::AnswerIndexOutOfRange { index })?;
        *answer = value.into();
        Ok(())
    }

    /// Removes correct answer `index`. A question keeps at least one.
    pub fn remove_correct_answer(&mut self, index: usize) -> Result<String, ValidationError> {
        if self.correct_answers.len() <= 1 {
            return Err(ValidationError::MinimumAnswersViolation);
        }
        if index >= self.correct_answers.len() {
            return Err(ValidationError::AnswerIndexOutOfRange { index });
        }
        Ok(self.correct_answers.remove(index))
    }

    fn to_payload(&self) -> QuestionPayload {
        let multiple_choice = self.question_type.is_multiple_choice();

        QuestionPayload {
            id: self.id,
            question_text: self.question_text.clone(),
            question_type: self.question_type,
            options: multiple_choice.then(|| self.options.clone()),
            correct_answers: (!multiple_choice).then(|| {
                self.correct_answers
                    .iter()
                    .filter(|answer| !answer.trim().is_empty())
                    .cloned()
                    .collect()
            }),
            image_url: (self.question_type == QuestionType::PictureResponse).then(|| self.image_url.clone()),
            question_order: self.question_order,
        }
    }
}

/// A draft that passed every authoring rule, in submission form.
///
/// Only [`validate`] constructs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuiz {
    payload: QuizPayload,
}

impl ValidatedQuiz {
    pub fn payload(&self) -> &QuizPayload {
        &self.payload
    }

    pub fn into_payload(self) -> QuizPayload {
        self.payload
    }
}

/// Every broken rule of `draft`, in check order.
///
/// Quiz-level rules come first (title and description, question count,
/// unique ordering), then each question in turn. An empty result means the
/// draft is submittable.
pub fn violations(draft: &DraftQuiz) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.title.is_empty() || draft.description.is_empty() {
        errors.push(ValidationError::MissingTitleOrDescription);
    }

    if draft.questions.is_empty() {
        errors.push(ValidationError::NoQuestions);
    }

    let mut seen = HashSet::new();
    let mut repeated = BTreeSet::new();
    for question in &draft.questions {
        if !seen.insert(question.question_order) && repeated.insert(question.question_order) {
            errors.push(ValidationError::DuplicateQuestionOrder {
                order: question.question_order,
            });
        }
    }

    for (index, question) in draft.questions.iter().enumerate() {
        check_question(index + 1, question, &mut errors);
    }

    errors
}

fn check_question(position: usize, question: &DraftQuestion, errors: &mut Vec<ValidationError>) {
    if question.question_text.is_empty() {
        errors.push(ValidationError::MissingQuestionText { question: position });
    }

    if question.question_type.is_multiple_choice() {
        let correct = question.options.iter().filter(|option| option.is_correct).count();
        if question.options.len() < 2 {
            errors.push(ValidationError::TooFewOptions { question: position });
        } else if correct != 1 {
            errors.push(ValidationError::CorrectOptionCount {
                question: position,
                found: correct,
            });
        }
    } else if !question.correct_answers.iter().any(|answer| !answer.trim().is_empty()) {
        errors.push(ValidationError::MissingCorrectAnswer { question: position });
    }

    if question.question_type == QuestionType::PictureResponse && !IMAGE_URL.is_match(&question.image_url) {
        errors.push(ValidationError::InvalidImageUrl { question: position });
    }

    if question.question_type == QuestionType::FillInTheBlank && !question.question_text.contains(BLANK_MARKER) {
        errors.push(ValidationError::MissingBlankMarker { question: position });
    }
}

/// Checks `draft` and builds its submission payload.
///
/// Reports the first broken rule only, the same one `violations` lists first.
/// In the payload each question carries only the fields of its type, with
/// blank correct answers dropped. `immediate_correction` is cleared for
/// single-page quizzes.
pub fn validate(draft: &DraftQuiz) -> Result<ValidatedQuiz, ValidationError> {
    if let Some(first) = violations(draft).into_iter().next() {
        return Err(first);
    }

    let payload = QuizPayload {
        title: draft.title.clone(),
        description: draft.description.clone(),
        randomize_questions: draft.randomize_questions,
        single_page: draft.single_page,
        immediate_correction: draft.immediate_correction && !draft.single_page,
        practice_mode: draft.practice_mode,
        questions: draft.questions.iter().map(DraftQuestion::to_payload).collect(),
    };

    Ok(ValidatedQuiz { payload })
}

/// Where a validated quiz is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(i64),
}

/// Sends a validated quiz to the backend and returns the quiz id to navigate to.
///
/// Backend rejections and transport failures are returned unchanged. The
/// caller keeps its draft, so a failed submission can simply be retried.
pub async fn submit<B>(
    backend: &B,
    target: SubmitTarget,
    quiz: &ValidatedQuiz,
    cancel: &CancelToken,
) -> Result<i64, ClientError>
where
    B: QuizBackend + ?Sized,
{
    let result = match target {
        SubmitTarget::Create => backend.create_quiz(quiz.payload(), cancel).await,
        SubmitTarget::Update(quiz_id) => backend
            .update_quiz(quiz_id, quiz.payload(), cancel)
            .await
            .map(|()| quiz_id),
    };

    match &result {
        Ok(quiz_id) => tracing::info!("Quiz '{}' saved as {}", quiz.payload().title, quiz_id),
        Err(ClientError::Cancelled) => {}
        Err(e) => tracing::error!("Failed to save quiz '{}': {}", quiz.payload().title, e),
    }

    result
}

/// Opens a fetched quiz for editing by `current_username`.
/// Only the quiz's creator may edit it.
pub fn draft_for_edit(detail: &QuizDetail, current_username: &str) -> Result<DraftQuiz, ClientError> {
    if detail.created_by.as_deref() != Some(current_username) {
        return Err(ClientError::Auth {
            status: 403,
            message: "You can only edit quizzes you created".to_string(),
        });
    }
    Ok(DraftQuiz::from_detail(detail))
}
