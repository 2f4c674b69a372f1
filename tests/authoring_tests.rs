// tests/authoring_tests.rs

use quiz_client::{
    authoring::{self, draft_for_edit},
    error::{ClientError, ValidationError},
    models::{
        question::{AnswerOption, Question, QuestionType},
        quiz::{DraftQuiz, QuizDetail},
    },
};

/// A quiz that passes every rule: one question-response question.
fn valid_draft() -> DraftQuiz {
    let mut draft = DraftQuiz::new();
    draft.title = "Capitals".to_string();
    draft.description = "European capitals".to_string();
    let question = draft.question_mut(0).unwrap();
    question.question_text = "Capital of France?".to_string();
    question.set_correct_answer(0, "Paris").unwrap();
    draft
}

fn multiple_choice(draft: &mut DraftQuiz, index: usize) {
    let question = draft.question_mut(index).unwrap();
    question.change_question_type(QuestionType::MultipleChoice);
    question.set_option_text(0, "Paris").unwrap();
    question.set_option_text(1, "London").unwrap();
}

#[test]
fn new_draft_has_one_blank_question() {
    let draft = DraftQuiz::new();
    assert_eq!(draft.questions.len(), 1);
    assert!(draft.single_page);
    assert_eq!(draft.questions[0].question_type, QuestionType::QuestionResponse);
    assert_eq!(draft.questions[0].correct_answers, vec![String::new()]);
    assert_eq!(draft.questions[0].question_order, 1);
}

#[test]
fn valid_draft_passes() {
    let draft = valid_draft();
    assert!(draft.violations().is_empty());
    assert!(authoring::validate(&draft).is_ok());
}

#[test]
fn title_and_description_are_required() {
    let mut draft = valid_draft();
    draft.description.clear();
    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::MissingTitleOrDescription
    );
    assert_eq!(
        ValidationError::MissingTitleOrDescription.to_string(),
        "Title and description are required"
    );
}

#[test]
fn quiz_without_questions_is_rejected() {
    let mut draft = valid_draft();
    draft.questions.clear();
    assert_eq!(draft.validate().unwrap_err(), ValidationError::NoQuestions);
}

#[test]
fn duplicate_question_orders_are_rejected() {
    let mut draft = valid_draft();
    let second = draft.add_question();
    second.question_text = "Capital of Spain?".to_string();
    second.set_correct_answer(0, "Madrid").unwrap();
    second.question_order = 1;

    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::DuplicateQuestionOrder { order: 1 }
    );
}

#[test]
fn violations_are_listed_in_check_order() {
    let mut draft = DraftQuiz::new();
    draft.add_question().question_order = 1;

    let violations = draft.violations();
    assert_eq!(
        violations,
        vec![
            ValidationError::MissingTitleOrDescription,
            ValidationError::DuplicateQuestionOrder { order: 1 },
            ValidationError::MissingQuestionText { question: 1 },
            ValidationError::MissingCorrectAnswer { question: 1 },
            ValidationError::MissingQuestionText { question: 2 },
            ValidationError::MissingCorrectAnswer { question: 2 },
        ]
    );
    assert_eq!(draft.validate().unwrap_err(), violations[0]);
}

#[test]
fn whitespace_only_correct_answer_does_not_count() {
    let mut draft = valid_draft();
    draft.question_mut(0).unwrap().set_correct_answer(0, "   ").unwrap();
    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::MissingCorrectAnswer { question: 1 }
    );
}

#[test]
fn multiple_choice_needs_exactly_one_correct_option() {
    let mut draft = valid_draft();
    multiple_choice(&mut draft, 0);

    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::CorrectOptionCount { question: 1, found: 0 }
    );

    draft.question_mut(0).unwrap().set_option_correct(1).unwrap();
    assert!(draft.validate().is_ok());

    draft.question_mut(0).unwrap().set_option_incorrect(1).unwrap();
    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::CorrectOptionCount { question: 1, found: 0 }
    );
}

#[test]
fn multiple_choice_needs_two_options() {
    let mut draft = valid_draft();
    multiple_choice(&mut draft, 0);
    let question = draft.question_mut(0).unwrap();
    question.options = vec![AnswerOption::new("Paris", true)];

    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::TooFewOptions { question: 1 }
    );
}

#[test]
fn marking_an_option_correct_unmarks_the_others() {
    let mut draft = valid_draft();
    multiple_choice(&mut draft, 0);
    let question = draft.question_mut(0).unwrap();

    question.set_option_correct(0).unwrap();
    question.set_option_correct(1).unwrap();

    assert_eq!(
        question.options,
        vec![AnswerOption::new("Paris", false), AnswerOption::new("London", true)]
    );
}

#[test]
fn exactly_one_option_stays_correct_after_any_sequence() {
    let mut draft = valid_draft();
    multiple_choice(&mut draft, 0);
    let question = draft.question_mut(0).unwrap();
    question.add_option();
    question.add_option();

    for index in [2, 0, 3, 3, 1, 2] {
        question.set_option_correct(index).unwrap();
        let correct: Vec<usize> = question
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(correct, vec![index]);
    }

    assert_eq!(
        question.set_option_correct(9),
        Err(ValidationError::OptionIndexOutOfRange { index: 9 })
    );
}

#[test]
fn removing_one_of_two_options_is_refused() {
    let mut draft = valid_draft();
    multiple_choice(&mut draft, 0);
    let question = draft.question_mut(0).unwrap();
    let before = question.clone();

    assert_eq!(
        question.remove_option(0).unwrap_err(),
        ValidationError::MinimumOptionsViolation
    );
    assert_eq!(*question, before);

    question.add_option();
    let removed = question.remove_option(2).unwrap();
    assert_eq!(removed.text, "");
    assert_eq!(question.options.len(), 2);
}

#[test]
fn removing_the_last_correct_answer_is_refused() {
    let mut draft = valid_draft();
    let question = draft.question_mut(0).unwrap();

    assert_eq!(
        question.remove_correct_answer(0).unwrap_err(),
        ValidationError::MinimumAnswersViolation
    );
    assert_eq!(question.correct_answers, vec!["Paris".to_string()]);

    question.add_correct_answer();
    question.set_correct_answer(1, "paris").unwrap();
    assert_eq!(question.remove_correct_answer(0).unwrap(), "Paris");
    assert_eq!(question.correct_answers, vec!["paris".to_string()]);
}

#[test]
fn removing_the_only_question_is_refused() {
    let mut draft = valid_draft();
    assert_eq!(
        draft.remove_question(0).unwrap_err(),
        ValidationError::MinimumQuestionsViolation
    );
    assert_eq!(draft.questions.len(), 1);

    draft.add_question();
    assert_eq!(
        draft.remove_question(5).unwrap_err(),
        ValidationError::QuestionIndexOutOfRange { index: 5 }
    );
    draft.remove_question(1).unwrap();
    assert_eq!(draft.questions.len(), 1);
}

#[test]
fn changing_question_type_resets_answers() {
    let mut draft = valid_draft();
    let question = draft.question_mut(0).unwrap();

    question.change_question_type(QuestionType::MultipleChoice);
    assert!(question.correct_answers.is_empty());
    assert_eq!(question.options, vec![AnswerOption::default(), AnswerOption::default()]);

    question.set_option_text(0, "Paris").unwrap();
    question.change_question_type(QuestionType::MultipleChoice);
    assert_eq!(question.options[0].text, "Paris");

    question.change_question_type(QuestionType::FillInTheBlank);
    assert!(question.options.is_empty());
    assert_eq!(question.correct_answers, vec![String::new()]);
}

#[test]
fn picture_response_needs_http_image_url() {
    let mut draft = valid_draft();
    let question = draft.question_mut(0).unwrap();
    question.change_question_type(QuestionType::PictureResponse);
    question.set_correct_answer(0, "Eiffel Tower").unwrap();
    question.image_url = "ftp://x.png".to_string();

    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::InvalidImageUrl { question: 1 }
    );

    draft.question_mut(0).unwrap().image_url = "https://a.com/b.png".to_string();
    assert!(draft.validate().is_ok());
}

#[test]
fn fill_in_the_blank_needs_marker() {
    let mut draft = valid_draft();
    let question = draft.question_mut(0).unwrap();
    question.change_question_type(QuestionType::FillInTheBlank);
    question.set_correct_answer(0, "Paris").unwrap();
    question.question_text = "The capital is Paris.".to_string();

    assert_eq!(
        draft.validate().unwrap_err(),
        ValidationError::MissingBlankMarker { question: 1 }
    );

    draft.question_mut(0).unwrap().question_text = "The capital is ____.".to_string();
    assert!(draft.validate().is_ok());
}

#[test]
fn payload_carries_only_the_fields_of_each_type() {
    let mut draft = valid_draft();
    multiple_choice(&mut draft, 0);
    draft.question_mut(0).unwrap().set_option_correct(0).unwrap();

    let picture = draft.add_question();
    picture.question_text = "What is this?".to_string();
    picture.change_question_type(QuestionType::PictureResponse);
    picture.set_correct_answer(0, "Eiffel Tower").unwrap();
    picture.add_correct_answer();
    picture.image_url = "https://x/y.png".to_string();

    let validated = draft.validate().unwrap();
    let json = serde_json::to_value(validated.payload()).unwrap();

    let mc = &json["questions"][0];
    assert_eq!(mc["type"], "MULTIPLE_CHOICE");
    assert_eq!(mc["options"][0]["isCorrect"], true);
    assert!(mc.get("correctAnswers").is_none());
    assert!(mc.get("imageUrl").is_none());

    let pic = &json["questions"][1];
    assert_eq!(pic["type"], "PICTURE_RESPONSE");
    assert_eq!(pic["imageUrl"], "https://x/y.png");
    assert!(pic.get("options").is_none());
    // Blank answers are dropped
    assert_eq!(pic["correctAnswers"], serde_json::json!(["Eiffel Tower"]));
    assert_eq!(pic["questionOrder"], 2);
}

#[test]
fn immediate_correction_is_cleared_for_single_page() {
    let mut draft = valid_draft();
    draft.immediate_correction = true;

    draft.single_page = true;
    assert!(!draft.validate().unwrap().payload().immediate_correction);

    draft.single_page = false;
    assert!(draft.validate().unwrap().payload().immediate_correction);
}

fn detail(created_by: &str) -> QuizDetail {
    let mut mc: Question = serde_json::from_value(serde_json::json!({
        "id": 11,
        "questionText": "Capital of France?",
        "type": "MULTIPLE_CHOICE",
        "options": [
            { "id": 1, "text": "Paris", "isCorrect": true },
            { "id": 2, "text": "London", "isCorrect": false }
        ]
    }))
    .unwrap();
    mc.question_order = Some(1);

    let text: Question = serde_json::from_value(serde_json::json!({
        "id": 12,
        "questionText": "Capital of Spain?",
        "type": "QUESTION_RESPONSE",
        "correctAnswers": null
    }))
    .unwrap();

    QuizDetail {
        id: 7,
        title: "Capitals".to_string(),
        description: "European capitals".to_string(),
        created_by: Some(created_by.to_string()),
        questions: vec![mc, text],
        randomize_questions: false,
        single_page: false,
        immediate_correction: true,
        practice_mode: false,
    }
}

#[test]
fn edit_draft_keeps_ids_and_fills_gaps() {
    let draft = draft_for_edit(&detail("alice"), "alice").unwrap();

    assert!(!draft.single_page);
    assert_eq!(draft.questions[0].id, Some(11));
    assert!(draft.questions[0].correct_answers.is_empty());
    assert_eq!(draft.questions[0].options[0].id, Some(1));
    assert_eq!(draft.questions[1].correct_answers, vec![String::new()]);
    // Missing order falls back to position
    assert_eq!(draft.questions[1].question_order, 2);
}

#[test]
fn only_the_creator_may_edit() {
    match draft_for_edit(&detail("alice"), "bob") {
        Err(ClientError::Auth { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "You can only edit quizzes you created");
        }
        other => panic!("expected a 403, got {:?}", other.map(|d| d.title)),
    }
}
