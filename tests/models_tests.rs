// tests/models_tests.rs

use quiz_client::models::{
    attempt::{QuizResult, QuizStatistics},
    question::{Question, QuestionType},
    quiz::{QuizDetail, QuizSummary},
    social::{Challenge, ChallengeStatus},
};

#[test]
fn quiz_summary_with_null_description_decodes() {
    let summary: QuizSummary = serde_json::from_str(
        r#"{"id":3,"title":"Rivers","description":null,"createdBy":"alice"}"#,
    )
    .unwrap();

    assert_eq!(summary.title, "Rivers");
    assert_eq!(summary.description, "");
}

#[test]
fn quiz_list_survives_one_sparse_row() {
    let quizzes: Vec<QuizSummary> = serde_json::from_str(
        r#"[
            {"id":1,"title":"Capitals","description":"Europe"},
            {"id":2,"title":null,"description":null,"createdBy":null}
        ]"#,
    )
    .unwrap();

    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[1].title, "");
    assert_eq!(quizzes[1].created_by, None);
}

#[test]
fn quiz_detail_with_null_fields_decodes() {
    let detail: QuizDetail = serde_json::from_str(
        r#"{
            "id":4,
            "title":"Capitals",
            "description":null,
            "questions":[
                {"id":10,"questionText":null,"type":null,"options":null,"correctAnswers":null}
            ],
            "randomizeQuestions":null,
            "singlePage":null,
            "immediateCorrection":null,
            "practiceMode":null
        }"#,
    )
    .unwrap();

    assert_eq!(detail.description, "");
    assert!(detail.single_page);
    assert!(!detail.immediate_correction);

    let question = &detail.questions[0];
    assert_eq!(question.question_text, "");
    assert_eq!(question.question_type, QuestionType::QuestionResponse);
    assert!(question.options.is_empty());
    assert_eq!(question.correct_answers, None);
}

#[test]
fn question_with_null_type_falls_back_to_free_text() {
    let question: Question =
        serde_json::from_str(r#"{"id":7,"questionText":"Why?","type":null}"#).unwrap();
    assert_eq!(question.question_type, QuestionType::QuestionResponse);
}

#[test]
fn unknown_question_type_is_still_rejected() {
    let decoded = serde_json::from_str::<Question>(r#"{"id":7,"type":"ESSAY"}"#);
    assert!(decoded.is_err());
}

#[test]
fn result_and_statistics_with_null_numbers_decode() {
    let result: QuizResult = serde_json::from_str(
        r#"{"attemptId":5,"score":null,"totalQuestions":3,"percentage":null,"timeTaken":null,"completed":true}"#,
    )
    .unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.total_questions, 3);

    let stats: QuizStatistics = serde_json::from_str(
        r#"{"totalAttempts":0,"averageScore":null,"averageTime":null,"highestScore":null}"#,
    )
    .unwrap();
    assert_eq!(stats, QuizStatistics::default());
}

#[test]
fn challenge_with_null_flags_decodes() {
    let challenge: Challenge = serde_json::from_str(
        r#"{
            "id":1,
            "challenger":{"id":2,"username":"bob"},
            "challenged":{"id":3,"username":"alice"},
            "quiz":{"id":4,"title":null},
            "seen":null,
            "status":null
        }"#,
    )
    .unwrap();

    assert!(!challenge.seen);
    assert_eq!(challenge.status, ChallengeStatus::Pending);
    assert_eq!(challenge.quiz.title, "");
}
