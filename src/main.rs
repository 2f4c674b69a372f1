// src/main.rs

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use quiz_client::{
    config::Config,
    error::ClientError,
    models::{
        attempt::AttemptRecord,
        question::{Question, QuestionType},
    },
    session::{PrimaryAction, QuizSession},
    state::SessionContext,
    utils::{
        cancel::CancelToken,
        format::{format_minutes, format_percentage},
    },
    ApiClient,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal client for the quiz backend
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List all quizzes
    Quizzes,
    /// Take a quiz
    Take {
        quiz_id: i64,
        /// Attempt does not count towards scores
        #[arg(long)]
        practice: bool,
    },
    /// Show statistics and leaderboards for a quiz
    Summary { quiz_id: i64 },
    /// Show friends and pending friend requests
    Friends,
    /// Show challenges with the challenger's best score
    Challenges,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "quiz-client.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Ctrl-C cancels whatever is in flight
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling...");
                cancel.cancel();
            }
        });
    }

    let code = match run(config, cli.command, &cancel).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{}", e);
            1
        }
    };

    // Flush the file writer before exiting
    drop(guard);
    std::process::exit(code);
}

async fn run(config: Config, command: Command, cancel: &CancelToken) -> Result<(), ClientError> {
    let context = SessionContext::new(config)?;

    if let (Some(username), Some(password)) = (&context.config.username, &context.config.password) {
        context.login(username, password, cancel).await?;
    }

    match command {
        Command::Quizzes => list_quizzes(&context, cancel).await,
        Command::Take { quiz_id, practice } => take_quiz(&context, quiz_id, practice, cancel).await,
        Command::Summary { quiz_id } => show_summary(&context, quiz_id, cancel).await,
        Command::Friends => show_friends(&context, cancel).await,
        Command::Challenges => show_challenges(&context, cancel).await,
    }
}

async fn list_quizzes(context: &SessionContext, cancel: &CancelToken) -> Result<(), ClientError> {
    let quizzes = context.api.list_quizzes(cancel).await?;
    if quizzes.is_empty() {
        println!("No quizzes yet.");
    }
    for quiz in quizzes {
        println!(
            "[{}] {} by {}\n    {}",
            quiz.id,
            quiz.title,
            quiz.created_by.as_deref().unwrap_or("unknown"),
            quiz.description
        );
    }
    Ok(())
}

async fn take_quiz(
    context: &SessionContext,
    quiz_id: i64,
    practice: bool,
    cancel: &CancelToken,
) -> Result<(), ClientError> {
    let mut session = context.quiz_session(practice);
    session.load(quiz_id, cancel).await?;

    if let Some(quiz) = session.quiz() {
        println!("{}\n{}\n", quiz.title, quiz.description);
    }
    if practice {
        println!("Practice mode: this attempt does not count.\n");
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    if session.is_paginated() {
        answer_paginated(&mut session, &mut input, cancel).await?;
    } else {
        answer_single_page(&mut session, &mut input, cancel).await?;
    }

    loop {
        match session.submit(cancel).await {
            Ok(result) => {
                println!(
                    "\nScore: {}/{} ({})",
                    result.score,
                    result.total_questions,
                    format_percentage(result.percentage)
                );
                println!("Time: {}", format_minutes(result.time_taken));
                return Ok(());
            }
            Err(e) if e.is_retryable() => {
                println!("{} Press Enter to retry, or type :quit.", e);
                match read_line(&mut input, cancel).await?.as_deref() {
                    Some(":quit") | None => return Err(e),
                    Some(_) => continue,
                }
            }
            Err(e) => return Err(e),
        }
    }
}

async fn answer_single_page(
    session: &mut QuizSession<ApiClient>,
    input: &mut Lines<BufReader<Stdin>>,
    cancel: &CancelToken,
) -> Result<(), ClientError> {
    let questions = session.visible_questions().to_vec();
    for (index, question) in questions.iter().enumerate() {
        println!("{}. ", index + 1);
        print_question(question);
        if let Some(line) = read_line(input, cancel).await? {
            session.set_answer(question.id, resolve_answer(question, &line))?;
        }
    }
    println!("{} of {} answered.", session.answered_count(), questions.len());
    Ok(())
}

/// One question per page. An answer (or an empty line to keep the current one)
/// moves on; `:prev` and `:next` navigate. Returns once the last page is answered.
async fn answer_paginated(
    session: &mut QuizSession<ApiClient>,
    input: &mut Lines<BufReader<Stdin>>,
    cancel: &CancelToken,
) -> Result<(), ClientError> {
    loop {
        let Some(question) = session.current_question().cloned() else {
            return Ok(());
        };

        println!(
            "\nQuestion {} of {} ({:.0}%)",
            session.current_index() + 1,
            session.questions().len(),
            session.progress()
        );
        print_question(&question);
        if let Some(answer) = session.answer(question.id) {
            println!("(current answer: {})", answer);
        }
        let options = if session.previous_enabled() { ":prev, :next" } else { ":next" };
        println!("[{}] {}", options, session.primary_action().label());

        let Some(line) = read_line(input, cancel).await? else {
            return Err(ClientError::InvalidInput("Input closed before the quiz was finished".to_string()));
        };

        match line.as_str() {
            ":prev" => {
                session.previous()?;
                continue;
            }
            ":next" | "" => {}
            text => session.set_answer(question.id, resolve_answer(&question, text))?,
        }

        if !session.primary_enabled() {
            println!("Answer the question first.");
            continue;
        }

        match session.primary_action() {
            PrimaryAction::SubmitQuiz => return Ok(()),
            PrimaryAction::Next if session.immediate_correction() => {
                let feedback = session.advance_with_feedback(cancel).await?;
                println!("{}", feedback.label());
            }
            PrimaryAction::Next => {
                session.next()?;
            }
        }
    }
}

fn print_question(question: &Question) {
    match question.question_type {
        QuestionType::FillInTheBlank => println!("Fill in the blank: {}", question.question_text),
        _ => println!("{}", question.question_text),
    }
    if let Some(url) = question.image_url.as_deref().filter(|url| !url.is_empty()) {
        println!("Image: {}", url);
    }
    if question.question_type.is_multiple_choice() {
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option.text);
        }
    }
}

/// Multiple-choice answers may be given by option number; the option text is sent.
fn resolve_answer(question: &Question, line: &str) -> String {
    if question.question_type.is_multiple_choice() {
        if let Some(option) = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.options.get(i))
        {
            return option.text.clone();
        }
    }
    line.to_string()
}

/// Next trimmed input line, `None` at end of input.
async fn read_line(
    input: &mut Lines<BufReader<Stdin>>,
    cancel: &CancelToken,
) -> Result<Option<String>, ClientError> {
    let line = cancel
        .run(input.next_line())
        .await?
        .map_err(|e| ClientError::InvalidInput(format!("Failed to read input: {}", e)))?;
    Ok(line.map(|line| line.trim().to_string()))
}

async fn show_summary(context: &SessionContext, quiz_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
    let quiz = context.api.get_quiz(quiz_id, cancel).await?;
    let board = context.api.quiz_board(quiz_id, cancel).await?;

    println!("{}\n{}", quiz.title, quiz.description);
    if let Some(creator) = &quiz.created_by {
        println!("Created by {}", creator);
    }
    println!("{} questions", quiz.questions.len());

    match &board.statistics {
        Some(stats) => {
            println!("\nStatistics");
            println!("  Attempts:      {}", stats.total_attempts);
            println!("  Average score: {}", format_percentage(stats.average_score));
            println!("  Average time:  {}", format_minutes(stats.average_time));
            println!("  Highest score: {}", stats.highest_score);
        }
        None => println!("\nStatistics unavailable"),
    }

    print_attempts("Top scores", &board.top_scores);
    print_attempts("Top scores today", &board.top_scores_today);
    print_attempts("Recent attempts", &board.recent);
    Ok(())
}

fn print_attempts(heading: &str, attempts: &[AttemptRecord]) {
    println!("\n{}", heading);
    if attempts.is_empty() {
        println!("  none");
        return;
    }
    for (rank, attempt) in attempts.iter().enumerate() {
        let score = match (attempt.score, attempt.total_questions) {
            (Some(score), Some(total)) => format!("{}/{}", score, total),
            (Some(score), None) => score.to_string(),
            _ => "-".to_string(),
        };
        let percentage = attempt.percentage.map(format_percentage).unwrap_or_else(|| "-".to_string());
        let time = attempt
            .time_taken_minutes
            .map(|minutes| format_minutes(minutes as f64))
            .unwrap_or_else(|| "--".to_string());
        let when = attempt
            .end_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {}. {} ({}) {} {}", rank + 1, score, percentage, time, when);
    }
}

async fn show_friends(context: &SessionContext, cancel: &CancelToken) -> Result<(), ClientError> {
    context.require_user().await?;

    let (friends, requests) = tokio::join!(
        context.api.friends(cancel),
        context.api.pending_friend_requests(cancel),
    );

    println!("Friends");
    let friends = friends?;
    if friends.is_empty() {
        println!("  none");
    }
    for friend in friends {
        println!("  {}", friend);
    }

    println!("\nPending requests");
    match requests {
        Ok(requests) if requests.is_empty() => println!("  none"),
        Ok(requests) => {
            for request in requests {
                println!("  [{}] from {}", request.id, request.requester_username);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load friend requests: {}", e);
            println!("  unavailable");
        }
    }
    Ok(())
}

async fn show_challenges(context: &SessionContext, cancel: &CancelToken) -> Result<(), ClientError> {
    let user = context.require_user().await?;

    let challenges = context.api.challenges_for_user(&user.username, cancel).await?;
    let standings = context
        .api
        .challenges_with_best_scores(challenges, context.config.fan_out_limit, cancel)
        .await?;

    if standings.is_empty() {
        println!("No challenges.");
    }
    for standing in standings {
        let challenge = &standing.challenge;
        let score = standing
            .challenger_best_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "[{}] {} challenged you on '{}' (quiz {}), best score {}, {:?}{}",
            challenge.id,
            challenge.challenger.username,
            challenge.quiz.title,
            challenge.quiz.id,
            score,
            challenge.status,
            if challenge.seen { "" } else { " (new)" }
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_parses_id_and_practice_flag() {
        let cli = Cli::try_parse_from(["quiz-client", "take", "7", "--practice"]).unwrap();
        assert_eq!(cli.command, Command::Take { quiz_id: 7, practice: true });

        let cli = Cli::try_parse_from(["quiz-client", "take", "7"]).unwrap();
        assert_eq!(cli.command, Command::Take { quiz_id: 7, practice: false });
    }

    #[test]
    fn summary_requires_numeric_id() {
        let cli = Cli::try_parse_from(["quiz-client", "summary", "12"]).unwrap();
        assert_eq!(cli.command, Command::Summary { quiz_id: 12 });

        assert!(Cli::try_parse_from(["quiz-client", "summary", "twelve"]).is_err());
        assert!(Cli::try_parse_from(["quiz-client", "summary"]).is_err());
    }

    #[test]
    fn unknown_or_missing_command_is_rejected() {
        assert!(Cli::try_parse_from(["quiz-client"]).is_err());
        assert!(Cli::try_parse_from(["quiz-client", "grades"]).is_err());
        assert!(Cli::try_parse_from(["quiz-client", "quizzes"]).is_ok());
    }
}
