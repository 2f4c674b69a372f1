// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Delay between an immediate-correction flash and the next question.
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1200;

/// Row limit for the top-score, today and recent lists on the quiz board.
pub const BOARD_LIST_LIMIT: u32 = 5;

pub const DEFAULT_FAN_OUT_LIMIT: usize = 4;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub rust_log: String,
    pub log_dir: String,
    pub feedback_delay_ms: u64,
    /// Ask the backend `/check` endpoint for immediate-correction feedback
    /// instead of acknowledging locally.
    pub server_feedback: bool,
    /// Maximum concurrent requests for per-item fan-out lookups.
    pub fan_out_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_base_url = env::var("QUIZ_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let username = env::var("QUIZ_USERNAME").ok().filter(|v| !v.is_empty());
        let password = env::var("QUIZ_PASSWORD").ok().filter(|v| !v.is_empty());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("QUIZ_LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let feedback_delay_ms = env::var("QUIZ_FEEDBACK_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FEEDBACK_DELAY_MS);

        let server_feedback = env::var("QUIZ_SERVER_FEEDBACK")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let fan_out_limit = env::var("QUIZ_FAN_OUT_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|limit: &usize| *limit > 0)
            .unwrap_or(DEFAULT_FAN_OUT_LIMIT);

        Self {
            api_base_url,
            username,
            password,
            rust_log,
            log_dir,
            feedback_delay_ms,
            server_feedback,
            fan_out_limit,
        }
    }

    /// Same defaults as `from_env` with the given base URL, without reading
    /// the environment.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            username: None,
            password: None,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            server_feedback: true,
            fan_out_limit: DEFAULT_FAN_OUT_LIMIT,
        }
    }
}
