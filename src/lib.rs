// src/lib.rs

pub mod api;
pub mod authoring;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod state;
pub mod utils;

pub use api::{ApiClient, QuizBackend};
pub use error::{ClientError, ValidationError};
pub use state::SessionContext;
pub use utils::cancel::CancelToken;
