// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::null_as_default;

/// Admin role name as reported by the backend.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// The signed-in user, cached by the session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: Option<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// Response of `GET /api/home`. `user` is null when not authenticated.
#[derive(Debug, Clone, Deserialize)]
pub struct HomeResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Minimal user reference (`GET /api/auth/user/{username}`, challenge parties).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
}

/// Response of login and register.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// DTO for user login.
#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "Password is required."))]
    pub password: String,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// Row of `GET /api/admin/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

/// Site-wide counters of `GET /api/admin/statistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quizzes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quizzes_taken: i64,
}
