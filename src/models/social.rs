// src/models/social.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{null_as_default, user::UserRef};

/// Pending friend request addressed to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub id: i64,
    pub requester_username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub sender_username: String,
    pub receiver_username: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

/// DTO for `POST /api/messages/send`.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 50, message = "Receiver is required."))]
    pub receiver_username: String,
    #[validate(length(min = 1, max = 2000, message = "Message must be between 1 and 2000 characters."))]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Completed,
}

/// Quiz reference embedded in a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeQuiz {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: i64,
    pub challenger: UserRef,
    pub challenged: UserRef,
    pub quiz: ChallengeQuiz,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seen: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ChallengeStatus,
}

/// A challenge paired with the challenger's best score on its quiz.
/// `None` when the score lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeStanding {
    pub challenge: Challenge,
    pub challenger_best_score: Option<i64>,
}

/// DTO for `POST /api/challenges/send`. The backend expects every field as a string.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendChallengeRequest {
    #[validate(length(min = 1, max = 50))]
    pub challenger_username: String,
    #[validate(length(min = 1, max = 50, message = "Please select a friend to challenge."))]
    pub challenged_username: String,
    pub quiz_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// DTO for `POST /api/admin/announcements`.
#[derive(Debug, Serialize, Validate)]
pub struct AnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters."))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Content must be between 1 and 5000 characters."))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// An achievement awarded to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAchievement {
    pub id: i64,
    pub achievement: Achievement,
}
