// src/api/challenges.rs

use std::sync::Arc;

use reqwest::Method;
use tokio::{sync::Semaphore, task::JoinSet};
use validator::Validate;

use crate::{
    api::ApiClient,
    error::ClientError,
    models::social::{Challenge, ChallengeStanding, SendChallengeRequest},
    utils::cancel::CancelToken,
};

impl ApiClient {
    /// Challenges `challenged_username` to beat `challenger_username` on a quiz.
    pub async fn send_challenge(
        &self,
        challenger_username: &str,
        challenged_username: &str,
        quiz_id: i64,
        cancel: &CancelToken,
    ) -> Result<Challenge, ClientError> {
        let payload = SendChallengeRequest {
            challenger_username: challenger_username.to_string(),
            challenged_username: challenged_username.to_string(),
            quiz_id: quiz_id.to_string(),
        };
        payload.validate()?;

        let url = self.endpoint(&["api", "challenges", "send"])?;
        self.send_json(Method::POST, url, &payload, cancel).await
    }

    pub async fn challenges_for_user(&self, username: &str, cancel: &CancelToken) -> Result<Vec<Challenge>, ClientError> {
        let url = self.endpoint(&["api", "challenges", "for-user", username])?;
        self.get_json(url, cancel).await
    }

    pub async fn unseen_challenges(&self, username: &str, cancel: &CancelToken) -> Result<Vec<Challenge>, ClientError> {
        let url = self.endpoint(&["api", "challenges", "unseen", username])?;
        self.get_json(url, cancel).await
    }

    pub async fn mark_challenge_seen(&self, challenge_id: i64, cancel: &CancelToken) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "challenges", &challenge_id.to_string(), "mark-seen"])?;
        self.send_empty(Method::PUT, url, cancel).await?;
        Ok(())
    }

    /// Best score of `challenger_username` on a quiz, `None` if they never completed it.
    pub async fn challenger_best_score(
        &self,
        quiz_id: i64,
        challenger_username: &str,
        cancel: &CancelToken,
    ) -> Result<Option<i64>, ClientError> {
        let url = self.endpoint(&[
            "api",
            "challenges",
            "challenger-best-score",
            &quiz_id.to_string(),
            challenger_username,
        ])?;
        self.get_json(url, cancel).await
    }

    /// Pairs each challenge with its challenger's best score.
    ///
    /// At most `limit` lookups are in flight at once. A failed lookup leaves that
    /// challenge's score as `None` without affecting the others. Output order
    /// matches input order.
    pub async fn challenges_with_best_scores(
        &self,
        challenges: Vec<Challenge>,
        limit: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<ChallengeStanding>, ClientError> {
        let semaphore = Arc::new(Semaphore::new(limit.max(1)));
        let mut tasks = JoinSet::new();

        for (index, challenge) in challenges.iter().enumerate() {
            let client = self.clone();
            let cancel = cancel.clone();
            let semaphore = Arc::clone(&semaphore);
            let quiz_id = challenge.quiz.id;
            let challenger = challenge.challenger.username.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (index, Err(ClientError::Cancelled)),
                };
                let score = client.challenger_best_score(quiz_id, &challenger, &cancel).await;
                (index, score)
            });
        }

        let mut scores: Vec<Option<i64>> = vec![None; challenges.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(score))) => scores[index] = score,
                Ok((_, Err(ClientError::Cancelled))) => {}
                Ok((index, Err(e))) => {
                    tracing::warn!(
                        "Failed to load best score for challenge {}: {}",
                        challenges[index].id,
                        e
                    );
                }
                Err(e) => tracing::warn!("Best-score lookup task failed: {}", e),
            }
        }

        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        Ok(challenges
            .into_iter()
            .zip(scores)
            .map(|(challenge, challenger_best_score)| ChallengeStanding {
                challenge,
                challenger_best_score,
            })
            .collect())
    }
}
