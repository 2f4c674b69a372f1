// src/utils/cancel.rs

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Abort handle passed into every async operation.
///
/// Clones share the same state. Once cancelled, a token stays cancelled.
/// Responses arriving after cancellation are dropped, never applied.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: CancellationToken,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Resolves once `cancel` has been called on this token or any clone.
    pub async fn cancelled(&self) {
        self.inner.cancelled().await;
    }

    /// Drives `fut` to completion unless the token fires first.
    ///
    /// Cancellation is checked before the future on every poll, so an output
    /// that becomes ready after `cancel` is discarded.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, ClientError>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.inner.cancelled() => Err(ClientError::Cancelled),
            output = fut => {
                if self.is_cancelled() {
                    Err(ClientError::Cancelled)
                } else {
                    Ok(output)
                }
            }
        }
    }
}
