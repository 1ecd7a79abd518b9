//! # Store Errors
//!
//! Transport-level failures shared by every store client. Domain rejections
//! never appear here: they travel typed inside [`PatchOutcome`] and
//! [`InsertOutcome`] replies instead, so callers match on them without
//! downcasting.
//!
//! [`PatchOutcome`]: crate::message::PatchOutcome
//! [`InsertOutcome`]: crate::message::InsertOutcome

use std::time::Duration;

/// Errors that can occur while talking to a store actor.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The actor's channel is closed; the store task has exited.
    #[error("store closed")]
    Closed,
    /// The actor dropped the reply channel without answering.
    #[error("store dropped the reply channel")]
    Dropped,
    /// The call did not complete within the per-call timeout.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// Whether a fresh attempt could succeed. Only timeouts qualify: a
    /// closed or dropped channel never comes back.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Timeout(_))
    }
}
