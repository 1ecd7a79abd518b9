//! # Domain Errors
//!
//! Every failure a caller can observe is a variant of [`BookingError`] or
//! [`ReviewError`]. Each variant reports a coarse [`ErrorKind`], so an outer
//! layer (HTTP, RPC, a CLI) can pick a response signal without matching on
//! individual variants.
//!
//! Transport failures from the stores arrive as
//! [`StoreError`](store_actor::StoreError) and are wrapped via `#[from]`;
//! they all classify as [`ErrorKind::Unavailable`]. Business rejections are
//! terminal and are never retried.

use crate::model::{BookingId, BookingStatus, RestaurantId, ReviewId, UserId};
use store_actor::{PageRequestError, StoreError};
use thiserror::Error;

/// Coarse classification of a domain failure.
///
/// The kinds deliberately mirror the distinct response signals an outer
/// layer would need: missing resource, conflicting resource, state rule,
/// dangling reference, malformed input, and infrastructure trouble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed record does not exist.
    NotFound,
    /// A record with the same identity already exists.
    AlreadyExists,
    /// The request is well-formed but forbidden by the record's state.
    OperationNotAllowed,
    /// A foreign id embedded in the request does not resolve.
    ReferenceNotFound,
    /// The request itself is malformed.
    ValidationFailed,
    /// A store could not be reached or did not answer in time.
    Unavailable,
}

/// Failures of the booking lifecycle operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("booking {0} not found")]
    NotFound(BookingId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("restaurant {0} not found")]
    RestaurantNotFound(RestaurantId),

    /// The booking reached `COMPLETE`, which is terminal; every later patch
    /// is rejected whole.
    #[error("booking {0} is complete and can no longer change")]
    AlreadyComplete(BookingId),

    #[error("scheduled time {0} is in the past")]
    ScheduledInPast(chrono::DateTime<chrono::Utc>),

    #[error("invalid page request: {0}")]
    InvalidPage(#[from] PageRequestError),

    #[error("booking store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl BookingError {
    /// The taxonomy bucket this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::NotFound(_) => ErrorKind::NotFound,
            BookingError::UserNotFound(_) | BookingError::RestaurantNotFound(_) => {
                ErrorKind::ReferenceNotFound
            }
            BookingError::AlreadyComplete(_) => ErrorKind::OperationNotAllowed,
            BookingError::ScheduledInPast(_) | BookingError::InvalidPage(_) => {
                ErrorKind::ValidationFailed
            }
            BookingError::Store(_) => ErrorKind::Unavailable,
        }
    }
}

/// Failures of the review gate and review operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("review {0} not found")]
    NotFound(ReviewId),

    /// The booking already carries a live review. Raised both by the
    /// pre-check and by the store's conditional insert, so concurrent
    /// submissions for one booking produce exactly one review.
    #[error("booking {0} already has a review")]
    AlreadyReviewed(BookingId),

    /// Only completed bookings can be reviewed.
    #[error("booking {booking_id} is {status}; only COMPLETE bookings can be reviewed")]
    IllegalBookingState {
        booking_id: BookingId,
        status: BookingStatus,
    },

    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("restaurant {0} not found")]
    RestaurantNotFound(RestaurantId),

    /// Ratings live on a 0 to 10 scale, NaN excluded.
    #[error("rating {0} is outside the 0 to 10 range")]
    InvalidRating(f64),

    #[error("invalid page request: {0}")]
    InvalidPage(#[from] PageRequestError),

    #[error("review store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl ReviewError {
    /// The taxonomy bucket this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::NotFound(_) => ErrorKind::NotFound,
            ReviewError::AlreadyReviewed(_) => ErrorKind::AlreadyExists,
            ReviewError::IllegalBookingState { .. } => ErrorKind::OperationNotAllowed,
            ReviewError::BookingNotFound(_)
            | ReviewError::UserNotFound(_)
            | ReviewError::RestaurantNotFound(_) => ErrorKind::ReferenceNotFound,
            ReviewError::InvalidRating(_) | ReviewError::InvalidPage(_) => {
                ErrorKind::ValidationFailed
            }
            ReviewError::Store(_) => ErrorKind::Unavailable,
        }
    }
}
