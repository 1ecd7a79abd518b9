//! # Services
//!
//! The caller-facing operations and the background aggregation loop.
//! [`BookingService`] owns the booking lifecycle, [`ReviewService`] gates
//! review submission on booking state, and [`RatingUpdater`] periodically
//! folds reviews into restaurant ratings.
//!
//! Both services front their reads with an
//! [`EntityCache`](store_actor::EntityCache) and invalidate it wholesale on
//! every mutation of their entity type.

mod booking;
mod rating;
mod review;

pub use booking::BookingService;
pub use rating::{CycleStats, RatingUpdater};
pub use review::ReviewService;
