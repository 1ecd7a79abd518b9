//! # maitred
//!
//! Core of a restaurant booking platform. Bookings move through a small
//! state machine (`PENDING`, `CONFIRMED`, then the absorbing `COMPLETE`),
//! each completed booking unlocks exactly one review, and a background loop
//! folds review ratings into per-restaurant averages.
//!
//! Every entity lives in its own store actor (see the `store-actor` crate).
//! [`Platform`] wires the actors, the services and the aggregation loop
//! together and is the intended entry point; the modules below are exposed
//! for integration testing.

pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod service;
pub mod stores;

pub use config::{PlatformConfig, RatingConfig};
pub use error::{BookingError, ErrorKind, ReviewError};
pub use platform::Platform;
