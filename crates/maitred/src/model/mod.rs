//! # Domain Model
//!
//! Pure data types for the four entities the platform manages. Each entity
//! implements [`StoreEntity`](store_actor::StoreEntity) so a
//! [`StoreActor`](store_actor::StoreActor) can own it, and each ships with
//! its create payload, its patch payload, and the view type callers get
//! back.
//!
//! Identifiers are `u64` newtypes assigned by the owning store from a
//! monotonic counter starting at 1. Views resolve references one level deep:
//! a [`BookingView`] embeds the [`UserView`] and [`RestaurantView`] it
//! points at instead of bare ids.

mod booking;
mod restaurant;
mod review;
mod user;

pub use booking::{
    Booking, BookingCreate, BookingLocked, BookingPatch, BookingSortField, BookingStatus,
    BookingView,
};
pub use restaurant::{
    Restaurant, RestaurantCreate, RestaurantPatch, RestaurantSortField, RestaurantView,
};
pub use review::{
    Review, ReviewCreate, ReviewDraft, ReviewFilter, ReviewPatch, ReviewSortField, ReviewView,
};
pub use user::{User, UserCreate, UserPatch, UserSortField, UserView};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a [`Booking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

/// Identity of a [`Review`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub u64);

/// Identity of a [`Restaurant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub u64);

/// Identity of a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for BookingId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u64> for ReviewId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u64> for RestaurantId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
