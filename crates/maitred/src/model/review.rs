//! Review entity.
//!
//! A review belongs to exactly one booking, and each booking carries at most
//! one live review. The booking id is the entity's unique key, so the store
//! actor's index enforces the 1:1 rule at insert time; deleting a review
//! frees the slot again.

use super::{BookingId, RestaurantId, RestaurantView, ReviewId, UserId, UserView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;
use store_actor::{SortField, StoreEntity, UnknownSortField};

/// A diner's review of a completed booking. Keeps redundant user and
/// restaurant references for query convenience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    /// 0 to 10 inclusive; bounds are checked before the store is touched.
    pub rating: f64,
    pub comment: String,
    /// Stamped by the system at insert time, never caller-supplied.
    pub created_at: DateTime<Utc>,
}

/// Caller-facing payload for submitting a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub rating: f64,
    pub comment: String,
}

/// What actually goes to the store: the caller's payload plus the creation
/// timestamp the service stamped on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewDraft {
    pub fn new(create: ReviewCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            booking_id: create.booking_id,
            user_id: create.user_id,
            restaurant_id: create.restaurant_id,
            rating: create.rating,
            comment: create.comment,
            created_at,
        }
    }
}

/// Partial update of a review. Omitted fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

/// Review as returned to callers, with both references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: ReviewId,
    pub booking_id: BookingId,
    pub user: UserView,
    pub restaurant: RestaurantView,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewView {
    pub fn new(review: Review, user: UserView, restaurant: RestaurantView) -> Self {
        Self {
            id: review.id,
            booking_id: review.booking_id,
            user,
            restaurant,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// Predicates the review store can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFilter {
    /// Every review referencing the given restaurant, in id order. The
    /// aggregation loop averages over this set.
    ForRestaurant(RestaurantId),
}

/// Sort fields accepted when listing reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReviewSortField {
    #[default]
    Id,
    Rating,
    CreatedAt,
}

impl FromStr for ReviewSortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "rating" => Ok(Self::Rating),
            "created_at" => Ok(Self::CreatedAt),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

impl SortField for ReviewSortField {
    fn names() -> &'static [&'static str] {
        &["id", "rating", "created_at"]
    }
}

impl StoreEntity for Review {
    type Id = ReviewId;
    type Draft = ReviewDraft;
    type Patch = ReviewPatch;
    type SortField = ReviewSortField;
    type Filter = ReviewFilter;
    type UniqueKey = BookingId;
    type Error = Infallible;

    fn from_draft(id: ReviewId, draft: ReviewDraft) -> Self {
        Self {
            id,
            booking_id: draft.booking_id,
            user_id: draft.user_id,
            restaurant_id: draft.restaurant_id,
            rating: draft.rating,
            comment: draft.comment,
            created_at: draft.created_at,
        }
    }

    fn id(&self) -> ReviewId {
        self.id
    }

    fn apply_patch(&mut self, patch: ReviewPatch) -> Result<(), Infallible> {
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
        Ok(())
    }

    fn unique_key(&self) -> Option<BookingId> {
        Some(self.booking_id)
    }

    fn matches(&self, filter: &ReviewFilter) -> bool {
        match filter {
            ReviewFilter::ForRestaurant(restaurant_id) => self.restaurant_id == *restaurant_id,
        }
    }

    fn compare(&self, other: &Self, field: ReviewSortField) -> Ordering {
        match field {
            ReviewSortField::Id => self.id.cmp(&other.id),
            ReviewSortField::Rating => self.rating.total_cmp(&other.rating),
            ReviewSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
