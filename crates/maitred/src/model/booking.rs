//! Booking entity and its state machine.
//!
//! A booking moves through `PENDING`, `CONFIRMED` and `COMPLETE`.
//! Transitions are caller-driven with one hard rule: `COMPLETE` is
//! absorbing. The rule is enforced in [`Booking::apply_patch`], which runs
//! inside the store actor's message loop, so the status check and the field
//! application are one atomic step.

use super::{BookingId, RestaurantId, RestaurantView, UserId, UserView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use store_actor::{SortField, StoreEntity, UnknownSortField};
use thiserror::Error;

/// Lifecycle state of a booking.
///
/// Declaration order doubles as sort order: `PENDING < CONFIRMED <
/// COMPLETE`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Complete,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelled = match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Complete => "COMPLETE",
        };
        write!(f, "{spelled}")
    }
}

/// A table booking. References its user and restaurant by id; the review
/// back-reference lives in the review store's unique booking-id index, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub scheduled_at: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Payload for creating a booking. `status` defaults to `PENDING` when
/// omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub scheduled_at: DateTime<Utc>,
    pub status: Option<BookingStatus>,
}

/// Partial update of a booking. Omitted fields are left untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BookingPatch {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
}

/// Patch rejection raised once a booking has reached `COMPLETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("booking is complete and can no longer change")]
pub struct BookingLocked;

/// Booking as returned to callers, with both references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: BookingId,
    pub user: UserView,
    pub restaurant: RestaurantView,
    pub scheduled_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl BookingView {
    pub fn new(booking: Booking, user: UserView, restaurant: RestaurantView) -> Self {
        Self {
            id: booking.id,
            user,
            restaurant,
            scheduled_at: booking.scheduled_at,
            status: booking.status,
        }
    }
}

/// Sort fields accepted when listing bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookingSortField {
    #[default]
    Id,
    ScheduledAt,
    Status,
}

impl FromStr for BookingSortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "scheduled_at" => Ok(Self::ScheduledAt),
            "status" => Ok(Self::Status),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

impl SortField for BookingSortField {
    fn names() -> &'static [&'static str] {
        &["id", "scheduled_at", "status"]
    }
}

impl StoreEntity for Booking {
    type Id = BookingId;
    type Draft = BookingCreate;
    type Patch = BookingPatch;
    type SortField = BookingSortField;
    type Filter = ();
    type UniqueKey = ();
    type Error = BookingLocked;

    fn from_draft(id: BookingId, draft: BookingCreate) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            restaurant_id: draft.restaurant_id,
            scheduled_at: draft.scheduled_at,
            status: draft.status.unwrap_or_default(),
        }
    }

    fn id(&self) -> BookingId {
        self.id
    }

    /// Rejected whole once the booking is `COMPLETE`, even when the patch
    /// would re-set `COMPLETE`.
    fn apply_patch(&mut self, patch: BookingPatch) -> Result<(), BookingLocked> {
        if self.status == BookingStatus::Complete {
            return Err(BookingLocked);
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            self.scheduled_at = scheduled_at;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn compare(&self, other: &Self, field: BookingSortField) -> Ordering {
        match field {
            BookingSortField::Id => self.id.cmp(&other.id),
            BookingSortField::ScheduledAt => self.scheduled_at.cmp(&other.scheduled_at),
            BookingSortField::Status => self.status.cmp(&other.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(status: Option<BookingStatus>) -> BookingCreate {
        BookingCreate {
            user_id: UserId(1),
            restaurant_id: RestaurantId(1),
            scheduled_at: Utc::now(),
            status,
        }
    }

    #[test]
    fn status_defaults_to_pending() {
        let booking = Booking::from_draft(BookingId(1), draft(None));
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn caller_supplied_status_survives_creation() {
        let booking = Booking::from_draft(BookingId(1), draft(Some(BookingStatus::Complete)));
        assert_eq!(booking.status, BookingStatus::Complete);
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let mut booking = Booking::from_draft(BookingId(1), draft(None));
        let original_time = booking.scheduled_at;

        booking
            .apply_patch(BookingPatch {
                scheduled_at: None,
                status: Some(BookingStatus::Confirmed),
            })
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.scheduled_at, original_time);
    }

    #[test]
    fn complete_is_absorbing() {
        let mut booking = Booking::from_draft(BookingId(1), draft(Some(BookingStatus::Complete)));
        let before = booking.clone();

        // Even re-setting COMPLETE is rejected.
        let result = booking.apply_patch(BookingPatch {
            scheduled_at: Some(Utc::now()),
            status: Some(BookingStatus::Complete),
        });

        assert_eq!(result, Err(BookingLocked));
        assert_eq!(booking, before);
    }

    #[test]
    fn patch_may_enter_complete() {
        let mut booking = Booking::from_draft(BookingId(1), draft(Some(BookingStatus::Confirmed)));

        booking
            .apply_patch(BookingPatch {
                scheduled_at: None,
                status: Some(BookingStatus::Complete),
            })
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Complete);
    }

    #[test]
    fn sort_fields_parse_from_wire_names() {
        assert_eq!("id".parse::<BookingSortField>(), Ok(BookingSortField::Id));
        assert_eq!(
            "scheduled_at".parse::<BookingSortField>(),
            Ok(BookingSortField::ScheduledAt)
        );
        assert_eq!(
            "status".parse::<BookingSortField>(),
            Ok(BookingSortField::Status)
        );
        assert!("sheduled_at".parse::<BookingSortField>().is_err());
    }

    #[test]
    fn statuses_order_by_lifecycle_progress() {
        assert!(BookingStatus::Pending < BookingStatus::Confirmed);
        assert!(BookingStatus::Confirmed < BookingStatus::Complete);
    }
}
