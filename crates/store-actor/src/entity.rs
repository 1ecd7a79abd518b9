//! # StoreEntity Trait
//!
//! The `StoreEntity` trait is the contract every record type (Booking,
//! Review, Restaurant, ...) must implement to be managed by the generic
//! [`StoreActor`](crate::StoreActor). It specifies associated types for ids,
//! drafts, patches, sort fields, filters, and unique keys, plus the handful
//! of pure methods the actor calls while processing requests.
//!
//! # Architecture Note
//! By defining one contract that all record types satisfy, the actor loop is
//! written *once* and reused for every store in the system. Associated types
//! keep the API fully typed: a Booking store only accepts Booking drafts and
//! Booking patches, and the compiler rejects anything else.
//!
//! All methods here are synchronous. Entities are plain state; anything that
//! needs to talk to another store happens in the service layer *around* the
//! store, never inside the actor loop.

use crate::page::SortField;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Contract for a record type managed by a [`StoreActor`](crate::StoreActor).
pub trait StoreEntity: Clone + Debug + Send + Sync + 'static {
    /// The record identifier. Must be convertible from `u64` so the actor
    /// can assign ids from its monotonic counter, and `Ord` so listings can
    /// break sort ties deterministically.
    type Id: Eq + Hash + Copy + Ord + Send + Sync + Display + Debug + From<u64> + 'static;

    /// The payload a new record is built from.
    type Draft: Send + Sync + Debug;

    /// The partial-update payload. Fields are optional; omitted fields are
    /// left untouched by [`apply_patch`](Self::apply_patch).
    type Patch: Send + Sync + Debug;

    /// Typed sort fields accepted by paged listing.
    type SortField: SortField;

    /// Predicate payload for [`matches`](Self::matches)-based scans.
    type Filter: Clone + Send + Sync + Debug;

    /// Key under which at most one live record may exist. Entities without a
    /// uniqueness rule use `()` and return `None` from
    /// [`unique_key`](Self::unique_key).
    type UniqueKey: Eq + Hash + Clone + Send + Sync + Debug;

    /// Error produced when a patch is rejected. Use
    /// [`Infallible`](std::convert::Infallible) when patches always apply.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the full record from its assigned id and the draft.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// The record's own id.
    fn id(&self) -> Self::Id;

    /// Applies a partial update in place.
    ///
    /// Implementations must check their state rules *before* touching any
    /// field: a rejected patch leaves the record exactly as it was. Patches
    /// must also leave [`unique_key`](Self::unique_key) unchanged, since the
    /// actor's key index is not rebuilt on update.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    /// The record's unique key, if its type declares one. The actor indexes
    /// live records by this key and refuses a second insert under the same
    /// key.
    fn unique_key(&self) -> Option<Self::UniqueKey> {
        None
    }

    /// Whether this record satisfies the filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Ordering between two records under the given sort field. Listings
    /// sort ascending by this, with ids as the tie-break.
    fn compare(&self, other: &Self, field: Self::SortField) -> Ordering;
}
