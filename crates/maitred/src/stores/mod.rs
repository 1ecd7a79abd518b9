//! # Typed Store Handles
//!
//! Thin wrappers over [`StoreClient`](store_actor::StoreClient) that expose
//! domain-named operations and translate store outcomes into domain errors,
//! so the services above never see a raw [`InsertOutcome`](store_actor::InsertOutcome)
//! or [`PatchOutcome`](store_actor::PatchOutcome). One handle type per
//! entity, plus the single-writer [`RatingWriter`] for restaurant ratings.
//!
//! All handles are cheap clones of an `mpsc` sender; the shared
//! `get`/`exists`/`delete` plumbing comes from
//! [`StoreHandle`](store_actor::StoreHandle).

mod booking;
mod restaurant;
mod review;
mod user;

pub use booking::BookingStore;
pub use restaurant::{RatingWriter, RestaurantStore};
pub use review::ReviewStore;
pub use user::UserStore;
