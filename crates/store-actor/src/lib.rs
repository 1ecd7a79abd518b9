//! # Store Actor Framework
//!
//! This crate provides the foundational building blocks for type-safe, keyed
//! entity stores in Rust. It implements a **store-per-entity** pattern on top
//! of the **Actor Model**, giving each record type its own sequential task
//! that owns all of its state.
//!
//! ## Why Stores as Actors?
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within each store eliminates race conditions
//!
//! The last point is what makes conditional operations trivial: a
//! "check-then-insert" against a unique key happens inside one actor
//! message, so two racing inserts under the same key can never both win. No
//! transactions, no compare-and-swap loops.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - your record types and their state
//!    rules
//! 2. **Runtime Layer** ([`StoreActor`]) - message processing and
//!    concurrency
//! 3. **Interface Layer** ([`StoreClient`], [`StoreHandle`]) - type-safe
//!    communication with timeouts and retried reads
//!
//! Cross-cutting pieces plug in around the stores: [`EntityCache`] for
//! read-through caching with epoch invalidation, [`RetryPolicy`] for
//! bounded backoff on idempotent reads, and [`mock`] for deterministic
//! tests without actors.
//!
//! ## Core Abstractions
//!
//! ### [`StoreEntity`] - The Record Contract
//!
//! Define what a store manages and how records behave:
//!
//! ```rust
//! use std::cmp::Ordering;
//! use std::str::FromStr;
//! use store_actor::{
//!     InsertOutcome, SortField, StoreActor, StoreConfig, StoreEntity, UnknownSortField,
//! };
//!
//! // 1. Define the Entity
//! #[derive(Clone, Debug)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Debug)] struct UserDraft { name: String }
//! #[derive(Debug)] struct UserPatch { name: Option<String> }
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
//! enum UserSort {
//!     #[default]
//!     Id,
//!     Name,
//! }
//!
//! impl FromStr for UserSort {
//!     type Err = UnknownSortField;
//!     fn from_str(s: &str) -> Result<Self, Self::Err> {
//!         match s {
//!             "id" => Ok(Self::Id),
//!             "name" => Ok(Self::Name),
//!             other => Err(UnknownSortField(other.to_owned())),
//!         }
//!     }
//! }
//!
//! impl SortField for UserSort {
//!     fn names() -> &'static [&'static str] { &["id", "name"] }
//! }
//!
//! impl StoreEntity for User {
//!     type Id = u64;
//!     type Draft = UserDraft;
//!     type Patch = UserPatch;
//!     type SortField = UserSort;
//!     type Filter = ();
//!     type UniqueKey = ();
//!     type Error = std::convert::Infallible;
//!
//!     fn from_draft(id: u64, draft: UserDraft) -> Self {
//!         Self { id, name: draft.name }
//!     }
//!     fn id(&self) -> u64 { self.id }
//!     fn apply_patch(&mut self, patch: UserPatch) -> Result<(), Self::Error> {
//!         if let Some(name) = patch.name { self.name = name; }
//!         Ok(())
//!     }
//!     fn matches(&self, _filter: &()) -> bool { true }
//!     fn compare(&self, other: &Self, field: UserSort) -> Ordering {
//!         match field {
//!             UserSort::Id => self.id.cmp(&other.id),
//!             UserSort::Name => self.name.cmp(&other.name),
//!         }
//!     }
//! }
//!
//! // 2. Use the Store
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<User>::new(&StoreConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     let outcome = client.insert(UserDraft { name: "Alice".into() }).await.unwrap();
//!     let user = match outcome {
//!         InsertOutcome::Created(user) => user,
//!         InsertOutcome::Duplicate { .. } => unreachable!(),
//!     };
//!     let fetched = client.get(user.id).await.unwrap().unwrap();
//!     assert_eq!(fetched.name, "Alice");
//! }
//! ```
//!
//! ## Outcomes, Not Boxed Errors
//!
//! Store replies carry domain outcomes as data: an insert answers with
//! [`InsertOutcome`] (created, or duplicate key), a patch with
//! [`PatchOutcome`] (updated, rejected by the entity's own state rules, or
//! missing). [`StoreError`] is reserved for transport failures: a closed
//! store, a dropped reply, a timeout. Callers match on typed outcomes
//! instead of downcasting boxed errors.
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task
//! - Messages are processed **sequentially** within a store (no locks
//!   needed!)
//! - Multiple stores run in **parallel** (true concurrency)
//! - No shared mutable state (message passing only)
//!
//! ## Testing
//!
//! The framework provides a **MockStore** type that hands out the same
//! `StoreClient<T>` as a real actor but answers from an expectation queue,
//! including delayed replies for staging timeouts. See the [`mock`] module
//! for the full API and usage patterns.

pub mod actor;
pub mod cache;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod page;
pub mod retry;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use cache::EntityCache;
pub use client::StoreClient;
pub use config::{CacheConfig, StoreConfig};
pub use entity::StoreEntity;
pub use error::StoreError;
pub use handle::StoreHandle;
pub use message::{InsertOutcome, PatchOutcome, Reply, StoreRequest};
pub use page::{
    PageRequest, PageRequestError, SortField, UnknownSortField, DEFAULT_PAGE_NUMBER,
    DEFAULT_PAGE_SIZE,
};
pub use retry::RetryPolicy;
