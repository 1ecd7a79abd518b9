//! # Store Messages
//!
//! The message types exchanged between a [`StoreClient`](crate::StoreClient)
//! and its [`StoreActor`](crate::StoreActor).
//!
//! # Keyed-Store Operations
//! The variants cover the full persisted-store contract: insert, get,
//! paged listing, filtered scan, unique-key lookup, patch, delete, and an
//! existence check. Every variant carries a oneshot sender the actor answers
//! on; the actor itself never fails a request, it *describes* the outcome.
//!
//! # Outcome Enums
//! `Insert` and `Patch` reply with [`InsertOutcome`] and [`PatchOutcome`]
//! rather than bare results. Conditional behavior (a unique-key conflict, a
//! state-rule rejection, a missing record) is data, typed per entity, so
//! callers match on it directly instead of downcasting boxed errors.

use crate::entity::StoreEntity;
use crate::page::PageRequest;
use tokio::sync::oneshot;

/// Reply channel for one store request.
pub type Reply<T> = oneshot::Sender<T>;

/// Requests a [`StoreActor`](crate::StoreActor) processes sequentially.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Insert {
        draft: T::Draft,
        respond_to: Reply<InsertOutcome<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Reply<Option<T>>,
    },
    Page {
        page: PageRequest<T::SortField>,
        respond_to: Reply<Vec<T>>,
    },
    FindWhere {
        filter: T::Filter,
        respond_to: Reply<Vec<T>>,
    },
    FindByKey {
        key: T::UniqueKey,
        respond_to: Reply<Option<T>>,
    },
    Patch {
        id: T::Id,
        patch: T::Patch,
        respond_to: Reply<PatchOutcome<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Reply<bool>,
    },
    Exists {
        id: T::Id,
        respond_to: Reply<bool>,
    },
}

/// Result of an insert. The uniqueness check and the insert happen in one
/// actor message, so at most one record can ever win a contended key.
#[derive(Debug)]
pub enum InsertOutcome<T: StoreEntity> {
    /// The record was stored; this is its full state including the id.
    Created(T),
    /// A live record already holds this unique key; nothing was written.
    Duplicate { key: T::UniqueKey },
}

/// Result of a patch.
#[derive(Debug)]
pub enum PatchOutcome<T: StoreEntity> {
    /// The patch applied; this is the updated record.
    Updated(T),
    /// The entity's state rules rejected the patch; the record is unchanged.
    Rejected(T::Error),
    /// No record with that id.
    Missing,
}
