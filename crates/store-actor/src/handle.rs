//! # StoreHandle Trait
//!
//! Provides a common interface for entity-specific store handles, adding
//! default `get`, `exists`, and `delete` methods built on top of a generic
//! `StoreClient`.

use crate::{StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;

/// Trait for entity-specific store handles to inherit standard operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// the operations every store exposes the same way. The handle's error type
/// converts from [`StoreError`], so transport failures flow into the
/// domain error without per-call mapping.
///
/// # Example
///
/// ```rust
/// use std::cmp::Ordering;
/// use std::str::FromStr;
/// use async_trait::async_trait;
/// use store_actor::{
///     SortField, StoreClient, StoreEntity, StoreError, StoreHandle, UnknownSortField,
/// };
///
/// // 1. Define Entity
/// #[derive(Clone, Debug)]
/// struct Note { id: u64, text: String }
/// #[derive(Debug)] struct NoteDraft { text: String }
/// #[derive(Debug)] struct NotePatch { text: String }
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// struct NoteSort;
///
/// impl FromStr for NoteSort {
///     type Err = UnknownSortField;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         match s {
///             "id" => Ok(NoteSort),
///             other => Err(UnknownSortField(other.to_owned())),
///         }
///     }
/// }
///
/// impl SortField for NoteSort {
///     fn names() -> &'static [&'static str] { &["id"] }
/// }
///
/// impl StoreEntity for Note {
///     type Id = u64;
///     type Draft = NoteDraft;
///     type Patch = NotePatch;
///     type SortField = NoteSort;
///     type Filter = ();
///     type UniqueKey = ();
///     type Error = std::convert::Infallible;
///
///     fn from_draft(id: u64, draft: NoteDraft) -> Self {
///         Self { id, text: draft.text }
///     }
///     fn id(&self) -> u64 { self.id }
///     fn apply_patch(&mut self, patch: NotePatch) -> Result<(), Self::Error> {
///         self.text = patch.text;
///         Ok(())
///     }
///     fn matches(&self, _filter: &()) -> bool { true }
///     fn compare(&self, other: &Self, _field: NoteSort) -> Ordering {
///         self.id.cmp(&other.id)
///     }
/// }
///
/// // 2. Define the typed handle
/// struct NoteStore {
///     client: StoreClient<Note>,
/// }
///
/// // 3. Implement StoreHandle
/// #[async_trait]
/// impl StoreHandle<Note> for NoteStore {
///     type Error = StoreError;
///
///     fn store(&self) -> &StoreClient<Note> {
///         &self.client
///     }
/// }
///
/// // 4. Usage: get(), exists(), and delete() are provided automatically
/// async fn usage(store: NoteStore) -> Result<(), StoreError> {
///     let _ = store.get(1).await?;
///     let _ = store.exists(1).await?;
///     let _ = store.delete(1).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StoreHandle<T: StoreEntity>: Send + Sync {
    /// The store-specific error type.
    type Error: From<StoreError> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn store(&self) -> &StoreClient<T>;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.store().get(id).await?)
    }

    /// Check whether a record with this ID is live.
    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: T::Id) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.store().exists(id).await?)
    }

    /// Delete a record by ID. Returns `false` when no record held the ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        Ok(self.store().delete(id).await?)
    }
}
