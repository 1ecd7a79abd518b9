//! # Generic Store Actor
//!
//! This module defines the `StoreActor`, the component that owns the records
//! of one entity type. It implements the "Server" side of the actor model,
//! processing messages sequentially and ensuring exclusive access to the
//! record map and its unique-key index.

use crate::client::StoreClient;
use crate::config::StoreConfig;
use crate::entity::StoreEntity;
use crate::message::{InsertOutcome, PatchOutcome, StoreRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages all records of one entity type.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the state
/// (`records` plus the `by_key` unique-key index) and the receiver end of
/// the channel.
///
/// **Concurrency Model**:
/// Each `StoreActor` processes its messages *sequentially* in a loop, so the
/// record map needs no `Mutex` or `RwLock`. Sequential processing is also
/// what makes conditional operations atomic: the uniqueness check and the
/// insert of [`StoreRequest::Insert`] happen inside one message, so two
/// racing inserts under the same key can never both win.
///
/// # Usage Pattern
///
/// 1. **Create**: call [`StoreActor::new`] to get the actor (server) and its
///    [`StoreClient`] (interface).
/// 2. **Run**: spawn the actor's event loop in a background task.
/// 3. **Use**: clone the client freely and send requests from anywhere.
///
/// # Operations
///
/// * **Insert** — builds the record under the next free id, refuses it if a
///   live record already claims its unique key, stores it otherwise.
/// * **Get / Exists** — point lookup by id.
/// * **Page** — sorts all records under the requested sort field (ids break
///   ties) and returns one page slice.
/// * **FindWhere** — filtered scan, ordered by id.
/// * **FindByKey** — point lookup through the unique-key index.
/// * **Patch** — applies a partial update through
///   [`StoreEntity::apply_patch`]; the entity's own state rules decide
///   whether the patch is accepted, and a rejected patch leaves the record
///   untouched.
/// * **Delete** — removes the record and frees its unique key.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: HashMap<T::Id, T>,
    by_key: HashMap<T::UniqueKey, T::Id>,
    next_id: u64,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// The channel capacity, per-call timeout, and read retry policy all
    /// come from `config`; the client keeps the timeout and retry settings
    /// for its own use.
    pub fn new(config: &StoreConfig) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(config.buffer);
        let actor = Self {
            receiver,
            records: HashMap::new(),
            by_key: HashMap::new(),
            next_id: 1,
        };
        let client = StoreClient::new(sender, config.op_timeout, config.retry);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client
    /// is dropped and the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Booking" instead of
        // "maitred::model::booking::Booking")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { draft, respond_to } => {
                    debug!(entity_type, ?draft, "Insert");
                    let id = T::Id::from(self.next_id);
                    let item = T::from_draft(id, draft);

                    if let Some(key) = item.unique_key() {
                        if self.by_key.contains_key(&key) {
                            warn!(entity_type, ?key, "Duplicate key");
                            let _ = respond_to.send(InsertOutcome::Duplicate { key });
                            continue;
                        }
                        self.by_key.insert(key, id);
                    }

                    self.next_id += 1;
                    self.records.insert(id, item.clone());
                    info!(entity_type, %id, size = self.records.len(), "Created");
                    let _ = respond_to.send(InsertOutcome::Created(item));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.records.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(item);
                }
                StoreRequest::Page { page, respond_to } => {
                    let mut items: Vec<T> = self.records.values().cloned().collect();
                    items.sort_by(|a, b| {
                        a.compare(b, page.sort).then_with(|| a.id().cmp(&b.id()))
                    });

                    let page_items: Vec<T> = items
                        .into_iter()
                        .skip(page.offset())
                        .take(page.size)
                        .collect();
                    debug!(entity_type, ?page, count = page_items.len(), "Page");
                    let _ = respond_to.send(page_items);
                }
                StoreRequest::FindWhere { filter, respond_to } => {
                    let mut items: Vec<T> = self
                        .records
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    items.sort_by_key(|item| item.id());
                    debug!(entity_type, ?filter, count = items.len(), "FindWhere");
                    let _ = respond_to.send(items);
                }
                StoreRequest::FindByKey { key, respond_to } => {
                    let item = self
                        .by_key
                        .get(&key)
                        .and_then(|id| self.records.get(id))
                        .cloned();
                    let found = item.is_some();
                    debug!(entity_type, ?key, found, "FindByKey");
                    let _ = respond_to.send(item);
                }
                StoreRequest::Patch {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?patch, "Patch");
                    if let Some(item) = self.records.get_mut(&id) {
                        match item.apply_patch(patch) {
                            Ok(()) => {
                                info!(entity_type, %id, "Updated");
                                let _ = respond_to.send(PatchOutcome::Updated(item.clone()));
                            }
                            Err(e) => {
                                warn!(entity_type, %id, error = %e, "Patch rejected");
                                let _ = respond_to.send(PatchOutcome::Rejected(e));
                            }
                        }
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(PatchOutcome::Missing);
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.records.remove(&id) {
                        if let Some(key) = item.unique_key() {
                            self.by_key.remove(&key);
                        }
                        info!(entity_type, %id, size = self.records.len(), "Deleted");
                        let _ = respond_to.send(true);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(false);
                    }
                }
                StoreRequest::Exists { id, respond_to } => {
                    let found = self.records.contains_key(&id);
                    debug!(entity_type, %id, found, "Exists");
                    let _ = respond_to.send(found);
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }
}
