//! # Mock Stores & Testing Guide
//!
//! The `MockStore<T>` type hands out the same `StoreClient<T>` as a real
//! actor but answers from a queue of expectations instead of real state. It
//! enables fast, deterministic testing of the logic *around* a store
//! without spawning any actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockStore | Real Actor |
//! |---------|-----------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Unit testing logic *around* the store | Testing the actor itself or full system |
//! | **Failure Injection** | Easy (`after` + short timeout) | Hard (requires specific state) |
//!
//! ## Pattern: Service Logic Test (Pure Mock)
//!
//! ```rust
//! use std::cmp::Ordering;
//! use std::str::FromStr;
//! use store_actor::mock::MockStore;
//! use store_actor::{SortField, StoreClient, StoreEntity, StoreError, UnknownSortField};
//!
//! // --- Define a minimal entity for the test ---
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note { id: u64, text: String }
//! #[derive(Debug)] struct NoteDraft { text: String }
//! #[derive(Debug)] struct NotePatch { text: String }
//!
//! #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
//! struct NoteSort;
//! impl FromStr for NoteSort {
//!     type Err = UnknownSortField;
//!     fn from_str(s: &str) -> Result<Self, Self::Err> {
//!         match s {
//!             "id" => Ok(NoteSort),
//!             other => Err(UnknownSortField(other.to_owned())),
//!         }
//!     }
//! }
//! impl SortField for NoteSort {
//!     fn names() -> &'static [&'static str] { &["id"] }
//! }
//!
//! impl StoreEntity for Note {
//!     type Id = u64; type Draft = NoteDraft; type Patch = NotePatch;
//!     type SortField = NoteSort; type Filter = (); type UniqueKey = ();
//!     type Error = std::convert::Infallible;
//!     fn from_draft(id: u64, draft: NoteDraft) -> Self { Self { id, text: draft.text } }
//!     fn id(&self) -> u64 { self.id }
//!     fn apply_patch(&mut self, patch: NotePatch) -> Result<(), Self::Error> {
//!         self.text = patch.text;
//!         Ok(())
//!     }
//!     fn matches(&self, _filter: &()) -> bool { true }
//!     fn compare(&self, other: &Self, _field: NoteSort) -> Ordering { self.id.cmp(&other.id) }
//! }
//!
//! // --- A minimal typed wrapper ---
//! struct NoteStore { client: StoreClient<Note> }
//! impl NoteStore {
//!     async fn fetch(&self, id: u64) -> Result<Option<Note>, StoreError> {
//!         self.client.get(id).await
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // 1. Setup Mock
//!     let mut mock = MockStore::<Note>::new();
//!     mock.expect_get(1).return_found(Note { id: 1, text: "hello".to_owned() });
//!
//!     // 2. Create the wrapper with the mock's client
//!     let store = NoteStore { client: mock.client() };
//!
//!     // 3. Test logic
//!     let note = store.fetch(1).await.unwrap();
//!     assert_eq!(note.unwrap().text, "hello");
//!     mock.verify();
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! Transport failures that are hard to stage against a real actor are one
//! line here: delay the reply past the client's timeout with
//! [`after`](GetExpectationBuilder::after).
//!
//! ```rust
//! # use std::cmp::Ordering;
//! # use std::str::FromStr;
//! # use store_actor::mock::MockStore;
//! # use store_actor::{SortField, StoreEntity, UnknownSortField};
//! use std::time::Duration;
//! use store_actor::{RetryPolicy, StoreConfig, StoreError};
//!
//! # #[derive(Clone, Debug, PartialEq)]
//! # struct Note { id: u64, text: String }
//! # #[derive(Debug)] struct NoteDraft { text: String }
//! # #[derive(Debug)] struct NotePatch { text: String }
//! # #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
//! # struct NoteSort;
//! # impl FromStr for NoteSort {
//! #     type Err = UnknownSortField;
//! #     fn from_str(s: &str) -> Result<Self, Self::Err> {
//! #         match s {
//! #             "id" => Ok(NoteSort),
//! #             other => Err(UnknownSortField(other.to_owned())),
//! #         }
//! #     }
//! # }
//! # impl SortField for NoteSort {
//! #     fn names() -> &'static [&'static str] { &["id"] }
//! # }
//! # impl StoreEntity for Note {
//! #     type Id = u64; type Draft = NoteDraft; type Patch = NotePatch;
//! #     type SortField = NoteSort; type Filter = (); type UniqueKey = ();
//! #     type Error = std::convert::Infallible;
//! #     fn from_draft(id: u64, draft: NoteDraft) -> Self { Self { id, text: draft.text } }
//! #     fn id(&self) -> u64 { self.id }
//! #     fn apply_patch(&mut self, patch: NotePatch) -> Result<(), Self::Error> {
//! #         self.text = patch.text;
//! #         Ok(())
//! #     }
//! #     fn matches(&self, _filter: &()) -> bool { true }
//! #     fn compare(&self, other: &Self, _field: NoteSort) -> Ordering { self.id.cmp(&other.id) }
//! # }
//! #
//! #[tokio::main]
//! async fn main() {
//!     let config = StoreConfig {
//!         buffer: 8,
//!         op_timeout: Duration::from_millis(50),
//!         retry: RetryPolicy::none(),
//!     };
//!     let mut mock = MockStore::<Note>::with_config(&config);
//!     let client = mock.client();
//!
//!     // Simulate a stuck store: the reply arrives after the client gave up
//!     mock.expect_get(1)
//!         .after(Duration::from_millis(200))
//!         .return_missing();
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(StoreError::Timeout(_))));
//! }
//! ```
//!
//! ## Pattern: Full System Integration Test
//!
//! ```text
//! For end-to-end flows (real actors, services, the aggregation loop), no
//! mocks are involved: build the whole system and drive it through its
//! public API. See the integration tests of the application crate for
//! comprehensive examples.
//! ```
//!
//! ## Raw Channel Utilities
//!
//! Use [`create_mock_store`] when a test needs to inspect requests or
//! control replies by hand, e.g. dropping the reply sender to simulate a
//! crashed store.

use crate::client::StoreClient;
use crate::config::StoreConfig;
use crate::entity::StoreEntity;
use crate::message::{InsertOutcome, PatchOutcome, Reply, StoreRequest};
use crate::page::PageRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock store.
enum Expectation<T: StoreEntity> {
    Insert {
        response: InsertOutcome<T>,
        delay: Option<Duration>,
    },
    Get {
        id: T::Id,
        response: Option<T>,
        delay: Option<Duration>,
    },
    Page {
        response: Vec<T>,
        delay: Option<Duration>,
    },
    FindWhere {
        response: Vec<T>,
        delay: Option<Duration>,
    },
    FindByKey {
        key: T::UniqueKey,
        response: Option<T>,
        delay: Option<Duration>,
    },
    Patch {
        id: T::Id,
        response: PatchOutcome<T>,
        delay: Option<Duration>,
    },
    Delete {
        id: T::Id,
        response: bool,
        delay: Option<Duration>,
    },
    Exists {
        id: T::Id,
        response: bool,
        delay: Option<Duration>,
    },
}

/// Delays the reply when the expectation asks for it, then answers. The
/// send result is discarded; a client that timed out has already dropped
/// its receiver.
async fn reply<R>(respond_to: Reply<R>, response: R, delay: Option<Duration>) {
    if let Some(d) = delay {
        tokio::time::sleep(d).await;
    }
    let _ = respond_to.send(response);
}

/// A mock store with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockStore::<Booking>::new();
/// mock.expect_get(1).return_found(booking);
/// mock.expect_insert().return_created(new_booking);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were consumed
/// ```
pub struct MockStore<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockStore<T> {
    /// Creates a new mock store with no expectations and default client
    /// settings.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Creates a new mock store whose client uses the given timeout and
    /// retry settings. Tests that stage timeouts want a short `op_timeout`
    /// here.
    pub fn with_config(config: &StoreConfig) -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(config.buffer);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Background task answers each request from the expectation queue
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = {
                    let mut exps = expectations_clone.lock().unwrap();
                    exps.pop_front()
                };

                match (request, expectation) {
                    (
                        StoreRequest::Insert {
                            draft: _,
                            respond_to,
                        },
                        Some(Expectation::Insert { response, delay }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    (
                        StoreRequest::Get { id: _, respond_to },
                        Some(Expectation::Get {
                            id: _,
                            response,
                            delay,
                        }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    (
                        StoreRequest::Page {
                            page: _,
                            respond_to,
                        },
                        Some(Expectation::Page { response, delay }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    (
                        StoreRequest::FindWhere {
                            filter: _,
                            respond_to,
                        },
                        Some(Expectation::FindWhere { response, delay }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    (
                        StoreRequest::FindByKey { key: _, respond_to },
                        Some(Expectation::FindByKey {
                            key: _,
                            response,
                            delay,
                        }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    (
                        StoreRequest::Patch {
                            id: _,
                            patch: _,
                            respond_to,
                        },
                        Some(Expectation::Patch {
                            id: _,
                            response,
                            delay,
                        }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    (
                        StoreRequest::Delete { id: _, respond_to },
                        Some(Expectation::Delete {
                            id: _,
                            response,
                            delay,
                        }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    (
                        StoreRequest::Exists { id: _, respond_to },
                        Some(Expectation::Exists {
                            id: _,
                            response,
                            delay,
                        }),
                    ) => {
                        reply(respond_to, response, delay).await;
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender, config.op_timeout, config.retry),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects an `insert` operation.
    pub fn expect_insert(&mut self) -> InsertExpectationBuilder<T> {
        InsertExpectationBuilder {
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Expects a `page` operation.
    pub fn expect_page(&mut self) -> PageExpectationBuilder<T> {
        PageExpectationBuilder {
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Expects a `find_where` operation.
    pub fn expect_find_where(&mut self) -> FindWhereExpectationBuilder<T> {
        FindWhereExpectationBuilder {
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Expects a `find_by_key` operation.
    pub fn expect_find_by_key(&mut self, key: T::UniqueKey) -> FindByKeyExpectationBuilder<T> {
        FindByKeyExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Expects a `patch` operation.
    pub fn expect_patch(&mut self, id: T::Id) -> PatchExpectationBuilder<T> {
        PatchExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Expects an `exists` operation.
    pub fn expect_exists(&mut self, id: T::Id) -> ExistsExpectationBuilder<T> {
        ExistsExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
            delay: None,
        }
    }

    /// Verifies that all expectations were consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `insert` expectations.
pub struct InsertExpectationBuilder<T: StoreEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> InsertExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The insert wins and stores this record.
    pub fn return_created(self, record: T) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert {
            response: InsertOutcome::Created(record),
            delay: self.delay,
        });
    }

    /// The insert loses to a live record under this unique key.
    pub fn return_duplicate(self, key: T::UniqueKey) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Insert {
            response: InsertOutcome::Duplicate { key },
            delay: self.delay,
        });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: StoreEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> GetExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The record exists.
    pub fn return_found(self, record: T) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: Some(record),
            delay: self.delay,
        });
    }

    /// No record with that id.
    pub fn return_missing(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            id: self.id,
            response: None,
            delay: self.delay,
        });
    }
}

/// Builder for `page` expectations.
pub struct PageExpectationBuilder<T: StoreEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> PageExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The listing returns these records.
    pub fn return_items(self, records: Vec<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Page {
            response: records,
            delay: self.delay,
        });
    }
}

/// Builder for `find_where` expectations.
pub struct FindWhereExpectationBuilder<T: StoreEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> FindWhereExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The scan returns these records.
    pub fn return_items(self, records: Vec<T>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::FindWhere {
            response: records,
            delay: self.delay,
        });
    }
}

/// Builder for `find_by_key` expectations.
pub struct FindByKeyExpectationBuilder<T: StoreEntity> {
    key: T::UniqueKey,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> FindByKeyExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// A live record holds the key.
    pub fn return_found(self, record: T) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::FindByKey {
            key: self.key,
            response: Some(record),
            delay: self.delay,
        });
    }

    /// No live record holds the key.
    pub fn return_missing(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::FindByKey {
            key: self.key,
            response: None,
            delay: self.delay,
        });
    }
}

/// Builder for `patch` expectations.
pub struct PatchExpectationBuilder<T: StoreEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> PatchExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The patch applies and yields this record state.
    pub fn return_updated(self, record: T) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Patch {
            id: self.id,
            response: PatchOutcome::Updated(record),
            delay: self.delay,
        });
    }

    /// The entity's state rules reject the patch.
    pub fn return_rejected(self, error: T::Error) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Patch {
            id: self.id,
            response: PatchOutcome::Rejected(error),
            delay: self.delay,
        });
    }

    /// No record with that id.
    pub fn return_missing(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Patch {
            id: self.id,
            response: PatchOutcome::Missing,
            delay: self.delay,
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: StoreEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> DeleteExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Whether a record was removed.
    pub fn return_removed(self, removed: bool) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response: removed,
            delay: self.delay,
        });
    }
}

/// Builder for `exists` expectations.
pub struct ExistsExpectationBuilder<T: StoreEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Option<Duration>,
}

impl<T: StoreEntity> ExistsExpectationBuilder<T> {
    /// Delays the reply, e.g. past the client's timeout.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Whether a record with the id is live.
    pub fn return_exists(self, exists: bool) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Exists {
            id: self.id,
            response: exists,
            delay: self.delay,
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a raw client and a receiver for asserting requests.
///
/// # Testing Strategy
/// In unit tests we sometimes want full control over the reply: inspect the
/// request payload, answer out of order, or drop the reply sender to
/// simulate a crashed store. This helper gives the test the receiver end of
/// the channel; [`MockStore`] is the more fluent API for the common cases.
pub fn create_mock_store<T: StoreEntity>(
    config: &StoreConfig,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(config.buffer);
    (
        StoreClient::new(sender, config.op_timeout, config.retry),
        receiver,
    )
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Draft, Reply<InsertOutcome<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Page request
pub async fn expect_page<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(PageRequest<T::SortField>, Reply<Vec<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Page { page, respond_to }) => Some((page, respond_to)),
        _ => None,
    }
}
