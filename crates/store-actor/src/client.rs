//! # Generic Store Client
//!
//! This module defines the generic client for communicating with store
//! actors.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::{InsertOutcome, PatchOutcome, StoreRequest};
use crate::page::PageRequest;
use crate::retry::{retry_with_predicate, RetryPolicy};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

/// A type-safe client for interacting with a [`StoreActor`](crate::StoreActor).
///
/// * **Cloneable** – holds a sender plus two small configs, so cloning is
///   inexpensive and clients can be shared across tasks.
/// * **Bounded calls** – every call is wrapped in the configured
///   `op_timeout`, so a stuck actor surfaces as [`StoreError::Timeout`]
///   instead of hanging the caller.
/// * **Retried reads** – idempotent reads (`get`, `page`, `find_where`,
///   `find_by_key`, `exists`) are retried per the configured
///   [`RetryPolicy`]. Mutations run exactly once: after a lost reply the
///   write may have landed, and retrying could apply it twice.
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
    op_timeout: Duration,
    retry: RetryPolicy,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(
        sender: mpsc::Sender<StoreRequest<T>>,
        op_timeout: Duration,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            sender,
            op_timeout,
            retry,
        }
    }

    pub async fn insert(&self, draft: T::Draft) -> Result<InsertOutcome<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(StoreRequest::Insert { draft, respond_to }, response)
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        retry_with_predicate(
            &self.retry,
            "get",
            || self.get_once(id),
            StoreError::is_retryable,
        )
        .await
    }

    pub async fn page(&self, page: PageRequest<T::SortField>) -> Result<Vec<T>, StoreError> {
        retry_with_predicate(
            &self.retry,
            "page",
            || self.page_once(page),
            StoreError::is_retryable,
        )
        .await
    }

    pub async fn find_where(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        retry_with_predicate(
            &self.retry,
            "find_where",
            || self.find_where_once(filter.clone()),
            StoreError::is_retryable,
        )
        .await
    }

    pub async fn find_by_key(&self, key: T::UniqueKey) -> Result<Option<T>, StoreError> {
        retry_with_predicate(
            &self.retry,
            "find_by_key",
            || self.find_by_key_once(key.clone()),
            StoreError::is_retryable,
        )
        .await
    }

    pub async fn patch(&self, id: T::Id, patch: T::Patch) -> Result<PatchOutcome<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(
            StoreRequest::Patch {
                id,
                patch,
                respond_to,
            },
            response,
        )
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(StoreRequest::Delete { id, respond_to }, response)
            .await
    }

    pub async fn exists(&self, id: T::Id) -> Result<bool, StoreError> {
        retry_with_predicate(
            &self.retry,
            "exists",
            || self.exists_once(id),
            StoreError::is_retryable,
        )
        .await
    }

    async fn get_once(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(StoreRequest::Get { id, respond_to }, response)
            .await
    }

    async fn page_once(&self, page: PageRequest<T::SortField>) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(StoreRequest::Page { page, respond_to }, response)
            .await
    }

    async fn find_where_once(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(StoreRequest::FindWhere { filter, respond_to }, response)
            .await
    }

    async fn find_by_key_once(&self, key: T::UniqueKey) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(StoreRequest::FindByKey { key, respond_to }, response)
            .await
    }

    async fn exists_once(&self, id: T::Id) -> Result<bool, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.request(StoreRequest::Exists { id, respond_to }, response)
            .await
    }

    /// Sends one request and awaits its reply, bounded by `op_timeout`.
    async fn request<R>(
        &self,
        msg: StoreRequest<T>,
        response: oneshot::Receiver<R>,
    ) -> Result<R, StoreError> {
        timeout(self.op_timeout, async {
            self.sender
                .send(msg)
                .await
                .map_err(|_| StoreError::Closed)?;
            response.await.map_err(|_| StoreError::Dropped)
        })
        .await
        .map_err(|_| StoreError::Timeout(self.op_timeout))?
    }
}
