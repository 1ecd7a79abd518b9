//! Typed handle for the restaurant store, plus the aggregation loop's
//! single-writer rating handle.

use crate::model::{Restaurant, RestaurantCreate, RestaurantId, RestaurantPatch};
use async_trait::async_trait;
use store_actor::{InsertOutcome, PatchOutcome, StoreClient, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// Client for the restaurant store actor.
#[derive(Clone)]
pub struct RestaurantStore {
    client: StoreClient<Restaurant>,
}

impl RestaurantStore {
    pub fn new(client: StoreClient<Restaurant>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, create: RestaurantCreate) -> Result<Restaurant, StoreError> {
        debug!("Sending request");
        match self.client.insert(create).await? {
            InsertOutcome::Created(restaurant) => Ok(restaurant),
            InsertOutcome::Duplicate { .. } => unreachable!("restaurants declare no unique key"),
        }
    }

    /// Every restaurant, in id order. The aggregation loop walks this once
    /// per cycle.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        debug!("Sending request");
        self.client.find_where(()).await
    }
}

#[async_trait]
impl StoreHandle<Restaurant> for RestaurantStore {
    type Error = StoreError;

    fn store(&self) -> &StoreClient<Restaurant> {
        &self.client
    }
}

/// Sole write path to restaurant ratings.
///
/// Not `Clone`, constructed once by the platform and moved into the
/// aggregation loop, so no other component can race the rating writes.
pub struct RatingWriter {
    client: StoreClient<Restaurant>,
}

impl RatingWriter {
    pub(crate) fn new(client: StoreClient<Restaurant>) -> Self {
        Self { client }
    }

    /// Overwrites a restaurant's rating. Returns `false` when the
    /// restaurant no longer exists.
    #[instrument(skip(self))]
    pub async fn set_rating(&self, id: RestaurantId, rating: f64) -> Result<bool, StoreError> {
        debug!("Sending request");
        match self.client.patch(id, RestaurantPatch { rating }).await? {
            PatchOutcome::Updated(_) => Ok(true),
            PatchOutcome::Rejected(rejection) => match rejection {},
            PatchOutcome::Missing => Ok(false),
        }
    }
}
