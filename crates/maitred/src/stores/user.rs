//! Typed handle for the user store.

use crate::model::{User, UserCreate};
use async_trait::async_trait;
use store_actor::{InsertOutcome, StoreClient, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// Client for the user store actor.
#[derive(Clone)]
pub struct UserStore {
    client: StoreClient<User>,
}

impl UserStore {
    pub fn new(client: StoreClient<User>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, create: UserCreate) -> Result<User, StoreError> {
        debug!("Sending request");
        match self.client.insert(create).await? {
            InsertOutcome::Created(user) => Ok(user),
            InsertOutcome::Duplicate { .. } => unreachable!("users declare no unique key"),
        }
    }
}

#[async_trait]
impl StoreHandle<User> for UserStore {
    type Error = StoreError;

    fn store(&self) -> &StoreClient<User> {
        &self.client
    }
}
