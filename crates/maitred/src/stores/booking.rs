//! Typed handle for the booking store.

use crate::error::BookingError;
use crate::model::{Booking, BookingCreate, BookingId, BookingLocked, BookingPatch, BookingSortField};
use async_trait::async_trait;
use store_actor::{InsertOutcome, PageRequest, PatchOutcome, StoreClient, StoreHandle};
use tracing::{debug, instrument};

/// Client for the booking store actor.
#[derive(Clone)]
pub struct BookingStore {
    client: StoreClient<Booking>,
}

impl BookingStore {
    pub fn new(client: StoreClient<Booking>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, create: BookingCreate) -> Result<Booking, BookingError> {
        debug!("Sending request");
        match self.client.insert(create).await? {
            InsertOutcome::Created(booking) => Ok(booking),
            InsertOutcome::Duplicate { .. } => unreachable!("bookings declare no unique key"),
        }
    }

    #[instrument(skip(self))]
    pub async fn page(
        &self,
        page: PageRequest<BookingSortField>,
    ) -> Result<Vec<Booking>, BookingError> {
        debug!("Sending request");
        Ok(self.client.page(page).await?)
    }

    /// Applies a patch. The status check and the field application run in
    /// one store message, so a booking observed `COMPLETE` here was
    /// `COMPLETE` when the patch was evaluated.
    #[instrument(skip(self))]
    pub async fn patch(&self, id: BookingId, patch: BookingPatch) -> Result<Booking, BookingError> {
        debug!("Sending request");
        match self.client.patch(id, patch).await? {
            PatchOutcome::Updated(booking) => Ok(booking),
            PatchOutcome::Rejected(BookingLocked) => Err(BookingError::AlreadyComplete(id)),
            PatchOutcome::Missing => Err(BookingError::NotFound(id)),
        }
    }
}

#[async_trait]
impl StoreHandle<Booking> for BookingStore {
    type Error = BookingError;

    fn store(&self) -> &StoreClient<Booking> {
        &self.client
    }
}
