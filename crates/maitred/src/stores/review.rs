//! Typed handle for the review store.

use crate::error::ReviewError;
use crate::model::{
    BookingId, RestaurantId, Review, ReviewDraft, ReviewFilter, ReviewId, ReviewPatch,
    ReviewSortField,
};
use async_trait::async_trait;
use store_actor::{InsertOutcome, PageRequest, PatchOutcome, StoreClient, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// Client for the review store actor.
#[derive(Clone)]
pub struct ReviewStore {
    client: StoreClient<Review>,
}

impl ReviewStore {
    pub fn new(client: StoreClient<Review>) -> Self {
        Self { client }
    }

    /// Inserts a review. The booking-id uniqueness check and the insert run
    /// in one store message, so concurrent submissions for the same booking
    /// serialize inside the actor and exactly one wins.
    #[instrument(skip(self))]
    pub async fn create(&self, draft: ReviewDraft) -> Result<Review, ReviewError> {
        debug!("Sending request");
        match self.client.insert(draft).await? {
            InsertOutcome::Created(review) => Ok(review),
            InsertOutcome::Duplicate { key } => Err(ReviewError::AlreadyReviewed(key)),
        }
    }

    /// The live review for a booking, if one exists.
    #[instrument(skip(self))]
    pub async fn find_by_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Review>, ReviewError> {
        debug!("Sending request");
        Ok(self.client.find_by_key(booking_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn page(
        &self,
        page: PageRequest<ReviewSortField>,
    ) -> Result<Vec<Review>, ReviewError> {
        debug!("Sending request");
        Ok(self.client.page(page).await?)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: ReviewId, patch: ReviewPatch) -> Result<Review, ReviewError> {
        debug!("Sending request");
        match self.client.patch(id, patch).await? {
            PatchOutcome::Updated(review) => Ok(review),
            PatchOutcome::Rejected(rejection) => match rejection {},
            PatchOutcome::Missing => Err(ReviewError::NotFound(id)),
        }
    }

    /// Mean rating over a restaurant's reviews, `None` when it has none.
    ///
    /// Returns the raw transport error: only the aggregation loop calls
    /// this, and a failed read fails the whole cycle.
    #[instrument(skip(self))]
    pub async fn average_for(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Option<f64>, StoreError> {
        debug!("Sending request");
        let reviews = self
            .client
            .find_where(ReviewFilter::ForRestaurant(restaurant_id))
            .await?;
        if reviews.is_empty() {
            return Ok(None);
        }
        let total: f64 = reviews.iter().map(|review| review.rating).sum();
        Ok(Some(total / reviews.len() as f64))
    }
}

#[async_trait]
impl StoreHandle<Review> for ReviewStore {
    type Error = ReviewError;

    fn store(&self) -> &StoreClient<Review> {
        &self.client
    }
}
