//! Review gate and review operations.

use crate::error::ReviewError;
use crate::model::{
    Booking, BookingStatus, RestaurantId, RestaurantView, Review, ReviewCreate, ReviewDraft,
    ReviewId, ReviewPatch, ReviewSortField, ReviewView, UserId, UserView,
};
use crate::stores::{RestaurantStore, ReviewStore, UserStore};
use chrono::Utc;
use std::sync::Arc;
use store_actor::{CacheConfig, EntityCache, PageRequest, StoreClient, StoreHandle};
use tracing::{debug, info, instrument, warn};

/// Caller-facing review operations.
///
/// `create` is the gate: checks run in a fixed order (rating bounds, one
/// review per booking, booking status, reference resolution) and all of
/// them pass before anything is written. The store's conditional insert
/// re-checks uniqueness, so two concurrent submissions for one booking
/// cannot both win.
#[derive(Clone)]
pub struct ReviewService {
    reviews: ReviewStore,
    /// Raw booking client: the gate reads booking state straight from the
    /// store rather than through the booking service's cache, so the status
    /// check always sees the store's truth.
    bookings: StoreClient<Booking>,
    users: UserStore,
    restaurants: RestaurantStore,
    cache: Arc<EntityCache<ReviewId, ReviewSortField, ReviewView>>,
}

impl ReviewService {
    pub fn new(
        reviews: ReviewStore,
        bookings: StoreClient<Booking>,
        users: UserStore,
        restaurants: RestaurantStore,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            reviews,
            bookings,
            users,
            restaurants,
            cache: Arc::new(EntityCache::new(cache_config)),
        }
    }

    /// Submits a review for a completed booking.
    #[instrument(skip(self))]
    pub async fn create(&self, create: ReviewCreate) -> Result<ReviewView, ReviewError> {
        check_rating(create.rating)?;

        if self
            .reviews
            .find_by_booking(create.booking_id)
            .await?
            .is_some()
        {
            warn!(booking_id = %create.booking_id, "Booking already reviewed");
            return Err(ReviewError::AlreadyReviewed(create.booking_id));
        }

        // COMPLETE is absorbing, so a status observed here cannot be
        // invalidated between this read and the insert below.
        let booking = self
            .bookings
            .get(create.booking_id)
            .await?
            .ok_or(ReviewError::BookingNotFound(create.booking_id))?;
        if booking.status != BookingStatus::Complete {
            warn!(booking_id = %booking.id, status = %booking.status, "Booking not complete");
            return Err(ReviewError::IllegalBookingState {
                booking_id: booking.id,
                status: booking.status,
            });
        }

        let user = self.user_view(create.user_id).await?;
        let restaurant = self.restaurant_view(create.restaurant_id).await?;

        let draft = ReviewDraft::new(create, Utc::now());
        let review = self.reviews.create(draft).await?;
        info!(id = %review.id, booking_id = %review.booking_id, "Review created");
        self.cache.invalidate_all();
        Ok(ReviewView::new(review, user, restaurant))
    }

    /// One review with its references resolved. Read-through cached.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ReviewId) -> Result<ReviewView, ReviewError> {
        let epoch = self.cache.epoch();
        if let Some(view) = self.cache.entry(epoch, id).await {
            debug!(%id, "Cache hit");
            return Ok(view);
        }

        let review = self
            .reviews
            .get(id)
            .await?
            .ok_or(ReviewError::NotFound(id))?;
        let view = self.view_of(review).await?;
        self.cache.store_entry(epoch, id, view.clone()).await;
        Ok(view)
    }

    /// One page of reviews, ascending by the requested sort field with ties
    /// broken by id. Cached per (number, size, sort) triple.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: PageRequest<ReviewSortField>,
    ) -> Result<Vec<ReviewView>, ReviewError> {
        let epoch = self.cache.epoch();
        if let Some(views) = self.cache.page(epoch, page).await {
            debug!(?page, "Cache hit");
            return Ok(views);
        }

        let reviews = self.reviews.page(page).await?;
        let mut views = Vec::with_capacity(reviews.len());
        for review in reviews {
            views.push(self.view_of(review).await?);
        }
        self.cache.store_page(epoch, page, views.clone()).await;
        Ok(views)
    }

    /// Edits rating and/or comment. A supplied rating is bounds-checked;
    /// the booking's status is deliberately not re-examined, so reviews
    /// stay editable for as long as they exist.
    #[instrument(skip(self))]
    pub async fn update(&self, id: ReviewId, patch: ReviewPatch) -> Result<ReviewView, ReviewError> {
        if let Some(rating) = patch.rating {
            check_rating(rating)?;
        }

        let review = self.reviews.update(id, patch).await?;
        info!(%id, "Review updated");
        self.cache.invalidate_all();
        self.view_of(review).await
    }

    /// Deletes a review and releases its booking's uniqueness slot, so the
    /// booking can be reviewed again.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ReviewId) -> Result<(), ReviewError> {
        if !self.reviews.delete(id).await? {
            return Err(ReviewError::NotFound(id));
        }
        info!(%id, "Review deleted");
        self.cache.invalidate_all();
        Ok(())
    }

    async fn view_of(&self, review: Review) -> Result<ReviewView, ReviewError> {
        let user = self.user_view(review.user_id).await?;
        let restaurant = self.restaurant_view(review.restaurant_id).await?;
        Ok(ReviewView::new(review, user, restaurant))
    }

    async fn user_view(&self, id: UserId) -> Result<UserView, ReviewError> {
        let user = self
            .users
            .get(id)
            .await?
            .ok_or(ReviewError::UserNotFound(id))?;
        Ok(user.into())
    }

    async fn restaurant_view(&self, id: RestaurantId) -> Result<RestaurantView, ReviewError> {
        let restaurant = self
            .restaurants
            .get(id)
            .await?
            .ok_or(ReviewError::RestaurantNotFound(id))?;
        Ok(restaurant.into())
    }
}

fn check_rating(rating: f64) -> Result<(), ReviewError> {
    // contains() is false for NaN, so NaN is rejected here too.
    if !(0.0..=10.0).contains(&rating) {
        warn!(rating, "Rating out of range");
        return Err(ReviewError::InvalidRating(rating));
    }
    Ok(())
}
