//! Booking lifecycle operations.

use crate::error::BookingError;
use crate::model::{
    Booking, BookingCreate, BookingId, BookingPatch, BookingSortField, BookingView, RestaurantId,
    RestaurantView, UserId, UserView,
};
use crate::stores::{BookingStore, RestaurantStore, UserStore};
use chrono::Utc;
use std::sync::Arc;
use store_actor::{CacheConfig, EntityCache, PageRequest, StoreHandle};
use tracing::{debug, info, instrument, warn};

/// Caller-facing booking operations, fronted by a read-through view cache.
///
/// Creation and patching validate the scheduled time against the clock here
/// in the service; the absorbing `COMPLETE` rule lives in the store actor so
/// the check and the write stay atomic.
#[derive(Clone)]
pub struct BookingService {
    bookings: BookingStore,
    users: UserStore,
    restaurants: RestaurantStore,
    cache: Arc<EntityCache<BookingId, BookingSortField, BookingView>>,
}

impl BookingService {
    pub fn new(
        bookings: BookingStore,
        users: UserStore,
        restaurants: RestaurantStore,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            bookings,
            users,
            restaurants,
            cache: Arc::new(EntityCache::new(cache_config)),
        }
    }

    /// Books a table. The slot must not be in the past, and both references
    /// must resolve before anything is written.
    #[instrument(skip(self))]
    pub async fn create(&self, create: BookingCreate) -> Result<BookingView, BookingError> {
        if create.scheduled_at < Utc::now() {
            warn!(scheduled_at = %create.scheduled_at, "Scheduled time in the past");
            return Err(BookingError::ScheduledInPast(create.scheduled_at));
        }
        let user = self.user_view(create.user_id).await?;
        let restaurant = self.restaurant_view(create.restaurant_id).await?;

        let booking = self.bookings.create(create).await?;
        info!(id = %booking.id, status = %booking.status, "Booking created");
        self.cache.invalidate_all();
        Ok(BookingView::new(booking, user, restaurant))
    }

    /// One booking with its references resolved. Read-through cached.
    #[instrument(skip(self))]
    pub async fn get(&self, id: BookingId) -> Result<BookingView, BookingError> {
        let epoch = self.cache.epoch();
        if let Some(view) = self.cache.entry(epoch, id).await {
            debug!(%id, "Cache hit");
            return Ok(view);
        }

        let booking = self
            .bookings
            .get(id)
            .await?
            .ok_or(BookingError::NotFound(id))?;
        let view = self.view_of(booking).await?;
        self.cache.store_entry(epoch, id, view.clone()).await;
        Ok(view)
    }

    /// One page of bookings, ascending by the requested sort field with ties
    /// broken by id. Cached per (number, size, sort) triple.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: PageRequest<BookingSortField>,
    ) -> Result<Vec<BookingView>, BookingError> {
        let epoch = self.cache.epoch();
        if let Some(views) = self.cache.page(epoch, page).await {
            debug!(?page, "Cache hit");
            return Ok(views);
        }

        let bookings = self.bookings.page(page).await?;
        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            views.push(self.view_of(booking).await?);
        }
        self.cache.store_page(epoch, page, views.clone()).await;
        Ok(views)
    }

    /// Applies a partial update. A supplied slot must not be in the past,
    /// and a `COMPLETE` booking rejects the patch whole.
    #[instrument(skip(self))]
    pub async fn patch(
        &self,
        id: BookingId,
        patch: BookingPatch,
    ) -> Result<BookingView, BookingError> {
        if let Some(scheduled_at) = patch.scheduled_at {
            if scheduled_at < Utc::now() {
                warn!(%id, %scheduled_at, "Scheduled time in the past");
                return Err(BookingError::ScheduledInPast(scheduled_at));
            }
        }

        let booking = self.bookings.patch(id, patch).await?;
        info!(%id, status = %booking.status, "Booking updated");
        self.cache.invalidate_all();
        self.view_of(booking).await
    }

    /// Removes a booking outright, regardless of status.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: BookingId) -> Result<(), BookingError> {
        if !self.bookings.delete(id).await? {
            return Err(BookingError::NotFound(id));
        }
        info!(%id, "Booking deleted");
        self.cache.invalidate_all();
        Ok(())
    }

    async fn view_of(&self, booking: Booking) -> Result<BookingView, BookingError> {
        let user = self.user_view(booking.user_id).await?;
        let restaurant = self.restaurant_view(booking.restaurant_id).await?;
        Ok(BookingView::new(booking, user, restaurant))
    }

    async fn user_view(&self, id: UserId) -> Result<UserView, BookingError> {
        let user = self
            .users
            .get(id)
            .await?
            .ok_or(BookingError::UserNotFound(id))?;
        Ok(user.into())
    }

    async fn restaurant_view(&self, id: RestaurantId) -> Result<RestaurantView, BookingError> {
        let restaurant = self
            .restaurants
            .get(id)
            .await?
            .ok_or(BookingError::RestaurantNotFound(id))?;
        Ok(restaurant.into())
    }
}
