//! Rating aggregation loop.
//!
//! Restaurant ratings are derived data: the true source of truth is the set
//! of reviews referencing the restaurant. Rather than recomputing on every
//! review write, one background task periodically recomputes every
//! restaurant's mean and writes it back through the single-writer
//! [`RatingWriter`]. Review writes stay cheap; ratings lag by at most one
//! period.

use crate::config::RatingConfig;
use crate::stores::{RatingWriter, RestaurantStore, ReviewStore};
use store_actor::StoreError;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

/// What one aggregation pass covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    /// Restaurants visited.
    pub restaurants: usize,
    /// Ratings actually written. Lower than `restaurants` only when a
    /// restaurant vanished mid-pass.
    pub written: usize,
}

/// Periodically recomputes every restaurant's rating from its reviews.
///
/// Owns the only [`RatingWriter`], so nothing can race the rating writes,
/// and the loop itself never overlaps its own cycles: ticks are driven by
/// a single task with [`MissedTickBehavior::Delay`], so a long cycle delays
/// the next one instead of bursting.
pub struct RatingUpdater {
    restaurants: RestaurantStore,
    reviews: ReviewStore,
    writer: RatingWriter,
    config: RatingConfig,
}

impl RatingUpdater {
    pub fn new(
        restaurants: RestaurantStore,
        reviews: ReviewStore,
        writer: RatingWriter,
        config: RatingConfig,
    ) -> Self {
        Self {
            restaurants,
            reviews,
            writer,
            config,
        }
    }

    /// One full pass: list every restaurant, average its reviews, write the
    /// result back. A restaurant with no reviews gets 0. A restaurant
    /// deleted between the listing and the write is skipped.
    pub async fn run_cycle(&self) -> Result<CycleStats, StoreError> {
        let restaurants = self.restaurants.list_all().await?;
        let mut stats = CycleStats {
            restaurants: restaurants.len(),
            written: 0,
        };

        for restaurant in restaurants {
            let rating = self
                .reviews
                .average_for(restaurant.id)
                .await?
                .unwrap_or(0.0);
            if self.writer.set_rating(restaurant.id, rating).await? {
                stats.written += 1;
            } else {
                debug!(id = %restaurant.id, "Restaurant vanished mid-cycle, skipping");
            }
        }

        Ok(stats)
    }

    /// Drives [`run_cycle`](Self::run_cycle) on the configured period until
    /// `shutdown` fires. Each cycle runs under the configured timeout; a
    /// timed-out or failed cycle is logged and the loop carries on.
    pub fn spawn(self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.config.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(period = ?self.config.period, "Rating updater started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match timeout(self.config.cycle_timeout, self.run_cycle()).await {
                            Ok(Ok(stats)) => {
                                debug!(
                                    restaurants = stats.restaurants,
                                    written = stats.written,
                                    "Aggregation cycle finished"
                                );
                            }
                            Ok(Err(error)) => {
                                warn!(%error, "Aggregation cycle failed");
                            }
                            Err(_) => {
                                warn!(
                                    cycle_timeout = ?self.config.cycle_timeout,
                                    "Aggregation cycle timed out"
                                );
                            }
                        }
                    }
                    _ = shutdown.recv() => break,
                }
            }

            info!("Rating updater stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BookingId, Restaurant, RestaurantCreate, RestaurantId, Review, ReviewCreate, ReviewDraft,
        UserId,
    };
    use chrono::Utc;
    use std::time::Duration;
    use store_actor::mock::MockStore;
    use store_actor::{StoreActor, StoreConfig, StoreHandle};

    fn draft(booking: u64, restaurant: u64, rating: f64) -> ReviewDraft {
        ReviewDraft::new(
            ReviewCreate {
                booking_id: BookingId(booking),
                user_id: UserId(1),
                restaurant_id: RestaurantId(restaurant),
                rating,
                comment: "fine".to_string(),
            },
            Utc::now(),
        )
    }

    fn spawn_stores() -> (RestaurantStore, ReviewStore, RatingWriter) {
        let config = StoreConfig::default();
        let (restaurant_actor, restaurant_client) = StoreActor::<Restaurant>::new(&config);
        let (review_actor, review_client) = StoreActor::<Review>::new(&config);
        tokio::spawn(restaurant_actor.run());
        tokio::spawn(review_actor.run());

        let writer = RatingWriter::new(restaurant_client.clone());
        (
            RestaurantStore::new(restaurant_client),
            ReviewStore::new(review_client),
            writer,
        )
    }

    #[tokio::test]
    async fn cycle_folds_review_means_into_restaurants() {
        let (restaurants, reviews, writer) = spawn_stores();
        let rated = restaurants
            .create(RestaurantCreate {
                name: "Rated".to_string(),
            })
            .await
            .unwrap();
        let unrated = restaurants
            .create(RestaurantCreate {
                name: "Unrated".to_string(),
            })
            .await
            .unwrap();
        reviews.create(draft(1, rated.id.0, 8.0)).await.unwrap();
        reviews.create(draft(2, rated.id.0, 10.0)).await.unwrap();

        let updater = RatingUpdater::new(
            restaurants.clone(),
            reviews,
            writer,
            RatingConfig::default(),
        );
        let stats = updater.run_cycle().await.unwrap();

        assert_eq!(
            stats,
            CycleStats {
                restaurants: 2,
                written: 2
            }
        );
        let rated = restaurants.get(rated.id).await.unwrap().unwrap();
        let unrated = restaurants.get(unrated.id).await.unwrap().unwrap();
        assert_eq!(rated.rating, 9.0);
        assert_eq!(unrated.rating, 0.0);
    }

    #[tokio::test]
    async fn cycles_without_new_reviews_are_idempotent() {
        let (restaurants, reviews, writer) = spawn_stores();
        let restaurant = restaurants
            .create(RestaurantCreate {
                name: "Steady".to_string(),
            })
            .await
            .unwrap();
        reviews.create(draft(1, restaurant.id.0, 7.0)).await.unwrap();

        let updater = RatingUpdater::new(
            restaurants.clone(),
            reviews,
            writer,
            RatingConfig::default(),
        );
        updater.run_cycle().await.unwrap();
        let first = restaurants.get(restaurant.id).await.unwrap().unwrap();
        updater.run_cycle().await.unwrap();
        let second = restaurants.get(restaurant.id).await.unwrap().unwrap();

        assert_eq!(first.rating, 7.0);
        assert_eq!(second.rating, 7.0);
    }

    #[tokio::test]
    async fn vanished_restaurant_is_skipped_not_fatal() {
        // Script the restaurant store: the listing still contains the
        // restaurant, but the rating write finds it gone.
        let ghost = Restaurant {
            id: RestaurantId(9),
            name: "Ghost".to_string(),
            rating: 0.0,
        };
        let mut restaurant_mock = MockStore::<Restaurant>::new();
        restaurant_mock
            .expect_find_where()
            .return_items(vec![ghost]);
        restaurant_mock.expect_patch(RestaurantId(9)).return_missing();

        let config = StoreConfig::default();
        let (review_actor, review_client) = StoreActor::<Review>::new(&config);
        tokio::spawn(review_actor.run());

        let updater = RatingUpdater::new(
            RestaurantStore::new(restaurant_mock.client()),
            ReviewStore::new(review_client),
            RatingWriter::new(restaurant_mock.client()),
            RatingConfig::default(),
        );
        let stats = updater.run_cycle().await.unwrap();

        assert_eq!(
            stats,
            CycleStats {
                restaurants: 1,
                written: 0
            }
        );
        restaurant_mock.verify();
    }

    #[tokio::test]
    async fn loop_stops_on_shutdown_signal() {
        let (restaurants, reviews, writer) = spawn_stores();
        let updater = RatingUpdater::new(
            restaurants,
            reviews,
            writer,
            RatingConfig {
                period: Duration::from_millis(20),
                cycle_timeout: Duration::from_secs(1),
            },
        );

        let (shutdown, shutdown_rx) = broadcast::channel(1);
        let handle = updater.spawn(shutdown_rx);
        tokio::time::sleep(Duration::from_millis(60)).await;

        shutdown.send(()).unwrap();
        handle.await.unwrap();
    }
}
