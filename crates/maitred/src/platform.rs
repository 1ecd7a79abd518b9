//! # Platform Lifecycle & Orchestration
//!
//! Individual store actors are simple; wiring them together is where the
//! complexity lives. [`Platform`] is the conductor: it spawns the four
//! store actors, builds the typed handles and both services, hands the
//! single [`RatingWriter`] to the aggregation loop, and coordinates a clean
//! shutdown.
//!
//! ## Shutdown order
//!
//! 1. Broadcast the shutdown signal; the aggregation task exits its loop.
//! 2. Await the aggregation task, so its store handles drop with it.
//! 3. Drop the platform's own services and handles, closing every store
//!    channel.
//! 4. Each actor drains its mailbox, logs its final state and exits; await
//!    them all.
//!
//! The loop goes first so no rating write can land on a closing store.

use crate::config::PlatformConfig;
use crate::model::{Booking, Restaurant, Review, User};
use crate::service::{BookingService, RatingUpdater, ReviewService};
use crate::stores::{BookingStore, RatingWriter, RestaurantStore, ReviewStore, UserStore};
use store_actor::StoreActor;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running platform: four entity stores, the two services, and the
/// rating aggregation loop.
///
/// # Example
///
/// ```ignore
/// let platform = Platform::new(&PlatformConfig::default());
///
/// let user = platform.users.create(user_data).await?;
/// let restaurant = platform.restaurants.create(restaurant_data).await?;
/// let booking = platform.bookings.create(booking_data).await?;
///
/// platform.shutdown().await?;
/// ```
pub struct Platform {
    /// Booking lifecycle operations.
    pub bookings: BookingService,

    /// Review gate and review operations.
    pub reviews: ReviewService,

    /// Direct handle for seeding and reading users.
    pub users: UserStore,

    /// Direct handle for seeding and reading restaurants.
    pub restaurants: RestaurantStore,

    shutdown: broadcast::Sender<()>,
    rating_task: JoinHandle<()>,
    store_tasks: Vec<JoinHandle<()>>,
}

impl Platform {
    /// Spawns every store actor and the aggregation loop, wired per
    /// `config`.
    pub fn new(config: &PlatformConfig) -> Self {
        let (user_actor, user_client) = StoreActor::<User>::new(&config.store);
        let (restaurant_actor, restaurant_client) = StoreActor::<Restaurant>::new(&config.store);
        let (booking_actor, booking_client) = StoreActor::<Booking>::new(&config.store);
        let (review_actor, review_client) = StoreActor::<Review>::new(&config.store);

        let store_tasks = vec![
            tokio::spawn(user_actor.run()),
            tokio::spawn(restaurant_actor.run()),
            tokio::spawn(booking_actor.run()),
            tokio::spawn(review_actor.run()),
        ];

        let users = UserStore::new(user_client);
        let restaurants = RestaurantStore::new(restaurant_client.clone());
        let booking_store = BookingStore::new(booking_client.clone());
        let review_store = ReviewStore::new(review_client);

        let bookings = BookingService::new(
            booking_store,
            users.clone(),
            restaurants.clone(),
            &config.cache,
        );
        let reviews = ReviewService::new(
            review_store.clone(),
            booking_client,
            users.clone(),
            restaurants.clone(),
            &config.cache,
        );

        // The writer is built exactly once and moves into the loop; rating
        // writes have no other path.
        let writer = RatingWriter::new(restaurant_client);
        let updater = RatingUpdater::new(restaurants.clone(), review_store, writer, config.rating);

        let (shutdown, shutdown_rx) = broadcast::channel(1);
        let rating_task = updater.spawn(shutdown_rx);

        info!("Platform started");
        Self {
            bookings,
            reviews,
            users,
            restaurants,
            shutdown,
            rating_task,
            store_tasks,
        }
    }

    /// Gracefully shuts the platform down: stops the aggregation loop, then
    /// the stores, reporting any task that panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down platform...");

        // Receivers may already be gone if the loop died early.
        let _ = self.shutdown.send(());
        if let Err(e) = self.rating_task.await {
            error!("Rating task failed: {:?}", e);
            return Err(format!("Rating task failed: {:?}", e));
        }

        // Dropping every client closes the store channels; the actors
        // drain and exit.
        drop(self.bookings);
        drop(self.reviews);
        drop(self.users);
        drop(self.restaurants);

        for task in self.store_tasks {
            if let Err(e) = task.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Platform shutdown complete.");
        Ok(())
    }
}
