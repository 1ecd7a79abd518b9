//! Demo binary: seeds a user and a restaurant, walks one booking through
//! its lifecycle, attaches a review, lets the aggregation loop run, and
//! reads the resulting rating back.

use std::time::Duration;

use chrono::Utc;
use maitred::model::{
    BookingCreate, BookingPatch, BookingStatus, RestaurantCreate, ReviewCreate, UserCreate,
};
use maitred::{Platform, PlatformConfig};
use store_actor::tracing::setup_tracing;
use store_actor::StoreHandle;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting booking platform demo");

    // Short aggregation period so the demo sees a rating before it exits.
    let mut config = PlatformConfig::default();
    config.rating.period = Duration::from_millis(200);
    let platform = Platform::new(&config);

    let user = platform
        .users
        .create(UserCreate {
            name: "Alice".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(user_id = %user.id, "User created");

    let restaurant = platform
        .restaurants
        .create(RestaurantCreate {
            name: "The Golden Fork".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(restaurant_id = %restaurant.id, "Restaurant created");

    let span = tracing::info_span!("booking_lifecycle");
    let booking = async {
        info!("Walking a booking through its lifecycle");
        let booking = platform
            .bookings
            .create(BookingCreate {
                user_id: user.id,
                restaurant_id: restaurant.id,
                scheduled_at: Utc::now() + chrono::Duration::hours(2),
                status: None,
            })
            .await
            .map_err(|e| e.to_string())?;
        info!(booking_id = %booking.id, status = %booking.status, "Booking created");

        for status in [BookingStatus::Confirmed, BookingStatus::Complete] {
            let view = platform
                .bookings
                .patch(
                    booking.id,
                    BookingPatch {
                        scheduled_at: None,
                        status: Some(status),
                    },
                )
                .await
                .map_err(|e| e.to_string())?;
            info!(booking_id = %view.id, status = %view.status, "Booking advanced");
        }
        Ok::<_, String>(booking)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("review_flow");
    async {
        let review = ReviewCreate {
            booking_id: booking.id,
            user_id: user.id,
            restaurant_id: restaurant.id,
            rating: 9.0,
            comment: "Great evening".to_string(),
        };
        let view = platform
            .reviews
            .create(review.clone())
            .await
            .map_err(|e| e.to_string())?;
        info!(review_id = %view.id, rating = view.rating, "Review created");

        // One review per booking; the second attempt must bounce.
        match platform.reviews.create(review).await {
            Ok(_) => error!("Second review unexpectedly accepted"),
            Err(e) => info!(error = %e, kind = ?e.kind(), "Second review refused"),
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Give the aggregation loop a couple of periods to pick the review up.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let rated = platform
        .restaurants
        .get(restaurant.id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "restaurant disappeared".to_string())?;
    info!(restaurant_id = %rated.id, rating = rated.rating, "Rating after aggregation");

    platform.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
