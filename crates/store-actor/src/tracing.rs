//! # Observability & Tracing
//!
//! This module provides the tracing setup for the whole store system.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate, providing hierarchical spans that show the complete
//! request flow through stores, caches, and services.
//!
//! ## Configuration
//!
//! Output uses a compact format that hides the crate/module prefix
//! (`with_target(false)`). Log lines stay short while the structured
//! `entity_type` field says which store emitted them.
//!
//! - **Structured logging** with the `tracing` crate
//! - **Hierarchical spans** for request tracing
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** optimized for development
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: startup, shutdown, and final record count
//! - **Store Operations**: Insert, Get, Page, FindWhere, FindByKey, Patch,
//!   Delete, Exists
//! - **Cache Effect**: hits, misses, and invalidations at debug level
//! - **Errors**: rejected patches, duplicate keys, timeouts, and retries
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Very verbose tracing
//! RUST_LOG=trace cargo run
//! ```
//!
//! With `RUST_LOG=info` a booking flow looks like:
//!
//! ```text
//! INFO Store started entity_type="Booking"
//! INFO Created id=1 size=1 entity_type="Booking"
//! INFO Updated id=1 entity_type="Booking"
//! WARN Patch rejected id=1 error=booking 1 is complete entity_type="Booking"
//! ```
//!
//! Run with `RUST_LOG=debug` to also see every request payload as a
//! structured field (`?draft`, `?patch`, `?page`).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "seeding:create_user")
        .init();
}
