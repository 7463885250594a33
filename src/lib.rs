pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::Settings;
pub use error::{Error, Result, ValidationError};
pub use models::{HealthStatus, Movie, MovieDraft, RatingAggregate, RatingSubmission, RefreshOutcome};
pub use services::{CatalogService, FormState, MovieApi, MovieGateway, MovieListing, RatingForm};

/// Installs the `tracing` subscriber used by the binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
