use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Movie, RatingAggregate};
use crate::services::gateway::MovieGateway;
use crate::services::listing::MovieListing;
use crate::services::rating::RatingForm;

/// Page-level flows that combine more than one gateway call.
#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn MovieGateway>,
}

impl CatalogService {
    pub fn new(gateway: Arc<dyn MovieGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &dyn MovieGateway {
        self.gateway.as_ref()
    }

    pub async fn load(&self, listing: &mut MovieListing, limit: u32, offset: u32) -> bool {
        listing.load(self.gateway.as_ref(), limit, offset).await
    }

    /// Submits the form for `movie`, then re-fetches the movie so the
    /// displayed aggregate is the server's. If the re-fetch fails the
    /// aggregate returned by the submission is applied instead.
    pub async fn rate_movie(&self, form: &mut RatingForm, movie: &mut Movie) -> Result<RatingAggregate> {
        let aggregate = form.submit(self.gateway.as_ref()).await?;

        match self.gateway.get_movie(movie.id).await {
            Ok(updated) => *movie = updated,
            Err(e) => {
                warn!(
                    movie_id = movie.id,
                    error = %e,
                    "Re-fetch after rating failed, using submitted aggregate"
                );
                movie.apply_aggregate(&aggregate);
            }
        }

        Ok(aggregate)
    }

    /// Triggers the server-side recomputation and reloads the listing, since
    /// the refresh itself returns no movies.
    pub async fn refresh_and_reload(
        &self,
        listing: &mut MovieListing,
        limit: u32,
        offset: u32,
    ) -> Result<bool> {
        let outcome = self.gateway.refresh_aggregates().await?;
        info!(refreshed = outcome.refreshed, "Requested aggregate refresh");

        self.load(listing, limit, offset).await;
        Ok(outcome.refreshed)
    }
}
