use async_trait::async_trait;
use tracing::{debug, info};

use crate::clients::HttpClient;
use crate::config::ApiConfig;
use crate::error::Result;
use crate::models::{
    HealthStatus, Movie, MovieDraft, RatingAggregate, RatingSubmission, RefreshOutcome,
};

/// Typed access to the remote movie/rating API.
///
/// Implementations fail on transport errors and on any non-2xx response, and
/// never retry, cache or deduplicate; callers decide what the user sees.
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// One page of movies, in the order the server returned them.
    async fn list_movies(&self, limit: u32, offset: u32) -> Result<Vec<Movie>>;

    async fn get_movie(&self, id: i64) -> Result<Movie>;

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie>;

    /// The server recomputes the movie's aggregate and returns it.
    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<RatingAggregate>;

    /// Asks the server to rebuild its precomputed analytics. Lists fetched
    /// before this call are not refreshed.
    async fn refresh_aggregates(&self) -> Result<RefreshOutcome>;

    async fn health(&self) -> Result<HealthStatus>;
}

/// [`MovieGateway`] over HTTP.
#[derive(Clone)]
pub struct MovieApi {
    client: HttpClient,
}

impl MovieApi {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        Ok(Self::with_client(HttpClient::new(api)?))
    }

    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

#[async_trait]
impl MovieGateway for MovieApi {
    async fn list_movies(&self, limit: u32, offset: u32) -> Result<Vec<Movie>> {
        let request = self
            .client
            .get("/movies")
            .query(&[("limit", limit), ("offset", offset)]);
        let response = self.client.send(request).await?;
        let movies: Vec<Movie> = self.client.json(response, "movie list").await?;

        debug!(
            limit = limit,
            offset = offset,
            returned = movies.len(),
            "Fetched movie page"
        );
        Ok(movies)
    }

    async fn get_movie(&self, id: i64) -> Result<Movie> {
        let request = self.client.get(&format!("/movies/{}", id));
        let response = self.client.send(request).await?;
        self.client.json(response, "movie").await
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie> {
        let request = self.client.post("/movies").json(draft);
        let response = self.client.send(request).await?;
        let movie: Movie = self.client.json(response, "created movie").await?;

        info!(movie_id = movie.id, title = %movie.title, "Created movie");
        Ok(movie)
    }

    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<RatingAggregate> {
        let request = self.client.post("/ratings").json(submission);
        let response = self.client.send(request).await?;
        let aggregate: RatingAggregate = self.client.json(response, "rating aggregate").await?;

        info!(
            movie_id = aggregate.movie_id,
            average_rating = aggregate.average_rating,
            rating_count = aggregate.rating_count,
            "Rating accepted"
        );
        Ok(aggregate)
    }

    async fn refresh_aggregates(&self) -> Result<RefreshOutcome> {
        let request = self.client.post("/admin/refresh-materialized-views");
        let response = self.client.send(request).await?;
        self.client.json(response, "refresh outcome").await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let request = self.client.get("/health");
        let response = self.client.send(request).await?;
        self.client.json(response, "health").await
    }
}
