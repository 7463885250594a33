use anyhow::{Result, bail};
use chrono::Utc;
use tracing::{error, info};

use movie_catalog::{MovieApi, MovieGateway, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    movie_catalog::init_tracing();

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let settings = Settings::new()?;

    println!("Starting health check at: {}", timestamp);
    println!("API: {}", settings.api.base_url);

    let api = MovieApi::new(&settings.api)?;

    let health = match api.health().await {
        Ok(health) => health,
        Err(e) => {
            error!(error = %e, "Health endpoint unreachable");
            bail!("health check failed: {}", e);
        }
    };
    println!("Status: {}", health.status);
    if !health.is_ok() {
        bail!("API reported status {:?}", health.status);
    }

    let started = std::time::Instant::now();
    let movies = api.list_movies(1, 0).await?;
    info!(
        returned = movies.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Movie listing reachable"
    );

    println!("Movie listing OK ({} ms)", started.elapsed().as_millis());
    println!("Health check completed successfully!");

    Ok(())
}
