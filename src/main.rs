use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use movie_catalog::catalog::{self, AnalyticsDashboard, BrowseQuery, HomeShelves, SortKey};
use movie_catalog::{
    CatalogService, Movie, MovieApi, MovieDraft, MovieListing, RatingForm, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "movie-catalog", about = "Browse and rate movies from the catalog API")]
struct Cli {
    /// Overrides `api.base_url` from config/default.* and APP_API__BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the API is up.
    Health,
    /// Print one page of movies as returned by the server.
    List {
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one movie in full.
    Show { id: i64 },
    /// Add a movie to the catalog.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        actors: Option<String>,
    },
    /// Rate a movie from 1 to 5 stars.
    Rate {
        id: i64,
        #[arg(long)]
        score: u8,
        #[arg(long)]
        user: String,
    },
    /// Search, filter and sort the catalog.
    Browse {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        genre: String,
        #[arg(long, default_value_t = SortKey::Title)]
        sort: SortKey,
    },
    /// List every genre in the catalog.
    Genres,
    /// Featured movie and the home page shelves.
    Home,
    /// Catalog statistics and leaderboards.
    Analytics,
    /// Ask the server to rebuild its analytics views, then show analytics.
    Refresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    movie_catalog::init_tracing();

    let cli = Cli::parse();
    let mut settings = Settings::new()?;
    if let Some(base_url) = cli.base_url {
        settings = settings.with_base_url(base_url);
    }

    info!(
        base_url = %settings.api.base_url,
        started_at = %Utc::now().format("%Y-%m-%d %H:%M:%S"),
        "Starting movie catalog client"
    );

    let api = MovieApi::new(&settings.api)?;
    let service = CatalogService::new(Arc::new(api));

    if let Err(e) = run(cli.command, &service, &settings).await {
        error!(error = %e, "Command failed");
        match e.downcast_ref::<movie_catalog::Error>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("{}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, service: &CatalogService, settings: &Settings) -> Result<()> {
    let gateway = service.gateway();
    let page_limit = settings.catalog.page_limit;

    match command {
        Command::Health => {
            let health = gateway.health().await?;
            println!("API status: {}", health.status);
        }
        Command::List { limit, offset } => {
            let movies = gateway.list_movies(limit, offset).await?;
            for movie in &movies {
                print_row(None, movie);
            }
            println!("{} movies", movies.len());
        }
        Command::Show { id } => {
            let movie = gateway.get_movie(id).await?;
            print_detail(&movie);
        }
        Command::Create {
            title,
            year,
            genre,
            country,
            director,
            actors,
        } => {
            let draft = MovieDraft {
                title,
                release_year: year,
                genre,
                country,
                director,
                actors,
            };
            let movie = gateway.create_movie(&draft).await?;
            println!("Created movie #{}", movie.id);
            print_detail(&movie);
        }
        Command::Rate { id, score, user } => {
            let mut movie = gateway.get_movie(id).await?;
            let mut form = RatingForm::new(id, settings.catalog.rating_reset_delay());
            form.select_score(score);
            form.set_username(user);

            service.rate_movie(&mut form, &mut movie).await?;
            println!("Rating submitted successfully!");
            print_detail(&movie);
        }
        Command::Browse { search, genre, sort } => {
            let listing = load_listing(service, page_limit).await?;
            let query = BrowseQuery { search, genre, sort };
            let results = catalog::browse(listing.movies(), &query);
            for movie in &results {
                print_row(None, movie);
            }
            println!("{} of {} movies (sorted by {})", results.len(), listing.movies().len(), query.sort);
        }
        Command::Genres => {
            let listing = load_listing(service, page_limit).await?;
            for genre in catalog::distinct_genres(listing.movies()) {
                println!("{}", genre);
            }
        }
        Command::Home => {
            let listing = load_listing(service, settings.catalog.home_limit).await?;
            print_home(&HomeShelves::build(listing.movies()));
        }
        Command::Analytics => {
            let listing = load_listing(service, page_limit).await?;
            print_analytics(&AnalyticsDashboard::build(listing.movies()));
        }
        Command::Refresh => {
            let mut listing = MovieListing::new();
            let refreshed = service.refresh_and_reload(&mut listing, page_limit, 0).await?;
            println!("Refreshed: {}", refreshed);
            if let Some(message) = listing.error() {
                bail!(message);
            }
            print_analytics(&AnalyticsDashboard::build(listing.movies()));
        }
    }

    Ok(())
}

async fn load_listing(service: &CatalogService, limit: u32) -> Result<MovieListing> {
    let mut listing = MovieListing::new();
    service.load(&mut listing, limit, 0).await;
    if let Some(message) = listing.error() {
        bail!(message);
    }
    Ok(listing)
}

fn print_row(rank: Option<usize>, movie: &Movie) {
    let rank = rank.map(|r| format!("{:>2}. ", r)).unwrap_or_default();
    let year = movie.release_year.map(|y| y.to_string()).unwrap_or_else(|| "----".to_string());
    let rating = match movie.rating_label() {
        Some(label) => format!("{} ({} ratings)", label, movie.rating_count),
        None => "unrated".to_string(),
    };
    println!(
        "{}#{:<5} {:<40} {} {:<18} {}",
        rank,
        movie.id,
        movie.title,
        year,
        rating,
        movie.genres().join(", ")
    );
}

fn print_detail(movie: &Movie) {
    println!("{} (#{})", movie.title, movie.id);
    if let Some(year) = movie.release_year {
        println!("  Year:      {}", year);
    }
    match movie.rating_label() {
        Some(label) => println!("  Rating:    {} / 5 from {} ratings", label, movie.rating_count),
        None => println!("  Rating:    not rated yet"),
    }
    if let Some(director) = movie.director.as_deref().filter(|d| !d.trim().is_empty()) {
        println!("  Director:  {}", director.trim());
    }
    let genres = movie.genres();
    if !genres.is_empty() {
        println!("  Genres:    {}", genres.join(", "));
    }
    let countries = movie.countries();
    if !countries.is_empty() {
        println!("  Countries: {}", countries.join(", "));
    }
    let cast = movie.top_cast(5);
    if !cast.is_empty() {
        println!("  Cast:      {}", cast.join(", "));
    }
}

fn print_ranked(title: &str, movies: &[&Movie]) {
    println!("\n{}", title);
    for (index, movie) in movies.iter().enumerate() {
        print_row(Some(index + 1), movie);
    }
}

fn print_home(home: &HomeShelves<'_>) {
    match home.featured {
        Some(movie) => {
            println!("Featured");
            print_detail(movie);
        }
        None => println!("No movies in the catalog yet"),
    }
    if !home.top_rated.is_empty() {
        print_ranked("Top Rated Movies", &home.top_rated);
    }
    if !home.recent.is_empty() {
        print_ranked("Recent Releases", &home.recent);
    }
    for shelf in &home.genres {
        print_ranked(&format!("{} Movies", shelf.genre), &shelf.movies);
    }
    if !home.all.is_empty() {
        print_ranked("All Movies", &home.all);
    }
}

fn print_analytics(dashboard: &AnalyticsDashboard<'_>) {
    let stats = &dashboard.stats;
    println!("Total movies:   {}", stats.total_count);
    println!("Rated movies:   {}", stats.rated_count);
    println!("Total reviews:  {}", stats.total_reviews);
    println!("Average rating: {:.2}", stats.average_rating);

    print_ranked("Top 10 Movies", &dashboard.top10);
    for board in &dashboard.leaderboards {
        print_ranked(&format!("Top {} Movies", board.genre), &board.movies);
    }
}
