use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::DEFAULT_DATASET_PATH;
use favorites::{FavoriteEntry, FavoritesStore, SaveOutcome};
use server::{
    EngineConfig, RecommendationEngine, RecommendationFilters, RecommendationResponse,
    DEFAULT_FAVORITES_DIR, DEFAULT_LIMIT,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Movie recommendations and favorites from a tabular movie dataset", long_about = None)]
struct Cli {
    /// Dataset file path or http(s) URL
    #[arg(long, global = true, env = "REEL_DATASET", default_value = DEFAULT_DATASET_PATH)]
    dataset: String,

    /// Directory the favorites file is kept in
    #[arg(long, global = true, env = "REEL_FAVORITES_DIR", default_value = DEFAULT_FAVORITES_DIR)]
    favorites_dir: PathBuf,

    /// Base URL of the sheet sync service favorites are mirrored to
    #[arg(long, global = true, env = "REEL_SYNC_ENDPOINT")]
    sync_endpoint: Option<String>,

    /// Upper bound on fetching the dataset, in seconds
    #[arg(long, global = true, env = "REEL_FETCH_TIMEOUT_SECS", default_value_t = 30)]
    fetch_timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a page of movie recommendations
    Recommend {
        /// Genre to match (case-insensitive substring)
        #[arg(long)]
        genre: Option<String>,

        /// Any year in the wanted decade, e.g. 1995 for the 1990s
        #[arg(long)]
        year: Option<String>,

        /// Language code; makes the order reproducible per page
        #[arg(long)]
        language: Option<String>,

        /// Number of movies per page
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Number of movies to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the top rated movies from 2010 onwards
    Trending {
        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorite movies
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// Save a movie from the dataset as a favorite
    Add {
        /// Exact title (case-insensitive)
        #[arg(long)]
        title: String,
    },

    /// Remove a favorite
    Remove {
        #[arg(long)]
        title: String,
    },

    /// List all favorites
    List {
        /// Print the favorites as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a movie is a favorite
    Check {
        #[arg(long)]
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::new()
        .with_dataset(cli.dataset)
        .with_fetch_timeout(Duration::from_secs(cli.fetch_timeout_secs))
        .with_favorites_dir(cli.favorites_dir)
        .with_sync_endpoint(cli.sync_endpoint);
    debug!("Using {:?}", config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            genre,
            year,
            language,
            limit,
            offset,
            json,
        } => {
            let mut filters = RecommendationFilters::new().with_limit(limit).with_offset(offset);
            if let Some(genre) = genre {
                filters = filters.with_genre(genre);
            }
            if let Some(year) = year {
                filters = filters.with_year_str(&year);
            }
            if let Some(language) = language {
                filters = filters.with_language(language);
            }
            handle_recommend(&config, &filters, json).await?
        }
        Commands::Trending { json } => handle_trending(&config, json).await?,
        Commands::Favorites { action } => handle_favorites(&config, action).await?,
    }

    Ok(())
}

/// Build the engine and load the dataset up front so load time is visible
async fn load_engine(config: &EngineConfig) -> RecommendationEngine {
    eprintln!("Loading movies from {}...", config.dataset);
    let start = Instant::now();

    let engine = RecommendationEngine::new(Arc::new(config.build_loader()));
    match engine.loader().load_dataset().await {
        Ok(movies) => {
            eprintln!(
                "{} Loaded {} movies in {:?}",
                "✓".green(),
                movies.len(),
                start.elapsed()
            );
        }
        // Queries retry the load and report the failure in their response
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }
    engine
}

/// Handle the 'recommend' command
async fn handle_recommend(
    config: &EngineConfig,
    filters: &RecommendationFilters,
    json: bool,
) -> Result<()> {
    let engine = load_engine(config).await;
    let response = engine
        .get_recommendations(filters)
        .await
        .unwrap_or_else(|e| RecommendationResponse::failure(&e));
    print_response(&response, json, filters.offset)
}

/// Handle the 'trending' command
async fn handle_trending(config: &EngineConfig, json: bool) -> Result<()> {
    let engine = load_engine(config).await;
    let response = engine
        .get_trending()
        .await
        .unwrap_or_else(|e| RecommendationResponse::failure(&e));
    print_response(&response, json, 0)
}

/// Handle the 'favorites' subcommands
async fn handle_favorites(config: &EngineConfig, action: FavoritesCommand) -> Result<()> {
    let store = config.build_favorites().await;

    match action {
        FavoritesCommand::Add { title } => add_favorite(config, &store, &title).await?,
        FavoritesCommand::Remove { title } => {
            store
                .remove(&title)
                .await
                .with_context(|| format!("Failed to remove favorite '{}'", title))?;
            println!("{} Removed '{}' from favorites", "✓".green(), title);
        }
        FavoritesCommand::List { json } => {
            let favorites = store.get_favorites().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&favorites)?);
            } else {
                print_favorites(&favorites);
            }
        }
        FavoritesCommand::Check { title } => {
            if store.is_favorited(&title).await {
                println!("{} '{}' is a favorite", "♥".red(), title);
            } else {
                println!("'{}' is not a favorite", title);
            }
        }
    }
    Ok(())
}

async fn add_favorite(config: &EngineConfig, store: &FavoritesStore, title: &str) -> Result<()> {
    let engine = load_engine(config).await;
    let movie = match engine.find_by_title(title).await? {
        Some(movie) => movie,
        None => bail!("Movie '{}' not found in dataset", title),
    };

    let receipt = store
        .save(&movie)
        .await
        .with_context(|| format!("Failed to save favorite '{}'", movie.title))?;

    match receipt.outcome {
        SaveOutcome::Added => println!("{} Added '{}' to favorites", "✓".green(), movie.title),
        SaveOutcome::AlreadyFavorited => println!("'{}' is already a favorite", movie.title),
    }

    if let Some(mirror) = receipt.mirror {
        println!("  Remote sync: {}", mirror.outcome().await);
    }
    Ok(())
}

/// Helper function to format and print a query response
fn print_response(response: &RecommendationResponse, json: bool, offset: usize) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else if !response.success {
        println!("{}", response.message.red());
    } else {
        println!("{}", response.message.bold().blue());
        if response.movies.is_empty() {
            println!("No movies matched.");
        }
        for (i, movie) in response.movies.iter().enumerate() {
            println!(
                "{}. {} ({}) [{}] - Rating: {:.1}",
                (offset + i + 1).to_string().green(),
                movie.title,
                movie.year,
                movie.genres.join(", "),
                movie.rating
            );
        }
        println!(
            "Showing {} of {} results",
            response.movies.len(),
            response.total_results
        );
    }

    if !response.success {
        bail!("{}", response.message);
    }
    Ok(())
}

fn print_favorites(favorites: &[FavoriteEntry]) {
    if favorites.is_empty() {
        println!("No favorites yet.");
        return;
    }

    println!("{}", "Favorites:".bold().blue());
    for entry in favorites {
        println!(
            "{} {} ({}) - Rating: {:.1}, added {}",
            "•".green(),
            entry.movie_title,
            entry.year,
            entry.rating,
            entry.date_added
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_defaults() {
        let cli = Cli::try_parse_from(["reel-recs", "recommend"]).unwrap();
        assert_eq!(cli.fetch_timeout_secs, 30);
        match cli.command {
            Commands::Recommend { limit, offset, json, genre, .. } => {
                assert_eq!(limit, 6);
                assert_eq!(offset, 0);
                assert!(!json);
                assert!(genre.is_none());
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reel-recs",
            "favorites",
            "add",
            "--title",
            "Heat",
            "--dataset",
            "https://example.com/movies.csv",
        ])
        .unwrap();

        assert_eq!(cli.dataset, "https://example.com/movies.csv");
        assert!(matches!(
            cli.command,
            Commands::Favorites { action: FavoritesCommand::Add { ref title } } if title == "Heat"
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
