use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::ModelIndex;
use engine::{RecommendError, SimilarityEngine};
use metadata_client::{omdb::DEFAULT_BASE_URL, MovieMetadata, OmdbClient};
use rand::Rng;
use server::RecommendationOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Find movies similar to the ones you like", long_about = None)]
struct Cli {
    /// Directory holding movie_list.dat and similarity.dat
    #[arg(short, long, env = "REEL_RECS_MODEL_DIR", default_value = "data/model")]
    model_dir: PathBuf,

    /// Load the model from a JSON bundle instead of --model-dir
    #[arg(long, env = "REEL_RECS_MODEL_JSON")]
    model_json: Option<PathBuf>,

    /// OMDb API key, needed for movie details
    #[arg(long, env = "REEL_RECS_OMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OMDb base URL
    #[arg(long, env = "REEL_RECS_OMDB_BASE_URL", default_value = DEFAULT_BASE_URL)]
    omdb_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact movie title (case-sensitive)
        #[arg(long)]
        title: String,

        /// Show the similarity score of each recommendation
        #[arg(long)]
        explain: bool,

        /// Fetch year, runtime and rating for each movie from OMDb
        #[arg(long)]
        details: bool,
    },

    /// Search the catalog for titles
    Search {
        /// Text to look for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show a few random movies with their details
    Featured {
        /// Number of movies to show
        #[arg(long, default_value = "4")]
        count: usize,
    },

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
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
        .init();

    let cli = Cli::parse();

    // Load the model (this may take a moment)
    let start = Instant::now();
    let model = Arc::new(load_model(&cli)?);
    println!(
        "{} Loaded {} titles in {:?}",
        "✓".green(),
        model.len(),
        start.elapsed()
    );

    let engine = Arc::new(SimilarityEngine::new(model));

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Recommend {
            title,
            explain,
            details,
        } => handle_recommend(&cli, engine, title, *explain, *details).await?,
        Commands::Search { title } => handle_search(&engine, title),
        Commands::Featured { count } => handle_featured(&cli, engine, *count).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(engine, *requests, *concurrent).await?,
    }

    Ok(())
}

fn load_model(cli: &Cli) -> Result<ModelIndex> {
    match &cli.model_json {
        Some(path) => {
            println!("Loading model bundle from {}...", path.display());
            ModelIndex::load_from_json(path).context("Failed to load model bundle")
        }
        None => {
            println!("Loading model from {}...", cli.model_dir.display());
            ModelIndex::load_from_dir(&cli.model_dir).context("Failed to load model")
        }
    }
}

fn build_orchestrator(cli: &Cli, engine: Arc<SimilarityEngine>) -> Result<RecommendationOrchestrator> {
    let api_key = cli
        .api_key
        .clone()
        .ok_or_else(|| anyhow!("An OMDb API key is required (--api-key or REEL_RECS_OMDB_API_KEY)"))?;
    let omdb = OmdbClient::new(api_key).with_base_url(cli.omdb_url.clone());
    Ok(RecommendationOrchestrator::new(engine, Arc::new(omdb)))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    cli: &Cli,
    engine: Arc<SimilarityEngine>,
    title: &str,
    explain: bool,
    details: bool,
) -> Result<()> {
    if details {
        let orchestrator = build_orchestrator(cli, engine)?;
        let page = orchestrator.movie_page(title).await?;
        if !page.found {
            print_not_found(orchestrator.engine(), title);
            return Ok(());
        }
        println!("{}", "Selected movie:".bold().blue());
        print_metadata(None, &page.movie);
        println!("{}", "Movie Recommendations:".bold().blue());
        for (i, movie) in page.suggestions.iter().enumerate() {
            print_metadata(Some(i + 1), movie);
        }
        return Ok(());
    }

    match engine.recommend_scored(title) {
        Ok(recommendations) => {
            println!("{}", format!("Movies similar to '{}':", title).bold().blue());
            for (i, rec) in recommendations.iter().enumerate() {
                if explain {
                    println!(
                        "{}. {} - Similarity: {:.3}",
                        (i + 1).to_string().green(),
                        rec.title,
                        rec.score
                    );
                } else {
                    println!("{}. {}", (i + 1).to_string().green(), rec.title);
                }
            }
        }
        Err(RecommendError::NotFound { .. }) => print_not_found(&engine, title),
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(engine: &SimilarityEngine, title: &str) {
    let matches = engine.model().catalog().search(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  No titles found");
    }
    for entry in matches.iter().take(20) {
        println!("{}: {}", entry.id, entry.title);
    }
    if matches.len() > 20 {
        println!("  ... and {} more", matches.len() - 20);
    }
}

/// Handle the 'featured' command
async fn handle_featured(cli: &Cli, engine: Arc<SimilarityEngine>, count: usize) -> Result<()> {
    let orchestrator = build_orchestrator(cli, engine)?;
    let featured = orchestrator.featured(count).await?;

    println!("{}", "Featured movies:".bold().blue());
    for (i, movie) in featured.iter().enumerate() {
        print_metadata(Some(i + 1), movie);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: Arc<SimilarityEngine>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let catalog_len = engine.model().len();
    if catalog_len == 0 || requests == 0 {
        return Err(anyhow!("Benchmark needs a non-empty catalog and at least one request"));
    }

    // Pick random titles to query
    let titles: Vec<String> = {
        let mut rng = rand::rng();
        let catalog = engine.model().catalog();
        (0..requests)
            .filter_map(|_| catalog.get(rng.random_range(0..catalog_len)))
            .map(|t| t.title.clone())
            .collect()
    };

    // Cap in-flight queries at `concurrent`
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for title in titles {
        let engine = engine.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let elapsed = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                let recs = engine.recommend(&title);
                debug!("{} -> {:?}", title, recs);
                start.elapsed()
            })
            .await?;
            Ok::<_, anyhow::Error>(elapsed)
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    let stats = LatencyStats::from_timings(&mut timings);
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", stats.average);
    println!("P50 latency: {:?}", stats.p50);
    println!("P95 latency: {:?}", stats.p95);
    println!("P99 latency: {:?}", stats.p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Latency summary of a benchmark run
#[derive(Debug, PartialEq)]
struct LatencyStats {
    average: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
}

impl LatencyStats {
    /// Sorts `timings` in place; `timings` must not be empty
    fn from_timings(timings: &mut [Duration]) -> Self {
        timings.sort();
        let total: Duration = timings.iter().sum();
        let percentile = |p: f64| {
            let idx = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
            timings[idx]
        };
        Self {
            average: Duration::from_nanos((total.as_nanos() / timings.len() as u128) as u64),
            p50: percentile(0.50),
            p95: percentile(0.95),
            p99: percentile(0.99),
        }
    }
}

fn print_not_found(engine: &SimilarityEngine, title: &str) {
    println!("{} '{}' was not found in the database.", "✗".red(), title);

    let suggestions = engine.model().catalog().search(title);
    if !suggestions.is_empty() {
        println!("Did you mean:");
        for entry in suggestions.iter().take(5) {
            println!("  - {}", entry.title);
        }
    }
}

/// Print one movie's metadata, optionally prefixed with its rank
fn print_metadata(rank: Option<usize>, movie: &MovieMetadata) {
    let prefix = rank
        .map(|r| format!("{}. ", r.to_string().green()))
        .unwrap_or_default();
    println!(
        "{}{} ({}) - {} - IMDb {}",
        prefix, movie.title, movie.year, movie.runtime, movie.imdb_rating
    );
    if movie.has_poster() {
        println!("   Poster: {}", movie.poster);
    }
}
