//! mediatrack - terminal catalog viewer for movies and TV shows.

/// Application configuration (TOML).
mod config;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use mediatrack_api::tmdb::{
    Category, Country, ImageSize, ListParams, LocalCatalogApi, MediaDetail, MediaKind,
    MediaSummary, PageResult, SearchParams, TmdbClient, image_url, trailer_embed_url,
};
use mediatrack_tui::{Controller, run_browser};

/// Environment variable holding the TMDB API key.
const API_KEY_ENV: &str = "TMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print one page of a category list.
    List(ListArgs),
    /// Print one page of search results.
    Search(SearchArgs),
    /// Print the details of one item.
    Detail(DetailArgs),
    /// Print the country reference list.
    Countries,
    /// Browse the catalog in the terminal.
    Browse(BrowseArgs),
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// `movie` or `tv` (default: from config).
    #[arg(long)]
    kind: Option<MediaKind>,
    /// `now_playing`, `popular`, `top_rated`, or `upcoming` (default: from config).
    #[arg(long)]
    category: Option<Category>,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Region override (ISO 3166-1, e.g. "US").
    #[arg(long)]
    region: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// `movie` or `tv` (default: from config).
    #[arg(long)]
    kind: Option<MediaKind>,
    /// Search text (e.g. "Stree").
    #[arg(long, required = true)]
    query: String,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Region override (ISO 3166-1, e.g. "US").
    #[arg(long)]
    region: Option<String>,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// `movie` or `tv`.
    #[arg(long, required = true)]
    kind: MediaKind,
    /// TMDB item ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Initial kind (default: from config).
    #[arg(long)]
    kind: Option<MediaKind>,
    /// Initial category (default: from config).
    #[arg(long)]
    category: Option<Category>,
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from the `TMDB_API_KEY` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key = std::env::var(API_KEY_ENV)
        .with_context(|| format!("{API_KEY_ENV} environment variable is required"))?;

    TmdbClient::builder()
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .defaults(config.catalog.to_defaults())
        .build()
        .context("failed to build TMDB client")
}

/// Logs one page of summaries, one line per item.
fn print_page(page: &PageResult<MediaSummary>, current_page: u32) {
    tracing::info!("Page {} of {}", current_page, page.total_pages);
    tracing::info!("ID\tDate\t\tRating\tTitle");
    for item in &page.items {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}",
            item.id(),
            item.date_field().unwrap_or("-"),
            item.core().vote_average,
            item.title(),
        );
    }
    tracing::info!("Total: {} items", page.items.len());
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid, the client fails to build,
/// or the API request fails.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let kind = args.kind.map_or_else(|| config.browse.media_kind(), Ok)?;
    let category = args.category.map_or_else(|| config.browse.category(), Ok)?;
    let client = build_tmdb_client(&config)?;

    let mut params = ListParams::new(kind, category).page(args.page);
    params.region.clone_from(&args.region);

    let page = client
        .list_by_category(&params)
        .await
        .context("TMDB list request failed")?;
    print_page(&page, params.page);

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid, the client fails to build,
/// or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let kind = args.kind.map_or_else(|| config.browse.media_kind(), Ok)?;
    let client = build_tmdb_client(&config)?;

    let mut params = SearchParams::new(kind, args.query.as_str()).page(args.page);
    params.region.clone_from(&args.region);

    let page = client
        .search(&params)
        .await
        .context("TMDB search request failed")?;
    print_page(&page, params.page);

    Ok(())
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let detail = client
        .detail(args.kind, args.id)
        .await
        .context("TMDB detail request failed")?;

    let core = detail.core();
    tracing::info!("{} ({})", core.title, core.id);
    match &detail {
        MediaDetail::Movie(movie) => {
            tracing::info!(
                "Released: {}",
                movie.summary.release_date.as_deref().unwrap_or("-")
            );
            tracing::info!(
                "Runtime: {}",
                movie
                    .runtime
                    .map_or_else(|| String::from("-"), |m| format!("{m} min"))
            );
            tracing::info!("Genres: {}", movie.genres.join(", "));
        }
        MediaDetail::Show(show) => {
            tracing::info!(
                "First aired: {}",
                show.summary.first_air_date.as_deref().unwrap_or("-")
            );
            tracing::info!("Status: {}", show.summary.status.as_deref().unwrap_or("-"));
            if let Some(next) = &show.next_episode_to_air {
                tracing::info!(
                    "Next episode: S{}E{} on {}",
                    next.season_number,
                    next.episode_number,
                    next.air_date.as_deref().unwrap_or("-")
                );
            }
        }
    }
    tracing::info!(
        "Rating: {:.1}  Popularity: {:.1}",
        core.vote_average,
        core.popularity
    );
    tracing::info!("Overview: {}", core.overview);
    if let Some(trailer) = detail.trailer() {
        tracing::info!("Trailer: {}", trailer_embed_url(trailer));
    }
    if let Some(path) = &core.poster_path {
        tracing::info!("Poster: {}", image_url(ImageSize::Poster, path));
    }
    for backdrop in detail.assets().backdrop_preview() {
        tracing::info!(
            "Backdrop: {}",
            image_url(ImageSize::Thumbnail, &backdrop.file_path)
        );
    }

    Ok(())
}

/// Runs the `countries` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_countries(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let countries: Vec<Country> = client
        .countries()
        .await
        .context("TMDB countries request failed")?;

    tracing::info!("Code\tName");
    for country in &countries {
        tracing::info!("{}\t{}", country.code, country.name);
    }
    tracing::info!("Total: {} countries", countries.len());

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid, the client fails to build,
/// or the terminal UI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let kind = args.kind.map_or_else(|| config.browse.media_kind(), Ok)?;
    let category = args.category.map_or_else(|| config.browse.category(), Ok)?;
    let client = build_tmdb_client(&config)?;

    tracing::info!(%kind, %category, "launching browser");
    let controller = Controller::new(Arc::new(client), kind, category);
    run_browser(controller).await.context("catalog browser failed")
}

/// Initializes tracing.
///
/// The browser owns the terminal, so its logs go to `log_file` instead of stdout.
fn init_tracing(log_file: Option<PathBuf>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (stdout_layer, file_layer) = match log_file {
        None => (
            Some(tracing_subscriber::fmt::layer().with_target(false)),
            None,
        ),
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            (
                None,
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                ),
            )
        }
    };

    #[cfg(feature = "otel")]
    let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .and_then(|_| {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .build()
                .ok()?;

            let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                .with_simple_exporter(exporter)
                .build();

            let tracer = opentelemetry::trace::TracerProvider::tracer(
                &tracer_provider,
                env!("CARGO_PKG_NAME"),
            );
            opentelemetry::global::set_tracer_provider(tracer_provider);

            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        });
    #[cfg(not(feature = "otel"))]
    let otel_layer: Option<tracing_subscriber::layer::Identity> = None;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .with(otel_layer)
        .init();

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_ref();

    let log_file = match &cli.command {
        Commands::Browse(_) => Some(resolve_log_path(dir).context("failed to resolve log path")?),
        _ => None,
    };
    init_tracing(log_file)?;

    match &cli.command {
        Commands::List(args) => run_list(args, dir).await,
        Commands::Search(args) => run_search(args, dir).await,
        Commands::Detail(args) => run_detail(args, dir).await,
        Commands::Countries => run_countries(dir).await,
        Commands::Browse(args) => run_browse(args, dir).await,
    }
}
