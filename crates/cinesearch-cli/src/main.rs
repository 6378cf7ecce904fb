//! cinesearch - terminal movie search backed by TMDB.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use crate::tui::components::search_bar::validate_query;
use crate::tui::{TuiOptions, run_search_tui};
use cinesearch_api::tmdb::{LocalMovieApi, SearchMovieParams, TmdbClient};
use cinesearch_query::QueryClient;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run (default: tui).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Interactive movie search.
    Tui(TuiArgs),
    /// One-shot search printed to stdout.
    Search(SearchArgs),
    /// Config file operations.
    Config(ConfigCommand),
}

/// Arguments for the `tui` subcommand.
#[derive(clap::Args, Default)]
struct TuiArgs {
    /// Query to search for on startup.
    #[arg(long)]
    query: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Response language (default: config `tmdb.language`).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the config file path.
    Path,
    /// Print the effective config as TOML.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Builds a TMDB client from config and `TMDB_API_TOKEN`.
///
/// A missing token is not an error here; the API answers 401 instead.
///
/// # Errors
///
/// Returns an error if the base URL override is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(config.timeout());

    match std::env::var("TMDB_API_TOKEN") {
        Ok(token) => builder = builder.api_token(token),
        Err(_) => tracing::warn!("TMDB_API_TOKEN is not set; requests will be unauthenticated"),
    }
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is blank, the config is invalid or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&Path>) -> Result<()> {
    let query = validate_query(&args.query)?;
    let config = AppConfig::load(&resolve_config_path(dir)?)?;
    let client = build_tmdb_client(&config)?;

    let params = SearchMovieParams::new(&query)
        .page(args.page)
        .language(args.language.as_deref().unwrap_or(&config.tmdb.language))
        .include_adult(config.tmdb.include_adult);

    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    if response.is_empty() {
        tracing::info!("No movies found for your request");
        return Ok(());
    }

    tracing::info!(
        "Page {} of {} ({} results)",
        response.page,
        response.total_pages,
        response.total_results
    );
    tracing::info!("ID\tTitle\t\t\tOrigLang\tReleaseDate\tRating");
    for result in &response.results {
        tracing::info!(
            "{}\t{}\t{}\t\t{}\t{:.1}",
            result.id,
            result.title,
            result.original_language,
            result.release_date.as_deref().unwrap_or("-"),
            result.vote_average,
        );
    }

    Ok(())
}

/// Runs the `tui` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid or the terminal fails.
async fn run_tui(args: TuiArgs, config: &AppConfig) -> Result<()> {
    let client = QueryClient::new(build_tmdb_client(config)?, config.query_config());
    let options = TuiOptions {
        initial_query: args.query,
        toast_duration: config.toast_duration(),
    };
    tracing::info!("starting TUI");
    run_search_tui(client, options).await
}

/// Runs the `config` subcommands.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file cannot be read or written.
fn run_config(cmd: &ConfigSubcommands, dir: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    match cmd {
        ConfigSubcommands::Path => {
            tracing::info!("{}", path.display());
        }
        ConfigSubcommands::Show => {
            let config = AppConfig::load(&path)?;
            tracing::info!("# {}\n{}", path.display(), config.to_toml()?);
        }
        ConfigSubcommands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            AppConfig::default().save(&path)?;
            tracing::info!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

/// Initializes tracing with `writer` as the fmt output.
fn init_tracing(writer: BoxMakeWriter, ansi: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    #[cfg(not(feature = "otel"))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
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

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Opens the TUI log file next to the config file, in append mode.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_log_writer(dir: Option<&Path>) -> Result<BoxMakeWriter> {
    let path = resolve_log_path(dir)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    let command = cli.command.unwrap_or_else(|| Commands::Tui(TuiArgs::default()));

    // The TUI owns the terminal, so its logs go to a file.
    if matches!(command, Commands::Tui(_)) {
        init_tracing(open_log_writer(dir)?, false);
    } else {
        init_tracing(
            BoxMakeWriter::new(std::io::stdout),
            std::io::stdout().is_terminal(),
        );
    }

    match command {
        Commands::Tui(args) => {
            let config = AppConfig::load(&resolve_config_path(dir)?)?;
            run_tui(args, &config).await
        }
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Config(cmd) => run_config(&cmd.command, dir),
    }
}
