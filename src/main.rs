// src/main.rs
mod config;
mod extractors;
mod ingest;
mod openrouter;
mod storage;
mod supabase;
mod utils;

use clap::Parser;
use config::IngestConfig;
use extractors::{summarize, DomainPackExtractor};
use ingest::{IngestOptions, Ingestor};
use openrouter::OpenRouterEmbedder;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::StorageManager;
use supabase::SupabaseStore;
use utils::AppError;

/// Parse a Domain Packs markdown file and load it into the mentor knowledge base
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Domain Packs markdown file
    #[arg(short, long, default_value = "data/mentor-knowledge/Domain Packs.md")]
    input: PathBuf,

    /// Only parse and report; no embeddings are requested and nothing is inserted
    #[arg(long)]
    dry_run: bool,

    /// Directory for JSON snapshots of the parsed items and the ingest report
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip items whose name is already stored for the same domain pack
    #[arg(long)]
    skip_existing: bool,

    /// Pause between items in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Debug-level logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments, then set up logging (reads RUST_LOG env var)
    let args = Args::parse();
    utils::logging::setup_logging(args.verbose);
    tracing::info!("Starting domain pack ingestion with args: {:?}", args);

    // 2. Pre-flight: the source document must exist
    let document = read_document(&args.input).await?;

    // 3. Extract items
    let extractor = DomainPackExtractor::new();
    let items = extractor.parse(&document);

    for summary in summarize(&items) {
        tracing::info!(
            "{}: {} items ({} principles, {} mistakes, {} mental models, {} frameworks)",
            summary.domain,
            summary.total(),
            summary.principles,
            summary.mistakes,
            summary.mental_models,
            summary.frameworks
        );
    }
    tracing::info!("Parsed {} total items", items.len());

    // 4. Optional local snapshot
    let storage = match &args.output_dir {
        Some(dir) => Some(StorageManager::new(dir)?),
        None => None,
    };
    let stem = storage::snapshot_stem(&args.input);
    if let Some(storage) = &storage {
        if let Err(e) = storage.save_items(&stem, &args.input, &items) {
            tracing::error!("Failed to save parsed items: {}", e);
        }
    }

    if args.dry_run {
        tracing::info!("Dry run: skipping embedding and insertion");
        return Ok(());
    }
    if items.is_empty() {
        tracing::warn!("No items found in {}, nothing to ingest", args.input.display());
        return Ok(());
    }

    // 5. Build the external clients from explicit configuration
    let config = IngestConfig::from_env()?;
    let embedder = OpenRouterEmbedder::new(&config.embedding)?;
    let store = SupabaseStore::new(&config.supabase)?;
    let options = IngestOptions {
        skip_existing: args.skip_existing,
        request_delay: Duration::from_millis(args.delay_ms),
        ..Default::default()
    };

    // 6. Enrich and persist, one item at a time
    let ingestor = Ingestor::new(embedder, store, options);
    let report = ingestor.run(&items).await;

    if let Some(storage) = &storage {
        if let Err(e) = storage.save_report(&stem, &report) {
            tracing::error!("Failed to save ingest report: {}", e);
        }
    }

    tracing::info!(
        "Processing finished. Inserted {}/{} items (skipped: {}, failed: {})",
        report.inserted,
        report.total,
        report.skipped,
        report.failed
    );

    if report.all_failed() {
        return Err(AppError::Processing(format!(
            "Failed to ingest any of the {} items",
            report.failed
        )));
    }

    Ok(())
}

/// Reads the source document, failing with `NotFound` before any parsing when it is missing.
async fn read_document(path: &Path) -> Result<String, AppError> {
    if !path.is_file() {
        tracing::error!("File not found: {}", path.display());
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }
    tracing::info!("Reading file: {}", path.display());
    Ok(tokio::fs::read_to_string(path).await?)
}
