//! raindrop-search — search Raindrop.io bookmarks from the terminal.
//!
//! Usage: `raindrop-search [--collection ID] [--type T] [--sort S] [--all] [--config PATH] QUERY...`
//!
//! Prints the first page of results (every page with `--all`) together with
//! the title of each bookmark's collection. Logs go to stderr.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use raindrop_search::app::{App, FilterSelection};
use raindrop_search::logging;
use raindrop_search::managers::raindrop_fetcher::{FetchPhase, FetchSnapshot};
use raindrop_search::services::notifier::LogNotifier;
use raindrop_search::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Search Raindrop.io bookmarks from the terminal.
///
/// The bearer token is read from RAINDROP_TOKEN or api.token in the settings file.
#[derive(Debug, Parser)]
#[command(name = "raindrop-search", version)]
struct Cli {
    /// all, unsorted, trash or a numeric collection id
    #[arg(long, default_value = "all")]
    collection: String,

    /// all, link, article, image, video, document or audio
    #[arg(long = "type", default_value = "all")]
    type_filter: String,

    /// relevance, -created, created, title, -title, domain or -domain
    #[arg(long, default_value = "relevance", allow_hyphen_values = true)]
    sort: String,

    /// Fetch every page instead of only the first
    #[arg(long)]
    all: bool,

    /// Settings file to use instead of the platform default
    #[arg(long)]
    config: Option<String>,

    /// Search text; words are joined with spaces
    query: Vec<String>,
}

impl Cli {
    fn selection(&self) -> FilterSelection {
        FilterSelection {
            collection: self.collection.clone(),
            search: self.query.join(" "),
            type_filter: self.type_filter.clone(),
            sort: self.sort.clone(),
        }
    }
}

fn print_results(app: &App, snapshot: &FetchSnapshot) {
    for raindrop in &snapshot.raindrops {
        println!("{}", raindrop.display_title());
        println!("    {}", raindrop.link);
        if let Some(collection) = app.collections.collection_title(raindrop.collection_id()) {
            println!("    [{}]", collection);
        }
    }
    println!();
    println!(
        "{} of {} bookmark(s){}",
        snapshot.raindrops.len(),
        snapshot.total_count,
        if snapshot.has_more { ", more available (--all)" } else { "" }
    );
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let selection = cli.selection();
    let mut settings_engine = SettingsEngine::new(cli.config);
    let settings = settings_engine.load()?;
    logging::init(settings.logging.debug);

    let token = settings_engine.resolve_token()?;
    let mut app = App::new(settings_engine, &token, Arc::new(LogNotifier))?;

    // Titles and numeric ids are only known once the tree is loaded.
    if let Err(e) = app.collections.refresh().await {
        debug!(error = %e, "continuing without collection titles");
    }
    app.apply_selection(&selection)?;

    let snapshot = if cli.all {
        app.fetcher.load_remaining().await
    } else {
        app.fetcher.settled().await
    };

    if snapshot.phase == FetchPhase::Idle {
        return Err("search failed".into());
    }
    print_results(&app, &snapshot);
    if cli.all && snapshot.has_more {
        return Err(format!("page {} failed to load", snapshot.page + 2).into());
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
