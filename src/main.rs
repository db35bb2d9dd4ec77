use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use gell::cache::{CatalogCache, default_cache_path};
use gell::config::{Config, load_config, load_config_from};
use gell::executor;
use gell::matcher::fuzzy_match;
use gell::sources::desktop::DesktopSource;
use gell::state::AppState;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Clear the application cache and exit
    #[arg(long)]
    refresh: bool,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print every application in the catalog
    List,
    /// Print applications matching a query, best first
    Search {
        query: String,
        /// Show at most this many results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print the score next to each name
        #[arg(long)]
        scores: bool,
    },
    /// Launch a result of a query
    Launch {
        query: String,
        /// Position in the result list
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },
    /// Remove the cache file and exit
    ClearCache,
}

fn open_session(config: Config, cache: &CatalogCache<DesktopSource>, query: &str) -> AppState {
    let catalog = cache.load(false);
    log::debug!("Catalog ready: {} entries from {:?}", catalog.len(), cache.path());
    let mut state = AppState::new(config, catalog);
    state.update_query(query);
    state
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let mut config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    // 2. Catalog, through the cache
    let dirs = if config.sources.directories.is_empty() {
        DesktopSource::default_dirs()
    } else {
        config.sources.directories.clone()
    };
    let cache_path = config.cache.path.clone().unwrap_or_else(default_cache_path);
    let cache = CatalogCache::new(cache_path, DesktopSource::new(dirs));

    let command = args.command.unwrap_or(Cmd::List);
    if args.refresh || matches!(command, Cmd::ClearCache) {
        cache.invalidate()?;
        println!("Cache cleared!");
        return Ok(());
    }

    // 3. Query session
    match command {
        Cmd::ClearCache => {}
        Cmd::List => {
            let catalog = cache.load(false);
            for entry in &catalog {
                println!("{}", entry.name);
            }
        }
        Cmd::Search { query, limit, scores } => {
            if let Some(limit) = limit {
                config.general.max_results = limit;
            }
            let state = open_session(config, &cache, &query);
            for entry in state.visible() {
                if scores {
                    let (_, score) = fuzzy_match(&query, &entry.name);
                    println!("{score:>7}  {}", entry.name);
                } else {
                    println!("{}", entry.name);
                }
            }
        }
        Cmd::Launch { query, index } => {
            let launch_config = config.launch.clone();
            let state = open_session(config, &cache, &query);
            let Some(entry) = state.visible().nth(index) else {
                bail!("no application matches {:?} at position {}", query, index);
            };
            if !executor::launch(entry, &launch_config) {
                log::warn!("Could not launch {}", entry.name);
            }
        }
    }

    Ok(())
}
