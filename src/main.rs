//! Crawl visit browser - Entry Point

use clap::Parser;
use crawlview::backend::HttpBackend;
use crawlview::model::{Query, QueryMode};
use crawlview::view::{ColorConfig, StartupOptions};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Browse web-crawl visits and their DNS, content, SMTP and fingerprint results
#[derive(Parser, Debug)]
#[command(name = "crawlview")]
#[command(version)]
#[command(about = "TUI for browsing web-crawl visits of a domain")]
pub struct Args {
    /// Base URL of the crawl inspection API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with a domain search
    #[arg(short, long, value_name = "NAME", conflicts_with = "visit")]
    pub domain: Option<String>,

    /// Start on the detail screen of a visit
    #[arg(short, long, value_name = "ID")]
    pub visit: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Query to submit on startup, if `--domain` or `--visit` was given.
    fn initial_query(&self) -> Result<Option<Query>, crawlview::model::ValidationError> {
        match (&self.domain, &self.visit) {
            (Some(domain), _) => Query::new(QueryMode::DomainSearch, domain).map(Some),
            (None, Some(visit)) => Query::new(QueryMode::VisitIdLookup, visit).map(Some),
            (None, None) => Ok(None),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = crawlview::config::resolve(args.config.clone(), args.api_url.clone(), args.timeout)?;

    crawlview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // Validate before touching the terminal so errors print normally
    let initial_query = args.initial_query()?;
    let backend = HttpBackend::new(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let options = StartupOptions {
        initial_query,
        color: ColorConfig::from_env_and_args(args.no_color),
    };

    crawlview::view::run_with_backend(Arc::new(backend), options)?;

    Ok(())
}
