//! Pokedex - A command-line PokeAPI explorer
//!
//! # Startup Sequence
//! 1. Parse command-line flags
//! 2. Initialize tracing subscriber for logging (stderr)
//! 3. Load configuration from environment variables, then apply flags
//! 4. Create the response cache (starts its reaper)
//! 5. Create the PokeAPI client and session
//! 6. Run the REPL on stdin/stdout until `exit`, end of input or Ctrl+C
//! 7. Shut the cache reaper down and log cache statistics

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Cache, Config, PokeApiClient, Session};

/// Explore the Pokemon world from your terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex", author, version, about, long_about = None)]
struct Cli {
    /// PokeAPI base URL (overrides POKEDEX_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Cache eviction interval in seconds (overrides POKEDEX_CACHE_INTERVAL)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    cache_interval: Option<u64>,

    /// HTTP timeout in seconds (overrides POKEDEX_HTTP_TIMEOUT)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Location areas per page (overrides POKEDEX_PAGE_SIZE)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,

    /// Enable debug logging (cache hits, misses and sweeps)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(interval) = self.cache_interval {
            config.cache_interval = interval;
        }
        if let Some(timeout) = self.timeout {
            config.http_timeout = timeout;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Defaults to warnings only so logs stay out of the way of the REPL;
    // RUST_LOG overrides.
    let default_filter = if cli.verbose {
        "pokedex=debug"
    } else {
        "pokedex=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    cli.apply(&mut config);
    info!(
        "Configuration loaded: api_url={}, cache_interval={}s, http_timeout={}s, page_size={}",
        config.api_base_url, config.cache_interval, config.http_timeout, config.page_size
    );

    let cache = Cache::new(config.cache_interval()).context("Failed to create response cache")?;
    let client =
        PokeApiClient::from_config(&config, cache).context("Failed to create PokeAPI client")?;
    let mut session = Session::new(client);

    let mut stdout = std::io::stdout();
    let interrupted = tokio::select! {
        result = repl::run(&mut session, BufReader::new(tokio::io::stdin()), &mut stdout) => {
            result.context("REPL stopped")?;
            false
        }
        _ = shutdown_signal() => true,
    };

    let cache = session.into_client().into_cache();
    let stats = cache.stats();
    info!(
        "Cache statistics: hits={}, misses={}, reaped={}, entries={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.reaped,
        stats.total_entries,
        stats.hit_rate()
    );
    cache.shutdown().await;

    if interrupted {
        println!("\nClosing the Pokedex... Goodbye!");
        // A blocking stdin read cannot be cancelled and would hold the
        // runtime open until the next line arrives.
        std::process::exit(0);
    }

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, closing the Pokedex...");
        }
        _ = terminate => {
            info!("Received SIGTERM, closing the Pokedex...");
        }
    }
}
