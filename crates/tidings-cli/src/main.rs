//! Tidings.

mod cli;
mod config;
mod logging;
mod newsapi;
mod prelude;
mod serve;

#[cfg(test)]
mod tests;

use prelude::internal::*;
use prelude::*;

const DEFAULT_CONFIG_PATH: &str = "tidings.toml";
const DEFAULT_PORT: u16 = 3000;

/// Entry point for tidings.
#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    // Initial setup.
    let cli = Cli::parse();
    let config = Arc::new(match cli.parse_config() {
        Ok(config) => config,
        Err(e) => bail!("Failed to parse config:\n{e}"),
    });
    setup_logging(&cli, &config)?;

    // One explicitly-owned cache store, shared by the aggregator, the
    // refresher, and the server.
    let cache = Arc::new(Mutex::new(news::CacheStore::new(
        config.cache.entry_ttl(),
    )));
    let api_key = config.provider.resolved_api_key();
    let provider = NewsApi::new(&config.provider, api_key.clone())?;
    let aggregator = Arc::new(news::Aggregator::new(
        Arc::new(provider),
        cache,
        config.cache.search_entry_ttl(),
    ));

    let cancel_token = CancellationToken::new();
    let mut tasks = JoinSet::new();

    // Keep hot cache entries warm in the background.
    let mut refresher = news::PeriodicRefresher::new();
    match api_key {
        Some(_) => {
            tracing::info!(
                "Refreshing cached news every {}.",
                humantime::format_duration(config.cache.refresh_interval)
            );
            refresher
                .start(aggregator.clone(), config.cache.refresh_interval);
        }
        None => tracing::warn!(
            "No provider api key configured; periodic cache refresh disabled."
        ),
    }

    // Serve the news api:
    tasks.spawn(serve_cli(
        cli.port,
        config.clone(),
        aggregator,
        cancel_token.clone(),
    ));

    // Wait for ctrl+c (top-level):
    {
        let cancel_token = cancel_token.clone();
        tasks.spawn(async move {
            tokio::select! {
                _ = cancel_token.cancelled() => {},
                _ = tokio::signal::ctrl_c() => {
                    cancel_token.cancel();
                },
            };
            Ok(())
        });
    }

    // Wait for tasks to complete.
    while let Some(task_res) = tasks.join_next().await {
        // If the task failed, print the error.
        if let Err(e) = task_res {
            tracing::error!("{}", e);
        }

        // Kill all other tasks.
        cancel_token.cancel();
    }

    refresher.stop();

    Ok(())
}
