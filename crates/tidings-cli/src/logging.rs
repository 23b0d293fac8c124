//! Logging.

use super::*;

use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;

/// Setup logging.
pub fn setup_logging(cli: &Cli, config: &Config) -> Result<()> {
    let level = match cli.verbose {
        true => Level::TRACE,
        false => match cli.debug {
            true => Level::DEBUG,
            false => Level::INFO,
        },
    };
    let filter = tracing_subscriber::filter::Targets::new()
        .with_default(LevelFilter::OFF)
        .with_target("tidings", level)
        .with_target("tidings_cli", level)
        .with_target("tidings_news", level);

    // CLI layer (to stderr).
    let cli_logger = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(filter.clone());

    // File layer.
    let file_logger = match config.log.as_ref() {
        Some(log_file) => {
            let path = PathBuf::from(log_file);
            if let Some(parent_dir) = path.parent() {
                if !parent_dir.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent_dir)?;
                }
            }
            let file = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(filter),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::Registry::default()
        .with(cli_logger)
        .with(file_logger);

    // Set this logger as global.
    if let Err(_) = tracing::subscriber::set_global_default(subscriber) {
        bail!("Unable to initialize logging.");
    }

    Ok(())
}
