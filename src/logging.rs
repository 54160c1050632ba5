//! Logging Setup
//!
//! Installs the `tracing` subscriber used by the console. Output goes to
//! stderr (or the configured file) so stdout only carries page output.

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the env filter: `RUST_LOG` wins over the configured level
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("event_manager={}", config.level)))
}

/// Initialize the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<()> {
    let json = config.format.eq_ignore_ascii_case("json");

    let result = match &config.file {
        Some(path) => {
            if let Some(parent) = std::path::Path::new(path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let writer = Mutex::new(file);

            if json {
                tracing_subscriber::registry()
                    .with(env_filter(config))
                    .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(env_filter(config))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_ansi(false)
                            .with_writer(writer),
                    )
                    .try_init()
            }
        }
        None => {
            if json {
                tracing_subscriber::registry()
                    .with(env_filter(config))
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(env_filter(config))
                    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                    .try_init()
            }
        }
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {}", e);
    }

    Ok(())
}
