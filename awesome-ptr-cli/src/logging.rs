///! Logging configuration
///! Console logging through tracing-subscriber, plain or JSON

use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,     // log level (trace, debug, info, warn, error)
    pub json_format: bool, // use JSON formatting
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Map `-v` occurrences to a level
    pub fn from_verbosity(verbose: u8, json_format: bool) -> Self {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        Self {
            level: level.to_string(),
            json_format,
        }
    }

    /// Initialize logging based on configuration. `RUST_LOG` wins over the
    /// configured level.
    pub fn init(&self) -> anyhow::Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level));

        // Logs go to stderr so replay output stays pipeable
        let result = if self.json_format {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(true)
                        .with_writer(io::stderr),
                )
                .try_init()
        };
        result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

        tracing::debug!("Logging initialized - level: {}", self.level);
        Ok(())
    }
}
