//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. Output goes to
//! stdout, or to the configured log file without ANSI colours.

use std::fs::OpenOptions;
use std::sync::Mutex;

use otp_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::InfrastructureError;

/// Install the global tracing subscriber described by `config`
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = build_filter(&config.level)?;
    let writer = build_writer(config)?;
    let ansi = config.colored && config.file.is_none();
    let source = config.source_location;

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_file(source)
            .with_line_number(source)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_writer(writer)
            .with_file(source)
            .with_line_number(source)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(ansi)
            .with_writer(writer)
            .with_file(source)
            .with_line_number(source)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| InfrastructureError::Config(format!("Failed to install tracing: {}", e)))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Tracing initialised");
    Ok(())
}

/// `RUST_LOG` if set, otherwise `level`
pub fn build_filter(level: &str) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| InfrastructureError::Config(format!("Invalid log level '{}': {}", level, e)))
}

fn build_writer(config: &LoggingConfig) -> Result<BoxMakeWriter, InfrastructureError> {
    let Some(path) = &config.file else {
        return Ok(BoxMakeWriter::new(std::io::stdout));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(BoxMakeWriter::new(Mutex::new(handle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("otp_core=debug,otp_infra=trace").is_ok());
    }
}
