//! Command-line configuration.
//!
//! [`Args`] is what clap parses; [`Config`] is the validated form the binary
//! runs with.

use std::path::PathBuf;

use clap::Parser;
use neurozip_client::{DEFAULT_SERVER, HttpTransport, TransportError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// NeuroZip terminal client
#[derive(Parser, Debug, Clone)]
#[command(name = "neurozip")]
#[command(about = "Compress and decompress text with a NeuroZip service")]
#[command(version)]
pub struct Args {
    /// Base address of the NeuroZip service
    #[arg(short, long, env = "NEUROZIP_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Write logs to this file
    ///
    /// The terminal belongs to the UI, so nothing is logged without it.
    #[arg(long, env = "NEUROZIP_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level filter (overridden by `RUST_LOG`)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The service address is not a usable base URL.
    #[error("invalid server address: {0}")]
    Server(#[from] TransportError),

    /// The log filter does not parse.
    #[error("invalid log level {level:?}: {reason}")]
    LogLevel {
        /// Filter as given.
        level: String,
        /// Parser message.
        reason: String,
    },

    /// The log file cannot be opened.
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        /// Path as given.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A global subscriber was already installed.
    #[error("logging already initialised: {0}")]
    Logging(String),
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Normalised service address, for display.
    pub server: String,
    /// Transport bound to `server`.
    pub transport: HttpTransport,
    /// Log destination. `None` disables logging.
    pub log_file: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Validate parsed arguments.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(args.server.trim())?;

        EnvFilter::try_new(&args.log_level).map_err(|e| ConfigError::LogLevel {
            level: args.log_level.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            server: transport.base_url().to_string(),
            transport,
            log_file: args.log_file,
            log_level: args.log_level,
        })
    }
}
