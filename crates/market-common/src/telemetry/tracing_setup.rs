//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.
//! `RUST_LOG` wins over the configured level when it is set.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{AppSettings, LogFormat};

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive (e.g., "info", "market_api=debug,sqlx=warn")
    pub filter: String,
    /// Enable JSON output format
    pub json: bool,
    /// Include span close events (carry request latency)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            span_events: false,
            file_line: true,
        }
    }
}

impl TracingConfig {
    /// Development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            filter: "debug,sqlx=warn,hyper=info".to_string(),
            json: false,
            span_events: true,
            file_line: true,
        }
    }

    /// Production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            filter: "info".to_string(),
            json: true,
            span_events: false,
            file_line: false,
        }
    }

    /// Build from application settings
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        let mut config = if settings.env.is_production() {
            Self::production()
        } else {
            Self::development()
        };

        if !settings.log_level.trim().is_empty() && !settings.env.is_development() {
            config.filter.clone_from(&settings.log_level);
        }

        match settings.log_format {
            LogFormat::Json => config.json = true,
            LogFormat::Pretty => config.json = false,
            LogFormat::Auto => {}
        }

        config
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Try to initialize tracing with the given configuration
///
/// Safe to call more than once; later calls return `AlreadyInitialized`.
pub fn try_init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json {
        fmt::layer()
            .json()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(config.span_events())
            .boxed()
    } else {
        fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_span_events(config.span_events())
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
