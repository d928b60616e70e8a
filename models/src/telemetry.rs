//! Tracing setup for hosts of the conversion library.
//!
//! The library only emits `tracing` events and spans. A CLI or service that embeds the converters
//! calls [`init_telemetry_from_env`] once at startup to route them to stdout. Tests build the same
//! subscriber with [`subscriber_from_lookup`] and scope it with `tracing::subscriber::with_default`.
use serde::Deserialize;
use snafu::ResultExt;
use std::env;
use tracing::Subscriber;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, EnvFilter, Registry};

const DEFAULT_TRACING_FILTER_DIRECTIVE: LevelFilter = LevelFilter::INFO;

pub const TRACING_FILTER_DIRECTIVE_ENV_VAR: &str = "TRACING_FILTER_DIRECTIVE";
pub const LOGGING_FORMATTER_ENV_VAR: &str = "LOGGING_FORMATTER";
pub const LOGGING_ANSI_ENABLED_ENV_VAR: &str = "LOGGING_ANSI_ENABLED";

/// Output settings for conversion events.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct LogFormatter {
    message_format: MessageFormat,
    ansi_enabled: bool,
}

impl LogFormatter {
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_lookup(|key| env::var(key).ok())
    }

    /// Reads `LOGGING_FORMATTER` and `LOGGING_ANSI_ENABLED` through `lookup`. Unset variables
    /// fall back to pretty output without colors.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let message_format = lookup(LOGGING_FORMATTER_ENV_VAR)
            .map(|name| {
                serde_plain::from_str::<MessageFormat>(&name)
                    .context(error::LogFormatterEnvSnafu { env_value: name })
            })
            .transpose()?
            .unwrap_or_default();
        let ansi_enabled = lookup(LOGGING_ANSI_ENABLED_ENV_VAR)
            .map(|flag| {
                flag.to_lowercase()
                    .parse::<bool>()
                    .context(error::LogAnsiEnvSnafu { env_value: flag })
            })
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            message_format,
            ansi_enabled,
        })
    }

    pub fn message_format(&self) -> MessageFormat {
        self.message_format
    }

    pub fn ansi_enabled(&self) -> bool {
        self.ansi_enabled
    }

    fn layered<S>(&self, registry: S) -> Box<dyn Subscriber + Send + Sync>
    where
        S: SubscriberExt + Send + Sync + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        let layer = fmt::layer().with_ansi(self.ansi_enabled);
        // Each format is a distinct layer type.
        match self.message_format {
            MessageFormat::Full => Box::new(registry.with(layer)),
            MessageFormat::Compact => Box::new(registry.with(layer.compact())),
            MessageFormat::Pretty => Box::new(registry.with(layer.pretty())),
            MessageFormat::Json => Box::new(registry.with(layer.json())),
        }
    }
}

/// Spelling of `LOGGING_FORMATTER`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// One line per event.
    Full,
    /// One shortened line per event.
    Compact,
    /// Multi-line events.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// The subscriber a host would install, with settings read through `lookup`.
/// `TRACING_FILTER_DIRECTIVE` holds `EnvFilter` directives and defaults to `info`.
pub fn subscriber_from_lookup<F>(lookup: F) -> Result<Box<dyn Subscriber + Send + Sync>>
where
    F: Fn(&str) -> Option<String>,
{
    let formatter = LogFormatter::try_from_lookup(&lookup)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(DEFAULT_TRACING_FILTER_DIRECTIVE.into())
        .parse_lossy(lookup(TRACING_FILTER_DIRECTIVE_ENV_VAR).unwrap_or_default());

    Ok(formatter.layered(Registry::default().with(env_filter)))
}

/// Installs the process-wide subscriber from the environment. Called once by the embedding
/// binary before the first conversion. A second call fails.
pub fn init_telemetry_from_env() -> Result<()> {
    let subscriber = subscriber_from_lookup(|key| env::var(key).ok())?;
    tracing::subscriber::set_global_default(subscriber)
        .context(error::TracingConfigurationSnafu)?;

    Ok(())
}

pub mod error {
    use std::str::ParseBoolError;

    use super::*;
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub))]
    pub enum TelemetryConfigError {
        #[snafu(display("A tracing subscriber is already installed: '{}'", source))]
        TracingConfiguration {
            source: tracing::subscriber::SetGlobalDefaultError,
        },

        #[snafu(display(
            "Unknown log format '{}' in '{}': '{}'",
            env_value,
            LOGGING_FORMATTER_ENV_VAR,
            source
        ))]
        LogFormatterEnv {
            source: serde_plain::Error,
            env_value: String,
        },

        #[snafu(display(
            "'{}' must be true or false, got '{}': '{}'",
            LOGGING_ANSI_ENABLED_ENV_VAR,
            env_value,
            source
        ))]
        LogAnsiEnv {
            source: ParseBoolError,
            env_value: String,
        },
    }
}

type Result<T> = std::result::Result<T, TelemetryConfigError>;
pub use error::TelemetryConfigError;
