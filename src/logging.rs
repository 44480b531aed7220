//! Logging setup.
//!
//! Call [`init`] once at startup, after the config is loaded. `RUST_LOG`
//! takes precedence over the configured level. Logs go to stderr so command
//! output on stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The filter that [`init`] would install.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global tracing subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), InitError> {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(config))
        .with_level(true)
        .with_target(false)
        .with_ansi(config.ansi);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Plain => builder.try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig {
            ansi: false,
            ..Default::default()
        };
        // Another test may have won the race for the first install.
        let _ = init(&config);
        assert!(init(&config).is_err());
    }

    #[test]
    fn test_filter_from_level() {
        let config = LoggingConfig {
            level: "treebites=debug".into(),
            ..Default::default()
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(env_filter(&config).to_string(), "treebites=debug");
        }
    }
}
