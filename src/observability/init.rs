//! Tracing initialization and subscriber setup.

use super::file_writer::LogFile;
use crate::domain::{CalcError, Result};
use crate::Config;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable if set
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Output
///
/// Formatted events go to `config.log_file` when set (parent directories are
/// created), otherwise to stderr.
///
/// # Errors
///
/// Returns [`CalcError::Config`] for an unparseable trace level and
/// [`CalcError::Io`] if the log directory cannot be created.
///
/// Calling this more than once is harmless; only the first subscriber sticks.
///
/// # Example
///
/// ```rust
/// use keypad_calc::observability::init_tracing;
/// use keypad_calc::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config).unwrap();
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = config.trace_level.as_deref().unwrap_or("info");
            EnvFilter::try_new(level)
                .map_err(|e| CalcError::Config(format!("invalid trace_level {level:?}: {e}")))?
        }
    };

    let writer = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            BoxMakeWriter::new(LogFile::new(path.clone()))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    Ok(())
}
