//! Logging setup for Folio.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and a
//! formatting layer. Native builds write to stderr and honour `RUST_LOG`.
//! On `wasm32` each formatted event is forwarded to the browser console at
//! the matching level.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod console;

pub use console::LineBuffer;
#[cfg(target_arch = "wasm32")]
pub use console::ConsoleWriter;

/// Filter used when neither the environment nor the config provides one.
pub const DEFAULT_FILTER: &str =
    "warn,folio_form=info,folio_catalog=info,folio_chrome=info,folio_wasm=info";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global subscriber is already installed")]
    AlreadyInitialized,
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives
    pub filter: String,
    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Build the filter. Natively `RUST_LOG` takes precedence.
    pub fn env_filter(&self) -> Result<EnvFilter, Error> {
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.filter).map_err(|e| Error::InvalidFilter {
            filter: self.filter.clone(),
            reason: e.to_string(),
        })
    }
}

/// Install the global subscriber.
///
/// Returns [`Error::AlreadyInitialized`] on a second call instead of
/// panicking, so hosts may call it unconditionally.
pub fn init(config: &LogConfig) -> Result<(), Error> {
    let filter = config.env_filter()?;

    #[cfg(not(target_arch = "wasm32"))]
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    // No clock on wasm32-unknown-unknown, and the console has no ANSI support
    #[cfg(target_arch = "wasm32")]
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(ConsoleWriter)
        .with_target(config.with_target)
        .with_ansi(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|_| Error::AlreadyInitialized)?;

    tracing::debug!(filter = %config.filter, "Logging initialised");
    Ok(())
}
