//! Logging setup.
//!
//! The library only emits `tracing` events. Binaries call
//! [`init_logging`] once to install a formatter; `RUST_LOG` overrides the
//! default directive.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{KindlingError, KindlingResult};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "kindling=info";

/// Installs a global fmt subscriber filtered by `RUST_LOG` or `default_directive`.
///
/// # Errors
///
/// Returns an internal error if a global subscriber is already installed.
pub fn init_logging(default_directive: &str) -> KindlingResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| KindlingError::internal(format!("failed to install subscriber: {e}")))
}
