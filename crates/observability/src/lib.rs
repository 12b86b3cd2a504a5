//! Process-wide logging setup shared by the haversack binaries.

/// Tracing subscriber configuration.
pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, LogFormat, TracingConfig};

/// Install the default subscriber: JSON lines on stderr, `RUST_LOG` or `warn`.
///
/// Safe to call multiple times; only the first call installs anything.
pub fn init() {
    tracing::init(&TracingConfig::default());
}
