//! Tracing/logging setup shared by everything that embeds the ledger.

pub mod config;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with(&ObservabilityConfig::from_env());
}

/// Initialize process-wide observability with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init(config);
}
