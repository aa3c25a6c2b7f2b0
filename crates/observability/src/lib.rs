//! Tracing/logging setup shared by processes embedding the kernel.

/// Initialize process-wide observability (tracing/logging) from the
/// environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Environment-driven configuration.
pub mod config;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig, UnknownLogFormat};
pub use self::tracing::init_with;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let config = ObservabilityConfig {
            filter: "not a [valid filter".to_string(),
            format: LogFormat::Pretty,
            rejected_format: Some(UnknownLogFormat("xml".to_string())),
        };

        // Whichever call wins, later ones must be harmless no-ops.
        init_with(&config);
        init();
        assert!(!init_with(&ObservabilityConfig::default()));
    }
}
