// Error Types - Configuration and registry failures
//
// Everything user-facing degrades at render time (missing entity renders
// nothing); the only hard errors in this crate are config rejection and
// registry lookups.

/// Result type alias
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors surfaced from `set_config` and the card registry.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Structural validation failure: wrong shape, wrong types or unknown
    /// options. The config is rejected wholesale, nothing is applied.
    #[error("invalid card configuration: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("entity `{entity_id}` is not in a supported domain (expected one of {expected:?})")]
    WrongDomain {
        entity_id: String,
        expected: &'static [&'static str],
    },

    #[error("unknown card type `{0}`")]
    UnknownCardType(String),
}
