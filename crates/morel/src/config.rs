// Config Layer - Shared card configuration pieces and validation
//
// Card configs are owned by the host's dashboard store and arrive as JSON.
// `set_config` validates the whole record against the card's typed struct
// (unknown options are rejected) before anything is applied.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Card layout option shared by every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Default,
    Horizontal,
    Vertical,
}

/// Validate and deserialize a card config. All-or-nothing: a single bad or
/// unknown option rejects the whole record.
pub fn parse_config<T: DeserializeOwned>(value: Value) -> Result<T, ConfigError> {
    serde_json::from_value(value).map_err(ConfigError::from)
}

/// Reject a configured entity from a foreign domain. An absent entity is
/// fine; the card renders nothing until one is configured.
pub fn ensure_domain(
    entity: Option<&str>,
    expected: &'static [&'static str],
) -> Result<(), ConfigError> {
    let Some(entity_id) = entity else {
        return Ok(());
    };
    let domain = entity_id.split('.').next().unwrap_or_default();
    if expected.contains(&domain) {
        Ok(())
    } else {
        Err(ConfigError::WrongDomain {
            entity_id: entity_id.to_string(),
            expected,
        })
    }
}
