// Entity Snapshots - Raw host state pushed to the cards
//
// The host owns all entity state. Cards only ever see immutable snapshots:
// a state string plus an attribute map, stamped with the time the host last
// replaced the snapshot. That stamp doubles as the snapshot identity the
// temperature control uses to reconcile in-flight edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State value reported while an entity exists but cannot be reached.
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// State value reported while an entity has no known state yet.
pub const STATE_UNKNOWN: &str = "unknown";

/// State value for an entity that is switched off.
pub const STATE_OFF: &str = "off";

/// Immutable entity-state snapshot as pushed by the host.
///
/// A new push replaces the whole snapshot; `last_updated` changes with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub last_updated: DateTime<Utc>,
}

impl EntityState {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
            last_updated: Utc::now(),
        }
    }

    /// Entity domain, the part of the id before the first `.`.
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map(|(domain, _)| domain)
            .unwrap_or(&self.entity_id)
    }

    /// `friendly_name` attribute, if the host provided one.
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(Value::as_str)
    }

    /// False only for the distinguished `unavailable` state.
    pub fn is_available(&self) -> bool {
        self.state != STATE_UNAVAILABLE
    }

    pub fn is_off(&self) -> bool {
        self.state == STATE_OFF
    }

    /// Available, known and not off. Interactive controls are disabled
    /// while this is false (unless a card opts in to editing while off).
    pub fn is_active(&self) -> bool {
        self.state != STATE_UNAVAILABLE && self.state != STATE_UNKNOWN && self.state != STATE_OFF
    }

    /// Attribute read as a finite float, if present and numeric.
    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attributes
            .get(name)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// Attribute read as a string slice, if present.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(state: &str) -> EntityState {
        EntityState::new("climate.living_room", state)
    }

    #[test]
    fn test_domain() {
        assert_eq!(snapshot("heat").domain(), "climate");
        assert_eq!(EntityState::new("bogus", "on").domain(), "bogus");
    }

    #[test]
    fn test_activity_predicates() {
        assert!(snapshot("heat").is_active());
        assert!(!snapshot(STATE_OFF).is_active());
        assert!(!snapshot(STATE_UNKNOWN).is_active());
        assert!(!snapshot(STATE_UNAVAILABLE).is_active());
        assert!(!snapshot(STATE_UNAVAILABLE).is_available());
        assert!(snapshot(STATE_OFF).is_available());
    }

    #[test]
    fn test_attr_accessors() {
        let mut entity = snapshot("heat");
        entity.attributes.insert("current_temperature".into(), json!(21.5));
        entity.attributes.insert("friendly_name".into(), json!("Living Room"));
        entity.attributes.insert("broken".into(), json!("not a number"));

        assert_eq!(entity.attr_f64("current_temperature"), Some(21.5));
        assert_eq!(entity.attr_f64("broken"), None);
        assert_eq!(entity.attr_f64("missing"), None);
        assert_eq!(entity.friendly_name(), Some("Living Room"));
    }
}
