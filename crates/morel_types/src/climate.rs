// Climate Model - Typed view over climate entity snapshots
//
// Mirrors the upstream climate entity contract: the state string carries the
// HVAC mode (or unavailable/unknown), attributes carry action, setpoints and
// the supported-feature bitmask.
// https://developers.home-assistant.io/docs/core/entity/climate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{EntityState, STATE_UNAVAILABLE, STATE_UNKNOWN};

// ─────────────────────────────────────────────────────────────────────────────
// Supported features (bitmask)
// ─────────────────────────────────────────────────────────────────────────────

pub const SUPPORT_TARGET_TEMPERATURE: u32 = 1;
pub const SUPPORT_TARGET_TEMPERATURE_RANGE: u32 = 2;
pub const SUPPORT_TARGET_HUMIDITY: u32 = 4;
pub const SUPPORT_FAN_MODE: u32 = 8;
pub const SUPPORT_PRESET_MODE: u32 = 16;
pub const SUPPORT_SWING_MODE: u32 = 32;

/// Sentinel preset value meaning "no preset active".
pub const PRESET_NONE: &str = "none";

// ─────────────────────────────────────────────────────────────────────────────
// Modes & actions
// ─────────────────────────────────────────────────────────────────────────────

/// User-selectable climate operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    Auto,
    HeatCool,
    Heat,
    Cool,
    Dry,
    FanOnly,
    Off,
}

impl HvacMode {
    /// Fixed display ordering: auto < heat_cool < heat < cool < dry <
    /// fan_only < off. Keys are unique per mode, so ties cannot occur.
    pub fn sort_key(&self) -> u8 {
        match self {
            HvacMode::Auto => 1,
            HvacMode::HeatCool => 2,
            HvacMode::Heat => 3,
            HvacMode::Cool => 4,
            HvacMode::Dry => 5,
            HvacMode::FanOnly => 6,
            HvacMode::Off => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HvacMode::Auto => "auto",
            HvacMode::HeatCool => "heat_cool",
            HvacMode::Heat => "heat",
            HvacMode::Cool => "cool",
            HvacMode::Dry => "dry",
            HvacMode::FanOnly => "fan_only",
            HvacMode::Off => "off",
        }
    }
}

/// Compare two modes by display priority.
pub fn compare_hvac_modes(a: &HvacMode, b: &HvacMode) -> std::cmp::Ordering {
    a.sort_key().cmp(&b.sort_key())
}

/// Device-reported current activity. Distinct from the selected mode: a
/// thermostat in `heat` mode reports `idle` while the burner is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    Off,
    Heating,
    Cooling,
    Drying,
    Idle,
    Fan,
}

impl HvacAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HvacAction::Off => "off",
            HvacAction::Heating => "heating",
            HvacAction::Cooling => "cooling",
            HvacAction::Drying => "drying",
            HvacAction::Idle => "idle",
            HvacAction::Fan => "fan",
        }
    }
}

/// Climate entity state: an HVAC mode, or one of the degraded states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateState {
    Mode(HvacMode),
    Unavailable,
    Unknown,
}

impl ClimateState {
    pub fn parse(state: &str) -> Option<ClimateState> {
        match state {
            STATE_UNAVAILABLE => Some(ClimateState::Unavailable),
            STATE_UNKNOWN => Some(ClimateState::Unknown),
            "auto" => Some(ClimateState::Mode(HvacMode::Auto)),
            "heat_cool" => Some(ClimateState::Mode(HvacMode::HeatCool)),
            "heat" => Some(ClimateState::Mode(HvacMode::Heat)),
            "cool" => Some(ClimateState::Mode(HvacMode::Cool)),
            "dry" => Some(ClimateState::Mode(HvacMode::Dry)),
            "fan_only" => Some(ClimateState::Mode(HvacMode::FanOnly)),
            "off" => Some(ClimateState::Mode(HvacMode::Off)),
            _ => None,
        }
    }

    /// The HVAC mode, when the entity is not degraded.
    pub fn mode(&self) -> Option<HvacMode> {
        match self {
            ClimateState::Mode(mode) => Some(*mode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateState::Mode(mode) => mode.as_str(),
            ClimateState::Unavailable => STATE_UNAVAILABLE,
            ClimateState::Unknown => STATE_UNKNOWN,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Attributes & typed entity
// ─────────────────────────────────────────────────────────────────────────────

/// Climate attributes as deserialized from a snapshot's attribute map.
///
/// A device exposes either a single `temperature` setpoint or the
/// `target_temp_low`/`target_temp_high` pair, never both meaningfully at
/// once for the same read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateAttributes {
    #[serde(default)]
    pub hvac_modes: Vec<HvacMode>,
    #[serde(default)]
    pub hvac_action: Option<HvacAction>,
    #[serde(default)]
    pub preset_mode: Option<String>,
    #[serde(default)]
    pub current_temperature: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub target_temp_low: Option<f64>,
    #[serde(default)]
    pub target_temp_high: Option<f64>,
    #[serde(default)]
    pub target_temp_step: Option<f64>,
    #[serde(default)]
    pub min_temp: Option<f64>,
    #[serde(default)]
    pub max_temp: Option<f64>,
    #[serde(default)]
    pub supported_features: u32,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

/// Typed climate view over a raw snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateEntity {
    pub entity_id: String,
    pub state: ClimateState,
    pub attributes: ClimateAttributes,
    pub last_updated: DateTime<Utc>,
}

impl ClimateEntity {
    /// Build the typed view. `None` when the snapshot does not carry a
    /// climate state or its attributes fail to parse.
    pub fn from_state(entity: &EntityState) -> Option<ClimateEntity> {
        let state = ClimateState::parse(&entity.state)?;
        let attributes =
            serde_json::from_value(serde_json::Value::Object(entity.attributes.clone())).ok()?;
        Some(ClimateEntity {
            entity_id: entity.entity_id.clone(),
            state,
            attributes,
            last_updated: entity.last_updated,
        })
    }

    pub fn is_available(&self) -> bool {
        self.state != ClimateState::Unavailable
    }

    /// Available, known and not in the `off` mode.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ClimateState::Mode(mode) if mode != HvacMode::Off)
    }

    pub fn supports_feature(&self, feature: u32) -> bool {
        self.attributes.supported_features & feature != 0
    }

    /// Active preset, with the `none` sentinel mapped to absent.
    pub fn preset(&self) -> Option<&str> {
        self.attributes
            .preset_mode
            .as_deref()
            .filter(|preset| *preset != PRESET_NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn climate(state: &str, attributes: serde_json::Value) -> Option<ClimateEntity> {
        let mut entity = EntityState::new("climate.living_room", state);
        entity.attributes = attributes.as_object().cloned().unwrap_or_default();
        ClimateEntity::from_state(&entity)
    }

    #[test]
    fn test_mode_ordering_is_fixed() {
        let mut modes = vec![
            HvacMode::Off,
            HvacMode::Cool,
            HvacMode::Auto,
            HvacMode::Heat,
            HvacMode::FanOnly,
            HvacMode::HeatCool,
            HvacMode::Dry,
        ];
        modes.sort_by(compare_hvac_modes);
        assert_eq!(
            modes,
            vec![
                HvacMode::Auto,
                HvacMode::HeatCool,
                HvacMode::Heat,
                HvacMode::Cool,
                HvacMode::Dry,
                HvacMode::FanOnly,
                HvacMode::Off,
            ]
        );
    }

    #[test]
    fn test_state_parsing() {
        assert_eq!(ClimateState::parse("heat"), Some(ClimateState::Mode(HvacMode::Heat)));
        assert_eq!(ClimateState::parse("unavailable"), Some(ClimateState::Unavailable));
        assert_eq!(ClimateState::parse("sideways"), None);
    }

    #[test]
    fn test_from_state_parses_attributes() {
        let entity = climate(
            "heat",
            json!({
                "hvac_modes": ["heat", "off"],
                "hvac_action": "heating",
                "current_temperature": 20.5,
                "temperature": 21.0,
                "supported_features": 1,
                "friendly_name": "Living Room",
            }),
        )
        .unwrap();

        assert_eq!(entity.state.mode(), Some(HvacMode::Heat));
        assert_eq!(entity.attributes.hvac_action, Some(HvacAction::Heating));
        assert_eq!(entity.attributes.temperature, Some(21.0));
        assert!(entity.supports_feature(SUPPORT_TARGET_TEMPERATURE));
        assert!(!entity.supports_feature(SUPPORT_TARGET_TEMPERATURE_RANGE));
    }

    #[test]
    fn test_from_state_rejects_foreign_state() {
        assert!(climate("playing", json!({})).is_none());
    }

    #[test]
    fn test_preset_none_sentinel() {
        let eco = climate("heat", json!({ "preset_mode": "eco" })).unwrap();
        assert_eq!(eco.preset(), Some("eco"));

        let none = climate("heat", json!({ "preset_mode": "none" })).unwrap();
        assert_eq!(none.preset(), None);

        let absent = climate("heat", json!({})).unwrap();
        assert_eq!(absent.preset(), None);
    }

    #[test]
    fn test_activity() {
        assert!(climate("heat", json!({})).unwrap().is_active());
        assert!(!climate("off", json!({})).unwrap().is_active());
        assert!(!climate("unavailable", json!({})).unwrap().is_active());
        assert!(!climate("unavailable", json!({})).unwrap().is_available());
    }
}
