// Thermostat Card Config

use serde::{Deserialize, Serialize};

use crate::actions::{ActionConfig, CardActions};
use crate::config::Layout;

/// Thermostat card options. Validated wholesale on `set_config`; unknown
/// options reject the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThermostatCardConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub fill_container: bool,
    #[serde(default)]
    pub hide_state: bool,
    /// Keep the temperature slider interactive while the device is off.
    #[serde(default)]
    pub enable_when_off: bool,
    #[serde(default)]
    pub use_action_color: bool,
    #[serde(default)]
    pub use_action_icon: bool,
    #[serde(default)]
    pub show_mode_control: bool,
    #[serde(default)]
    pub show_temp_control: bool,
    #[serde(default)]
    pub show_temp_indicators: bool,
    /// Minimum separation between low and high setpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl ThermostatCardConfig {
    /// The three bindings with the more-info default applied.
    pub fn actions(&self) -> CardActions {
        CardActions::from_config(
            self.tap_action.clone(),
            self.hold_action.clone(),
            self.double_tap_action.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use serde_json::json;

    #[test]
    fn test_full_config_parses() {
        let config: ThermostatCardConfig = parse_config(json!({
            "type": "custom:morel-thermostat-card",
            "entity": "climate.living_room",
            "name": "Living Room",
            "layout": "horizontal",
            "show_temp_control": true,
            "show_mode_control": true,
            "show_temp_indicators": true,
            "temperature_gap": 2,
            "tap_action": { "action": "none" },
        }))
        .unwrap();

        assert_eq!(config.entity.as_deref(), Some("climate.living_room"));
        assert_eq!(config.layout, Some(Layout::Horizontal));
        assert!(config.show_temp_control);
        assert_eq!(config.temperature_gap, Some(2.0));
        assert_eq!(config.actions().tap, ActionConfig::None);
        assert_eq!(config.actions().hold, ActionConfig::MoreInfo);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let result: Result<ThermostatCardConfig, _> = parse_config(json!({
            "entity": "climate.living_room",
            "show_thermometer": true,
        }));
        assert!(result.is_err());
    }
}
