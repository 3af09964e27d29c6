// Thermostat Card Editor

use serde_json::Value;

use morel_types::TemperatureUnit;

use crate::cards::thermostat::{ThermostatCardConfig, THERMOSTAT_ENTITY_DOMAINS};
use crate::config::parse_config;
use crate::display::state_icon;
use crate::error::ConfigError;
use crate::form::{actions_schema, appearance_schema, label_for, CardEditor, SchemaItem, Selector};
use crate::host::Host;

/// Fields labelled through the thermostat key space.
pub const THERMOSTAT_FIELDS: &[&str] = &[
    "enable_when_off",
    "use_action_icon",
    "use_action_color",
    "show_mode_control",
    "show_temp_control",
    "show_temp_indicators",
    "temperature_gap",
];

#[derive(Default)]
pub struct ThermostatCardEditor {
    config: Option<ThermostatCardConfig>,
}

impl ThermostatCardEditor {
    pub fn new() -> Self {
        Self::default()
    }

    fn icon_placeholder(&self, host: &dyn Host) -> Option<String> {
        let config = self.config.as_ref()?;
        if let Some(icon) = &config.icon {
            return Some(icon.clone());
        }
        let entity = host.entity(config.entity.as_deref()?)?;
        Some(state_icon(entity).to_string())
    }
}

impl CardEditor for ThermostatCardEditor {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        self.config = Some(parse_config(config)?);
        Ok(())
    }

    fn schema(&self, host: &dyn Host) -> Vec<SchemaItem> {
        let unit = host.unit_system().temperature;
        let (gap_max, gap_step) = match unit {
            TemperatureUnit::Fahrenheit => (10.0, 1.0),
            TemperatureUnit::Celsius => (5.0, 0.5),
        };

        let mut schema = vec![
            SchemaItem::field(
                "entity",
                Selector::Entity {
                    domain: THERMOSTAT_ENTITY_DOMAINS,
                },
            ),
            SchemaItem::field("name", Selector::Text {}),
            SchemaItem::field(
                "icon",
                Selector::Icon {
                    placeholder: self.icon_placeholder(host),
                },
            ),
        ];
        schema.extend(appearance_schema());
        schema.push(SchemaItem::grid(vec![
            SchemaItem::field("use_action_color", Selector::Boolean {}),
            SchemaItem::field("use_action_icon", Selector::Boolean {}),
            SchemaItem::field("show_temp_control", Selector::Boolean {}),
            SchemaItem::field("show_temp_indicators", Selector::Boolean {}),
            SchemaItem::field("show_mode_control", Selector::Boolean {}),
            SchemaItem::field("enable_when_off", Selector::Boolean {}),
        ]));
        schema.push(SchemaItem::field(
            "temperature_gap",
            Selector::Number {
                min: 0.0,
                max: gap_max,
                step: gap_step,
                mode: "slider",
                unit_of_measurement: Some(unit.as_str().to_string()),
            },
        ));
        schema.extend(actions_schema());
        schema
    }

    fn label(&self, host: &dyn Host, field: &str) -> String {
        label_for(host, "thermostat", THERMOSTAT_FIELDS, field)
    }
}
