// Alarm Panel Card Editor

use serde_json::Value;

use crate::cards::alarm_panel::{
    alarm_state_icon, AlarmPanelCardConfig, ALARM_PANEL_ARM_STATES, ALARM_PANEL_ENTITY_DOMAINS,
};
use crate::config::parse_config;
use crate::error::ConfigError;
use crate::form::{
    actions_schema, appearance_schema, label_for, CardEditor, SchemaItem, SelectOption, Selector,
};
use crate::host::Host;

pub const ALARM_PANEL_FIELDS: &[&str] = &["states", "show_keypad"];

#[derive(Default)]
pub struct AlarmPanelCardEditor {
    config: Option<AlarmPanelCardConfig>,
}

impl AlarmPanelCardEditor {
    pub fn new() -> Self {
        Self::default()
    }

    fn icon_placeholder(&self, host: &dyn Host) -> Option<String> {
        let config = self.config.as_ref()?;
        if let Some(icon) = &config.icon {
            return Some(icon.clone());
        }
        let entity = host.entity(config.entity.as_deref()?)?;
        Some(alarm_state_icon(&entity.state).to_string())
    }
}

impl CardEditor for AlarmPanelCardEditor {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        self.config = Some(parse_config(config)?);
        Ok(())
    }

    fn schema(&self, host: &dyn Host) -> Vec<SchemaItem> {
        let mut schema = vec![
            SchemaItem::field(
                "entity",
                Selector::Entity {
                    domain: ALARM_PANEL_ENTITY_DOMAINS,
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
        schema.push(SchemaItem::field(
            "states",
            Selector::Select {
                options: ALARM_PANEL_ARM_STATES
                    .iter()
                    .map(|state| SelectOption {
                        value: state,
                        label: state,
                    })
                    .collect(),
                multiple: true,
            },
        ));
        schema.push(SchemaItem::field("show_keypad", Selector::Boolean {}));
        schema.extend(actions_schema());
        schema
    }

    fn label(&self, host: &dyn Host, field: &str) -> String {
        label_for(host, "alarm_control_panel", ALARM_PANEL_FIELDS, field)
    }
}
