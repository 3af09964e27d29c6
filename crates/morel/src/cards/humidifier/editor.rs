// Humidifier Card Editor

use serde_json::Value;

use crate::cards::humidifier::{HumidifierCardConfig, HUMIDIFIER_ENTITY_DOMAINS};
use crate::config::parse_config;
use crate::display::state_icon;
use crate::error::ConfigError;
use crate::form::{actions_schema, appearance_schema, label_for, CardEditor, SchemaItem, Selector};
use crate::host::Host;

pub const HUMIDIFIER_FIELDS: &[&str] = &["show_target_humidity_control", "collapsible_controls"];

#[derive(Default)]
pub struct HumidifierCardEditor {
    config: Option<HumidifierCardConfig>,
}

impl HumidifierCardEditor {
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

impl CardEditor for HumidifierCardEditor {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        self.config = Some(parse_config(config)?);
        Ok(())
    }

    fn schema(&self, host: &dyn Host) -> Vec<SchemaItem> {
        let mut schema = vec![
            SchemaItem::field(
                "entity",
                Selector::Entity {
                    domain: HUMIDIFIER_ENTITY_DOMAINS,
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
            SchemaItem::field("show_target_humidity_control", Selector::Boolean {}),
            SchemaItem::field("collapsible_controls", Selector::Boolean {}),
        ]));
        schema.extend(actions_schema());
        schema
    }

    fn label(&self, host: &dyn Host, field: &str) -> String {
        label_for(host, "humidifier", HUMIDIFIER_FIELDS, field)
    }
}
