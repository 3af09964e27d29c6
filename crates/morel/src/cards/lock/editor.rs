// Lock Card Editor

use serde_json::Value;

use crate::cards::lock::{LockCardConfig, LOCK_ENTITY_DOMAINS};
use crate::config::parse_config;
use crate::display::state_icon;
use crate::error::ConfigError;
use crate::form::{actions_schema, appearance_schema, label_for, CardEditor, SchemaItem, Selector};
use crate::host::Host;

#[derive(Default)]
pub struct LockCardEditor {
    config: Option<LockCardConfig>,
}

impl LockCardEditor {
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

impl CardEditor for LockCardEditor {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        self.config = Some(parse_config(config)?);
        Ok(())
    }

    fn schema(&self, host: &dyn Host) -> Vec<SchemaItem> {
        let mut schema = vec![
            SchemaItem::field(
                "entity",
                Selector::Entity {
                    domain: LOCK_ENTITY_DOMAINS,
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
        schema.extend(actions_schema());
        schema
    }

    fn label(&self, host: &dyn Host, field: &str) -> String {
        label_for(host, "lock", &[], field)
    }
}
