// Media Player Card Editor

use serde_json::Value;

use crate::cards::media_player::{
    MediaPlayerCardConfig, MEDIA_PLAYER_ENTITY_DOMAINS, MEDIA_PLAYER_MEDIA_CONTROLS,
    MEDIA_PLAYER_VOLUME_CONTROLS,
};
use crate::config::parse_config;
use crate::display::state_icon;
use crate::error::ConfigError;
use crate::form::{
    actions_schema, appearance_schema, label_for, CardEditor, SchemaItem, SelectOption, Selector,
};
use crate::host::Host;

pub const MEDIA_PLAYER_FIELDS: &[&str] = &[
    "use_media_info",
    "use_media_artwork",
    "show_volume_level",
    "media_controls",
    "volume_controls",
    "collapsible_controls",
];

fn control_options(controls: &'static [&'static str]) -> Vec<SelectOption> {
    controls
        .iter()
        .map(|control| SelectOption {
            value: control,
            label: control,
        })
        .collect()
}

#[derive(Default)]
pub struct MediaPlayerCardEditor {
    config: Option<MediaPlayerCardConfig>,
}

impl MediaPlayerCardEditor {
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

impl CardEditor for MediaPlayerCardEditor {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        self.config = Some(parse_config(config)?);
        Ok(())
    }

    fn schema(&self, host: &dyn Host) -> Vec<SchemaItem> {
        let mut schema = vec![
            SchemaItem::field(
                "entity",
                Selector::Entity {
                    domain: MEDIA_PLAYER_ENTITY_DOMAINS,
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
            SchemaItem::field("use_media_info", Selector::Boolean {}),
            SchemaItem::field("use_media_artwork", Selector::Boolean {}),
            SchemaItem::field("show_volume_level", Selector::Boolean {}),
        ]));
        schema.push(SchemaItem::grid(vec![
            SchemaItem::field(
                "volume_controls",
                Selector::Select {
                    options: control_options(MEDIA_PLAYER_VOLUME_CONTROLS),
                    multiple: true,
                },
            ),
            SchemaItem::field(
                "media_controls",
                Selector::Select {
                    options: control_options(MEDIA_PLAYER_MEDIA_CONTROLS),
                    multiple: true,
                },
            ),
            SchemaItem::field("collapsible_controls", Selector::Boolean {}),
        ]));
        schema.extend(actions_schema());
        schema
    }

    fn label(&self, host: &dyn Host, field: &str) -> String {
        label_for(host, "media-player", MEDIA_PLAYER_FIELDS, field)
    }
}
