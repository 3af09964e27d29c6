// Media Player Card - Media player display with playback and volume commands

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::{handle_action, ActionConfig, ActionTrigger, CardActions};
use crate::cards::{stub_config_for, Card, CardView};
use crate::config::{ensure_domain, parse_config, Layout};
use crate::display::{state_display, state_icon, unavailable_badge};
use crate::error::ConfigError;
use crate::form::CardEditor;
use crate::host::{Host, HostCommand, ServiceCall};
use crate::registry::CardDescriptor;

pub mod editor;

pub const MEDIA_PLAYER_CARD_TYPE: &str = "custom:morel-media-player-card";
pub const MEDIA_PLAYER_ENTITY_DOMAINS: &[&str] = &["media_player"];

/// Volume control surfaces the config may enable.
pub const MEDIA_PLAYER_VOLUME_CONTROLS: &[&str] = &["volume_mute", "volume_set", "volume_buttons"];
/// Playback control surfaces the config may enable.
pub const MEDIA_PLAYER_MEDIA_CONTROLS: &[&str] =
    &["on_off", "shuffle", "previous", "play_pause_stop", "next", "repeat"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaPlayerCardConfig {
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
    /// Show media title and artist instead of the entity name and state.
    #[serde(default)]
    pub use_media_info: bool,
    #[serde(default)]
    pub use_media_artwork: bool,
    #[serde(default)]
    pub show_volume_level: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_controls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_controls: Vec<String>,
    #[serde(default)]
    pub collapsible_controls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl MediaPlayerCardConfig {
    pub fn actions(&self) -> CardActions {
        CardActions::from_config(
            self.tap_action.clone(),
            self.hold_action.clone(),
            self.double_tap_action.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaPlayerCardView {
    pub card: CardView,
    /// Artwork URL, when enabled and the entity exposes one.
    pub artwork: Option<String>,
    /// Volume level as a percentage, when the slider is enabled.
    pub volume: Option<f64>,
    pub volume_controls: Vec<String>,
    pub media_controls: Vec<String>,
}

#[derive(Default)]
pub struct MediaPlayerCard {
    config: Option<MediaPlayerCardConfig>,
}

impl MediaPlayerCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entity_id(&self) -> Option<&str> {
        self.config.as_ref()?.entity.as_deref()
    }

    fn call(&self, host: &dyn Host, service: &str) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("media_player", service).entity(entity_id),
            ));
        }
    }

    pub fn play_pause(&self, host: &dyn Host) {
        self.call(host, "media_play_pause");
    }

    pub fn previous_track(&self, host: &dyn Host) {
        self.call(host, "media_previous_track");
    }

    pub fn next_track(&self, host: &dyn Host) {
        self.call(host, "media_next_track");
    }

    pub fn toggle(&self, host: &dyn Host) {
        self.call(host, "toggle");
    }

    /// `volume` is a percentage; the service expects a 0..1 level.
    pub fn set_volume(&self, host: &dyn Host, volume: f64) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("media_player", "volume_set")
                    .entity(entity_id)
                    .arg("volume_level", volume / 100.0),
            ));
        }
    }

    pub fn set_muted(&self, host: &dyn Host, muted: bool) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("media_player", "volume_mute")
                    .entity(entity_id)
                    .arg("is_volume_muted", muted),
            ));
        }
    }

    pub fn media_player_view(&self, host: &dyn Host) -> Option<MediaPlayerCardView> {
        let config = self.config.as_ref()?;
        let entity = host.entity(config.entity.as_deref()?)?;

        let active = entity.is_active();
        let controls_visible = active || !config.collapsible_controls;
        let volume = entity.attr_f64("volume_level").map(|level| level * 100.0);

        let media_title = entity.attr_str("media_title");
        let media_artist = entity.attr_str("media_artist");

        let primary = if config.use_media_info {
            media_title
                .map(str::to_string)
                .or_else(|| config.name.clone())
                .or_else(|| entity.friendly_name().map(str::to_string))
                .unwrap_or_default()
        } else {
            config
                .name
                .clone()
                .or_else(|| entity.friendly_name().map(str::to_string))
                .unwrap_or_default()
        };

        let secondary = (!config.hide_state).then(|| {
            let state_text = if config.use_media_info {
                media_artist
                    .map(str::to_string)
                    .unwrap_or_else(|| state_display(host, entity))
            } else {
                state_display(host, entity)
            };
            match volume.filter(|_| config.show_volume_level && active) {
                Some(volume) => format!("{} - {}%", state_text, volume.round()),
                None => state_text,
            }
        });

        let filter_controls = |configured: &[String], known: &[&str]| -> Vec<String> {
            if !controls_visible {
                return Vec::new();
            }
            configured
                .iter()
                .filter(|control| known.contains(&control.as_str()))
                .cloned()
                .collect()
        };

        Some(MediaPlayerCardView {
            card: CardView {
                icon: config
                    .icon
                    .clone()
                    .unwrap_or_else(|| state_icon(entity).to_string()),
                color: None,
                badge_icon: unavailable_badge(entity),
                primary,
                secondary,
                active,
            },
            artwork: (config.use_media_artwork && active)
                .then(|| entity.attr_str("entity_picture").map(str::to_string))
                .flatten(),
            volume,
            volume_controls: filter_controls(&config.volume_controls, MEDIA_PLAYER_VOLUME_CONTROLS),
            media_controls: filter_controls(&config.media_controls, MEDIA_PLAYER_MEDIA_CONTROLS),
        })
    }
}

impl Card for MediaPlayerCard {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        let config = parse_config::<MediaPlayerCardConfig>(config)?;
        ensure_domain(config.entity.as_deref(), MEDIA_PLAYER_ENTITY_DOMAINS)?;
        self.config = Some(config);
        Ok(())
    }

    fn sync(&mut self, _host: &dyn Host) {}

    fn view(&self, host: &dyn Host) -> Option<CardView> {
        self.media_player_view(host).map(|view| view.card)
    }

    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger) {
        let Some(config) = &self.config else { return };
        handle_action(host, config.entity.as_deref(), &config.actions(), trigger);
    }
}

pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        type_name: MEDIA_PLAYER_CARD_TYPE,
        name: "Morel Media Player Card",
        description: "Card for media player entities",
        card_size: 1,
        make_card: || Box::new(MediaPlayerCard::new()),
        make_editor: || Box::new(editor::MediaPlayerCardEditor::new()) as Box<dyn CardEditor>,
        stub_config: |host| {
            stub_config_for(host, MEDIA_PLAYER_CARD_TYPE, MEDIA_PLAYER_ENTITY_DOMAINS)
        },
    }
}
