// Fan Card - Fan entity display with percentage and oscillation commands

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

pub const FAN_CARD_TYPE: &str = "custom:morel-fan-card";
pub const FAN_ENTITY_DOMAINS: &[&str] = &["fan"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FanCardConfig {
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
    /// Spin the icon while the fan runs.
    #[serde(default)]
    pub icon_animation: bool,
    #[serde(default)]
    pub show_percentage_control: bool,
    #[serde(default)]
    pub show_oscillate_control: bool,
    #[serde(default)]
    pub collapsible_controls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl FanCardConfig {
    pub fn actions(&self) -> CardActions {
        CardActions::from_config(
            self.tap_action.clone(),
            self.hold_action.clone(),
            self.double_tap_action.clone(),
        )
    }
}

/// Fan-specific view: the shared card view plus the control surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FanCardView {
    pub card: CardView,
    pub spin: bool,
    /// Percentage slider, when enabled and the card is not collapsed.
    pub percentage: Option<f64>,
    pub oscillating: Option<bool>,
}

#[derive(Default)]
pub struct FanCard {
    config: Option<FanCardConfig>,
}

impl FanCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entity_id(&self) -> Option<&str> {
        self.config.as_ref()?.entity.as_deref()
    }

    pub fn toggle(&self, host: &dyn Host) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("fan", "toggle").entity(entity_id),
            ));
        }
    }

    pub fn set_percentage(&self, host: &dyn Host, percentage: f64) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("fan", "set_percentage")
                    .entity(entity_id)
                    .arg("percentage", percentage),
            ));
        }
    }

    pub fn set_oscillating(&self, host: &dyn Host, oscillating: bool) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("fan", "oscillate")
                    .entity(entity_id)
                    .arg("oscillating", oscillating),
            ));
        }
    }

    pub fn fan_view(&self, host: &dyn Host) -> Option<FanCardView> {
        let config = self.config.as_ref()?;
        let entity = host.entity(config.entity.as_deref()?)?;

        let active = entity.is_active();
        let percentage = entity.attr_f64("percentage");
        // Collapsed controls disappear while the fan is off.
        let controls_visible = active || !config.collapsible_controls;

        let secondary = (!config.hide_state).then(|| match percentage.filter(|_| active) {
            Some(percentage) => format!("{}%", percentage.round()),
            None => state_display(host, entity),
        });

        Some(FanCardView {
            card: CardView {
                icon: config
                    .icon
                    .clone()
                    .unwrap_or_else(|| state_icon(entity).to_string()),
                color: None,
                badge_icon: unavailable_badge(entity),
                primary: config
                    .name
                    .clone()
                    .or_else(|| entity.friendly_name().map(str::to_string))
                    .unwrap_or_default(),
                secondary,
                active,
            },
            spin: config.icon_animation && active,
            percentage: (config.show_percentage_control && controls_visible)
                .then_some(percentage)
                .flatten(),
            oscillating: (config.show_oscillate_control && controls_visible)
                .then(|| entity.attributes.get("oscillating").and_then(Value::as_bool))
                .flatten(),
        })
    }
}

impl Card for FanCard {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        let config = parse_config::<FanCardConfig>(config)?;
        ensure_domain(config.entity.as_deref(), FAN_ENTITY_DOMAINS)?;
        self.config = Some(config);
        Ok(())
    }

    fn sync(&mut self, _host: &dyn Host) {}

    fn view(&self, host: &dyn Host) -> Option<CardView> {
        self.fan_view(host).map(|view| view.card)
    }

    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger) {
        let Some(config) = &self.config else { return };
        handle_action(host, config.entity.as_deref(), &config.actions(), trigger);
    }
}

pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        type_name: FAN_CARD_TYPE,
        name: "Morel Fan Card",
        description: "Card for fan entities",
        card_size: 1,
        make_card: || Box::new(FanCard::new()),
        make_editor: || Box::new(editor::FanCardEditor::new()) as Box<dyn CardEditor>,
        stub_config: |host| stub_config_for(host, FAN_CARD_TYPE, FAN_ENTITY_DOMAINS),
    }
}
