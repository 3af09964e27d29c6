// Alarm Panel Card - Alarm control panel display with arm/disarm commands

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::{handle_action, ActionConfig, ActionTrigger, CardActions};
use crate::cards::{stub_config_for, Card, CardView};
use crate::config::{ensure_domain, parse_config, Layout};
use crate::display::{state_display, unavailable_badge};
use crate::error::ConfigError;
use crate::form::CardEditor;
use crate::host::{Host, HostCommand, ServiceCall};
use crate::registry::CardDescriptor;

pub mod editor;

pub const ALARM_PANEL_CARD_TYPE: &str = "custom:morel-alarm-panel-card";
pub const ALARM_PANEL_ENTITY_DOMAINS: &[&str] = &["alarm_control_panel"];

/// Armed states a card may expose as shortcut buttons.
pub const ALARM_PANEL_ARM_STATES: &[&str] = &[
    "armed_home",
    "armed_away",
    "armed_night",
    "armed_vacation",
    "armed_custom_bypass",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlarmPanelCardConfig {
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
    /// Armed states offered as shortcut buttons.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    #[serde(default)]
    pub show_keypad: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl AlarmPanelCardConfig {
    pub fn actions(&self) -> CardActions {
        CardActions::from_config(
            self.tap_action.clone(),
            self.hold_action.clone(),
            self.double_tap_action.clone(),
        )
    }
}

/// Icon for an alarm panel state.
pub fn alarm_state_icon(state: &str) -> &'static str {
    match state {
        "disarmed" => "mdi:shield-off",
        "armed_home" => "mdi:shield-home",
        "armed_away" => "mdi:shield-lock",
        "armed_night" => "mdi:shield-moon",
        "armed_vacation" => "mdi:shield-airplane",
        "armed_custom_bypass" => "mdi:shield-half-full",
        "pending" | "arming" => "mdi:shield-sync",
        "triggered" => "mdi:bell-ring",
        _ => "mdi:shield-lock-outline",
    }
}

/// Color token for an alarm panel state. Pending and triggered states carry
/// the warning tones so the card can pulse them.
pub fn alarm_state_color(state: &str) -> Option<&'static str> {
    match state {
        "disarmed" => Some("alarm-disarmed"),
        state if state.starts_with("armed_") => Some("alarm-armed"),
        "arming" | "pending" => Some("alarm-arming"),
        "triggered" => Some("alarm-triggered"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArmButton {
    /// Target armed state, e.g. `armed_home`.
    pub state: String,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlarmPanelCardView {
    pub card: CardView,
    pub buttons: Vec<ArmButton>,
    pub show_keypad: bool,
    /// Set while the panel is arming, pending, or triggered.
    pub pulsing: bool,
}

#[derive(Default)]
pub struct AlarmPanelCard {
    config: Option<AlarmPanelCardConfig>,
}

impl AlarmPanelCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entity_id(&self) -> Option<&str> {
        self.config.as_ref()?.entity.as_deref()
    }

    /// Arm to the given state. `armed_home` maps to the `alarm_arm_home`
    /// service and so on.
    pub fn arm(&self, host: &dyn Host, state: &str) {
        let Some(entity_id) = self.entity_id() else { return };
        let Some(mode) = state.strip_prefix("armed_") else { return };
        host.dispatch(HostCommand::CallService(
            ServiceCall::new("alarm_control_panel", format!("alarm_arm_{mode}"))
                .entity(entity_id),
        ));
    }

    pub fn disarm(&self, host: &dyn Host) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("alarm_control_panel", "alarm_disarm").entity(entity_id),
            ));
        }
    }

    pub fn alarm_panel_view(&self, host: &dyn Host) -> Option<AlarmPanelCardView> {
        let config = self.config.as_ref()?;
        let entity = host.entity(config.entity.as_deref()?)?;
        let state = entity.state.as_str();

        let buttons = config
            .states
            .iter()
            .filter(|target| ALARM_PANEL_ARM_STATES.contains(&target.as_str()))
            .map(|target| ArmButton {
                state: target.clone(),
                icon: alarm_state_icon(target),
                active: state == target,
            })
            .collect();

        Some(AlarmPanelCardView {
            card: CardView {
                icon: config
                    .icon
                    .clone()
                    .unwrap_or_else(|| alarm_state_icon(state).to_string()),
                color: alarm_state_color(state).map(str::to_string),
                badge_icon: unavailable_badge(entity),
                primary: config
                    .name
                    .clone()
                    .or_else(|| entity.friendly_name().map(str::to_string))
                    .unwrap_or_default(),
                secondary: (!config.hide_state).then(|| state_display(host, entity)),
                active: entity.is_active(),
            },
            buttons,
            show_keypad: config.show_keypad,
            pulsing: matches!(state, "arming" | "pending" | "triggered"),
        })
    }
}

impl Card for AlarmPanelCard {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        let config = parse_config::<AlarmPanelCardConfig>(config)?;
        ensure_domain(config.entity.as_deref(), ALARM_PANEL_ENTITY_DOMAINS)?;
        self.config = Some(config);
        Ok(())
    }

    fn sync(&mut self, _host: &dyn Host) {}

    fn view(&self, host: &dyn Host) -> Option<CardView> {
        self.alarm_panel_view(host).map(|view| view.card)
    }

    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger) {
        let Some(config) = &self.config else { return };
        handle_action(host, config.entity.as_deref(), &config.actions(), trigger);
    }
}

pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        type_name: ALARM_PANEL_CARD_TYPE,
        name: "Morel Alarm Panel Card",
        description: "Card for alarm control panel entities",
        card_size: 1,
        make_card: || Box::new(AlarmPanelCard::new()),
        make_editor: || Box::new(editor::AlarmPanelCardEditor::new()) as Box<dyn CardEditor>,
        stub_config: |host| {
            stub_config_for(host, ALARM_PANEL_CARD_TYPE, ALARM_PANEL_ENTITY_DOMAINS)
        },
    }
}
