// Lock Card - Lock entity display with lock/unlock commands

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

pub const LOCK_CARD_TYPE: &str = "custom:morel-lock-card";
pub const LOCK_ENTITY_DOMAINS: &[&str] = &["lock"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockCardConfig {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl LockCardConfig {
    pub fn actions(&self) -> CardActions {
        CardActions::from_config(
            self.tap_action.clone(),
            self.hold_action.clone(),
            self.double_tap_action.clone(),
        )
    }
}

#[derive(Default)]
pub struct LockCard {
    config: Option<LockCardConfig>,
}

impl LockCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entity_id(&self) -> Option<&str> {
        self.config.as_ref()?.entity.as_deref()
    }

    pub fn lock(&self, host: &dyn Host) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("lock", "lock").entity(entity_id),
            ));
        }
    }

    pub fn unlock(&self, host: &dyn Host) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("lock", "unlock").entity(entity_id),
            ));
        }
    }
}

impl Card for LockCard {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        let config = parse_config::<LockCardConfig>(config)?;
        ensure_domain(config.entity.as_deref(), LOCK_ENTITY_DOMAINS)?;
        self.config = Some(config);
        Ok(())
    }

    fn sync(&mut self, _host: &dyn Host) {}

    fn view(&self, host: &dyn Host) -> Option<CardView> {
        let config = self.config.as_ref()?;
        let entity = host.entity(config.entity.as_deref()?)?;

        Some(CardView {
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
            secondary: (!config.hide_state).then(|| state_display(host, entity)),
            active: entity.is_active(),
        })
    }

    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger) {
        let Some(config) = &self.config else { return };
        handle_action(host, config.entity.as_deref(), &config.actions(), trigger);
    }
}

pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        type_name: LOCK_CARD_TYPE,
        name: "Morel Lock Card",
        description: "Card for lock entities",
        card_size: 1,
        make_card: || Box::new(LockCard::new()),
        make_editor: || Box::new(editor::LockCardEditor::new()) as Box<dyn CardEditor>,
        stub_config: |host| stub_config_for(host, LOCK_CARD_TYPE, LOCK_ENTITY_DOMAINS),
    }
}
