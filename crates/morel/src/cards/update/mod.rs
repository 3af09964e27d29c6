// Update Card - Update entity display with install command

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

pub const UPDATE_CARD_TYPE: &str = "custom:morel-update-card";
pub const UPDATE_ENTITY_DOMAINS: &[&str] = &["update"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCardConfig {
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
    #[serde(default)]
    pub show_buttons_control: bool,
    #[serde(default)]
    pub collapsible_controls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl UpdateCardConfig {
    pub fn actions(&self) -> CardActions {
        CardActions::from_config(
            self.tap_action.clone(),
            self.hold_action.clone(),
            self.double_tap_action.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateButtonsView {
    pub install_enabled: bool,
    pub skip_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCardView {
    pub card: CardView,
    pub buttons: Option<UpdateButtonsView>,
    /// Set while an install is running.
    pub in_progress: bool,
}

#[derive(Default)]
pub struct UpdateCard {
    config: Option<UpdateCardConfig>,
}

impl UpdateCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entity_id(&self) -> Option<&str> {
        self.config.as_ref()?.entity.as_deref()
    }

    pub fn install(&self, host: &dyn Host) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("update", "install").entity(entity_id),
            ));
        }
    }

    pub fn skip(&self, host: &dyn Host) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("update", "skip").entity(entity_id),
            ));
        }
    }

    pub fn update_view(&self, host: &dyn Host) -> Option<UpdateCardView> {
        let config = self.config.as_ref()?;
        let entity = host.entity(config.entity.as_deref()?)?;

        let update_available = entity.state == "on";
        let in_progress = entity
            .attributes
            .get("in_progress")
            .map(|value| value.as_bool().unwrap_or(value.is_number()))
            .unwrap_or(false);
        let controls_visible = update_available || !config.collapsible_controls;

        let installed = entity.attr_str("installed_version");
        let latest = entity.attr_str("latest_version");
        let secondary = (!config.hide_state).then(|| match (installed, latest) {
            (Some(installed), Some(latest)) if update_available => {
                format!("{installed} > {latest}")
            }
            (Some(installed), _) => installed.to_string(),
            _ => state_display(host, entity),
        });

        let icon = if in_progress {
            "mdi:package-down"
        } else if update_available {
            "mdi:package-up"
        } else {
            "mdi:package"
        };

        Some(UpdateCardView {
            card: CardView {
                icon: config.icon.clone().unwrap_or_else(|| icon.to_string()),
                color: update_available.then(|| "update-pending".to_string()),
                badge_icon: unavailable_badge(entity),
                primary: config
                    .name
                    .clone()
                    .or_else(|| entity.friendly_name().map(str::to_string))
                    .unwrap_or_default(),
                secondary,
                active: update_available,
            },
            buttons: (config.show_buttons_control && controls_visible).then(|| {
                UpdateButtonsView {
                    install_enabled: update_available && !in_progress,
                    skip_enabled: update_available && !in_progress,
                }
            }),
            in_progress,
        })
    }
}

impl Card for UpdateCard {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        let config = parse_config::<UpdateCardConfig>(config)?;
        ensure_domain(config.entity.as_deref(), UPDATE_ENTITY_DOMAINS)?;
        self.config = Some(config);
        Ok(())
    }

    fn sync(&mut self, _host: &dyn Host) {}

    fn view(&self, host: &dyn Host) -> Option<CardView> {
        self.update_view(host).map(|view| view.card)
    }

    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger) {
        let Some(config) = &self.config else { return };
        handle_action(host, config.entity.as_deref(), &config.actions(), trigger);
    }
}

pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        type_name: UPDATE_CARD_TYPE,
        name: "Morel Update Card",
        description: "Card for update entities",
        card_size: 1,
        make_card: || Box::new(UpdateCard::new()),
        make_editor: || Box::new(editor::UpdateCardEditor::new()) as Box<dyn CardEditor>,
        stub_config: |host| stub_config_for(host, UPDATE_CARD_TYPE, UPDATE_ENTITY_DOMAINS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ChannelHost;
    use morel_types::{EntityState, Locale, UnitSystem};
    use serde_json::json;

    fn host_with_update(
        state: &str,
        attributes: serde_json::Value,
    ) -> (ChannelHost, tokio::sync::mpsc::UnboundedReceiver<HostCommand>) {
        let (mut host, rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let mut entity = EntityState::new("update.firmware", state);
        entity.attributes = attributes.as_object().cloned().unwrap();
        host.push_state(entity);
        (host, rx)
    }

    fn card(config: serde_json::Value) -> UpdateCard {
        let mut card = UpdateCard::new();
        card.set_config(config).unwrap();
        card
    }

    #[test]
    fn test_version_pair_when_update_available() {
        let (host, _rx) = host_with_update(
            "on",
            json!({ "installed_version": "1.2.0", "latest_version": "1.3.0" }),
        );
        let card = card(json!({ "entity": "update.firmware" }));
        let view = card.update_view(&host).unwrap();
        assert_eq!(view.card.secondary.as_deref(), Some("1.2.0 > 1.3.0"));
        assert_eq!(view.card.icon, "mdi:package-up");
        assert!(view.card.active);
    }

    #[test]
    fn test_installed_version_when_up_to_date() {
        let (host, _rx) = host_with_update(
            "off",
            json!({ "installed_version": "1.3.0", "latest_version": "1.3.0" }),
        );
        let card = card(json!({ "entity": "update.firmware" }));
        let view = card.update_view(&host).unwrap();
        assert_eq!(view.card.secondary.as_deref(), Some("1.3.0"));
        assert_eq!(view.card.icon, "mdi:package");
        assert!(!view.card.active);
    }

    #[test]
    fn test_buttons_disabled_while_installing() {
        let (host, _rx) = host_with_update(
            "on",
            json!({ "in_progress": true, "installed_version": "1.2.0", "latest_version": "1.3.0" }),
        );
        let card = card(json!({ "entity": "update.firmware", "show_buttons_control": true }));
        let view = card.update_view(&host).unwrap();
        assert!(view.in_progress);
        assert_eq!(view.card.icon, "mdi:package-down");
        let buttons = view.buttons.unwrap();
        assert!(!buttons.install_enabled);
    }

    #[test]
    fn test_collapsible_controls_hide_when_up_to_date() {
        let (host, _rx) = host_with_update("off", json!({}));
        let card = card(json!({
            "entity": "update.firmware",
            "show_buttons_control": true,
            "collapsible_controls": true,
        }));
        assert!(card.update_view(&host).unwrap().buttons.is_none());
    }

    #[test]
    fn test_install_command() {
        let (host, mut rx) = host_with_update("on", json!({}));
        let card = card(json!({ "entity": "update.firmware" }));
        card.install(&host);

        match rx.try_recv().unwrap() {
            HostCommand::CallService(call) => {
                assert_eq!((call.domain.as_str(), call.service.as_str()), ("update", "install"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
