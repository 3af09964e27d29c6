// Humidifier Card - Humidifier entity display with target humidity command

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

pub const HUMIDIFIER_CARD_TYPE: &str = "custom:morel-humidifier-card";
pub const HUMIDIFIER_ENTITY_DOMAINS: &[&str] = &["humidifier"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HumidifierCardConfig {
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
    pub show_target_humidity_control: bool,
    #[serde(default)]
    pub collapsible_controls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl HumidifierCardConfig {
    pub fn actions(&self) -> CardActions {
        CardActions::from_config(
            self.tap_action.clone(),
            self.hold_action.clone(),
            self.double_tap_action.clone(),
        )
    }
}

/// Target humidity slider view.
#[derive(Debug, Clone, PartialEq)]
pub struct HumiditySliderView {
    pub value: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HumidifierCardView {
    pub card: CardView,
    pub humidity_slider: Option<HumiditySliderView>,
}

#[derive(Default)]
pub struct HumidifierCard {
    config: Option<HumidifierCardConfig>,
}

impl HumidifierCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn entity_id(&self) -> Option<&str> {
        self.config.as_ref()?.entity.as_deref()
    }

    pub fn toggle(&self, host: &dyn Host) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("humidifier", "toggle").entity(entity_id),
            ));
        }
    }

    pub fn set_humidity(&self, host: &dyn Host, humidity: f64) {
        if let Some(entity_id) = self.entity_id() {
            host.dispatch(HostCommand::CallService(
                ServiceCall::new("humidifier", "set_humidity")
                    .entity(entity_id)
                    .arg("humidity", humidity),
            ));
        }
    }

    pub fn humidifier_view(&self, host: &dyn Host) -> Option<HumidifierCardView> {
        let config = self.config.as_ref()?;
        let entity = host.entity(config.entity.as_deref()?)?;

        let active = entity.is_active();
        let target = entity.attr_f64("humidity");
        let controls_visible = active || !config.collapsible_controls;

        let secondary = (!config.hide_state).then(|| match target.filter(|_| active) {
            Some(target) => format!("{}%", target.round()),
            None => state_display(host, entity),
        });

        let humidity_slider = (config.show_target_humidity_control && controls_visible).then(|| {
            HumiditySliderView {
                value: target,
                min: entity.attr_f64("min_humidity").unwrap_or(0.0),
                max: entity.attr_f64("max_humidity").unwrap_or(100.0),
                disabled: !active,
            }
        });

        Some(HumidifierCardView {
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
            humidity_slider,
        })
    }
}

impl Card for HumidifierCard {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        let config = parse_config::<HumidifierCardConfig>(config)?;
        ensure_domain(config.entity.as_deref(), HUMIDIFIER_ENTITY_DOMAINS)?;
        self.config = Some(config);
        Ok(())
    }

    fn sync(&mut self, _host: &dyn Host) {}

    fn view(&self, host: &dyn Host) -> Option<CardView> {
        self.humidifier_view(host).map(|view| view.card)
    }

    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger) {
        let Some(config) = &self.config else { return };
        handle_action(host, config.entity.as_deref(), &config.actions(), trigger);
    }
}

pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        type_name: HUMIDIFIER_CARD_TYPE,
        name: "Morel Humidifier Card",
        description: "Card for humidifier entities",
        card_size: 1,
        make_card: || Box::new(HumidifierCard::new()),
        make_editor: || Box::new(editor::HumidifierCardEditor::new()) as Box<dyn CardEditor>,
        stub_config: |host| stub_config_for(host, HUMIDIFIER_CARD_TYPE, HUMIDIFIER_ENTITY_DOMAINS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ChannelHost;
    use morel_types::{EntityState, Locale, UnitSystem};
    use serde_json::json;

    fn host_with_humidifier(
        state: &str,
        attributes: serde_json::Value,
    ) -> (ChannelHost, tokio::sync::mpsc::UnboundedReceiver<HostCommand>) {
        let (mut host, rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let mut entity = EntityState::new("humidifier.bedroom", state);
        entity.attributes = attributes.as_object().cloned().unwrap();
        host.push_state(entity);
        (host, rx)
    }

    #[test]
    fn test_target_humidity_slider() {
        let (host, _rx) = host_with_humidifier(
            "on",
            json!({ "humidity": 45.0, "min_humidity": 20.0, "max_humidity": 80.0 }),
        );
        let mut card = HumidifierCard::new();
        card.set_config(json!({
            "entity": "humidifier.bedroom",
            "show_target_humidity_control": true,
        }))
        .unwrap();

        let view = card.humidifier_view(&host).unwrap();
        assert_eq!(view.card.secondary.as_deref(), Some("45%"));
        let slider = view.humidity_slider.unwrap();
        assert_eq!(slider.value, Some(45.0));
        assert_eq!(slider.min, 20.0);
        assert_eq!(slider.max, 80.0);
        assert!(!slider.disabled);
    }

    #[test]
    fn test_set_humidity_command() {
        let (host, mut rx) = host_with_humidifier("on", json!({}));
        let mut card = HumidifierCard::new();
        card.set_config(json!({ "entity": "humidifier.bedroom" })).unwrap();

        card.set_humidity(&host, 50.0);
        match rx.try_recv().unwrap() {
            HostCommand::CallService(call) => {
                assert_eq!(call.service, "set_humidity");
                assert_eq!(call.data.get("humidity").and_then(Value::as_f64), Some(50.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
