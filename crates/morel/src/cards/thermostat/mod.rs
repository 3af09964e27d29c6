// Thermostat Card - Climate entity card with mode and temperature controls
//
// Orchestrates the two controls: resolves which control tab is active from
// config flags, derives icon/color/state text from HVAC action, mode and
// preset, and forwards primary-area taps to the configured action.

use serde_json::{json, Value};

use morel_types::{ClimateEntity, ClimateState, HvacAction, HvacMode, TemperatureUnit};

use crate::actions::{handle_action, ActionTrigger};
use crate::cards::{Card, CardView};
use crate::config::{ensure_domain, parse_config};
use crate::error::ConfigError;
use crate::form::CardEditor;
use crate::host::Host;
use crate::registry::CardDescriptor;

pub mod config;
pub mod controls;
pub mod editor;
pub mod util;

use controls::mode::{self, ModeControlView};
use controls::temperature::{
    IndicatorChange, TemperatureControl, TemperatureControlView, TemperatureOptions,
};
pub use config::ThermostatCardConfig;

pub const THERMOSTAT_CARD_TYPE: &str = "custom:morel-thermostat-card";
pub const THERMOSTAT_ENTITY_DOMAINS: &[&str] = &["climate"];

// ─────────────────────────────────────────────────────────────────────────────
// Control selection
// ─────────────────────────────────────────────────────────────────────────────

/// The card's control tabs. Closed set; dispatch is always an exhaustive
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermostatControl {
    TemperatureControl,
    ModeControl,
}

impl ThermostatControl {
    /// Tab button icon.
    pub fn icon(&self) -> &'static str {
        match self {
            ThermostatControl::TemperatureControl => "mdi:thermometer",
            ThermostatControl::ModeControl => "mdi:thermostat",
        }
    }
}

/// Icon color override, keyed by action or state semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermostatColor {
    Action(HvacAction),
    State(HvacMode),
}

impl ThermostatColor {
    /// Semantic token understood by the host theme,
    /// e.g. `action-climate-heating`.
    pub fn token(&self) -> String {
        match self {
            ThermostatColor::Action(action) => format!("action-climate-{}", action.as_str()),
            ThermostatColor::State(mode) => format!("state-climate-{}", mode.as_str()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActiveControlView {
    Mode(ModeControlView),
    Temperature(TemperatureControlView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlButton {
    pub control: ThermostatControl,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermostatCardView {
    pub icon: String,
    pub color: Option<ThermostatColor>,
    pub badge_icon: Option<&'static str>,
    pub primary: String,
    pub secondary: Option<String>,
    pub active: bool,
    pub active_control: Option<ActiveControlView>,
    /// Tab buttons for the non-active controls.
    pub other_controls: Vec<ControlButton>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Card
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ThermostatCard {
    config: Option<ThermostatCardConfig>,
    controls: Vec<ThermostatControl>,
    active_control: Option<ThermostatControl>,
    temperature: TemperatureControl,
}

impl ThermostatCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&ThermostatCardConfig> {
        self.config.as_ref()
    }

    pub fn active_control(&self) -> Option<ThermostatControl> {
        self.active_control
    }

    /// Typed view over the configured entity's snapshot.
    fn climate_entity(&self, host: &dyn Host) -> Option<ClimateEntity> {
        let entity_id = self.config.as_ref()?.entity.as_deref()?;
        ClimateEntity::from_state(host.entity(entity_id)?)
    }

    /// Rebuild the enabled-control set from config flags and keep the
    /// active control valid: unchanged if still enabled, else the first
    /// enabled control, else none. Idempotent.
    pub fn update_controls(&mut self, host: &dyn Host) {
        let Some(config) = &self.config else { return };
        let Some(entity_id) = config.entity.as_deref() else {
            return;
        };
        if host.entity(entity_id).is_none() {
            return;
        }

        let mut controls = Vec::new();
        if config.show_temp_control {
            controls.push(ThermostatControl::TemperatureControl);
        }
        if config.show_mode_control {
            controls.push(ThermostatControl::ModeControl);
        }
        self.controls = controls;

        self.active_control = match self.active_control {
            Some(active) if self.controls.contains(&active) => Some(active),
            _ => self.controls.first().copied(),
        };
    }

    /// User tap on a non-active control's tab button.
    pub fn select_control(&mut self, control: ThermostatControl) {
        self.active_control = Some(control);
    }

    /// Mode control: dispatch a mode change.
    pub fn select_mode(&self, host: &dyn Host, mode: HvacMode) {
        if let Some(entity) = self.climate_entity(host) {
            mode::select_mode(host, &entity, mode);
        }
    }

    /// Temperature control: commit a setpoint change.
    pub fn commit_temperature(&self, host: &dyn Host, low: Option<f64>, high: Option<f64>) {
        if let Some(entity) = self.climate_entity(host) {
            self.temperature.on_range_change(host, &entity, low, high);
        }
    }

    /// Temperature control: track an in-flight drag.
    pub fn drag_temperature(&mut self, low: Option<f64>, high: Option<f64>) -> IndicatorChange {
        self.temperature.on_indicator_change(low, high)
    }

    fn temperature_options(config: &ThermostatCardConfig) -> TemperatureOptions {
        TemperatureOptions {
            show_indicators: config.show_temp_indicators,
            enable_when_off: config.enable_when_off,
            gap: config.temperature_gap.unwrap_or(0.0),
        }
    }

    fn derive_icon(config: &ThermostatCardConfig, entity: &ClimateEntity) -> String {
        if let Some(icon) = &config.icon {
            return icon.clone();
        }
        if config.use_action_icon {
            if let Some(action) = entity
                .attributes
                .hvac_action
                .filter(|action| *action != HvacAction::Idle)
            {
                return util::action_icon(action).to_string();
            }
        }
        match entity.state {
            ClimateState::Mode(mode) => util::mode_icon(mode).to_string(),
            _ => "mdi:thermostat".to_string(),
        }
    }

    fn derive_color(config: &ThermostatCardConfig, entity: &ClimateEntity) -> Option<ThermostatColor> {
        if !config.use_action_color {
            return None;
        }
        if let Some(action) = entity.attributes.hvac_action {
            if action != HvacAction::Idle && action != HvacAction::Off {
                return Some(ThermostatColor::Action(action));
            }
        }
        match entity.state.mode() {
            Some(mode) if mode != HvacMode::Off => Some(ThermostatColor::State(mode)),
            _ => None,
        }
    }

    /// State text: `"<temp> <unit> | <action> - <state> - <preset>"`, the
    /// action and preset segments omitted when absent, the temperature
    /// prefix omitted when non-numeric.
    fn derive_state_text(&self, host: &dyn Host, entity: &ClimateEntity) -> String {
        let step = util::step_size(host.unit_system(), entity);
        let temperature =
            util::format_degrees(host.locale(), entity.attributes.current_temperature, step);

        let mut segments: Vec<String> = Vec::new();
        if let Some(action) = entity.attributes.hvac_action {
            segments.push(
                host.localize(&format!(
                    "state_attributes.climate.hvac_action.{}",
                    action.as_str()
                ))
                .unwrap_or_else(|| action.as_str().replace('_', " ")),
            );
        }
        let state = entity.state.as_str();
        segments.push(
            host.localize(&format!("component.climate.state._.{state}"))
                .unwrap_or_else(|| state.replace('_', " ")),
        );
        if let Some(preset) = entity.preset() {
            segments.push(
                host.localize(&format!("state_attributes.climate.preset_mode.{preset}"))
                    .unwrap_or_else(|| preset.to_string()),
            );
        }
        let composed = segments.join(" - ");

        match temperature {
            Some(temperature) => {
                let unit = host.unit_system().temperature;
                format!("{temperature} {unit} | {composed}")
            }
            None => composed,
        }
    }

    /// Derive the full card view. `None` without config, entity id or live
    /// entity.
    pub fn thermostat_view(&self, host: &dyn Host) -> Option<ThermostatCardView> {
        let config = self.config.as_ref()?;
        let entity = self.climate_entity(host)?;

        let primary = config
            .name
            .clone()
            .or_else(|| entity.attributes.friendly_name.clone())
            .unwrap_or_default();

        let secondary = (!config.hide_state).then(|| self.derive_state_text(host, &entity));

        let active_control = match self.active_control {
            Some(ThermostatControl::ModeControl) => Some(ActiveControlView::Mode(mode::view(&entity))),
            Some(ThermostatControl::TemperatureControl) => {
                Some(ActiveControlView::Temperature(self.temperature.view(
                    &entity,
                    host.unit_system(),
                    host.locale(),
                    &Self::temperature_options(config),
                )))
            }
            None => None,
        };

        let other_controls = self
            .controls
            .iter()
            .filter(|control| Some(**control) != self.active_control)
            .map(|control| ControlButton {
                control: *control,
                icon: control.icon(),
            })
            .collect();

        Some(ThermostatCardView {
            icon: Self::derive_icon(config, &entity),
            color: Self::derive_color(config, &entity),
            badge_icon: (entity.state == ClimateState::Unavailable).then_some("mdi:help"),
            primary,
            secondary,
            active: entity.is_active(),
            active_control,
            other_controls,
        })
    }
}

impl Card for ThermostatCard {
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError> {
        let config = parse_config::<ThermostatCardConfig>(config)?;
        ensure_domain(config.entity.as_deref(), THERMOSTAT_ENTITY_DOMAINS)?;
        self.config = Some(config);
        Ok(())
    }

    fn sync(&mut self, host: &dyn Host) {
        self.update_controls(host);
        if let Some(entity) = self.climate_entity(host) {
            self.temperature.sync(&entity);
        }
    }

    fn view(&self, host: &dyn Host) -> Option<CardView> {
        let view = self.thermostat_view(host)?;
        Some(CardView {
            icon: view.icon,
            color: view.color.map(|color| color.token()),
            badge_icon: view.badge_icon,
            primary: view.primary,
            secondary: view.secondary,
            active: view.active,
        })
    }

    fn card_size(&self) -> u32 {
        1
    }

    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger) {
        let Some(config) = &self.config else { return };
        handle_action(host, config.entity.as_deref(), &config.actions(), trigger);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

pub fn descriptor() -> CardDescriptor {
    CardDescriptor {
        type_name: THERMOSTAT_CARD_TYPE,
        name: "Morel Thermostat Card",
        description: "Card for climate entities with mode and temperature controls",
        card_size: 1,
        make_card: || Box::new(ThermostatCard::new()),
        make_editor: || Box::new(editor::ThermostatCardEditor::new()) as Box<dyn CardEditor>,
        stub_config,
    }
}

fn stub_config(host: &dyn Host) -> Value {
    let entity = host.entity_ids().into_iter().find(|id| {
        THERMOSTAT_ENTITY_DOMAINS.contains(&id.split('.').next().unwrap_or_default())
    });
    let gap = match host.unit_system().temperature {
        TemperatureUnit::Fahrenheit => 2.0,
        TemperatureUnit::Celsius => 1.0,
    };
    json!({
        "type": THERMOSTAT_CARD_TYPE,
        "entity": entity,
        "temperature_gap": gap,
    })
}
