// Temperature Control - Stateful dual-range setpoint editor
//
// Tracks an indicator pair (low/high) locally while the user drags, and
// re-derives it only when the host pushes a new snapshot of the entity.
// Committing dispatches a single set_temperature call; partial range
// updates preserve the untouched bound.

use chrono::{DateTime, Utc};
use morel_types::{ClimateEntity, HvacAction, Locale, UnitSystem};

use crate::cards::thermostat::util::{format_degrees, step_size, target_temps};
use crate::host::{Host, HostCommand, ServiceCall};

/// Slider bounds used when a device omits min/max attributes.
pub const DEFAULT_MIN_TEMP: f64 = 45.0;
pub const DEFAULT_MAX_TEMP: f64 = 95.0;

/// Local "current value changed" notification emitted while dragging,
/// before any command is sent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorChange {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

/// Display options owned by the card config.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureOptions {
    pub show_indicators: bool,
    pub enable_when_off: bool,
    /// Minimum low/high separation forwarded to the slider.
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub gap: f64,
    pub disabled: bool,
}

/// A low or high numeric readout, colored by action semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorView {
    pub text: String,
    pub action: HvacAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureControlView {
    pub slider: SliderView,
    pub low_indicator: Option<IndicatorView>,
    pub high_indicator: Option<IndicatorView>,
}

/// The editor state. Owned by the thermostat card, discarded with it.
#[derive(Debug, Clone, Default)]
pub struct TemperatureControl {
    indicator_temps: (Option<f64>, Option<f64>),
    /// Identity of the snapshot the indicators were derived from.
    seen: Option<(String, DateTime<Utc>)>,
}

impl TemperatureControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicator_temps(&self) -> (Option<f64>, Option<f64>) {
        self.indicator_temps
    }

    /// Re-derive the indicator pair iff the snapshot identity changed.
    /// Unrelated re-renders keep in-flight drag state intact.
    pub fn sync(&mut self, entity: &ClimateEntity) {
        let identity = (entity.entity_id.clone(), entity.last_updated);
        if self.seen.as_ref() == Some(&identity) {
            return;
        }
        self.indicator_temps = target_temps(entity);
        self.seen = Some(identity);
    }

    /// Commit a new setpoint. Single-setpoint devices get whichever end was
    /// provided as their one temperature; range devices get both bounds,
    /// the untouched one carried over from current state. At most one
    /// command is dispatched, and no local state is touched beyond the
    /// indicators already updated while dragging.
    pub fn on_range_change(
        &self,
        host: &dyn Host,
        entity: &ClimateEntity,
        low: Option<f64>,
        high: Option<f64>,
    ) {
        let attrs = &entity.attributes;
        let call = if attrs.temperature.is_some() {
            let Some(value) = low.or(high) else { return };
            ServiceCall::new("climate", "set_temperature")
                .entity(&entity.entity_id)
                .arg("temperature", value)
        } else {
            if low.is_none() && high.is_none() {
                return;
            }
            let new_low = low.or(attrs.target_temp_low);
            let new_high = high.or(attrs.target_temp_high);
            let mut call = ServiceCall::new("climate", "set_temperature").entity(&entity.entity_id);
            if let Some(new_low) = new_low {
                call = call.arg("target_temp_low", new_low);
            }
            if let Some(new_high) = new_high {
                call = call.arg("target_temp_high", new_high);
            }
            call
        };
        host.dispatch(HostCommand::CallService(call));
    }

    /// Track an in-flight drag: update only the provided end(s) locally and
    /// return the notification for listening ancestors. Nothing is
    /// dispatched.
    pub fn on_indicator_change(
        &mut self,
        low: Option<f64>,
        high: Option<f64>,
    ) -> IndicatorChange {
        if let Some(low) = low {
            self.indicator_temps.0 = Some(low);
        }
        if let Some(high) = high {
            self.indicator_temps.1 = Some(high);
        }
        IndicatorChange { low, high }
    }

    pub fn view(
        &self,
        entity: &ClimateEntity,
        unit_system: UnitSystem,
        locale: &Locale,
        options: &TemperatureOptions,
    ) -> TemperatureControlView {
        let step = step_size(unit_system, entity);
        let (low, high) = self.indicator_temps;

        // An unavailable device is never editable, whatever the config says.
        let disabled = if !entity.is_available() {
            true
        } else {
            !entity.is_active() && !options.enable_when_off
        };

        let indicator = |value: Option<f64>, action: HvacAction| {
            if !options.show_indicators {
                return None;
            }
            format_degrees(locale, value, step).map(|text| IndicatorView { text, action })
        };

        TemperatureControlView {
            slider: SliderView {
                low,
                high,
                min: entity.attributes.min_temp.unwrap_or(DEFAULT_MIN_TEMP),
                max: entity.attributes.max_temp.unwrap_or(DEFAULT_MAX_TEMP),
                step,
                gap: options.gap,
                disabled,
            },
            low_indicator: indicator(low, HvacAction::Heating),
            high_indicator: indicator(high, HvacAction::Cooling),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ChannelHost;
    use morel_types::EntityState;
    use serde_json::{json, Value};

    fn raw(state: &str, attributes: serde_json::Value) -> EntityState {
        let mut entity = EntityState::new("climate.living_room", state);
        entity.attributes = attributes.as_object().cloned().unwrap();
        entity
    }

    fn climate(state: &str, attributes: serde_json::Value) -> ClimateEntity {
        ClimateEntity::from_state(&raw(state, attributes)).unwrap()
    }

    fn recv_call(rx: &mut tokio::sync::mpsc::UnboundedReceiver<HostCommand>) -> ServiceCall {
        match rx.try_recv().unwrap() {
            HostCommand::CallService(call) => call,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_sync_derives_indicators_from_snapshot() {
        let mut control = TemperatureControl::new();
        let entity = climate(
            "heat",
            json!({ "hvac_modes": ["heat", "off"], "temperature": 21.0 }),
        );
        control.sync(&entity);
        assert_eq!(control.indicator_temps(), (Some(21.0), None));
    }

    #[test]
    fn test_sync_keeps_drag_state_for_same_snapshot() {
        let mut control = TemperatureControl::new();
        let entity = climate(
            "heat",
            json!({ "hvac_modes": ["heat", "off"], "temperature": 21.0 }),
        );
        control.sync(&entity);
        control.on_indicator_change(Some(22.5), None);

        // Same snapshot identity: the in-flight value survives.
        control.sync(&entity);
        assert_eq!(control.indicator_temps(), (Some(22.5), None));

        // New snapshot: indicators are re-derived.
        let mut updated = entity.clone();
        updated.last_updated = entity.last_updated + chrono::Duration::seconds(1);
        control.sync(&updated);
        assert_eq!(control.indicator_temps(), (Some(21.0), None));
    }

    #[test]
    fn test_range_change_single_setpoint() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let control = TemperatureControl::new();
        let entity = climate(
            "heat",
            json!({ "hvac_modes": ["heat", "off"], "temperature": 70.0 }),
        );

        control.on_range_change(&host, &entity, Some(72.0), None);

        let call = recv_call(&mut rx);
        assert_eq!(call.service, "set_temperature");
        assert_eq!(call.data.get("temperature").and_then(Value::as_f64), Some(72.0));
        assert!(!call.data.contains_key("target_temp_low"));
        assert!(!call.data.contains_key("target_temp_high"));
        assert!(rx.try_recv().is_err(), "exactly one command per commit");
    }

    #[test]
    fn test_range_change_single_setpoint_from_secondary() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let control = TemperatureControl::new();
        let entity = climate(
            "cool",
            json!({ "hvac_modes": ["cool", "off"], "temperature": 24.0 }),
        );

        control.on_range_change(&host, &entity, None, Some(23.0));
        let call = recv_call(&mut rx);
        assert_eq!(call.data.get("temperature").and_then(Value::as_f64), Some(23.0));
    }

    #[test]
    fn test_range_change_preserves_untouched_bound() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let control = TemperatureControl::new();
        let entity = climate(
            "heat_cool",
            json!({
                "hvac_modes": ["heat_cool", "off"],
                "supported_features": 2,
                "target_temp_low": 68.0,
                "target_temp_high": 74.0,
            }),
        );

        control.on_range_change(&host, &entity, None, Some(76.0));

        let call = recv_call(&mut rx);
        assert_eq!(call.data.get("target_temp_low").and_then(Value::as_f64), Some(68.0));
        assert_eq!(call.data.get("target_temp_high").and_then(Value::as_f64), Some(76.0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_range_change_without_values_dispatches_nothing() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let control = TemperatureControl::new();
        let entity = climate(
            "heat",
            json!({ "hvac_modes": ["heat", "off"], "temperature": 21.0 }),
        );

        control.on_range_change(&host, &entity, None, None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_indicator_change_is_local_only() {
        let (_host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let mut control = TemperatureControl::new();

        let change = control.on_indicator_change(None, Some(74.5));
        assert_eq!(change, IndicatorChange { low: None, high: Some(74.5) });
        assert_eq!(control.indicator_temps(), (None, Some(74.5)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_view_default_bounds_and_indicators() {
        let mut control = TemperatureControl::new();
        let entity = climate(
            "heat_cool",
            json!({
                "hvac_modes": ["heat_cool", "off"],
                "supported_features": 2,
                "target_temp_low": 68.0,
                "target_temp_high": 74.0,
            }),
        );
        control.sync(&entity);

        let options = TemperatureOptions {
            show_indicators: true,
            enable_when_off: false,
            gap: 2.0,
        };
        let view = control.view(&entity, UnitSystem::US_CUSTOMARY, &Locale::default(), &options);

        assert_eq!(view.slider.min, DEFAULT_MIN_TEMP);
        assert_eq!(view.slider.max, DEFAULT_MAX_TEMP);
        assert_eq!(view.slider.step, 1.0);
        assert!(!view.slider.disabled);
        assert_eq!(view.low_indicator.as_ref().unwrap().text, "68");
        assert_eq!(view.low_indicator.as_ref().unwrap().action, HvacAction::Heating);
        assert_eq!(view.high_indicator.as_ref().unwrap().action, HvacAction::Cooling);
    }

    #[test]
    fn test_view_disabled_when_off_unless_enabled() {
        let control = TemperatureControl::new();
        let entity = climate("off", json!({ "hvac_modes": ["heat", "off"] }));

        let mut options = TemperatureOptions::default();
        let view = control.view(&entity, UnitSystem::METRIC, &Locale::default(), &options);
        assert!(view.slider.disabled);

        options.enable_when_off = true;
        let view = control.view(&entity, UnitSystem::METRIC, &Locale::default(), &options);
        assert!(!view.slider.disabled);
    }

    #[test]
    fn test_view_unavailable_always_disabled() {
        let control = TemperatureControl::new();
        let entity = climate("unavailable", json!({}));

        let options = TemperatureOptions {
            enable_when_off: true,
            ..TemperatureOptions::default()
        };
        let view = control.view(&entity, UnitSystem::METRIC, &Locale::default(), &options);
        assert!(view.slider.disabled, "unavailable overrides enable_when_off");
    }
}
