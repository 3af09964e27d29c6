// Thermostat Utilities - Step sizes, degree formatting, setpoint inference
//
// Pure functions over the typed climate entity. All the numeric edge cases
// of the card live here.

use morel_types::{
    format_number, ClimateEntity, HvacAction, HvacMode, Locale, TemperatureUnit, UnitSystem,
    SUPPORT_TARGET_TEMPERATURE_RANGE,
};

/// Setpoint step: the device's own step when it advertises one, else a unit
/// default (whole degrees for Fahrenheit, half degrees otherwise).
pub fn step_size(unit_system: UnitSystem, entity: &ClimateEntity) -> f64 {
    let system_step = match unit_system.temperature {
        TemperatureUnit::Fahrenheit => 1.0,
        TemperatureUnit::Celsius => 0.5,
    };
    entity.attributes.target_temp_step.unwrap_or(system_step)
}

/// Format a temperature for display. `None` in, nothing out. A step of 1
/// renders whole degrees; any finer step always renders one decimal, even
/// for integral values (70 at step 0.5 is "70.0").
pub fn format_degrees(locale: &Locale, value: Option<f64>, step: f64) -> Option<String> {
    let value = value.filter(|v| v.is_finite())?;
    let text = if step == 1.0 {
        format_number(value, locale, 0, 0)
    } else {
        format_number(value, locale, 1, 1)
    };
    Some(text)
}

/// Mode set contains heat and excludes cool.
pub fn supports_heat_only(entity: &ClimateEntity) -> bool {
    let modes = &entity.attributes.hvac_modes;
    modes.contains(&HvacMode::Heat) && !modes.contains(&HvacMode::Cool)
}

/// Mode set contains cool and excludes heat.
pub fn supports_cool_only(entity: &ClimateEntity) -> bool {
    let modes = &entity.attributes.hvac_modes;
    modes.contains(&HvacMode::Cool) && !modes.contains(&HvacMode::Heat)
}

/// Device advertises independent low/high setpoints.
pub fn supports_target_range(entity: &ClimateEntity) -> bool {
    entity.supports_feature(SUPPORT_TARGET_TEMPERATURE_RANGE)
}

/// Infer the (low, high) target pair for display.
///
/// Capability-first contract: a device advertising the range capability gets
/// its low/high pair back verbatim even when its mode set is heat-only at
/// the time of the read. Mode exclusivity only decides the single-setpoint
/// cases.
pub fn target_temps(entity: &ClimateEntity) -> (Option<f64>, Option<f64>) {
    let attrs = &entity.attributes;
    if supports_target_range(entity) {
        return (attrs.target_temp_low, attrs.target_temp_high);
    }
    if supports_heat_only(entity) {
        return (attrs.target_temp_low.or(attrs.temperature), None);
    }
    // Cooling semantics by default.
    (None, attrs.target_temp_high.or(attrs.temperature))
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons
// ─────────────────────────────────────────────────────────────────────────────

pub fn mode_icon(mode: HvacMode) -> &'static str {
    match mode {
        HvacMode::Auto => "mdi:calendar-sync",
        HvacMode::HeatCool => "mdi:autorenew",
        HvacMode::Heat => "mdi:fire",
        HvacMode::Cool => "mdi:snowflake",
        HvacMode::Dry => "mdi:water-percent",
        HvacMode::FanOnly => "mdi:fan",
        HvacMode::Off => "mdi:power",
    }
}

pub fn action_icon(action: HvacAction) -> &'static str {
    match action {
        HvacAction::Off => "mdi:power",
        HvacAction::Heating => "mdi:fire",
        HvacAction::Cooling => "mdi:snowflake",
        HvacAction::Drying => "mdi:water-percent",
        HvacAction::Idle => "mdi:thermostat",
        HvacAction::Fan => "mdi:fan",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morel_types::{ClimateState, EntityState, NumberFormat};
    use serde_json::json;

    fn entity(state: &str, attributes: serde_json::Value) -> ClimateEntity {
        let mut raw = EntityState::new("climate.living_room", state);
        raw.attributes = attributes.as_object().cloned().unwrap();
        ClimateEntity::from_state(&raw).unwrap()
    }

    fn locale() -> Locale {
        Locale::new("en", NumberFormat::Language)
    }

    #[test]
    fn test_step_size_prefers_device_step() {
        let device = entity("heat", json!({ "target_temp_step": 0.1 }));
        assert_eq!(step_size(UnitSystem::METRIC, &device), 0.1);
        assert_eq!(step_size(UnitSystem::US_CUSTOMARY, &device), 0.1);
    }

    #[test]
    fn test_step_size_unit_defaults() {
        let device = entity("heat", json!({}));
        assert_eq!(step_size(UnitSystem::METRIC, &device), 0.5);
        assert_eq!(step_size(UnitSystem::US_CUSTOMARY, &device), 1.0);
    }

    #[test]
    fn test_format_degrees_whole_step() {
        assert_eq!(format_degrees(&locale(), Some(70.0), 1.0).as_deref(), Some("70"));
        assert_eq!(format_degrees(&locale(), Some(70.4), 1.0).as_deref(), Some("70"));
    }

    #[test]
    fn test_format_degrees_half_step_keeps_one_decimal() {
        // Integral values still render a decimal at sub-degree steps.
        assert_eq!(format_degrees(&locale(), Some(70.0), 0.5).as_deref(), Some("70.0"));
        assert_eq!(format_degrees(&locale(), Some(21.5), 0.5).as_deref(), Some("21.5"));
    }

    #[test]
    fn test_format_degrees_non_numeric() {
        assert_eq!(format_degrees(&locale(), None, 0.5), None);
        assert_eq!(format_degrees(&locale(), Some(f64::NAN), 0.5), None);
        assert_eq!(format_degrees(&locale(), Some(f64::INFINITY), 1.0), None);
    }

    #[test]
    fn test_mode_exclusivity() {
        let heat = entity("heat", json!({ "hvac_modes": ["heat", "off"] }));
        assert!(supports_heat_only(&heat));
        assert!(!supports_cool_only(&heat));

        let cool = entity("cool", json!({ "hvac_modes": ["cool", "fan_only", "off"] }));
        assert!(supports_cool_only(&cool));
        assert!(!supports_heat_only(&cool));

        let both = entity("heat", json!({ "hvac_modes": ["heat", "cool", "off"] }));
        assert!(!supports_heat_only(&both));
        assert!(!supports_cool_only(&both));
    }

    #[test]
    fn test_target_temps_heat_only_falls_back_to_temperature() {
        let device = entity(
            "heat",
            json!({ "hvac_modes": ["heat", "off"], "temperature": 21.0 }),
        );
        assert_eq!(target_temps(&device), (Some(21.0), None));

        let with_low = entity(
            "heat",
            json!({ "hvac_modes": ["heat", "off"], "target_temp_low": 19.0, "temperature": 21.0 }),
        );
        assert_eq!(target_temps(&with_low), (Some(19.0), None));
    }

    #[test]
    fn test_target_temps_cooling_default() {
        let device = entity(
            "cool",
            json!({ "hvac_modes": ["cool", "off"], "temperature": 24.0 }),
        );
        assert_eq!(target_temps(&device), (None, Some(24.0)));
    }

    #[test]
    fn test_target_temps_range_capable_verbatim() {
        let device = entity(
            "heat_cool",
            json!({
                "hvac_modes": ["heat_cool", "off"],
                "supported_features": 2,
                "target_temp_low": 19.0,
                "target_temp_high": 24.0,
                "temperature": 21.0,
            }),
        );
        assert_eq!(target_temps(&device), (Some(19.0), Some(24.0)));
    }

    #[test]
    fn test_target_temps_capability_beats_mode_exclusivity() {
        // A range-capable device whose mode set is momentarily heat-only
        // (mid mode transition) still reads as a range device.
        let device = entity(
            "heat",
            json!({
                "hvac_modes": ["heat", "off"],
                "supported_features": 2,
                "target_temp_low": 18.0,
                "target_temp_high": 25.0,
                "temperature": 21.0,
            }),
        );
        assert_eq!(device.state, ClimateState::Mode(HvacMode::Heat));
        assert_eq!(target_temps(&device), (Some(18.0), Some(25.0)));
    }
}
