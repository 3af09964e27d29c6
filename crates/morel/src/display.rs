// Display Helpers - State icons and localized state text
//
// Shared by the companion cards. The thermostat card has its own icon and
// text derivation with action/mode semantics.

use morel_types::{EntityState, STATE_UNAVAILABLE};

use crate::host::Host;

/// Default icon for an entity, keyed by domain and current state.
pub fn state_icon(entity: &EntityState) -> &'static str {
    match entity.domain() {
        "climate" => "mdi:thermostat",
        "lock" => match entity.state.as_str() {
            "unlocked" | "open" => "mdi:lock-open",
            "jammed" => "mdi:lock-alert",
            "locking" | "unlocking" => "mdi:lock-clock",
            _ => "mdi:lock",
        },
        "fan" => "mdi:fan",
        "humidifier" => {
            if entity.is_off() {
                "mdi:air-humidifier-off"
            } else {
                "mdi:air-humidifier"
            }
        }
        "media_player" => match entity.state.as_str() {
            "playing" => "mdi:cast-connected",
            "paused" => "mdi:cast-connected",
            _ => "mdi:cast",
        },
        "alarm_control_panel" => match entity.state.as_str() {
            "armed_home" => "mdi:shield-home",
            "armed_away" => "mdi:shield-lock",
            "armed_night" => "mdi:shield-moon",
            "armed_vacation" => "mdi:shield-airplane",
            "armed_custom_bypass" => "mdi:shield-half-full",
            "arming" | "pending" => "mdi:shield-sync",
            "triggered" => "mdi:bell-ring",
            "disarmed" => "mdi:shield-off",
            _ => "mdi:shield",
        },
        "update" => match entity.state.as_str() {
            "on" => "mdi:package-up",
            _ => "mdi:package",
        },
        _ => "mdi:bookmark",
    }
}

/// Localized display string for an entity state, falling back to a
/// prettified raw state.
pub fn state_display(host: &dyn Host, entity: &EntityState) -> String {
    let domain = entity.domain();
    let state = &entity.state;
    host.localize(&format!("component.{domain}.state._.{state}"))
        .unwrap_or_else(|| prettify(state))
}

/// Whether the unavailable badge should be shown. `unknown` is a live but
/// stateless entity and does not badge.
pub fn unavailable_badge(entity: &EntityState) -> Option<&'static str> {
    (entity.state == STATE_UNAVAILABLE).then_some("mdi:help")
}

fn prettify(state: &str) -> String {
    state.replace('_', " ")
}
