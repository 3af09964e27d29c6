// Mode Control - Stateless HVAC mode selector
//
// The current mode is read off the entity on every render; selecting a mode
// only dispatches the command. The next render is driven entirely by the
// host pushing updated state, never by local optimism.

use morel_types::{compare_hvac_modes, ClimateEntity, HvacMode};

use crate::cards::thermostat::util::mode_icon;
use crate::host::{Host, HostCommand, ServiceCall};

/// One selectable mode button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeButton {
    pub mode: HvacMode,
    pub icon: &'static str,
    /// The entity's current mode.
    pub active: bool,
}

/// View of the mode control: buttons in fixed priority order. An entity
/// without modes renders an empty control.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeControlView {
    pub buttons: Vec<ModeButton>,
}

pub fn view(entity: &ClimateEntity) -> ModeControlView {
    let mut modes = entity.attributes.hvac_modes.clone();
    modes.sort_by(compare_hvac_modes);
    let current = entity.state.mode();

    ModeControlView {
        buttons: modes
            .into_iter()
            .map(|mode| ModeButton {
                mode,
                icon: mode_icon(mode),
                active: current == Some(mode),
            })
            .collect(),
    }
}

/// Dispatch a mode change for the entity.
pub fn select_mode(host: &dyn Host, entity: &ClimateEntity, mode: HvacMode) {
    host.dispatch(HostCommand::CallService(
        ServiceCall::new("climate", "set_hvac_mode")
            .entity(&entity.entity_id)
            .arg("hvac_mode", mode.as_str()),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ChannelHost;
    use morel_types::{EntityState, Locale, UnitSystem};
    use serde_json::json;

    fn entity(state: &str, modes: serde_json::Value) -> ClimateEntity {
        let mut raw = EntityState::new("climate.living_room", state);
        raw.attributes = json!({ "hvac_modes": modes }).as_object().cloned().unwrap();
        ClimateEntity::from_state(&raw).unwrap()
    }

    #[test]
    fn test_buttons_in_priority_order() {
        let view = view(&entity("heat", json!(["off", "cool", "heat", "auto"])));
        let modes: Vec<HvacMode> = view.buttons.iter().map(|b| b.mode).collect();
        assert_eq!(
            modes,
            vec![HvacMode::Auto, HvacMode::Heat, HvacMode::Cool, HvacMode::Off]
        );
        assert!(view.buttons[1].active);
        assert!(!view.buttons[0].active);
    }

    #[test]
    fn test_empty_mode_set_renders_empty() {
        let view = view(&entity("off", json!([])));
        assert!(view.buttons.is_empty());
    }

    #[test]
    fn test_select_mode_dispatches_single_command() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let device = entity("off", json!(["heat", "off"]));

        select_mode(&host, &device, HvacMode::Heat);

        match rx.try_recv().unwrap() {
            HostCommand::CallService(call) => {
                assert_eq!(call.domain, "climate");
                assert_eq!(call.service, "set_hvac_mode");
                assert_eq!(
                    call.data.get("hvac_mode").and_then(serde_json::Value::as_str),
                    Some("heat")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(rx.try_recv().is_err(), "exactly one command per selection");
    }
}
