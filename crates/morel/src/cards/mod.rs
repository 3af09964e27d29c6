// Cards - The card pack
//
// Every card is a thin view model: config in, host snapshots in, a
// declarative view out, commands dispatched on interaction. Cards hold no
// host-owned state, only transient display state discarded with the card.

use serde_json::Value;

use crate::actions::ActionTrigger;
use crate::error::ConfigError;
use crate::host::Host;
use crate::registry::CardRegistry;

pub mod alarm_panel;
pub mod fan;
pub mod humidifier;
pub mod lock;
pub mod media_player;
pub mod thermostat;
pub mod update;

/// Behavior the host invokes on every card type.
pub trait Card {
    /// Validate and adopt a config. All-or-nothing: on error nothing of the
    /// previous state changes.
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError>;

    /// Reconcile internal display state after a host state or config change.
    fn sync(&mut self, host: &dyn Host);

    /// Derive the view model. `None` when the card has nothing to render
    /// (no config, no entity).
    fn view(&self, host: &dyn Host) -> Option<CardView>;

    /// Layout sizing hint.
    fn card_size(&self) -> u32 {
        1
    }

    /// Forward a tap/hold/double-tap on the primary area to the configured
    /// action.
    fn handle_action(&self, host: &dyn Host, trigger: ActionTrigger);
}

/// Shared declarative view model rendered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub icon: String,
    /// Semantic color token, e.g. `action-climate-heating`. `None` keeps
    /// the neutral default.
    pub color: Option<String>,
    /// Badge icon shown for degraded entities.
    pub badge_icon: Option<&'static str>,
    pub primary: String,
    pub secondary: Option<String>,
    /// Icon is rendered dimmed when false.
    pub active: bool,
}

/// Stub config for the "add card" flow: the type name plus the first
/// entity of a matching domain, when one exists.
pub(crate) fn stub_config_for(host: &dyn Host, type_name: &str, domains: &[&str]) -> Value {
    let entity = host
        .entity_ids()
        .into_iter()
        .find(|id| domains.contains(&id.split('.').next().unwrap_or_default()));
    serde_json::json!({
        "type": type_name,
        "entity": entity,
    })
}

/// Register every card type this crate ships.
pub fn register_builtin_cards(registry: &mut CardRegistry) {
    registry.register(thermostat::descriptor());
    registry.register(alarm_panel::descriptor());
    registry.register(fan::descriptor());
    registry.register(humidifier::descriptor());
    registry.register(lock::descriptor());
    registry.register(media_player::descriptor());
    registry.register(update::descriptor());
}
