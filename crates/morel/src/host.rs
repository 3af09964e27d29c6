// Host Boundary - The narrow interfaces the cards consume
//
// The dashboard host owns entity state, localization and command execution.
// Cards read snapshots through `Host` and push commands back as
// fire-and-forget `HostCommand` dispatches. No command returns a result;
// success or failure is only ever observed through the next state push.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::debug;

use morel_types::{EntityState, Locale, UnitSystem};

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// A service invocation, `(domain, service, data)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: Map<String, Value>,
}

impl ServiceCall {
    pub fn new(domain: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            data: Map::new(),
        }
    }

    /// Target the call at an entity.
    pub fn entity(mut self, entity_id: impl Into<String>) -> Self {
        self.data.insert("entity_id".into(), Value::String(entity_id.into()));
        self
    }

    /// Add a service parameter.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Everything the card pack ever asks the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    CallService(ServiceCall),
    MoreInfo { entity_id: String },
    Navigate { path: String },
    OpenUrl { url: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Host trait
// ─────────────────────────────────────────────────────────────────────────────

/// Read access to host state plus the fire-and-forget command sink.
pub trait Host {
    /// Latest snapshot for an entity id, if the entity exists.
    fn entity(&self, entity_id: &str) -> Option<&EntityState>;

    /// All known entity ids (stub-config enumeration).
    fn entity_ids(&self) -> Vec<String>;

    fn unit_system(&self) -> UnitSystem;

    fn locale(&self) -> &Locale;

    /// Translate a dotted key. `None` falls back to the caller's default.
    fn localize(&self, key: &str) -> Option<String>;

    /// Dispatch a command. Never blocks, never reports a result.
    fn dispatch(&self, command: HostCommand);
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel-backed host
// ─────────────────────────────────────────────────────────────────────────────

/// Host implementation backed by an in-memory state map and an unbounded
/// command channel. The example binary and the tests observe dispatched
/// commands by draining the receiver.
pub struct ChannelHost {
    states: HashMap<String, EntityState>,
    unit_system: UnitSystem,
    locale: Locale,
    translations: HashMap<String, String>,
    commands: mpsc::UnboundedSender<HostCommand>,
}

impl ChannelHost {
    pub fn new(
        unit_system: UnitSystem,
        locale: Locale,
    ) -> (Self, mpsc::UnboundedReceiver<HostCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                states: HashMap::new(),
                unit_system,
                locale,
                translations: HashMap::new(),
                commands: tx,
            },
            rx,
        )
    }

    /// Replace an entity snapshot, as a host state push would.
    pub fn push_state(&mut self, entity: EntityState) {
        self.states.insert(entity.entity_id.clone(), entity);
    }

    pub fn remove_state(&mut self, entity_id: &str) {
        self.states.remove(entity_id);
    }

    pub fn add_translation(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.translations.insert(key.into(), text.into());
    }
}

impl Host for ChannelHost {
    fn entity(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    fn entity_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.states.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn localize(&self, key: &str) -> Option<String> {
        self.translations.get(key).cloned()
    }

    fn dispatch(&self, command: HostCommand) {
        debug!(?command, "dispatching host command");
        // Receiver gone means the host shut down; the command is dropped,
        // matching fire-and-forget semantics.
        let _ = self.commands.send(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_call_builder() {
        let call = ServiceCall::new("climate", "set_temperature")
            .entity("climate.living_room")
            .arg("temperature", 21.5);

        assert_eq!(call.domain, "climate");
        assert_eq!(call.service, "set_temperature");
        assert_eq!(
            call.data.get("entity_id").and_then(Value::as_str),
            Some("climate.living_room")
        );
        assert_eq!(call.data.get("temperature").and_then(Value::as_f64), Some(21.5));
    }

    #[test]
    fn test_channel_host_records_commands() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());

        host.dispatch(HostCommand::MoreInfo {
            entity_id: "climate.living_room".into(),
        });

        match rx.try_recv().unwrap() {
            HostCommand::MoreInfo { entity_id } => assert_eq!(entity_id, "climate.living_room"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_push_state_replaces_snapshot() {
        let (mut host, _rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        host.push_state(EntityState::new("lock.front_door", "locked"));
        host.push_state(EntityState::new("lock.front_door", "unlocked"));

        assert_eq!(host.entity("lock.front_door").unwrap().state, "unlocked");
        assert_eq!(host.entity_ids(), vec!["lock.front_door".to_string()]);
    }
}
