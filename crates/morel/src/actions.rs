// Action Handling - Configured tap/hold/double-tap behavior
//
// Every card carries three optional action bindings. Each resolves to at
// most one host command; unconfigured triggers default to more-info.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::host::{Host, HostCommand, ServiceCall};

/// A configured action descriptor, as persisted in dashboard config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", deny_unknown_fields)]
pub enum ActionConfig {
    MoreInfo,
    Navigate {
        navigation_path: String,
    },
    Url {
        url_path: String,
    },
    CallService {
        service: String,
        #[serde(default)]
        data: Map<String, Value>,
    },
    None,
}

/// Which user gesture fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTrigger {
    Tap,
    Hold,
    DoubleTap,
}

/// The three bindings of a card, with defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CardActions {
    pub tap: ActionConfig,
    pub hold: ActionConfig,
    pub double_tap: ActionConfig,
}

impl Default for CardActions {
    fn default() -> Self {
        Self {
            tap: ActionConfig::MoreInfo,
            hold: ActionConfig::MoreInfo,
            double_tap: ActionConfig::MoreInfo,
        }
    }
}

impl CardActions {
    /// Apply the more-info default to any unconfigured binding.
    pub fn from_config(
        tap: Option<ActionConfig>,
        hold: Option<ActionConfig>,
        double_tap: Option<ActionConfig>,
    ) -> Self {
        Self {
            tap: tap.unwrap_or(ActionConfig::MoreInfo),
            hold: hold.unwrap_or(ActionConfig::MoreInfo),
            double_tap: double_tap.unwrap_or(ActionConfig::MoreInfo),
        }
    }

    pub fn for_trigger(&self, trigger: ActionTrigger) -> &ActionConfig {
        match trigger {
            ActionTrigger::Tap => &self.tap,
            ActionTrigger::Hold => &self.hold,
            ActionTrigger::DoubleTap => &self.double_tap,
        }
    }
}

/// True when the binding does something (used to decide whether a gesture
/// is wired up at all).
pub fn has_action(action: &ActionConfig) -> bool {
    !matches!(action, ActionConfig::None)
}

/// Resolve a trigger against the card's bindings and dispatch the resulting
/// command. `none` dispatches nothing.
pub fn handle_action(
    host: &dyn Host,
    entity_id: Option<&str>,
    actions: &CardActions,
    trigger: ActionTrigger,
) {
    match actions.for_trigger(trigger) {
        ActionConfig::MoreInfo => {
            let Some(entity_id) = entity_id else {
                warn!("more-info action fired without a configured entity");
                return;
            };
            host.dispatch(HostCommand::MoreInfo {
                entity_id: entity_id.to_string(),
            });
        }
        ActionConfig::Navigate { navigation_path } => {
            host.dispatch(HostCommand::Navigate {
                path: navigation_path.clone(),
            });
        }
        ActionConfig::Url { url_path } => {
            host.dispatch(HostCommand::OpenUrl {
                url: url_path.clone(),
            });
        }
        ActionConfig::CallService { service, data } => {
            let Some((domain, service)) = service.split_once('.') else {
                warn!(service, "call-service action with malformed service name");
                return;
            };
            let mut call = ServiceCall::new(domain, service);
            call.data = data.clone();
            if let Some(entity_id) = entity_id {
                call.data
                    .entry("entity_id")
                    .or_insert_with(|| Value::String(entity_id.to_string()));
            }
            host.dispatch(HostCommand::CallService(call));
        }
        ActionConfig::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ChannelHost;
    use morel_types::{Locale, UnitSystem};
    use serde_json::json;

    #[test]
    fn test_action_config_serde() {
        let more_info: ActionConfig = serde_json::from_value(json!({ "action": "more-info" })).unwrap();
        assert_eq!(more_info, ActionConfig::MoreInfo);

        let navigate: ActionConfig =
            serde_json::from_value(json!({ "action": "navigate", "navigation_path": "/lovelace/0" }))
                .unwrap();
        assert_eq!(
            navigate,
            ActionConfig::Navigate {
                navigation_path: "/lovelace/0".into()
            }
        );

        assert!(serde_json::from_value::<ActionConfig>(json!({ "action": "explode" })).is_err());
    }

    #[test]
    fn test_defaults_are_more_info() {
        let actions = CardActions::from_config(Some(ActionConfig::None), None, None);
        assert_eq!(actions.tap, ActionConfig::None);
        assert_eq!(actions.hold, ActionConfig::MoreInfo);
        assert_eq!(actions.double_tap, ActionConfig::MoreInfo);
    }

    #[test]
    fn test_handle_action_dispatches_once() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let actions = CardActions::default();

        handle_action(&host, Some("lock.front_door"), &actions, ActionTrigger::Tap);

        assert_eq!(
            rx.try_recv().unwrap(),
            HostCommand::MoreInfo {
                entity_id: "lock.front_door".into()
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_has_action() {
        assert!(has_action(&ActionConfig::MoreInfo));
        assert!(has_action(&ActionConfig::Navigate {
            navigation_path: "/lovelace/0".into()
        }));
        assert!(!has_action(&ActionConfig::None));
    }

    #[test]
    fn test_none_action_dispatches_nothing() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let actions = CardActions {
            tap: ActionConfig::None,
            ..CardActions::default()
        };

        handle_action(&host, Some("lock.front_door"), &actions, ActionTrigger::Tap);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_call_service_action_targets_entity() {
        let (host, mut rx) = ChannelHost::new(UnitSystem::METRIC, Locale::default());
        let actions = CardActions {
            tap: ActionConfig::CallService {
                service: "lock.unlock".into(),
                data: Map::new(),
            },
            ..CardActions::default()
        };

        handle_action(&host, Some("lock.front_door"), &actions, ActionTrigger::Tap);

        match rx.try_recv().unwrap() {
            HostCommand::CallService(call) => {
                assert_eq!(call.domain, "lock");
                assert_eq!(call.service, "unlock");
                assert_eq!(
                    call.data.get("entity_id").and_then(Value::as_str),
                    Some("lock.front_door")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
