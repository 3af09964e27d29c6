// Card Registry - Card type registration for the host dashboard
//
// Each card type registers once under a unique type name with the
// capabilities the host invokes: building a card, building its editor,
// producing a stub config for the "add card" flow, and a sizing hint.
// Registration is explicit one-time initialization driven by `init()`,
// never an import side effect.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cards::{self, Card};
use crate::error::ConfigError;
use crate::form::CardEditor;
use crate::host::Host;

/// A registered card type.
pub struct CardDescriptor {
    /// Unique dashboard type name, e.g. `custom:morel-thermostat-card`.
    pub type_name: &'static str,
    /// Human-readable name shown in the card picker.
    pub name: &'static str,
    pub description: &'static str,
    /// Fixed layout sizing hint.
    pub card_size: u32,
    pub make_card: fn() -> Box<dyn Card>,
    pub make_editor: fn() -> Box<dyn CardEditor>,
    /// Default config derived from current host state.
    pub stub_config: fn(&dyn Host) -> Value,
}

/// Registry of card types.
#[derive(Default)]
pub struct CardRegistry {
    cards: HashMap<&'static str, CardDescriptor>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the pack's built-in cards registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        cards::register_builtin_cards(&mut registry);
        registry
    }

    /// Register a card type. The first registration of a type name wins;
    /// duplicates are ignored with a warning.
    pub fn register(&mut self, descriptor: CardDescriptor) {
        if self.cards.contains_key(descriptor.type_name) {
            warn!(type_name = descriptor.type_name, "card type already registered, ignoring");
            return;
        }
        info!(
            type_name = descriptor.type_name,
            name = descriptor.name,
            "registered card"
        );
        self.cards.insert(descriptor.type_name, descriptor);
    }

    pub fn get(&self, type_name: &str) -> Option<&CardDescriptor> {
        self.cards.get(type_name)
    }

    /// Build a card instance for a type name.
    pub fn make_card(&self, type_name: &str) -> Result<Box<dyn Card>, ConfigError> {
        self.get(type_name)
            .map(|descriptor| (descriptor.make_card)())
            .ok_or_else(|| ConfigError::UnknownCardType(type_name.to_string()))
    }

    /// Whether a card type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.cards.contains_key(type_name)
    }

    /// All registered type names, sorted.
    pub fn types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self.cards.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Number of registered card types.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Process-wide registry
// ─────────────────────────────────────────────────────────────────────────────

static GLOBAL_REGISTRY: OnceLock<RwLock<CardRegistry>> = OnceLock::new();

/// One-time pack initialization, invoked by the host at startup: emits the
/// version banner and fills the process-wide registry. Idempotent.
pub fn init() {
    let first = GLOBAL_REGISTRY
        .set(RwLock::new(CardRegistry::with_builtins()))
        .is_ok();
    if first {
        info!("Morel card pack v{}", env!("CARGO_PKG_VERSION"));
    } else {
        debug!("card pack already initialized");
    }
}

/// The process-wide registry, if `init()` has run.
pub fn global() -> Option<&'static RwLock<CardRegistry>> {
    GLOBAL_REGISTRY.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = CardRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(!registry.contains("custom:morel-thermostat-card"));
    }

    #[test]
    fn test_builtins_registered() {
        let registry = CardRegistry::with_builtins();
        assert!(registry.contains("custom:morel-thermostat-card"));
        assert!(registry.contains("custom:morel-lock-card"));
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = CardRegistry::with_builtins();
        let before = registry.len();
        cards::register_builtin_cards(&mut registry);
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_make_card_unknown_type() {
        let registry = CardRegistry::with_builtins();
        assert!(matches!(
            registry.make_card("custom:unheard-of"),
            Err(ConfigError::UnknownCardType(_))
        ));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        let registry = global().expect("initialized").read();
        assert!(!registry.is_empty());
    }
}
