//! Morel - Dashboard Card Pack
//!
//! This crate provides the card pack's view-model layer:
//! - Card registration and lookup via `registry`
//! - Per-card config validation, view derivation and command dispatch
//!   under `cards`
//! - The host boundary (entity snapshots, localization, fire-and-forget
//!   commands) via `host`
//! - Declarative editor schemas via `form`

// Re-export the shared entity and formatting types
pub use morel_types;

// Tap/hold/double-tap action bindings
pub mod actions;

// The cards themselves
pub mod cards;

// Config parsing shared across cards
pub mod config;

// Shared state icon and state text helpers
pub mod display;

pub mod error;

// Declarative editor form schemas
pub mod form;

// Host boundary: state in, commands out
pub mod host;

// Card type registry
pub mod registry;

pub use cards::{Card, CardView};
pub use error::{ConfigError, Result};
pub use registry::{init, CardRegistry};
