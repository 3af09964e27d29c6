// Morel Types - Core data structures for the Morel card pack
//
// These types model the slice of the host's entity state that the cards
// consume: raw entity snapshots, the typed climate view over them, and the
// locale / unit-system descriptors used for display formatting.

pub mod climate;
pub mod entity;
pub mod units;

pub use climate::{
    compare_hvac_modes, ClimateAttributes, ClimateEntity, ClimateState, HvacAction, HvacMode,
    PRESET_NONE, SUPPORT_TARGET_TEMPERATURE, SUPPORT_TARGET_TEMPERATURE_RANGE,
};
pub use entity::{EntityState, STATE_OFF, STATE_UNAVAILABLE, STATE_UNKNOWN};
pub use units::{format_number, Locale, NumberFormat, TemperatureUnit, UnitSystem};
