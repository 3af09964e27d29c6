// Form Schema - Declarative editor schemas for the host's form renderer
//
// Editors do not render anything themselves. They emit a schema the host's
// generic form component understands, and translate field labels. The JSON
// shape matches the host's selector format.

use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::host::Host;

/// Fields labelled through the generic (card-independent) translation keys.
pub const GENERIC_LABELS: &[&str] = &[
    "entity",
    "name",
    "icon",
    "layout",
    "fill_container",
    "hide_state",
    "tap_action",
    "hold_action",
    "double_tap_action",
];

/// A form field selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Entity {
        domain: &'static [&'static str],
    },
    Text {},
    Icon {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Boolean {},
    Number {
        min: f64,
        max: f64,
        step: f64,
        mode: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit_of_measurement: Option<String>,
    },
    Select {
        options: Vec<SelectOption>,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        multiple: bool,
    },
    /// The host's action selector.
    #[serde(rename = "ui-action")]
    UiAction {},
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One schema node: a named field, or a grid of nested fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaItem {
    Field {
        name: &'static str,
        selector: Selector,
    },
    Grid {
        #[serde(rename = "type")]
        kind: &'static str,
        name: &'static str,
        schema: Vec<SchemaItem>,
    },
}

impl SchemaItem {
    pub fn field(name: &'static str, selector: Selector) -> Self {
        SchemaItem::Field { name, selector }
    }

    pub fn grid(schema: Vec<SchemaItem>) -> Self {
        SchemaItem::Grid {
            kind: "grid",
            name: "",
            schema,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemaItem::Field { name, .. } => name,
            SchemaItem::Grid { name, .. } => name,
        }
    }
}

/// Shared appearance section: layout plus the display toggles.
pub fn appearance_schema() -> Vec<SchemaItem> {
    vec![SchemaItem::grid(vec![
        SchemaItem::field(
            "layout",
            Selector::Select {
                options: vec![
                    SelectOption { value: "default", label: "Default" },
                    SelectOption { value: "horizontal", label: "Horizontal" },
                    SelectOption { value: "vertical", label: "Vertical" },
                ],
                multiple: false,
            },
        ),
        SchemaItem::field("fill_container", Selector::Boolean {}),
        SchemaItem::field("hide_state", Selector::Boolean {}),
    ])]
}

/// Shared trailing section: the three action bindings.
pub fn actions_schema() -> Vec<SchemaItem> {
    vec![
        SchemaItem::field("tap_action", Selector::UiAction {}),
        SchemaItem::field("hold_action", Selector::UiAction {}),
        SchemaItem::field("double_tap_action", Selector::UiAction {}),
    ]
}

/// A card's configuration editor.
pub trait CardEditor {
    /// Validate and adopt a config. Rejection leaves the editor unchanged.
    fn set_config(&mut self, config: Value) -> Result<(), ConfigError>;

    /// Schema for the host's generic form renderer.
    fn schema(&self, host: &dyn Host) -> Vec<SchemaItem>;

    /// Label for a schema field: card-specific keys first, then the generic
    /// editor keys, then the raw field name.
    fn label(&self, host: &dyn Host, field: &str) -> String;
}

/// Shared label lookup: try the card's own key space, then the generic one.
pub fn label_for(host: &dyn Host, card_key: &str, card_fields: &[&str], field: &str) -> String {
    if GENERIC_LABELS.contains(&field) {
        if let Some(label) = host.localize(&format!("editor.card.generic.{field}")) {
            return label;
        }
    }
    if card_fields.contains(&field) {
        if let Some(label) = host.localize(&format!("editor.card.{card_key}.{field}")) {
            return label;
        }
    }
    field.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_serialization_shape() {
        let item = SchemaItem::field(
            "entity",
            Selector::Entity {
                domain: &["climate"],
            },
        );
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "name": "entity", "selector": { "entity": { "domain": ["climate"] } } })
        );
    }

    #[test]
    fn test_grid_serialization_shape() {
        let grid = SchemaItem::grid(vec![SchemaItem::field("hide_state", Selector::Boolean {})]);
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            json!({
                "type": "grid",
                "name": "",
                "schema": [{ "name": "hide_state", "selector": { "boolean": {} } }]
            })
        );
    }

    #[test]
    fn test_ui_action_selector_name() {
        let item = SchemaItem::field("tap_action", Selector::UiAction {});
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "name": "tap_action", "selector": { "ui-action": {} } })
        );
    }
}
