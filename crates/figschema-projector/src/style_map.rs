//! Best-effort mapping from node presentation attributes to semantic style tokens.
//!
//! Each attribute only decides whether a token is emitted; the token itself is
//! fixed. A drop shadow always maps to `shadow-3xl` whatever its offset or blur,
//! and the same goes for stroke, fill, radius and width. Treat the output as a
//! starting point for the form designer, not a faithful design-token resolution.

use figschema_core::DesignNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_PADDING: &str = "ps-md";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeftPadding {
    /// Bound spacing value as given: a token string or a raw number
    pub l: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllSides<T> {
    pub all: T,
}

impl<T> AllSides<T> {
    fn new(all: T) -> Self {
        Self { all }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<LeftPadding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<AllSides<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<AllSides<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<AllSides<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<AllSides<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

/// Inspect the node's presentation attributes independently of one another
pub fn map_node_styles(node: &DesignNode) -> AppearanceStyles {
    AppearanceStyles {
        padding: item_spacing(node).map(|l| LeftPadding { l }),
        box_shadow: node
            .effects
            .iter()
            .any(|e| e.effect_type == "DROP_SHADOW")
            .then(|| "shadow-3xl".to_string()),
        border_color: node
            .first_stroke_color()
            .map(|_| "border-success".to_string()),
        margin: node
            .absolute_bounding_box
            .as_ref()
            .and_then(|b| b.margin.clone())
            .filter(is_truthy)
            .map(AllSides::new),
        background_color: node
            .first_fill_color()
            .map(|_| "bg-brand-darker".to_string()),
        overflow: node
            .scroll_behavior
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "SCROLLS" => AllSides::new("overflow-visible".to_string()),
                other => AllSides::new(other.to_string()),
            }),
        border_radius: node
            .corner_radius
            .map(|_| AllSides::new("rounded-5xl".to_string())),
        border_width: node
            .stroke_weight
            .map(|_| AllSides::new("border-4".to_string())),
        width: (node.layout_sizing_horizontal.as_deref() == Some("FIXED")
            || node.absolute_bounding_box.is_some())
        .then(|| "w-fit".to_string()),
    }
}

/// Padding from a bound `itemSpacing` variable, if one is bound.
/// A truthy `value` passes through untouched, numbers included.
fn item_spacing(node: &DesignNode) -> Option<Value> {
    let binding = node.bound_variables.get("itemSpacing").filter(|v| is_truthy(v))?;
    let padding = match binding.get("value") {
        Some(value @ (Value::String(_) | Value::Number(_))) if is_truthy(value) => value.clone(),
        _ => Value::String(DEFAULT_PADDING.to_string()),
    };
    Some(padding)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
