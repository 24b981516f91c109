use figschema_common::{Result, SchemaError};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// A node in the exported design document tree.
///
/// Decoding never rejects a node for a malformed attribute: a value of the wrong
/// type reads as absent, and a child that is not an object is dropped on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub node_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub children: Vec<DesignNode>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub component_properties: IndexMap<String, ComponentProperty>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub fills: Vec<Paint>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub strokes: Vec<Paint>,
    #[serde(default, deserialize_with = "lenient")]
    pub style: Option<TypeStyle>,
    #[serde(default, deserialize_with = "lenient")]
    pub characters: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub effects: Vec<Effect>,
    #[serde(default, deserialize_with = "lenient")]
    pub bound_variables: IndexMap<String, Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "lenient")]
    pub corner_radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub stroke_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub layout_sizing_horizontal: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub scroll_behavior: Option<String>,
    /// Style references by kind, e.g. `{"fill": "S:abc"}`
    #[serde(default, deserialize_with = "lenient_map")]
    pub styles: IndexMap<String, String>,
}

/// Instance-specific property override, wrapped as `{ "value": ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentProperty {
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub paint_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<Rgba>,
    #[serde(default, deserialize_with = "lenient")]
    pub style_id: Option<String>,
}

/// Color with channels in the normalized `[0, 1]` range
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub a: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default, deserialize_with = "lenient")]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub font_weight: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub effect_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default, deserialize_with = "lenient")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<f64>,
    pub margin: Option<Value>,
}

impl DesignNode {
    pub fn is_instance(&self) -> bool {
        self.node_type == "INSTANCE"
    }

    /// First direct child whose name equals `name` exactly
    pub fn find_child(&self, name: &str) -> Option<&DesignNode> {
        self.children.iter().find(|c| c.name.as_deref() == Some(name))
    }

    /// Direct children whose name equals `name`, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DesignNode> + 'a {
        self.children
            .iter()
            .filter(move |c| c.name.as_deref() == Some(name))
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.component_properties.get(name).map(|p| &p.value)
    }

    /// String value of a component property; non-string values read as absent
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.property(name).and_then(Value::as_str)
    }

    pub fn first_fill_color(&self) -> Option<&Rgba> {
        self.fills.first().and_then(|p| p.color.as_ref())
    }

    pub fn first_stroke_color(&self) -> Option<&Rgba> {
        self.strokes.first().and_then(|p| p.color.as_ref())
    }
}

/// Metadata of a shared style referenced from nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMeta {
    pub name: Option<String>,
    pub style_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(rename = "Result")]
    result: Option<RawBody>,
}

#[derive(Deserialize)]
struct RawBody {
    nodes: Option<IndexMap<String, Value>>,
    styles: Option<IndexMap<String, Value>>,
}

#[derive(Deserialize)]
struct NodeEntry {
    document: Option<DesignNode>,
}

/// The decoded source document: node entries in document order plus the style table.
///
/// Entries without a `document`, or whose document does not decode, are skipped
/// here so one bad node never aborts the batch.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    nodes: Vec<(String, DesignNode)>,
    styles: IndexMap<String, StyleMeta>,
}

impl SourceDocument {
    /// Read and decode a document from disk
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading source document from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(input)?;
        let body = raw.result.ok_or(SchemaError::MissingNodes)?;
        let raw_nodes = body.nodes.ok_or(SchemaError::MissingNodes)?;

        let mut nodes = Vec::with_capacity(raw_nodes.len());
        for (key, entry) in raw_nodes {
            match serde_json::from_value::<NodeEntry>(entry) {
                Ok(NodeEntry {
                    document: Some(document),
                }) => nodes.push((key, document)),
                Ok(NodeEntry { document: None }) => {
                    debug!("Node {} has no document, skipping", key);
                }
                Err(e) => {
                    warn!("Skipping node {}: {}", key, e);
                }
            }
        }

        let styles = body
            .styles
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(id, raw)| match serde_json::from_value::<StyleMeta>(raw) {
                Ok(meta) => Some((id, meta)),
                Err(e) => {
                    warn!("Skipping style {}: {}", id, e);
                    None
                }
            })
            .collect();

        Ok(Self { nodes, styles })
    }

    /// Node entries as `(key, document)` in source order
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &DesignNode)> {
        self.nodes.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn styles(&self) -> &IndexMap<String, StyleMeta> {
        &self.styles
    }

    pub fn style_name(&self, style_id: &str) -> Option<&str> {
        self.styles.get(style_id).and_then(|s| s.name.as_deref())
    }
}

/// Decode a field, reading any value of the wrong type (or `null`) as the default
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list element by element, dropping only the elements that do not decode
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Decode a map entry by entry, dropping only the entries that do not decode
fn lenient_map<'de, D, T>(deserializer: D) -> std::result::Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries,
        _ => return Ok(IndexMap::new()),
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| serde_json::from_value(value).ok().map(|v| (key, v)))
        .collect())
}
