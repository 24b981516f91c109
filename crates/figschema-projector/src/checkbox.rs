use crate::schema::{OutputSchema, SchemaProjector};
use figschema_common::ComponentKind;
use figschema_core::{ColorTable, DesignNode, SourceDocument, TextExtractor, TextStyle};
use serde::{Deserialize, Serialize};

const CHECKBOX_TYPE: &str = "Checkbox";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxComponent {
    pub component_type: String,
    pub appearance: CheckboxAppearance,
    pub content: CheckboxContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxAppearance {
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxContent {
    pub help: String,
    pub add_ons: CheckboxAddOns,
    pub default_value: String,
    pub description: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxAddOns {
    pub label: TextStyle,
    pub description: TextStyle,
    pub help: TextStyle,
}

pub type CheckboxSchema = OutputSchema<CheckboxComponent>;

/// Projects `INSTANCE` nodes whose `Type` property is `Checkbox`
pub struct CheckboxProjector<'a> {
    extractor: TextExtractor<'a>,
}

impl<'a> CheckboxProjector<'a> {
    pub fn new(colors: &'a ColorTable) -> Self {
        Self {
            extractor: TextExtractor::new(colors),
        }
    }
}

/// `"True"`/`"False"` variant values to the form's string booleans
fn checked_default(node: &DesignNode) -> &'static str {
    match node.property_str("Checked") {
        Some("True") => "true",
        Some("False") => "false",
        _ => "",
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl SchemaProjector for CheckboxProjector<'_> {
    type Component = CheckboxComponent;

    fn kind(&self) -> ComponentKind {
        ComponentKind::Checkbox
    }

    fn matches(&self, node: &DesignNode) -> bool {
        node.is_instance() && node.property_str("Type") == Some(CHECKBOX_TYPE)
    }

    fn project_node(&mut self, id: &str, node: &DesignNode, _doc: &SourceDocument) -> CheckboxSchema {
        let content = self.extractor.extract(node);

        let display_name = non_empty(node.name.as_deref())
            .map(String::from)
            .unwrap_or_else(|| format!("Checkbox_{}", id));

        let component = CheckboxComponent {
            component_type: non_empty(node.property_str("Type"))
                .unwrap_or(CHECKBOX_TYPE)
                .to_string(),
            appearance: CheckboxAppearance {
                size: node.property_str("Size").unwrap_or_default().to_string(),
            },
            content: CheckboxContent {
                help: String::new(),
                add_ons: CheckboxAddOns {
                    label: content.label.style,
                    description: content.description.style,
                    help: TextStyle::default(),
                },
                default_value: checked_default(node).to_string(),
                description: content.description.text,
                label: content.label.text,
            },
        };

        OutputSchema::new(id.to_string(), display_name, component)
    }
}
