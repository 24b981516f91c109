use figschema_common::{schema_id, ComponentKind, ROOT_PARENT_ID};
use figschema_core::{DesignNode, SourceDocument};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub value: bool,
}

/// Envelope shared by every projected component.
///
/// `dpOn` and `dataSourceIds` are carried as empty placeholders for the
/// downstream form system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSchema<C> {
    pub component: C,
    pub visibility: Visibility,
    pub dp_on: Vec<Value>,
    pub display_name: String,
    pub data_source_ids: Vec<String>,
    pub id: String,
    pub parent_id: String,
}

impl<C> OutputSchema<C> {
    pub fn new(id: String, display_name: String, component: C) -> Self {
        Self {
            component,
            visibility: Visibility { value: true },
            dp_on: Vec::new(),
            display_name,
            data_source_ids: Vec::new(),
            id,
            parent_id: ROOT_PARENT_ID.to_string(),
        }
    }
}

/// Projected schemas keyed by id, in source document order
pub type SchemaSet<C> = IndexMap<String, OutputSchema<C>>;

/// Converts matching design nodes of one component kind into output schemas
pub trait SchemaProjector {
    type Component: Serialize;

    fn kind(&self) -> ComponentKind;

    /// Whether a node is an instance of this projector's component
    fn matches(&self, node: &DesignNode) -> bool;

    fn project_node(
        &mut self,
        id: &str,
        node: &DesignNode,
        doc: &SourceDocument,
    ) -> OutputSchema<Self::Component>;

    /// Project every matching node of the document; non-matching nodes are skipped
    fn project(&mut self, doc: &SourceDocument) -> SchemaSet<Self::Component> {
        let mut out = SchemaSet::new();

        for (key, node) in doc.nodes() {
            if !self.matches(node) {
                continue;
            }
            let id = schema_id(key);
            debug!("Projecting {} node {} as {}", self.kind().label(), key, id);
            let schema = self.project_node(&id, node, doc);
            out.insert(id, schema);
        }

        info!(
            "Projected {} {} component(s) from {} node(s)",
            out.len(),
            self.kind().label(),
            doc.node_count()
        );
        out
    }
}
