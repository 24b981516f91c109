/// Prefix applied to a source node key to form an output schema id
pub const SCHEMA_ID_PREFIX: &str = "b_";

/// Every projected schema hangs off this single flat root
pub const ROOT_PARENT_ID: &str = "root_id";

/// Build the output id for a source node key.
///
/// Prefixing is injective, so unique node keys give unique schema ids.
pub fn schema_id(node_key: &str) -> String {
    format!("{}{}", SCHEMA_ID_PREFIX, node_key)
}

/// The component kinds a batch can project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Checkbox,
    AvatarGroup,
}

impl ComponentKind {
    /// Default output file name for this kind
    pub fn output_file_name(&self) -> &'static str {
        match self {
            ComponentKind::Checkbox => "transformedCheckboxes.json",
            ComponentKind::AvatarGroup => "transformedAvatarGroups.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Checkbox => "checkbox",
            ComponentKind::AvatarGroup => "avatar group",
        }
    }
}

/// Common error types
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Figma JSON structure: Missing Result.nodes")]
    MissingNodes,

    #[error("Design API error ({status}): {body}")]
    Fetch { status: u16, body: String },

    #[error("Invalid design file URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
