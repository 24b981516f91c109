use figschema_common::SchemaError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Path segments that precede the file key in design tool URLs
const FILE_KEY_SEGMENTS: &[&str] = &["design", "file", "proto", "board"];

/// File/node pair identifying a design document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignIds {
    #[serde(rename = "FileId")]
    pub file_id: String,
    #[serde(rename = "NodeId")]
    pub node_id: String,
}

impl DesignIds {
    pub fn new(file_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            node_id: node_id.into(),
        }
    }

    /// Parse ids from a file URL such as
    /// `https://www.figma.com/design/<file>/<title>?node-id=1-5710`.
    ///
    /// The node id comes from the `node-id` query parameter and is empty when
    /// missing. `file_id` overrides the key found in the URL path.
    pub fn from_file_url(file_url: &str, file_id: Option<&str>) -> Result<Self, SchemaError> {
        let url = Url::parse(file_url)
            .map_err(|e| SchemaError::InvalidUrl(format!("{}: {}", file_url, e)))?;

        let node_id = url
            .query_pairs()
            .find(|(k, _)| k == "node-id")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();

        let file_id = match file_id {
            Some(id) => id.to_string(),
            None => file_key_from_path(&url).ok_or_else(|| {
                SchemaError::InvalidUrl(format!("{}: no file id in path", file_url))
            })?,
        };

        Ok(Self { file_id, node_id })
    }

    /// Contents of the `IDs.txt` record
    pub fn to_ids_file(&self) -> String {
        format!("NodeId: {}\nFileId: {}", self.node_id, self.file_id)
    }
}

fn file_key_from_path(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    segments.find(|s| FILE_KEY_SEGMENTS.contains(s))?;
    segments
        .next()
        .filter(|s| !s.is_empty())
        .map(String::from)
}
