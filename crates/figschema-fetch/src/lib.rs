mod client;
mod file_ref;

pub use client::HttpDesignSource;
pub use file_ref::DesignIds;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_API_BASE: &str = "https://api.qa.unifyapps.com/api-endpoint/figma";

/// Configuration for fetching a source document
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    /// Overrides the file id parsed from the URL
    pub file_id: Option<String>,
    pub response_path: PathBuf,
    pub ids_path: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            file_id: None,
            response_path: PathBuf::from("figmaResponse.json"),
            ids_path: PathBuf::from("IDs.txt"),
        }
    }
}

impl FetchConfig {
    /// Defaults, overridden by `FIGSCHEMA_API_BASE` and `FIGSCHEMA_FILE_ID`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("FIGSCHEMA_API_BASE") {
            config.base_url = base;
        }
        if let Ok(file_id) = std::env::var("FIGSCHEMA_FILE_ID") {
            if !file_id.trim().is_empty() {
                config.file_id = Some(file_id);
            }
        }
        config
    }
}

/// Source of design documents
#[async_trait]
pub trait DesignSource: Send + Sync {
    /// Whole document tree for a design file URL
    async fn fetch_by_url(&self, file_url: &str) -> Result<Value>;

    /// Details of a single node
    async fn fetch_node_details(&self, ids: &DesignIds) -> Result<Value>;
}

/// What a fetch wrote to disk
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub ids: DesignIds,
    pub response_path: PathBuf,
    pub ids_path: PathBuf,
}

/// Fetch the document for `file_url`, save it pretty-printed and record the id pair
pub async fn fetch_and_save(
    source: &dyn DesignSource,
    config: &FetchConfig,
    file_url: &str,
) -> Result<FetchOutcome> {
    let ids = DesignIds::from_file_url(file_url, config.file_id.as_deref())?;

    let document = source.fetch_by_url(file_url).await?;
    let pretty = serde_json::to_string_pretty(&document)?;
    tokio::fs::write(&config.response_path, pretty)
        .await
        .with_context(|| format!("Failed to write {:?}", config.response_path))?;

    tokio::fs::write(&config.ids_path, ids.to_ids_file())
        .await
        .with_context(|| format!("Failed to write {:?}", config.ids_path))?;

    info!(
        "Saved design document to {:?} and ids to {:?}",
        config.response_path, config.ids_path
    );

    Ok(FetchOutcome {
        ids,
        response_path: config.response_path.clone(),
        ids_path: config.ids_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubSource {
        document: Value,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DesignSource for StubSource {
        async fn fetch_by_url(&self, file_url: &str) -> Result<Value> {
            self.requested.lock().unwrap().push(file_url.to_string());
            Ok(self.document.clone())
        }

        async fn fetch_node_details(&self, ids: &DesignIds) -> Result<Value> {
            Ok(json!({ "node": ids.node_id }))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DesignSource for FailingSource {
        async fn fetch_by_url(&self, _file_url: &str) -> Result<Value> {
            anyhow::bail!("connection refused")
        }

        async fn fetch_node_details(&self, _ids: &DesignIds) -> Result<Value> {
            anyhow::bail!("connection refused")
        }
    }

    fn config_in(dir: &std::path::Path) -> FetchConfig {
        FetchConfig {
            response_path: dir.join("figmaResponse.json"),
            ids_path: dir.join("IDs.txt"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_and_save_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let source = StubSource {
            document: json!({ "Result": { "nodes": {} } }),
            requested: Mutex::new(Vec::new()),
        };

        let url = "https://www.figma.com/design/abcDEF/Sheet?node-id=3352-19070";
        let outcome = fetch_and_save(&source, &config, url).await.unwrap();

        assert_eq!(outcome.ids, DesignIds::new("abcDEF", "3352-19070"));
        assert_eq!(source.requested.lock().unwrap().as_slice(), &[url.to_string()]);

        let saved = std::fs::read_to_string(&config.response_path).unwrap();
        assert_eq!(saved, "{\n  \"Result\": {\n    \"nodes\": {}\n  }\n}");

        let ids = std::fs::read_to_string(&config.ids_path).unwrap();
        assert_eq!(ids, "NodeId: 3352-19070\nFileId: abcDEF");
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let result = fetch_and_save(
            &FailingSource,
            &config,
            "https://www.figma.com/design/abcDEF/Sheet?node-id=1-2",
        )
        .await;

        assert!(result.is_err());
        assert!(!config.response_path.exists());
        assert!(!config.ids_path.exists());
    }

    #[tokio::test]
    async fn test_bad_url_fails_before_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let source = StubSource {
            document: json!({}),
            requested: Mutex::new(Vec::new()),
        };

        let result = fetch_and_save(&source, &config_in(dir.path()), "::nope::").await;

        assert!(result.is_err());
        assert!(source.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_node_details_through_trait() {
        let source: Box<dyn DesignSource> = Box::new(StubSource {
            document: json!({}),
            requested: Mutex::new(Vec::new()),
        });
        let details = source
            .fetch_node_details(&DesignIds::new("F", "1-2"))
            .await
            .unwrap();
        assert_eq!(details["node"], "1-2");
    }
}
