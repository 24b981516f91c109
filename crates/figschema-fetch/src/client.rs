use crate::{DesignIds, DesignSource, FetchConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use figschema_common::SchemaError;
use serde_json::{json, Value};
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, info};

/// Design API client over HTTP. One request per call, no retries.
pub struct HttpDesignSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDesignSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(SchemaError::Config("design API base URL is required".to_string()).into());
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            check_status(status, error_text)
                .with_context(|| format!("Request to {} failed", url))?;
            unreachable!("check_status returns Err for non-success statuses");
        }

        let json: Value = response
            .json()
            .await
            .context("Failed to parse design API response")?;

        info!("Design API call to {} took {:?}", path, start.elapsed());
        Ok(json)
    }
}

/// Non-success statuses become `SchemaError::Fetch`; nothing is retried
fn check_status(status: StatusCode, body: String) -> std::result::Result<(), SchemaError> {
    if status.is_success() {
        return Ok(());
    }
    Err(SchemaError::Fetch {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DesignSource for HttpDesignSource {
    async fn fetch_by_url(&self, file_url: &str) -> Result<Value> {
        info!("Fetching design document for {}", file_url);
        self.post_json("Fetch-Figma-Details", &json!({ "fileUrl": file_url }))
            .await
    }

    async fn fetch_node_details(&self, ids: &DesignIds) -> Result<Value> {
        info!("Fetching node details for {} / {}", ids.file_id, ids.node_id);
        self.post_json("node-details", &serde_json::to_value(ids)?)
            .await
    }
}
