use figschema_common::{ComponentKind, Result};
use figschema_core::{ColorTable, SourceDocument};
use std::path::PathBuf;
use tracing::info;

/// Where a batch reads from and writes to
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Alternative color token table; the design system table when unset
    pub tokens: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("figmaResponse.json"),
            output_dir: PathBuf::from("."),
            tokens: None,
        }
    }
}

impl BatchConfig {
    pub fn output_path(&self, kind: ComponentKind) -> PathBuf {
        self.output_dir.join(kind.output_file_name())
    }

    pub fn load_document(&self) -> Result<SourceDocument> {
        let doc = SourceDocument::load(&self.input)?;
        info!("Loaded {} node(s) from {:?}", doc.node_count(), self.input);
        Ok(doc)
    }

    pub fn load_colors(&self) -> Result<ColorTable> {
        match &self.tokens {
            Some(path) => {
                let table = ColorTable::from_json_str(&std::fs::read_to_string(path)?)?;
                info!("Loaded {} color token(s) from {:?}", table.len(), path);
                Ok(table)
            }
            None => Ok(ColorTable::design_system()),
        }
    }
}
