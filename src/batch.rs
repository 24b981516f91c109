use crate::config::BatchConfig;
use figschema_common::{ComponentKind, Result};
use figschema_core::{ColorTable, SourceDocument};
use figschema_projector::{
    AvatarGroupProjector, CheckboxProjector, IdSource, SchemaProjector, SchemaSet,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of one projector run over a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub kind: ComponentKind,
    pub count: usize,
    /// Output file, when anything was written
    pub written: Option<PathBuf>,
}

/// Which projectors a batch runs over the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchCommand {
    Checkbox,
    AvatarGroup,
    All,
}

impl BatchCommand {
    fn runs(&self, kind: ComponentKind) -> bool {
        match self {
            BatchCommand::Checkbox => kind == ComponentKind::Checkbox,
            BatchCommand::AvatarGroup => kind == ComponentKind::AvatarGroup,
            BatchCommand::All => true,
        }
    }
}

/// Parse the source document once and run the selected projectors over it.
///
/// No matches is not an error: the report carries a zero count and no output file.
pub fn run_batch(
    command: BatchCommand,
    config: &BatchConfig,
    ids: impl IdSource,
) -> Result<Vec<BatchReport>> {
    let doc = config.load_document()?;
    let mut reports = Vec::new();

    if command.runs(ComponentKind::Checkbox) {
        let colors = config.load_colors()?;
        reports.push(run_checkboxes(&doc, &colors, config)?);
    }
    if command.runs(ComponentKind::AvatarGroup) {
        reports.push(run_avatar_groups(&doc, ids, config)?);
    }
    Ok(reports)
}

pub fn run_checkboxes(
    doc: &SourceDocument,
    colors: &ColorTable,
    config: &BatchConfig,
) -> Result<BatchReport> {
    let schemas = CheckboxProjector::new(colors).project(doc);
    emit(ComponentKind::Checkbox, &schemas, config)
}

pub fn run_avatar_groups(
    doc: &SourceDocument,
    ids: impl IdSource,
    config: &BatchConfig,
) -> Result<BatchReport> {
    let schemas = AvatarGroupProjector::new(ids).project(doc);
    emit(ComponentKind::AvatarGroup, &schemas, config)
}

/// Write a non-empty result set; an empty one is reported and left unwritten
fn emit<C: Serialize>(
    kind: ComponentKind,
    schemas: &SchemaSet<C>,
    config: &BatchConfig,
) -> Result<BatchReport> {
    if schemas.is_empty() {
        warn!("No {} components found, nothing written", kind.label());
        return Ok(BatchReport {
            kind,
            count: 0,
            written: None,
        });
    }

    let path = config.output_path(kind);
    write_schema_set(&path, schemas)?;
    info!("Wrote {} {} schema(s) to {:?}", schemas.len(), kind.label(), path);

    Ok(BatchReport {
        kind,
        count: schemas.len(),
        written: Some(path),
    })
}

/// Pretty-print a schema set (2-space indent) to `path`
pub fn write_schema_set<C: Serialize>(path: &Path, schemas: &SchemaSet<C>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(schemas)?;
    std::fs::write(path, json)?;
    Ok(())
}
