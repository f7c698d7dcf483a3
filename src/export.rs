//! Export artifacts: compiled SQL, compiled diagram, raw IR as JSON.

use crate::error::ForgeResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Downloadable artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Sql,
    Diagram,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Sql, Self::Diagram, Self::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Diagram => "mmd",
            Self::Json => "json",
        }
    }
}

/// A named blob ready to be written or copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(schema_name: &str, format: ExportFormat, contents: String) -> Self {
        Self {
            file_name: format!("{}.{}", file_stem(schema_name), format.extension()),
            contents,
        }
    }

    /// Write into `dir`, returning the full path.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> ForgeResult<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        tracing::info!(path = %path.display(), bytes = self.contents.len(), "wrote artifact");
        Ok(path)
    }
}

/// File stem derived from a schema's display name.
///
/// Lowercased; runs of anything outside `[a-z0-9]` collapse to one `_`.
pub fn file_stem(schema_name: &str) -> String {
    let mut stem = String::with_capacity(schema_name.len());
    for c in schema_name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "schema".to_string()
    } else {
        stem.to_string()
    }
}
