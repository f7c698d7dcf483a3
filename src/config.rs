//! Configuration file support.
//!
//! ```toml
//! [compile]
//! dialect = "mysql"     # override the dialect carried by the schema
//! timestamp = false     # omit the `-- Generated:` header line
//!
//! [export]
//! dir = "build/schema"
//! ```

use crate::error::{ForgeError, ForgeResult};
use crate::ir::Dialect;
use crate::transpiler::CompileOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const CONFIG_FILE: &str = "schemaforge.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compile: CompileConfig,
    pub export: ExportConfig,
}

/// `[compile]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    pub dialect: Option<Dialect>,
    pub timestamp: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            dialect: None,
            timestamp: true,
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> ForgeResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> ForgeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// User-level config path: `<config dir>/schemaforge/config.toml`.
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("schemaforge").join("config.toml"))
    }

    /// Resolve config: explicit path, then `./schemaforge.toml`, then the
    /// user config, then defaults. An explicit path must exist.
    pub fn discover(explicit: Option<&Path>) -> ForgeResult<Self> {
        Self::discover_in(explicit, Path::new("."), Self::user_path().as_deref())
    }

    /// Discovery rooted at `dir` instead of the working directory.
    pub fn discover_in(
        explicit: Option<&Path>,
        dir: &Path,
        user: Option<&Path>,
    ) -> ForgeResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = dir.join(CONFIG_FILE);
        if local.exists() {
            return Self::load(&local);
        }
        match user {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            timestamp: self.compile.timestamp,
            dialect: self.compile.dialect,
        }
    }
}
