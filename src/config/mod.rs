//! Configuration management for `mint`.
//!
//! Configuration is loaded from YAML files with support for:
//! - User config (`<config_dir>/mint/config.yaml`, or `MINT_CONFIG`)
//! - Project config (`.mint/config.yaml` beside the document)
//! - Environment variable overrides (`MINT_PREFIX`, `NO_COLOR`)
//! - CLI flags, which win over everything

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mint_lib::DEFAULT_PREFIX;
use mint_lib::document::{self, DOCUMENT_DIR};
use serde::{Deserialize, Serialize};

/// Config file name, both user-level and project-level.
pub const CONFIG_FILE: &str = "config.yaml";

/// One layer of configuration as written in a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    /// Prefix for new stores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Whether text output may use colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    /// Default `tracing` filter directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl ConfigLayer {
    /// Read a layer from `path`; a missing file is an empty layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading config {}", path.display()));
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Render the set fields as YAML, quoting values where needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serializing config")
    }

    /// Overlay `other` on top of `self`; set fields in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            prefix: other.prefix.or(self.prefix),
            color: other.color.or(self.color),
            log: other.log.or(self.log),
        }
    }
}

/// Settings taken from the command line (and their env fallbacks).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit document path (`--file` / `MINT_FILE`).
    pub file: Option<PathBuf>,
    /// Explicit config path (`--config` / `MINT_CONFIG`).
    pub config: Option<PathBuf>,
    pub no_color: bool,
}

/// Effective configuration after every layer is applied.
#[derive(Debug, Clone)]
pub struct Config {
    /// Document location.
    pub document: PathBuf,
    /// Whether the document already existed when configuration was resolved.
    pub document_found: bool,
    /// Default prefix for a store that has no document yet.
    pub prefix: String,
    pub color: bool,
    pub log: Option<String>,
    /// Config files that were consulted, in load order.
    pub sources: Vec<PathBuf>,
}

/// Environment values consulted during resolution.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub prefix: Option<String>,
    pub no_color: bool,
    pub user_config_dir: Option<PathBuf>,
}

impl Environment {
    /// Capture the process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            prefix: std::env::var("MINT_PREFIX")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
            user_config_dir: dirs::config_dir().map(|dir| dir.join("mint")),
        }
    }
}

/// Resolve the effective configuration for a process started in `cwd`.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed.
pub fn load(overrides: &CliOverrides, env: &Environment, cwd: &Path) -> Result<Config> {
    let (document, document_found) = locate_document(overrides.file.as_deref(), cwd);

    let mut sources = Vec::new();
    let mut layer = ConfigLayer::default();

    let user_path = overrides
        .config
        .clone()
        .or_else(|| env.user_config_dir.as_ref().map(|dir| dir.join(CONFIG_FILE)));
    if let Some(path) = user_path {
        layer = layer.merge(ConfigLayer::load(&path)?);
        sources.push(path);
    }

    if let Some(dir) = document.parent() {
        let project_path = dir.join(CONFIG_FILE);
        layer = layer.merge(ConfigLayer::load(&project_path)?);
        sources.push(project_path);
    }

    let prefix = env
        .prefix
        .clone()
        .or(layer.prefix)
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
    let color = !overrides.no_color && !env.no_color && layer.color.unwrap_or(true);

    Ok(Config {
        document,
        document_found,
        prefix,
        color,
        log: layer.log,
        sources,
    })
}

/// Find the document: an explicit path, else the nearest
/// `.mint/issues.yaml` above `cwd`, else `./.mint/issues.yaml`.
#[must_use]
pub fn locate_document(explicit: Option<&Path>, cwd: &Path) -> (PathBuf, bool) {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        let found = path.is_file();
        return (normalize(path), found);
    }

    document::find_document(cwd).map_or_else(
        || (normalize(document::default_document_path(cwd)), false),
        |path| (normalize(path), true),
    )
}

/// Project directory (`.mint`) that holds `document`.
#[must_use]
pub fn project_dir(document: &Path) -> PathBuf {
    document
        .parent()
        .map_or_else(|| PathBuf::from(DOCUMENT_DIR), Path::to_path_buf)
}

fn normalize(path: PathBuf) -> PathBuf {
    dunce::canonicalize(&path).unwrap_or(path)
}
