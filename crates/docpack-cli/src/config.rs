//! Configuration file support.
//!
//! Engine binary locations and bundle defaults are explicit configuration,
//! loaded from `.docpack.toml` in the current directory (project scope) and
//! `~/.docpack.toml` (user scope). Precedence: CLI flags > project config >
//! user config > built-in defaults.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration file contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// External engine binary locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engines: Option<EnginesConfig>,

    /// Default settings for the bundle command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<BundleConfig>,
}

/// `[engines]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginesConfig {
    /// Path to the pandoc binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pandoc: Option<PathBuf>,

    /// Path to the LibreOffice (soffice) binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soffice: Option<PathBuf>,
}

/// `[bundle]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Include the copied source DOCX in the archive (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_source: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Find and merge the user and project configuration files.
    #[must_use]
    pub fn discover() -> Self {
        let user = Self::load_scope(Self::user_config_path().as_deref(), "user");
        let project = Self::load_scope(Some(Path::new(".docpack.toml")), "project");
        Self::merge(user, project)
    }

    fn user_config_path() -> Option<PathBuf> {
        Some(dirs::home_dir()?.join(".docpack.toml"))
    }

    fn load_scope(path: Option<&Path>, scope: &str) -> Option<Self> {
        let path = path?;
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "{} Failed to load {scope} config from {}: {e}",
                    "Warning:".yellow().bold(),
                    path.display()
                );
                None
            }
        }
    }

    /// Merge configs with project taking precedence over user, per field.
    #[must_use]
    pub fn merge(user: Option<Self>, project: Option<Self>) -> Self {
        let mut merged = user.unwrap_or_default();

        if let Some(project) = project {
            if let Some(engines) = project.engines {
                let mut merged_engines = merged.engines.unwrap_or_default();
                if let Some(pandoc) = engines.pandoc {
                    merged_engines.pandoc = Some(pandoc);
                }
                if let Some(soffice) = engines.soffice {
                    merged_engines.soffice = Some(soffice);
                }
                merged.engines = Some(merged_engines);
            }
            if let Some(bundle) = project.bundle {
                let mut merged_bundle = merged.bundle.unwrap_or_default();
                if let Some(include_source) = bundle.include_source {
                    merged_bundle.include_source = Some(include_source);
                }
                merged.bundle = Some(merged_bundle);
            }
        }
        merged
    }

    /// Configured pandoc binary, defaulting to `pandoc` on PATH.
    #[must_use]
    pub fn pandoc_binary(&self) -> PathBuf {
        self.engines
            .as_ref()
            .and_then(|e| e.pandoc.clone())
            .unwrap_or_else(|| PathBuf::from("pandoc"))
    }

    /// Configured soffice binary, defaulting to `soffice` on PATH.
    #[must_use]
    pub fn soffice_binary(&self) -> PathBuf {
        self.engines
            .as_ref()
            .and_then(|e| e.soffice.clone())
            .unwrap_or_else(|| PathBuf::from("soffice"))
    }

    /// Whether the staged source DOCX is bundled (default: true).
    #[must_use]
    pub fn include_source(&self) -> bool {
        self.bundle
            .as_ref()
            .and_then(|b| b.include_source)
            .unwrap_or(true)
    }
}
