use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::providers::gitlab::DEFAULT_MAX_PAGES;

/// Configuration file structure for ciartifacts.
///
/// Supplies defaults for values that are usually the same across runs
/// (instance URL, project, stage). Anything given on the command line wins.
/// The access token is deliberately absent; it only comes from `TOKEN`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitLabConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabConfig {
    /// GitLab instance base URL
    pub base_url: Option<String>,

    /// GitLab project path (e.g., 'group/project')
    pub project: Option<String>,

    /// Pipeline stage whose artifacts are downloaded
    pub stage: Option<String>,

    /// Maximum number of project listing pages to search
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory archives are written to
    pub directory: Option<PathBuf>,

    /// Print the table of downloaded files at the end
    #[serde(default = "default_summary")]
    pub summary: bool,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            project: None,
            stage: None,
            max_pages: default_max_pages(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            summary: default_summary(),
        }
    }
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_summary() -> bool {
    true
}

const CANDIDATES: [&str; 4] = [
    "ciartifacts.toml",
    "ciartifacts.json",
    "ciartifacts.yaml",
    "ciartifacts.yml",
];

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path (must exist)
    /// 2. ./ciartifacts.toml, ./ciartifacts.json, ./ciartifacts.yaml, ./ciartifacts.yml
    /// 3. `<user config dir>/ciartifacts/config.toml`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        Self::load_from_dir(Path::new("."))
    }

    fn load_from_dir(dir: &Path) -> Result<Self> {
        for candidate in &CANDIDATES {
            let path = dir.join(candidate);
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        if let Some(path) = dirs::config_dir().map(|d| d.join("ciartifacts").join("config.toml")) {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        log::debug!("Loading config from {}", path.display());

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }
}
