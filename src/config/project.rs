/// Project-level configuration
use crate::bundle::Variant;
use crate::config::constants;
use crate::error::{ConfigError, ConfigResult};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Static project layout, read once at start-up
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub entry: PathBuf,
    pub dist_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub file_stem: String,
    pub export_name: String,
    /// Explicit rollup binary; otherwise the local install or `PATH` is used
    pub rollup: Option<PathBuf>,
    /// Per-variant JSON patches applied after derivation
    pub overrides: IndexMap<Variant, Value>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from(constants::ENTRY_POINT),
            dist_dir: PathBuf::from(constants::DIST_DIR),
            temp_dir: PathBuf::from(constants::TEMP_DIR),
            file_stem: constants::FILE_STEM.to_string(),
            export_name: constants::EXPORT_NAME.to_string(),
            rollup: None,
            overrides: IndexMap::new(),
        }
    }
}

impl ProjectConfig {
    /// Load the config file if it exists, defaults otherwise
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// `<dist>/<stem><suffix>`
    pub fn bundle_file(&self, suffix: &str) -> PathBuf {
        self.dist_dir.join(format!("{}{}", self.file_stem, suffix))
    }

    /// Directories `build` empties before bundling
    pub fn clean_targets(&self) -> Vec<PathBuf> {
        vec![self.temp_dir.clone(), self.dist_dir.clone()]
    }

    pub fn rollup_bin(&self, root: &Path) -> PathBuf {
        if let Some(bin) = &self.rollup {
            return bin.clone();
        }
        let local = root.join(constants::LOCAL_ROLLUP_BIN);
        if local.is_file() {
            local
        } else {
            PathBuf::from(constants::ROLLUP_BIN)
        }
    }
}

/// Name and version from the project's package.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageInfo {
    /// Best effort: a missing or malformed manifest yields `None`
    pub fn read(root: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(root.join(constants::PACKAGE_JSON)).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn label(&self) -> String {
        match (&self.name, &self.version) {
            (Some(name), Some(version)) => format!("{name}@{version}"),
            (Some(name), None) => name.clone(),
            _ => "unnamed package".to_string(),
        }
    }
}
