use crate::domain::version::DEFAULT_TAG_PREFIXES;
use crate::domain::Version;
use crate::error::{GenSemverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "gensemver.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE: &str = ".gensemver.toml";

/// Represents the complete configuration for gensemver.
///
/// Every section is optional; the defaults reproduce the built-in rule set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_initial_version() -> String {
    "1.0.0".to_string()
}

fn default_tag_prefixes() -> Vec<String> {
    DEFAULT_TAG_PREFIXES.iter().map(|p| p.to_string()).collect()
}

/// Tag interpretation and the version used when no release exists yet.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    #[serde(default = "default_tag_prefixes")]
    pub tag_prefixes: Vec<String>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            initial_version: default_initial_version(),
            tag_prefixes: default_tag_prefixes(),
        }
    }
}

fn default_breaking_markers() -> Vec<String> {
    vec!["BREAKING CHANGES:".to_string()]
}

fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

fn default_patch_types() -> Vec<String> {
    vec![
        "docs".to_string(),
        "fix".to_string(),
        "chore".to_string(),
        "style".to_string(),
        "test".to_string(),
    ]
}

/// Commit message rules used to classify the severity of a change.
///
/// A body containing any breaking marker is major. A title starting with one of the
/// types followed by `(` or `:` is minor or patch.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RulesConfig {
    #[serde(default = "default_breaking_markers")]
    pub breaking_markers: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            breaking_markers: default_breaking_markers(),
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
        }
    }
}

fn default_git_executable() -> String {
    "git".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_git_executable")]
    pub executable: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            executable: default_git_executable(),
        }
    }
}

impl Config {
    /// The version reported when the repository has no version tag
    pub fn initial_version(&self) -> Result<Version> {
        Version::parse(&self.versioning.initial_version).map_err(|e| {
            GenSemverError::config(format!("versioning.initial_version is invalid: {}", e))
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GenSemverError::config(e.to_string()))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gensemver.toml` in current directory
/// 3. `.gensemver.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Some(path) => path,
            None => {
                log::debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    log::debug!("loading configuration from {}", path.display());
    let content = fs::read_to_string(&path).map_err(|e| {
        GenSemverError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    toml::from_str(&content)
        .map_err(|e| GenSemverError::config(format!("{}: {}", path.display(), e)))
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}
