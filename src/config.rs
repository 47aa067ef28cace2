use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::classifier::ArtifactPaths;

/// Root configuration structure, deserialized from `.phish-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where the classifier artifact lives.
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    /// Heuristic pre-screen settings.
    #[serde(default)]
    pub screening: ScreeningConfig,
}

/// Artifact directory and the file names inside it.
#[derive(Debug, Deserialize)]
pub struct ArtifactConfig {
    /// Directory holding the artifact files. Defaults to `artifacts/demo`.
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_model_file")]
    pub model: String,
    #[serde(default = "default_scaler_file")]
    pub scaler: String,
    #[serde(default = "default_columns_file")]
    pub columns: String,
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("artifacts").join("demo")
}

fn default_model_file() -> String {
    "model.json".to_string()
}

fn default_scaler_file() -> String {
    "scaler.json".to_string()
}

fn default_columns_file() -> String {
    "feature_columns.json".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            model: default_model_file(),
            scaler: default_scaler_file(),
            columns: default_columns_file(),
        }
    }
}

impl ArtifactConfig {
    /// Resolve file paths, with `dir_override` (from `--artifacts`) replacing `dir`.
    pub fn paths(&self, dir_override: Option<&Path>) -> ArtifactPaths {
        let dir = dir_override.unwrap_or(self.dir.as_path());
        ArtifactPaths {
            model: dir.join(&self.model),
            scaler: dir.join(&self.scaler),
            columns: dir.join(&self.columns),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScreeningConfig {
    /// When false every URL goes straight to the model.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.phish-checkr/config.toml`
/// 3. `~/.config/phish-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = working_dir.join(".phish-checkr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("phish-checkr").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
