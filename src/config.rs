use crate::core::model::SafetyGrade;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "safenergy.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub data: DataConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub fail_on: FailOn,
    pub min_score: u8,
    pub json: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            fail_on: FailOn::Warning,
            min_score: 60,
            json: false,
            location: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    Caution,
    #[default]
    Warning,
    Danger,
    None,
}

impl FailOn {
    /// The least severe grade that fails a run, if any.
    pub fn threshold(self) -> Option<SafetyGrade> {
        match self {
            Self::Caution => Some(SafetyGrade::Caution),
            Self::Warning => Some(SafetyGrade::Warning),
            Self::Danger => Some(SafetyGrade::Danger),
            Self::None => None,
        }
    }
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caution => write!(f, "caution"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
            Self::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readings_file: Option<PathBuf>,
    pub fallback_synthetic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            readings_file: None,
            fallback_synthetic: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(".safenergy/safety-index.jsonl"),
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let content = default_config_toml().unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.general.fail_on, FailOn::Warning);
        assert_eq!(parsed.general.min_score, 60);
        assert!(parsed.data.fallback_synthetic);
        assert!(parsed.data.readings_file.is_none());
        assert!(parsed.store.enabled);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[general]
fail_on = "danger"

[data]
seed = 7
"#,
        )
        .unwrap();
        assert_eq!(parsed.general.fail_on, FailOn::Danger);
        assert_eq!(parsed.general.min_score, 60);
        assert_eq!(parsed.data.seed, Some(7));
        assert_eq!(
            parsed.store.path,
            PathBuf::from(".safenergy/safety-index.jsonl")
        );
    }

    #[test]
    fn loads_local_file_or_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(None, dir.path()).unwrap();
        assert!(!loaded.config.general.json);

        fs::write(dir.path().join(CONFIG_FILE_NAME), "[general]\njson = true\n").unwrap();
        let loaded = load_config(None, dir.path()).unwrap();
        assert!(loaded.config.general.json);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path).unwrap();
        assert!(write_default_config(&path).is_err());
    }

    #[test]
    fn fail_on_maps_to_grade_threshold() {
        assert_eq!(FailOn::Caution.threshold(), Some(SafetyGrade::Caution));
        assert_eq!(FailOn::None.threshold(), None);
    }
}
