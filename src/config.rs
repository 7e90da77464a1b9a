use crate::core::catalog::builtin_phases;
use crate::core::phase::PhaseDefinition;
use crate::core::score::Classification;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "felkla.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub phases: Vec<PhaseDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            phases: builtin_phases().to_vec(),
        }
    }
}

impl Config {
    pub fn phase(&self, id: &str) -> Option<&PhaseDefinition> {
        self.phases
            .iter()
            .find(|phase| phase.id.eq_ignore_ascii_case(id))
    }

    pub fn is_final_phase(&self, id: &str) -> bool {
        self.phases
            .last()
            .is_some_and(|phase| phase.id.eq_ignore_ascii_case(id))
    }

    pub fn validate(&self) -> Result<()> {
        if self.phases.is_empty() {
            bail!("configuration defines no phases");
        }

        let mut seen = HashSet::new();
        for phase in &self.phases {
            if !seen.insert(phase.id.to_ascii_lowercase()) {
                bail!("phase {} is defined twice", phase.id);
            }
            phase
                .validate()
                .with_context(|| format!("invalid phase {}", phase.id))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub output_dir: PathBuf,
    pub fail_on: FailOn,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            json: false,
            output_dir: PathBuf::from("."),
            fail_on: FailOn::None,
        }
    }
}

/// Which classification makes the process exit non-zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailOn {
    #[default]
    None,
    Attention,
    NotApproved,
}

impl FailOn {
    pub fn is_met_by(self, classification: Classification) -> bool {
        match self {
            Self::None => false,
            Self::NotApproved => classification == Classification::NotApproved,
            Self::Attention => classification != Classification::Approved,
        }
    }
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Attention => write!(f, "attention"),
            Self::NotApproved => write!(f, "not-approved"),
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
            source: Some(path.to_path_buf()),
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
            source: Some(local_path),
        });
    }

    debug!("no {CONFIG_FILE_NAME} found, using built-in questionnaire");
    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
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
    config
        .validate()
        .with_context(|| format!("invalid config file {}", path.display()))?;
    debug!(path = %path.display(), phases = config.phases.len(), "loaded config");
    Ok(config)
}
