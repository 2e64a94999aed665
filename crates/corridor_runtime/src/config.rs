//! Runtime configuration
//!
//! Loaded in order:
//! 1. TOML file (first positional argument, else `corridor.toml` if present)
//! 2. Environment overrides (`CORRIDOR_SECTIONS`, `CORRIDOR_ANOMALY_CHANCE`, `CORRIDOR_SEED`)

use crate::error::{Result, RuntimeError};
use corridor_math::Vec3;
use corridor_section::{JsonDirRepository, RepositoryError};
use corridor_streaming::StreamingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "corridor.toml";

pub const ENV_SECTIONS: &str = "CORRIDOR_SECTIONS";
pub const ENV_ANOMALY_CHANCE: &str = "CORRIDOR_ANOMALY_CHANCE";
pub const ENV_SEED: &str = "CORRIDOR_SEED";

/// Where section files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    /// Root directory of the JSON section repository
    pub root: PathBuf,
    /// Sub-folder enumerated into the anomaly pool when the pool is empty
    pub anomaly_dir: Option<String>,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("sections"),
            anomaly_dir: Some("anomaly".to_string()),
        }
    }
}

/// Scripted agent movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Path the agent walks, in world space
    pub waypoints: Vec<Vec3>,
    /// Units per second
    pub speed: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            waypoints: vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 100.0)],
            speed: 5.0,
        }
    }
}

/// Tick loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Ticks per second
    pub tick_rate: u32,
    /// Stop after this many ticks even if the agent is still walking
    pub max_ticks: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_ticks: None,
        }
    }
}

impl SessionConfig {
    /// Seconds per tick
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub streaming: StreamingConfig,
    pub sections: SectionsConfig,
    pub agent: AgentConfig,
    pub session: SessionConfig,
    /// Config file path (for reporting)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let explicit = std::env::args()
            .skip(1)
            .find(|arg| !arg.starts_with("--"))
            .map(PathBuf::from);

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => {
                log::info!("No config file, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Check the streaming settings and that the agent can actually finish its walk
    pub fn validate(&self) -> Result<()> {
        self.streaming.validate()?;
        if !(self.agent.speed.is_finite() && self.agent.speed > 0.0) {
            return Err(RuntimeError::InvalidAgentSpeed(self.agent.speed));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| RuntimeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_SECTIONS).filter(|v| !v.is_empty()) {
            self.sections.root = PathBuf::from(root);
            log::info!("Sections root from env: {}", self.sections.root.display());
        }

        if let Some(value) = lookup(ENV_ANOMALY_CHANCE) {
            match value.trim().parse::<u8>() {
                Ok(chance) if chance <= 100 => self.streaming.anomaly_chance_percent = chance,
                _ => {
                    return Err(RuntimeError::InvalidOverride {
                        var: ENV_ANOMALY_CHANCE,
                        value,
                    })
                }
            }
        }

        if let Some(value) = lookup(ENV_SEED) {
            match value.trim().parse::<u64>() {
                Ok(seed) => self.streaming.seed = Some(seed),
                Err(_) => return Err(RuntimeError::InvalidOverride { var: ENV_SEED, value }),
            }
        }

        Ok(())
    }

    /// Fill an empty anomaly pool from `sections.anomaly_dir`
    pub fn resolve_anomaly_pool(&mut self, repository: &JsonDirRepository) -> Result<()> {
        if !self.streaming.anomaly_pool.is_empty() {
            return Ok(());
        }
        if let Some(dir) = &self.sections.anomaly_dir {
            self.streaming.anomaly_pool = match repository.enumerate(dir) {
                Ok(ids) => ids,
                Err(RepositoryError::NotFound(_)) => {
                    log::warn!(
                        "No anomaly folder '{}' under {}, every pass uses the default section",
                        dir,
                        repository.root().display()
                    );
                    Vec::new()
                }
                Err(e) => return Err(e.into()),
            };
            log::info!(
                "Anomaly pool from '{}': {} sections",
                dir,
                self.streaming.anomaly_pool.len()
            );
        }
        Ok(())
    }

    pub fn print_summary(&self) {
        log::info!("Corridor Configuration:");
        log::info!("  Sections: {}", self.sections.root.display());
        log::info!(
            "  Initial section: {} (default: {})",
            self.streaming.initial_section_id,
            self.streaming.default_section()
        );
        log::info!(
            "  Anomaly chance: {}%, pool: {}",
            self.streaming.anomaly_chance_percent,
            self.streaming.anomaly_pool.len()
        );
        log::info!("  Tick rate: {} Hz", self.session.tick_rate);
        if let Some(seed) = self.streaming.seed {
            log::info!("  Seed: {}", seed);
        }
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path.display());
        }
    }
}
