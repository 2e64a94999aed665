//! Streaming configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Agent tag that activates exit triggers unless configured otherwise
pub const DEFAULT_AGENT_TAG: &str = "Player";

/// Configuration for the section streamer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Percentage threshold for the anomaly roll.
    ///
    /// An anomaly is chosen when a 1..=100 roll exceeds this value, so higher
    /// values mean fewer anomalies. See [`crate::selector`].
    pub anomaly_chance_percent: u8,

    /// Section loaded by `start`
    pub initial_section_id: String,

    /// Section used for invalid passes and non-anomaly rolls (defaults to the initial section)
    pub default_section_id: Option<String>,

    /// Alternate section ids; pool index `k` maps to `anomaly_pool[k - 1]`
    pub anomaly_pool: Vec<String>,

    /// Tag that counts as the agent for exit triggers
    pub agent_tag: String,

    /// Seed for the anomaly roll (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            anomaly_chance_percent: 50,
            initial_section_id: "default".to_string(),
            default_section_id: None,
            anomaly_pool: Vec::new(),
            agent_tag: DEFAULT_AGENT_TAG.to_string(),
            seed: None,
        }
    }
}

impl StreamingConfig {
    /// Create a config starting at `initial_section_id`
    pub fn new(initial_section_id: impl Into<String>) -> Self {
        Self {
            initial_section_id: initial_section_id.into(),
            ..Self::default()
        }
    }

    /// Set the anomaly threshold (builder pattern)
    pub fn with_anomaly_chance(mut self, percent: u8) -> Self {
        self.anomaly_chance_percent = percent;
        self
    }

    /// Set the anomaly pool (builder pattern)
    pub fn with_anomaly_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anomaly_pool = pool.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default section (builder pattern)
    pub fn with_default_section(mut self, id: impl Into<String>) -> Self {
        self.default_section_id = Some(id.into());
        self
    }

    /// Set the roll seed (builder pattern)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Section id used when no anomaly is chosen
    pub fn default_section(&self) -> &str {
        self.default_section_id
            .as_deref()
            .unwrap_or(&self.initial_section_id)
    }

    /// Resolve a 1-based pool index
    pub fn anomaly_section(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.anomaly_pool.get(i))
            .map(String::as_str)
    }

    /// Check the configuration before a session starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.anomaly_chance_percent > 100 {
            return Err(ConfigError::ChanceOutOfRange(self.anomaly_chance_percent));
        }
        if self.initial_section_id.is_empty() {
            return Err(ConfigError::EmptyInitialSection);
        }
        if let Some(i) = self.anomaly_pool.iter().position(String::is_empty) {
            return Err(ConfigError::EmptyPoolEntry(i));
        }
        if self.agent_tag.is_empty() {
            return Err(ConfigError::EmptyAgentTag);
        }
        Ok(())
    }
}
