//! Tag filtering for overlap signals

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tag carried by the tracked agent unless configured otherwise
pub const DEFAULT_AGENT_TAG: &str = "Player";

/// Filter for which tagged objects can activate a trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFilter {
    /// Accepted tags (empty = any tag)
    pub required_tags: HashSet<String>,
    /// Rejected tags
    pub excluded_tags: HashSet<String>,
}

impl TriggerFilter {
    /// Create a new filter that accepts everything
    pub fn new() -> Self {
        Self {
            required_tags: HashSet::new(),
            excluded_tags: HashSet::new(),
        }
    }

    /// Filter that only accepts the given agent tag
    pub fn agent(tag: impl Into<String>) -> Self {
        Self::new().with_tag(tag)
    }

    /// Accept a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.required_tags.insert(tag.into());
        self
    }

    /// Reject a tag
    pub fn without_tag(mut self, tag: impl Into<String>) -> Self {
        self.excluded_tags.insert(tag.into());
        self
    }

    /// Check if an object with `tag` passes this filter
    pub fn passes(&self, tag: &str) -> bool {
        if self.excluded_tags.contains(tag) {
            return false;
        }
        self.required_tags.is_empty() || self.required_tags.contains(tag)
    }
}

impl Default for TriggerFilter {
    /// Only the default agent tag passes
    fn default() -> Self {
        Self::agent(DEFAULT_AGENT_TAG)
    }
}
