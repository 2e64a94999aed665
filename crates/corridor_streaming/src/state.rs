//! Streaming state

use crate::scene::SceneHandle;
use corridor_math::SpatialFrame;

/// Lifecycle phase of the streamer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamerPhase {
    /// No section loaded yet
    #[default]
    Idle,
    /// One section is live
    Loaded,
    /// A load is in flight
    Transitioning,
}

impl StreamerPhase {
    /// Check if a section is live
    pub fn is_started(&self) -> bool {
        *self != StreamerPhase::Idle
    }
}

/// Everything the streamer tracks between transitions
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamingState {
    /// Accumulated world frame of the live section
    pub frame: SpatialFrame,
    /// Id of the live section (empty while idle)
    pub section_id: String,
    /// Consecutive valid passes since the last invalid one
    pub pass_counter: u32,
    /// Live scene subtree
    pub scene: Option<SceneHandle>,
}
