//! Scene builder seam
//!
//! The streamer never touches rendering. It hands resolved entity and trigger
//! descriptions plus the composed frame to a [`SceneBuilder`], keeps the
//! returned handle, and gives it back on the next swap.

use corridor_math::SpatialFrame;
use corridor_section::{EntitySpec, TriggerSpec};
use std::fmt;

/// Opaque handle to an instantiated section subtree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

impl SceneHandle {
    /// Create a new scene handle
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle value
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for SceneHandle {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifies one exit trigger of one instantiated scene.
///
/// Carrying the scene handle lets the streamer reject overlap callbacks that
/// were queued against a subtree that has since been destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriggerId {
    pub scene: SceneHandle,
    /// Index into the section's trigger list
    pub index: usize,
}

impl TriggerId {
    pub const fn new(scene: SceneHandle, index: usize) -> Self {
        Self { scene, index }
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} of scene {}", self.index, self.scene.0)
    }
}

/// Instantiates and tears down section subtrees
pub trait SceneBuilder {
    /// Build the section's entities and exit triggers placed at `frame`
    fn instantiate(
        &mut self,
        frame: &SpatialFrame,
        entities: &[EntitySpec],
        triggers: &[TriggerSpec],
    ) -> SceneHandle;

    /// Destroy a subtree previously returned by `instantiate`
    fn destroy(&mut self, handle: SceneHandle);
}

impl<B: SceneBuilder + ?Sized> SceneBuilder for &mut B {
    fn instantiate(
        &mut self,
        frame: &SpatialFrame,
        entities: &[EntitySpec],
        triggers: &[TriggerSpec],
    ) -> SceneHandle {
        (**self).instantiate(frame, entities, triggers)
    }

    fn destroy(&mut self, handle: SceneHandle) {
        (**self).destroy(handle)
    }
}

impl<B: SceneBuilder + ?Sized> SceneBuilder for Box<B> {
    fn instantiate(
        &mut self,
        frame: &SpatialFrame,
        entities: &[EntitySpec],
        triggers: &[TriggerSpec],
    ) -> SceneHandle {
        (**self).instantiate(frame, entities, triggers)
    }

    fn destroy(&mut self, handle: SceneHandle) {
        (**self).destroy(handle)
    }
}
