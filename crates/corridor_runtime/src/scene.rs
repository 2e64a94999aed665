//! Headless scene builder
//!
//! Materializes the only parts of a section a headless session can act on:
//! world-space volumes for entity volume events and for exit triggers.

use corridor_math::SpatialFrame;
use corridor_section::{EntitySpec, TriggerSpec};
use corridor_streaming::{SceneBuilder, SceneHandle};
use corridor_triggers::{PlacedVolume, TriggerVolume};
use std::collections::HashMap;

/// One instantiated section
#[derive(Debug, Clone, PartialEq)]
pub struct LiveScene {
    /// World frame the section was placed at
    pub frame: SpatialFrame,
    /// Entities with volume-enter events, sized by their bounding box
    pub entity_volumes: Vec<(String, PlacedVolume)>,
    /// Exit triggers, in section order
    pub trigger_volumes: Vec<PlacedVolume>,
}

/// Scene builder that keeps placed volumes instead of render objects
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u64,
    scenes: HashMap<SceneHandle, LiveScene>,
}

impl HeadlessScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an instantiated section
    pub fn scene(&self, handle: SceneHandle) -> Option<&LiveScene> {
        self.scenes.get(&handle)
    }

    /// Number of instantiated sections
    pub fn live_count(&self) -> usize {
        self.scenes.len()
    }
}

impl SceneBuilder for HeadlessScene {
    fn instantiate(
        &mut self,
        frame: &SpatialFrame,
        entities: &[EntitySpec],
        triggers: &[TriggerSpec],
    ) -> SceneHandle {
        self.next_handle += 1;
        let handle = SceneHandle::new(self.next_handle);

        let entity_volumes = entities
            .iter()
            .filter(|entity| entity.has_volume_events())
            .map(|entity| {
                let volume = TriggerVolume::from_size(entity.size);
                (entity.id.clone(), PlacedVolume::in_section(volume, frame, entity.position))
            })
            .collect();

        let trigger_volumes = triggers
            .iter()
            .map(|trigger| {
                PlacedVolume::in_section(TriggerVolume::from_size(trigger.size), frame, trigger.position)
            })
            .collect();

        self.scenes.insert(
            handle,
            LiveScene {
                frame: *frame,
                entity_volumes,
                trigger_volumes,
            },
        );
        log::debug!("Instantiated scene {} at {:?}", handle.raw(), frame.origin);
        handle
    }

    fn destroy(&mut self, handle: SceneHandle) {
        if self.scenes.remove(&handle).is_none() {
            log::warn!("Destroy of unknown scene {}", handle.raw());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corridor_math::Vec3;
    use corridor_section::{ActionSpec, EventSpec};

    #[test]
    fn test_instantiate_places_volumes() {
        let entities = vec![
            EntitySpec::new("wall", Vec3::ZERO, Vec3::ONE),
            EntitySpec::new("door", Vec3::new(0.0, 1.0, 5.0), Vec3::new(2.0, 2.0, 1.0))
                .with_event(EventSpec::on_volume_enter(vec![ActionSpec::play_animation("Open")])),
        ];
        let triggers = vec![TriggerSpec::new(
            Vec3::new(0.0, 1.0, 9.0),
            Vec3::new(4.0, 3.0, 1.0),
            true,
            SpatialFrame::from_origin(Vec3::new(0.0, 0.0, 10.0)),
        )];
        let frame = SpatialFrame::from_origin(Vec3::new(0.0, 0.0, 20.0));

        let mut scene = HeadlessScene::new();
        let handle = scene.instantiate(&frame, &entities, &triggers);
        let live = scene.scene(handle).unwrap();

        assert_eq!(live.entity_volumes.len(), 1);
        assert_eq!(live.entity_volumes[0].0, "door");
        assert!(live.entity_volumes[0].1.contains(Vec3::new(0.0, 1.0, 25.0)));
        assert!(live.trigger_volumes[0].contains(Vec3::new(0.0, 1.0, 29.0)));
        assert!(!live.trigger_volumes[0].contains(Vec3::new(0.0, 1.0, 9.0)));
    }

    #[test]
    fn test_destroy_removes_scene() {
        let mut scene = HeadlessScene::new();
        let a = scene.instantiate(&SpatialFrame::IDENTITY, &[], &[]);
        let b = scene.instantiate(&SpatialFrame::IDENTITY, &[], &[]);
        assert_ne!(a, b);
        assert_eq!(scene.live_count(), 2);

        scene.destroy(a);
        assert!(scene.scene(a).is_none());
        assert_eq!(scene.live_count(), 1);
    }
}
