//! Overlap tracking for a single agent
//!
//! Headless stand-in for a collision backend: volumes are registered in
//! world space, the agent position is sampled once per tick, and state
//! changes come out as begin/end events.

use crate::events::OverlapEvent;
use crate::volume::PlacedVolume;
use corridor_math::Vec3;
use std::collections::HashSet;
use std::hash::Hash;

/// Tracks which registered volumes currently contain the agent
#[derive(Debug, Clone)]
pub struct OverlapTracker<K> {
    /// Tag reported on every event
    agent_tag: String,
    /// Registered volumes, in registration order
    volumes: Vec<(K, PlacedVolume)>,
    /// Volumes the agent was inside at the last update
    inside: HashSet<K>,
}

impl<K: Clone + Eq + Hash> OverlapTracker<K> {
    /// Create a tracker for an agent carrying `agent_tag`
    pub fn new(agent_tag: impl Into<String>) -> Self {
        Self {
            agent_tag: agent_tag.into(),
            volumes: Vec::new(),
            inside: HashSet::new(),
        }
    }

    /// Register a volume. Re-registering a key replaces its volume.
    pub fn register(&mut self, key: K, volume: PlacedVolume) {
        if let Some(slot) = self.volumes.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = volume;
        } else {
            self.volumes.push((key, volume));
        }
    }

    /// Drop every volume and overlap state
    pub fn clear(&mut self) {
        self.volumes.clear();
        self.inside.clear();
    }

    /// Check if the agent was inside `key` at the last update
    pub fn is_inside(&self, key: &K) -> bool {
        self.inside.contains(key)
    }

    /// Number of registered volumes
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// Tag reported for the agent
    pub fn agent_tag(&self) -> &str {
        &self.agent_tag
    }

    /// Sample the agent position and report state changes in registration order.
    ///
    /// A volume yields exactly one begin per entry; staying inside yields
    /// nothing until the agent leaves and re-enters.
    pub fn update(&mut self, agent_position: Vec3) -> Vec<OverlapEvent<K>> {
        let mut events = Vec::new();

        for (key, volume) in &self.volumes {
            let is_overlapping = volume.contains(agent_position);
            let was_overlapping = self.inside.contains(key);

            if is_overlapping && !was_overlapping {
                self.inside.insert(key.clone());
                events.push(OverlapEvent::begin(key.clone(), self.agent_tag.as_str()));
            } else if !is_overlapping && was_overlapping {
                self.inside.remove(key);
                events.push(OverlapEvent::end(key.clone(), self.agent_tag.as_str()));
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::TriggerVolume;
    use corridor_math::SpatialFrame;

    fn unit_box_at(x: f32) -> PlacedVolume {
        PlacedVolume::in_section(
            TriggerVolume::box_shape(2.0, 2.0, 2.0),
            &SpatialFrame::IDENTITY,
            Vec3::new(x, 0.0, 0.0),
        )
    }

    #[test]
    fn test_single_begin_per_entry() {
        let mut tracker = OverlapTracker::new("Player");
        tracker.register("door", unit_box_at(0.0));

        let events = tracker.update(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(events, vec![OverlapEvent::begin("door", "Player")]);
        assert!(tracker.is_inside(&"door"));

        // Staying inside is silent
        assert!(tracker.update(Vec3::new(0.2, 0.0, 0.0)).is_empty());
        assert!(tracker.update(Vec3::new(-0.2, 0.0, 0.0)).is_empty());

        let events = tracker.update(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(events, vec![OverlapEvent::end("door", "Player")]);

        // Re-entry re-arms
        let events = tracker.update(Vec3::ZERO);
        assert!(events[0].is_begin());
    }

    #[test]
    fn test_registration_order() {
        let mut tracker = OverlapTracker::new("Player");
        tracker.register(2u32, unit_box_at(0.0));
        tracker.register(1u32, unit_box_at(0.5));

        let events = tracker.update(Vec3::new(0.25, 0.0, 0.0));
        let keys: Vec<u32> = events.iter().map(|e| e.volume).collect();
        assert_eq!(keys, vec![2, 1]);
    }

    #[test]
    fn test_clear_forgets_state() {
        let mut tracker = OverlapTracker::new("Player");
        tracker.register(7u32, unit_box_at(0.0));
        tracker.update(Vec3::ZERO);

        tracker.clear();
        assert_eq!(tracker.volume_count(), 0);
        assert!(!tracker.is_inside(&7));

        tracker.register(7u32, unit_box_at(0.0));
        assert_eq!(tracker.update(Vec3::ZERO).len(), 1);
    }
}
