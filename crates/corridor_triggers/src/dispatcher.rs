//! Entity event dispatch
//!
//! Holds the events of every live entity and decides when they fire:
//! - `OnProximity` is level-triggered: evaluated every tick and fires on
//!   every tick the agent is within the threshold (inclusive)
//! - `OnVolumeEnter` is edge-triggered: fires once per overlap-begin signal
//!   whose tag passes the agent filter
//!
//! A firing event runs all of its actions, in order, before anything else
//! is evaluated.

use crate::action::ActionSink;
use crate::filter::TriggerFilter;
use corridor_math::{SpatialFrame, Vec3};
use corridor_section::{EntitySpec, EventSpec, EventTrigger};
use std::collections::HashMap;

/// Record of an event that fired
#[derive(Debug, Clone, PartialEq)]
pub struct Firing {
    pub entity_id: String,
    /// Index of the event within the entity's event list
    pub event_index: usize,
    pub trigger: EventTrigger,
    /// Number of actions executed
    pub actions: usize,
}

/// A live entity as seen by the dispatcher
#[derive(Debug, Clone)]
struct LiveEntity {
    id: String,
    world_position: Vec3,
    events: Vec<EventSpec>,
}

/// Evaluates entity events for the live section
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    /// Which tags count as the agent for volume-enter events
    filter: TriggerFilter,
    /// Live entities in section order
    entities: Vec<LiveEntity>,
    /// Entity id -> index into `entities`
    index: HashMap<String, usize>,
}

impl EventDispatcher {
    /// Create a dispatcher that accepts the default agent tag
    pub fn new() -> Self {
        Self::with_filter(TriggerFilter::default())
    }

    /// Create a dispatcher with a custom agent filter
    pub fn with_filter(filter: TriggerFilter) -> Self {
        Self {
            filter,
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Agent filter
    pub fn filter(&self) -> &TriggerFilter {
        &self.filter
    }

    /// Replace the live entity set with `entities` placed under `frame`
    pub fn load(&mut self, frame: &SpatialFrame, entities: &[EntitySpec]) {
        self.clear();
        for entity in entities {
            if entity.events.is_empty() {
                continue;
            }
            self.index.insert(entity.id.clone(), self.entities.len());
            self.entities.push(LiveEntity {
                id: entity.id.clone(),
                world_position: frame.transform_point(entity.position),
                events: entity.events.clone(),
            });
        }
        log::debug!("Event dispatcher tracking {} entities", self.entities.len());
    }

    /// Drop every live entity
    pub fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
    }

    /// Number of live entities with events
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// World position of a live entity
    pub fn world_position(&self, entity_id: &str) -> Option<Vec3> {
        self.index
            .get(entity_id)
            .map(|&i| self.entities[i].world_position)
    }

    /// Evaluate proximity events against the agent position.
    ///
    /// There is no debounce: an agent standing within range fires the
    /// event again on every call.
    pub fn tick(&self, agent_position: Vec3, sink: &mut dyn ActionSink) -> Vec<Firing> {
        let mut fired = Vec::new();

        for entity in &self.entities {
            let distance = entity.world_position.distance(agent_position);
            for (event_index, event) in entity.events.iter().enumerate() {
                if let EventTrigger::OnProximity { distance: threshold } = event.trigger {
                    if distance <= threshold {
                        fired.push(Self::fire(entity, event_index, event, sink));
                    }
                }
            }
        }

        fired
    }

    /// Handle an overlap-begin signal on `entity_id` from an object tagged `other_tag`.
    ///
    /// Tags that fail the agent filter and unknown entity ids are ignored.
    pub fn on_volume_enter(
        &self,
        entity_id: &str,
        other_tag: &str,
        sink: &mut dyn ActionSink,
    ) -> Vec<Firing> {
        if !self.filter.passes(other_tag) {
            log::trace!("Ignoring volume enter on '{}' by tag '{}'", entity_id, other_tag);
            return Vec::new();
        }

        let Some(&i) = self.index.get(entity_id) else {
            log::trace!("Ignoring volume enter on unknown entity '{}'", entity_id);
            return Vec::new();
        };

        let entity = &self.entities[i];
        entity
            .events
            .iter()
            .enumerate()
            .filter(|(_, event)| event.trigger == EventTrigger::OnVolumeEnter)
            .map(|(event_index, event)| Self::fire(entity, event_index, event, sink))
            .collect()
    }

    fn fire(
        entity: &LiveEntity,
        event_index: usize,
        event: &EventSpec,
        sink: &mut dyn ActionSink,
    ) -> Firing {
        for action in &event.actions {
            sink.execute(&entity.id, action);
        }
        log::debug!(
            "Entity '{}' event #{} fired ({} actions)",
            entity.id,
            event_index,
            event.actions.len()
        );
        Firing {
            entity_id: entity.id.clone(),
            event_index,
            trigger: event.trigger,
            actions: event.actions.len(),
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionRecorder;
    use corridor_math::Quat;
    use corridor_section::ActionSpec;
    use core::f32::consts::FRAC_PI_2;

    fn lamp(distance: f32) -> EntitySpec {
        EntitySpec::new("lamp", Vec3::ZERO, Vec3::ONE).with_event(EventSpec::on_proximity(
            distance,
            vec![ActionSpec::play_animation("flicker"), ActionSpec::play_sound("hum", 0.5)],
        ))
    }

    #[test]
    fn test_proximity_repeats_every_tick() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.load(&SpatialFrame::IDENTITY, &[lamp(2.0)]);

        let mut sink = ActionRecorder::new();
        for _ in 0..3 {
            let fired = dispatcher.tick(Vec3::new(1.5, 0.0, 0.0), &mut sink);
            assert_eq!(fired.len(), 1);
        }
        assert_eq!(sink.len(), 6);
        assert_eq!(sink.executed[0].1, ActionSpec::play_animation("flicker"));
        assert_eq!(sink.executed[1].1, ActionSpec::play_sound("hum", 0.5));
    }

    #[test]
    fn test_proximity_threshold_is_inclusive() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.load(&SpatialFrame::IDENTITY, &[lamp(2.0)]);

        let mut sink = ActionRecorder::new();
        assert_eq!(dispatcher.tick(Vec3::new(2.0, 0.0, 0.0), &mut sink).len(), 1);
        assert!(dispatcher.tick(Vec3::new(2.01, 0.0, 0.0), &mut sink).is_empty());
    }

    #[test]
    fn test_proximity_uses_world_position() {
        let entity = EntitySpec::new("sign", Vec3::new(4.0, 0.0, 0.0), Vec3::ONE)
            .with_event(EventSpec::on_proximity(1.0, vec![ActionSpec::show_dialog("Turn back", 2.0)]));
        let frame = SpatialFrame::new(Vec3::new(0.0, 0.0, 10.0), Quat::from_rotation_y(FRAC_PI_2));

        let mut dispatcher = EventDispatcher::new();
        dispatcher.load(&frame, &[entity]);

        let world = dispatcher.world_position("sign").unwrap();
        assert!(world.approx_eq(Vec3::new(0.0, 0.0, 6.0), 1e-5));

        let mut sink = ActionRecorder::new();
        assert!(dispatcher.tick(Vec3::new(4.0, 0.0, 0.0), &mut sink).is_empty());
        assert_eq!(dispatcher.tick(Vec3::new(0.0, 0.0, 6.5), &mut sink).len(), 1);
    }

    #[test]
    fn test_volume_enter_requires_agent_tag() {
        let door = EntitySpec::new("door", Vec3::ZERO, Vec3::ONE)
            .with_event(EventSpec::on_volume_enter(vec![ActionSpec::play_animation("open")]));

        let mut dispatcher = EventDispatcher::new();
        dispatcher.load(&SpatialFrame::IDENTITY, &[door]);

        let mut sink = ActionRecorder::new();
        assert!(dispatcher.on_volume_enter("door", "Debris", &mut sink).is_empty());
        assert!(sink.is_empty());

        let fired = dispatcher.on_volume_enter("door", "Player", &mut sink);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].trigger, EventTrigger::OnVolumeEnter);
        assert_eq!(sink.executed, vec![("door".to_string(), ActionSpec::play_animation("open"))]);
    }

    #[test]
    fn test_volume_enter_ignores_proximity_events_and_unknown_entities() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.load(&SpatialFrame::IDENTITY, &[lamp(100.0)]);

        let mut sink = ActionRecorder::new();
        assert!(dispatcher.on_volume_enter("lamp", "Player", &mut sink).is_empty());
        assert!(dispatcher.on_volume_enter("ghost", "Player", &mut sink).is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_events_run_in_authored_order() {
        let entity = EntitySpec::new("altar", Vec3::ZERO, Vec3::ONE)
            .with_event(EventSpec::on_volume_enter(vec![ActionSpec::show_dialog("first", 1.0)]))
            .with_event(EventSpec::on_proximity(5.0, vec![ActionSpec::show_dialog("near", 1.0)]))
            .with_event(EventSpec::on_volume_enter(vec![
                ActionSpec::show_dialog("second", 1.0),
                ActionSpec::show_dialog("third", 1.0),
            ]));

        let mut dispatcher = EventDispatcher::new();
        dispatcher.load(&SpatialFrame::IDENTITY, &[entity]);

        let mut order = Vec::new();
        let mut sink = |_: &str, action: &ActionSpec| {
            if let ActionSpec::ShowDialog { text, .. } = action {
                order.push(text.clone());
            }
        };
        let fired = dispatcher.on_volume_enter("altar", "Player", &mut sink);

        assert_eq!(fired.iter().map(|f| f.event_index).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_reload_replaces_entities() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.load(&SpatialFrame::IDENTITY, &[lamp(2.0)]);
        assert_eq!(dispatcher.entity_count(), 1);

        dispatcher.load(&SpatialFrame::IDENTITY, &[EntitySpec::new("wall", Vec3::ZERO, Vec3::ONE)]);
        assert_eq!(dispatcher.entity_count(), 0);
        assert!(dispatcher.world_position("lamp").is_none());
    }
}
