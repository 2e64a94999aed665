use corridor_math::{SpatialFrame, Vec3};
use corridor_section::{EntitySpec, EventSpec, EventTrigger};
use corridor_triggers::prelude::*;

fn door() -> EntitySpec {
    EntitySpec::new("door", Vec3::new(0.0, 0.0, 5.0), Vec3::new(2.0, 3.0, 1.0)).with_event(
        EventSpec::on_volume_enter(vec![
            ActionSpec::play_animation("Open"),
            ActionSpec::play_sound("sfx/creak", 0.8),
        ]),
    )
}

#[test]
fn walking_through_a_door_fires_once() {
    let frame = SpatialFrame::IDENTITY;
    let entity = door();

    let mut dispatcher = EventDispatcher::new();
    dispatcher.load(&frame, std::slice::from_ref(&entity));

    let mut tracker = OverlapTracker::new(DEFAULT_AGENT_TAG);
    tracker.register(
        entity.id.clone(),
        PlacedVolume::in_section(TriggerVolume::from_size(entity.size), &frame, entity.position),
    );

    let mut sink = ActionRecorder::new();
    let mut firings = 0;
    for step in 0..=20 {
        let agent = Vec3::new(0.0, 0.0, step as f32 * 0.5);
        for event in tracker.update(agent) {
            if event.is_begin() {
                firings += dispatcher.on_volume_enter(&event.volume, &event.tag, &mut sink).len();
            }
        }
    }

    assert_eq!(firings, 1);
    assert_eq!(
        sink.executed,
        vec![
            ("door".to_string(), ActionSpec::play_animation("Open")),
            ("door".to_string(), ActionSpec::play_sound("sfx/creak", 0.8)),
        ]
    );
}

#[test]
fn non_agent_tracker_never_fires() {
    let frame = SpatialFrame::IDENTITY;
    let entity = door();

    let mut dispatcher = EventDispatcher::new();
    dispatcher.load(&frame, std::slice::from_ref(&entity));

    let mut tracker = OverlapTracker::new("Debris");
    tracker.register(
        entity.id.clone(),
        PlacedVolume::in_section(TriggerVolume::from_size(entity.size), &frame, entity.position),
    );

    let mut sink = ActionRecorder::new();
    for event in tracker.update(entity.position) {
        assert!(event.is_begin());
        assert!(dispatcher.on_volume_enter(&event.volume, &event.tag, &mut sink).is_empty());
    }
    assert!(sink.is_empty());
}

#[test]
fn proximity_fires_while_standing_still() {
    let lamp = EntitySpec::new("lamp", Vec3::ZERO, Vec3::ONE).with_event(EventSpec::on_proximity(
        2.0,
        vec![ActionSpec::show_dialog("It hums.", 1.5)],
    ));

    let mut dispatcher = EventDispatcher::new();
    dispatcher.load(&SpatialFrame::IDENTITY, &[lamp]);

    let mut sink = ActionRecorder::new();
    let agent = Vec3::new(1.5, 0.0, 0.0);
    for _ in 0..3 {
        let fired = dispatcher.tick(agent, &mut sink);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].trigger, EventTrigger::OnProximity { distance: 2.0 });
    }
    assert_eq!(sink.len(), 3);
}

#[test]
fn custom_agent_tag() {
    let mut dispatcher = EventDispatcher::with_filter(TriggerFilter::agent("Hero"));
    dispatcher.load(&SpatialFrame::IDENTITY, &[door()]);

    let mut sink = ActionRecorder::new();
    assert!(dispatcher.on_volume_enter("door", "Player", &mut sink).is_empty());
    assert_eq!(dispatcher.on_volume_enter("door", "Hero", &mut sink).len(), 1);
}
