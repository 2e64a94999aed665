//! Authored section format
//!
//! Sections are exported from the level editor as JSON with string-typed
//! trigger and action kinds. This module is the validation boundary: it maps
//! recognized kinds onto [`EventTrigger`] / [`ActionSpec`] and drops anything
//! it does not recognize, logging a warning for each dropped item.
//!
//! ```json
//! {
//!   "sectionId": "default",
//!   "entities": [{
//!     "id": "lamp",
//!     "position": { "x": 0, "y": 2, "z": 4 },
//!     "size": { "width": 1, "height": 1, "depth": 1 },
//!     "events": [{
//!       "trigger": "onDistance",
//!       "condition": { "distance": 2.0 },
//!       "actions": [{ "type": "playSound", "soundPath": "hum.wav", "volume": 0.8 }]
//!     }]
//!   }],
//!   "triggerBoxes": [{
//!     "position": { "x": 0, "y": 1, "z": 10 },
//!     "size": { "width": 4, "height": 2, "depth": 1 },
//!     "valid": true,
//!     "newOrigin": { "x": 0, "y": 0, "z": 20 },
//!     "newRotation": { "x": 0, "y": 90, "z": 0 }
//!   }]
//! }
//! ```

use crate::error::{RepositoryError, ValidationError};
use crate::spec::{
    ActionSpec, AnimationSpec, EntitySpec, EventSpec, EventTrigger, SectionSpec, TriggerSpec,
};
use corridor_math::{SpatialFrame, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const TRIGGER_PLAYER_ENTER: &str = "onPlayerEnter";
const TRIGGER_DISTANCE: &str = "onDistance";

const ACTION_PLAY_ANIMATION: &str = "playAnimation";
const ACTION_PLAY_SOUND: &str = "playSound";
const ACTION_SHOW_DIALOG: &str = "showDialog";

/// `{ x, y, z }` as written by the exporter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoredVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<AuthoredVec3> for Vec3 {
    fn from(v: AuthoredVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// `{ width, height, depth }` as written by the exporter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoredSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl From<AuthoredSize> for Vec3 {
    fn from(s: AuthoredSize) -> Self {
        Vec3::new(s.width, s.height, s.depth)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthoredAnimation {
    pub name: String,
    pub clip: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoredCondition {
    pub distance: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthoredAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub animation_name: String,
    pub sound_path: String,
    pub volume: f32,
    pub text: String,
    pub duration: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthoredEvent {
    pub trigger: String,
    pub condition: Option<AuthoredCondition>,
    pub actions: Vec<AuthoredAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthoredEntity {
    pub id: String,
    pub position: AuthoredVec3,
    pub size: AuthoredSize,
    #[serde(rename = "type")]
    pub kind: String,
    pub connections: Vec<String>,
    pub texture: String,
    pub mesh: String,
    pub animations: Vec<AuthoredAnimation>,
    pub events: Vec<AuthoredEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthoredTriggerBox {
    pub position: AuthoredVec3,
    pub size: AuthoredSize,
    pub valid: bool,
    pub new_origin: AuthoredVec3,
    /// Euler angles in degrees
    pub new_rotation: AuthoredVec3,
}

impl Default for AuthoredTriggerBox {
    fn default() -> Self {
        // The exporter treats script-less trigger boxes as valid passes
        Self {
            position: AuthoredVec3::default(),
            size: AuthoredSize::default(),
            valid: true,
            new_origin: AuthoredVec3::default(),
            new_rotation: AuthoredVec3::default(),
        }
    }
}

/// Root of an authored section file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthoredSection {
    pub section_id: String,
    pub entities: Vec<AuthoredEntity>,
    pub trigger_boxes: Vec<AuthoredTriggerBox>,
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl AuthoredAction {
    /// Convert to a typed action; `None` for unknown kinds or missing payloads
    pub fn into_action(self) -> Option<ActionSpec> {
        match self.kind.as_str() {
            ACTION_PLAY_ANIMATION => {
                non_empty(self.animation_name).map(|name| ActionSpec::PlayAnimation { name })
            }
            ACTION_PLAY_SOUND => non_empty(self.sound_path).map(|sound| ActionSpec::PlaySound {
                sound,
                volume: self.volume,
            }),
            ACTION_SHOW_DIALOG => non_empty(self.text).map(|text| ActionSpec::ShowDialog {
                text,
                duration: self.duration,
            }),
            _ => None,
        }
    }
}

impl AuthoredEvent {
    fn trigger(&self) -> Option<EventTrigger> {
        match self.trigger.as_str() {
            TRIGGER_PLAYER_ENTER => Some(EventTrigger::OnVolumeEnter),
            TRIGGER_DISTANCE => self.condition.map(|c| EventTrigger::OnProximity {
                distance: c.distance,
            }),
            _ => None,
        }
    }
}

impl AuthoredEntity {
    fn into_entity(self, section_id: &str) -> Result<EntitySpec, ValidationError> {
        let mut events = Vec::with_capacity(self.events.len());
        for event in self.events {
            let Some(trigger) = event.trigger() else {
                log::warn!(
                    "Section '{}': dropping event '{}' on entity '{}' (unknown trigger or missing condition)",
                    section_id,
                    event.trigger,
                    self.id
                );
                continue;
            };

            if let EventTrigger::OnProximity { distance } = trigger {
                if distance < 0.0 {
                    return Err(ValidationError::NegativeDistance {
                        entity: self.id.clone(),
                        distance,
                    });
                }
            }

            let mut actions = Vec::with_capacity(event.actions.len());
            for action in event.actions {
                let kind = action.kind.clone();
                match action.into_action() {
                    Some(action) => actions.push(action),
                    None => log::warn!(
                        "Section '{}': dropping action '{}' on entity '{}'",
                        section_id,
                        kind,
                        self.id
                    ),
                }
            }

            events.push(EventSpec { trigger, actions });
        }

        let animations = self
            .animations
            .into_iter()
            .map(|a| AnimationSpec {
                name: a.name,
                clip: non_empty(a.clip),
                looping: a.looping,
                speed: a.speed,
            })
            .collect();

        Ok(EntitySpec {
            id: self.id,
            position: self.position.into(),
            size: self.size.into(),
            kind: non_empty(self.kind),
            connections: self.connections,
            mesh: non_empty(self.mesh),
            texture: non_empty(self.texture),
            animations,
            events,
        })
    }
}

impl From<AuthoredTriggerBox> for TriggerSpec {
    fn from(t: AuthoredTriggerBox) -> Self {
        TriggerSpec {
            position: t.position.into(),
            size: t.size.into(),
            valid: t.valid,
            frame_delta: SpatialFrame::from_authored(t.new_origin.into(), t.new_rotation.into()),
        }
    }
}

impl AuthoredSection {
    /// Validate and convert into an immutable [`SectionSpec`]
    pub fn into_section(self) -> Result<SectionSpec, ValidationError> {
        let mut seen = HashSet::new();
        let mut entities = Vec::with_capacity(self.entities.len());

        for (index, entity) in self.entities.into_iter().enumerate() {
            if entity.id.is_empty() {
                return Err(ValidationError::EmptyEntityId(index));
            }
            if !seen.insert(entity.id.clone()) {
                return Err(ValidationError::DuplicateEntity(entity.id));
            }
            entities.push(entity.into_entity(&self.section_id)?);
        }

        Ok(SectionSpec {
            id: self.section_id,
            entities,
            triggers: self.trigger_boxes.into_iter().map(TriggerSpec::from).collect(),
        })
    }
}

/// Parse an authored JSON section stored under `id`.
///
/// The repository key is authoritative: the returned section carries `id`
/// even when the file's `sectionId` differs or is missing.
pub fn parse_section(id: &str, json: &str) -> Result<SectionSpec, RepositoryError> {
    let authored: AuthoredSection =
        serde_json::from_str(json).map_err(|source| RepositoryError::Parse {
            id: id.to_string(),
            source,
        })?;

    if !authored.section_id.is_empty() && authored.section_id != id {
        log::debug!(
            "Section file for '{}' declares sectionId '{}'",
            id,
            authored.section_id
        );
    }

    let mut section = authored
        .into_section()
        .map_err(|source| RepositoryError::Invalid {
            id: id.to_string(),
            source,
        })?;
    section.id = id.to_string();
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "sectionId": "default",
        "entities": [
            {
                "id": "lamp",
                "position": { "x": 1, "y": 2, "z": 3 },
                "size": { "width": 1, "height": 2, "depth": 0.5 },
                "type": "prop",
                "mesh": "Primitive:Cube",
                "animations": [{ "name": "flicker", "clip": "anims/flicker.anim", "loop": true, "speed": 1.5 }],
                "events": [
                    {
                        "trigger": "onDistance",
                        "condition": { "distance": 2.0 },
                        "actions": [
                            { "type": "playAnimation", "animationName": "flicker" },
                            { "type": "explode" },
                            { "type": "playSound", "soundPath": "hum.wav", "volume": 0.8 }
                        ]
                    },
                    { "trigger": "onPlayerEnter", "actions": [{ "type": "showDialog", "text": "Hello", "duration": 3 }] },
                    { "trigger": "onDistance", "actions": [] },
                    { "trigger": "onGaze", "actions": [] }
                ]
            }
        ],
        "triggerBoxes": [
            {
                "position": { "x": 0, "y": 1, "z": 10 },
                "size": { "width": 4, "height": 2, "depth": 1 },
                "valid": false,
                "newOrigin": { "x": 0, "y": 0, "z": 20 },
                "newRotation": { "x": 0, "y": 90, "z": 0 }
            },
            { "position": { "x": 0, "y": 1, "z": -10 } }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let section = parse_section("default", SAMPLE).unwrap();
        assert_eq!(section.id, "default");
        assert_eq!(section.entities.len(), 1);

        let lamp = &section.entities[0];
        assert_eq!(lamp.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(lamp.size, Vec3::new(1.0, 2.0, 0.5));
        assert_eq!(lamp.kind.as_deref(), Some("prop"));
        assert_eq!(lamp.mesh.as_deref(), Some("Primitive:Cube"));
        assert!(lamp.texture.is_none());
        assert_eq!(lamp.animations.len(), 1);
        assert!(lamp.animations[0].looping);

        // onDistance without condition and the unknown trigger are dropped
        assert_eq!(lamp.events.len(), 2);
        assert_eq!(lamp.events[0].trigger, EventTrigger::OnProximity { distance: 2.0 });
        assert_eq!(
            lamp.events[0].actions,
            vec![
                ActionSpec::play_animation("flicker"),
                ActionSpec::play_sound("hum.wav", 0.8),
            ]
        );
        assert_eq!(lamp.events[1].trigger, EventTrigger::OnVolumeEnter);
        assert_eq!(lamp.events[1].actions, vec![ActionSpec::show_dialog("Hello", 3.0)]);
    }

    #[test]
    fn test_trigger_boxes() {
        let section = parse_section("default", SAMPLE).unwrap();
        assert_eq!(section.triggers.len(), 2);

        let exit = &section.triggers[0];
        assert!(!exit.valid);
        assert!(exit.frame_delta.origin.approx_eq(Vec3::new(0.0, 0.0, 20.0), 1e-5));
        let turned = exit.frame_delta.rotation * Vec3::X;
        assert!(turned.approx_eq(Vec3::NEG_Z, 1e-5));

        // Missing fields default, including `valid = true`
        let fallback = &section.triggers[1];
        assert!(fallback.valid);
        assert_eq!(fallback.frame_delta, SpatialFrame::IDENTITY);
    }

    #[test]
    fn test_empty_payload_actions_are_dropped() {
        let action = AuthoredAction {
            kind: "playAnimation".into(),
            ..Default::default()
        };
        assert!(action.into_action().is_none());

        let action = AuthoredAction {
            kind: "showDialog".into(),
            text: String::new(),
            ..Default::default()
        };
        assert!(action.into_action().is_none());
    }

    #[test]
    fn test_duplicate_entity_ids_rejected() {
        let json = r#"{ "entities": [{ "id": "a" }, { "id": "a" }] }"#;
        let err = parse_section("dup", json).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Invalid { source: ValidationError::DuplicateEntity(ref id), .. } if id == "a"
        ));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let json = r#"{ "entities": [{ "id": "a", "events": [
            { "trigger": "onDistance", "condition": { "distance": -1 }, "actions": [] }
        ] }] }"#;
        let err = parse_section("neg", json).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Invalid { source: ValidationError::NegativeDistance { .. }, .. }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_section("broken", "{ not json").unwrap_err();
        assert!(matches!(err, RepositoryError::Parse { .. }));
        assert_eq!(err.section_id(), "broken");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_repository_key_wins() {
        let section = parse_section("anomaly/Section_1", r#"{ "sectionId": "Section_1" }"#).unwrap();
        assert_eq!(section.id, "anomaly/Section_1");
    }
}
