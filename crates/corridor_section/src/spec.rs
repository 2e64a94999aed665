//! Section value types
//!
//! Everything here is plain data in section-local coordinates. Placement in
//! world space happens when a section is instantiated under a [`SpatialFrame`].

use corridor_math::{SpatialFrame, Vec3};

/// What makes an entity event fire
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventTrigger {
    /// Fires once per overlap-begin of the agent with the entity volume
    OnVolumeEnter,
    /// Fires every tick while the agent is within `distance` of the entity
    OnProximity {
        /// Inclusive distance threshold in world units
        distance: f32,
    },
}

impl EventTrigger {
    /// Check if this is a proximity trigger
    pub fn is_proximity(&self) -> bool {
        matches!(self, Self::OnProximity { .. })
    }
}

/// A scripted action run when an event fires
#[derive(Debug, Clone, PartialEq)]
pub enum ActionSpec {
    /// Play a named animation on the entity
    PlayAnimation { name: String },
    /// Play a sound once
    PlaySound {
        /// Opaque sound reference resolved by the asset loader
        sound: String,
        volume: f32,
    },
    /// Show a line of dialog
    ShowDialog {
        text: String,
        /// Seconds the dialog stays visible
        duration: f32,
    },
}

impl ActionSpec {
    /// Create a play-animation action
    pub fn play_animation(name: impl Into<String>) -> Self {
        Self::PlayAnimation { name: name.into() }
    }

    /// Create a play-sound action
    pub fn play_sound(sound: impl Into<String>, volume: f32) -> Self {
        Self::PlaySound {
            sound: sound.into(),
            volume,
        }
    }

    /// Create a show-dialog action
    pub fn show_dialog(text: impl Into<String>, duration: f32) -> Self {
        Self::ShowDialog {
            text: text.into(),
            duration,
        }
    }

    /// Short name of the action kind, for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::PlayAnimation { .. } => "playAnimation",
            Self::PlaySound { .. } => "playSound",
            Self::ShowDialog { .. } => "showDialog",
        }
    }
}

/// An event on an entity: a trigger and the actions it runs, in order
#[derive(Debug, Clone, PartialEq)]
pub struct EventSpec {
    pub trigger: EventTrigger,
    pub actions: Vec<ActionSpec>,
}

impl EventSpec {
    /// Event fired when the agent enters the entity volume
    pub fn on_volume_enter(actions: Vec<ActionSpec>) -> Self {
        Self {
            trigger: EventTrigger::OnVolumeEnter,
            actions,
        }
    }

    /// Event fired while the agent is within `distance`
    pub fn on_proximity(distance: f32, actions: Vec<ActionSpec>) -> Self {
        Self {
            trigger: EventTrigger::OnProximity { distance },
            actions,
        }
    }
}

/// Animation clip table entry carried for the scene builder
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub name: String,
    pub clip: Option<String>,
    pub looping: bool,
    pub speed: f32,
}

/// A placed object within a section
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    /// Unique within the owning section
    pub id: String,
    /// Section-local center
    pub position: Vec3,
    /// Bounding box size (width, height, depth)
    pub size: Vec3,
    /// Authoring category (e.g. "corridor"), opaque to the core
    pub kind: Option<String>,
    /// Authoring connections, opaque to the core
    pub connections: Vec<String>,
    pub mesh: Option<String>,
    pub texture: Option<String>,
    pub animations: Vec<AnimationSpec>,
    pub events: Vec<EventSpec>,
}

impl EntitySpec {
    /// Create an entity with no assets or events
    pub fn new(id: impl Into<String>, position: Vec3, size: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            size,
            kind: None,
            connections: Vec::new(),
            mesh: None,
            texture: None,
            animations: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Set mesh reference
    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    /// Set texture reference
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Add an event
    pub fn with_event(mut self, event: EventSpec) -> Self {
        self.events.push(event);
        self
    }

    /// Whether any event on this entity is proximity-driven
    pub fn has_proximity_events(&self) -> bool {
        self.events.iter().any(|e| e.trigger.is_proximity())
    }

    /// Whether any event on this entity fires on volume enter
    pub fn has_volume_events(&self) -> bool {
        self.events.iter().any(|e| !e.trigger.is_proximity())
    }
}

/// An exit trigger volume leading to the next section
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSpec {
    /// Section-local center
    pub position: Vec3,
    /// Box size (width, height, depth)
    pub size: Vec3,
    /// Valid passes advance the pass counter; invalid ones reset it
    pub valid: bool,
    /// Placement of the next section relative to the current frame
    pub frame_delta: SpatialFrame,
}

impl TriggerSpec {
    /// Create an exit trigger
    pub fn new(position: Vec3, size: Vec3, valid: bool, frame_delta: SpatialFrame) -> Self {
        Self {
            position,
            size,
            valid,
            frame_delta,
        }
    }
}

/// A complete section: entities and exit triggers in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub id: String,
    pub entities: Vec<EntitySpec>,
    pub triggers: Vec<TriggerSpec>,
}

impl SectionSpec {
    /// Create an empty section
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entities: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Add an entity
    pub fn with_entity(mut self, entity: EntitySpec) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add an exit trigger
    pub fn with_trigger(mut self, trigger: TriggerSpec) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Look up an entity by id
    pub fn entity(&self, id: &str) -> Option<&EntitySpec> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up an exit trigger by index
    pub fn trigger(&self, index: usize) -> Option<&TriggerSpec> {
        self.triggers.get(index)
    }
}
