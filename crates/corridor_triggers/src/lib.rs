//! Corridor Triggers - Entity Events and Trigger Volumes
//!
//! This crate evaluates the scripted events attached to section entities
//! and provides the volume math a headless host needs to produce overlap
//! signals.
//!
//! # Features
//!
//! - Proximity events (level-triggered, fire every tick while in range)
//! - Volume-enter events (edge-triggered, agent tag only)
//! - Ordered, synchronous action execution through an [`ActionSink`]
//! - Box and sphere volumes placed under rotated frames
//! - Overlap tracking with exactly one begin per entry
//!
//! # Example
//!
//! ```ignore
//! use corridor_triggers::prelude::*;
//!
//! let mut dispatcher = EventDispatcher::new();
//! dispatcher.load(&frame, &section.entities);
//!
//! // Every tick
//! dispatcher.tick(agent_position, &mut |entity: &str, action: &ActionSpec| {
//!     println!("{} -> {:?}", entity, action);
//! });
//! ```

pub mod action;
pub mod dispatcher;
pub mod events;
pub mod filter;
pub mod tracker;
pub mod volume;

pub mod prelude {
    pub use crate::action::{ActionRecorder, ActionSink};
    pub use crate::dispatcher::{EventDispatcher, Firing};
    pub use crate::events::{OverlapEvent, OverlapEventType};
    pub use crate::filter::{TriggerFilter, DEFAULT_AGENT_TAG};
    pub use crate::tracker::OverlapTracker;
    pub use crate::volume::{PlacedVolume, TriggerVolume};
    pub use corridor_section::ActionSpec;
}

pub use prelude::*;
