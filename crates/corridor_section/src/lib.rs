//! Corridor Section - Section Data Model
//!
//! Immutable descriptions of streamable sections and the repositories
//! that resolve section ids into them.
//!
//! # Features
//!
//! - Plain value types for entities, events, actions and exit triggers
//! - Closed sum types for event triggers and actions
//! - Authored JSON format with a validation boundary that drops
//!   unrecognized data instead of failing the whole section
//! - In-memory and JSON directory repositories
//!
//! # Example
//!
//! ```ignore
//! use corridor_section::prelude::*;
//!
//! let repo = JsonDirRepository::new("assets/sections");
//! let section = repo.fetch("default")?;
//! for entity in &section.entities {
//!     println!("{} at {:?}", entity.id, entity.position);
//! }
//! ```

pub mod authored;
pub mod error;
pub mod repository;
pub mod spec;

pub mod prelude {
    pub use crate::authored::{parse_section, AuthoredSection};
    pub use crate::error::{RepositoryError, ValidationError};
    pub use crate::repository::{JsonDirRepository, MemoryRepository, SectionRepository};
    pub use crate::spec::{
        ActionSpec, AnimationSpec, EntitySpec, EventSpec, EventTrigger, SectionSpec, TriggerSpec,
    };
}

pub use prelude::*;
