//! Corridor Streaming - Section Streaming Engine
//!
//! Streams one section at a time along an accumulating world frame.
//!
//! # Features
//!
//! - Load-then-swap transitions (a failed fetch never tears down the live section)
//! - Seeded anomaly selection
//! - Pass counter bookkeeping across valid and invalid exits
//! - Scene instantiation through a [`SceneBuilder`] seam
//!
//! # Example
//!
//! ```ignore
//! use corridor_streaming::prelude::*;
//!
//! let mut streamer = SectionStreamer::new(config, repository, builder)?;
//! streamer.start()?;
//!
//! // From the collision source
//! match streamer.on_exit_trigger_enter(trigger_id, "Player") {
//!     Ok(Some(transition)) => println!("now in {}", transition.section_id),
//!     Ok(None) => {}
//!     Err(e) => log::warn!("{}", e),
//! }
//! ```

pub mod config;
pub mod error;
pub mod scene;
pub mod selector;
pub mod state;
pub mod streamer;

pub mod prelude {
    pub use crate::config::StreamingConfig;
    pub use crate::error::{ConfigError, Result, SelectError, StreamError};
    pub use crate::scene::{SceneBuilder, SceneHandle, TriggerId};
    pub use crate::selector::{AnomalySelector, SectionChoice};
    pub use crate::state::{StreamerPhase, StreamingState};
    pub use crate::streamer::{SectionStreamer, Transition};
}

pub use prelude::*;
