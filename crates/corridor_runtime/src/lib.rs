//! Corridor Runtime - Headless Session
//!
//! Wires the streamer, the event dispatcher and an overlap tracker into one
//! tick-driven session, plus the configuration and glue the `corridor`
//! binary needs.
//!
//! # Features
//!
//! - Per-tick ordering: proximity, overlaps, volume events, exit transitions
//! - Headless scene builder producing world-space volumes
//! - Logging action sink standing in for animation, audio and dialog
//! - TOML configuration with environment overrides
//!
//! # Example
//!
//! ```ignore
//! use corridor_runtime::prelude::*;
//!
//! let mut session = Session::new(config.streaming.clone(), repository)?;
//! session.start()?;
//!
//! let mut sink = LogActionSink::new();
//! loop {
//!     let report = session.tick(&agent, &mut sink)?;
//!     for t in &report.transitions {
//!         log::info!("entered {}", t.section_id);
//!     }
//! }
//! ```

pub mod actions;
pub mod agent;
pub mod config;
pub mod error;
pub mod scene;
pub mod session;

pub mod prelude {
    pub use crate::actions::LogActionSink;
    pub use crate::agent::{AgentPositionProvider, WaypointAgent};
    pub use crate::config::{AgentConfig, RuntimeConfig, SectionsConfig, SessionConfig};
    pub use crate::error::RuntimeError;
    pub use crate::scene::{HeadlessScene, LiveScene};
    pub use crate::session::{Session, TickReport, VolumeKey};
}

pub use prelude::*;
