//! # corridor_math - Spatial Math for Section Streaming
//!
//! Small math primitives used to place sections in world space:
//! - [`Vec3`] for positions, sizes and offsets
//! - [`Quat`] for orientations (composition is non-commutative)
//! - [`SpatialFrame`] for accumulated origin + rotation placements

pub mod frame;
pub mod quaternion;
pub mod vector;

pub use frame::*;
pub use quaternion::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    /// Tolerance used by approximate frame comparisons
    pub const EPSILON: f32 = 1e-4;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

pub mod prelude {
    pub use crate::frame::{compose, SpatialFrame};
    pub use crate::quaternion::Quat;
    pub use crate::vector::Vec3;
    pub use crate::{degrees, radians};
}
