//! Spatial frames: accumulated world-space placement of a section

use crate::quaternion::Quat;
use crate::vector::Vec3;

/// Origin + rotation pair placing local section coordinates in world space.
///
/// Frames compose left-to-right in the order sections are visited:
/// `compose(F, D) = { F.origin + F.rotation * D.origin, F.rotation * D.rotation }`.
/// Composition is associative but not commutative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialFrame {
    pub origin: Vec3,
    pub rotation: Quat,
}

impl SpatialFrame {
    /// Identity frame (world origin, no rotation)
    pub const IDENTITY: Self = Self {
        origin: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[inline]
    pub const fn new(origin: Vec3, rotation: Quat) -> Self {
        Self { origin, rotation }
    }

    /// Create from an origin only
    #[inline]
    pub fn from_origin(origin: Vec3) -> Self {
        Self::new(origin, Quat::IDENTITY)
    }

    /// Create from an origin and authored Euler angles in degrees
    pub fn from_authored(origin: Vec3, euler_degrees: Vec3) -> Self {
        Self::new(
            origin,
            Quat::from_euler_degrees(euler_degrees.x, euler_degrees.y, euler_degrees.z),
        )
    }

    /// Apply a local delta on top of this frame (self first, then delta)
    pub fn compose(&self, delta: &SpatialFrame) -> Self {
        Self {
            origin: self.origin + self.rotation * delta.origin,
            rotation: self.rotation * delta.rotation,
        }
    }

    /// Map a point from frame-local to world coordinates
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.origin + self.rotation * point
    }

    /// Map a world point into frame-local coordinates
    #[inline]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.origin)
    }

    /// Frame that undoes this one: `f.compose(&f.inverse()) == IDENTITY`
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            origin: inv_rotation * (-self.origin),
            rotation: inv_rotation,
        }
    }

    /// Compare within a floating-point tolerance
    pub fn approx_eq(&self, other: &SpatialFrame, eps: f32) -> bool {
        self.origin.approx_eq(other.origin, eps) && self.rotation.approx_eq(other.rotation, eps)
    }
}

impl Default for SpatialFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl core::ops::Mul for SpatialFrame {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

/// Compose a base frame with a local delta
#[inline]
pub fn compose(base: SpatialFrame, delta: SpatialFrame) -> SpatialFrame {
    base.compose(&delta)
}
