//! Trigger volume shapes

use corridor_math::{SpatialFrame, Vec3};
use serde::{Deserialize, Serialize};

/// Trigger volume shapes, centered on their placement origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TriggerVolume {
    /// Box, axis-aligned in its own frame
    Box {
        /// Half-extents (width/2, height/2, depth/2)
        half_extents: [f32; 3],
    },
    /// Sphere
    Sphere {
        /// Radius
        radius: f32,
    },
}

impl TriggerVolume {
    /// Create a box trigger volume
    pub fn box_shape(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            half_extents: [width / 2.0, height / 2.0, depth / 2.0],
        }
    }

    /// Create a box from a (width, height, depth) size vector
    pub fn from_size(size: Vec3) -> Self {
        Self::box_shape(size.x.abs(), size.y.abs(), size.z.abs())
    }

    /// Create a sphere trigger volume
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Check if a point is inside this volume (volume at origin)
    pub fn contains_point(&self, point: [f32; 3]) -> bool {
        match self {
            Self::Box { half_extents } => {
                point[0].abs() <= half_extents[0]
                    && point[1].abs() <= half_extents[1]
                    && point[2].abs() <= half_extents[2]
            }
            Self::Sphere { radius } => {
                let dist_sq = point[0] * point[0] + point[1] * point[1] + point[2] * point[2];
                dist_sq <= radius * radius
            }
        }
    }

    /// Get the local axis-aligned bounding box (min, max)
    pub fn bounding_box(&self) -> ([f32; 3], [f32; 3]) {
        match self {
            Self::Box { half_extents } => (
                [-half_extents[0], -half_extents[1], -half_extents[2]],
                [half_extents[0], half_extents[1], half_extents[2]],
            ),
            Self::Sphere { radius } => ([-*radius, -*radius, -*radius], [*radius, *radius, *radius]),
        }
    }
}

impl Default for TriggerVolume {
    fn default() -> Self {
        Self::box_shape(1.0, 1.0, 1.0)
    }
}

/// A volume placed in world space under a frame (rotation included)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedVolume {
    pub volume: TriggerVolume,
    pub placement: SpatialFrame,
}

impl PlacedVolume {
    /// Place `volume` at `local_center` inside a section placed at `frame`
    pub fn in_section(volume: TriggerVolume, frame: &SpatialFrame, local_center: Vec3) -> Self {
        Self {
            volume,
            placement: frame.compose(&SpatialFrame::from_origin(local_center)),
        }
    }

    /// World-space center
    pub fn center(&self) -> Vec3 {
        self.placement.origin
    }

    /// Check if a world-space point is inside
    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.placement.inverse_transform_point(point);
        self.volume.contains_point(local.to_array())
    }
}
