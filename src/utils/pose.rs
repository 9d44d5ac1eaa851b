use serde::{Deserialize, Serialize};

/// A robot pose: position in 3D space plus a yaw heading.
///
/// `Pose` is a plain value type. Equality is exact-field comparison, so two
/// poses are equal only when every coordinate matches bit-for-bit. Use
/// [`Pose::linear_distance`] for proximity queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Heading about the z axis, in radians.
    #[serde(default)]
    pub yaw: f64,
}

impl Pose {
    /// Create a planar pose at `(x, y)` with zero height and heading.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            yaw: 0.0,
        }
    }

    /// Create a planar pose with an explicit heading.
    pub fn new_with_yaw(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, z: 0.0, yaw }
    }

    /// Create a full 3D pose.
    pub fn new_3d(x: f64, y: f64, z: f64, yaw: f64) -> Self {
        Self { x, y, z, yaw }
    }

    /// Euclidean distance to another pose. Heading is ignored.
    pub fn linear_distance(&self, other: &Pose) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
