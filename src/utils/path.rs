use serde::{Deserialize, Serialize};

use super::pose::Pose;

/// An ordered, immutable sequence of waypoint poses.
///
/// An empty path is the "no path found" value returned by graph queries; it
/// is a normal outcome, not an error. A single-pose path is constructible
/// but rejected by the executor as degenerate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    poses: Vec<Pose>,
}

impl Path {
    /// Create a path from a pose sequence.
    pub fn new(poses: Vec<Pose>) -> Self {
        Self { poses }
    }

    /// Number of poses in the path.
    pub fn num_poses(&self) -> usize {
        self.poses.len()
    }

    /// True when the path contains no poses ("no path found").
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// The pose sequence, in traversal order.
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Total Euclidean length along the waypoints.
    pub fn total_length(&self) -> f64 {
        self.poses
            .windows(2)
            .map(|pair| pair[0].linear_distance(&pair[1]))
            .sum()
    }
}
