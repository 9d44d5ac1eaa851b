use super::path::Path;
use super::pose::Pose;

/// A time-parameterized sequence of poses derived from a [`Path`].
///
/// Invariant: `times` and `poses` have equal length, and `times` is
/// non-decreasing. The producing [`TrajectoryGenerator`] is responsible for
/// upholding both.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Sample timestamps, in seconds from trajectory start.
    pub times: Vec<f64>,
    /// Sample poses, one per timestamp.
    pub poses: Vec<Pose>,
}

impl Trajectory {
    pub fn new(times: Vec<f64>, poses: Vec<Pose>) -> Self {
        Self { times, poses }
    }

    /// Number of (time, pose) samples.
    pub fn num_points(&self) -> usize {
        self.times.len()
    }
}

/// Converts waypoint paths into time-parameterized trajectories.
///
/// This is an external collaborator: the navigation core consumes
/// trajectories but never computes them itself. Both operations are
/// fallible and report failure by returning `None` (degenerate geometry,
/// bad sampling interval); they never panic.
pub trait TrajectoryGenerator: Send + Sync {
    /// Generate a trajectory for `path` honoring the velocity limits.
    fn generate(
        &self,
        path: &Path,
        linear_velocity: f64,
        max_angular_velocity: Option<f64>,
    ) -> Option<Trajectory>;

    /// Resample `trajectory` at the fixed interval `dt`.
    fn resample(&self, trajectory: &Trajectory, dt: f64) -> Option<Trajectory>;
}
