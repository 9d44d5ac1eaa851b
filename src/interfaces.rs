//! External collaborator interfaces.
//!
//! The navigation core drives a robot it does not own and asks questions of
//! a world it cannot see into. Both collaborators are reached through the
//! traits below; the simulator supplies the implementations.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::execution::ExecutionResult;
use crate::utils::{Path, Pose};

/// A robot as seen by the path executor.
///
/// The executor writes poses and battery levels through this trait and reads
/// the live pose back from the concurrent validation task. Log output goes
/// through the `log` facade rather than a per-robot sink.
pub trait RobotProxy: Send {
    /// The robot's current pose.
    fn pose(&self) -> Pose;

    /// Teleport the robot to `pose`.
    fn set_pose(&mut self, pose: Pose);

    /// Remaining battery charge.
    fn battery_level(&self) -> f64;

    /// Overwrite the battery charge.
    fn set_battery_level(&mut self, level: f64);

    /// Move any currently manipulated object along with the robot.
    ///
    /// Robots not holding an object ignore this.
    fn set_manipulated_object_pose(&mut self, _pose: Pose) {}

    /// Record the result of the most recent navigation command.
    fn set_last_nav_result(&mut self, _result: ExecutionResult) {}
}

/// A robot proxy shared between the stepper and the validation task.
pub type SharedRobot = Arc<Mutex<dyn RobotProxy>>;

/// Collision oracle over the world geometry.
///
/// The world representation itself is out of scope here; the executor only
/// ever asks whether a candidate path is collision-free.
pub trait CollisionChecker: Send + Sync {
    /// True when `path`, discretized at `step_dist`, touches no obstacle.
    fn is_path_collision_free(&self, path: &Path, step_dist: f64) -> bool;
}
