//! Geometry value types shared across the navigation core.
//!
//! - [`Pose`]: a position plus heading, compared field-exact
//! - [`Path`]: an ordered, immutable sequence of waypoint poses
//! - [`Trajectory`]: a time-parameterized pose sequence produced by an
//!   external trajectory generator

mod path;
mod pose;
mod trajectory;

pub use path::Path;
pub use pose::Pose;
pub use trajectory::{Trajectory, TrajectoryGenerator};
