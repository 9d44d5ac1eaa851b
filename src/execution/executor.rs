use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{info, warn};
use parking_lot::Mutex;

use super::config::ExecutorConfig;
use super::result::{ExecutionResult, ExecutionStatus};
use crate::interfaces::{CollisionChecker, RobotProxy, SharedRobot};
use crate::utils::{Path, Trajectory, TrajectoryGenerator};

/// Settle time after the stepping loop so a still-running validation task
/// observes the end-of-path state before `execute` returns.
const END_OF_PATH_SETTLE: Duration = Duration::from_millis(100);

/// State shared between the stepping loop, the validation task, and any
/// outstanding [`CancelHandle`]s.
///
/// Concurrency contract: the validator only ever *sets* the abort flag and
/// only the stepper clears it (at reset). The trajectory time is written
/// only by the stepper and read only by the validator.
#[derive(Debug, Default)]
struct SharedState {
    following_path: AtomicBool,
    abort_execution: AtomicBool,
    cancel_execution: AtomicBool,
    /// Current trajectory time as `f64` bits.
    current_traj_time: AtomicU64,
}

impl SharedState {
    fn reset(&self) {
        self.following_path.store(false, Ordering::Relaxed);
        self.abort_execution.store(false, Ordering::Relaxed);
        self.cancel_execution.store(false, Ordering::Relaxed);
        self.set_traj_time(0.0);
    }

    fn set_traj_time(&self, time: f64) {
        self.current_traj_time
            .store(time.to_bits(), Ordering::Relaxed);
    }

    fn traj_time(&self) -> f64 {
        f64::from_bits(self.current_traj_time.load(Ordering::Relaxed))
    }
}

/// Cooperative user-cancellation handle for a running `execute` call.
///
/// Cancellation takes effect at the next sample boundary, not immediately,
/// and the flag is self-clearing: once observed, the executor resets it and
/// finishes with [`ExecutionStatus::Canceled`].
#[derive(Clone)]
pub struct CancelHandle {
    shared: Arc<SharedState>,
}

impl CancelHandle {
    /// Request cancellation of the current execution.
    pub fn cancel(&self) {
        self.shared.cancel_execution.store(true, Ordering::Relaxed);
    }

    /// True while a cancellation request has not yet been observed.
    pub fn is_pending(&self) -> bool {
        self.shared.cancel_execution.load(Ordering::Relaxed)
    }
}

/// Drives a robot proxy along a path at constant linear velocity.
///
/// The path is converted to a time-parameterized trajectory by the attached
/// [`TrajectoryGenerator`], resampled at a fixed interval, and stepped in
/// (scaled) real time. While stepping, an optional concurrent validation
/// task re-checks the remaining path against the world and aborts execution
/// when a new collision appears.
///
/// All recoverable failures are reported through the returned
/// [`ExecutionResult`]; this type never panics on partial setup.
pub struct ConstantVelocityExecutor {
    config: ExecutorConfig,
    generator: Arc<dyn TrajectoryGenerator>,
    robot: Option<SharedRobot>,
    world: Option<Arc<dyn CollisionChecker>>,
    shared: Arc<SharedState>,
}

impl ConstantVelocityExecutor {
    /// Create an executor with the given configuration and trajectory
    /// generator. Robot and world collaborators are attached separately.
    pub fn new(config: ExecutorConfig, generator: Arc<dyn TrajectoryGenerator>) -> Self {
        Self {
            config,
            generator,
            robot: None,
            world: None,
            shared: Arc::new(SharedState::default()),
        }
    }

    /// Attach the robot this executor drives.
    pub fn set_robot(&mut self, robot: SharedRobot) {
        self.robot = Some(robot);
    }

    /// Attach the collision-checking world used by concurrent validation.
    pub fn set_world(&mut self, world: Arc<dyn CollisionChecker>) {
        self.world = Some(world);
    }

    /// The executor's configuration.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// A thread-safe handle for canceling the current execution.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// True while the stepping loop is advancing along a trajectory.
    pub fn is_following_path(&self) -> bool {
        self.shared.following_path.load(Ordering::Relaxed)
    }

    /// Generate a trajectory for `path` and execute it on the robot.
    ///
    /// `realtime_factor` scales execution speed relative to real time;
    /// `battery_usage` is the battery drain per unit distance traveled.
    /// Returns when the trajectory completes, is canceled, is aborted by the
    /// validation task, or the battery depletes. The result is also stored
    /// on the robot via [`RobotProxy::set_last_nav_result`].
    pub fn execute(
        &mut self,
        path: &Path,
        realtime_factor: f64,
        battery_usage: f64,
    ) -> ExecutionResult {
        let robot = match &self.robot {
            Some(robot) => Arc::clone(robot),
            None => {
                let message = "No robot attached to execute the trajectory.";
                warn!("{message}");
                return ExecutionResult::new(ExecutionStatus::PreconditionFailure, message);
            }
        };
        if path.num_poses() < 2 {
            let message = "Not enough waypoints in path to execute.";
            warn!("{message}");
            return ExecutionResult::new(ExecutionStatus::PreconditionFailure, message);
        }

        // Convert the path to an interpolated trajectory.
        let traj = match self.generator.generate(
            path,
            self.config.linear_velocity,
            self.config.max_angular_velocity,
        ) {
            Some(traj) => Arc::new(traj),
            None => {
                let message = "Failed to get trajectory from path.";
                warn!("{message}");
                return ExecutionResult::new(ExecutionStatus::PreconditionFailure, message);
            }
        };
        let interp = match self.generator.resample(&traj, self.config.dt) {
            Some(interp) if interp.num_points() > 0 && interp.poses.len() == interp.times.len() => {
                interp
            }
            _ => {
                let message = "Failed to interpolate trajectory.";
                warn!("{message}");
                return ExecutionResult::new(ExecutionStatus::PreconditionFailure, message);
            }
        };

        self.shared.reset();
        self.shared.following_path.store(true, Ordering::Relaxed);

        // Optionally kick off the concurrent path validation task.
        let mut validation_handle: Option<JoinHandle<()>> = None;
        if self.config.validate_during_execution {
            if let Some(world) = &self.world {
                let shared = Arc::clone(&self.shared);
                let robot = Arc::clone(&robot);
                let world = Arc::clone(world);
                let traj = Arc::clone(&traj);
                let validation_dt = self.config.validation_dt;
                let step_dist = self.config.validation_step_dist;
                validation_handle = Some(thread::spawn(move || {
                    validate_remaining_path(
                        &shared,
                        &robot,
                        world.as_ref(),
                        &traj,
                        validation_dt,
                        step_dist,
                    );
                }));
            }
        }

        // Execute the trajectory.
        let mut status = ExecutionStatus::Success;
        let mut message = String::new();
        let step_period =
            Duration::try_from_secs_f64(self.config.dt / realtime_factor).unwrap_or(Duration::ZERO);
        let mut prev_pose = interp.poses[0];

        for i in 0..interp.num_points() {
            let iter_start = Instant::now();
            let cur_pose = interp.poses[i];
            self.shared.set_traj_time(interp.times[i]);
            {
                let mut robot = robot.lock();
                robot.set_pose(cur_pose);
                robot.set_manipulated_object_pose(cur_pose);
            }

            if self.shared.abort_execution.load(Ordering::Relaxed) {
                // Join the validator before finalizing so a late write
                // cannot race the result.
                if let Some(handle) = validation_handle.take() {
                    let _ = handle.join();
                }
                message = "Trajectory execution aborted.".to_string();
                info!("{message}");
                status = ExecutionStatus::ExecutionFailure;
                break;
            }
            if self.shared.cancel_execution.swap(false, Ordering::Relaxed) {
                message = "Trajectory execution canceled by user.".to_string();
                info!("{message}");
                status = ExecutionStatus::Canceled;
                break;
            }

            // Simulate battery usage and exit if the battery is fully depleted.
            let depleted = {
                let mut robot = robot.lock();
                let level =
                    robot.battery_level() - battery_usage * cur_pose.linear_distance(&prev_pose);
                if level <= 0.0 {
                    robot.set_battery_level(0.0);
                    true
                } else {
                    robot.set_battery_level(level);
                    false
                }
            };
            if depleted {
                message = "Battery depleted while navigating.".to_string();
                warn!("{message}");
                status = ExecutionStatus::ExecutionFailure;
                break;
            }

            prev_pose = cur_pose;
            if let Some(remaining) = step_period.checked_sub(iter_start.elapsed()) {
                thread::sleep(remaining);
            }
        }

        // Finalize path execution.
        self.shared.reset();
        thread::sleep(END_OF_PATH_SETTLE);
        if let Some(handle) = validation_handle.take() {
            let _ = handle.join();
        }

        let result = ExecutionResult::new(status, message);
        robot.lock().set_last_nav_result(result.clone());
        result
    }
}

/// Validates the remaining path against the world at a fixed polling rate.
///
/// Runs on its own thread for the duration of one `execute` call. On a
/// detected collision it sets the abort flag (never clears it) and stops;
/// the stepping loop observes the flag at its next sample boundary.
fn validate_remaining_path(
    shared: &SharedState,
    robot: &Mutex<dyn RobotProxy>,
    world: &dyn CollisionChecker,
    traj: &Trajectory,
    validation_dt: f64,
    step_dist: f64,
) {
    let poll_period = Duration::try_from_secs_f64(validation_dt).unwrap_or(Duration::ZERO);

    while shared.following_path.load(Ordering::Relaxed)
        && !shared.abort_execution.load(Ordering::Relaxed)
    {
        let iter_start = Instant::now();
        let cur_pose = robot.lock().pose();
        let cur_time = shared.traj_time();

        // Waypoint index where the remaining path starts.
        let idx = traj
            .times
            .iter()
            .position(|&t| t >= cur_time)
            .unwrap_or(traj.num_points().saturating_sub(1));
        if idx + 1 >= traj.num_points() {
            return; // Path effectively finished; normal completion.
        }

        // Collision check the remaining path from the robot's actual pose.
        let mut poses = Vec::with_capacity(traj.num_points() - idx + 1);
        poses.push(cur_pose);
        poses.extend_from_slice(&traj.poses[idx..]);
        if poses.len() > 2 {
            let remaining = Path::new(poses);
            if !world.is_path_collision_free(&remaining, step_dist) {
                warn!("Remaining path is in collision. Aborting execution.");
                shared.abort_execution.store(true, Ordering::Relaxed);
                return;
            }
        }

        if let Some(remaining) = poll_period.checked_sub(iter_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
