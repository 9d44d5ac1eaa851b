//! End-to-end navigation: plan a path on the search graph, then execute it
//! on a simulated robot.

use std::sync::Arc;

use parking_lot::Mutex;

use navcore::{
    ConstantVelocityExecutor, ExecutionResult, ExecutionStatus, ExecutorConfig, Node, Path, Pose,
    RobotProxy, SearchGraph, Trajectory, TrajectoryGenerator,
};

/// Minimal constant-speed trajectory generator used in place of the
/// simulator's trajectory math.
struct ConstantSpeedStub;

impl TrajectoryGenerator for ConstantSpeedStub {
    fn generate(
        &self,
        path: &Path,
        linear_velocity: f64,
        _max_angular_velocity: Option<f64>,
    ) -> Option<Trajectory> {
        if path.num_poses() < 2 || linear_velocity <= 0.0 {
            return None;
        }
        let poses = path.poses().to_vec();
        let mut times = vec![0.0];
        for pair in poses.windows(2) {
            let segment = pair[0].linear_distance(&pair[1]) / linear_velocity;
            times.push(times.last().copied().unwrap_or(0.0) + segment);
        }
        Some(Trajectory::new(times, poses))
    }

    fn resample(&self, traj: &Trajectory, dt: f64) -> Option<Trajectory> {
        if dt <= 0.0 || traj.num_points() < 2 {
            return None;
        }
        // Nearest-waypoint resampling is enough for these tests: emit each
        // waypoint at its own timestamp, padded to the dt grid.
        let end = *traj.times.last()?;
        let mut times = Vec::new();
        let mut poses = Vec::new();
        let mut t = 0.0;
        let mut idx = 0;
        while t < end {
            while idx + 1 < traj.num_points() && traj.times[idx + 1] <= t {
                idx += 1;
            }
            times.push(t);
            poses.push(traj.poses[idx]);
            t += dt;
        }
        times.push(end);
        poses.push(*traj.poses.last()?);
        Some(Trajectory::new(times, poses))
    }
}

struct SimRobot {
    pose: Pose,
    battery: f64,
    last_result: Option<ExecutionResult>,
}

impl RobotProxy for SimRobot {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn battery_level(&self) -> f64 {
        self.battery
    }

    fn set_battery_level(&mut self, level: f64) {
        self.battery = level;
    }

    fn set_last_nav_result(&mut self, result: ExecutionResult) {
        self.last_result = Some(result);
    }
}

#[test]
fn plan_and_execute_across_graph() {
    // A square of waypoints with one far corner reachable only via the square.
    let mut graph = SearchGraph::with_planner();
    let ll = graph.add_node(Node::new(Pose::new(0.0, 0.0)));
    let lr = graph.add_node(Node::new(Pose::new(1.0, 0.0)));
    let ur = graph.add_node(Node::new(Pose::new(1.0, 1.0)));
    let ul = graph.add_node(Node::new(Pose::new(0.0, 1.0)));
    let far = graph.add_node(Node::new(Pose::new(2.0, 2.0)));
    graph.add_edge(ll, lr);
    graph.add_edge(lr, ur);
    graph.add_edge(ul, ll);
    graph.add_edge(ur, far);

    // The robot starts nearest the lower-left corner.
    let start_pose = Pose::new(0.1, -0.1);
    let start = graph.nearest(&start_pose).unwrap();
    assert_eq!(start, ll);

    let path = graph.find_path(start, far);
    assert_eq!(path.num_poses(), 4);
    assert_eq!(path.poses()[0], Pose::new(0.0, 0.0));
    assert_eq!(path.poses()[3], Pose::new(2.0, 2.0));

    let mut executor =
        ConstantVelocityExecutor::new(ExecutorConfig::default(), Arc::new(ConstantSpeedStub));
    let robot = Arc::new(Mutex::new(SimRobot {
        pose: start_pose,
        battery: 100.0,
        last_result: None,
    }));
    executor.set_robot(robot.clone());

    let result = executor.execute(&path, 100.0, 0.1);

    assert_eq!(result.status, ExecutionStatus::Success);
    let robot = robot.lock();
    assert_eq!(robot.pose, Pose::new(2.0, 2.0));
    assert!(robot.battery < 100.0);
    assert_eq!(robot.last_result.as_ref().map(|r| r.status), Some(result.status));
}

#[test]
fn replan_after_edge_removal() {
    let mut graph = SearchGraph::with_planner();
    let a = graph.add_node(Node::new(Pose::new(0.0, 0.0)));
    let b = graph.add_node(Node::new(Pose::new(1.0, 0.0)));
    let c = graph.add_node(Node::new(Pose::new(2.0, 0.0)));
    graph.add_edge(a, b);
    graph.add_edge(b, c);

    assert_eq!(graph.find_path(a, c).num_poses(), 3);

    // Losing the middle edge disconnects the goal; the planner reports an
    // empty path rather than an error.
    graph.remove_edge(b, c);
    assert_eq!(graph.find_path(a, c).num_poses(), 0);

    // Reconnecting by a direct edge restores a two-pose route.
    graph.add_edge(a, c);
    let path = graph.find_path(a, c);
    assert_eq!(path.num_poses(), 2);
}
