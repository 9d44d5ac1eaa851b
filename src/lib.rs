//! # navcore
//!
//! Navigation core for a mobile-robot simulator.
//!
//! Two components do the heavy lifting:
//!
//! - [`graph::SearchGraph`]: a mutable, undirected, weighted graph over
//!   robot-reachable poses, with nearest-node lookup and pluggable
//!   shortest-path search.
//! - [`execution::ConstantVelocityExecutor`]: a real-time control loop that
//!   drives a robot proxy along a time-parameterized trajectory, with
//!   cooperative cancellation, concurrent collision monitoring, and battery
//!   depletion semantics.
//!
//! The surrounding simulator provides the collaborators: a robot proxy, a
//! collision-checking world, and a trajectory generator. These are consumed
//! through the traits in [`interfaces`] and [`utils`].
//!
//! # Example
//!
//! ```rust
//! use navcore::{Node, Pose, SearchGraph};
//!
//! let mut graph = SearchGraph::with_planner();
//!
//! let a = graph.add_node(Node::new(Pose::new(0.0, 0.0)));
//! let b = graph.add_node(Node::new(Pose::new(1.0, 0.0)));
//! let c = graph.add_node(Node::new(Pose::new(1.0, 1.0)));
//! graph.add_edge(a, b);
//! graph.add_edge(b, c);
//!
//! let path = graph.find_path(a, c);
//! assert_eq!(path.num_poses(), 3);
//! ```

pub mod execution;
pub mod graph;
pub mod interfaces;
pub mod utils;

// Re-export the common types at the crate root for convenience
pub use execution::{
    CancelHandle, ConfigError, ConstantVelocityExecutor, ExecutionResult, ExecutionStatus,
    ExecutorConfig,
};
pub use graph::{Edge, Node, NodeId, PathFinder, SearchGraph, SearchGraphPlanner};
pub use interfaces::{CollisionChecker, RobotProxy, SharedRobot};
pub use utils::{Path, Pose, Trajectory, TrajectoryGenerator};
