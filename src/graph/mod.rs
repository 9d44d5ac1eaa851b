//! Search graph over robot-reachable poses.
//!
//! An undirected weighted graph supporting incremental mutation,
//! nearest-node lookup, and delegation to a pluggable path-finding strategy.
//!
//! Nodes live in an arena owned by the graph and are addressed by opaque
//! [`NodeId`] handles. Identity is the handle, never pose equality: two
//! nodes with identical poses are distinct graph members. Neighbor sets and
//! edges store handles, and every mutation leaves the graph fully
//! consistent before returning. The graph is not designed for concurrent
//! mutation; callers serialize access externally.
//!
//! # Example
//!
//! ```rust
//! use navcore::{Node, Pose, SearchGraph};
//!
//! let mut graph = SearchGraph::with_planner();
//! let a = graph.add_node(Node::new(Pose::new(0.0, 0.0)));
//! let b = graph.add_node(Node::new(Pose::new(3.0, 4.0)));
//!
//! let edge = graph.add_edge(a, b).unwrap();
//! assert_eq!(edge.cost, 5.0);
//!
//! let path = graph.find_path(a, b);
//! assert_eq!(path.num_poses(), 2);
//! ```

mod planner;

pub use planner::{PathFinder, SearchGraphPlanner};

use std::collections::HashSet;

use log::warn;

use crate::utils::{Path, Pose};

/// Opaque handle identifying a node within one [`SearchGraph`].
///
/// Handles are minted by [`SearchGraph::add_node`] and become stale once the
/// node is removed; stale handles make every operation a no-op or an empty
/// result, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// A graph vertex: a pose plus its adjacency set.
#[derive(Debug, Clone)]
pub struct Node {
    pub pose: Pose,
    neighbors: HashSet<NodeId>,
}

impl Node {
    /// Create a standalone node. It joins a graph via [`SearchGraph::add_node`].
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            neighbors: HashSet::new(),
        }
    }

    /// Handles of the nodes connected to this one by an edge.
    pub fn neighbors(&self) -> &HashSet<NodeId> {
        &self.neighbors
    }
}

/// A weighted, undirected connection between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub node_a: NodeId,
    pub node_b: NodeId,
    pub cost: f64,
}

impl Edge {
    /// True when this edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.node_a == a && self.node_b == b) || (self.node_a == b && self.node_b == a)
    }
}

/// Mutable weighted graph with nearest-node and shortest-path queries.
pub struct SearchGraph {
    nodes: Vec<(NodeId, Node)>,
    edges: Vec<Edge>,
    next_id: u64,
    /// Display color, irrelevant to behavior.
    pub color: [f64; 3],
    /// Display alpha, irrelevant to behavior.
    pub color_alpha: f64,
    path_finder: Option<Box<dyn PathFinder>>,
}

impl Default for SearchGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchGraph {
    /// Create an empty graph with no path-finding strategy.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_id: 0,
            color: [0.0, 0.0, 0.0],
            color_alpha: 0.5,
            path_finder: None,
        }
    }

    /// Create an empty graph with the default Dijkstra planner installed.
    pub fn with_planner() -> Self {
        let mut graph = Self::new();
        graph.path_finder = Some(Box::new(SearchGraphPlanner));
        graph
    }

    /// Install a path-finding strategy, replacing any existing one.
    pub fn set_planner(&mut self, planner: Box<dyn PathFinder>) {
        self.path_finder = Some(planner);
    }

    /// True when a path-finding strategy is installed.
    pub fn has_planner(&self) -> bool {
        self.path_finder.is_some()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// True when `id` refers to a current member of the graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|(nid, _)| *nid == id)
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|(nid, _)| *nid == id)
            .map(|(_, node)| node)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|(nid, _)| *nid == id)
            .map(|(_, node)| node)
    }

    /// Node handles in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|(id, _)| *id)
    }

    /// All edges currently in the graph.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The edge joining `a` and `b`, if one exists.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.connects(a, b))
    }

    /// Insert a node into the graph and return its handle.
    ///
    /// The arena mints a fresh handle per insertion, so duplicate membership
    /// cannot arise. Any neighbor entries on the incoming node are discarded;
    /// adjacency is maintained exclusively by the edge operations.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        node.neighbors.clear();
        self.nodes.push((id, node));
        id
    }

    /// Remove a node along with every edge touching it.
    ///
    /// Surviving endpoints lose their neighbor-set entries for the removed
    /// node. Removing an absent node is a no-op.
    pub fn remove_node(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        self.edges
            .retain(|edge| edge.node_a != id && edge.node_b != id);
        self.nodes.retain(|(nid, _)| *nid != id);
        for (_, node) in &mut self.nodes {
            node.neighbors.remove(&id);
        }
    }

    /// Connect `a` and `b` with an edge costed by the Euclidean distance
    /// between their poses.
    ///
    /// Returns `None`, warns, and leaves the graph unchanged when either
    /// handle is stale or `a == b`. Calling this for an already-connected
    /// pair returns the existing edge with its original cost; it never
    /// creates a second record.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Option<Edge> {
        let cost = match (self.node(a), self.node(b)) {
            (Some(node_a), Some(node_b)) => node_a.pose.linear_distance(&node_b.pose),
            _ => {
                warn!("Cannot add edge: one or both nodes are not in the search graph.");
                return None;
            }
        };
        self.add_edge_with_cost(a, b, cost)
    }

    /// Connect `a` and `b` with an explicit traversal cost.
    pub fn add_edge_with_cost(&mut self, a: NodeId, b: NodeId, cost: f64) -> Option<Edge> {
        if a == b {
            warn!("Cannot add edge: endpoints must be distinct nodes.");
            return None;
        }
        if !self.contains(a) || !self.contains(b) {
            warn!("Cannot add edge: one or both nodes are not in the search graph.");
            return None;
        }
        if let Some(existing) = self.edge_between(a, b) {
            return Some(*existing);
        }

        let edge = Edge {
            node_a: a,
            node_b: b,
            cost,
        };
        if let Some(node) = self.node_mut(a) {
            node.neighbors.insert(b);
        }
        if let Some(node) = self.node_mut(b) {
            node.neighbors.insert(a);
        }
        self.edges.push(edge);
        Some(edge)
    }

    /// Remove the edge joining `a` and `b`, clearing both neighbor entries.
    ///
    /// Removing a non-existent edge is a silent no-op.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) {
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.connects(a, b));
        if self.edges.len() == before {
            return;
        }
        if let Some(node) = self.node_mut(a) {
            node.neighbors.remove(&b);
        }
        if let Some(node) = self.node_mut(b) {
            node.neighbors.remove(&a);
        }
    }

    /// The node whose pose is closest to `pose` by Euclidean distance.
    ///
    /// Returns `None` on an empty graph. Ties break by insertion order: the
    /// first node inserted wins.
    pub fn nearest(&self, pose: &Pose) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (id, node) in &self.nodes {
            let dist = node.pose.linear_distance(pose);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((*id, dist)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Find a path from `start` to `goal` using the installed strategy.
    ///
    /// All failure modes are non-fatal: a missing planner or a stale handle
    /// warns and yields an empty path, and an unreachable goal yields an
    /// empty path via the planner. Planning from a node to itself is
    /// trivially "already there" and returns an empty path without warning.
    pub fn find_path(&self, start: NodeId, goal: NodeId) -> Path {
        let planner = match &self.path_finder {
            Some(planner) => planner,
            None => {
                warn!("Graph was created without a planner, so it cannot find paths.");
                return Path::default();
            }
        };
        if !self.contains(start) {
            warn!("Start node is not in the search graph.");
            return Path::default();
        }
        if !self.contains(goal) {
            warn!("Goal node is not in the search graph.");
            return Path::default();
        }
        if start == goal {
            return Path::default();
        }
        planner.find_path(self, start, goal)
    }
}
