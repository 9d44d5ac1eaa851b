//! Path-finding strategies over the search graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::warn;

use super::{NodeId, SearchGraph};
use crate::utils::Path;

/// A pluggable path-finding strategy for [`SearchGraph::find_path`].
///
/// Implementations search the graph's current nodes and edges, using edge
/// cost as the distance metric. An unreachable goal is a normal outcome and
/// is reported as an empty path, never an error.
pub trait PathFinder {
    /// Find a path from `start` to `goal`, both guaranteed by the caller to
    /// be current graph members.
    fn find_path(&self, graph: &SearchGraph, start: NodeId, goal: NodeId) -> Path;
}

/// Dijkstra shortest-path search over the graph's edge costs.
///
/// All edge costs are non-negative, so plain Dijkstra is sufficient. On
/// success the returned path holds the poses of the route nodes from start
/// to goal inclusive, in traversal order.
pub struct SearchGraphPlanner;

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.cost == other.cost
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathFinder for SearchGraphPlanner {
    fn find_path(&self, graph: &SearchGraph, start: NodeId, goal: NodeId) -> Path {
        // Adjacency from the current edge list
        let mut adjacency: HashMap<NodeId, Vec<(NodeId, f64)>> = HashMap::new();
        for edge in graph.edges() {
            adjacency
                .entry(edge.node_a)
                .or_default()
                .push((edge.node_b, edge.cost));
            adjacency
                .entry(edge.node_b)
                .or_default()
                .push((edge.node_a, edge.cost));
        }

        let mut dist: HashMap<NodeId, f64> = HashMap::new();
        let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
        let mut open_set = BinaryHeap::new();

        dist.insert(start, 0.0);
        open_set.push(QueueEntry {
            cost: 0.0,
            node: start,
        });

        let mut reached_goal = false;
        while let Some(QueueEntry { cost, node }) = open_set.pop() {
            if node == goal {
                reached_goal = true;
                break;
            }
            if cost > dist.get(&node).copied().unwrap_or(f64::INFINITY) {
                continue; // Stale queue entry
            }

            for &(neighbor, edge_cost) in adjacency.get(&node).into_iter().flatten() {
                let next_cost = cost + edge_cost;
                if next_cost < dist.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                    dist.insert(neighbor, next_cost);
                    came_from.insert(neighbor, node);
                    open_set.push(QueueEntry {
                        cost: next_cost,
                        node: neighbor,
                    });
                }
            }
        }

        if !reached_goal {
            warn!("Could not find a path from start to goal.");
            return Path::default();
        }

        // Walk the route backwards from the goal
        let mut route = vec![goal];
        let mut current = goal;
        while let Some(&previous) = came_from.get(&current) {
            route.push(previous);
            current = previous;
        }
        route.reverse();

        let mut poses = Vec::with_capacity(route.len());
        for id in route {
            match graph.node(id) {
                Some(node) => poses.push(node.pose),
                None => return Path::default(),
            }
        }
        Path::new(poses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::utils::Pose;
    use approx::assert_relative_eq;

    #[test]
    fn test_shortest_route_order() {
        let mut graph = SearchGraph::with_planner();
        let a = graph.add_node(Node::new(Pose::new(0.0, 0.0)));
        let b = graph.add_node(Node::new(Pose::new(1.0, 0.0)));
        let c = graph.add_node(Node::new(Pose::new(2.0, 0.0)));
        graph.add_edge(a, b);
        graph.add_edge(b, c);

        let path = graph.find_path(a, c);
        assert_eq!(path.num_poses(), 3);
        assert_eq!(path.poses()[0], Pose::new(0.0, 0.0));
        assert_eq!(path.poses()[1], Pose::new(1.0, 0.0));
        assert_eq!(path.poses()[2], Pose::new(2.0, 0.0));
        assert_relative_eq!(path.total_length(), 2.0);
    }

    #[test]
    fn test_prefers_cheaper_multi_hop_route() {
        let mut graph = SearchGraph::with_planner();
        let a = graph.add_node(Node::new(Pose::new(0.0, 0.0)));
        let b = graph.add_node(Node::new(Pose::new(1.0, 1.0)));
        let c = graph.add_node(Node::new(Pose::new(2.0, 0.0)));

        // Direct edge is artificially expensive; the detour wins
        graph.add_edge_with_cost(a, c, 100.0);
        graph.add_edge_with_cost(a, b, 1.0);
        graph.add_edge_with_cost(b, c, 1.0);

        let path = graph.find_path(a, c);
        assert_eq!(path.num_poses(), 3);
        assert_eq!(path.poses()[1], Pose::new(1.0, 1.0));
    }

    #[test]
    fn test_unreachable_goal() {
        let mut graph = SearchGraph::with_planner();
        let a = graph.add_node(Node::new(Pose::new(0.0, 0.0)));
        let b = graph.add_node(Node::new(Pose::new(1.0, 0.0)));
        let island = graph.add_node(Node::new(Pose::new(10.0, 10.0)));
        graph.add_edge(a, b);

        let path = graph.find_path(a, island);
        assert_eq!(path.num_poses(), 0);
    }
}
