//! Kinship graph: construction and traversal.
//!
//! Builds an undirected adjacency structure from parent-child and marriage
//! records and answers shortest-path, bounded-neighborhood, and aggregate
//! connectivity queries against it. Graphs are built fresh per query and
//! never cached.

mod builder;
mod connections;
mod path;
mod stats;

pub use builder::build_graph;
pub use connections::{find_connections_within_degrees, Connection};
pub use path::{find_shortest_path, find_shortest_path_bidirectional};
pub use stats::{compute_statistics, GraphStats};

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a person record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Undirected adjacency over person ids.
///
/// Neighbor lists are insertion-ordered sets: duplicate edges are ignored and
/// traversal visits neighbors in the order edges were first added. A person
/// appears as a key only if it participates in at least one edge, so an
/// absent id means "no recorded relation", not "verified isolated".
#[derive(Debug, Default)]
pub struct Graph {
    adjacency: HashMap<PersonId, Vec<PersonId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symmetric edge. Self-loops and duplicates are ignored.
    pub fn add_edge(&mut self, a: PersonId, b: PersonId) {
        if a == b {
            return;
        }
        self.add_half_edge(a, b);
        self.add_half_edge(b, a);
    }

    fn add_half_edge(&mut self, from: PersonId, to: PersonId) {
        let neighbors = self.adjacency.entry(from).or_default();
        if !neighbors.contains(&to) {
            neighbors.push(to);
        }
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbors of `id` in insertion order. Empty for unknown ids.
    pub fn neighbors(&self, id: PersonId) -> &[PersonId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Undirected edges, each counted once.
    pub fn edge_count(&self) -> usize {
        self.degree_sum() / 2
    }

    /// Sum of neighbor-set sizes over all nodes (twice the edge count).
    pub fn degree_sum(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_symmetric() {
        let mut g = Graph::new();
        g.add_edge(PersonId(1), PersonId(2));
        g.add_edge(PersonId(2), PersonId(3));

        for id in g.nodes() {
            for &neighbor in g.neighbors(id) {
                assert!(
                    g.neighbors(neighbor).contains(&id),
                    "edge {}-{} missing its reverse half",
                    id,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut g = Graph::new();
        g.add_edge(PersonId(1), PersonId(2));
        g.add_edge(PersonId(1), PersonId(2));
        g.add_edge(PersonId(2), PersonId(1));

        assert_eq!(g.neighbors(PersonId(1)), &[PersonId(2)]);
        assert_eq!(g.neighbors(PersonId(2)), &[PersonId(1)]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_self_loops_ignored() {
        let mut g = Graph::new();
        g.add_edge(PersonId(5), PersonId(5));
        assert!(g.is_empty());
        assert!(!g.contains(PersonId(5)));
    }

    #[test]
    fn test_neighbor_insertion_order() {
        let mut g = Graph::new();
        g.add_edge(PersonId(1), PersonId(9));
        g.add_edge(PersonId(1), PersonId(3));
        g.add_edge(PersonId(1), PersonId(7));
        assert_eq!(g.neighbors(PersonId(1)), &[PersonId(9), PersonId(3), PersonId(7)]);
    }

    #[test]
    fn test_unknown_id_has_no_neighbors() {
        let g = Graph::new();
        assert!(g.neighbors(PersonId(42)).is_empty());
        assert!(!g.contains(PersonId(42)));
    }

    #[test]
    fn test_counts() {
        let mut g = Graph::new();
        g.add_edge(PersonId(1), PersonId(2));
        g.add_edge(PersonId(1), PersonId(3));
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree_sum(), 4);
    }
}
