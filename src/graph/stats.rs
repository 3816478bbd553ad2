//! Aggregate connectivity metrics.

use serde::Serialize;

use super::Graph;

/// Aggregate metrics over one constructed graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_people: usize,
    pub total_connections: usize,
    pub average_connections: f64,
    pub isolated_people: usize,
}

/// Compute population, edge, and degree metrics for a graph.
///
/// `isolated_people` counts empty neighbor sets within this graph only. The
/// builder keys a person only when an edge exists, so built graphs always
/// report zero here; people with no recorded relation at all are not part of
/// the graph's population.
pub fn compute_statistics(graph: &Graph) -> GraphStats {
    let total_people = graph.node_count();
    let degree_sum = graph.degree_sum();

    let average_connections = if total_people == 0 {
        0.0
    } else {
        degree_sum as f64 / total_people as f64
    };

    let isolated_people = graph
        .nodes()
        .filter(|&id| graph.neighbors(id).is_empty())
        .count();

    GraphStats {
        total_people,
        total_connections: degree_sum / 2,
        average_connections,
        isolated_people,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, PersonId};

    #[test]
    fn test_empty_graph() {
        let stats = compute_statistics(&Graph::new());
        assert_eq!(stats.total_people, 0);
        assert_eq!(stats.total_connections, 0);
        assert_eq!(stats.average_connections, 0.0);
        assert_eq!(stats.isolated_people, 0);
    }

    #[test]
    fn test_concrete_scenario() {
        // father(3) = 1, spouse(1, 2)
        let mut g = Graph::new();
        g.add_edge(PersonId(3), PersonId(1));
        g.add_edge(PersonId(1), PersonId(2));

        let stats = compute_statistics(&g);
        assert_eq!(stats.total_people, 3);
        assert_eq!(stats.total_connections, 2);
        assert!((stats.average_connections - 4.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.isolated_people, 0);
    }

    #[test]
    fn test_star_graph() {
        let mut g = Graph::new();
        for leaf in 1..=4 {
            g.add_edge(PersonId(0), PersonId(leaf));
        }

        let stats = compute_statistics(&g);
        assert_eq!(stats.total_people, 5);
        assert_eq!(stats.total_connections, 4);
        assert!((stats.average_connections - 8.0 / 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wire_format_camel_case() {
        let mut g = Graph::new();
        g.add_edge(PersonId(1), PersonId(2));
        let json = serde_json::to_value(compute_statistics(&g)).unwrap();
        assert_eq!(json["totalPeople"], 2);
        assert_eq!(json["totalConnections"], 1);
        assert_eq!(json["averageConnections"], 1.0);
        assert_eq!(json["isolatedPeople"], 0);
    }
}
