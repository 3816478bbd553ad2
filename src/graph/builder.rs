//! Graph construction from stored relation records.

use crate::db::Db;
use crate::error::Result;
use crate::store::{self, MarriageRecord, ParentChildRecord};

use super::Graph;

impl Graph {
    /// Assemble the undirected kinship graph from the two record sources:
    /// one symmetric edge per present parent reference, one per marriage row.
    pub fn from_records(parent_child: &[ParentChildRecord], marriages: &[MarriageRecord]) -> Self {
        let mut graph = Graph::new();

        for record in parent_child {
            if let Some(father_id) = record.father_id {
                graph.add_edge(record.id, father_id);
            }
            if let Some(mother_id) = record.mother_id {
                graph.add_edge(record.id, mother_id);
            }
        }

        for marriage in marriages {
            graph.add_edge(marriage.husband_id, marriage.wife_id);
        }

        graph
    }
}

/// Build a fresh graph from storage.
///
/// The two relation reads are independent and run concurrently; adjacency
/// construction starts only after both complete, so no traversal ever sees a
/// partially built graph. Either read failing aborts the whole build. The
/// reads are separate connections rather than one transaction, so a write
/// landing between them can yield a graph consistent with neither snapshot.
pub async fn build_graph(db: &Db) -> Result<Graph> {
    let (parent_child, marriages) = tokio::try_join!(
        db.with_connection(store::fetch_parent_child_records),
        db.with_connection(store::fetch_marriage_records),
    )?;

    log::debug!(
        "built graph from {} parent-child and {} marriage records",
        parent_child.len(),
        marriages.len()
    );

    Ok(Graph::from_records(&parent_child, &marriages))
}
