//! Relation record reads: the two edge sources the graph is built from.

use rusqlite::Connection;

use crate::error::Result;
use crate::graph::PersonId;

/// One parent-child row: a child plus whichever parent references are set.
/// Rows with neither parent set never reach the builder.
#[derive(Debug, Clone)]
pub struct ParentChildRecord {
    pub id: PersonId,
    pub father_id: Option<PersonId>,
    pub mother_id: Option<PersonId>,
}

/// One marriage row. Storage enforces no uniqueness; duplicates are handled
/// by the graph's set semantics.
#[derive(Debug, Clone)]
pub struct MarriageRecord {
    pub husband_id: PersonId,
    pub wife_id: PersonId,
}

/// Fetch all persons that reference at least one parent.
///
/// Ordered by id so graph construction order is stable for a given dataset.
pub fn fetch_parent_child_records(conn: &mut Connection) -> Result<Vec<ParentChildRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, father_id, mother_id FROM persons \
         WHERE father_id IS NOT NULL OR mother_id IS NOT NULL \
         ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ParentChildRecord {
            id: PersonId(row.get(0)?),
            father_id: row.get::<_, Option<i64>>(1)?.map(PersonId),
            mother_id: row.get::<_, Option<i64>>(2)?.map(PersonId),
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Fetch all marriage rows, ordered by insertion.
pub fn fetch_marriage_records(conn: &mut Connection) -> Result<Vec<MarriageRecord>> {
    let mut stmt = conn.prepare("SELECT husband_id, wife_id FROM marriages ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(MarriageRecord {
            husband_id: PersonId(row.get(0)?),
            wife_id: PersonId(row.get(1)?),
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
