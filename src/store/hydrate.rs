//! Person hydration: map a bare id to a display-ready record.

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::error::Result;
use crate::graph::PersonId;

/// Display-ready person record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedPerson {
    pub person_id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

/// Fetch and map one person row.
///
/// `Ok(None)` means no row exists for the id; callers must not conflate that
/// with a failed read (`Err`).
pub fn hydrate_person(conn: &mut Connection, id: PersonId) -> Result<Option<HydratedPerson>> {
    let person = conn
        .query_row(
            "SELECT id, first_name, last_name, gender, birth_year FROM persons WHERE id = ?1",
            [id.0],
            |row| {
                Ok(HydratedPerson {
                    person_id: PersonId(row.get(0)?),
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    gender: row.get(3)?,
                    birth_year: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(person)
}
