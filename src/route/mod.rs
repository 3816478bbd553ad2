//! Route queries: graph build, shortest path, and in-order hydration.

use serde::Serialize;

use crate::db::Db;
use crate::error::{KingraphError, Result};
use crate::graph::{self, PersonId};
use crate::store::{self, HydratedPerson};

/// Outcome of a route query between two people.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub path_exists: bool,
    pub degree_of_separation: usize,
    pub path_ids: Vec<PersonId>,
    pub path: Vec<HydratedPerson>,
}

impl RouteResult {
    fn no_path() -> Self {
        Self {
            path_exists: false,
            degree_of_separation: 0,
            path_ids: Vec::new(),
            path: Vec::new(),
        }
    }
}

/// Build a fresh graph, find the shortest path, and hydrate every node on it
/// in path order.
///
/// A path id with no person row fails the whole request instead of being
/// dropped: every successful result satisfies
/// `path.len() == path_ids.len()`.
pub async fn find_route_between_people(
    db: &Db,
    start: PersonId,
    end: PersonId,
) -> Result<RouteResult> {
    let graph = graph::build_graph(db).await?;
    let path_ids = graph::find_shortest_path(&graph, start, end);
    if path_ids.is_empty() {
        log::debug!("no path between {} and {}", start, end);
        return Ok(RouteResult::no_path());
    }

    let ids = path_ids.clone();
    let path = db
        .with_connection(move |conn| {
            let mut hydrated = Vec::with_capacity(ids.len());
            for id in ids {
                match store::hydrate_person(conn, id)? {
                    Some(person) => hydrated.push(person),
                    None => return Err(KingraphError::MissingPerson(id)),
                }
            }
            Ok(hydrated)
        })
        .await?;

    Ok(RouteResult {
        path_exists: true,
        degree_of_separation: path_ids.len() - 1,
        path_ids,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate;
    use rusqlite::Connection;
    use tempfile::TempDir;

    /// Three-person household: spouses 1 and 2, child 3 of father 1.
    async fn setup_family_db() -> (Db, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db = Db::new(temp_dir.path().join("test.db"));
        db.with_connection(|conn| {
            migrate::run_migrations(conn)?;
            conn.execute_batch(
                "INSERT INTO persons (id, first_name, last_name) VALUES (1, 'Anna', 'Holt');
                 INSERT INTO persons (id, first_name, last_name) VALUES (2, 'Bram', 'Holt');
                 INSERT INTO persons (id, first_name, last_name, father_id)
                     VALUES (3, 'Cato', 'Holt', 1);
                 INSERT INTO persons (id, first_name, last_name) VALUES (9, 'Iris', 'Voss');
                 INSERT INTO marriages (husband_id, wife_id) VALUES (1, 2);",
            )?;
            Ok(())
        })
        .await
        .unwrap();
        (db, temp_dir)
    }

    #[tokio::test]
    async fn test_route_found_and_hydrated_in_order() {
        let (db, _temp) = setup_family_db().await;
        let result = find_route_between_people(&db, PersonId(2), PersonId(3))
            .await
            .unwrap();

        assert!(result.path_exists);
        assert_eq!(result.degree_of_separation, 2);
        assert_eq!(result.path_ids, vec![PersonId(2), PersonId(1), PersonId(3)]);
        assert_eq!(result.path.len(), result.path_ids.len());
        let names: Vec<&str> = result.path.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, vec!["Bram", "Anna", "Cato"]);
    }

    #[tokio::test]
    async fn test_route_not_found() {
        let (db, _temp) = setup_family_db().await;
        // Person 9 exists but has no relations, so it is absent from the graph
        let result = find_route_between_people(&db, PersonId(1), PersonId(9))
            .await
            .unwrap();

        assert!(!result.path_exists);
        assert_eq!(result.degree_of_separation, 0);
        assert!(result.path_ids.is_empty());
        assert!(result.path.is_empty());
    }

    #[tokio::test]
    async fn test_route_reflexive() {
        let (db, _temp) = setup_family_db().await;
        let result = find_route_between_people(&db, PersonId(1), PersonId(1))
            .await
            .unwrap();

        assert!(result.path_exists);
        assert_eq!(result.degree_of_separation, 0);
        assert_eq!(result.path_ids, vec![PersonId(1)]);
        assert_eq!(result.path.len(), 1);
    }

    #[tokio::test]
    async fn test_route_fails_on_missing_person_row() {
        let (db, temp_dir) = setup_family_db().await;

        // Forge an inconsistency: a marriage row pointing at a person with no
        // record. Uses a raw connection so foreign keys are not enforced.
        let conn = Connection::open(temp_dir.path().join("test.db")).unwrap();
        conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        conn.execute(
            "INSERT INTO marriages (husband_id, wife_id) VALUES (3, 77)",
            [],
        )
        .unwrap();
        drop(conn);

        let err = find_route_between_people(&db, PersonId(2), PersonId(77))
            .await
            .unwrap_err();
        assert!(matches!(err, KingraphError::MissingPerson(PersonId(77))));
    }
}
