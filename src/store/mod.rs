//! Storage collaborators consumed by the graph core: relation record reads
//! and person hydration. This subsystem only reads; record CRUD, search, and
//! uploads live elsewhere.

mod hydrate;
mod records;

pub use hydrate::{hydrate_person, HydratedPerson};
pub use records::{
    fetch_marriage_records, fetch_parent_child_records, MarriageRecord, ParentChildRecord,
};
