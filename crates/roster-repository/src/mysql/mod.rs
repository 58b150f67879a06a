//! MySQL repository implementations.

mod interest_repository;
mod skill_repository;
mod user_repository;

pub use interest_repository::*;
pub use skill_repository::*;
pub use user_repository::*;

use roster_core::{RosterError, RosterResult};
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Row shape shared by the `interests` and `skills` tables.
#[derive(Debug, FromRow)]
pub(crate) struct ReferenceRow {
    pub id: String, // MySQL stores UUID as CHAR(36)
    pub name: String,
}

/// Parses a CHAR(36) id column.
pub(crate) fn parse_uuid(value: &str) -> RosterResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| RosterError::Internal(format!("Invalid UUID in database: {}", e)))
}

/// Selects the rows of `table` whose name is one of `names`.
///
/// Duplicate names are collapsed before querying. No query is issued when
/// `names` is empty.
pub(crate) async fn fetch_by_names(
    pool: &MySqlPool,
    table: &'static str,
    names: &[String],
) -> RosterResult<Vec<ReferenceRow>> {
    let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    if unique.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = QueryBuilder::<MySql>::new("SELECT id, name FROM ");
    query.push(table).push(" WHERE name IN (");
    let mut separated = query.separated(", ");
    for name in unique {
        separated.push_bind(name);
    }
    separated.push_unseparated(")");

    let rows = query
        .build_query_as::<ReferenceRow>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
