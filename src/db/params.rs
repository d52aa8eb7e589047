//! rusqlite named-parameter adapter for finalized queries

use crate::error::Result;
use crate::query::value::PLACEHOLDER_MARKER;
use crate::query::{BindParams, QueryBuilder};
use rusqlite::{Connection, Result as SqliteResult, ToSql};
use tracing::debug;

/// Bind map reshaped into rusqlite's `(":name", value)` form
pub struct NamedParams<'a> {
    entries: Vec<(String, &'a str)>,
}

impl<'a> NamedParams<'a> {
    /// Borrowed view usable as `rusqlite::Params`
    pub fn as_params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Prefix every parameter name with the placeholder marker.
///
/// ```ignore
/// let named = named_params(builder.params());
/// let mut stmt = conn.prepare(builder.query())?;
/// let rows = stmt.query_map(named.as_params().as_slice(), |row| row.get(0))?;
/// ```
pub fn named_params(params: &BindParams) -> NamedParams<'_> {
    let entries = params
        .iter()
        .map(|(name, value)| (format!("{}{}", PLACEHOLDER_MARKER, name), value))
        .collect();
    NamedParams { entries }
}

/// Run a finalized query and collect its first column as strings
pub fn query_column(conn: &Connection, builder: &QueryBuilder<'_>) -> Result<Vec<String>> {
    let named = named_params(builder.params());
    let mut stmt = conn.prepare(builder.query())?;

    let rows = stmt.query_map(named.as_params().as_slice(), |row| row.get::<_, String>(0))?;
    let values = rows.collect::<SqliteResult<Vec<String>>>()?;

    debug!(params = named.len(), rows = values.len(), "Executed finalized query");
    Ok(values)
}
