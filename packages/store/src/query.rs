//! # Query description: what to read from or write to a table
//!
//! A [`Query`] is a backend-neutral description of a `select`: which columns to
//! project, which equality filters to apply, and an optional ordering column.
//! [`crate::MemoryStore`] evaluates it directly; the REST adapter in the `api`
//! crate translates it into PostgREST query parameters.
//!
//! Rows travel as JSON objects ([`Row`]) so every table shares one accessor.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record as stored by the backend.
pub type Row = Map<String, Value>;

/// Backend tables the console reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Client,
    Community,
    Unit,
    Resident,
    UnitResident,
    Staff,
}

impl Table {
    /// Table name as known to the backend.
    pub fn name(self) -> &'static str {
        match self {
            Table::Client => "client",
            Table::Community => "community",
            Table::Unit => "unit",
            Table::Resident => "resident",
            Table::UnitResident => "unit_resident",
            Table::Staff => "staff",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column projection of a select.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Columns {
    #[default]
    All,
    Only(Vec<String>),
}

impl Columns {
    /// Render as a PostgREST `select` value (`*` or `id,name`).
    pub fn to_select(&self) -> String {
        match self {
            Columns::All => "*".to_string(),
            Columns::Only(cols) => cols.join(","),
        }
    }
}

/// Equality filter `column = value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Filter on the primary key.
    pub fn id(id: &str) -> Self {
        Self::eq("id", id)
    }

    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column).unwrap_or(&Value::Null) == &self.value
    }

    /// The filter value as it appears on the wire (`eq.<value>`).
    pub fn wire_value(&self) -> String {
        match &self.value {
            Value::String(s) => format!("eq.{s}"),
            Value::Null => "is.null".to_string(),
            other => format!("eq.{other}"),
        }
    }
}

/// Ordering on a single column.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    pub fn wire_value(&self) -> String {
        let dir = if self.ascending { "asc" } else { "desc" };
        format!("{}.{dir}", self.column)
    }
}

/// A select over one table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub columns: Columns,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Query {
    /// Select every column of every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Select only the given columns.
    pub fn columns(cols: &[&str]) -> Self {
        Self {
            columns: Columns::Only(cols.iter().map(|c| c.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order::asc(column));
        self
    }

    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order::desc(column));
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Keep only the projected columns of `row`.
    pub fn project(&self, row: &Row) -> Row {
        match &self.columns {
            Columns::All => row.clone(),
            Columns::Only(cols) => cols
                .iter()
                .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filters_match_all_conditions() {
        let q = Query::all().eq("community_id", "c1").eq("status", "Active");
        assert!(q.matches(&row(json!({"community_id": "c1", "status": "Active"}))));
        assert!(!q.matches(&row(json!({"community_id": "c1", "status": "Inactive"}))));
        assert!(!q.matches(&row(json!({"status": "Active"}))));
    }

    #[test]
    fn test_projection_keeps_requested_columns() {
        let q = Query::columns(&["id", "name"]);
        let projected = q.project(&row(json!({"id": "1", "name": "Oak", "country": "NZ"})));
        assert_eq!(projected.len(), 2);
        assert!(projected.get("country").is_none());
        assert_eq!(q.columns.to_select(), "id,name");
        assert_eq!(Query::all().columns.to_select(), "*");
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(Filter::id("abc").wire_value(), "eq.abc");
        assert_eq!(Filter::eq("is_accessible", true).wire_value(), "eq.true");
        assert_eq!(Filter::eq("plan", Value::Null).wire_value(), "is.null");
        assert_eq!(Order::asc("name").wire_value(), "name.asc");
        assert_eq!(Order::desc("hire_date").wire_value(), "hire_date.desc");
    }
}
