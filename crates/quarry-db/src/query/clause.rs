//! Internal representation of query clauses.

use rusqlite::types::Value;

/// A WHERE clause represented as a closure that generates SQL and binds
/// parameters.
pub(crate) struct WhereClause {
    pub sql_fn: Box<dyn Fn(&mut Vec<Value>) -> String>,
}

/// An ORDER BY clause.
pub(crate) struct OrderClause {
    pub column: String,
    pub desc: bool,
}

/// Renders a bound value into literal SQL text for diagnostics.
///
/// Only used by debug rendering, never for execution.
pub(crate) fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(t) => format!("'{}'", t.replace('\'', "''")),
        Value::Blob(b) => format!("x'{}'", b.iter().map(|b| format!("{b:02x}")).collect::<String>()),
    }
}
