//! Core traits that power the query builder and the repository adapter.
//!
//! - [`Expression`]: building SQL condition fragments
//! - [`FromRow`]: mapping database rows into Rust types
//! - [`Entity`]: the contract a type must satisfy to back a [`crate::Repository`]

use rusqlite::{types::Value, Row};

use crate::{
    connection::Database,
    error::{DbError, Result},
    expr::ops::{BinaryOp, InOp, LikeOp, LogicalOp, NullOp},
};

/// A trait for types that can be rendered as SQL condition fragments.
///
/// Implementors include [`crate::expr::Col`] and the compound operators in
/// [`crate::expr::ops`]. `to_sql` appends bound parameters to `params` and
/// returns a fragment using `?` placeholders.
///
/// # Example
///
/// ```rust
/// use quarry_db::expr::Col;
/// use quarry_db::traits::Expression as _;
///
/// let col = Col::<String>::new("name");
/// let expr = col.eq("alice".to_string());
/// let mut params = vec![];
/// let sql = expr.to_sql(&mut params); // "name = ?", params = ["alice"]
/// ```
pub trait Expression: Sized {
    /// Renders this expression and pushes its bound values onto `params`.
    fn to_sql(&self, params: &mut Vec<Value>) -> String;

    /// Creates a SQL `=` condition.
    fn eq<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "=", value.into())
    }

    /// Creates a SQL `!=` condition.
    fn ne<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "!=", value.into())
    }

    /// Creates a SQL `>` condition.
    fn gt<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, ">", value.into())
    }

    /// Creates a SQL `<` condition.
    fn lt<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "<", value.into())
    }

    /// Creates a SQL `>=` condition.
    fn gte<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, ">=", value.into())
    }

    /// Creates a SQL `<=` condition.
    fn lte<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "<=", value.into())
    }

    /// Creates a SQL `LIKE` condition.
    fn like(self, pattern: impl Into<String>) -> LikeOp<Self> {
        LikeOp::new(self, pattern.into(), false)
    }

    /// Creates a case-insensitive `LIKE` condition.
    fn ilike(self, pattern: impl Into<String>) -> LikeOp<Self> {
        LikeOp::new(self, pattern.into(), true)
    }

    /// Creates a SQL `IN` condition.
    fn in_<T, I>(self, values: I) -> InOp<Self>
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().map(|v| v.into()).collect();
        InOp::new(self, values, false)
    }

    /// Creates a SQL `NOT IN` condition.
    fn not_in<T, I>(self, values: I) -> InOp<Self>
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().map(|v| v.into()).collect();
        InOp::new(self, values, true)
    }

    /// Creates a SQL `IS NULL` condition.
    fn null(self) -> NullOp<Self> {
        NullOp::new(self, true)
    }

    /// Creates a SQL `IS NOT NULL` condition.
    fn not_null(self) -> NullOp<Self> {
        NullOp::new(self, false)
    }

    /// Combines two expressions with `AND`.
    fn and<E: Expression>(self, other: E) -> LogicalOp<Self, E> {
        LogicalOp::new(self, other, "AND")
    }

    /// Combines two expressions with `OR`.
    fn or<E: Expression>(self, other: E) -> LogicalOp<Self, E> {
        LogicalOp::new(self, other, "OR")
    }
}

/// A trait for types that can be constructed from a SQLite row.
///
/// Used by [`crate::SelectQuery::fetch`] and friends to map query results.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// The contract a persisted type must satisfy to back a [`crate::Repository`].
///
/// Binding the repository to one entity type at compile time replaces the
/// runtime model lookup a dynamic framework would do: there is no way to hand
/// the repository something that is not an entity.
pub trait Entity: FromRow {
    /// Table name.
    const TABLE: &'static str;

    /// Primary-key column name.
    const KEY: &'static str;

    /// Every column callers may select or sort by. Sort parameters naming a
    /// column outside this list are rejected before reaching SQL.
    const COLUMNS: &'static [&'static str];

    /// Batch-loads one named relation into an already-fetched set of rows.
    ///
    /// Entities with relations override this with one query per relation
    /// (avoiding per-row fetches). The default knows no relations at all, so
    /// nothing is eager-loaded unless the entity opts in.
    fn load_related(_db: &Database, relation: &str, _rows: &mut [Self]) -> Result<()> {
        Err(DbError::UnknownRelation(relation.to_string()))
    }
}
