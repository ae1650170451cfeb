//! The SELECT query builder.

use std::marker::PhantomData;

use rusqlite::{types::Value, ToSql};

use crate::{
    connection::Database,
    expr::column::Col,
    query::clause::{literal, OrderClause, WhereClause},
    traits::{Expression, FromRow},
};

/// An ergonomic SELECT builder for SQLite.
///
/// Constructed via [`SelectQuery::from`], then chained with `.filter()`,
/// `.order_by()`, etc.
///
/// # Example
///
/// ```rust
/// use quarry_db::{SelectQuery, FromRow, define_entity};
/// use quarry_db::traits::Expression as _;
/// use rusqlite::Connection;
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Debug)]
/// struct User {
///     id: i64
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
///         Ok(User {
///             id: row.get("id")?
///         })
///     }
/// }
///
/// define_entity!(
///     users {
///         table: "users",
///         columns: {
///             ID: i64 => "id"
///         }
///     }
/// );
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute("CREATE TABLE users (id INTEGER PRIMARY KEY)", []).unwrap();
///
/// let db = Arc::new(Mutex::new(conn));
/// let users = SelectQuery::<User>::from(db, "users")
///     .filter(users::ID.gt(0))
///     .order_by(users::ID, false)
///     .limit(10)
///     .fetch()
///     .unwrap();
/// ```
pub struct SelectQuery<E> {
    db: Database,
    table: &'static str,
    columns: Vec<String>,
    joins: Vec<String>,
    wheres: Vec<WhereClause>,
    orders: Vec<OrderClause>,
    limit: Option<u32>,
    offset: Option<u32>,
    _entity: PhantomData<E>,
}

impl<E> SelectQuery<E> {
    /// Starts a new query on the given table.
    pub fn from(db: Database, table: &'static str) -> Self {
        Self {
            db,
            table,
            columns: vec![],
            joins: vec![],
            wheres: vec![],
            orders: vec![],
            limit: None,
            offset: None,
            _entity: PhantomData,
        }
    }

    /// Selects specific typed columns from the table.
    pub fn select<T>(mut self, cols: &[Col<T>]) -> Self {
        self.columns.extend(cols.iter().map(|c| c.select_expr()));
        self
    }

    /// Selects columns by name. An empty list means all columns.
    pub fn columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    /// Selects all columns from the table.
    pub fn select_all(mut self) -> Self {
        self.columns.clear();
        self
    }

    /// Adds a JOIN clause.
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.joins.push(join.into());
        self
    }

    /// Adds a WHERE condition. Multiple conditions are joined with `AND`.
    pub fn filter<Expr: Expression + 'static>(mut self, expr: Expr) -> Self {
        self.wheres.push(WhereClause {
            sql_fn: Box::new(move |params| expr.to_sql(params)),
        });
        self
    }

    /// Adds an ORDER BY clause.
    pub fn order_by<T>(self, col: Col<T>, desc: bool) -> Self {
        self.order_by_column(col.name, desc)
    }

    /// Adds an ORDER BY clause by column name.
    pub fn order_by_column(mut self, column: impl Into<String>, desc: bool) -> Self {
        self.orders.push(OrderClause {
            column: column.into(),
            desc,
        });
        self
    }

    /// Drops every ORDER BY clause accumulated so far.
    pub fn clear_order(mut self) -> Self {
        self.orders.clear();
        self
    }

    /// Limits the number of results.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the query offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets limit/offset from 1-based pagination params. Page 0 is treated
    /// as page 1, and an offset past `u32::MAX` saturates since no table
    /// holds rows there anyway.
    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.limit = Some(per_page);
        self.offset = Some(page.saturating_sub(1).saturating_mul(per_page));
        self
    }

    /// Builds the final SQL string and its bound parameters.
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut params = vec![];

        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut sql = format!("SELECT {} FROM {}", select, self.table);

        for join in &self.joins {
            sql.push_str(&format!(" {}", join));
        }

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let conditions = self
                .wheres
                .iter()
                .map(|w| (w.sql_fn)(&mut params))
                .collect::<Vec<_>>();
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            let orders = self
                .orders
                .iter()
                .map(|o| format!("{} {}", o.column, if o.desc { "DESC" } else { "ASC" }))
                .collect::<Vec<_>>();
            sql.push_str(&orders.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, params)
    }

    /// Renders the pending SQL with bound values substituted positionally.
    ///
    /// Diagnostic output only; the rendered string is never executed.
    pub fn debug_sql(&self) -> String {
        let (mut sql, params) = self.build();
        for value in &params {
            sql = sql.replacen('?', &literal(value), 1);
        }
        sql
    }

    fn build_count(&self) -> (String, Vec<Value>) {
        let mut params = vec![];
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);

        for join in &self.joins {
            sql.push_str(&format!(" {}", join));
        }

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let conditions = self
                .wheres
                .iter()
                .map(|w| (w.sql_fn)(&mut params))
                .collect::<Vec<_>>();
            sql.push_str(&conditions.join(" AND "));
        }

        (sql, params)
    }
}

impl<E: FromRow> SelectQuery<E> {
    /// Executes the query and maps every row through [`FromRow`].
    pub fn fetch(self) -> rusqlite::Result<Vec<E>> {
        let (sql, params) = self.build();
        let conn = self.db.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt.query_map(params_ref.as_slice(), E::from_row)?;
        rows.collect()
    }

    /// Executes the query and returns at most one row.
    pub fn fetch_one(self) -> rusqlite::Result<Option<E>> {
        let mut results = self.limit(1).fetch()?;
        Ok(results.pop())
    }

    /// Counts matching rows, ignoring any limit/offset on this builder.
    pub fn count(self) -> rusqlite::Result<u64> {
        let (sql, params) = self.build_count();
        let conn = self.db.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        stmt.query_row(params_ref.as_slice(), |row| row.get(0))
    }
}
