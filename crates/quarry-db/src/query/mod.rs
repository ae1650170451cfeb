//! The query builder.
//!
//! A strongly-typed interface for constructing SQL without concatenating
//! strings by hand. Each statement kind has its own builder with chainable
//! methods:
//!
//! - [`SelectQuery`] — `SELECT` with columns, filters, ordering, joins,
//!   limit/offset and page-based pagination.
//! - [`InsertQuery`] — `INSERT INTO` with column-value pairs and
//!   conflict clauses.
//! - [`UpdateQuery`] — `UPDATE` with `SET` and `WHERE`.
//! - [`DeleteQuery`] — `DELETE FROM` with filtering conditions.
//!
//! Every builder produces a final SQL string plus a bound parameter list and
//! executes it against a shared [`crate::Database`] handle.
//!
//! # Example
//!
//! ```ignore
//! let (sql, params) = SelectQuery::<User>::from(db, "users")
//!     .filter(users::ACTIVE.eq(true))
//!     .order_by(users::CREATED_AT, true)
//!     .limit(10)
//!     .build();
//! ```

pub mod clause;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use select::SelectQuery;
pub use update::UpdateQuery;
