//! Error types for quarry-db.

use miette::Diagnostic;
use thiserror::Error;

/// Database error type for quarry-db operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database connection failed: {0}")]
    #[diagnostic(
        code(quarry_db::connection),
        help("Check if the database file exists and is accessible")
    )]
    ConnectionError(String),

    #[error("Database query failed: {0}")]
    #[diagnostic(code(quarry_db::query))]
    QueryError(String),

    #[error("No record found for key: {0}")]
    #[diagnostic(
        code(quarry_db::not_found),
        help("Check that the primary key value refers to an existing record")
    )]
    NotFound(String),

    #[error("Unknown column in sort parameter: {0}")]
    #[diagnostic(
        code(quarry_db::unknown_column),
        help("order_by_asc/order_by_desc must name a column declared on the entity")
    )]
    UnknownColumn(String),

    #[error("Unknown relation: {0}")]
    #[diagnostic(
        code(quarry_db::unknown_relation),
        help("The include parameter must name a relation the entity knows how to load")
    )]
    UnknownRelation(String),

    #[error("Invalid query parameter `{key}`: {reason}")]
    #[diagnostic(
        code(quarry_db::invalid_parameter),
        help("ids, exclude_ids, page and per_page must be numeric")
    )]
    InvalidParameter { key: &'static str, reason: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(quarry_db::io), help("Check file permissions and disk space"))]
    IoError(#[from] std::io::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                DbError::NotFound("query returned no rows".to_string())
            }
            other => DbError::QueryError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
