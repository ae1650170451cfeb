//! Source templates for generated files.
//!
//! Plain `format!` renderings rather than a templating engine; the output is
//! a starting point the user edits, not machine-maintained code.

use crate::ident::ModelName;

/// Renders an authorization-policy skeleton for `model`.
///
/// Every ability defaults to deny; the user fills in real rules.
pub fn policy_source(model: &ModelName) -> String {
    let pascal = model.pascal();

    format!(
        r#"//! Authorization policy for {pascal} resources.

/// Decides what a subject may do with {pascal} records.
///
/// Generated skeleton: every ability denies until implemented.
pub struct {pascal}Policy;

impl {pascal}Policy {{
    pub fn view_any(&self, _subject_id: i64) -> bool {{
        false
    }}

    pub fn view(&self, _subject_id: i64, _record_id: i64) -> bool {{
        false
    }}

    pub fn create(&self, _subject_id: i64) -> bool {{
        false
    }}

    pub fn update(&self, _subject_id: i64, _record_id: i64) -> bool {{
        false
    }}

    pub fn delete(&self, _subject_id: i64, _record_id: i64) -> bool {{
        false
    }}
}}
"#
    )
}

/// Renders a repository skeleton for `model`: entity definition, row
/// mapping, and a typed repository alias.
pub fn repository_source(model: &ModelName) -> String {
    let pascal = model.pascal();
    let table = model.table();

    format!(
        r#"//! Repository for {pascal} records.

use quarry_db::{{define_entity, Entity, FromRow, Repository}};
use rusqlite::Row;

define_entity!(
    {table} {{
        table: "{table}",
        columns: {{
            ID: i64 => "id",
        }}
    }}
);

#[derive(Debug, Clone)]
pub struct {pascal} {{
    pub id: i64,
}}

impl FromRow for {pascal} {{
    fn from_row(row: &Row) -> rusqlite::Result<Self> {{
        Ok(Self {{
            id: row.get("id")?,
        }})
    }}
}}

impl Entity for {pascal} {{
    const TABLE: &'static str = {table}::TABLE;
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = {table}::COLUMNS;
}}

pub type {pascal}Repository = Repository<{pascal}>;
"#
    )
}
