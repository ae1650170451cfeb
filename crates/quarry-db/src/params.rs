//! Typed query parameters.
//!
//! Request-style directives (`ids=1,2&order_by_desc=name&page=2`) arrive as
//! string pairs. [`QueryParams::from_pairs`] validates them once at the
//! boundary and produces a strongly-typed struct; the filter pipeline then
//! works with parsed fields instead of re-checking raw strings at every step.

use crate::error::{DbError, Result};

/// Parsed filter/sort/pagination directives for one repository call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Restrict results to these primary keys.
    pub ids: Option<Vec<i64>>,
    /// Exclude these primary keys from the results.
    pub exclude_ids: Option<Vec<i64>>,
    /// Sort ascending by this column.
    pub order_by_asc: Option<String>,
    /// Sort descending by this column. Wins over `order_by_asc` when both
    /// are set.
    pub order_by_desc: Option<String>,
    /// Relations to eager-load, deduplicated in first-seen order. Empty by
    /// default: nothing is loaded unless asked for.
    pub include: Vec<String>,
    /// Page number override.
    pub page: Option<u32>,
    /// Page size override.
    pub per_page: Option<u32>,
    /// Return every matching row as a single page.
    pub all: bool,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses request-style key/value pairs.
    ///
    /// Recognized keys: `ids`, `exclude_ids`, `order_by_asc`,
    /// `order_by_desc`, `include`, `page`, `per_page`, `all`. Unrecognized
    /// keys are ignored. `all` is triggered by key presence alone, matching
    /// the conventional query-string form `?all=1`.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            match key {
                "ids" => params.ids = Some(parse_id_list("ids", value)?),
                "exclude_ids" => params.exclude_ids = Some(parse_id_list("exclude_ids", value)?),
                "order_by_asc" => params.order_by_asc = Some(value.to_string()),
                "order_by_desc" => params.order_by_desc = Some(value.to_string()),
                "include" => params.include = dedup_list(value),
                "page" => params.page = Some(parse_number("page", value)?),
                "per_page" => params.per_page = Some(parse_number("per_page", value)?),
                "all" => params.all = true,
                _ => {}
            }
        }

        Ok(params)
    }

    pub fn with_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.ids = Some(ids.into_iter().collect());
        self
    }

    pub fn with_exclude_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.exclude_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order_by_asc = Some(column.into());
        self
    }

    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order_by_desc = Some(column.into());
        self
    }

    /// Adds relations to eager-load, skipping names already present.
    pub fn with_include<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for relation in relations {
            let relation = relation.into();
            if !self.include.contains(&relation) {
                self.include.push(relation);
            }
        }
        self
    }

    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    pub fn fetch_all(mut self) -> Self {
        self.all = true;
        self
    }
}

fn parse_id_list(key: &'static str, value: &str) -> Result<Vec<i64>> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim().parse::<i64>().map_err(|_| DbError::InvalidParameter {
                key,
                reason: format!("`{part}` is not an integer"),
            })
        })
        .collect()
}

fn parse_number(key: &'static str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| DbError::InvalidParameter {
        key,
        reason: format!("`{value}` is not a positive integer"),
    })
}

fn dedup_list(value: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for part in value.split(',') {
        let part = part.trim();
        if !part.is_empty() && !items.iter().any(|seen| seen == part) {
            items.push(part.to_string());
        }
    }
    items
}
