//! The filter pipeline.
//!
//! Repository parameters are applied as an explicit, ordered sequence of
//! named steps over a mutable [`QueryState`]. The order is load-bearing:
//! `order_desc` runs after `order_asc` and clears whatever it set, so a
//! descending directive always wins when both are present. Each step is a
//! no-op when its parameter is absent, and each is testable on its own
//! against a bare query state.

use crate::{
    error::{DbError, Result},
    expr::Col,
    params::QueryParams,
    query::SelectQuery,
    traits::{Entity, Expression as _},
};

/// Mutable state threaded through the pipeline: the accumulating SELECT,
/// the relations to eager-load after the fetch, and the page bookkeeping.
pub(crate) struct QueryState<E> {
    pub query: SelectQuery<E>,
    pub includes: Vec<String>,
    pub page: u32,
    pub per_page: u32,
}

impl<E> QueryState<E> {
    pub fn new(query: SelectQuery<E>, page: u32, per_page: u32) -> Self {
        Self {
            query,
            includes: vec![],
            page,
            per_page,
        }
    }
}

/// Runs every step in its fixed order.
pub(crate) fn apply<E: Entity>(state: QueryState<E>, params: &QueryParams) -> Result<QueryState<E>> {
    let state = restrict_ids(state, params);
    let state = exclude_ids(state, params);
    let state = order_asc(state, params)?;
    let state = order_desc(state, params)?;
    let state = collect_includes(state, params);
    let state = pagination(state, params);
    Ok(state)
}

/// Step 1: restrict to the listed primary keys.
pub(crate) fn restrict_ids<E: Entity>(
    mut state: QueryState<E>,
    params: &QueryParams,
) -> QueryState<E> {
    if let Some(ids) = &params.ids {
        state.query = state
            .query
            .filter(Col::<i64>::new(E::KEY).in_(ids.iter().copied()));
    }
    state
}

/// Step 2: exclude the listed primary keys.
pub(crate) fn exclude_ids<E: Entity>(
    mut state: QueryState<E>,
    params: &QueryParams,
) -> QueryState<E> {
    if let Some(ids) = &params.exclude_ids {
        state.query = state
            .query
            .filter(Col::<i64>::new(E::KEY).not_in(ids.iter().copied()));
    }
    state
}

/// Step 3: replace any existing order with ascending order on the named
/// column.
pub(crate) fn order_asc<E: Entity>(
    mut state: QueryState<E>,
    params: &QueryParams,
) -> Result<QueryState<E>> {
    if let Some(column) = &params.order_by_asc {
        state.query = state
            .query
            .clear_order()
            .order_by_column(checked_column::<E>(column)?, false);
    }
    Ok(state)
}

/// Step 4: replace any existing order, including step 3's, with descending
/// order on the named column.
pub(crate) fn order_desc<E: Entity>(
    mut state: QueryState<E>,
    params: &QueryParams,
) -> Result<QueryState<E>> {
    if let Some(column) = &params.order_by_desc {
        state.query = state
            .query
            .clear_order()
            .order_by_column(checked_column::<E>(column)?, true);
    }
    Ok(state)
}

/// Step 5: record the relations to eager-load once the rows are fetched.
/// The parameter parser already deduplicated the list.
pub(crate) fn collect_includes<E: Entity>(
    mut state: QueryState<E>,
    params: &QueryParams,
) -> QueryState<E> {
    state.includes = params.include.clone();
    state
}

/// Step 6: page/per_page parameters override the call-site bookkeeping.
/// This step never touches the SQL; the final fetch applies the numbers.
pub(crate) fn pagination<E>(mut state: QueryState<E>, params: &QueryParams) -> QueryState<E> {
    if let Some(page) = params.page {
        state.page = page;
    }
    if let Some(per_page) = params.per_page {
        state.per_page = per_page;
    }
    state
}

/// Sort columns come from the request, so they never reach the SQL text
/// unless the entity declares them.
fn checked_column<E: Entity>(column: &str) -> Result<String> {
    if E::COLUMNS.contains(&column) {
        Ok(column.to_string())
    } else {
        Err(DbError::UnknownColumn(column.to_string()))
    }
}
