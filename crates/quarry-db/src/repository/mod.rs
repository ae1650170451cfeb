//! Generic repository adapter.
//!
//! [`Repository<E>`] translates a [`QueryParams`] into a filtered, sorted,
//! paginated, eager-loaded result set over one entity type. The repository
//! holds only a database handle; every call builds a fresh query, so no
//! filter state leaks between invocations.

pub mod pipeline;

use std::marker::PhantomData;

use rusqlite::types::Value;
use serde::Serialize;
use tracing::debug;

use crate::{
    connection::Database,
    error::{DbError, Result},
    expr::Col,
    params::QueryParams,
    query::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery},
    repository::pipeline::QueryState,
    traits::{Entity, Expression as _},
};

/// One page of results plus total-count metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// A repository bound to one entity type.
///
/// # Example
///
/// ```ignore
/// let repo = Repository::<User>::new(db);
/// let params = QueryParams::from_pairs([("order_by_desc", "name"), ("include", "posts")])?;
/// let page = repo.paginate(15, 1, &[], &params)?;
/// ```
pub struct Repository<E: Entity> {
    db: Database,
    _entity: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Returns a page of entities matching `params`.
    ///
    /// When `params.all` is set, every matching row comes back as a single
    /// page whose `per_page` and `total` both equal the match count,
    /// regardless of any page/per_page values also present. Otherwise the
    /// call-site `page`/`per_page` (overridable by the params) select a
    /// standard LIMIT/OFFSET page, with `total` counted over the same
    /// predicates.
    pub fn paginate(
        &self,
        per_page: u32,
        page: u32,
        columns: &[&str],
        params: &QueryParams,
    ) -> Result<Page<E>> {
        let state = pipeline::apply(self.state(columns, page, per_page), params)?;

        if params.all {
            debug!("fetching all rows: {}", state.query.debug_sql());
            let mut items = state.query.fetch()?;
            self.load_relations(&state.includes, &mut items)?;
            let total = items.len() as u64;

            return Ok(Page {
                total,
                page: 1,
                per_page: total as u32,
                items,
            });
        }

        // Count over the same predicates, without limit/offset.
        let count_state = pipeline::apply(self.state(&[], page, per_page), params)?;
        let total = count_state.query.count()?;

        // Page 0 fetches page 1, so the metadata reports 1 as well.
        let page_no = state.page.max(1);
        let query = state.query.page(page_no, state.per_page);
        debug!("fetching page {}: {}", page_no, query.debug_sql());
        let mut items = query.fetch()?;
        self.load_relations(&state.includes, &mut items)?;

        Ok(Page {
            items,
            total,
            page: page_no,
            per_page: state.per_page,
        })
    }

    /// Fetches the entity whose primary key equals `key`.
    ///
    /// Only the eager-load directives in `params` apply here; id filters and
    /// sorting are meaningless for a single-row lookup.
    pub fn find_by_id(&self, key: i64, columns: &[&str], params: &QueryParams) -> Result<E> {
        let query = SelectQuery::<E>::from(self.db.clone(), E::TABLE)
            .columns(columns.iter().copied())
            .filter(Col::<i64>::new(E::KEY).eq(key));

        let entity = query.fetch_one()?.ok_or_else(|| DbError::NotFound(key.to_string()))?;

        let mut rows = [entity];
        self.load_relations(&params.include, &mut rows)?;
        let [entity] = rows;

        Ok(entity)
    }

    /// Inserts a new entity and returns it re-read from the database.
    ///
    /// Null field values are persisted as empty strings, keeping text
    /// columns non-null the way API clients expect.
    pub fn create(&self, data: &[(&str, Value)]) -> Result<E> {
        let mut insert = InsertQuery::into(self.db.clone(), E::TABLE);
        for (column, value) in data {
            insert = insert.set_column(*column, null_to_empty(value.clone()));
        }

        let id = insert.execute()?;
        self.find_by_id(id, &[], &QueryParams::new())
    }

    /// Applies `data` to the entity with the given primary key.
    ///
    /// Fails with [`DbError::NotFound`] when no such row exists rather than
    /// silently updating nothing.
    pub fn update(&self, data: &[(&str, Value)], key: i64) -> Result<E> {
        self.find_by_id(key, &[], &QueryParams::new())?;

        let mut update = UpdateQuery::table(self.db.clone(), E::TABLE);
        for (column, value) in data {
            update = update.set_column(*column, value.clone());
        }
        update.filter(Col::<i64>::new(E::KEY).eq(key)).execute()?;

        self.find_by_id(key, &[], &QueryParams::new())
    }

    /// Deletes the entity with the given primary key.
    ///
    /// Returns the number of removed rows; 0 when nothing matched.
    pub fn destroy(&self, key: i64) -> Result<usize> {
        let removed = DeleteQuery::from(self.db.clone(), E::TABLE)
            .filter(Col::<i64>::new(E::KEY).eq(key))
            .execute()?;
        Ok(removed)
    }

    /// Renders the SELECT this parameter set would execute, with bound
    /// values substituted positionally. Diagnostic use only.
    pub fn render_query(&self, columns: &[&str], params: &QueryParams) -> Result<String> {
        let state = pipeline::apply(self.state(columns, 1, 0), params)?;
        Ok(state.query.debug_sql())
    }

    fn state(&self, columns: &[&str], page: u32, per_page: u32) -> QueryState<E> {
        let query = SelectQuery::<E>::from(self.db.clone(), E::TABLE)
            .columns(columns.iter().copied());
        QueryState::new(query, page, per_page)
    }

    fn load_relations(&self, relations: &[String], rows: &mut [E]) -> Result<()> {
        for relation in relations {
            E::load_related(&self.db, relation, rows)?;
        }
        Ok(())
    }
}

fn null_to_empty(value: Value) -> Value {
    match value {
        Value::Null => Value::Text(String::new()),
        other => other,
    }
}
