pub mod connection;
pub mod error;
pub mod expr;
pub mod helpers;
pub mod macros;
pub mod params;
pub mod query;
pub mod repository;
pub mod traits;

pub use connection::{open, open_in_memory, Database};
pub use error::{DbError, Result};
pub use helpers::*;
pub use params::QueryParams;
pub use query::*;
pub use repository::{Page, Repository};
pub use traits::{Entity, FromRow};

#[cfg(test)]
mod tests {
    use rusqlite::{types::Value, Row};

    use super::*;
    use crate::traits::Expression as _;

    #[derive(Debug, Clone)]
    struct User {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub age: i64,
        pub posts: Vec<Post>,
    }

    impl FromRow for User {
        fn from_row(row: &Row) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                name: row.get("name")?,
                email: row.get("email")?,
                age: row.get("age")?,
                posts: vec![],
            })
        }
    }

    impl Entity for User {
        const TABLE: &'static str = users::TABLE;
        const KEY: &'static str = "id";
        const COLUMNS: &'static [&'static str] = users::COLUMNS;

        fn load_related(db: &Database, relation: &str, rows: &mut [Self]) -> Result<()> {
            match relation {
                "posts" => {
                    let ids: Vec<i64> = rows.iter().map(|u| u.id).collect();
                    let related = SelectQuery::<Post>::from(db.clone(), posts::TABLE)
                        .filter(posts::USER_ID.in_(ids))
                        .fetch()?;
                    for user in rows.iter_mut() {
                        user.posts = related
                            .iter()
                            .filter(|p| p.user_id == user.id)
                            .cloned()
                            .collect();
                    }
                    Ok(())
                }
                other => Err(DbError::UnknownRelation(other.to_string())),
            }
        }
    }

    #[derive(Debug, Clone)]
    struct Post {
        pub id: i64,
        pub user_id: i64,
        pub title: String,
        pub tags: Vec<String>,
    }

    impl FromRow for Post {
        fn from_row(row: &Row) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                title: row.get("title")?,
                tags: from_json(&row.get::<_, String>("tags")?),
            })
        }
    }

    define_entity!(
        users {
            table: "users",
            columns: {
                ID: i64 => "id",
                NAME: String => "name",
                EMAIL: String => "email",
                AGE: i64 => "age",
            }
        }
    );

    define_entity!(
        posts {
            table: "posts",
            columns: {
                ID: i64 => "id",
                USER_ID: i64 => "user_id",
                TITLE: String => "title",
                TAGS: Vec<String> => "tags",
            }
        }
    );

    fn setup_db() -> Database {
        let db = open_in_memory().unwrap();
        {
            let conn = db.lock().unwrap();
            conn.execute_batch(
                "CREATE TABLE users (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL DEFAULT '',
                    age INTEGER NOT NULL DEFAULT 0
                );
                CREATE TABLE posts (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    tags TEXT NOT NULL DEFAULT '[]'
                );",
            )
            .unwrap();
        }
        db
    }

    fn seed_users(db: &Database, names: &[&str]) {
        for (idx, name) in names.iter().enumerate() {
            InsertQuery::into(db.clone(), users::TABLE)
                .set(users::NAME, name.to_string())
                .set(users::EMAIL, format!("{name}@example.com"))
                .set(users::AGE, 20 + idx as i64)
                .execute()
                .unwrap();
        }
    }

    fn seed_post(db: &Database, user_id: i64, title: &str) {
        InsertQuery::into(db.clone(), posts::TABLE)
            .set(posts::USER_ID, user_id)
            .set(posts::TITLE, title.to_string())
            .execute()
            .unwrap();
    }

    #[test]
    fn test_insert_and_select() {
        let db = setup_db();

        let id = InsertQuery::into(db.clone(), users::TABLE)
            .set(users::NAME, "alice".to_string())
            .set(users::EMAIL, "alice@example.com".to_string())
            .set(users::AGE, 31)
            .execute()
            .unwrap();

        assert!(id > 0);

        let user = SelectQuery::<User>::from(db, users::TABLE)
            .filter(users::ID.eq(id))
            .fetch_one()
            .unwrap()
            .unwrap();

        assert_eq!(user.name, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.age, 31);
    }

    #[test]
    fn test_select_with_like() {
        let db = setup_db();
        seed_users(&db, &["alice", "bob", "alfred"]);

        let matches = SelectQuery::<User>::from(db, users::TABLE)
            .filter(users::NAME.like("al"))
            .fetch()
            .unwrap();

        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_select_with_ilike_ignores_case() {
        let db = setup_db();
        seed_users(&db, &["Alice", "bob"]);

        let matches = SelectQuery::<User>::from(db, users::TABLE)
            .filter(users::NAME.ilike("ALI"))
            .fetch()
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Alice");
    }

    #[test]
    fn test_or_widens_the_filter() {
        let db = setup_db();
        seed_users(&db, &["alice", "bob", "carol"]);

        let matches = SelectQuery::<User>::from(db, users::TABLE)
            .filter(
                users::NAME
                    .eq("alice".to_string())
                    .or(users::NAME.eq("bob".to_string())),
            )
            .fetch()
            .unwrap();

        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_null_checks_against_non_null_column() {
        let db = setup_db();
        seed_users(&db, &["alice", "bob"]);

        let present = SelectQuery::<User>::from(db.clone(), users::TABLE)
            .filter(users::EMAIL.not_null())
            .fetch()
            .unwrap();
        let absent = SelectQuery::<User>::from(db, users::TABLE)
            .filter(users::EMAIL.null())
            .fetch()
            .unwrap();

        assert_eq!(present.len(), 2);
        assert!(absent.is_empty());
    }

    #[test]
    fn test_insert_on_conflict_do_nothing_keeps_row() {
        let db = setup_db();

        InsertQuery::into(db.clone(), users::TABLE)
            .set(users::ID, 1)
            .set(users::NAME, "alice".to_string())
            .execute()
            .unwrap();
        InsertQuery::into(db.clone(), users::TABLE)
            .set(users::ID, 1)
            .set(users::NAME, "mallory".to_string())
            .on_conflict_do_nothing()
            .execute()
            .unwrap();

        let rows = SelectQuery::<User>::from(db, users::TABLE).fetch().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "alice");
    }

    #[test]
    fn test_insert_on_conflict_updates_row() {
        let db = setup_db();

        InsertQuery::into(db.clone(), users::TABLE)
            .set(users::ID, 1)
            .set(users::NAME, "alice".to_string())
            .execute()
            .unwrap();
        InsertQuery::into(db.clone(), users::TABLE)
            .set(users::ID, 1)
            .set(users::NAME, "alicia".to_string())
            .on_conflict_update(&["id"], &["name"])
            .execute()
            .unwrap();

        let rows = SelectQuery::<User>::from(db, users::TABLE).fetch().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "alicia");
    }

    #[test]
    fn test_json_column_round_trip() {
        let db = setup_db();
        seed_users(&db, &["alice"]);

        InsertQuery::into(db.clone(), posts::TABLE)
            .set(posts::USER_ID, 1)
            .set(posts::TITLE, "hello".to_string())
            .set(posts::TAGS, to_json(&vec!["intro", "news"]))
            .execute()
            .unwrap();

        let post = SelectQuery::<Post>::from(db, posts::TABLE)
            .fetch_one()
            .unwrap()
            .unwrap();

        assert_eq!(post.tags, ["intro", "news"]);
    }

    #[test]
    fn test_json_column_select_expression() {
        let db = setup_db();
        let (sql, _) = SelectQuery::<Post>::from(db, posts::TABLE)
            .select(&[posts::TAGS])
            .build();

        assert_eq!(sql, "SELECT json(tags) AS tags FROM posts");
    }

    #[test]
    fn test_paginate_returns_standard_page() {
        let db = setup_db();
        seed_users(&db, &["a", "b", "c", "d", "e"]);

        let repo = Repository::<User>::new(db);
        let page = repo.paginate(2, 2, &[], &QueryParams::new()).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 2);
    }

    #[test]
    fn test_page_params_override_call_site() {
        let db = setup_db();
        seed_users(&db, &["a", "b", "c", "d", "e"]);

        let repo = Repository::<User>::new(db);
        let params = QueryParams::from_pairs([("page", "3"), ("per_page", "2")]).unwrap();
        let page = repo.paginate(10, 1, &[], &params).unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_extreme_page_params_yield_empty_page() {
        let db = setup_db();
        seed_users(&db, &["a", "b", "c"]);

        let repo = Repository::<User>::new(db);
        let params =
            QueryParams::from_pairs([("page", "4294967295"), ("per_page", "1000")]).unwrap();
        let page = repo.paginate(15, 1, &[], &params).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, u32::MAX);
    }

    #[test]
    fn test_page_zero_reports_first_page() {
        let db = setup_db();
        seed_users(&db, &["a", "b", "c"]);

        let repo = Repository::<User>::new(db);
        let page = repo.paginate(2, 0, &[], &QueryParams::new()).unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_no_sort_params_uses_store_order() {
        let db = setup_db();
        seed_users(&db, &["c", "a", "b"]);

        let repo = Repository::<User>::new(db);
        let page = repo.paginate(10, 1, &[], &QueryParams::new()).unwrap();

        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_descending_sort_wins_over_ascending() {
        let db = setup_db();
        seed_users(&db, &["bob", "alice", "carol"]);

        let repo = Repository::<User>::new(db);
        let params =
            QueryParams::from_pairs([("order_by_asc", "age"), ("order_by_desc", "name")]).unwrap();
        let page = repo.paginate(10, 1, &[], &params).unwrap();

        let names: Vec<&str> = page.items.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["carol", "bob", "alice"]);
    }

    #[test]
    fn test_ascending_sort_alone() {
        let db = setup_db();
        seed_users(&db, &["bob", "alice", "carol"]);

        let repo = Repository::<User>::new(db);
        let params = QueryParams::new().order_asc("name");
        let page = repo.paginate(10, 1, &[], &params).unwrap();

        let names: Vec<&str> = page.items.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }

    #[test]
    fn test_ids_with_exclusion_intersect() {
        let db = setup_db();
        seed_users(&db, &["a", "b", "c", "d"]);

        let repo = Repository::<User>::new(db);
        let params = QueryParams::from_pairs([("ids", "1,2,3"), ("exclude_ids", "2")]).unwrap();
        let page = repo.paginate(10, 1, &[], &params).unwrap();

        let mut ids: Vec<i64> = page.items.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, [1, 3]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_all_returns_single_full_page() {
        let db = setup_db();
        seed_users(&db, &["a", "b", "c", "d", "e"]);

        let repo = Repository::<User>::new(db);
        let params =
            QueryParams::from_pairs([("all", "1"), ("page", "2"), ("per_page", "2")]).unwrap();
        let page = repo.paginate(2, 2, &[], &params).unwrap();

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 5);
        assert_eq!(page.per_page, 5);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_include_loads_relations_once() {
        let db = setup_db();
        seed_users(&db, &["alice", "bob"]);
        seed_post(&db, 1, "first");
        seed_post(&db, 1, "second");
        seed_post(&db, 2, "third");

        let repo = Repository::<User>::new(db);
        let params = QueryParams::from_pairs([("include", "posts,posts")]).unwrap();
        assert_eq!(params.include, ["posts"]);

        let page = repo.paginate(10, 1, &[], &params).unwrap();
        let posts_for = |id: i64| {
            page.items
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.posts.len())
                .unwrap()
        };
        assert_eq!(posts_for(1), 2);
        assert_eq!(posts_for(2), 1);
    }

    #[test]
    fn test_no_include_loads_nothing() {
        let db = setup_db();
        seed_users(&db, &["alice"]);
        seed_post(&db, 1, "first");

        let repo = Repository::<User>::new(db);
        let page = repo.paginate(10, 1, &[], &QueryParams::new()).unwrap();

        assert!(page.items[0].posts.is_empty());
    }

    #[test]
    fn test_unknown_relation_is_rejected() {
        let db = setup_db();
        seed_users(&db, &["alice"]);

        let repo = Repository::<User>::new(db);
        let params = QueryParams::new().with_include(["followers"]);
        let err = repo.paginate(10, 1, &[], &params).unwrap_err();

        assert!(matches!(err, DbError::UnknownRelation(name) if name == "followers"));
    }

    #[test]
    fn test_unknown_sort_column_is_rejected() {
        let db = setup_db();
        seed_users(&db, &["alice"]);

        let repo = Repository::<User>::new(db);
        let params = QueryParams::new().order_desc("name; DROP TABLE users");
        let err = repo.paginate(10, 1, &[], &params).unwrap_err();

        assert!(matches!(err, DbError::UnknownColumn(_)));
    }

    #[test]
    fn test_find_by_id_applies_includes() {
        let db = setup_db();
        seed_users(&db, &["alice"]);
        seed_post(&db, 1, "first");

        let repo = Repository::<User>::new(db);
        let params = QueryParams::new().with_include(["posts"]);
        let user = repo.find_by_id(1, &[], &params).unwrap();

        assert_eq!(user.name, "alice");
        assert_eq!(user.posts.len(), 1);
    }

    #[test]
    fn test_find_by_id_missing_is_not_found() {
        let db = setup_db();

        let repo = Repository::<User>::new(db);
        let err = repo.find_by_id(42, &[], &QueryParams::new()).unwrap_err();

        assert!(matches!(err, DbError::NotFound(key) if key == "42"));
    }

    #[test]
    fn test_create_turns_null_into_empty_string() {
        let db = setup_db();

        let repo = Repository::<User>::new(db);
        let user = repo
            .create(&[
                ("name", Value::from("carol".to_string())),
                ("email", Value::Null),
                ("age", Value::from(5i64)),
            ])
            .unwrap();

        assert_eq!(user.name, "carol");
        assert_eq!(user.email, "");
        assert_eq!(user.age, 5);
    }

    #[test]
    fn test_update_persists_changes() {
        let db = setup_db();
        seed_users(&db, &["alice"]);

        let repo = Repository::<User>::new(db);
        let user = repo
            .update(&[("name", Value::from("alicia".to_string()))], 1)
            .unwrap();

        assert_eq!(user.name, "alicia");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let db = setup_db();

        let repo = Repository::<User>::new(db);
        let err = repo
            .update(&[("name", Value::from("ghost".to_string()))], 9)
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn test_destroy_returns_removed_count() {
        let db = setup_db();
        seed_users(&db, &["alice"]);

        let repo = Repository::<User>::new(db);
        assert_eq!(repo.destroy(1).unwrap(), 1);
        assert_eq!(repo.destroy(1).unwrap(), 0);
    }

    #[test]
    fn test_render_query_substitutes_bindings() {
        let db = setup_db();

        let repo = Repository::<User>::new(db);
        let params = QueryParams::new().with_ids([1, 2]).order_desc("name");
        let sql = repo.render_query(&[], &params).unwrap();

        assert_eq!(
            sql,
            "SELECT * FROM users WHERE id IN (1, 2) ORDER BY name DESC"
        );
    }

    #[test]
    fn test_selected_columns_limit_projection() {
        let db = setup_db();
        seed_users(&db, &["alice"]);

        let repo = Repository::<User>::new(db.clone());
        let params = QueryParams::new();
        // email/age omitted from projection still need defaults in FromRow,
        // so project everything FromRow reads plus nothing extra.
        let page = repo
            .paginate(10, 1, &["id", "name", "email", "age"], &params)
            .unwrap();
        assert_eq!(page.items.len(), 1);

        let sql = repo.render_query(&["id", "name"], &params).unwrap();
        assert_eq!(sql, "SELECT id, name FROM users");
    }
}
