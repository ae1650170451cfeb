//! Macros for defining entity schemas.
//!
//! The [`define_entity!`] macro generates column constants for a table,
//! tying database column names to Rust types, plus a `COLUMNS` name list
//! that repositories use to validate sort parameters.

/// Defines a module with typed column constants for a database table.
///
/// # Syntax
///
/// ```ignore
/// define_entity!(
///     users {
///         table: "users",
///         columns: {
///             ID: i64 => "id",
///             NAME: String => "name"
///         }
///     }
/// );
/// ```
///
/// This expands to:
///
/// ```ignore
/// pub mod users {
///     pub const TABLE: &str = "users";
///     pub const ID: Col<i64> = Col::new("id");
///     pub const NAME: Col<String> = Col::new("name");
///     pub const COLUMNS: &[&str] = &["id", "name"];
/// }
/// ```
#[macro_export]
macro_rules! define_entity {
    (
        $entity:ident {
            table: $table:literal,
            columns: {
                $($cols:tt)*
            }
        }
    ) => {
        pub mod $entity {
            use $crate::expr::column::Col;

            pub const TABLE: &str = $table;

            pub const COLUMNS: &[&str] = $crate::column_names!([] $($cols)*);

            $crate::define_column!($($cols)*);
        }
    };
}

/// Accumulates the database column name literals from a `define_entity!`
/// column list into a `&[&str]` slice.
#[macro_export]
macro_rules! column_names {
    ([$($acc:literal),*]) => { &[$($acc),*] };
    ([$($acc:literal),*] $name:ident: $type:ty => $db_col:literal $(, $($rest:tt)*)?) => {
        $crate::column_names!([$($acc,)* $db_col] $($($rest)*)?)
    };
}

// Columns are matched as raw tokens (not a parsed `ty` fragment) so the
// `Vec<T>` / `Option<Vec<T>>` shapes can be recognized and mapped to
// `Col::json`.
#[macro_export]
macro_rules! define_column {
    () => {};

    // JSON detection - Vec<T>
    ($name:ident: Vec<$inner:ty> => $db_col:literal $(, $($rest:tt)*)?) => {
        pub const $name: Col<String> = Col::json($db_col);
        $crate::define_column!($($($rest)*)?);
    };

    // JSON detection - Option<Vec<T>>
    ($name:ident: Option<Vec<$inner:ty>> => $db_col:literal $(, $($rest:tt)*)?) => {
        pub const $name: Col<Option<String>> = Col::json($db_col);
        $crate::define_column!($($($rest)*)?);
    };

    // Optional regular types
    ($name:ident: Option<$inner:ty> => $db_col:literal $(, $($rest:tt)*)?) => {
        pub const $name: Col<Option<$inner>> = Col::new($db_col);
        $crate::define_column!($($($rest)*)?);
    };

    // Regular types (fallback)
    ($name:ident: $type:ty => $db_col:literal $(, $($rest:tt)*)?) => {
        pub const $name: Col<$type> = Col::new($db_col);
        $crate::define_column!($($($rest)*)?);
    };
}
