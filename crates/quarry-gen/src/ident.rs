//! Model-name validation and case conversion.

use crate::error::{GenError, Result};

/// A validated model identifier with pascal/snake renderings.
///
/// Validation happens eagerly at construction, so a `ModelName` held
/// anywhere downstream is known to be a usable Rust identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName {
    raw: String,
}

impl ModelName {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();

        let mut chars = raw.chars();
        let valid = match chars.next() {
            Some(first) => {
                first.is_ascii_alphabetic()
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };

        if !valid {
            return Err(GenError::InvalidModelName(raw));
        }

        Ok(Self { raw })
    }

    /// PascalCase rendering, e.g. `blog_post` -> `BlogPost`.
    pub fn pascal(&self) -> String {
        self.raw
            .split('_')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let mut chars = segment.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect()
    }

    /// snake_case rendering, e.g. `BlogPost` -> `blog_post`.
    pub fn snake(&self) -> String {
        let mut out = String::with_capacity(self.raw.len() + 4);
        for (idx, c) in self.raw.chars().enumerate() {
            if c.is_ascii_uppercase() {
                if idx > 0 && !out.ends_with('_') {
                    out.push('_');
                }
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Naive plural of the snake form, used as the default table name.
    pub fn table(&self) -> String {
        format!("{}s", self.snake())
    }
}
