//! File generation with conflict detection.

use std::{fs, path::PathBuf};

use tracing::info;

use crate::{
    error::{GenError, Result},
    ident::ModelName,
    templates,
};

/// Writes generated source files into one output directory.
pub struct Generator {
    out_dir: PathBuf,
}

impl Generator {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Generates `<model>_policy.rs` and returns the written path.
    pub fn generate_policy(&self, model: &ModelName) -> Result<PathBuf> {
        self.write(
            format!("{}_policy.rs", model.snake()),
            templates::policy_source(model),
        )
    }

    /// Generates `<model>_repository.rs` and returns the written path.
    pub fn generate_repository(&self, model: &ModelName) -> Result<PathBuf> {
        self.write(
            format!("{}_repository.rs", model.snake()),
            templates::repository_source(model),
        )
    }

    fn write(&self, file_name: String, contents: String) -> Result<PathBuf> {
        let target = self.out_dir.join(file_name);
        if target.exists() {
            return Err(GenError::TargetExists(target));
        }

        fs::create_dir_all(&self.out_dir)?;
        fs::write(&target, contents)?;
        info!("Created {}", target.display());

        Ok(target)
    }
}
