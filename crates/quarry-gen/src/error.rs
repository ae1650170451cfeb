use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GenError {
    #[error("Invalid model name `{0}`: must start with a letter and contain only letters, digits and underscores")]
    #[diagnostic(
        code(quarry_gen::invalid_model_name),
        help("Use an identifier like `User` or `blog_post`")
    )]
    InvalidModelName(String),

    #[error("Target file already exists: {}", .0.display())]
    #[diagnostic(
        code(quarry_gen::target_exists),
        help("Remove the existing file or generate into a different --path")
    )]
    TargetExists(PathBuf),

    #[error("IO error: {0}")]
    #[diagnostic(code(quarry_gen::io), help("Check file permissions and disk space"))]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
