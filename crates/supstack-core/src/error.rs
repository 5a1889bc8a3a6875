use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported catalog format: {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("duplicate supplement id in catalog: {0}")]
    DuplicateItem(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("stack storage i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("stack storage is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    #[error("Your stack is empty!")]
    EmptyStack,
}
