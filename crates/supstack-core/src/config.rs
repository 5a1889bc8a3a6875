use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::export::DEFAULT_EXPORT_FILE_NAME;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Alternate catalog document; the bundled dataset is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}
