//! Converts supplement records from the upstream research schema into the
//! catalog schema used by `supstack-core`, and merges them into an existing
//! supplement list.

pub mod error;
pub mod mapper;
pub mod merge;
pub mod source;

use std::path::Path;

pub use error::ConvertError;
pub use mapper::convert_supplement;
pub use merge::merge_catalog;
pub use source::SourceDocument;
pub use source::SourceSupplement;

use supstack_core::state::Item;

pub fn convert_all(records: &[SourceSupplement]) -> Vec<Item> {
    records
        .iter()
        .map(|record| {
            if record.id.is_none() {
                log::warn!(
                    "source record {:?} has no id; converting with an empty id",
                    record.name.as_deref().unwrap_or("<unnamed>")
                );
            }
            convert_supplement(record)
        })
        .collect()
}

/// Reads a file holding either one source record or an array of them.
pub fn load_source(path: &Path) -> Result<Vec<SourceSupplement>, ConvertError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: SourceDocument =
        serde_json::from_str(&raw).map_err(|source| ConvertError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let records = document.into_records();
    log::debug!("loaded {} source records from {}", records.len(), path.display());
    Ok(records)
}

pub fn write_items(path: &Path, items: &[Item]) -> Result<(), ConvertError> {
    let mut encoded = serde_json::to_string_pretty(items)?;
    encoded.push('\n');
    std::fs::write(path, encoded).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}
