use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::error::StoreError;

/// Stored form of one stack entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStackEntry {
    pub supplement_id: String,
    pub multiplier: f64,
}

/// Durable home of the user's stack: a single JSON array rewritten after
/// every mutation.
#[derive(Debug)]
pub struct StackStore {
    path: PathBuf,
}

impl StackStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or blank file is an empty stack.
    pub fn load(&self) -> Result<Vec<PersistedStackEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, entries: &[PersistedStackEntry]) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(entries)?;
        write_private(&self.path, &encoded)?;
        log::debug!(
            "saved {} stack entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}
