use std::path::PathBuf;

use crate::Result;

/// Explicit storage configuration, passed into [`crate::ProjectStore`] rather
/// than read from process-wide constants so tests can point a store at a
/// temporary directory.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Root of the project tree; one subdirectory per project.
    pub base_dir: PathBuf,
    /// Declared staging area for uploads. The upload flow writes directly
    /// into the project tree, so this is never populated today.
    pub upload_dir: PathBuf,
}

impl StoreConfig {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            upload_dir: upload_dir.into(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            base_dir: PathBuf::from("./Projects"),
            upload_dir: PathBuf::from("./Uploads"),
        }
    }

    /// Create the base directory if it does not exist yet. Called once at
    /// process startup; listing treats a missing base dir as an error.
    pub fn ensure_base_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }
}
