use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Project directory does not exist: {0}")]
    BaseDirMissing(PathBuf),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid folder type: {0}")]
    FolderNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("File type not allowed: {0}")]
    DisallowedExtension(String),
}
