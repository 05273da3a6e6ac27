//! # Sitedocs Store
//!
//! Filesystem-backed project storage. The directory tree under the configured
//! base directory is the sole datastore:
//!
//! ```text
//! base_dir/
//!     <project_id>/
//!         project_info.json
//!         Planning_Documents/
//!         Contract_Documents/
//!         ... (16 fixed folders)
//! ```
//!
//! The metadata sidecar is advisory; directory enumeration is authoritative
//! for listings. There is no cross-operation transaction: a reader can
//! observe a partially created project while `create_project` is mid-flight.
//!
//! ## Example
//!
//! ```no_run
//! use sitedocs_store::{ProjectStore, StoreConfig};
//!
//! fn main() -> sitedocs_store::Result<()> {
//!     let store = ProjectStore::new(StoreConfig::with_defaults());
//!     let (outcome, info) = store.create_project("Road Widening Phase 1")?;
//!     println!("{outcome:?}: {}", info.project_id);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::{CreateOutcome, FolderListing, ProjectStore};
