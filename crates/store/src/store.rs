use std::fs;
use std::path::PathBuf;

use sitedocs_model::{allowed_extension, sanitize_filename, ProjectInfo, PROJECT_INFO_FILE};

use crate::{Result, StoreConfig, StoreError};

/// Whether `create_project` materialized a new tree or found one already
/// present under the derived identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// One document folder and the files currently inside it, read straight from
/// the directory rather than from metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    pub name: String,
    pub files: Vec<String>,
}

/// Filesystem-backed project store. Cheap to clone; holds only paths.
#[derive(Clone, Debug)]
pub struct ProjectStore {
    config: StoreConfig,
}

impl ProjectStore {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn project_dir(&self, project_id: &str) -> PathBuf {
        self.config.base_dir.join(project_id)
    }

    /// Create a project directory with the sixteen fixed document folders and
    /// its metadata sidecar. Idempotent on the derived identifier: if the
    /// directory already exists the call is a no-op, even when a different
    /// display name normalized to the same slug.
    pub fn create_project(&self, project_name: &str) -> Result<(CreateOutcome, ProjectInfo)> {
        let info = ProjectInfo::new(project_name);
        let project_path = self.project_dir(&info.project_id);

        if project_path.exists() {
            log::info!(
                "project '{}' already exists at {}, skipping create",
                info.project_id,
                project_path.display()
            );
            return Ok((CreateOutcome::AlreadyExists, info));
        }

        fs::create_dir_all(&project_path)?;
        for folder in &info.document_folders {
            fs::create_dir(project_path.join(folder))?;
        }

        let json = serde_json::to_vec_pretty(&info)?;
        fs::write(project_path.join(PROJECT_INFO_FILE), json)?;

        log::info!(
            "created project '{}' ({}) with {} folders",
            info.project_name,
            info.project_id,
            info.document_folders.len()
        );
        Ok((CreateOutcome::Created, info))
    }

    /// Immediate subdirectories of the base directory, sorted by name. A
    /// missing base directory is an error, not an empty listing.
    pub fn list_projects(&self) -> Result<Vec<String>> {
        if !self.config.base_dir.exists() {
            return Err(StoreError::BaseDirMissing(self.config.base_dir.clone()));
        }

        let mut projects = Vec::new();
        for entry in fs::read_dir(&self.config.base_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                projects.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        projects.sort();
        Ok(projects)
    }

    /// Load a project's metadata record. Both the project directory and the
    /// sidecar file must exist.
    pub fn load_project(&self, project_id: &str) -> Result<ProjectInfo> {
        let project_path = self.project_dir(project_id);
        let info_path = project_path.join(PROJECT_INFO_FILE);
        if !project_path.exists() || !info_path.exists() {
            return Err(StoreError::ProjectNotFound(project_id.to_string()));
        }

        let bytes = fs::read(&info_path)?;
        let info: ProjectInfo = serde_json::from_slice(&bytes)?;
        Ok(info)
    }

    /// Per-folder file listing for every folder the metadata declares. The
    /// directory contents are authoritative; a declared folder missing on
    /// disk is skipped rather than reported.
    pub fn document_listing(&self, info: &ProjectInfo) -> Result<Vec<FolderListing>> {
        let project_path = self.project_dir(&info.project_id);
        let mut listing = Vec::with_capacity(info.document_folders.len());

        for folder in &info.document_folders {
            let folder_path = project_path.join(folder);
            if !folder_path.is_dir() {
                continue;
            }
            let mut files = Vec::new();
            for entry in fs::read_dir(&folder_path)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    files.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
            files.sort();
            listing.push(FolderListing {
                name: folder.clone(),
                files,
            });
        }
        Ok(listing)
    }

    /// Validate and write one uploaded document. The raw filename is checked
    /// against the allow-list, then sanitized down to a single safe path
    /// component before the write. A same-named file is overwritten.
    /// Returns the stored filename.
    pub fn save_document(
        &self,
        project_id: &str,
        folder_type: &str,
        raw_filename: &str,
        bytes: &[u8],
    ) -> Result<String> {
        if raw_filename.is_empty() {
            return Err(StoreError::InvalidFilename(raw_filename.to_string()));
        }
        if !allowed_extension(raw_filename) {
            return Err(StoreError::DisallowedExtension(raw_filename.to_string()));
        }

        // Both components come from the URL; a `..` or separator must never
        // reach the join below.
        if !is_plain_component(project_id) {
            return Err(StoreError::ProjectNotFound(project_id.to_string()));
        }
        if !is_plain_component(folder_type) {
            return Err(StoreError::FolderNotFound(folder_type.to_string()));
        }
        let folder_path = self.project_dir(project_id).join(folder_type);
        if !folder_path.is_dir() {
            return Err(StoreError::FolderNotFound(folder_type.to_string()));
        }

        let filename = sanitize_filename(raw_filename);
        if filename.is_empty() {
            return Err(StoreError::InvalidFilename(raw_filename.to_string()));
        }

        let target = folder_path.join(&filename);
        if target.exists() {
            log::warn!("overwriting existing document {}", target.display());
        }
        fs::write(&target, bytes)?;

        log::info!(
            "stored document '{filename}' in {project_id}/{folder_type} ({} bytes)",
            bytes.len()
        );
        Ok(filename)
    }

    /// Exact path of a stored document, if it exists. Every component must be
    /// a single plain path segment; traversal sequences are treated as
    /// not-found rather than resolved.
    pub fn document_path(
        &self,
        project_id: &str,
        folder_type: &str,
        filename: &str,
    ) -> Result<PathBuf> {
        for part in [project_id, folder_type, filename] {
            if !is_plain_component(part) {
                return Err(StoreError::DocumentNotFound(format!(
                    "{project_id}/{folder_type}/{filename}"
                )));
            }
        }
        let path = self.project_dir(project_id).join(folder_type).join(filename);
        if path.is_file() {
            Ok(path)
        } else {
            Err(StoreError::DocumentNotFound(format!(
                "{project_id}/{folder_type}/{filename}"
            )))
        }
    }

    /// Path of a project's metadata sidecar, if it exists.
    pub fn metadata_path(&self, project_id: &str) -> Result<PathBuf> {
        if !is_plain_component(project_id) {
            return Err(StoreError::ProjectNotFound(project_id.to_string()));
        }
        let path = self.project_dir(project_id).join(PROJECT_INFO_FILE);
        if path.is_file() {
            Ok(path)
        } else {
            Err(StoreError::ProjectNotFound(project_id.to_string()))
        }
    }
}

fn is_plain_component(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::{CreateOutcome, ProjectStore};
    use crate::{StoreConfig, StoreError};
    use pretty_assertions::assert_eq;
    use sitedocs_model::DOCUMENT_FOLDERS;
    use std::fs;
    use tempfile::tempdir;

    fn store_in(temp: &tempfile::TempDir) -> ProjectStore {
        ProjectStore::new(StoreConfig::new(
            temp.path().join("Projects"),
            temp.path().join("Uploads"),
        ))
    }

    #[test]
    fn create_materializes_folders_and_metadata() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();

        let (outcome, info) = store.create_project("Road Widening Phase 1").unwrap();
        assert_eq!(outcome, CreateOutcome::Created);
        assert_eq!(info.project_id, "road_widening_phase_1");

        let project_path = temp.path().join("Projects").join("road_widening_phase_1");
        for folder in DOCUMENT_FOLDERS {
            assert!(project_path.join(folder).is_dir(), "missing {folder}");
        }

        let loaded = store.load_project("road_widening_phase_1").unwrap();
        assert_eq!(loaded.project_name, "Road Widening Phase 1");
        assert_eq!(loaded.document_folders.len(), 16);
        assert_eq!(loaded.document_folders, info.document_folders);
    }

    #[test]
    fn create_is_idempotent() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();

        store.create_project("Bridge Repair").unwrap();
        let project_path = temp.path().join("Projects").join("bridge_repair");
        fs::write(project_path.join("Notices").join("notice.pdf"), b"x").unwrap();
        let metadata_before = fs::read(project_path.join("project_info.json")).unwrap();

        let (outcome, _) = store.create_project("Bridge Repair").unwrap();
        assert_eq!(outcome, CreateOutcome::AlreadyExists);

        // Existing content and metadata survive the second call untouched.
        assert!(project_path.join("Notices").join("notice.pdf").is_file());
        let metadata_after = fs::read(project_path.join("project_info.json")).unwrap();
        assert_eq!(metadata_before, metadata_after);
    }

    #[test]
    fn colliding_display_names_share_one_project() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();

        let (first, _) = store.create_project("Site A").unwrap();
        let (second, info) = store.create_project("site a").unwrap();
        assert_eq!(first, CreateOutcome::Created);
        assert_eq!(second, CreateOutcome::AlreadyExists);
        assert_eq!(info.project_id, "site_a");

        // The original display name wins; the second create wrote nothing.
        let loaded = store.load_project("site_a").unwrap();
        assert_eq!(loaded.project_name, "Site A");
    }

    #[test]
    fn list_projects_requires_base_dir() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);

        match store.list_projects() {
            Err(StoreError::BaseDirMissing(path)) => {
                assert_eq!(path, temp.path().join("Projects"));
            }
            other => panic!("expected BaseDirMissing, got {other:?}"),
        }

        store.config().ensure_base_dir().unwrap();
        assert_eq!(store.list_projects().unwrap(), Vec::<String>::new());

        store.create_project("B Project").unwrap();
        store.create_project("A Project").unwrap();
        assert_eq!(store.list_projects().unwrap(), vec!["a_project", "b_project"]);
    }

    #[test]
    fn load_project_requires_metadata_sidecar() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();

        assert!(matches!(
            store.load_project("nope"),
            Err(StoreError::ProjectNotFound(_))
        ));

        // Directory present but sidecar missing is still not-found.
        fs::create_dir_all(temp.path().join("Projects").join("bare")).unwrap();
        assert!(matches!(
            store.load_project("bare"),
            Err(StoreError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn upload_then_read_back_is_byte_identical() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        store.create_project("Docs").unwrap();

        let body = b"%PDF-1.4 fake report".to_vec();
        let stored = store
            .save_document("docs", "Running_Bills", "report.pdf", &body)
            .unwrap();
        assert_eq!(stored, "report.pdf");

        let path = store.document_path("docs", "Running_Bills", "report.pdf").unwrap();
        assert_eq!(fs::read(path).unwrap(), body);
    }

    #[test]
    fn upload_rejects_disallowed_extension() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        let (_, info) = store.create_project("Docs").unwrap();

        let err = store
            .save_document("docs", "Other_Details", "malware.exe", b"MZ")
            .unwrap_err();
        assert!(matches!(err, StoreError::DisallowedExtension(_)));

        // The folder listing is unchanged.
        let listing = store.document_listing(&info).unwrap();
        let other = listing.iter().find(|f| f.name == "Other_Details").unwrap();
        assert_eq!(other.files, Vec::<String>::new());
    }

    #[test]
    fn upload_rejects_unknown_folder_and_empty_name() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        store.create_project("Docs").unwrap();

        assert!(matches!(
            store.save_document("docs", "Not_A_Folder", "a.pdf", b"x"),
            Err(StoreError::FolderNotFound(_))
        ));
        assert!(matches!(
            store.save_document("docs", "Notices", "", b"x"),
            Err(StoreError::InvalidFilename(_))
        ));
    }

    #[test]
    fn upload_sanitizes_traversal_attempts() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        store.create_project("Docs").unwrap();

        let stored = store
            .save_document("docs", "Letters", "../../escape.pdf", b"x")
            .unwrap();
        assert_eq!(stored, "escape.pdf");

        let folder = temp.path().join("Projects").join("docs").join("Letters");
        assert!(folder.join("escape.pdf").is_file());
        assert!(!temp.path().join("escape.pdf").exists());
    }

    #[test]
    fn upload_overwrites_same_named_file() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        store.create_project("Docs").unwrap();

        store.save_document("docs", "Final_Bill", "bill.pdf", b"v1").unwrap();
        store.save_document("docs", "Final_Bill", "bill.pdf", b"v2").unwrap();

        let path = store.document_path("docs", "Final_Bill", "bill.pdf").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"v2");
    }

    #[test]
    fn document_path_for_missing_file_is_not_found() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        store.create_project("Docs").unwrap();

        assert!(matches!(
            store.document_path("docs", "Notices", "missing.pdf"),
            Err(StoreError::DocumentNotFound(_))
        ));
        assert!(matches!(
            store.metadata_path("ghost"),
            Err(StoreError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn save_document_refuses_traversal_folder_types() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        store.create_project("Docs").unwrap();

        // `..` resolves to the base directory, `../..` escapes it, and the
        // empty string lands beside project_info.json; all must be rejected
        // before the join.
        for folder_type in ["..", "../..", ".", "", "Notices/../.."] {
            let err = store
                .save_document("docs", folder_type, "escape.pdf", b"x")
                .unwrap_err();
            assert!(
                matches!(err, StoreError::FolderNotFound(_)),
                "folder_type {folder_type:?} was not rejected: {err:?}"
            );
        }
        assert!(matches!(
            store.save_document("../docs", "Notices", "escape.pdf", b"x"),
            Err(StoreError::ProjectNotFound(_))
        ));

        assert!(!temp.path().join("escape.pdf").exists());
        assert!(!temp.path().join("Projects").join("escape.pdf").exists());
        assert!(!temp
            .path()
            .join("Projects")
            .join("docs")
            .join("escape.pdf")
            .exists());
    }

    #[test]
    fn document_path_refuses_traversal_components() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        store.create_project("Docs").unwrap();

        assert!(matches!(
            store.document_path("docs", "..", "project_info.json"),
            Err(StoreError::DocumentNotFound(_))
        ));
        assert!(matches!(
            store.document_path("docs", "Notices", "../project_info.json"),
            Err(StoreError::DocumentNotFound(_))
        ));
        assert!(matches!(
            store.metadata_path("../docs"),
            Err(StoreError::ProjectNotFound(_))
        ));
    }

    #[test]
    fn listing_skips_folders_missing_on_disk() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        store.config().ensure_base_dir().unwrap();
        let (_, info) = store.create_project("Docs").unwrap();

        fs::remove_dir(temp.path().join("Projects").join("docs").join("WCR")).unwrap();
        let listing = store.document_listing(&info).unwrap();
        assert_eq!(listing.len(), 15);
        assert!(listing.iter().all(|f| f.name != "WCR"));
    }
}
