//! # Sitedocs Model
//!
//! Shared data model for the sitedocs project document manager: the fixed
//! document-folder layout, the upload extension allow-list, the per-project
//! metadata record, and the pure helpers (slug derivation, filename
//! sanitization) used by both the store and the HTTP layer.
//!
//! No I/O happens here.

mod filename;
mod project;

pub use filename::{allowed_extension, sanitize_filename};
pub use project::{project_slug, ProjectInfo};

/// Name of the per-project JSON metadata sidecar.
pub const PROJECT_INFO_FILE: &str = "project_info.json";

/// The sixteen document folders every project is created with, in display
/// order. The set is fixed at project creation and never changes afterwards.
pub const DOCUMENT_FOLDERS: [&str; 16] = [
    "Planning_Documents",
    "Estimate_Documents",
    "Notices",
    "Technical_Evaluation",
    "Financial_Evaluation",
    "Contract_Documents",
    "Bank_Guarantees",
    "Insurance_Documents",
    "Lab_Test_Documents",
    "Running_Bills",
    "Final_Bill",
    "WCR",
    "Date_Extension",
    "Drawing_Files",
    "Other_Details",
    "Letters",
];

/// File extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 11] = [
    "pdf", "docx", "jpg", "jpeg", "png", "xlsx", "xls", "dwg", "dxf", "kml", "kmz",
];
