//! Choosing the file to import.
//!
//! [`crate::DiagramImporter::import_file`] asks a [`SourceSelector`] for the
//! path to read. An interactive host implements it with a file dialog that
//! offers [`IMPORT_FILTERS`], with [`JSON_FILTER`] preselected and
//! [`ALL_FILES_FILTER`] as the fallback; returning `None` means the user
//! cancelled and nothing is imported. [`PathSelector`] always answers with a fixed path.

use std::path::{Path, PathBuf};

/// A file-type filter offered by a selection dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    /// Human-readable description, e.g. `JSON files (*.json)`.
    pub description: &'static str,
    /// Accepted extensions without the leading dot. `*` accepts any file.
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    /// Returns true if `path` has one of the accepted extensions, ignoring case.
    pub fn matches(&self, path: &Path) -> bool {
        if self.extensions.contains(&"*") {
            return path.file_name().is_some();
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }
}

/// The filter for diagram descriptions.
pub const JSON_FILTER: FileFilter = FileFilter {
    description: "JSON files (*.json)",
    extensions: &["json"],
};

/// The fallback filter that shows every file.
pub const ALL_FILES_FILTER: FileFilter = FileFilter {
    description: "All files (*.*)",
    extensions: &["*"],
};

/// The filters offered when choosing a file to import, default first.
pub const IMPORT_FILTERS: &[FileFilter] = &[JSON_FILTER, ALL_FILES_FILTER];

/// Supplies the path of the file to import.
pub trait SourceSelector {
    /// Returns the chosen path, or `None` if the selection was cancelled.
    ///
    /// `filters` lists the filters to offer; the first one is the default.
    fn select(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// A selector that always returns the same path.
#[derive(Debug, Clone)]
pub struct PathSelector {
    path: PathBuf,
}

impl PathSelector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SourceSelector for PathSelector {
    fn select(&mut self, _filters: &[FileFilter]) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}

impl<F> SourceSelector for F
where
    F: FnMut(&[FileFilter]) -> Option<PathBuf>,
{
    fn select(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        self(filters)
    }
}
