// File: crates/annotator-core/src/selection.rs
// Summary: Glue for the UI's file dialogs: filters, cancelled selections, default save extension.

use std::path::{Path, PathBuf};

/// Filters offered by the "browse for image" dialog, as (label, patterns).
pub const IMAGE_FILE_FILTERS: &[(&str, &str)] = &[
    ("Image files", "*.png;*.jpg;*.jpeg;*.bmp;*.gif"),
    ("All files", "*.*"),
];

/// Extension added by the save dialog when the user typed none.
pub const DEFAULT_SAVE_EXTENSION: &str = "png";

/// Result of an open-file dialog. Empty means the user cancelled, which is
/// not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection(Vec<PathBuf>);

impl Selection {
    /// Drops the empty entries some dialog backends return on cancel.
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self(paths.into_iter().filter(|p| !p.as_os_str().is_empty()).collect())
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_empty()
    }

    /// The image to load when several were picked.
    pub fn first(&self) -> Option<&Path> {
        self.0.first().map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }
}

/// Save-dialog result with `.png` appended when no extension was given.
/// `None` (cancelled) stays `None`.
pub fn with_default_extension(chosen: Option<PathBuf>) -> Option<PathBuf> {
    let mut path = chosen.filter(|p| !p.as_os_str().is_empty())?;
    if path.extension().is_none() {
        path.set_extension(DEFAULT_SAVE_EXTENSION);
    }
    Some(path)
}
