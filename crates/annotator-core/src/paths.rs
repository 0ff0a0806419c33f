// File: crates/annotator-core/src/paths.rs
// Summary: User path normalization (home expansion, absolutization).

use std::path::{Component, Path, PathBuf};

/// Replace a leading `~` component with the user's home directory.
/// Paths without one, or systems without a home directory, are returned as-is.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Expand `~` and anchor relative paths at the working directory.
/// Symlinks are left alone and no verbatim (`\\?\`) prefix is produced, so the
/// result can be handed to OS calls that reject extended-length paths.
pub fn normalize(path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    std::path::absolute(&expanded).unwrap_or(expanded)
}
