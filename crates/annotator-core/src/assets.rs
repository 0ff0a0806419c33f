// File: crates/annotator-core/src/assets.rs
// Summary: Resolves logical asset names (logo, font) for packaged and source-tree runs.

use std::path::{Path, PathBuf};

use crate::error::{AnnotatorError, Result};

/// Brand logo, an RGBA PNG whose alpha channel is the paste mask.
pub const LOGO_ASSET: &str = "assets/logo.png";
/// Brand font used for notes.
pub const FONT_ASSET: &str = "assets/font.ttf";

/// Directory shipped next to the executable by a packaged distribution.
const BUNDLE_DIR: &str = "assets";

/// Maps logical names such as `assets/logo.png` to absolute paths.
///
/// The provider holds nothing but its base directory; every lookup hits the
/// filesystem again, so callers may resolve the same name repeatedly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetProvider {
    base: PathBuf,
}

impl AssetProvider {
    /// Pick the base directory from the packaged flag.
    ///
    /// Packaged: the directory holding the running executable, where the
    /// bundle extracts `assets/`. Unpackaged: this crate's source tree.
    pub fn new(running_packaged: bool) -> Self {
        let base = if running_packaged {
            executable_dir().unwrap_or_else(source_dir)
        } else {
            source_dir()
        };
        Self { base }
    }

    /// Probe the runtime and build the matching provider.
    pub fn detect() -> Self {
        Self::new(running_packaged())
    }

    /// Provider rooted at an explicit directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Absolute path of `name`, or `AssetNotFound` when nothing exists there.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = self.base.join(name);
        if path.exists() {
            log::debug!("asset '{name}' -> {}", path.display());
            Ok(path)
        } else {
            Err(AnnotatorError::AssetNotFound(path))
        }
    }

    /// Resolve `name` and read it whole.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        Ok(std::fs::read(path)?)
    }
}

impl Default for AssetProvider {
    fn default() -> Self {
        Self::detect()
    }
}

/// True when the program runs from a self-contained distribution, i.e. the
/// bundled `assets/` directory sits next to the executable.
pub fn running_packaged() -> bool {
    executable_dir()
        .map(|dir| dir.join(BUNDLE_DIR).is_dir())
        .unwrap_or(false)
}

fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}

fn source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}
