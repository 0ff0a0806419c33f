// File: crates/annotator-core/src/error.rs
// Summary: Error taxonomy shared by asset lookup, composition, overlay and installation.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure the pipeline reports. Each variant renders as a single
/// human-readable message suitable for a dialog box.
#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("asset not found: {0}")]
    AssetNotFound(PathBuf),

    #[error("setting the desktop background is not supported on {0}")]
    UnsupportedPlatform(&'static str),

    #[error("file does not exist: {0}")]
    FileNotFound(PathBuf),

    #[error("cannot read {path} as an image: {source}")]
    InvalidImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to set {0} as desktop background")]
    InstallFailed(PathBuf),

    #[error("invalid size {width}x{height}: both dimensions must be positive")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid font size {0}: must be at least 1 pixel")]
    InvalidFontSize(u32),

    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("font asset {0} could not be loaded as a typeface")]
    InvalidFont(PathBuf),

    #[error("render error: {0}")]
    Render(&'static str),

    #[error("failed to encode wallpaper image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = AnnotatorError> = std::result::Result<T, E>;
