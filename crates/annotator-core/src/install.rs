// File: crates/annotator-core/src/install.rs
// Summary: Desktop wallpaper installation (temporary BMP lifecycle + OS call) and saving to disk.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tempfile::TempPath;

use crate::canvas::Canvas;
use crate::error::{AnnotatorError, Result};
use crate::paths;

/// Name prefix of temporary wallpaper files.
pub const TEMP_PREFIX: &str = "bob-wallpaper-";

/// What to install: an in-memory canvas or an image file that already exists.
#[derive(Clone, Copy, Debug)]
pub enum WallpaperSource<'a> {
    Canvas(&'a Canvas),
    File(&'a Path),
}

impl<'a> From<&'a Canvas> for WallpaperSource<'a> {
    fn from(canvas: &'a Canvas) -> Self {
        WallpaperSource::Canvas(canvas)
    }
}

impl<'a> From<&'a Path> for WallpaperSource<'a> {
    fn from(path: &'a Path) -> Self {
        WallpaperSource::File(path)
    }
}

impl<'a> From<&'a PathBuf> for WallpaperSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        WallpaperSource::File(path.as_path())
    }
}

/// The platform call that changes the desktop background.
pub trait WallpaperApi {
    /// Platform name reported by `UnsupportedPlatform`.
    fn platform(&self) -> &'static str {
        std::env::consts::OS
    }

    fn is_supported(&self) -> bool;

    /// Make the image at `path` (absolute) the wallpaper, persist it in the
    /// user's settings and notify the running desktop. `false` on failure.
    fn set_desktop_wallpaper(&self, path: &Path) -> bool;
}

/// `SystemParametersInfoW` on Windows; unsupported everywhere else.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemWallpaperApi;

impl WallpaperApi for SystemWallpaperApi {
    fn is_supported(&self) -> bool {
        cfg!(windows)
    }

    fn set_desktop_wallpaper(&self, path: &Path) -> bool {
        platform::set_desktop_wallpaper(path)
    }
}

#[cfg(windows)]
mod platform {
    use std::ffi::c_void;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;

    use windows_sys::Win32::UI::WindowsAndMessaging::{
        SystemParametersInfoW, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SPI_SETDESKWALLPAPER,
    };

    pub fn set_desktop_wallpaper(path: &Path) -> bool {
        let mut wide: Vec<u16> = path.as_os_str().encode_wide().chain(std::iter::once(0)).collect();
        // SAFETY: `wide` is a NUL-terminated UTF-16 string that outlives the call.
        let ok = unsafe {
            SystemParametersInfoW(
                SPI_SETDESKWALLPAPER,
                0,
                wide.as_mut_ptr().cast::<c_void>(),
                SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
            )
        };
        ok != 0
    }
}

#[cfg(not(windows))]
mod platform {
    use std::path::Path;

    pub fn set_desktop_wallpaper(_path: &Path) -> bool {
        false
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallerOptions {
    /// Where temporary wallpaper files go; the OS temp directory when `None`.
    pub temp_dir: Option<PathBuf>,
}

/// Installs canvases or image files as the desktop background.
///
/// Holds no mutable state: concurrent `install` calls each get their own
/// uniquely named temporary file.
#[derive(Clone, Debug, Default)]
pub struct WallpaperInstaller<A = SystemWallpaperApi> {
    api: A,
    options: InstallerOptions,
}

impl WallpaperInstaller<SystemWallpaperApi> {
    pub fn system() -> Self {
        Self::new(SystemWallpaperApi)
    }
}

impl<A: WallpaperApi> WallpaperInstaller<A> {
    pub fn new(api: A) -> Self {
        Self::with_options(api, InstallerOptions::default())
    }

    pub fn with_options(api: A, options: InstallerOptions) -> Self {
        Self { api, options }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Make `source` the desktop background and return the path given to the
    /// OS.
    ///
    /// A canvas is flattened to RGB and written to a temporary BMP, which is
    /// removed again once the OS call returns, whatever it reported; the
    /// returned path then no longer exists. A file source is expanded (`~`),
    /// made absolute and must be an existing regular file; it is never deleted.
    ///
    /// Errors: `UnsupportedPlatform` (checked before any file I/O),
    /// `FileNotFound`, `InstallFailed`, and `Encode`/`Io` while writing the
    /// temporary file.
    pub fn install<'a>(&self, source: impl Into<WallpaperSource<'a>>) -> Result<PathBuf> {
        if !self.api.is_supported() {
            return Err(AnnotatorError::UnsupportedPlatform(self.api.platform()));
        }
        match source.into() {
            WallpaperSource::Canvas(canvas) => {
                let temp = self.write_temp(canvas)?;
                let path = temp.to_path_buf();
                let applied = self.apply(&path);
                if let Err(err) = temp.close() {
                    log::warn!("could not remove temporary wallpaper {}: {err}", path.display());
                }
                applied.map(|()| path)
            }
            WallpaperSource::File(file) => {
                let path = paths::normalize(file);
                if !path.is_file() {
                    return Err(AnnotatorError::FileNotFound(path));
                }
                self.apply(&path)?;
                Ok(path)
            }
        }
    }

    fn write_temp(&self, canvas: &Canvas) -> Result<TempPath> {
        let dir = self.options.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
        let file = tempfile::Builder::new().prefix(TEMP_PREFIX).suffix(".bmp").tempfile_in(&dir)?;
        {
            let mut writer = BufWriter::new(file.as_file());
            canvas.to_rgb().write_to(&mut writer, ImageFormat::Bmp)?;
            writer.flush()?;
        }
        log::debug!("wrote temporary wallpaper {}", file.path().display());
        // Closes our handle so the OS can open the file; deletion stays with TempPath.
        Ok(file.into_temp_path())
    }

    fn apply(&self, path: &Path) -> Result<()> {
        if self.api.set_desktop_wallpaper(path) {
            log::info!("desktop background set to {}", path.display());
            Ok(())
        } else {
            Err(AnnotatorError::InstallFailed(path.to_path_buf()))
        }
    }
}

/// Install with the platform's own wallpaper call.
pub fn install<'a>(source: impl Into<WallpaperSource<'a>>) -> Result<PathBuf> {
    WallpaperInstaller::system().install(source)
}

/// Write `canvas` to `path`, format chosen by the extension. Errors come back
/// exactly as the encoder reported them.
pub fn save(canvas: &Canvas, path: impl AsRef<Path>) -> image::ImageResult<()> {
    let path = path.as_ref();
    match ImageFormat::from_path(path)? {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg => canvas.to_rgb().save_with_format(path, ImageFormat::Jpeg),
        format => canvas.as_image().save_with_format(path, format),
    }
}
