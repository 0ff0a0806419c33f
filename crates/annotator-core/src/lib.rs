// File: crates/annotator-core/src/lib.rs
// Summary: Core library entry point; exports the composition, overlay and wallpaper API.

pub mod assets;
pub mod background;
pub mod canvas;
pub mod error;
pub mod install;
pub mod paths;
pub mod selection;
pub mod text;
pub mod theme;

pub use assets::{running_packaged, AssetProvider, FONT_ASSET, LOGO_ASSET};
pub use background::{create_default, fit_preview, resize, resize_in_place, DefaultBackground, Resize};
pub use canvas::{Canvas, ColorMode, Size};
pub use error::{AnnotatorError, Result};
pub use install::{install, save, InstallerOptions, SystemWallpaperApi, WallpaperApi, WallpaperInstaller, WallpaperSource};
pub use selection::{with_default_extension, Selection, IMAGE_FILE_FILTERS};
pub use text::{add_text, parse_hex_color, refresh_preview, NoteStyle, Position, TextRenderer};
