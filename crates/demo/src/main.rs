// File: crates/demo/src/main.rs
// Summary: Demo drives the whole pipeline: base image (default or file) -> note overlay -> PNG/preview -> optional wallpaper.

use anyhow::{Context, Result};
use annotator_core::theme::to_hex;
use annotator_core::{
    fit_preview, refresh_preview, save, with_default_extension, AssetProvider, Canvas, DefaultBackground, NoteStyle,
    Position, Selection, TextRenderer, WallpaperInstaller,
};
use std::path::{Path, PathBuf};

/// Size of the preview pane in the desktop app.
const PREVIEW_AREA: (u32, u32) = (650, 350);

struct Args {
    note: String,
    base: Option<PathBuf>,
    out: Option<PathBuf>,
    set_wallpaper: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1));
    let assets = AssetProvider::detect();
    println!("Assets from: {}", assets.base().display());

    let base = load_base(&assets, args.base.as_deref())?;
    println!("Base canvas: {}x{}", base.width(), base.height());

    let renderer = TextRenderer::from_assets(&assets).context("loading brand font")?;
    let style = NoteStyle::new(args.note.clone()).with_position(Position::new(50.0, 50.0));
    let origin = style.position.to_pixels(base.size());
    log::info!("note {:?} at {origin:?}, {}px {}", style.text, style.font_size, to_hex(style.color));
    let annotated = refresh_preview(&renderer, &base, &style)?;

    let out = with_default_extension(args.out.clone()).unwrap_or_else(|| out_path("annotated.png"));
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    save(&annotated, &out).with_context(|| format!("saving '{}'", out.display()))?;
    println!("Wrote {}", out.display());

    let preview = fit_preview(&annotated, PREVIEW_AREA)?;
    let preview_out = out_path("preview.png");
    save(&preview, &preview_out).with_context(|| format!("saving '{}'", preview_out.display()))?;
    println!("Wrote {} ({}x{})", preview_out.display(), preview.width(), preview.height());

    if args.set_wallpaper {
        // On failure the previous wallpaper stays; report and keep the saved file.
        match WallpaperInstaller::system().install(&annotated) {
            Ok(path) => println!("Desktop background set (via {})", path.display()),
            Err(err) => {
                log::error!("{err}");
                anyhow::bail!("could not set the desktop background: {err}");
            }
        }
    }

    Ok(())
}

/// Positional: NOTE [BASE_IMAGE] [OUT]; flag: --set-wallpaper. A literal `\n`
/// in NOTE becomes a line break; BASE_IMAGE `-` means the default background.
fn parse_args(raw: impl Iterator<Item = String>) -> Args {
    let mut set_wallpaper = false;
    let mut positional = Vec::new();
    for arg in raw {
        if arg == "--set-wallpaper" {
            set_wallpaper = true;
        } else {
            positional.push(arg);
        }
    }
    let mut positional = positional.into_iter();
    let note = positional.next().unwrap_or_else(|| "Buy milk".to_string()).replace("\\n", "\n");
    let base = Selection::new(positional.next().filter(|p| p != "-").map(PathBuf::from));
    let out = positional.next().map(PathBuf::from);
    Args { note, base: base.first().map(Path::to_path_buf), out, set_wallpaper }
}

fn load_base(assets: &AssetProvider, path: Option<&Path>) -> Result<Canvas> {
    match path {
        Some(p) => Canvas::open(p).with_context(|| format!("loading base image '{}'", p.display())),
        None => DefaultBackground::default().compose(assets).context("creating default background"),
    }
}

fn out_path(name: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(name);
    out
}
