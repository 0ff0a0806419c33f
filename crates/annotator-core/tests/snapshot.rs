// File: crates/annotator-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow for the default background.
// Behavior:
// - Renders the default background at a small size to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use annotator_core::{create_default, save, AssetProvider};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn render_bytes() -> Vec<u8> {
    // No text: glyph rasterization differs across Skia builds.
    let canvas = create_default(&AssetProvider::new(false), (480, 270), 25, 100).expect("default background");
    let tmp = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("default_background_tmp.png");
    save(&canvas, &tmp).expect("save tmp png");
    std::fs::read(tmp).expect("read tmp png")
}

#[test]
fn golden_default_background() {
    let bytes = render_bytes();
    let snap_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/default_background.png");

    if bless_mode() {
        if let Some(parent) = snap_path.parent() { std::fs::create_dir_all(parent).expect("create snapshots dir"); }
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgb8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgb8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
