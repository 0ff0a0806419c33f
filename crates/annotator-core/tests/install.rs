// File: crates/annotator-core/tests/install.rs
// Purpose: Wallpaper installation state machine (temp file lifecycle, failures, platform gate) and saving.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use annotator_core::theme::BRAND_BLUE;
use annotator_core::{
    save, AnnotatorError, Canvas, InstallerOptions, WallpaperApi, WallpaperInstaller, WallpaperSource,
};
use image::{ColorType, DynamicImage, Rgba, RgbaImage};

/// What the fake OS saw during one call.
#[derive(Clone, Debug)]
struct Call {
    path: PathBuf,
    existed: bool,
    color: Option<ColorType>,
}

struct FakeApi {
    supported: bool,
    succeed: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    fn new(supported: bool, succeed: bool) -> Self {
        Self { supported, succeed, calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl WallpaperApi for FakeApi {
    fn platform(&self) -> &'static str {
        "fake-os"
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn set_desktop_wallpaper(&self, path: &Path) -> bool {
        let color = image::open(path).ok().map(|img| img.color());
        self.calls.lock().unwrap().push(Call { path: path.to_path_buf(), existed: path.is_file(), color });
        self.succeed
    }
}

fn installer(api: FakeApi, temp_dir: &Path) -> WallpaperInstaller<FakeApi> {
    WallpaperInstaller::with_options(api, InstallerOptions { temp_dir: Some(temp_dir.to_path_buf()) })
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

fn canvas() -> Canvas {
    Canvas::filled((64, 48), BRAND_BLUE).unwrap()
}

#[test]
fn canvas_install_removes_temp_file_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let inst = installer(FakeApi::new(true, true), dir.path());

    let c = canvas();
    let path = inst.install(&c).expect("install");

    let calls = inst.api().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, path, "returned path is the one handed to the OS");
    assert!(calls[0].existed, "file must exist while the OS reads it");
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("bmp"));
    assert!(path.starts_with(dir.path()));
    assert!(!path.exists(), "temp file must be gone after install");
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn canvas_install_removes_temp_file_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let inst = installer(FakeApi::new(true, false), dir.path());

    let err = inst.install(WallpaperSource::Canvas(&canvas())).unwrap_err();
    let calls = inst.api().calls();
    assert_eq!(calls.len(), 1);
    match err {
        AnnotatorError::InstallFailed(p) => assert_eq!(p, calls[0].path),
        other => panic!("expected InstallFailed, got {other:?}"),
    }
    assert!(!calls[0].path.exists());
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn rgba_canvas_is_flattened_to_rgb_bmp() {
    let dir = tempfile::tempdir().unwrap();
    let inst = installer(FakeApi::new(true, true), dir.path());
    let img = RgbaImage::from_pixel(10, 10, Rgba([200, 10, 10, 60]));
    let c = Canvas::from_image(DynamicImage::ImageRgba8(img)).unwrap();

    inst.install(&c).unwrap();
    assert_eq!(inst.api().calls()[0].color, Some(ColorType::Rgb8));
}

#[test]
fn file_install_keeps_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("mine.png");
    save(&canvas(), &file).unwrap();

    let inst = installer(FakeApi::new(true, true), dir.path());
    let installed = inst.install(&file).expect("install from file");
    assert_eq!(installed, file);
    assert!(file.is_file(), "externally supplied files are never deleted");

    // Failure does not delete it either.
    let failing = installer(FakeApi::new(true, false), dir.path());
    assert!(matches!(failing.install(&file), Err(AnnotatorError::InstallFailed(_))));
    assert!(file.is_file());
}

#[test]
fn missing_file_fails_without_os_call() {
    let dir = tempfile::tempdir().unwrap();
    let inst = installer(FakeApi::new(true, true), dir.path());

    let err = inst.install(Path::new("/nonexistent/file.png")).unwrap_err();
    assert!(matches!(err, AnnotatorError::FileNotFound(ref p) if p.ends_with("nonexistent/file.png")));
    assert!(inst.api().calls().is_empty());

    // A directory is not a regular file.
    let err = inst.install(dir.path()).unwrap_err();
    assert!(matches!(err, AnnotatorError::FileNotFound(_)));
    assert!(inst.api().calls().is_empty());
}

#[test]
fn unsupported_platform_fails_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let inst = installer(FakeApi::new(false, true), dir.path());

    let err = inst.install(&canvas()).unwrap_err();
    assert!(matches!(err, AnnotatorError::UnsupportedPlatform("fake-os")));
    // Even a missing path reports the platform first.
    let err = inst.install(Path::new("/nonexistent/file.png")).unwrap_err();
    assert!(matches!(err, AnnotatorError::UnsupportedPlatform(_)));

    assert_eq!(entries(dir.path()), 0, "no temporary file may be created");
    assert!(inst.api().calls().is_empty());
}

#[cfg(not(windows))]
#[test]
fn system_installer_is_unsupported_off_windows() {
    let dir = tempfile::tempdir().unwrap();
    let inst = WallpaperInstaller::with_options(
        annotator_core::SystemWallpaperApi,
        InstallerOptions { temp_dir: Some(dir.path().to_path_buf()) },
    );
    assert!(matches!(inst.install(&canvas()), Err(AnnotatorError::UnsupportedPlatform(_))));
    assert!(matches!(annotator_core::install(&canvas()), Err(AnnotatorError::UnsupportedPlatform(_))));
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn concurrent_installs_use_distinct_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let inst = installer(FakeApi::new(true, true), dir.path());
    let c = canvas();

    let paths: Vec<PathBuf> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| inst.install(&c).unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut unique = paths.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 4);
    assert!(inst.api().calls().iter().all(|call| call.existed));
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn save_writes_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let c = canvas();
    let before = c.clone();

    for name in ["note.png", "note.bmp", "note.jpg"] {
        let path = dir.path().join(name);
        save(&c, &path).unwrap_or_else(|e| panic!("{name}: {e}"));
        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (64, 48), "{name}");
    }
    let png = image::open(dir.path().join("note.png")).unwrap();
    assert_eq!(png.to_rgb8().as_raw(), c.to_rgb().as_raw(), "PNG is lossless");
    assert_eq!(c, before);
}

#[test]
fn save_errors_come_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let err = save(&canvas(), dir.path().join("missing-dir/note.png")).unwrap_err();
    assert!(matches!(err, image::ImageError::IoError(_)), "got {err:?}");

    let err = save(&canvas(), dir.path().join("note.unknown")).unwrap_err();
    assert!(matches!(err, image::ImageError::Unsupported(_)), "got {err:?}");
}
