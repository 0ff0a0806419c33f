// File: crates/annotator-core/build.rs
// Summary: Build script to link required Windows system libraries for Skia/ICU and the wallpaper call.

fn main() {
    // Build scripts run on the host, so ask Cargo about the target instead of using cfg!.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // Needed for RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
        // SystemParametersInfoW
        println!("cargo:rustc-link-lib=user32");
    }
}
