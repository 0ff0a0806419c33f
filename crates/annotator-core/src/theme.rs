// File: crates/annotator-core/src/theme.rs
// Summary: Brand colors and the default look of a fresh annotation.

use image::Rgb;

/// Fill color of the default background (#1E64C8).
pub const BRAND_BLUE: Rgb<u8> = Rgb([0x1E, 0x64, 0xC8]);

/// Default note color (#FFFFFF).
pub const NOTE_WHITE: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Default note font size in pixels.
pub const NOTE_FONT_SIZE: u32 = 100;

/// Screen size assumed when the caller does not know the real one.
pub const DEFAULT_SCREEN: (u32, u32) = (1920, 1080);
/// Gap between the logo and the top/right screen edges, in pixels.
pub const LOGO_MARGIN: u32 = 100;
/// Rendered logo width, in pixels.
pub const LOGO_WIDTH: u32 = 400;

/// Format a color as `#RRGGBB`.
pub fn to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_blue_hex() {
        assert_eq!(to_hex(BRAND_BLUE), "#1E64C8");
        assert_eq!(to_hex(NOTE_WHITE), "#FFFFFF");
    }
}
