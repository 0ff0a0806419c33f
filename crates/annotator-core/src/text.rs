// File: crates/annotator-core/src/text.rs
// Summary: Note overlay; shapes text with Skia textlayout and paints it onto a copy of a canvas.

use image::{DynamicImage, Rgb, RgbaImage};
use skia::textlayout::{
    FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle, TypefaceFontProvider,
};
use skia_safe as skia;

use crate::assets::{AssetProvider, FONT_ASSET};
use crate::canvas::{Canvas, ColorMode, Size};
use crate::error::{AnnotatorError, Result};
use crate::theme;

/// Alias the brand typeface is registered under.
const BRAND_FAMILY: &str = "Brand";

/// Layout width handed to Skia. Lines only break at '\n'; anything wider than
/// the canvas is clipped by the surface.
const NO_WRAP_WIDTH: f32 = 1.0e6;

/// Text anchor expressed in percent (0–100) of the canvas width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x_percent: f64,
    y_percent: f64,
}

impl Position {
    /// Percentages outside 0–100 are clamped; NaN counts as 0.
    pub fn new(x_percent: f64, y_percent: f64) -> Self {
        Self { x_percent: clamp_percent(x_percent), y_percent: clamp_percent(y_percent) }
    }

    /// Percent position of pixel (x, y) on a canvas of `size`.
    pub fn from_pixels(x: u32, y: u32, size: Size) -> Self {
        Self::new(
            x as f64 * 100.0 / size.width.max(1) as f64,
            y as f64 * 100.0 / size.height.max(1) as f64,
        )
    }

    pub fn x_percent(&self) -> f64 {
        self.x_percent
    }

    pub fn y_percent(&self) -> f64 {
        self.y_percent
    }

    /// Absolute pixel anchor on a canvas of `size`.
    pub fn to_pixels(&self, size: Size) -> (i32, i32) {
        let x = (self.x_percent / 100.0 * size.width as f64).round() as i32;
        let y = (self.y_percent / 100.0 * size.height as f64).round() as i32;
        (x, y)
    }
}

impl Default for Position {
    /// Where a fresh note starts: (500, 200) on the default 1920x1080 screen.
    fn default() -> Self {
        let (w, h) = theme::DEFAULT_SCREEN;
        Self::from_pixels(500, 200, Size::new(w, h))
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

/// Everything the UI knows about the note being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteStyle {
    pub text: String,
    pub position: Position,
    /// Font size in pixels; must be positive.
    pub font_size: u32,
    pub color: Rgb<u8>,
}

impl Default for NoteStyle {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: Position::default(),
            font_size: theme::NOTE_FONT_SIZE,
            color: theme::NOTE_WHITE,
        }
    }
}

impl NoteStyle {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color_hex(mut self, hex: &str) -> Result<Self> {
        self.color = parse_hex_color(hex)?;
        Ok(self)
    }
}

/// Parse `#RRGGBB` or `#RGB` (the `#` is optional).
pub fn parse_hex_color(hex: &str) -> Result<Rgb<u8>> {
    let invalid = || AnnotatorError::InvalidColor(hex.to_string());
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        6 => Ok(Rgb([channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?])),
        3 => {
            let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            Ok(Rgb([short(0)?, short(1)?, short(2)?]))
        }
        _ => Err(invalid()),
    }
}

/// Paragraph renderer bound to the brand font.
pub struct TextRenderer {
    fonts: FontCollection,
}

impl TextRenderer {
    /// Load the brand font through `assets`.
    pub fn from_assets(assets: &AssetProvider) -> Result<Self> {
        let path = assets.resolve(FONT_ASSET)?;
        let data = std::fs::read(&path)?;
        Self::from_font_data(&data).ok_or(AnnotatorError::InvalidFont(path))
    }

    /// Build from raw TrueType/OpenType bytes; `None` if Skia rejects them.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let typeface = skia::FontMgr::default().new_from_data(data, None)?;
        log::debug!("brand typeface '{}' loaded", typeface.family_name());

        let mut provider = TypefaceFontProvider::new();
        provider.register_typeface(typeface, Some(BRAND_FAMILY));
        let manager: skia::FontMgr = provider.into();

        let mut fonts = FontCollection::new();
        fonts.set_asset_font_manager(Some(manager));
        // Only the brand font; no system fallback differences between machines.
        fonts.disable_font_fallback();
        Some(Self { fonts })
    }

    fn layout(&self, text: &str, size: f32, color: Rgb<u8>) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut style = TextStyle::new();
        style.set_font_families(&[BRAND_FAMILY]);
        style.set_font_size(size);
        let [r, g, b] = color.0;
        style.set_color(skia::Color::from_rgb(r, g, b));

        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(NO_WRAP_WIDTH);
        paragraph
    }

    /// Height of the laid-out block; one font line height per text line.
    pub fn measure_height(&self, text: &str, font_size: u32) -> f32 {
        self.layout(&normalize_newlines(text), font_size as f32, theme::NOTE_WHITE).height()
    }

    /// Width of the longest line.
    pub fn measure_width(&self, text: &str, font_size: u32) -> f32 {
        self.layout(&normalize_newlines(text), font_size as f32, theme::NOTE_WHITE).longest_line()
    }

    /// Copy of `canvas` with `text` painted at `origin` (top-left of the first
    /// line, absolute pixels). The input canvas is never touched and keeps its
    /// color mode in the result.
    pub fn draw(
        &self,
        canvas: &Canvas,
        text: &str,
        origin: (i32, i32),
        font_size: u32,
        color: Rgb<u8>,
    ) -> Result<Canvas> {
        if font_size == 0 {
            return Err(AnnotatorError::InvalidFontSize(font_size));
        }
        if text.is_empty() {
            return Ok(canvas.clone());
        }

        let Size { width, height } = canvas.size();
        let dims = (width as i32, height as i32);
        // Unpremul on both transfers so RGBA canvases survive the round trip.
        let info = skia::ImageInfo::new(dims, skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = width as usize * 4;

        let mut surface = skia::surfaces::raster_n32_premul(dims)
            .ok_or(AnnotatorError::Render("failed to create raster surface"))?;
        let sk_canvas = surface.canvas();
        if !sk_canvas.write_pixels(&info, canvas.to_rgba().as_raw(), row_bytes, (0, 0)) {
            return Err(AnnotatorError::Render("failed to upload canvas pixels"));
        }

        let mut paragraph = self.layout(&normalize_newlines(text), font_size as f32, color);
        paragraph.paint(sk_canvas, (origin.0 as f32, origin.1 as f32));

        let mut pixels = vec![0u8; row_bytes * height as usize];
        if !sk_canvas.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(AnnotatorError::Render("failed to read back rendered pixels"));
        }
        let rgba = RgbaImage::from_raw(width, height, pixels)
            .ok_or(AnnotatorError::Render("rendered buffer has the wrong length"))?;

        let image = match canvas.mode() {
            ColorMode::Rgb => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
            ColorMode::Rgba => DynamicImage::ImageRgba8(rgba),
        };
        Canvas::from_image(image)
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Draw `text` on a copy of `canvas`, loading the brand font from `assets`.
/// `position` is already in absolute pixels; `color_hex` is `#RRGGBB`.
pub fn add_text(
    assets: &AssetProvider,
    canvas: &Canvas,
    text: &str,
    position: (i32, i32),
    font_size: u32,
    color_hex: &str,
) -> Result<Canvas> {
    let color = parse_hex_color(color_hex)?;
    TextRenderer::from_assets(assets)?.draw(canvas, text, position, font_size, color)
}

/// Recomposite the preview from the untouched base canvas. Called on every
/// edit; the result never carries an earlier overlay.
pub fn refresh_preview(renderer: &TextRenderer, base: &Canvas, style: &NoteStyle) -> Result<Canvas> {
    let origin = style.position.to_pixels(base.size());
    renderer.draw(base, &style.text, origin, style.font_size, style.color)
}
