// File: crates/annotator-core/src/background.rs
// Summary: Default branded background (brand fill + corner logo) and aspect-aware resizing.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::assets::{AssetProvider, LOGO_ASSET};
use crate::canvas::{Canvas, Size};
use crate::error::{AnnotatorError, Result};
use crate::theme;

/// Resampling filter for every scale operation in the pipeline.
const FILTER: FilterType = FilterType::Lanczos3;

/// Parameters of the default background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultBackground {
    pub screen_size: Size,
    /// Distance from the top and right screen edges to the logo, in pixels.
    pub logo_margin: u32,
    /// Rendered logo width; the height follows the logo's aspect ratio.
    pub logo_width: u32,
}

impl Default for DefaultBackground {
    fn default() -> Self {
        Self {
            screen_size: theme::DEFAULT_SCREEN.into(),
            logo_margin: theme::LOGO_MARGIN,
            logo_width: theme::LOGO_WIDTH,
        }
    }
}

impl DefaultBackground {
    pub fn compose(&self, assets: &AssetProvider) -> Result<Canvas> {
        create_default(assets, self.screen_size, self.logo_margin, self.logo_width)
    }
}

/// How [`resize`] treats the source's proportions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resize {
    /// Shrink (never enlarge) to fit inside the target, keeping width/height.
    #[default]
    KeepAspectRatio,
    /// Force the exact target size.
    Exact,
}

impl Resize {
    pub fn from_keep_aspect_ratio(keep: bool) -> Self {
        if keep { Resize::KeepAspectRatio } else { Resize::Exact }
    }
}

/// Build the default background: an opaque `screen_size` canvas in brand blue
/// with the brand logo in the top-right corner.
///
/// The logo is scaled to `logo_width` and pasted through its alpha channel
/// `logo_margin` pixels from the top and right edges. Screens too small for
/// logo plus margins still succeed; the logo is clipped at the canvas edge.
pub fn create_default(
    assets: &AssetProvider,
    screen_size: impl Into<Size>,
    logo_margin: u32,
    logo_width: u32,
) -> Result<Canvas> {
    let screen = screen_size.into().validate()?;
    let logo_path = assets.resolve(LOGO_ASSET)?;
    let logo = image::open(&logo_path)
        .map_err(|source| AnnotatorError::InvalidImage { path: logo_path.clone(), source })?;
    compose_with_logo(screen, &logo, logo_margin, logo_width)
}

/// [`create_default`] with an already decoded logo.
pub fn compose_with_logo(
    screen: Size,
    logo: &DynamicImage,
    logo_margin: u32,
    logo_width: u32,
) -> Result<Canvas> {
    let screen = screen.validate()?;
    if logo_width == 0 {
        return Err(AnnotatorError::InvalidSize { width: 0, height: logo.height() });
    }
    Size::new(logo.width(), logo.height()).validate()?;

    let logo_height = scaled_height(logo.width(), logo.height(), logo_width);
    let logo = logo.resize_exact(logo_width, logo_height, FILTER).to_rgba8();

    let [r, g, b] = theme::BRAND_BLUE.0;
    let mut base = RgbaImage::from_pixel(screen.width, screen.height, Rgba([r, g, b, 255]));
    let (x, y) = logo_origin(screen, logo_margin, logo_width);
    log::debug!(
        "default background {}x{}, logo {}x{} at ({x}, {y})",
        screen.width, screen.height, logo_width, logo_height
    );
    // overlay() blends by the logo's alpha and clips anything off-canvas.
    imageops::overlay(&mut base, &logo, x, y);

    Canvas::from_image(DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(base).to_rgb8()))
}

/// Top-left corner of the logo; negative when the screen is narrower than
/// logo plus margin.
pub fn logo_origin(screen: Size, logo_margin: u32, logo_width: u32) -> (i64, i64) {
    let x = screen.width as i64 - logo_width as i64 - logo_margin as i64;
    (x, logo_margin as i64)
}

/// Height of a `width`x`height` image scaled to `target_width`, rounded up.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (target_width as u64 * height as u64).div_ceil(width.max(1) as u64);
    scaled.clamp(1, u32::MAX as u64) as u32
}

/// Resized copy of `canvas`; the caller's canvas is untouched.
pub fn resize(canvas: &Canvas, target: impl Into<Size>, mode: Resize) -> Result<Canvas> {
    match resized_image(canvas.as_image(), target.into(), mode)? {
        Some(image) => Canvas::from_image(image),
        None => Ok(canvas.clone()),
    }
}

/// [`resize`] that overwrites `canvas`.
pub fn resize_in_place(canvas: &mut Canvas, target: impl Into<Size>, mode: Resize) -> Result<()> {
    if let Some(image) = resized_image(canvas.as_image(), target.into(), mode)? {
        canvas.replace_image(image);
    }
    Ok(())
}

/// Shrink a canvas to fit the UI's preview area.
pub fn fit_preview(canvas: &Canvas, area: impl Into<Size>) -> Result<Canvas> {
    resize(canvas, area, Resize::KeepAspectRatio)
}

fn resized_image(image: &DynamicImage, target: Size, mode: Resize) -> Result<Option<DynamicImage>> {
    let target = target.validate()?;
    let source = Size::new(image.width(), image.height());
    let size = match mode {
        Resize::KeepAspectRatio => thumbnail_size(source, target),
        Resize::Exact => target,
    };
    if size == source {
        return Ok(None);
    }
    Ok(Some(image.resize_exact(size.width, size.height, FILTER)))
}

/// Largest size inside `bounds` with the proportions of `source`, never
/// larger than `source`.
///
/// The axis that binds first is matched exactly. The other one is rounded to
/// whichever neighbouring integer best preserves the source ratio (ties go
/// down), and is at least 1.
pub fn thumbnail_size(source: Size, bounds: Size) -> Size {
    if source.fits_within(bounds) {
        return source;
    }
    let aspect = source.aspect();
    let bw = bounds.width as f64;
    let bh = bounds.height as f64;
    if bw / bh >= aspect {
        let width = round_aspect(bh * aspect, |n| (aspect - n / bh).abs());
        Size::new(width.min(source.width), bounds.height)
    } else {
        let height = round_aspect(bw / aspect, |n| if n == 0.0 { 0.0 } else { (aspect - bw / n).abs() });
        Size::new(bounds.width, height.min(source.height))
    }
}

fn round_aspect(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let (lo, hi) = (value.floor(), value.ceil());
    let best = if error(hi) < error(lo) { hi } else { lo };
    (best as u32).max(1)
}
