// File: crates/annotator-core/src/canvas.rs
// Summary: Value-like raster canvas (RGB or RGBA) and its dimensions.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};

use crate::error::{AnnotatorError, Result};
use crate::paths;

/// Canvas dimensions in pixels.
/// Contract: a `Size` that made it into a `Canvas` has no zero dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject zero-area sizes.
    pub fn validate(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            Err(AnnotatorError::InvalidSize { width: self.width, height: self.height })
        } else {
            Ok(self)
        }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// True when `self` fits inside `bounds` on both axes.
    pub const fn fits_within(&self, bounds: Size) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

/// In-memory raster image.
///
/// Canvases behave like values: composition and overlay functions take a
/// `&Canvas` and hand back a new one. The only mutating entry point is
/// [`resize_in_place`](crate::background::resize_in_place).
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: DynamicImage,
}

impl Canvas {
    /// Opaque canvas of `size` filled with `color`.
    pub fn filled(size: impl Into<Size>, color: Rgb<u8>) -> Result<Self> {
        let size = size.into().validate()?;
        Ok(Self { image: DynamicImage::ImageRgb8(RgbImage::from_pixel(size.width, size.height, color)) })
    }

    /// Wrap a decoded image. Anything that is not 8-bit RGB/RGBA is converted,
    /// keeping alpha only when the source has it.
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        Size::new(image.width(), image.height()).validate()?;
        let image = match image {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
            other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };
        Ok(Self { image })
    }

    /// Load an external base image, guessing the format from its content.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = paths::normalize(path.as_ref());
        if !path.is_file() {
            return Err(AnnotatorError::FileNotFound(path));
        }
        let image = ImageReader::open(&path)?
            .with_guessed_format()?
            .decode()
            .map_err(|source| AnnotatorError::InvalidImage { path: path.clone(), source })?;
        log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
        Self::from_image(image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn mode(&self) -> ColorMode {
        match self.image {
            DynamicImage::ImageRgba8(_) => ColorMode::Rgba,
            _ => ColorMode::Rgb,
        }
    }

    /// Pixel at (x, y) as RGBA; opaque canvases report alpha 255.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    /// Opaque copy with alpha dropped, as wallpaper formats expect.
    pub fn to_rgb(&self) -> RgbImage {
        self.image.to_rgb8()
    }

    pub fn to_rgba(&self) -> RgbaImage {
        self.image.to_rgba8()
    }

    pub(crate) fn replace_image(&mut self, image: DynamicImage) {
        self.image = image;
    }
}
