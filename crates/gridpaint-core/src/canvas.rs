//! Raster canvas: the pixel buffer tools draw into.

use crate::color::Color;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage, imageops};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Canvas and image file errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for canvas file operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// An immutable copy of a canvas region.
///
/// Cloning is cheap; the pixels are shared.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pixels: Arc<RgbaImage>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read-only access to the captured pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// File formats the canvas can be saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFileFormat {
    Png,
    Jpeg,
    Tga,
}

impl ImageFileFormat {
    /// Pick a format from the path's extension.
    ///
    /// A missing or empty extension gets `.png` appended; an unrecognised one keeps
    /// the path as given but encodes PNG.
    pub fn for_path(path: &Path) -> (Self, PathBuf) {
        let Some(ext) = path.extension().filter(|ext| !ext.is_empty()) else {
            return (Self::Png, path.with_extension("png"));
        };
        let format = match ext.to_string_lossy().to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "tga" => Self::Tga,
            other => {
                log::warn!("Unrecognised image extension '{}', saving as PNG", other);
                Self::Png
            }
        };
        (format, path.to_path_buf())
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Tga => ImageFormat::Tga,
        }
    }
}

/// The drawable pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
    background: Color,
    /// Bumped on every mutation so renderers can tell when to re-upload.
    revision: u64,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
            background,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Read a pixel, `None` outside the canvas.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|(x, y)| *self.pixels.get_pixel(x, y))
    }

    /// Write a pixel, clipped to the canvas. Returns whether it landed.
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Color) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.pixels.put_pixel(x, y, color);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Fill an axis-aligned block of pixels, clipped to the canvas.
    pub fn fill_block(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width() as i64);
        let y1 = (y + height).min(self.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels.put_pixel(px as u32, py as u32, color);
            }
        }
        self.touch();
    }

    /// Fill a disc centred on `(cx, cy)`, clipped to the canvas.
    pub fn fill_disc(&mut self, cx: i64, cy: i64, radius: i64, color: Color) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    if let Some((x, y)) = self.index(cx + dx, cy + dy) {
                        self.pixels.put_pixel(x, y, color);
                    }
                }
            }
        }
        self.touch();
    }

    /// Fill the whole canvas.
    pub fn clear(&mut self, color: Color) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
        self.touch();
    }

    /// Copy a region, clipped to the canvas.
    pub fn read_region(&self, x: u32, y: u32, width: u32, height: u32) -> Snapshot {
        let region = imageops::crop_imm(&self.pixels, x, y, width, height).to_image();
        Snapshot {
            pixels: Arc::new(region),
        }
    }

    /// Paste a snapshot with its top-left corner at `(x, y)`.
    pub fn write_region(&mut self, snapshot: &Snapshot, x: i64, y: i64) {
        imageops::replace(&mut self.pixels, snapshot.pixels.as_ref(), x, y);
        self.touch();
    }

    /// Capture the full canvas.
    pub fn snapshot(&self) -> Snapshot {
        self.read_region(0, 0, self.width(), self.height())
    }

    /// Restore a full-canvas snapshot.
    ///
    /// If the snapshot has different dimensions (the canvas was replaced by
    /// an opened image since) the canvas adopts the snapshot's size.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width() == self.width() && snapshot.height() == self.height() {
            self.write_region(snapshot, 0, 0);
        } else {
            self.replace(snapshot.pixels().clone());
        }
    }

    /// Swap in a new pixel buffer, e.g. an opened image.
    pub fn replace(&mut self, pixels: RgbaImage) {
        self.pixels = pixels;
        self.touch();
    }

    /// Save the canvas; see [`Canvas::save_image_to_path`].
    pub fn save(&self, path: &Path) -> CanvasResult<PathBuf> {
        Self::save_image_to_path(&self.pixels, path)
    }

    /// Decode an image file into RGBA pixels. The format is sniffed from
    /// the file contents, so a misleading extension still loads.
    pub fn load_image_from_path(path: &Path) -> CanvasResult<RgbaImage> {
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        log::info!("Loaded image {:?} ({}x{})", path, image.width(), image.height());
        Ok(image.to_rgba8())
    }

    /// Encode pixels to a file, choosing the format from the extension.
    ///
    /// Returns the path actually written.
    pub fn save_image_to_path(pixels: &RgbaImage, path: &Path) -> CanvasResult<PathBuf> {
        let (format, path) = ImageFileFormat::for_path(path);
        match format {
            // JPEG has no alpha channel.
            ImageFileFormat::Jpeg => DynamicImage::ImageRgba8(pixels.clone())
                .to_rgb8()
                .save_with_format(&path, format.image_format())?,
            _ => pixels.save_with_format(&path, format.image_format())?,
        }
        log::info!("Saved image to {:?} as {:?}", path, format);
        Ok(path)
    }

    fn index(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
