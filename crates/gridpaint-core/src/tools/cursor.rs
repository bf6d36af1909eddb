//! Cursor affordances shown over the canvas.

use super::ToolSize;
use crate::color::{BLACK, TRANSPARENT, WHITE};
use crate::surface::Icon;
use image::RgbaImage;

/// What the pointer looks like while a tool is active.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorAffordance {
    /// The tool's icon, drawn with its tip at the pointer.
    Icon(Icon),
    /// A generated bitmap centred on `hotspot`.
    Bitmap(CursorBitmap),
}

/// A generated cursor image.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorBitmap {
    /// Stable name for texture caching; differs per generated variant.
    pub key: String,
    pub image: RgbaImage,
    pub hotspot: (u32, u32),
}

/// Square ring outlining the eraser footprint.
///
/// The ring is a black outer stroke followed by a one-pixel white inner
/// stroke so it reads on any background; the black stroke thickens for the
/// larger sizes and the interior stays transparent.
pub fn eraser_ring(size: ToolSize) -> CursorBitmap {
    let footprint = size.eraser_side();
    let stroke = if footprint >= 12 { 2 } else { 1 };
    let side = footprint + 2 * stroke;

    let image = RgbaImage::from_fn(side, side, |x, y| {
        let edge = x.min(y).min(side - 1 - x).min(side - 1 - y);
        if edge < stroke {
            BLACK
        } else if edge == stroke {
            WHITE
        } else {
            TRANSPARENT
        }
    });

    CursorBitmap {
        key: format!("eraser-cursor-{}", side),
        image,
        hotspot: (side / 2, side / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_scales_with_size() {
        let small = eraser_ring(ToolSize::Small);
        let huge = eraser_ring(ToolSize::Huge);
        assert!(huge.image.width() > small.image.width());
        assert_ne!(small.key, huge.key);
    }

    #[test]
    fn test_ring_pattern() {
        let ring = eraser_ring(ToolSize::Huge);
        let side = ring.image.width();
        let mid = side / 2;
        assert_eq!(*ring.image.get_pixel(0, mid), BLACK);
        assert_eq!(*ring.image.get_pixel(1, mid), BLACK);
        assert_eq!(*ring.image.get_pixel(2, mid), WHITE);
        assert_eq!(*ring.image.get_pixel(mid, mid), TRANSPARENT);
        assert_eq!(ring.hotspot, (mid, mid));
    }
}
