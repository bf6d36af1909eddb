//! GPU textures for bitmaps drawn through the surface.

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use gridpaint_core::ImageRef;
use std::collections::HashMap;

/// Uploaded textures keyed by image name, re-uploaded when the revision changes.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, (u64, TextureHandle)>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `image`, uploading or refreshing it as needed.
    pub fn texture_id(&mut self, ctx: &Context, image: ImageRef<'_>) -> TextureId {
        let pixels = image.pixels;
        let color_image = || {
            ColorImage::from_rgba_unmultiplied(
                [pixels.width() as usize, pixels.height() as usize],
                pixels.as_raw(),
            )
        };

        match self.textures.get_mut(image.key) {
            Some((revision, handle)) => {
                if *revision != image.revision {
                    handle.set(color_image(), TextureOptions::NEAREST);
                    *revision = image.revision;
                }
                handle.id()
            }
            None => {
                log::debug!("Uploading texture {}", image.key);
                let handle = ctx.load_texture(image.key, color_image(), TextureOptions::NEAREST);
                let id = handle.id();
                self.textures.insert(image.key.to_string(), (image.revision, handle));
                id
            }
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpaint_core::color::WHITE;
    use image::RgbaImage;

    #[test]
    fn test_uploads_once_per_key() {
        let ctx = Context::default();
        let mut cache = TextureCache::new();
        let pixels = RgbaImage::from_pixel(4, 4, WHITE);
        let image = |revision| ImageRef {
            key: "canvas",
            revision,
            pixels: &pixels,
        };

        let first = cache.texture_id(&ctx, image(0));
        let again = cache.texture_id(&ctx, image(1));
        assert_eq!(first, again);
        assert_eq!(cache.len(), 1);
    }
}
