use crate::image::{RgbaImage, RgbaView};

/// RGBA overlay the compositor paints into, registered pixel-for-pixel to the
/// scored image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeatmapSurface {
    image: RgbaImage,
}

impl HeatmapSurface {
    /// Transparent surface of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Surface seeded with a copy of `view`, for painting straight over the
    /// source image.
    pub fn from_view<V: RgbaView>(view: &V) -> Self {
        Self {
            image: RgbaImage::from_view(view),
        }
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.image.data.fill(0);
    }

    pub fn width(&self) -> usize {
        self.image.w
    }

    pub fn height(&self) -> usize {
        self.image.h
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        self.image.pixel(x, y)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
