/// Read access to an interleaved RGBA8 pixel buffer.
///
/// Rows are `4 * width` bytes long; consecutive rows start `stride` bytes
/// apart, so views over a larger allocation (padded rows, sub-images) work
/// unchanged.
pub trait RgbaView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Bytes between the starts of consecutive rows (`>= 4 * width`).
    fn stride(&self) -> usize;

    /// RGBA bytes of row `y`, exactly `4 * width` long.
    fn row(&self, y: usize) -> &[u8];

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let px = &self.row(y)[x * 4..x * 4 + 4];
        [px[0], px[1], px[2], px[3]]
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width() * 4
    }
}

/// Write access on top of [`RgbaView`].
pub trait RgbaViewMut: RgbaView {
    fn row_mut(&mut self, y: usize) -> &mut [u8];

    #[inline]
    fn put_pixel(&mut self, x: usize, y: usize, px: [u8; 4]) {
        self.row_mut(y)[x * 4..x * 4 + 4].copy_from_slice(&px);
    }
}

pub struct Rows<'a, I: ?Sized + RgbaView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: RgbaView> Iterator for Rows<'a, I> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}
