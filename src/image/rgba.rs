//! RGBA8 pixel buffers: an owned image and a borrowed mutable view.
//!
//! Both store pixels row-major with 4 bytes per pixel. `stride` is measured in
//! bytes and may exceed `4 * w` when the caller's storage pads its rows.
use super::traits::{RgbaView, RgbaViewMut};
use crate::error::{HeatmapError, Result};

/// Owned RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Bytes between consecutive rows
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// Fully transparent black buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w * 4,
            data: vec![0; w * h * 4],
        }
    }

    /// Buffer of size `w × h` filled with `px`.
    pub fn filled(w: usize, h: usize, px: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(w * h * 4);
        for _ in 0..w * h {
            data.extend_from_slice(&px);
        }
        Self {
            w,
            h,
            stride: w * 4,
            data,
        }
    }

    /// Wrap tightly packed RGBA bytes.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<Self> {
        check_layout(w, h, w * 4, data.len())?;
        Ok(Self {
            w,
            h,
            stride: w * 4,
            data,
        })
    }

    /// Copy any RGBA view into a tightly packed owned image.
    pub fn from_view<V: RgbaView>(view: &V) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height() * 4);
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self {
            w: view.width(),
            h: view.height(),
            stride: view.width() * 4,
            data,
        }
    }

    /// Borrow as a mutable view.
    pub fn as_view_mut(&mut self) -> RgbaImageMut<'_> {
        RgbaImageMut {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: &mut self.data,
        }
    }

    #[inline]
    fn row_start(&self, y: usize) -> usize {
        y * self.stride
    }
}

impl RgbaView for RgbaImage {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = self.row_start(y);
        &self.data[start..start + self.w * 4]
    }
}

impl RgbaViewMut for RgbaImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = self.row_start(y);
        let end = start + self.w * 4;
        &mut self.data[start..end]
    }
}

/// Mutable RGBA8 view over caller-owned storage (e.g. a canvas frame).
#[derive(Debug)]
pub struct RgbaImageMut<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a mut [u8],
}

impl<'a> RgbaImageMut<'a> {
    /// Wrap `data`, checking that `h` rows of `stride` bytes fit.
    pub fn new(w: usize, h: usize, stride: usize, data: &'a mut [u8]) -> Result<Self> {
        check_layout(w, h, stride, data.len())?;
        Ok(Self { w, h, stride, data })
    }
}

impl RgbaView for RgbaImageMut<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * 4]
    }
}

impl RgbaViewMut for RgbaImageMut<'_> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.w * 4;
        &mut self.data[start..end]
    }
}

fn check_layout(w: usize, h: usize, stride: usize, len: usize) -> Result<()> {
    if stride < w * 4 {
        return Err(HeatmapError::invalid(format!(
            "stride {stride} shorter than a {w}-pixel RGBA row"
        )));
    }
    let needed = if h == 0 { 0 } else { (h - 1) * stride + w * 4 };
    if len < needed {
        return Err(HeatmapError::invalid(format!(
            "buffer of {len} bytes cannot hold {w}x{h} RGBA with stride {stride}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_view_skips_padding() {
        // 2x2 image with 4 padding bytes per row.
        let mut storage = vec![0u8; 2 * 12];
        storage[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let view = RgbaImageMut::new(2, 2, 12, &mut storage).expect("layout fits");
        assert_eq!(view.pixel(0, 1), [1, 2, 3, 4]);
        assert_eq!(view.row(1).len(), 8);
        assert!(!view.is_contiguous());

        let owned = RgbaImage::from_view(&view);
        assert!(owned.is_contiguous());
        assert_eq!(owned.pixel(0, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn rejects_short_buffers() {
        let mut storage = vec![0u8; 15];
        assert!(RgbaImageMut::new(2, 2, 8, &mut storage).is_err());
        assert!(RgbaImage::from_raw(2, 2, vec![0; 16]).is_ok());
        assert!(RgbaImage::from_raw(2, 2, vec![0; 16 - 1]).is_err());
    }
}
