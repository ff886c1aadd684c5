//! Per-window occlusion weights with a radial falloff.
//!
//! Each pixel offset `(dx, dy)` is measured from the window centre in
//! half-extent units along both axes, `t = (d + 0.5 - n/2) / (n/2)`, and the
//! weight is `clamp((1 - max(tx², ty²)) * gain, 0, 1)`. The centre is fully
//! occluded and the weight fades towards the border, so neighbouring windows
//! blend instead of leaving hard seams. Distances are taken from pixel centres,
//! which makes every mask mirror-symmetric along both axes.
//!
//! An axis of extent 1 contributes no distance: a 1-pixel-wide window is fully
//! occluded across its width.
//!
//! Masks depend only on `(w, h)` and the gain, so [`MaskCache`] keeps one per
//! window size for the lifetime of a run.
use crate::error::{HeatmapError, Result};
use crate::types::WindowSize;
use log::trace;
use std::collections::HashMap;

/// Gain applied when none is configured.
pub const DEFAULT_MASK_GAIN: f32 = 1.0;

/// `w × h` blend weights in `[0, 1]`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct OcclusionMask {
    size: WindowSize,
    weights: Vec<f32>,
}

impl OcclusionMask {
    /// Build the mask for `size`. Zero-sized windows and non-finite or
    /// negative gains are rejected.
    pub fn generate(size: WindowSize, gain: f32) -> Result<Self> {
        if size.is_empty() {
            return Err(HeatmapError::invalid(format!(
                "occlusion mask requires a non-empty window, got {size}"
            )));
        }
        if !gain.is_finite() || gain < 0.0 {
            return Err(HeatmapError::invalid(format!(
                "mask gain must be finite and non-negative, got {gain}"
            )));
        }
        let mut weights = vec![0.0f32; size.area()];
        fill_weights(&mut weights, size, gain);
        Ok(Self { size, weights })
    }

    #[inline]
    pub fn size(&self) -> WindowSize {
        self.size
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.size.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.size.h
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub fn weight(&self, dx: usize, dy: usize) -> f32 {
        self.weights[dy * self.size.w + dx]
    }

    /// Weights of row `dy`.
    #[inline]
    pub fn row(&self, dy: usize) -> &[f32] {
        let start = dy * self.size.w;
        &self.weights[start..start + self.size.w]
    }
}

#[inline]
fn axis_distance(d: usize, extent: usize) -> f32 {
    if extent <= 1 {
        return 0.0;
    }
    let half = extent as f32 * 0.5;
    let t = (d as f32 + 0.5 - half) / half;
    t * t
}

fn fill_row(row: &mut [f32], dy: usize, size: WindowSize, gain: f32) {
    let wy = axis_distance(dy, size.h);
    for (dx, weight) in row.iter_mut().enumerate() {
        let wx = axis_distance(dx, size.w);
        *weight = ((1.0 - wx.max(wy)) * gain).clamp(0.0, 1.0);
    }
}

#[cfg(feature = "parallel")]
fn fill_weights(weights: &mut [f32], size: WindowSize, gain: f32) {
    use rayon::prelude::*;

    weights
        .par_chunks_mut(size.w)
        .enumerate()
        .for_each(|(dy, row)| fill_row(row, dy, size, gain));
}

#[cfg(not(feature = "parallel"))]
fn fill_weights(weights: &mut [f32], size: WindowSize, gain: f32) {
    for (dy, row) in weights.chunks_mut(size.w).enumerate() {
        fill_row(row, dy, size, gain);
    }
}

/// Memoized masks keyed by window size. Owned by one engine run.
#[derive(Debug)]
pub struct MaskCache {
    gain: f32,
    masks: HashMap<WindowSize, OcclusionMask>,
}

impl Default for MaskCache {
    fn default() -> Self {
        Self::new(DEFAULT_MASK_GAIN)
    }
}

impl MaskCache {
    pub fn new(gain: f32) -> Self {
        Self {
            gain,
            masks: HashMap::new(),
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Mask for `size`, generated on first request.
    pub fn get(&mut self, size: WindowSize) -> Result<&OcclusionMask> {
        if !self.masks.contains_key(&size) {
            let mask = OcclusionMask::generate(size, self.gain)?;
            trace!("MaskCache: generated {size} mask (gain {:.2})", self.gain);
            self.masks.insert(size, mask);
        }
        self.masks
            .get(&size)
            .ok_or_else(|| HeatmapError::invalid(format!("mask {size} missing after insert")))
    }

    /// Number of distinct window sizes generated so far.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_are_mirror_symmetric() {
        for w in 1..=12 {
            for h in 1..=12 {
                for gain in [1.0, 2.0] {
                    let mask = OcclusionMask::generate(WindowSize::new(w, h), gain).unwrap();
                    for dy in 0..h {
                        for dx in 0..w {
                            let v = mask.weight(dx, dy);
                            assert!((0.0..=1.0).contains(&v));
                            assert_eq!(v, mask.weight(w - 1 - dx, dy), "h-mirror {w}x{h}");
                            assert_eq!(v, mask.weight(dx, h - 1 - dy), "v-mirror {w}x{h}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn centre_is_fully_occluded_and_edges_fade() {
        let mask = OcclusionMask::generate(WindowSize::new(9, 7), 1.0).unwrap();
        assert_eq!(mask.weight(4, 3), 1.0);
        let corner = mask.weight(0, 0);
        assert!(corner < 0.25, "corner weight {corner}");
        assert!(mask.weight(1, 3) < mask.weight(3, 3));
    }

    #[test]
    fn single_pixel_axes_are_fully_occluded() {
        let pixel = OcclusionMask::generate(WindowSize::new(1, 1), 1.0).unwrap();
        assert_eq!(pixel.weights(), &[1.0]);

        let column = OcclusionMask::generate(WindowSize::new(1, 5), 1.0).unwrap();
        assert_eq!(column.weight(0, 2), 1.0);
        assert!(column.weight(0, 0) < 1.0);
    }

    #[test]
    fn gain_sharpens_and_clamps() {
        let soft = OcclusionMask::generate(WindowSize::new(10, 10), 1.0).unwrap();
        let sharp = OcclusionMask::generate(WindowSize::new(10, 10), 2.0).unwrap();
        for (s, h) in soft.weights().iter().zip(sharp.weights()) {
            assert!(h >= s);
            assert!(*h <= 1.0);
        }
    }

    #[test]
    fn rejects_empty_windows_and_bad_gain() {
        assert!(OcclusionMask::generate(WindowSize::new(0, 4), 1.0).is_err());
        assert!(OcclusionMask::generate(WindowSize::new(4, 4), f32::NAN).is_err());
    }

    #[test]
    fn cache_memoizes_by_size() {
        let mut cache = MaskCache::default();
        let first = cache.get(WindowSize::new(4, 6)).unwrap().clone();
        let again = cache.get(WindowSize::new(4, 6)).unwrap();
        assert_eq!(&first, again);
        cache.get(WindowSize::new(6, 4)).unwrap();
        assert_eq!(cache.len(), 2);
    }
}
