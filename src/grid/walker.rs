use super::slide::{axis_positions, compute_slide};
use crate::error::{HeatmapError, Result};
use crate::types::{Rect, WindowSize};

/// Row-major sweep of `window`-sized rectangles over a region.
///
/// Windows larger than the region are clamped to it, which turns the sweep
/// into a single sample covering the whole region. Every yielded rectangle
/// lies inside the region.
#[derive(Clone, Debug)]
pub struct GridWalker {
    region: Rect,
    window: WindowSize,
    xs: Vec<usize>,
    ys: Vec<usize>,
    next: usize,
}

impl GridWalker {
    /// `slide_ratio` is the fraction of the window used as the base step.
    pub fn new(region: Rect, window: WindowSize, slide_ratio: f32) -> Result<Self> {
        if region.is_empty() {
            return Err(HeatmapError::invalid(format!(
                "cannot sweep empty region {}x{}",
                region.w, region.h
            )));
        }
        if window.is_empty() {
            return Err(HeatmapError::invalid(format!(
                "window must be non-empty, got {window}"
            )));
        }
        let window = window.clamp_to(region.size());
        let x_slide = compute_slide(region.w, window.w as f32 * slide_ratio)?;
        let y_slide = compute_slide(region.h, window.h as f32 * slide_ratio)?;
        let xs = axis_positions(region.x, region.w, window.w, x_slide)?;
        let ys = axis_positions(region.y, region.h, window.h, y_slide)?;
        Ok(Self {
            region,
            window,
            xs,
            ys,
            next: 0,
        })
    }

    #[inline]
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Effective window size after clamping to the region.
    #[inline]
    pub fn window(&self) -> WindowSize {
        self.window
    }

    /// Window origins along x.
    pub fn columns(&self) -> &[usize] {
        &self.xs
    }

    /// Window origins along y.
    pub fn rows(&self) -> &[usize] {
        &self.ys
    }

    /// Total number of windows in the sweep.
    pub fn total(&self) -> usize {
        self.xs.len() * self.ys.len()
    }
}

impl Iterator for GridWalker {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        if self.next >= self.total() {
            return None;
        }
        let (row, col) = (self.next / self.xs.len(), self.next % self.xs.len());
        self.next += 1;
        Some(Rect::new(
            self.xs[col],
            self.ys[row],
            self.window.w,
            self.window.h,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for GridWalker {}
