use serde::{Deserialize, Serialize};

/// RGB triplet (alpha is never read or written by the occluder).
pub type Rgb = [u8; 3];

/// Axis-aligned pixel rectangle. `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin covering a `width × height` image.
    pub const fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn size(&self) -> WindowSize {
        WindowSize::new(self.w, self.h)
    }

    #[inline]
    pub fn contains_point(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True when the rectangle fits inside a `width × height` image without
    /// overflowing `usize` on the way.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        match (self.x.checked_add(self.w), self.y.checked_add(self.h)) {
            (Some(r), Some(b)) => r <= width && b <= height,
            _ => false,
        }
    }
}

/// Width and height of an occlusion window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSize {
    pub w: usize,
    pub h: usize,
}

impl WindowSize {
    pub const fn new(w: usize, h: usize) -> Self {
        Self { w, h }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.w * self.h
    }

    /// `(ceil(w / 2), ceil(h / 2))`.
    pub fn halved(&self) -> Self {
        Self::new(self.w.div_ceil(2), self.h.div_ceil(2))
    }

    /// Scale both sides by `ratio`, rounding up.
    pub fn scaled(&self, ratio: f32) -> Self {
        let scale = |v: usize| (v as f32 * ratio).ceil().max(0.0) as usize;
        Self::new(scale(self.w), scale(self.h))
    }

    /// Component-wise minimum with `other`.
    pub fn clamp_to(&self, other: WindowSize) -> Self {
        Self::new(self.w.min(other.w), self.h.min(other.h))
    }

    /// True when both sides are at least `min`'s sides.
    #[inline]
    pub fn covers(&self, min: WindowSize) -> bool {
        self.w >= min.w && self.h >= min.h
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// One scored occlusion window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    #[serde(flatten)]
    pub rect: Rect,
    /// Score returned by the scorer, clamped to `[0, 1]`.
    pub score: f32,
    /// Refinement depth (or global pass index) that produced the sample.
    pub depth: usize,
}

/// Unit of work for the region refiner: sweep `region` with `window`-sized
/// occlusions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub region: Rect,
    pub window: WindowSize,
    pub depth: usize,
}
