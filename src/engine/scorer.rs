//! The scoring seam.
//!
//! The engine knows nothing about what a score means. It hands the occluded
//! image to a [`Scorer`] and expects a value in `[0, 1]` back. Scorers backed
//! by asynchronous services block on their own runtime inside
//! [`Scorer::score`]; the engine never scores two windows at once.
use crate::error::ScoreError;
use crate::heatmap::HeatmapSurface;
use crate::image::RgbaView;
use crate::types::Rect;

/// Everything a scorer can look at for one occluded window.
pub struct ScoringContext<'a> {
    /// The caller's buffer with `window` currently occluded.
    pub image: &'a dyn RgbaView,
    /// Heatmap painted so far (samples before this one).
    pub heatmap: &'a HeatmapSurface,
    pub window: Rect,
    /// Refinement depth of the pass this window belongs to.
    pub depth: usize,
    /// Zero-based index of this sample within the run.
    pub sample_index: usize,
}

/// Black-box scoring function.
pub trait Scorer {
    fn score(&mut self, ctx: &ScoringContext<'_>) -> Result<f32, ScoreError>;
}

impl<S: Scorer + ?Sized> Scorer for &mut S {
    fn score(&mut self, ctx: &ScoringContext<'_>) -> Result<f32, ScoreError> {
        (**self).score(ctx)
    }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score(&mut self, ctx: &ScoringContext<'_>) -> Result<f32, ScoreError> {
        (**self).score(ctx)
    }
}

/// [`Scorer`] backed by a closure; see [`from_fn`].
pub struct FnScorer<F> {
    f: F,
}

impl<F> Scorer for FnScorer<F>
where
    F: FnMut(&ScoringContext<'_>) -> Result<f32, ScoreError>,
{
    fn score(&mut self, ctx: &ScoringContext<'_>) -> Result<f32, ScoreError> {
        (self.f)(ctx)
    }
}

/// Wrap a closure as a [`Scorer`].
///
/// ```
/// use occlusion_heatmap::engine::scorer::{from_fn, Scorer};
///
/// let mut scorer = from_fn(|ctx| Ok(if ctx.depth == 0 { 0.25 } else { 1.0 }));
/// # let _ = &mut scorer as &mut dyn Scorer;
/// ```
pub fn from_fn<F>(f: F) -> FnScorer<F>
where
    F: FnMut(&ScoringContext<'_>) -> Result<f32, ScoreError>,
{
    FnScorer { f }
}
