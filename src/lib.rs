#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod heatmap;
pub mod image;
pub mod types;

// Building blocks the engine is assembled from. Public for callers that
// want to drive their own loop.
pub mod grid;
pub mod occlusion;
pub mod refine;

// Configuration for the demo binary.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: engine, params and the scoring seam.
pub use crate::engine::{CancelToken, HeatmapParams, OcclusionEngine, Scorer, ScoringContext};
pub use crate::error::{HeatmapError, Result};

// Heatmap output and the scale it is painted with.
pub use crate::heatmap::{ColorScale, HeatmapSurface, PaintMode};

// Run diagnostics.
pub use crate::diagnostics::HeatmapReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use occlusion_heatmap::prelude::*;
///
/// # fn main() -> Result<(), HeatmapError> {
/// let mut image = RgbaImage::filled(64, 48, [120, 80, 40, 255]);
/// let scale = ColorScale::from_fn(|i| [i, 0, 255 - i, 128]);
/// let engine = OcclusionEngine::new(HeatmapParams::default(), scale)?;
/// let mut surface = HeatmapSurface::new(64, 48);
///
/// let mut scorer = from_fn(|ctx| Ok(if ctx.window.x < 32 { 0.9 } else { 0.1 }));
/// let report = engine.run(&mut image, &mut surface, &mut scorer, &mut ScoreThreshold(0.5))?;
/// println!("samples={} max_depth={}", report.samples.len(), report.max_depth());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::engine::from_fn;
    pub use crate::image::{RgbaImage, RgbaView, RgbaViewMut};
    pub use crate::refine::{NeverZoom, RefinePolicy, ScoreThreshold};
    pub use crate::types::{Rect, Sample, WindowSize};
    pub use crate::{
        ColorScale, HeatmapError, HeatmapParams, HeatmapReport, HeatmapSurface, OcclusionEngine,
        Scorer,
    };
}
