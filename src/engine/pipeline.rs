use super::cancel::CancelToken;
use super::params::HeatmapParams;
use super::scorer::{Scorer, ScoringContext};
use crate::diagnostics::{HeatmapReport, InputDescriptor, PassSummary};
use crate::error::{HeatmapError, Result};
use crate::grid::GridWalker;
use crate::heatmap::{ColorScale, HeatmapCompositor, HeatmapSurface};
use crate::image::RgbaViewMut;
use crate::occlusion::{MaskCache, OcclusionGuard, OcclusionMask};
use crate::refine::{RegionRefiner, ZoomPredicate};
use crate::types::{Rect, Sample};
use log::{debug, trace, warn};
use std::time::Instant;

/// Occlusion-sensitivity engine.
///
/// One engine can serve many runs; all per-run state (mask cache, work
/// queue, cancellation) lives inside [`OcclusionEngine::run_with_cancel`].
pub struct OcclusionEngine {
    params: HeatmapParams,
    compositor: HeatmapCompositor,
}

impl OcclusionEngine {
    pub fn new(params: HeatmapParams, scale: ColorScale) -> Result<Self> {
        params.validate()?;
        let compositor = HeatmapCompositor::new(scale, params.paint_mode);
        Ok(Self { params, compositor })
    }

    pub fn params(&self) -> &HeatmapParams {
        &self.params
    }

    /// Sweep `buffer`, scoring every occluded window and painting the scores
    /// onto `surface`.
    ///
    /// Windows are processed strictly one at a time: occlude, score, paint,
    /// pause (if configured), restore. The buffer is byte-identical to its
    /// input when this returns, whether it returns `Ok` or `Err`.
    pub fn run<B, S, Z>(
        &self,
        buffer: &mut B,
        surface: &mut HeatmapSurface,
        scorer: &mut S,
        zoom: &mut Z,
    ) -> Result<HeatmapReport>
    where
        B: RgbaViewMut,
        S: Scorer + ?Sized,
        Z: ZoomPredicate + ?Sized,
    {
        self.run_with_cancel(buffer, surface, scorer, zoom, &CancelToken::new())
    }

    /// [`OcclusionEngine::run`] that stops with [`HeatmapError::Cancelled`]
    /// once `cancel` is set. The token is checked between windows only and
    /// belongs to this run; the engine keeps no cancellation state.
    pub fn run_with_cancel<B, S, Z>(
        &self,
        buffer: &mut B,
        surface: &mut HeatmapSurface,
        scorer: &mut S,
        zoom: &mut Z,
        cancel: &CancelToken,
    ) -> Result<HeatmapReport>
    where
        B: RgbaViewMut,
        S: Scorer + ?Sized,
        Z: ZoomPredicate + ?Sized,
    {
        let t0 = Instant::now();
        let (width, height) = (buffer.width(), buffer.height());
        if width == 0 || height == 0 {
            return Err(HeatmapError::invalid(format!(
                "cannot build a heatmap for an empty {width}x{height} image"
            )));
        }
        if surface.width() != width || surface.height() != height {
            return Err(HeatmapError::invalid(format!(
                "heatmap surface {}x{} does not match image {width}x{height}",
                surface.width(),
                surface.height()
            )));
        }

        let initial = self.params.initial_window(width, height);
        let mut masks = MaskCache::new(self.params.mask_gain);
        let mut refiner = RegionRefiner::new(
            Rect::full(width, height),
            initial,
            self.params.refine,
            self.params.min_window,
            self.params.refine_enabled,
        );
        let mut report = HeatmapReport::new(InputDescriptor {
            width,
            height,
            initial_window: initial,
        });
        debug!(
            "OcclusionEngine::run {width}x{height} initial window {initial} policy {:?}",
            self.params.refine
        );

        while let Some(item) = refiner.next_item() {
            let pass_start = Instant::now();
            let walker = GridWalker::new(item.region, item.window, self.params.slide_ratio)?;
            let mut pass = PassSummary::new(&item, walker.window());
            let mask = masks.get(walker.window())?;
            debug!(
                "OcclusionEngine::run pass depth={} region=({}, {}, {}x{}) window={} windows={}",
                item.depth,
                item.region.x,
                item.region.y,
                item.region.w,
                item.region.h,
                walker.window(),
                walker.total()
            );

            for rect in walker {
                if cancel.is_cancelled() {
                    debug!(
                        "OcclusionEngine::run_with_cancel cancelled after {} samples",
                        report.samples.len()
                    );
                    return Err(HeatmapError::Cancelled {
                        samples: report.samples.len(),
                    });
                }
                let sample = self.sample_window(
                    buffer,
                    surface,
                    scorer,
                    mask,
                    rect,
                    item.depth,
                    report.samples.len(),
                )?;
                if refiner.on_sample(&item, rect, sample.score, zoom).is_some() {
                    pass.zoomed += 1;
                }
                pass.record(sample.score);
                report.samples.push(sample);
            }

            pass.elapsed_ms = pass_start.elapsed().as_secs_f64() * 1000.0;
            trace!(
                "OcclusionEngine::run pass depth={} done: {} samples, {} zoomed, {} pending",
                pass.depth,
                pass.samples,
                pass.zoomed,
                refiner.pending()
            );
            report.passes.push(pass);
        }

        report.masks_generated = masks.len();
        report.total_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "OcclusionEngine::run finished: {} samples over {} passes (max depth {}) in {:.3} ms",
            report.samples.len(),
            report.passes.len(),
            report.max_depth(),
            report.total_ms
        );
        Ok(report)
    }

    /// Occlude → score → paint → pause → restore for a single window.
    #[allow(clippy::too_many_arguments)]
    fn sample_window<B, S>(
        &self,
        buffer: &mut B,
        surface: &mut HeatmapSurface,
        scorer: &mut S,
        mask: &OcclusionMask,
        rect: Rect,
        depth: usize,
        sample_index: usize,
    ) -> Result<Sample>
    where
        B: RgbaViewMut,
        S: Scorer + ?Sized,
    {
        let guard = OcclusionGuard::new(buffer, mask, rect)?;
        let ctx = ScoringContext {
            image: guard.buffer(),
            heatmap: &*surface,
            window: rect,
            depth,
            sample_index,
        };
        let raw = scorer
            .score(&ctx)
            .map_err(|source| HeatmapError::ScoringFailure { rect, source })?;
        let score = checked_score(raw, rect)?;
        let sample = Sample { rect, score, depth };
        self.compositor.paint(surface, &sample, mask)?;
        if let Some(pause) = self.params.sample_interval() {
            std::thread::sleep(pause);
        }
        guard.restore()?;
        trace!(
            "OcclusionEngine: #{sample_index} ({}, {}, {}x{}) depth={depth} score={score:.4}",
            rect.x,
            rect.y,
            rect.w,
            rect.h
        );
        Ok(sample)
    }
}

fn checked_score(raw: f32, rect: Rect) -> Result<f32> {
    if !raw.is_finite() {
        return Err(HeatmapError::ScoringFailure {
            rect,
            source: format!("scorer returned non-finite score {raw}").into(),
        });
    }
    if !(0.0..=1.0).contains(&raw) {
        warn!(
            "OcclusionEngine: score {raw} for window ({}, {}, {}x{}) clamped to [0, 1]",
            rect.x, rect.y, rect.w, rect.h
        );
    }
    Ok(raw.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scorer::from_fn;
    use crate::image::RgbaImage;
    use crate::refine::NeverZoom;
    use crate::types::WindowSize;

    fn scale() -> ColorScale {
        ColorScale::from_fn(|i| [i, 0, 255 - i, 200])
    }

    #[test]
    fn scorer_sees_the_occluded_window() {
        let mut image = RgbaImage::filled(20, 20, [0, 0, 0, 255]);
        let original = image.clone();
        let engine = OcclusionEngine::new(
            HeatmapParams {
                max_window: Some(WindowSize::new(10, 10)),
                slide_ratio: 1.0,
                mask_gain: 2.0,
                ..Default::default()
            },
            scale(),
        )
        .unwrap();
        let mut surface = HeatmapSurface::new(20, 20);
        let mut scorer = from_fn(|ctx| {
            // Centre of the window is painted white, everything else black.
            let cx = ctx.window.x + ctx.window.w / 2;
            let cy = ctx.window.y + ctx.window.h / 2;
            assert_eq!(ctx.image.pixel(cx, cy)[0], 255);
            let outside = if ctx.window.x == 0 { 19 } else { 0 };
            assert_eq!(ctx.image.pixel(outside, cy)[0], 0);
            Ok(ctx.sample_index as f32 / 4.0)
        });
        let report = engine
            .run(&mut image, &mut surface, &mut scorer, &mut NeverZoom)
            .unwrap();
        assert_eq!(report.samples.len(), 4);
        assert_eq!(report.passes.len(), 1);
        assert_eq!(report.masks_generated, 1);
        assert_eq!(image, original);
    }

    #[test]
    fn out_of_range_scores_are_clamped_and_nan_fails() {
        assert_eq!(checked_score(1.5, Rect::full(1, 1)).unwrap(), 1.0);
        assert_eq!(checked_score(-0.5, Rect::full(1, 1)).unwrap(), 0.0);
        assert!(matches!(
            checked_score(f32::NAN, Rect::full(1, 1)),
            Err(HeatmapError::ScoringFailure { .. })
        ));
    }

    #[test]
    fn rejects_mismatched_surface() {
        let engine = OcclusionEngine::new(HeatmapParams::default(), scale()).unwrap();
        let mut image = RgbaImage::new(10, 10);
        let mut surface = HeatmapSurface::new(9, 10);
        let mut scorer = from_fn(|_| Ok(0.0));
        let err = engine
            .run(&mut image, &mut surface, &mut scorer, &mut NeverZoom)
            .unwrap_err();
        assert!(matches!(err, HeatmapError::InvalidArgument { .. }));
    }

    #[test]
    fn invalid_params_are_rejected_up_front() {
        let params = HeatmapParams {
            slide_ratio: -1.0,
            ..Default::default()
        };
        assert!(OcclusionEngine::new(params, scale()).is_err());
    }
}
