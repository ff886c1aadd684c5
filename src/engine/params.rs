//! Engine configuration.
use crate::error::{HeatmapError, Result};
use crate::heatmap::PaintMode;
use crate::occlusion::DEFAULT_MASK_GAIN;
use crate::refine::RefinePolicy;
use crate::types::WindowSize;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for one heatmap run. Every field has a default, so a config
/// file only needs to mention what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapParams {
    /// Base slide step as a fraction of the window size, in `(0, 1]`.
    pub slide_ratio: f32,
    /// Initial window. `None` uses half the image, rounded up.
    pub max_window: Option<WindowSize>,
    /// Smallest window refinement may produce.
    pub min_window: WindowSize,
    /// Master switch for everything after the first pass.
    pub refine_enabled: bool,
    pub refine: RefinePolicy,
    /// Multiplier on the radial falloff before clamping to `[0, 1]`.
    pub mask_gain: f32,
    pub paint_mode: PaintMode,
    /// Pause between scoring a window and restoring it. Pacing only.
    pub sample_interval_ms: u64,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            slide_ratio: 0.5,
            max_window: None,
            min_window: WindowSize::new(5, 5),
            refine_enabled: true,
            refine: RefinePolicy::Adaptive,
            mask_gain: DEFAULT_MASK_GAIN,
            paint_mode: PaintMode::SourceOver,
            sample_interval_ms: 0,
        }
    }
}

impl HeatmapParams {
    pub fn validate(&self) -> Result<()> {
        if !self.slide_ratio.is_finite() || self.slide_ratio <= 0.0 || self.slide_ratio > 1.0 {
            return Err(HeatmapError::invalid(format!(
                "slide_ratio must lie in (0, 1], got {}",
                self.slide_ratio
            )));
        }
        if let Some(max) = self.max_window {
            if max.is_empty() {
                return Err(HeatmapError::invalid(format!(
                    "max_window must be non-empty, got {max}"
                )));
            }
        }
        if self.min_window.is_empty() {
            return Err(HeatmapError::invalid(format!(
                "min_window must be non-empty, got {}",
                self.min_window
            )));
        }
        if !self.mask_gain.is_finite() || self.mask_gain < 0.0 {
            return Err(HeatmapError::invalid(format!(
                "mask_gain must be finite and non-negative, got {}",
                self.mask_gain
            )));
        }
        if let RefinePolicy::GlobalShrink { ratio, passes } = self.refine {
            if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
                return Err(HeatmapError::invalid(format!(
                    "global shrink ratio must lie in (0, 1), got {ratio}"
                )));
            }
            if passes == 0 {
                return Err(HeatmapError::invalid(
                    "global shrink needs at least one pass",
                ));
            }
        }
        Ok(())
    }

    /// Window used by the first pass over a `width × height` image, clamped
    /// to the image.
    pub fn initial_window(&self, width: usize, height: usize) -> WindowSize {
        let window = self
            .max_window
            .unwrap_or_else(|| WindowSize::new(width.div_ceil(2), height.div_ceil(2)));
        let window = window.clamp_to(WindowSize::new(width, height));
        WindowSize::new(window.w.max(1), window.h.max(1))
    }

    pub fn sample_interval(&self) -> Option<Duration> {
        (self.sample_interval_ms > 0).then(|| Duration::from_millis(self.sample_interval_ms))
    }
}
