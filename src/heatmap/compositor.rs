//! Paint scored windows onto a [`HeatmapSurface`].
//!
//! The sample's score picks a color from the [`ColorScale`]; the entry's alpha
//! is scaled by the occlusion mask weight of each pixel, so a window paints
//! most strongly at its centre and fades towards its border. Samples are
//! painted in the order they are scored, which puts finer passes on top.
use super::scale::ColorScale;
use super::surface::HeatmapSurface;
use crate::error::{HeatmapError, Result};
use crate::image::RgbaViewMut;
use crate::occlusion::OcclusionMask;
use crate::types::Sample;
use serde::{Deserialize, Serialize};

/// How a painted pixel combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintMode {
    /// Straight-alpha source-over: later samples cover earlier ones in
    /// proportion to their alpha.
    #[default]
    SourceOver,
    /// Later samples replace earlier ones outright (alpha included).
    Replace,
}

#[derive(Clone, Debug)]
pub struct HeatmapCompositor {
    scale: ColorScale,
    mode: PaintMode,
}

impl HeatmapCompositor {
    pub fn new(scale: ColorScale, mode: PaintMode) -> Self {
        Self { scale, mode }
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    /// Composite one sample. The mask must match the sample's window size.
    pub fn paint(
        &self,
        surface: &mut HeatmapSurface,
        sample: &Sample,
        mask: &OcclusionMask,
    ) -> Result<()> {
        let rect = sample.rect;
        if mask.size() != rect.size() {
            return Err(HeatmapError::invalid(format!(
                "mask {} does not match sample window {}",
                mask.size(),
                rect.size()
            )));
        }
        if rect.is_empty() || !rect.fits_within(surface.width(), surface.height()) {
            return Err(HeatmapError::invalid(format!(
                "sample window {}x{} at ({}, {}) exceeds {}x{} surface",
                rect.w,
                rect.h,
                rect.x,
                rect.y,
                surface.width(),
                surface.height()
            )));
        }

        let color = self.scale.lookup(sample.score);
        let alpha = color[3] as f32 / 255.0;
        let image = surface.image_mut();
        for dy in 0..rect.h {
            let weights = mask.row(dy);
            let row = &mut image.row_mut(rect.y + dy)[rect.x * 4..rect.right() * 4];
            for (dst, &weight) in row.chunks_exact_mut(4).zip(weights) {
                let a = alpha * weight;
                match self.mode {
                    PaintMode::SourceOver => composite_over(dst, color, a),
                    PaintMode::Replace => {
                        dst[..3].copy_from_slice(&color[..3]);
                        dst[3] = to_u8(a);
                    }
                }
            }
        }
        Ok(())
    }
}

#[inline]
fn to_u8(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Straight-alpha source-over of `src` (with effective alpha `sa`) onto `dst`.
#[inline]
fn composite_over(dst: &mut [u8], src: [u8; 4], sa: f32) {
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        dst.fill(0);
        return;
    }
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = to_u8(out_a);
}
