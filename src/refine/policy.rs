//! Refinement policies and the zoom decision.
use crate::types::WindowSize;
use serde::{Deserialize, Serialize};

const DEFAULT_SHRINK_RATIO: f32 = 0.9;
const DEFAULT_SHRINK_PASSES: usize = 100;

fn default_shrink_ratio() -> f32 {
    DEFAULT_SHRINK_RATIO
}

fn default_shrink_passes() -> usize {
    DEFAULT_SHRINK_PASSES
}

/// How the refiner schedules passes after the initial full-image sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefinePolicy {
    /// Re-sweep a scored window with half-size windows whenever the zoom
    /// predicate fires for it.
    #[default]
    Adaptive,
    /// Re-sweep the whole image with the window scaled by `ratio` after every
    /// pass, for at most `passes` sweeps in total.
    GlobalShrink {
        #[serde(default = "default_shrink_ratio")]
        ratio: f32,
        #[serde(default = "default_shrink_passes")]
        passes: usize,
    },
}

impl RefinePolicy {
    pub fn global_shrink() -> Self {
        RefinePolicy::GlobalShrink {
            ratio: DEFAULT_SHRINK_RATIO,
            passes: DEFAULT_SHRINK_PASSES,
        }
    }
}

/// Decides whether a scored window deserves a finer sweep.
pub trait ZoomPredicate {
    fn should_zoom(&mut self, score: f32) -> bool;
}

impl<F> ZoomPredicate for F
where
    F: FnMut(f32) -> bool,
{
    fn should_zoom(&mut self, score: f32) -> bool {
        self(score)
    }
}

/// Zoom when the score is strictly above the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreThreshold(pub f32);

impl ZoomPredicate for ScoreThreshold {
    fn should_zoom(&mut self, score: f32) -> bool {
        score > self.0
    }
}

/// Never refine.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverZoom;

impl ZoomPredicate for NeverZoom {
    fn should_zoom(&mut self, _score: f32) -> bool {
        false
    }
}

/// Next window size when zooming into `current`, if any.
///
/// The halved size must stay at or above `min` in both dimensions and be
/// strictly smaller than `current`; the latter stops 1×1 windows (or sizes
/// where rounding stalls) from recursing forever.
pub fn refined_window(current: WindowSize, min: WindowSize) -> Option<WindowSize> {
    let next = current.halved();
    let shrinks = next.w <= current.w && next.h <= current.h && next != current;
    (shrinks && next.covers(min)).then_some(next)
}

/// Next whole-image window for [`RefinePolicy::GlobalShrink`], if any.
pub fn shrunk_window(current: WindowSize, ratio: f32, min: WindowSize) -> Option<WindowSize> {
    let next = current.scaled(ratio).clamp_to(current);
    (next != current && !next.is_empty() && next.covers(min)).then_some(next)
}

/// Upper bound on the number of halvings below `initial`,
/// `ceil(log2(initial / min))` taken over the worse axis.
pub fn max_depth_for(initial: WindowSize, min: WindowSize) -> usize {
    let axis = |from: usize, to: usize| {
        let ratio = from as f64 / to.max(1) as f64;
        if ratio <= 1.0 {
            0
        } else {
            ratio.log2().ceil() as usize
        }
    };
    axis(initial.w, min.w).max(axis(initial.h, min.h))
}

/// Every window size adaptive refinement visits below `initial`.
pub fn refinement_chain(initial: WindowSize, min: WindowSize) -> Vec<WindowSize> {
    let mut chain = Vec::new();
    let mut current = initial;
    while let Some(next) = refined_window(current, min) {
        chain.push(next);
        current = next;
    }
    chain
}
