use crate::types::{Rect, Sample, WindowSize, WorkItem};
use serde::Serialize;

/// Result of [`OcclusionEngine::run`](crate::OcclusionEngine::run).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapReport {
    pub input: InputDescriptor,
    /// Every scored window, in scoring (and painting) order.
    pub samples: Vec<Sample>,
    /// One entry per sweep pass, in execution order.
    pub passes: Vec<PassSummary>,
    /// Distinct window sizes that needed a mask.
    pub masks_generated: usize,
    pub total_ms: f64,
}

impl HeatmapReport {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            samples: Vec::new(),
            passes: Vec::new(),
            masks_generated: 0,
            total_ms: 0.0,
        }
    }

    /// Deepest refinement level reached.
    pub fn max_depth(&self) -> usize {
        self.passes.iter().map(|p| p.depth).max().unwrap_or(0)
    }

    /// Highest-scoring sample; the finest one wins ties.
    pub fn hottest(&self) -> Option<&Sample> {
        self.samples.iter().max_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.depth.cmp(&b.depth))
        })
    }

    /// Samples produced at refinement `depth`.
    pub fn samples_at_depth(&self, depth: usize) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter().filter(move |s| s.depth == depth)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub initial_window: WindowSize,
}

/// Statistics of one sweep over a work item.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassSummary {
    pub region: Rect,
    pub window: WindowSize,
    pub depth: usize,
    pub samples: usize,
    /// Child passes scheduled from this pass.
    pub zoomed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f32>,
    pub elapsed_ms: f64,
    #[serde(skip)]
    score_sum: f64,
}

impl PassSummary {
    /// Empty summary for `item`, swept with the (clamped) `window`.
    pub fn new(item: &WorkItem, window: WindowSize) -> Self {
        Self {
            region: item.region,
            window,
            depth: item.depth,
            samples: 0,
            zoomed: 0,
            min_score: None,
            max_score: None,
            mean_score: None,
            elapsed_ms: 0.0,
            score_sum: 0.0,
        }
    }

    pub fn record(&mut self, score: f32) {
        self.samples += 1;
        self.score_sum += score as f64;
        self.min_score = Some(self.min_score.map_or(score, |m| m.min(score)));
        self.max_score = Some(self.max_score.map_or(score, |m| m.max(score)));
        self.mean_score = Some((self.score_sum / self.samples as f64) as f32);
    }
}
