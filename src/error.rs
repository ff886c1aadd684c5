use crate::types::Rect;

/// Error type scorers hand back to the engine.
pub type ScoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures raised while building a heatmap.
///
/// Every variant is raised with the pixel buffer in its original state: input
/// validation happens before any pixel is touched, and the occluded window is
/// restored before a scoring failure propagates.
#[derive(Debug)]
pub enum HeatmapError {
    /// Geometry or parameters the engine cannot work with.
    InvalidArgument { reason: String },
    /// The injected scorer rejected the occluded image in `rect`.
    ScoringFailure { rect: Rect, source: ScoreError },
    /// The run was cancelled between two windows.
    Cancelled { samples: usize },
}

impl HeatmapError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        HeatmapError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for HeatmapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeatmapError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            HeatmapError::ScoringFailure { rect, source } => write!(
                f,
                "scoring failed for window ({}, {}, {}x{}): {source}",
                rect.x, rect.y, rect.w, rect.h
            ),
            HeatmapError::Cancelled { samples } => {
                write!(f, "cancelled after {samples} samples")
            }
        }
    }
}

impl std::error::Error for HeatmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeatmapError::ScoringFailure { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
