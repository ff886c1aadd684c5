//! The occlusion engine: drives the refiner, grid walker, occluder and
//! compositor around an injected scorer.
//!
//! Modules
//! - [`params`] – run configuration ([`HeatmapParams`]).
//! - [`scorer`] – the [`Scorer`] seam and its [`ScoringContext`].
//! - [`cancel`] – cooperative cancellation ([`CancelToken`]).
//! - `pipeline` – the [`OcclusionEngine`] driver loop.

pub mod cancel;
pub mod params;
mod pipeline;
pub mod scorer;

pub use cancel::CancelToken;
pub use params::HeatmapParams;
pub use pipeline::OcclusionEngine;
pub use scorer::{from_fn, FnScorer, Scorer, ScoringContext};
