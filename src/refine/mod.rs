//! Coarse-to-fine scheduling of occlusion sweeps.
//!
//! - [`policy`]: the refinement policies, zoom predicates and window-size
//!   arithmetic (halving for adaptive zoom, scaling for global shrink).
//! - [`refiner`]: the FIFO [`RegionRefiner`] handing out [`WorkItem`]s.
//!
//! [`WorkItem`]: crate::types::WorkItem

pub mod policy;
pub mod refiner;

pub use policy::{
    max_depth_for, refined_window, refinement_chain, shrunk_window, NeverZoom, RefinePolicy,
    ScoreThreshold, ZoomPredicate,
};
pub use refiner::RegionRefiner;
