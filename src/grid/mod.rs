//! Sliding-window traversal of a region.
//!
//! - [`slide`] computes per-axis step sizes and window origins.
//! - [`walker`] combines both axes into a row-major [`GridWalker`].

pub mod slide;
pub mod walker;

pub use slide::{axis_positions, compute_slide};
pub use walker::GridWalker;
