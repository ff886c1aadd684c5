//! Run diagnostics returned by the engine and written by the demo.
//!
//! [`HeatmapReport`] lists every sample in painting order together with a
//! per-pass [`PassSummary`], which is enough to replay or re-render a run.

pub mod report;

pub use report::{HeatmapReport, InputDescriptor, PassSummary};
