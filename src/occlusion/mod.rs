//! Occlusion primitives: blend masks, occlusion color choice and the
//! occlude/restore pair.

pub mod color;
pub mod mask;
pub mod occluder;

pub use color::{pick_color, OcclusionColor};
pub use mask::{MaskCache, OcclusionMask, DEFAULT_MASK_GAIN};
pub use occluder::{mean_color, occlude, restore, Backup, OcclusionGuard};
