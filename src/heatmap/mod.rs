//! Heatmap compositing: the injected [`ColorScale`], the [`HeatmapSurface`]
//! overlay and the [`HeatmapCompositor`] that paints samples onto it.

pub mod compositor;
pub mod scale;
pub mod surface;

pub use compositor::{HeatmapCompositor, PaintMode};
pub use scale::{ColorScale, SCALE_LEN};
pub use surface::HeatmapSurface;
