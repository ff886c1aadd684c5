pub mod io;
pub mod rgba;
pub mod traits;

pub use self::rgba::{RgbaImage, RgbaImageMut};
pub use self::traits::{RgbaView, RgbaViewMut, Rows};
