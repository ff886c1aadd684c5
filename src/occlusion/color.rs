use crate::types::Rgb;
use serde::Serialize;

/// Black and white count as tied when their squared distances differ by no
/// more than this. Mid-gray sits at 127 rather than 127.5, which skews the
/// black/white comparison by up to `3 * 255` for means around mid-gray.
/// The band only covers channel sums `381..=384`, which is what makes
/// `(127, 127, 127)` pick gray instead of white.
const BLACK_WHITE_TIE: u32 = 3 * 255;

/// Fill used to occlude a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OcclusionColor {
    Black,
    White,
    Gray,
}

impl OcclusionColor {
    /// Channel value written for every RGB component.
    pub const fn value(self) -> u8 {
        match self {
            OcclusionColor::Black => 0,
            OcclusionColor::White => 255,
            OcclusionColor::Gray => 127,
        }
    }
}

#[inline]
fn dist_sq(mean: Rgb, v: u8) -> u32 {
    mean.iter()
        .map(|&c| {
            let d = c as i32 - v as i32;
            (d * d) as u32
        })
        .sum()
}

/// Pick the reference color farthest from `mean`.
///
/// Black or white win only when strictly farther than both other candidates;
/// every other case, ties included, falls back to gray.
pub fn pick_color(mean: Rgb) -> OcclusionColor {
    let black = dist_sq(mean, OcclusionColor::Black.value());
    let white = dist_sq(mean, OcclusionColor::White.value());
    let gray = dist_sq(mean, OcclusionColor::Gray.value());
    if black > white + BLACK_WHITE_TIE && black > gray {
        OcclusionColor::Black
    } else if white > black + BLACK_WHITE_TIE && white > gray {
        OcclusionColor::White
    } else {
        OcclusionColor::Gray
    }
}
