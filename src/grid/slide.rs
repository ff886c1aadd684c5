//! Slide-step arithmetic for one axis.
//!
//! The traversable span `total - desired` is split into `count` near-equal
//! steps, `count = ceil(span / desired)`, `slide = ceil(span / count)`. This
//! keeps sampling density even instead of ending on a short remainder step.
use crate::error::{HeatmapError, Result};

/// Step size for sweeping `total` pixels with a base step of `desired`.
///
/// `desired` is rounded up to a whole pixel. When it already covers `total`
/// a single step is all there is and `desired` is returned unchanged. The
/// result is always at least 1.
pub fn compute_slide(total: usize, desired: f32) -> Result<usize> {
    if !desired.is_finite() || desired <= 0.0 {
        return Err(HeatmapError::invalid(format!(
            "slide must be finite and positive, got {desired}"
        )));
    }
    let desired = (desired.ceil() as usize).max(1);
    if total <= desired {
        return Ok(desired);
    }
    let span = total - desired;
    let count = span.div_ceil(desired);
    Ok(span.div_ceil(count).max(1))
}

/// Window origins along one axis of `[start, start + extent)`.
///
/// Steps by `slide` while the window fits; the step that would overshoot is
/// snapped flush to the far edge instead. Both `start` and the flush position
/// `start + extent - window` are emitted exactly once. A window at least as
/// large as the extent yields the single position `start`.
pub fn axis_positions(
    start: usize,
    extent: usize,
    window: usize,
    slide: usize,
) -> Result<Vec<usize>> {
    if slide == 0 {
        return Err(HeatmapError::invalid("slide of 0 would never advance"));
    }
    if window == 0 {
        return Err(HeatmapError::invalid("window extent must be positive"));
    }
    if window >= extent {
        return Ok(vec![start]);
    }
    let last = start + extent - window;
    let mut positions = Vec::with_capacity((extent - window) / slide + 2);
    let mut pos = start;
    loop {
        positions.push(pos);
        if pos == last {
            break;
        }
        pos += slide;
        if pos > last {
            positions.push(last);
            break;
        }
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_splits_span_evenly() {
        assert_eq!(compute_slide(100, 25.0).unwrap(), 25);
        assert_eq!(compute_slide(100, 50.0).unwrap(), 50);
        // span 37 over ceil(37 / 13) = 3 steps
        assert_eq!(compute_slide(50, 12.5).unwrap(), 13);
        // span 18 over 3 steps
        assert_eq!(compute_slide(25, 6.5).unwrap(), 6);
    }

    #[test]
    fn slide_covering_the_axis_is_a_single_step() {
        assert_eq!(compute_slide(10, 10.0).unwrap(), 10);
        assert_eq!(compute_slide(4, 10.0).unwrap(), 10);
        assert_eq!(compute_slide(10, 0.2).unwrap(), 1);
    }

    #[test]
    fn slide_rejects_nonsense() {
        assert!(compute_slide(10, 0.0).is_err());
        assert!(compute_slide(10, f32::NAN).is_err());
        assert!(axis_positions(0, 10, 4, 0).is_err());
    }

    #[test]
    fn positions_snap_flush_without_duplicates() {
        assert_eq!(axis_positions(0, 100, 50, 25).unwrap(), vec![0, 25, 50]);
        assert_eq!(axis_positions(0, 100, 50, 50).unwrap(), vec![0, 50]);
        assert_eq!(axis_positions(10, 20, 8, 5).unwrap(), vec![10, 15, 20, 22]);
        assert_eq!(axis_positions(3, 5, 9, 2).unwrap(), vec![3]);
    }

    #[test]
    fn positions_cover_both_edges_exactly_once() {
        for total in 1..=64usize {
            for window in 1..=total {
                for ratio in [0.25f32, 0.5, 0.9, 1.0] {
                    let slide = compute_slide(total, window as f32 * ratio).unwrap();
                    let xs = axis_positions(0, total, window, slide).unwrap();
                    let last = total - window;
                    assert_eq!(xs.first(), Some(&0));
                    assert_eq!(xs.last(), Some(&last));
                    assert_eq!(xs.iter().filter(|&&x| x == 0).count(), 1);
                    assert_eq!(xs.iter().filter(|&&x| x == last).count(), 1);
                    assert!(xs.windows(2).all(|p| p[0] < p[1]));
                    assert!(xs.iter().all(|&x| x + window <= total));
                }
            }
        }
    }
}
