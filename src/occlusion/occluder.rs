//! Occlude a window in place and put it back afterwards.
//!
//! [`occlude`] blends the picked occlusion color over the window using the
//! mask weights (`floor(w * c + (1 - w) * v)` per RGB channel, alpha kept) and
//! returns a [`Backup`] of the original pixels. [`restore`] writes the backup
//! back, leaving the buffer byte-identical to its state before [`occlude`].
//!
//! [`OcclusionGuard`] ties the two together: it restores on drop, so early
//! returns and unwinding never leave a window occluded.
use super::color::{pick_color, OcclusionColor};
use super::mask::OcclusionMask;
use crate::error::{HeatmapError, Result};
use crate::image::{RgbaView, RgbaViewMut};
use crate::types::{Rect, Rgb};
use log::warn;

/// Original pixels of an occluded window, `w * h` RGBA pixels row-major
/// regardless of the parent buffer's stride.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backup {
    rect: Rect,
    color: OcclusionColor,
    pixels: Vec<u8>,
}

impl Backup {
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Color that was blended over the window.
    #[inline]
    pub fn color(&self) -> OcclusionColor {
        self.color
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

fn check_window<B: RgbaView + ?Sized>(buffer: &B, rect: Rect) -> Result<()> {
    if rect.is_empty() {
        return Err(HeatmapError::invalid(format!(
            "window {}x{} at ({}, {}) is empty",
            rect.w, rect.h, rect.x, rect.y
        )));
    }
    if !rect.fits_within(buffer.width(), buffer.height()) {
        return Err(HeatmapError::invalid(format!(
            "window {}x{} at ({}, {}) exceeds {}x{} buffer",
            rect.w,
            rect.h,
            rect.x,
            rect.y,
            buffer.width(),
            buffer.height()
        )));
    }
    Ok(())
}

/// Channel-wise floor average of the RGB values inside `rect`.
pub fn mean_color<B: RgbaView + ?Sized>(buffer: &B, rect: Rect) -> Result<Rgb> {
    check_window(buffer, rect)?;
    let mut sum = [0u64; 3];
    for y in rect.y..rect.bottom() {
        let row = &buffer.row(y)[rect.x * 4..rect.right() * 4];
        for px in row.chunks_exact(4) {
            sum[0] += px[0] as u64;
            sum[1] += px[1] as u64;
            sum[2] += px[2] as u64;
        }
    }
    let n = rect.area() as u64;
    Ok([(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8])
}

#[inline]
fn blend(weight: f32, color: f32, value: u8) -> u8 {
    (weight * color + (1.0 - weight) * value as f32)
        .floor()
        .clamp(0.0, 255.0) as u8
}

/// Blend the occlusion color over `rect` and return the original pixels.
///
/// Fails without touching the buffer when the window is empty, leaves the
/// buffer, or does not match the mask size.
pub fn occlude<B: RgbaViewMut + ?Sized>(
    buffer: &mut B,
    mask: &OcclusionMask,
    rect: Rect,
) -> Result<Backup> {
    if mask.size() != rect.size() {
        return Err(HeatmapError::invalid(format!(
            "mask {} does not match window {}",
            mask.size(),
            rect.size()
        )));
    }
    let color = pick_color(mean_color(&*buffer, rect)?);
    let c = color.value() as f32;

    let mut pixels = vec![0u8; rect.area() * 4];
    for (dy, backup_row) in pixels.chunks_exact_mut(rect.w * 4).enumerate() {
        let weights = mask.row(dy);
        let row = &mut buffer.row_mut(rect.y + dy)[rect.x * 4..rect.right() * 4];
        backup_row.copy_from_slice(row);
        for (px, &weight) in row.chunks_exact_mut(4).zip(weights) {
            for v in &mut px[..3] {
                *v = blend(weight, c, *v);
            }
        }
    }
    Ok(Backup {
        rect,
        color,
        pixels,
    })
}

/// Write the RGB channels saved in `backup` back into the buffer.
pub fn restore<B: RgbaViewMut + ?Sized>(buffer: &mut B, backup: &Backup) -> Result<()> {
    let rect = backup.rect;
    check_window(&*buffer, rect)?;
    if backup.pixels.len() != rect.area() * 4 {
        return Err(HeatmapError::invalid(format!(
            "backup holds {} bytes, window {} needs {}",
            backup.pixels.len(),
            rect.size(),
            rect.area() * 4
        )));
    }
    for (dy, saved) in backup.pixels.chunks_exact(rect.w * 4).enumerate() {
        let row = &mut buffer.row_mut(rect.y + dy)[rect.x * 4..rect.right() * 4];
        for (dst, src) in row.chunks_exact_mut(4).zip(saved.chunks_exact(4)) {
            dst[..3].copy_from_slice(&src[..3]);
        }
    }
    Ok(())
}

/// Occluded window that is restored when the guard goes away.
pub struct OcclusionGuard<'a, B: RgbaViewMut + ?Sized> {
    buffer: &'a mut B,
    backup: Option<Backup>,
}

impl<'a, B: RgbaViewMut + ?Sized> OcclusionGuard<'a, B> {
    pub fn new(buffer: &'a mut B, mask: &OcclusionMask, rect: Rect) -> Result<Self> {
        let backup = occlude(&mut *buffer, mask, rect)?;
        Ok(Self {
            buffer,
            backup: Some(backup),
        })
    }

    /// The buffer with the window currently occluded.
    #[inline]
    pub fn buffer(&self) -> &B {
        &*self.buffer
    }

    pub fn backup(&self) -> Option<&Backup> {
        self.backup.as_ref()
    }

    /// Restore now and surface any error instead of logging it on drop.
    pub fn restore(mut self) -> Result<()> {
        match self.backup.take() {
            Some(backup) => restore(&mut *self.buffer, &backup),
            None => Ok(()),
        }
    }
}

impl<B: RgbaViewMut + ?Sized> Drop for OcclusionGuard<'_, B> {
    fn drop(&mut self) {
        if let Some(backup) = self.backup.take() {
            if let Err(err) = restore(&mut *self.buffer, &backup) {
                warn!("OcclusionGuard: restore on drop failed: {err}");
            }
        }
    }
}
