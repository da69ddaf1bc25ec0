//! The blurred-snapshot pipeline: validate, downscale, blur.
//!
//! Producing the frost image is a three-step pipeline over plain RGBA
//! buffers: validate the capture source, shrink it by a fixed integer factor
//! (blurring a small image is drastically cheaper and the result is
//! stretched back over the header anyway), then run a fixed-radius blur.
//! The whole pipeline is synchronous; at the default 8× downscale it costs
//! well under a millisecond for a phone-sized header.

use crate::geometry::Size;
use crate::pixmap::Pixmap;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use thiserror::Error;

/// Default integer downscale factor applied before blurring.
pub const DOWNSCALE_DEFAULT: u32 = 8;

/// Default blur radius, applied to the downscaled image.
pub const BLUR_RADIUS_DEFAULT: u32 = 5;

/// Upper bound on capture source pixels (4096 x 4096). Anything larger is
/// refused up front instead of risking the allocation.
pub const PIXEL_BUDGET: u64 = 16_777_216;

/// Why a snapshot could not be produced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// The capture source has no pixels yet (view not laid out).
    #[error("capture source is empty ({width}x{height})")]
    SourceEmpty { width: u32, height: u32 },
    /// The capture source is larger than the pixel budget.
    #[error("capture source exceeds the pixel budget ({pixels} > {limit})")]
    SourceTooLarge { pixels: u64, limit: u64 },
}

/// Downscale factor and blur radius for snapshot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotParams {
    /// Integer downscale factor, at least 1.
    pub downscale: u32,
    /// Blur radius in downscaled pixels; 0 disables the blur.
    pub radius: u32,
}

impl SnapshotParams {
    pub fn new(downscale: u32, radius: u32) -> Self {
        Self {
            downscale: downscale.max(1),
            radius,
        }
    }

    /// Check a capture source against the failure taxonomy without touching
    /// its pixels.
    pub fn validate(&self, source: Size) -> Result<(), SnapshotError> {
        if source.is_empty() {
            return Err(SnapshotError::SourceEmpty {
                width: source.width,
                height: source.height,
            });
        }
        if source.area() > PIXEL_BUDGET {
            return Err(SnapshotError::SourceTooLarge {
                pixels: source.area(),
                limit: PIXEL_BUDGET,
            });
        }
        Ok(())
    }
}

impl Default for SnapshotParams {
    fn default() -> Self {
        Self {
            downscale: DOWNSCALE_DEFAULT,
            radius: BLUR_RADIUS_DEFAULT,
        }
    }
}

/// Produce the frost image for a captured surface: downscale by
/// `params.downscale` (triangle filter), then blur with `params.radius`.
pub fn blurred_snapshot(source: &Pixmap, params: SnapshotParams) -> Result<Pixmap, SnapshotError> {
    params.validate(source.size())?;
    let width = (source.width() / params.downscale).max(1);
    let height = (source.height() / params.downscale).max(1);
    let small = imageops::resize(source.image(), width, height, FilterType::Triangle);
    let mut snapshot = Pixmap::from_image(small);
    blur(&mut snapshot, params.radius);
    Ok(snapshot)
}

/// In-place blur with a triangular kernel response: two sliding box passes
/// per axis, edges clamped. Same visual character as the stack blur
/// traditionally used for this effect, O(1) per pixel per pass.
pub fn blur(pixmap: &mut Pixmap, radius: u32) {
    if radius == 0 {
        return;
    }
    let (width, height) = (pixmap.width() as usize, pixmap.height() as usize);
    if width == 0 || height == 0 {
        return;
    }
    let r = radius as usize;
    let mut front = pixmap.image().as_raw().clone();
    let mut back = vec![0u8; front.len()];

    box_pass_h(&front, &mut back, width, height, r);
    box_pass_h(&back, &mut front, width, height, r);
    box_pass_v(&front, &mut back, width, height, r);
    box_pass_v(&back, &mut front, width, height, r);

    if let Some(done) = RgbaImage::from_raw(width as u32, height as u32, front) {
        *pixmap.image_mut() = done;
    }
}

/// One horizontal box pass with a sliding window of 2r+1, edge clamped.
fn box_pass_h(src: &[u8], dst: &mut [u8], width: usize, height: usize, r: usize) {
    let window = (2 * r + 1) as u32;
    let clamp_x = |x: isize| x.clamp(0, width as isize - 1) as usize;
    for y in 0..height {
        let row = y * width * 4;
        let mut sums = [0u32; 4];
        for i in -(r as isize)..=(r as isize) {
            let p = row + clamp_x(i) * 4;
            for c in 0..4 {
                sums[c] += src[p + c] as u32;
            }
        }
        for x in 0..width {
            let d = row + x * 4;
            for c in 0..4 {
                dst[d + c] = (sums[c] / window) as u8;
            }
            let drop = row + clamp_x(x as isize - r as isize) * 4;
            let add = row + clamp_x(x as isize + r as isize + 1) * 4;
            for c in 0..4 {
                sums[c] += src[add + c] as u32;
                sums[c] -= src[drop + c] as u32;
            }
        }
    }
}

/// One vertical box pass with a sliding window of 2r+1, edge clamped.
fn box_pass_v(src: &[u8], dst: &mut [u8], width: usize, height: usize, r: usize) {
    let window = (2 * r + 1) as u32;
    let clamp_y = |y: isize| y.clamp(0, height as isize - 1) as usize;
    for x in 0..width {
        let col = x * 4;
        let mut sums = [0u32; 4];
        for i in -(r as isize)..=(r as isize) {
            let p = clamp_y(i) * width * 4 + col;
            for c in 0..4 {
                sums[c] += src[p + c] as u32;
            }
        }
        for y in 0..height {
            let d = y * width * 4 + col;
            for c in 0..4 {
                dst[d + c] = (sums[c] / window) as u8;
            }
            let drop = clamp_y(y as isize - r as isize) * width * 4 + col;
            let add = clamp_y(y as isize + r as isize + 1) * width * 4 + col;
            for c in 0..4 {
                sums[c] += src[add + c] as u32;
                sums[c] -= src[drop + c] as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Rect;

    #[test]
    fn test_params_defaults() {
        let params = SnapshotParams::default();
        assert_eq!(params.downscale, 8);
        assert_eq!(params.radius, 5);
    }

    #[test]
    fn test_params_clamp_downscale() {
        let params = SnapshotParams::new(0, 5);
        assert_eq!(params.downscale, 1);
    }

    #[test]
    fn test_validate_empty_source() {
        let params = SnapshotParams::default();
        assert_eq!(
            params.validate(Size::new(0, 240)),
            Err(SnapshotError::SourceEmpty {
                width: 0,
                height: 240
            })
        );
        assert_eq!(
            params.validate(Size::new(480, 0)),
            Err(SnapshotError::SourceEmpty {
                width: 480,
                height: 0
            })
        );
    }

    #[test]
    fn test_validate_budget() {
        let params = SnapshotParams::default();
        // 20M pixels, over the 4096x4096 budget; checked without allocating
        assert_eq!(
            params.validate(Size::new(5000, 4000)),
            Err(SnapshotError::SourceTooLarge {
                pixels: 20_000_000,
                limit: PIXEL_BUDGET
            })
        );
        assert!(params.validate(Size::new(4096, 4096)).is_ok());
    }

    #[test]
    fn test_snapshot_dimensions() {
        let source = Pixmap::new(17, 9);
        let snap = blurred_snapshot(&source, SnapshotParams::new(8, 0)).unwrap();
        assert_eq!(snap.width(), 2);
        assert_eq!(snap.height(), 1);

        // Small sources never collapse below one pixel
        let tiny = Pixmap::new(4, 4);
        let snap = blurred_snapshot(&tiny, SnapshotParams::new(8, 0)).unwrap();
        assert_eq!(snap.size(), Size::new(1, 1));
    }

    #[test]
    fn test_snapshot_empty_source_fails() {
        let source = Pixmap::new(0, 10);
        let err = blurred_snapshot(&source, SnapshotParams::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::SourceEmpty { .. }));
    }

    #[test]
    fn test_snapshot_constant_source_stays_constant() {
        let mut source = Pixmap::new(32, 16);
        source.fill(Color::rgb(40, 80, 120));
        let snap = blurred_snapshot(&source, SnapshotParams::default()).unwrap();
        assert_eq!(snap.size(), Size::new(4, 2));
        for y in 0..snap.height() {
            for x in 0..snap.width() {
                assert_eq!(snap.pixel(x, y), Some(Color::rgb(40, 80, 120)));
            }
        }
    }

    #[test]
    fn test_blur_radius_zero_is_identity() {
        let mut pm = Pixmap::new(5, 5);
        pm.fill_rect(Rect::new(2, 2, 1, 1), Color::WHITE);
        let before = pm.clone();
        blur(&mut pm, 0);
        assert_eq!(pm.image().as_raw(), before.image().as_raw());
    }

    #[test]
    fn test_blur_spreads_symmetrically() {
        let mut pm = Pixmap::new(9, 1);
        pm.fill(Color::BLACK);
        pm.fill_rect(Rect::new(4, 0, 1, 1), Color::WHITE);
        blur(&mut pm, 1);

        let at = |x: u32| pm.pixel(x, 0).unwrap().r;
        assert_eq!(at(3), at(5));
        assert_eq!(at(2), at(6));
        assert!(at(4) > at(3));
        assert!(at(3) > at(2));
        // Energy does not reach past two window widths
        assert_eq!(at(0), 0);
    }

    #[test]
    fn test_blur_radius_larger_than_image() {
        let mut pm = Pixmap::new(3, 3);
        pm.fill(Color::rgb(10, 20, 30));
        // Window wider than the surface just re-reads clamped edges
        blur(&mut pm, 10);
        assert_eq!(pm.pixel(1, 1), Some(Color::rgb(10, 20, 30)));
    }
}
