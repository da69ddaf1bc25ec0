//! The two surfaces layered over the banner: frost and scrim.
//!
//! The scroll controller writes an image and opacities here; the compositor
//! reads them back when assembling a frame. The frost overlay stretches the
//! small blurred snapshot back over the banner rect, the scrim lays a
//! translucent wash on top of it. Both are plain state holders that paint
//! into a target pixmap, so the whole stack stays headless-testable.

use crate::color::Color;
use crate::geometry::Rect;
use crate::pixmap::Pixmap;
use std::sync::Arc;

/// Displays the blurred banner snapshot, faded in over the live banner.
#[derive(Debug, Clone, Default)]
pub struct FrostOverlay {
    image: Option<Arc<Pixmap>>,
    opacity: f32,
}

impl FrostOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the displayed image. `None` empties the overlay.
    pub fn set_image(&mut self, image: Option<Arc<Pixmap>>) {
        self.image = image;
    }

    pub fn image(&self) -> Option<&Arc<Pixmap>> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Set the display opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Stretch the image over `dst`. Does nothing while empty or invisible.
    pub fn paint(&self, frame: &mut Pixmap, dst: Rect) {
        if let Some(image) = &self.image {
            frame.draw_pixmap_scaled(image, dst, self.opacity);
        }
    }
}

/// The translucent wash that dims the banner as it scrolls away.
///
/// The wash color carries its own base alpha; the effective alpha is
/// `base * opacity`, so even a fully faded-in wash never turns opaque.
#[derive(Debug, Clone)]
pub struct ScrimOverlay {
    color: Color,
    opacity: f32,
}

impl ScrimOverlay {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            opacity: 0.0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the wash opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Blend the wash over `dst` at the effective alpha.
    pub fn paint(&self, frame: &mut Pixmap, dst: Rect) {
        let alpha = (self.color.a as f32 * self.opacity).round() as u8;
        if alpha == 0 {
            return;
        }
        frame.blend_rect(dst, self.color.with_alpha(alpha));
    }
}
