//! Software raster surface backed by an RGBA image buffer.
//!
//! Every surface in the crate (the frame, the header banner, the blurred
//! snapshot) is a [`Pixmap`]. Drawing is plain integer alpha blending; the
//! only filtered path is [`Pixmap::draw_pixmap_scaled`], which upsamples the
//! small snapshot back over the header with bilinear taps.

use crate::color::Color;
use crate::geometry::{Rect, Size};
use image::{Rgba, RgbaImage};

/// An owned RGBA pixel buffer with clipped drawing operations.
#[derive(Debug, Clone)]
pub struct Pixmap {
    image: RgbaImage,
}

impl Pixmap {
    /// A transparent pixmap. Zero dimensions are allowed and draw nothing.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    /// The full surface as a rect at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Read a pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite the whole surface with one color.
    pub fn fill(&mut self, color: Color) {
        let px = Rgba([color.r, color.g, color.b, color.a]);
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Overwrite a rect with one color, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let clip = rect.intersection(&self.bounds());
        if clip.is_empty() {
            return;
        }
        let px = Rgba([color.r, color.g, color.b, color.a]);
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                self.image.put_pixel(x as u32, y as u32, px);
            }
        }
    }

    /// Alpha-blend a color over a rect, clipped to the surface.
    pub fn blend_rect(&mut self, rect: Rect, color: Color) {
        let clip = rect.intersection(&self.bounds());
        if clip.is_empty() || color.a == 0 {
            return;
        }
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let dst = self.image.get_pixel_mut(x as u32, y as u32);
                blend(dst, color, color.a as u32);
            }
        }
    }

    /// Alpha-blend another pixmap at (x, y), 1:1, clipped to the surface.
    pub fn draw_pixmap(&mut self, src: &Pixmap, x: i32, y: i32) {
        let clip = Rect::new(x, y, src.width(), src.height()).intersection(&self.bounds());
        if clip.is_empty() {
            return;
        }
        for dy in clip.y..clip.bottom() {
            for dx in clip.x..clip.right() {
                let sp = src.image.get_pixel((dx - x) as u32, (dy - y) as u32);
                if sp[3] == 0 {
                    continue;
                }
                let dst = self.image.get_pixel_mut(dx as u32, dy as u32);
                blend(dst, Color::rgba(sp[0], sp[1], sp[2], sp[3]), sp[3] as u32);
            }
        }
    }

    /// Stretch `src` over `dst` with bilinear sampling, modulated by
    /// `opacity` in [0, 1]. This is the frost overlay path: the snapshot is a
    /// fraction of the header size and gets blown back up here.
    pub fn draw_pixmap_scaled(&mut self, src: &Pixmap, dst: Rect, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        let clip = dst.intersection(&self.bounds());
        if clip.is_empty() || dst.is_empty() || src.size().is_empty() || opacity == 0.0 {
            return;
        }
        let sx = src.width() as f32 / dst.width as f32;
        let sy = src.height() as f32 / dst.height as f32;
        for y in clip.y..clip.bottom() {
            let v = ((y - dst.y) as f32 + 0.5) * sy - 0.5;
            for x in clip.x..clip.right() {
                let u = ((x - dst.x) as f32 + 0.5) * sx - 0.5;
                let [r, g, b, a] = sample_bilinear(&src.image, u, v);
                let alpha = (a * opacity).round() as u32;
                if alpha == 0 {
                    continue;
                }
                let dst_px = self.image.get_pixel_mut(x as u32, y as u32);
                blend(
                    dst_px,
                    Color::rgba(r.round() as u8, g.round() as u8, b.round() as u8, 255),
                    alpha.min(255),
                );
            }
        }
    }

    /// Blend a color weighted by a coverage value (glyph rasterization).
    pub(crate) fn blend_coverage(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let alpha = color.a as u32 * coverage as u32 / 255;
        if alpha == 0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        blend(dst, color, alpha);
    }

    /// Pack the surface into 0RGB words for a software present buffer.
    /// Stops at whichever of the two buffers is shorter.
    pub fn write_argb(&self, out: &mut [u32]) {
        for (px, word) in self.image.pixels().zip(out.iter_mut()) {
            *word = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
        }
    }
}

/// Straight-alpha over-blend with round-to-nearest integer math.
/// `alpha` is the effective source alpha in [0, 255].
fn blend(dst: &mut Rgba<u8>, src: Color, alpha: u32) {
    let inv = 255 - alpha;
    dst[0] = ((src.r as u32 * alpha + dst[0] as u32 * inv + 127) / 255) as u8;
    dst[1] = ((src.g as u32 * alpha + dst[1] as u32 * inv + 127) / 255) as u8;
    dst[2] = ((src.b as u32 * alpha + dst[2] as u32 * inv + 127) / 255) as u8;
    dst[3] = (alpha + dst[3] as u32 * inv / 255) as u8;
}

/// Four-tap bilinear sample with edge clamp, returns RGBA as f32.
fn sample_bilinear(img: &RgbaImage, u: f32, v: f32) -> [f32; 4] {
    let max_x = img.width() as f32 - 1.0;
    let max_y = img.height() as f32 - 1.0;
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);
    let x0 = u.floor() as u32;
    let y0 = v.floor() as u32;
    let x1 = (x0 + 1).min(img.width() - 1);
    let y1 = (y0 + 1).min(img.height() - 1);
    let fx = u - x0 as f32;
    let fy = v - y0 as f32;

    let p00 = img.get_pixel(x0, y0);
    let p10 = img.get_pixel(x1, y0);
    let p01 = img.get_pixel(x0, y1);
    let p11 = img.get_pixel(x1, y1);

    let mut out = [0.0f32; 4];
    for (c, slot) in out.iter_mut().enumerate() {
        let top = p00[c] as f32 + (p10[c] as f32 - p00[c] as f32) * fx;
        let bottom = p01[c] as f32 + (p11[c] as f32 - p01[c] as f32) * fx;
        *slot = top + (bottom - top) * fy;
    }
    out
}
