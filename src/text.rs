//! Glyph-cached text drawing for row labels.
//!
//! Rasterized coverage bitmaps are cached per (character, pixel size) and
//! blended straight onto the target pixmap. No font ships with the crate;
//! [`TextPainter::from_system`] probes the usual system font locations and
//! the screen simply drops its labels when nothing is found.

use crate::color::Color;
use crate::pixmap::Pixmap;
use fontdue::{Font, FontSettings, Metrics};
use std::collections::HashMap;

/// Common sans-serif locations on Linux installs, most specific first.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];

/// Draws text into pixmaps with a per-(char, size) glyph cache.
pub struct TextPainter {
    font: Font,
    glyphs: HashMap<(char, u32), (Metrics, Vec<u8>)>,
}

impl TextPainter {
    pub fn new(font: Font) -> Self {
        Self {
            font,
            glyphs: HashMap::new(),
        }
    }

    /// Parse a font from raw bytes (TTF/OTF).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
        Font::from_bytes(bytes, FontSettings::default()).map(Self::new)
    }

    /// Probe the standard system font paths. Returns `None` when no usable
    /// font is installed; callers are expected to keep rendering without
    /// labels in that case.
    pub fn from_system() -> Option<Self> {
        for path in SYSTEM_FONT_PATHS {
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            match Self::from_bytes(&bytes) {
                Ok(painter) => {
                    log::info!("using system font {path}");
                    return Some(painter);
                }
                Err(err) => log::warn!("skipping font {path}: {err}"),
            }
        }
        log::warn!("no system font found, text labels are disabled");
        None
    }

    /// Vertical advance for a line of the given pixel size.
    pub fn line_height(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px * 1.2)
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px * 0.8)
    }

    /// Draw one line of text with its top-left corner at (x, y).
    pub fn draw(
        &mut self,
        target: &mut Pixmap,
        x: i32,
        y: i32,
        px: f32,
        text: &str,
        color: Color,
    ) {
        let baseline = y + self.ascent(px).round() as i32;
        let mut pen_x = x as f32;
        for c in text.chars() {
            let (metrics, coverage) = self
                .glyphs
                .entry((c, px as u32))
                .or_insert_with(|| self.font.rasterize(c, px));

            let glyph_x = pen_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline - metrics.height as i32 - metrics.ymin;
            for (i, cov) in coverage.iter().enumerate() {
                if *cov == 0 {
                    continue;
                }
                let dx = (i % metrics.width) as i32;
                let dy = (i / metrics.width) as i32;
                target.blend_coverage(glyph_x + dx, glyph_y + dy, color, *cov);
            }
            pen_x += metrics.advance_width;
        }
    }
}
