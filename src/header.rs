//! The banner behind the list: a small set of procedural pages, or a photo.
//!
//! The header renders itself into its own pixmap; that pixmap is both what
//! the compositor draws at the top of the frame and what the snapshot
//! pipeline captures. A tap forwarded to the header advances to the next
//! page, which stands in for the swipeable pager this layout classically
//! carries.

use crate::color::Color;
use crate::event::{Event, EventResponse};
use crate::geometry::{Rect, Size};
use crate::pixmap::Pixmap;

/// Colors for one procedural banner page: a vertical gradient plus accent
/// discs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub top: Color,
    pub bottom: Color,
    pub accent: Color,
}

pub const DEFAULT_PALETTES: [Palette; 3] = [
    Palette {
        top: Color::from_hex(0x3B82F6),
        bottom: Color::from_hex(0x1E3A8A),
        accent: Color::from_hex(0xFBBF24),
    },
    Palette {
        top: Color::from_hex(0xF472B6),
        bottom: Color::from_hex(0x7C3AED),
        accent: Color::from_hex(0xFDE68A),
    },
    Palette {
        top: Color::from_hex(0x34D399),
        bottom: Color::from_hex(0x065F46),
        accent: Color::from_hex(0xF87171),
    },
];

/// The header view. Size is assigned during layout; until then it renders
/// an empty pixmap and cannot be captured.
pub struct Header {
    size: Size,
    palettes: Vec<Palette>,
    image: Option<Pixmap>,
    page: usize,
    current: Pixmap,
}

impl Header {
    pub fn new() -> Self {
        Self {
            size: Size::default(),
            palettes: DEFAULT_PALETTES.to_vec(),
            image: None,
            page: 0,
            current: Pixmap::new(0, 0),
        }
    }

    /// Replace the procedural page palettes.
    pub fn palettes(mut self, palettes: Vec<Palette>) -> Self {
        if !palettes.is_empty() {
            self.palettes = palettes;
            self.page = 0;
            self.rebuild();
        }
        self
    }

    /// Use a decoded image instead of procedural pages. The image is
    /// stretched over the header rect at render time.
    pub fn with_image(mut self, image: Pixmap) -> Self {
        self.image = Some(image);
        self.page = 0;
        self.rebuild();
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Assign the laid-out size. Re-renders only when it actually changes.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.rebuild();
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        if self.image.is_some() {
            1
        } else {
            self.palettes.len().max(1)
        }
    }

    /// The rendered banner at the current size; the snapshot capture source.
    pub fn render(&self) -> &Pixmap {
        &self.current
    }

    /// Touch events forwarded from the screen. A released tap advances to
    /// the next page (wrapping); presses and moves are consumed so the list
    /// never sees them.
    pub fn handle_touch(&mut self, event: &Event) -> EventResponse {
        match event {
            Event::PointerUp { .. } => {
                self.advance_page();
                EventResponse::Handled
            }
            Event::PointerDown { .. } | Event::PointerMoved { .. } => EventResponse::Handled,
            Event::Wheel { .. } => EventResponse::Ignored,
        }
    }

    pub fn advance_page(&mut self) {
        let next = (self.page + 1) % self.page_count();
        if next != self.page {
            log::debug!("header page {} -> {}", self.page, next);
            self.page = next;
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        if self.size.is_empty() {
            self.current = Pixmap::new(0, 0);
            return;
        }
        let mut pm = Pixmap::new(self.size.width, self.size.height);
        if let Some(image) = &self.image {
            pm.draw_pixmap_scaled(image, pm.bounds(), 1.0);
        } else {
            let palette = self.palettes[self.page % self.palettes.len()];
            paint_page(&mut pm, palette);
        }
        self.current = pm;
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

fn paint_page(pm: &mut Pixmap, palette: Palette) {
    let (w, h) = (pm.width() as i32, pm.height() as i32);
    let span = (h - 1).max(1) as f32;
    for y in 0..h {
        let color = palette.top.lerp(palette.bottom, y as f32 / span);
        pm.fill_rect(Rect::new(0, y, w as u32, 1), color);
    }
    let accent = palette.accent.with_alpha(120);
    fill_disc(pm, w / 5, (h * 3) / 10, h / 4, accent);
    fill_disc(pm, (w * 11) / 20, (h * 3) / 5, (h * 9) / 50, accent);
    fill_disc(pm, (w * 4) / 5, h / 4, (h * 3) / 25, accent);
}

/// Scanline-filled disc, blended so overlapping discs layer up.
fn fill_disc(pm: &mut Pixmap, cx: i32, cy: i32, r: i32, color: Color) {
    for dy in -r..=r {
        let half = ((r * r - dy * dy) as f32).sqrt() as i32;
        pm.blend_rect(
            Rect::new(cx - half, cy + dy, (half * 2 + 1) as u32, 1),
            color,
        );
    }
}
