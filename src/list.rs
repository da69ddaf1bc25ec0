//! The scrollable list of rows riding over the header.
//!
//! The list owns its scroll position in content pixels, clamped to
//! [0, content - viewport]. Content starts `top_inset` below the viewport
//! top (the header height), so the derived `header_offset` (scroll clamped
//! to the inset) is exactly how far the header has been covered. Drags
//! feed a velocity that decays with friction after release.

use crate::color::Color;
use crate::event::Event;
use crate::geometry::{Rect, Size};
use crate::pixmap::Pixmap;
use crate::text::TextPainter;

const ROW_EVEN: Color = Color::from_hex(0x17171D);
const ROW_ODD: Color = Color::from_hex(0x1B1B22);
const SEPARATOR: Color = Color::from_hex(0x26262E);
const LABEL: Color = Color::from_hex(0xE8E8EE);
const LABEL_PX: f32 = 18.0;
const LABEL_INSET_X: i32 = 16;

/// A fixed-row-height list of static strings.
pub struct List {
    items: Vec<String>,
    row_height: u32,
    top_inset: u32,
    viewport: Size,
    scroll: f32,
    velocity: f32,
    dragging: bool,
    last_drag_y: i32,
}

impl List {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            row_height: 56,
            top_inset: 0,
            viewport: Size::default(),
            scroll: 0.0,
            velocity: 0.0,
            dragging: false,
            last_drag_y: 0,
        }
    }

    /// Set the row height in pixels (at least 1).
    pub fn row_height(mut self, px: u32) -> Self {
        self.row_height = px.max(1);
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    /// Push the content start down by `px` (the measured header height).
    pub fn set_top_inset(&mut self, px: u32) {
        self.top_inset = px;
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    pub fn top_inset(&self) -> u32 {
        self.top_inset
    }

    pub fn content_height(&self) -> u32 {
        self.top_inset + self.items.len() as u32 * self.row_height
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() as f32 - self.viewport.height as f32).max(0.0)
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Scroll position in whole pixels.
    pub fn scroll_px(&self) -> i32 {
        self.scroll.round() as i32
    }

    /// Jump to an absolute position, clamped. Returns true when the whole-
    /// pixel position changed.
    pub fn scroll_to(&mut self, target: f32) -> bool {
        let before = self.scroll_px();
        self.scroll = target.clamp(0.0, self.max_scroll());
        self.scroll_px() != before
    }

    /// Scroll by a delta in pixels (positive moves content up). Returns true
    /// when the whole-pixel position changed.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.scroll_to(self.scroll + delta)
    }

    /// How far the header is covered: scroll clamped to the inset.
    pub fn header_offset(&self) -> u32 {
        (self.scroll_px().max(0) as u32).min(self.top_inset)
    }

    /// Viewport y where the content (first row) currently starts. Zero or
    /// negative once the header is fully covered.
    pub fn content_top(&self) -> i32 {
        self.top_inset as i32 - self.scroll_px()
    }

    /// Index of the first row whose bottom is below the viewport top.
    pub fn first_visible_index(&self) -> usize {
        let past = self.scroll_px() - self.top_inset as i32;
        if self.items.is_empty() || past <= 0 {
            return 0;
        }
        ((past as u32 / self.row_height) as usize).min(self.items.len() - 1)
    }

    /// Drag-to-scroll handling. Returns true when the whole-pixel scroll
    /// position changed.
    pub fn handle_pointer(&mut self, event: &Event) -> bool {
        match *event {
            Event::PointerDown { position } => {
                self.dragging = true;
                self.last_drag_y = position.y;
                self.velocity = 0.0;
                false
            }
            Event::PointerMoved { position } if self.dragging => {
                let delta = (self.last_drag_y - position.y) as f32;
                self.last_drag_y = position.y;
                self.velocity = delta;
                self.scroll_by(delta)
            }
            Event::PointerUp { .. } if self.dragging => {
                self.dragging = false;
                false
            }
            _ => false,
        }
    }

    /// Abort any active drag without starting a fling. Used when the pointer
    /// is released outside the row region.
    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.velocity = 0.0;
    }

    /// Advance momentum scrolling by one frame. Returns true while the fling
    /// is still moving and needs another frame.
    pub fn tick(&mut self) -> bool {
        const FRICTION: f32 = 0.92;
        const VELOCITY_THRESHOLD: f32 = 0.5;

        if self.dragging {
            return false;
        }
        if self.velocity.abs() <= VELOCITY_THRESHOLD {
            self.velocity = 0.0;
            return false;
        }
        self.scroll_by(self.velocity);
        self.velocity *= FRICTION;
        // Stop dead at the edges instead of grinding against the clamp
        if self.scroll <= 0.0 || self.scroll >= self.max_scroll() {
            self.velocity = 0.0;
        }
        self.velocity.abs() > VELOCITY_THRESHOLD
    }

    /// Paint the visible rows. Everything above `content_top` is left
    /// untouched so the header shows through.
    pub fn paint(&self, frame: &mut Pixmap, mut text: Option<&mut TextPainter>) {
        let viewport_bottom = self.viewport.height as i32;
        for (i, label) in self.items.iter().enumerate() {
            let top = self.content_top() + i as i32 * self.row_height as i32;
            if top >= viewport_bottom {
                break;
            }
            if top + self.row_height as i32 <= 0 {
                continue;
            }
            let row = Rect::new(0, top, self.viewport.width, self.row_height);
            frame.fill_rect(row, if i % 2 == 0 { ROW_EVEN } else { ROW_ODD });
            frame.fill_rect(
                Rect::new(0, row.bottom() - 1, self.viewport.width, 1),
                SEPARATOR,
            );
            if let Some(painter) = text.as_deref_mut() {
                let text_y =
                    top + ((self.row_height as f32 - painter.line_height(LABEL_PX)) / 2.0) as i32;
                painter.draw(frame, LABEL_INSET_X, text_y, LABEL_PX, label, LABEL);
            }
        }
    }
}
