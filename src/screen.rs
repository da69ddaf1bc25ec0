//! Screen assembly and the scroll-blur controller.
//!
//! [`HeaderScreen`] owns every piece of the screen: the row list riding over
//! the banner, the frost and scrim overlays, the cached blurred snapshot and
//! the measured scroll range. The platform shell feeds it input events and a
//! frame to paint into; everything in between happens here, synchronously,
//! on the event thread.
//!
//! The controller keeps two pieces of state that outlive any single event:
//! the scroll range maximum, fixed once by the first layout pass, and the
//! snapshot cache, which lives from the moment the banner starts to slide
//! away until it is fully revealed again.

use crate::color::Color;
use crate::event::{Event, EventResponse};
use crate::fade::FadeCurve;
use crate::geometry::{Point, Rect, Size};
use crate::header::{Header, Palette, DEFAULT_PALETTES};
use crate::list::List;
use crate::overlay::{FrostOverlay, ScrimOverlay};
use crate::pixmap::Pixmap;
use crate::snapshot::{blurred_snapshot, SnapshotParams};
use crate::text::TextPainter;
use std::sync::Arc;

/// Default wash over the scrolled-away banner: white at 40% strength.
pub const SCRIM_DEFAULT: Color = Color::rgba(255, 255, 255, 102);

/// Configuration for a frosted header screen.
///
/// # Example
///
/// ```ignore
/// let config = ScreenConfig::new()
///     .size(480, 800)
///     .header_height(280)
///     .row_height(56)
///     .items((1..=30).map(|i| format!("Test Item {i}")).collect());
/// ```
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Window title used by the demo shell.
    pub title: String,
    /// Banner height in pixels; the measured value becomes the scroll range.
    pub header_height: u32,
    /// Row labels, top to bottom.
    pub items: Vec<String>,
    /// Row height in pixels.
    pub row_height: u32,
    /// Downscale factor and blur radius for the frost snapshot.
    pub snapshot: SnapshotParams,
    /// Mapping from scroll progress to overlay opacity.
    pub fade: FadeCurve,
    /// Wash color; its alpha is the wash strength at full opacity.
    pub scrim_color: Color,
    /// Palettes for the procedural banner pages.
    pub palettes: Vec<Palette>,
    /// Decoded image shown on the banner instead of procedural pages.
    pub header_image: Option<Pixmap>,
    /// Clear color behind banner and rows.
    pub background: Color,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 800,
            title: "scrim".to_string(),
            header_height: 280,
            items: Vec::new(),
            row_height: 56,
            snapshot: SnapshotParams::default(),
            fade: FadeCurve::default(),
            scrim_color: SCRIM_DEFAULT,
            palettes: DEFAULT_PALETTES.to_vec(),
            header_image: None,
            background: Color::from_hex(0x101014),
        }
    }
}

impl ScreenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial window size in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the banner height in pixels.
    pub fn header_height(mut self, px: u32) -> Self {
        self.header_height = px;
        self
    }

    /// Set the row labels.
    pub fn items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    /// Set the row height in pixels.
    pub fn row_height(mut self, px: u32) -> Self {
        self.row_height = px;
        self
    }

    /// Set the snapshot downscale and blur parameters.
    pub fn snapshot(mut self, params: SnapshotParams) -> Self {
        self.snapshot = params;
        self
    }

    /// Set the fade curve applied to both overlays.
    pub fn fade(mut self, fade: FadeCurve) -> Self {
        self.fade = fade;
        self
    }

    /// Set the wash color (its alpha is the full-opacity strength).
    pub fn scrim_color(mut self, color: Color) -> Self {
        self.scrim_color = color;
        self
    }

    /// Set the palettes for the procedural banner pages.
    pub fn palettes(mut self, palettes: Vec<Palette>) -> Self {
        self.palettes = palettes;
        self
    }

    /// Show a decoded image on the banner instead of procedural pages.
    pub fn header_image(mut self, image: Pixmap) -> Self {
        self.header_image = Some(image);
        self
    }

    /// Set the clear color behind banner and rows.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }
}

/// The assembled screen and its scroll-blur controller.
pub struct HeaderScreen {
    list: List,
    header: Header,
    frost: FrostOverlay,
    scrim: ScrimOverlay,
    fade: FadeCurve,
    snapshot_params: SnapshotParams,
    snapshot: Option<Arc<Pixmap>>,
    header_height: u32,
    background: Color,
    viewport: Size,
    max_offset: u32,
    measured: bool,
    last_offset: Option<u32>,
}

impl HeaderScreen {
    pub fn new(config: ScreenConfig) -> Self {
        let mut header = Header::new().palettes(config.palettes);
        if let Some(image) = config.header_image {
            header = header.with_image(image);
        }
        Self {
            list: List::new(config.items).row_height(config.row_height),
            header,
            frost: FrostOverlay::new(),
            scrim: ScrimOverlay::new(config.scrim_color),
            fade: config.fade,
            snapshot_params: config.snapshot,
            snapshot: None,
            header_height: config.header_height,
            background: config.background,
            viewport: Size::default(),
            max_offset: 0,
            measured: false,
            last_offset: None,
        }
    }

    pub fn list(&self) -> &List {
        &self.list
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn frost(&self) -> &FrostOverlay {
        &self.frost
    }

    pub fn scrim(&self) -> &ScrimOverlay {
        &self.scrim
    }

    /// How far the banner has scrolled away, in pixels.
    pub fn offset(&self) -> u32 {
        self.list.header_offset()
    }

    /// The measured scroll range; 0 until the first layout pass.
    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The cached blurred snapshot, shared with the frost overlay.
    pub fn snapshot(&self) -> Option<&Arc<Pixmap>> {
        self.snapshot.as_ref()
    }

    /// Propagate a new viewport size. The first non-empty size completes the
    /// one-time layout pass that fixes the scroll range.
    pub fn resize(&mut self, size: Size) {
        self.viewport = size;
        self.list.set_viewport(size);
        self.header.set_size(Size::new(size.width, self.header_height));
        if !self.measured && !size.is_empty() {
            self.on_layout_measured(self.header_height);
        }
        // Clamping against the new viewport may have moved the position
        self.on_scroll_changed();
    }

    /// Fix the scroll range to the measured banner height and rest the rows
    /// just below the banner. Only the first call takes effect.
    pub fn on_layout_measured(&mut self, header_height: u32) {
        if self.measured {
            return;
        }
        self.measured = true;
        self.max_offset = header_height;
        self.list.set_top_inset(header_height);
        self.list.scroll_to(0.0);
        log::info!("layout measured, scroll range 0..={header_height}px");
        self.on_scroll_changed();
    }

    /// Jump the rows to an absolute scroll position, in pixels.
    pub fn scroll_to(&mut self, position: f32) {
        self.list.scroll_to(position);
        self.on_scroll_changed();
    }

    /// Route one input event. Wheel and row touches scroll the list; touches
    /// landing on the exposed banner are forwarded to the header's own
    /// handler and consumed.
    pub fn handle_event(&mut self, event: &Event) -> EventResponse {
        if let Event::Wheel { delta_y } = event {
            if self.list.scroll_by(*delta_y) {
                self.on_scroll_changed();
            }
            return EventResponse::Handled;
        }
        if let Some(position) = event.position() {
            if self.forwards_to_header(position) {
                let response = self.header.handle_touch(event);
                // A release outside the rows still ends any active drag
                if matches!(event, Event::PointerUp { .. }) {
                    self.list.end_drag();
                }
                return response;
            }
        }
        if self.list.handle_pointer(event) {
            self.on_scroll_changed();
        }
        EventResponse::Handled
    }

    /// Advance momentum scrolling by one frame. Returns true while the fling
    /// still moves and wants another frame.
    pub fn tick(&mut self) -> bool {
        let animating = self.list.tick();
        self.on_scroll_changed();
        animating
    }

    /// Compose one frame: banner, frost, scrim, then the rows on top.
    pub fn paint(&self, frame: &mut Pixmap, text: Option<&mut TextPainter>) {
        frame.fill(self.background);
        let banner = self.header.render();
        let banner_rect = banner.bounds();
        frame.draw_pixmap(banner, 0, 0);
        self.frost.paint(frame, banner_rect);
        self.scrim.paint(frame, banner_rect);
        self.list.paint(frame, text);
    }

    /// Touches land on the header while the first row is on screen and the
    /// point sits above the row region, i.e. on the exposed banner.
    fn forwards_to_header(&self, position: Point) -> bool {
        if !self.measured || self.list.first_visible_index() != 0 {
            return false;
        }
        !self.row_region().contains(position)
    }

    /// Everything from the top of the row content down to the viewport
    /// bottom. Shrinks as the banner scrolls away.
    fn row_region(&self) -> Rect {
        let top = self.list.content_top();
        let height = (self.viewport.height as i32 - top).max(0) as u32;
        Rect::new(0, top, self.viewport.width, height)
    }

    /// React to a scroll position change: run the snapshot lifecycle and
    /// refresh both overlay opacities. Repeated calls at an unchanged offset
    /// do no work.
    fn on_scroll_changed(&mut self) {
        if !self.measured || self.max_offset == 0 {
            return;
        }
        let offset = self.offset();
        if self.last_offset == Some(offset) {
            return;
        }
        self.last_offset = Some(offset);

        if offset == 0 {
            // Banner fully revealed again: the frost is stale, drop it
            if self.snapshot.take().is_some() {
                log::debug!("banner revealed, snapshot dropped");
            }
            self.frost.set_image(None);
        } else if offset < self.max_offset && self.snapshot.is_none() {
            match blurred_snapshot(self.header.render(), self.snapshot_params) {
                Ok(snapshot) => {
                    log::debug!(
                        "snapshot captured: {}x{} -> {}x{}",
                        self.header.render().width(),
                        self.header.render().height(),
                        snapshot.width(),
                        snapshot.height(),
                    );
                    let snapshot = Arc::new(snapshot);
                    self.frost.set_image(Some(Arc::clone(&snapshot)));
                    self.snapshot = Some(snapshot);
                }
                Err(err) => log::warn!("snapshot skipped: {err}"),
            }
        }

        let opacity = self.fade.evaluate(offset as f32 / self.max_offset as f32);
        self.frost.set_opacity(opacity);
        self.scrim.set_opacity(opacity);
    }
}
