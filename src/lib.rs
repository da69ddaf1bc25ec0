//! A scroll-driven frosted header screen, rendered entirely on the CPU.
//!
//! One screen: a list of rows rides over a banner. Scrolling the rows past
//! the banner progressively frosts (blurs) and dims it; scrolling back to
//! the top restores it. The blur source is a downscaled snapshot of the
//! banner, captured lazily the moment it starts to slide away and dropped
//! when it is fully revealed again.
//!
//! [`HeaderScreen`] holds the whole screen and is headless: it takes input
//! [`Event`]s and paints into a [`Pixmap`], so every behavior can be tested
//! without a window. The [`platform`] module wraps it in a winit window with
//! a softbuffer surface.
//!
//! ```ignore
//! use scrim::{platform, ScreenConfig};
//!
//! let config = ScreenConfig::new()
//!     .size(480, 800)
//!     .header_height(280)
//!     .items((1..=30).map(|i| format!("Test Item {i}")).collect());
//! platform::run(config)?;
//! ```

pub mod color;
pub mod event;
pub mod fade;
pub mod geometry;
pub mod header;
pub mod list;
pub mod overlay;
pub mod pixmap;
pub mod platform;
pub mod screen;
pub mod snapshot;
pub mod text;

pub use color::Color;
pub use event::{Event, EventResponse};
pub use fade::FadeCurve;
pub use geometry::{Point, Rect, Size};
pub use header::{Header, Palette};
pub use list::List;
pub use overlay::{FrostOverlay, ScrimOverlay};
pub use pixmap::Pixmap;
pub use platform::AppError;
pub use screen::{HeaderScreen, ScreenConfig};
pub use snapshot::{blurred_snapshot, SnapshotError, SnapshotParams};
pub use text::TextPainter;
