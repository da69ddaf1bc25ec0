//! Windowed shell: a winit event loop presenting through softbuffer.
//!
//! The shell owns the window, the software surface and the assembled
//! [`HeaderScreen`]. It translates window events into [`Event`]s, drives
//! momentum by chaining redraw requests while a fling is live, and copies
//! the composed frame into the surface buffer on every redraw.

use crate::event::Event;
use crate::geometry::{Point, Size};
use crate::pixmap::Pixmap;
use crate::screen::{HeaderScreen, ScreenConfig};
use crate::text::TextPainter;
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::rc::Rc;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Pixels scrolled per vertical wheel line.
const WHEEL_LINE_PX: f32 = 48.0;

/// Failures of the windowed shell around the screen.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("software surface: {0}")]
    Surface(String),
}

/// Open a window for `config` and run the screen until it is closed.
pub fn run(config: ScreenConfig) -> Result<(), AppError> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut shell = Shell::new(config);
    event_loop.run_app(&mut shell)?;
    match shell.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

struct Shell {
    title: String,
    initial_size: Size,
    screen: HeaderScreen,
    text: Option<TextPainter>,
    window: Option<Rc<Window>>,
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,
    frame: Pixmap,
    cursor: Point,
    pointer_down: bool,
    error: Option<AppError>,
}

impl Shell {
    fn new(config: ScreenConfig) -> Self {
        Self {
            title: config.title.clone(),
            initial_size: Size::new(config.width, config.height),
            screen: HeaderScreen::new(config),
            text: TextPainter::from_system(),
            window: None,
            surface: None,
            frame: Pixmap::new(0, 0),
            cursor: Point::new(0, 0),
            pointer_down: false,
            error: None,
        }
    }

    fn fail(&mut self, error: AppError, event_loop: &ActiveEventLoop) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn deliver(&mut self, event: Event) {
        self.screen.handle_event(&event);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resize_surface(&mut self, size: PhysicalSize<u32>) -> Result<(), AppError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        surface
            .resize(width, height)
            .map_err(|err| AppError::Surface(err.to_string()))?;
        self.frame = Pixmap::new(size.width, size.height);
        self.screen.resize(Size::new(size.width, size.height));
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), AppError> {
        let (Some(window), Some(surface)) = (self.window.as_ref(), self.surface.as_mut()) else {
            return Ok(());
        };
        if self.frame.size().is_empty() {
            return Ok(());
        }
        let animating = self.screen.tick();
        self.screen.paint(&mut self.frame, self.text.as_mut());
        let mut buffer = surface
            .buffer_mut()
            .map_err(|err| AppError::Surface(err.to_string()))?;
        self.frame.write_argb(&mut buffer);
        buffer
            .present()
            .map_err(|err| AppError::Surface(err.to_string()))?;
        if animating {
            window.request_redraw();
        }
        Ok(())
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.initial_size.width,
                self.initial_size.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(err) => return self.fail(err.into(), event_loop),
        };
        let context = match Context::new(Rc::clone(&window)) {
            Ok(context) => context,
            Err(err) => return self.fail(AppError::Surface(err.to_string()), event_loop),
        };
        let surface = match Surface::new(&context, Rc::clone(&window)) {
            Ok(surface) => surface,
            Err(err) => return self.fail(AppError::Surface(err.to_string()), event_loop),
        };
        let size = window.inner_size();
        log::info!("window ready: {}x{}", size.width, size.height);
        self.window = Some(window);
        self.surface = Some(surface);
        if let Err(err) = self.resize_surface(size) {
            return self.fail(err, event_loop);
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Err(err) = self.resize_surface(size) {
                    return self.fail(err, event_loop);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x as i32, position.y as i32);
                // Moves only count as touch input while the button is held,
                // matching a finger that exists only between down and up
                if self.pointer_down {
                    self.deliver(Event::PointerMoved {
                        position: self.cursor,
                    });
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let event = match state {
                    ElementState::Pressed => {
                        self.pointer_down = true;
                        Event::PointerDown {
                            position: self.cursor,
                        }
                    }
                    ElementState::Released => {
                        self.pointer_down = false;
                        Event::PointerUp {
                            position: self.cursor,
                        }
                    }
                };
                self.deliver(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => -lines * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.deliver(Event::Wheel { delta_y });
            }
            WindowEvent::Touch(Touch {
                phase, location, ..
            }) => {
                let position = Point::new(location.x as i32, location.y as i32);
                let event = match phase {
                    TouchPhase::Started => Event::PointerDown { position },
                    TouchPhase::Moved => Event::PointerMoved { position },
                    TouchPhase::Ended | TouchPhase::Cancelled => Event::PointerUp { position },
                };
                self.deliver(event);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(err, event_loop);
                }
            }
            _ => {}
        }
    }
}
