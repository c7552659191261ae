//! Represents an OpenGL context and the window or environment around it.

pub mod backends;
pub mod errors;
pub mod events;

pub mod prelude {
    pub use super::events::{Event, InputEvent, Key, WindowEvent};
    pub use super::{Window, WindowParams};
}

use std::os::raw::c_void;

use self::backends::Visitor;
use self::events::Event;

use crate::errors::*;
use crate::math::prelude::Vector2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
    /// Sets the multisampling level to request. A value of 0 indicates that
    /// multisampling must not be enabled.
    pub multisample: u16,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "Lagoon".to_owned(),
            size: Vector2::new(800, 600),
            multisample: 4,
            vsync: true,
        }
    }
}

/// The window and its OpenGL context.
pub struct Window {
    visitor: Box<dyn Visitor>,
    pending: Vec<Event>,
}

impl Window {
    /// Opens a window and makes its context current on this thread.
    pub fn new(params: WindowParams) -> Result<Self> {
        let visitor = backends::new(params)?;
        info!(
            "Created window with framebuffer {:?} (dpr {}).",
            visitor.dimensions(),
            visitor.device_pixel_ratio()
        );

        Ok(Window {
            visitor,
            pending: Vec::new(),
        })
    }

    pub fn headless(dimensions: Vector2<u32>) -> Self {
        Window {
            visitor: backends::new_headless(dimensions),
            pending: Vec::new(),
        }
    }

    /// Queues an event that will be delivered by the next `poll_events`.
    pub fn inject(&mut self, event: Event) {
        self.pending.push(event);
    }

    /// Appends the events received since last poll into `events`.
    pub fn poll_events(&mut self, events: &mut Vec<Event>) {
        events.extend(self.pending.drain(..));
        self.visitor.poll_events(events);
    }

    /// Returns the size of the framebuffer in pixels.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.visitor.dimensions()
    }

    /// Returns the ratio between the backing framebuffer resolution and the window size in
    /// screen pixels. This is typically one for a normal display and two for a retina display.
    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.visitor.device_pixel_ratio()
    }

    /// Confines the cursor to the window and hides it.
    #[inline]
    pub fn set_cursor_grab(&self, grab: bool) -> Result<()> {
        self.visitor.set_cursor_grab(grab)
    }

    #[inline]
    pub fn is_current(&self) -> bool {
        self.visitor.is_current()
    }

    /// Set the context as the active context in this thread.
    #[inline]
    pub fn make_current(&self) -> Result<()> {
        self.visitor.make_current()
    }

    #[inline]
    pub fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.visitor.get_proc_address(symbol)
    }

    #[inline]
    pub fn swap_buffers(&self) -> Result<()> {
        self.visitor.swap_buffers()
    }
}

#[cfg(test)]
mod test {
    use super::events::*;
    use super::*;

    #[test]
    fn injected_events() {
        let mut window = Window::headless(Vector2::new(8, 8));
        window.inject(Event::Window(WindowEvent::Resized(16, 4)));
        window.inject(Event::InputDevice(InputEvent::KeyboardPressed { key: Key::F }));

        let mut events = Vec::new();
        window.poll_events(&mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(window.dimensions(), Vector2::new(16, 4));

        events.clear();
        window.poll_events(&mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn params() {
        let params: WindowParams = serde_json::from_str(r#"{ "title": "River" }"#).unwrap();
        assert_eq!(params.title, "River");
        assert_eq!(params.size, Vector2::new(800, 600));
    }
}
