mod types;

use std::os::raw::c_void;

use glutin::GlContext;

use crate::errors::*;
use crate::math::prelude::Vector2;
use crate::window::errors::Error;

use super::super::events::{Event, WindowEvent};
use super::super::WindowParams;
use super::Visitor;

pub struct GlutinVisitor {
    window: glutin::GlWindow,
    events_loop: glutin::EventsLoop,
}

impl GlutinVisitor {
    pub fn new(params: WindowParams) -> Result<Self> {
        let builder = glutin::WindowBuilder::new()
            .with_title(params.title)
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size.x),
                f64::from(params.size.y),
            ));

        let context = glutin::ContextBuilder::new()
            .with_multisampling(params.multisample)
            .with_gl_profile(glutin::GlProfile::Core)
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
            .with_vsync(params.vsync);

        let events_loop = glutin::EventsLoop::new();
        let window = glutin::GlWindow::new(builder, context, &events_loop)
            .map_err(|err| Error::CreationFailed(err.to_string()))?;

        let visitor = GlutinVisitor {
            window,
            events_loop,
        };

        visitor.make_current()?;
        Ok(visitor)
    }
}

impl Visitor for GlutinVisitor {
    fn dimensions(&self) -> Vector2<u32> {
        let dpr = self.window.get_hidpi_factor();
        match self.window.get_inner_size() {
            Some(size) => {
                let (w, h) = types::physical(size, dpr);
                Vector2::new(w, h)
            }
            None => Vector2::new(0, 0),
        }
    }

    #[inline]
    fn device_pixel_ratio(&self) -> f32 {
        self.window.get_hidpi_factor() as f32
    }

    fn poll_events(&mut self, events: &mut Vec<Event>) {
        let dpr = self.window.get_hidpi_factor();
        let height = self
            .window
            .get_inner_size()
            .map(|v| v.height)
            .unwrap_or(0.0);

        let start = events.len();
        self.events_loop.poll_events(|v| {
            if let Some(e) = types::from_event(v, dpr, height) {
                events.push(e);
            }
        });

        for v in &events[start..] {
            if let Event::Window(WindowEvent::Resized(w, h)) = *v {
                let size = glutin::dpi::PhysicalSize::new(f64::from(w), f64::from(h));
                self.window.resize(size);
            }
        }
    }

    fn set_cursor_grab(&self, grab: bool) -> Result<()> {
        self.window
            .grab_cursor(grab)
            .map_err(Error::CursorGrabFailed)?;
        self.window.hide_cursor(grab);
        Ok(())
    }

    #[inline]
    fn is_current(&self) -> bool {
        self.window.is_current()
    }

    fn make_current(&self) -> Result<()> {
        unsafe {
            self.window
                .make_current()
                .map_err(|err| Error::ContextLost(err.to_string()))?;
        }

        Ok(())
    }

    #[inline]
    fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.window.get_proc_address(symbol) as *const c_void
    }

    fn swap_buffers(&self) -> Result<()> {
        self.window
            .swap_buffers()
            .map_err(|err| Error::ContextLost(err.to_string()))?;
        Ok(())
    }
}
