use std::os::raw::c_void;
use std::ptr;

use crate::errors::*;
use crate::math::prelude::Vector2;

use super::super::events::Event;
use super::Visitor;

/// A window without any surface. Events are only produced by `Window::inject`.
pub struct HeadlessVisitor {
    dimensions: Vector2<u32>,
}

impl HeadlessVisitor {
    pub fn new(dimensions: Vector2<u32>) -> Self {
        HeadlessVisitor { dimensions }
    }
}

impl Visitor for HeadlessVisitor {
    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    #[inline]
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }

    #[inline]
    fn poll_events(&mut self, events: &mut Vec<Event>) {
        use super::super::events::WindowEvent;

        for v in events.iter() {
            if let Event::Window(WindowEvent::Resized(w, h)) = *v {
                self.dimensions = Vector2::new(w, h);
            }
        }
    }

    #[inline]
    fn set_cursor_grab(&self, _: bool) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn is_current(&self) -> bool {
        true
    }

    #[inline]
    fn make_current(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn get_proc_address(&self, _: &str) -> *const c_void {
        ptr::null()
    }

    #[inline]
    fn swap_buffers(&self) -> Result<()> {
        Ok(())
    }
}
