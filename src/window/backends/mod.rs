pub mod glutin;
pub mod headless;

use std::os::raw::c_void;

use crate::errors::*;
use crate::math::prelude::Vector2;

use super::events::Event;
use super::WindowParams;

pub trait Visitor {
    /// The size of the framebuffer in pixels.
    fn dimensions(&self) -> Vector2<u32>;
    fn device_pixel_ratio(&self) -> f32;
    fn poll_events(&mut self, events: &mut Vec<Event>);
    fn set_cursor_grab(&self, grab: bool) -> Result<()>;
    fn is_current(&self) -> bool;
    fn make_current(&self) -> Result<()>;
    /// Resolves an OpenGL symbol of this context. Returns null if there is no
    /// context at all.
    fn get_proc_address(&self, symbol: &str) -> *const c_void;
    fn swap_buffers(&self) -> Result<()>;
}

pub fn new(params: WindowParams) -> Result<Box<dyn Visitor>> {
    let visitor = self::glutin::GlutinVisitor::new(params)?;
    Ok(Box::new(visitor))
}

pub fn new_headless(dimensions: Vector2<u32>) -> Box<dyn Visitor> {
    Box::new(self::headless::HeadlessVisitor::new(dimensions))
}
