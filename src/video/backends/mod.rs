//! The backend of renderer, which should be responsible for only one thing:
//! submitting draw-calls using low-level OpenGL video APIs.

pub mod gl;
pub mod headless;

use std::os::raw::c_void;

use super::assets::prelude::*;
use super::errors::{Error, INCOMPLETE_MISSING_ATTACHMENT};

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::hash_value::HashValue;

pub type UniformVar = (HashValue<str>, UniformVariable);

pub trait Visitor {
    unsafe fn create_surface(&mut self, handle: SurfaceHandle, params: SurfaceParams)
        -> Result<()>;

    unsafe fn delete_surface(&mut self, handle: SurfaceHandle) -> Result<()>;

    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        params: ShaderParams,
        vs: &str,
        fs: &str,
        gs: Option<&str>,
    ) -> Result<()>;

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: TextureData,
    ) -> Result<()>;

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()>;

    unsafe fn create_render_texture(
        &mut self,
        handle: RenderTextureHandle,
        params: RenderTextureParams,
    ) -> Result<()>;

    unsafe fn delete_render_texture(&mut self, handle: RenderTextureHandle) -> Result<()>;

    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()>;

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()>;

    /// Binds the surface as the render destination, `None` stands for the default
    /// framebuffer. The viewport is reset to the dimensions of the destination.
    unsafe fn bind(&mut self, surface: Option<SurfaceHandle>, dimensions: Vector2<u32>)
        -> Result<()>;

    unsafe fn clear(&mut self, color: Option<Color<f32>>, depth: Option<f32>) -> Result<()>;

    /// Sets the depth comparison function, `None` disables depth testing.
    unsafe fn set_depth_test(&mut self, comparison: Option<Comparison>) -> Result<()>;

    unsafe fn set_clip_distance(&mut self, enable: bool) -> Result<()>;

    unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()>;

    unsafe fn draw(
        &mut self,
        shader: ShaderHandle,
        mesh: MeshHandle,
        mesh_index: MeshIndex,
        vars: &[UniformVar],
    ) -> Result<u32>;

    /// Blocks until all execution is complete. Such effects include all changes to render state, all
    /// changes to connection state, and all changes to the frame buffer contents.
    unsafe fn flush(&mut self) -> Result<()>;
}

/// Creates the OpenGL visitor. `loader` resolves the GL symbols of the context
/// that is current on this thread.
pub unsafe fn new<F>(loader: F) -> Result<Box<dyn Visitor>>
where
    F: FnMut(&'static str) -> *const c_void,
{
    ::gl::load_with(loader);
    let visitor = self::gl::visitor::GLVisitor::new()?;
    Ok(Box::new(visitor))
}

pub fn new_headless() -> (Box<dyn Visitor>, headless::CommandLog) {
    let visitor = self::headless::HeadlessVisitor::new();
    let log = visitor.log();
    (Box::new(visitor), log)
}

/// Checks the attachments of a surface against each other and returns their
/// shared dimensions. `lookup` resolves the params of a render texture.
pub fn validate_attachments<F>(params: &SurfaceParams, lookup: F) -> Result<Vector2<u32>>
where
    F: Fn(RenderTextureHandle) -> Option<RenderTextureParams>,
{
    let mut dimensions = None;

    let colors = params.colors.iter().filter_map(|v| v.map(|h| (h, true)));
    let depth_stencil = params.depth_stencil.map(|h| (h, false));

    for (handle, color) in colors.chain(depth_stencil) {
        let rt = lookup(handle).ok_or(Error::RenderTextureHandleInvalid(handle))?;

        if rt.format.is_color() != color {
            return Err(Error::SurfaceIncompatible("mismatch format").into());
        }

        if dimensions.is_some() && dimensions != Some(rt.dimensions) {
            return Err(Error::SurfaceIncompatible("mismatch dimensions").into());
        }

        dimensions = Some(rt.dimensions);
    }

    dimensions.ok_or_else(|| Error::SurfaceIncomplete(INCOMPLETE_MISSING_ATTACHMENT).into())
}
