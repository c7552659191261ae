//! A thin, owning facade over the graphics API.
//!
//! Every GPU object is acquired through `Video` and identified by a versioned
//! handle. Deleting a handle twice is reported as an error instead of freeing
//! an unrelated object that reuses the slot, and whatever is still alive when
//! `Video` is dropped gets released exactly once.
//!
//! ```rust,ignore
//! let (mut video, log) = Video::headless(Vector2::new(800, 600));
//!
//! let mut dc = DrawCall::new(shader, mesh);
//! dc.set_uniform_variable("plane", ClipPlane::null().0);
//! video.bind(None)?;
//! video.draw(&dc)?;
//! ```

#[macro_use]
pub mod assets;
pub mod backends;
pub mod errors;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::headless::{Command, CommandLog, DrawRecord};
    pub use super::{DrawCall, Video, DEFAULT_DEPTH_FUNC};
}

/// Maximum number of attributes in vertex layout.
pub const MAX_VERTEX_ATTRIBUTES: usize = 12;
/// Maximum number of attachments in framebuffer.
pub const MAX_FRAMEBUFFER_ATTACHMENTS: usize = 4;
/// Maximum number of uniform variables in shader.
pub const MAX_UNIFORM_VARIABLES: usize = 32;

/// The depth comparison function every pass starts with and returns to.
pub const DEFAULT_DEPTH_FUNC: assets::shader::Comparison = assets::shader::Comparison::Less;

use std::os::raw::c_void;

use smallvec::SmallVec;

use self::assets::prelude::*;
use self::backends::headless::CommandLog;
use self::backends::{UniformVar, Visitor};
use self::errors::Error;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::prelude::{HandlePool, HashValue};

/// A draw call.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub shader: ShaderHandle,
    pub mesh: MeshHandle,
    pub index: MeshIndex,
    uniforms: SmallVec<[UniformVar; MAX_UNIFORM_VARIABLES]>,
}

impl DrawCall {
    /// Create a new and empty draw call.
    pub fn new(shader: ShaderHandle, mesh: MeshHandle) -> Self {
        DrawCall {
            shader,
            mesh,
            index: MeshIndex::All,
            uniforms: SmallVec::new(),
        }
    }

    /// Bind the named field with `UniformVariable`, replacing the previous value
    /// of the same field.
    pub fn set_uniform_variable<F, T>(&mut self, field: F, variable: T)
    where
        F: Into<HashValue<str>>,
        T: Into<UniformVariable>,
    {
        let field = field.into();
        let variable = variable.into();

        for v in self.uniforms.iter_mut() {
            if v.0 == field {
                v.1 = variable;
                return;
            }
        }

        self.uniforms.push((field, variable));
    }

    #[inline]
    pub fn uniforms(&self) -> &[UniformVar] {
        &self.uniforms
    }
}

/// The centralized management of video sub-system.
pub struct Video {
    visitor: Box<dyn Visitor>,
    dimensions: Vector2<u32>,
    surfaces: HandlePool,
    shaders: HandlePool,
    textures: HandlePool,
    render_textures: HandlePool,
    meshes: HandlePool,
}

impl Video {
    /// Creates a `Video` on top of the OpenGL context that is current on this thread.
    ///
    /// # Safety
    ///
    /// `loader` must resolve symbols of the current context, and the context must
    /// outlive the returned `Video`.
    pub unsafe fn new<F>(loader: F, dimensions: Vector2<u32>) -> Result<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        let visitor = backends::new(loader)?;
        Self::with_visitor(visitor, dimensions)
    }

    /// Creates a headless `Video`, which records everything it was asked to do.
    pub fn headless(dimensions: Vector2<u32>) -> (Self, CommandLog) {
        let (visitor, log) = backends::new_headless();
        let video = Video {
            visitor,
            dimensions,
            surfaces: HandlePool::new(),
            shaders: HandlePool::new(),
            textures: HandlePool::new(),
            render_textures: HandlePool::new(),
            meshes: HandlePool::new(),
        };

        (video, log)
    }

    pub fn with_visitor(visitor: Box<dyn Visitor>, dimensions: Vector2<u32>) -> Result<Self> {
        let mut video = Video {
            visitor,
            dimensions,
            surfaces: HandlePool::new(),
            shaders: HandlePool::new(),
            textures: HandlePool::new(),
            render_textures: HandlePool::new(),
            meshes: HandlePool::new(),
        };

        video.set_depth_test(Some(DEFAULT_DEPTH_FUNC))?;
        Ok(video)
    }

    /// The dimensions of the default framebuffer, in pixels.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    pub fn resize(&mut self, dimensions: Vector2<u32>) {
        self.dimensions = dimensions;
    }

    /// Returns the number of GPU objects that are still alive.
    pub fn alive(&self) -> usize {
        self.surfaces.len()
            + self.shaders.len()
            + self.textures.len()
            + self.render_textures.len()
            + self.meshes.len()
    }
}

impl Video {
    /// Creates an surface with `SurfaceParams`. Fails if the attachments do not make
    /// a complete framebuffer.
    pub fn create_surface(&mut self, params: SurfaceParams) -> Result<SurfaceHandle> {
        let handle = self.surfaces.create();
        if let Err(err) = unsafe { self.visitor.create_surface(handle, params) } {
            self.surfaces.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_surface(&mut self, handle: SurfaceHandle) -> Result<()> {
        if !self.surfaces.free(handle) {
            return Err(Error::SurfaceHandleInvalid(handle).into());
        }

        unsafe { self.visitor.delete_surface(handle) }
    }

    /// Create a shader program from the vertex, fragment and optional geometry
    /// sources. Every attribute and uniform declared in `params` must be consumed
    /// by the linked program.
    pub fn create_shader(
        &mut self,
        params: ShaderParams,
        vs: &str,
        fs: &str,
        gs: Option<&str>,
    ) -> Result<ShaderHandle> {
        params.validate(vs, fs)?;

        let handle = self.shaders.create();
        if let Err(err) = unsafe { self.visitor.create_shader(handle, params, vs, fs, gs) } {
            self.shaders.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        if !self.shaders.free(handle) {
            return Err(Error::ShaderHandleInvalid(handle).into());
        }

        unsafe { self.visitor.delete_shader(handle) }
    }

    pub fn create_texture(
        &mut self,
        params: TextureParams,
        data: TextureData,
    ) -> Result<TextureHandle> {
        params.validate(&data)?;

        let handle = self.textures.create();
        if let Err(err) = unsafe { self.visitor.create_texture(handle, params, data) } {
            self.textures.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        if !self.textures.free(handle) {
            return Err(Error::TextureHandleInvalid(handle).into());
        }

        unsafe { self.visitor.delete_texture(handle) }
    }

    pub fn create_render_texture(
        &mut self,
        params: RenderTextureParams,
    ) -> Result<RenderTextureHandle> {
        let handle = self.render_textures.create();
        if let Err(err) = unsafe { self.visitor.create_render_texture(handle, params) } {
            self.render_textures.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_render_texture(&mut self, handle: RenderTextureHandle) -> Result<()> {
        if !self.render_textures.free(handle) {
            return Err(Error::RenderTextureHandleInvalid(handle).into());
        }

        unsafe { self.visitor.delete_render_texture(handle) }
    }

    pub fn create_mesh(&mut self, params: MeshParams, data: MeshData) -> Result<MeshHandle> {
        params.validate(&data)?;

        let handle = self.meshes.create();
        if let Err(err) = unsafe { self.visitor.create_mesh(handle, params, data) } {
            self.meshes.free(handle);
            return Err(err);
        }

        Ok(handle)
    }

    pub fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        if !self.meshes.free(handle) {
            return Err(Error::MeshHandleInvalid(handle).into());
        }

        unsafe { self.visitor.delete_mesh(handle) }
    }
}

impl Video {
    /// Binds `surface` as the render destination, `None` for the screen. It does
    /// not clear anything.
    ///
    /// The viewport is reset to cover the whole destination: the dimensions of
    /// the surface attachments, or the current video dimensions for the screen.
    pub fn bind(&mut self, surface: Option<SurfaceHandle>) -> Result<()> {
        if let Some(handle) = surface {
            if !self.surfaces.contains(handle) {
                return Err(Error::SurfaceHandleInvalid(handle).into());
            }
        }

        unsafe { self.visitor.bind(surface, self.dimensions) }
    }

    pub fn clear<C, D>(&mut self, color: C, depth: D) -> Result<()>
    where
        C: Into<Option<Color<f32>>>,
        D: Into<Option<f32>>,
    {
        unsafe { self.visitor.clear(color.into(), depth.into()) }
    }

    pub fn set_depth_test(&mut self, comparison: Option<Comparison>) -> Result<()> {
        unsafe { self.visitor.set_depth_test(comparison) }
    }

    /// Runs `func` with the depth test set to `comparison`. The default depth
    /// function is restored afterwards, even if `func` fails.
    pub fn with_depth_test<T, F>(&mut self, comparison: Option<Comparison>, func: F) -> Result<T>
    where
        F: FnOnce(&mut Video) -> Result<T>,
    {
        self.set_depth_test(comparison)?;
        let result = func(self);
        let restored = self.set_depth_test(Some(DEFAULT_DEPTH_FUNC));

        let v = result?;
        restored?;
        Ok(v)
    }

    pub fn set_clip_distance(&mut self, enable: bool) -> Result<()> {
        unsafe { self.visitor.set_clip_distance(enable) }
    }

    pub fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        unsafe { self.visitor.set_polygon_mode(mode) }
    }

    /// Submits a draw call, returns the number of assembled primitives.
    pub fn draw(&mut self, dc: &DrawCall) -> Result<u32> {
        if !self.shaders.contains(dc.shader) {
            return Err(Error::ShaderHandleInvalid(dc.shader).into());
        }

        if !self.meshes.contains(dc.mesh) {
            return Err(Error::MeshHandleInvalid(dc.mesh).into());
        }

        unsafe {
            self.visitor
                .draw(dc.shader, dc.mesh, dc.index, dc.uniforms())
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        unsafe { self.visitor.flush() }
    }
}

impl Drop for Video {
    fn drop(&mut self) {
        let alive = self.alive();
        if alive == 0 {
            return;
        }

        let meshes: Vec<MeshHandle> = self.meshes.iter().collect();
        let shaders: Vec<ShaderHandle> = self.shaders.iter().collect();
        let surfaces: Vec<SurfaceHandle> = self.surfaces.iter().collect();
        let render_textures: Vec<RenderTextureHandle> = self.render_textures.iter().collect();
        let textures: Vec<TextureHandle> = self.textures.iter().collect();

        let mut failures = 0;
        for v in meshes {
            failures += self.delete_mesh(v).is_err() as usize;
        }

        for v in shaders {
            failures += self.delete_shader(v).is_err() as usize;
        }

        for v in surfaces {
            failures += self.delete_surface(v).is_err() as usize;
        }

        for v in render_textures {
            failures += self.delete_render_texture(v).is_err() as usize;
        }

        for v in textures {
            failures += self.delete_texture(v).is_err() as usize;
        }

        if failures > 0 {
            warn!("Failed to release {} of {} video objects.", failures, alive);
        }

        info!("Released {} video objects left alive.", alive);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniform_replaces_previous_value() {
        let mut dc = DrawCall::new(ShaderHandle::default(), MeshHandle::default());
        dc.set_uniform_variable("plane", 1.0f32);
        dc.set_uniform_variable("viewPos", 2.0f32);
        dc.set_uniform_variable("plane", 3.0f32);

        assert_eq!(dc.uniforms().len(), 2);
        assert!(dc.uniforms()[0].0 == "plane");
        assert_eq!(dc.uniforms()[0].1, UniformVariable::F32(3.0));
    }

    #[test]
    fn depth_restored_on_error() {
        let (mut video, log) = Video::headless(Vector2::new(4, 4));

        let result: Result<()> = video.with_depth_test(Some(Comparison::LessOrEqual), |_| {
            bail!("skybox failed");
        });

        assert!(result.is_err());
        assert_eq!(log.depth_test(), Some(DEFAULT_DEPTH_FUNC));
    }
}
