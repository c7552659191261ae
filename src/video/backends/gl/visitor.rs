use std::cell::RefCell;
use std::ffi::CString;

use gl;
use gl::types::*;
use smallvec::SmallVec;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::prelude::{DataVec, FastHashMap, HashValue};

use super::super::super::assets::prelude::*;
use super::super::super::errors::Error;
use super::super::{validate_attachments, UniformVar, Visitor};
use super::capabilities::Capabilities;
use super::types;

#[derive(Debug, Clone)]
struct GLSurfaceData {
    id: GLuint,
    dimensions: Vector2<u32>,
}

#[derive(Debug, Clone)]
struct GLShaderData {
    handle: ShaderHandle,
    id: GLuint,
    params: ShaderParams,
    uniforms: RefCell<FastHashMap<HashValue<str>, GLint>>,
    attributes: RefCell<FastHashMap<HashValue<str>, GLint>>,
}

impl GLShaderData {
    fn hash_uniform_location(&self, name: HashValue<str>) -> Option<GLint> {
        self.uniforms.borrow().get(&name).cloned()
    }

    unsafe fn uniform_location(&self, name: &str) -> Result<GLint> {
        let hash = name.into();
        let mut uniforms = self.uniforms.borrow_mut();
        match uniforms.get(&hash).cloned() {
            Some(location) => Ok(location),
            None => {
                let c_name = CString::new(name.as_bytes())?;
                let location = gl::GetUniformLocation(self.id, c_name.as_ptr());
                check()?;

                uniforms.insert(hash, location);
                Ok(location)
            }
        }
    }

    unsafe fn attribute_location(&self, name: &str) -> Result<GLint> {
        let hash = name.into();
        let mut attributes = self.attributes.borrow_mut();
        match attributes.get(&hash).cloned() {
            Some(location) => Ok(location),
            None => {
                let c_name = CString::new(name.as_bytes())?;
                let location = gl::GetAttribLocation(self.id, c_name.as_ptr());
                check()?;

                attributes.insert(hash, location);
                Ok(location)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct GLMeshData {
    handle: MeshHandle,
    vbo: GLuint,
    ibo: GLuint,
    params: MeshParams,
}

#[derive(Debug, Copy, Clone)]
struct GLTextureData {
    id: GLuint,
    target: GLenum,
}

#[derive(Debug, Copy, Clone)]
struct GLRenderTextureData {
    id: GLuint,
    params: RenderTextureParams,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Sampler {
    RenderTexture(RenderTextureHandle),
    Texture(TextureHandle),
}

struct GLMutableState {
    depth_test: Option<Comparison>,
    clip_distance: bool,
    polygon_mode: PolygonMode,
    viewport: Vector2<u32>,
    vaos: FastHashMap<(ShaderHandle, MeshHandle), GLuint>,
    binded_surface: Option<Option<SurfaceHandle>>,
    binded_shader: Option<ShaderHandle>,
    binded_vao: Option<(ShaderHandle, MeshHandle)>,
    binded_texture_index: usize,
    binded_textures: SmallVec<[Option<Sampler>; 8]>,
}

pub struct GLVisitor {
    state: GLMutableState,
    surfaces: DataVec<GLSurfaceData>,
    shaders: DataVec<GLShaderData>,
    meshes: DataVec<GLMeshData>,
    textures: DataVec<GLTextureData>,
    render_textures: DataVec<GLRenderTextureData>,
}

impl GLVisitor {
    pub unsafe fn new() -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("GLVisitor {:#?}", capabilities);
        capabilities.check()?;

        let state = GLMutableState {
            depth_test: Some(Comparison::Less),
            clip_distance: false,
            polygon_mode: PolygonMode::Fill,
            viewport: Vector2::new(0, 0),
            vaos: FastHashMap::default(),
            binded_surface: None,
            binded_shader: None,
            binded_vao: None,
            binded_texture_index: 0,
            binded_textures: SmallVec::new(),
        };

        let mut visitor = GLVisitor {
            state,
            surfaces: DataVec::new(),
            shaders: DataVec::new(),
            meshes: DataVec::new(),
            textures: DataVec::new(),
            render_textures: DataVec::new(),
        };

        Self::reset_render_state(&mut visitor.state)?;
        Ok(visitor)
    }
}

impl Visitor for GLVisitor {
    unsafe fn create_surface(
        &mut self,
        handle: SurfaceHandle,
        params: SurfaceParams,
    ) -> Result<()> {
        let dimensions = {
            let render_textures = &self.render_textures;
            validate_attachments(&params, |v| render_textures.get(v).map(|rt| rt.params))?
        };

        let mut id = 0;
        gl::GenFramebuffers(1, &mut id);
        if id == 0 {
            bail!("[GL] Failed to generate framebuffer object.");
        }

        gl::BindFramebuffer(gl::FRAMEBUFFER, id);
        self.state.binded_surface = None;

        let colors = params.colors.iter().enumerate();
        let colors = colors.filter_map(|(i, v)| v.map(|h| (h, i)));
        for (v, i) in colors.chain(params.depth_stencil.map(|h| (h, 0))) {
            let rt = self
                .render_textures
                .get(v)
                .ok_or(Error::RenderTextureHandleInvalid(v))?;

            Self::update_framebuffer_render_texture(rt.id, rt.params, i)?;
        }

        let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
        gl::BindFramebuffer(gl::FRAMEBUFFER, 0);

        if let Some(reason) = types::framebuffer_status(status) {
            gl::DeleteFramebuffers(1, &id);
            return Err(Error::SurfaceIncomplete(reason).into());
        }

        check()?;
        self.surfaces
            .create(handle, GLSurfaceData { id, dimensions });

        Ok(())
    }

    unsafe fn delete_surface(&mut self, handle: SurfaceHandle) -> Result<()> {
        let surface = self
            .surfaces
            .free(handle)
            .ok_or(Error::SurfaceHandleInvalid(handle))?;

        if self.state.binded_surface == Some(Some(handle)) {
            self.state.binded_surface = None;
        }

        gl::DeleteFramebuffers(1, &surface.id);
        check()
    }

    unsafe fn create_shader(
        &mut self,
        handle: ShaderHandle,
        params: ShaderParams,
        vs: &str,
        fs: &str,
        gs: Option<&str>,
    ) -> Result<()> {
        params.validate(vs, fs)?;

        let mut sources = SmallVec::<[(GLenum, &str); 3]>::new();
        sources.push((gl::VERTEX_SHADER, vs));
        sources.push((gl::FRAGMENT_SHADER, fs));
        if let Some(gs) = gs {
            sources.push((gl::GEOMETRY_SHADER, gs));
        }

        let mut stages = SmallVec::<[GLuint; 3]>::new();
        for &(kind, src) in &sources {
            match Self::compile(kind, src) {
                Ok(v) => stages.push(v),
                Err(err) => {
                    // Stages compiled so far are not attached to anything.
                    for &v in &stages {
                        gl::DeleteShader(v);
                    }
                    return Err(err);
                }
            }
        }

        let id = Self::link(&stages);
        for &v in &stages {
            gl::DeleteShader(v);
        }

        let id = id?;
        if let Err(err) = check() {
            gl::DeleteProgram(id);
            return Err(err);
        }

        let shader = GLShaderData {
            handle,
            id,
            params,
            uniforms: RefCell::new(FastHashMap::default()),
            attributes: RefCell::new(FastHashMap::default()),
        };

        for (name, _) in shader.params.attributes.iter() {
            let location = shader.attribute_location(name.name())?;
            if location == -1 {
                gl::DeleteProgram(id);
                bail!("Attribute({:?}) is undefined in shader sources.", name);
            }
        }

        for &(ref name, _) in shader.params.uniforms.iter() {
            let location = shader.uniform_location(name)?;
            if location == -1 {
                gl::DeleteProgram(id);
                bail!("Uniform({:?}) is undefined in shader sources.", name);
            }
        }

        self.shaders.create(handle, shader);
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .free(handle)
            .ok_or(Error::ShaderHandleInvalid(handle))?;

        // Removes deprecated `VertexArrayObject`s.
        self.state.vaos.retain(|&(h, _), vao| {
            if h == shader.handle {
                gl::DeleteVertexArrays(1, vao as *mut u32);
                false
            } else {
                true
            }
        });

        if self.state.binded_vao.map(|v| v.0) == Some(handle) {
            self.state.binded_vao = None;
        }

        if self.state.binded_shader == Some(handle) {
            self.state.binded_shader = None;
        }

        gl::DeleteProgram(shader.id);
        check()
    }

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: TextureData,
    ) -> Result<()> {
        params.validate(&data)?;

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        if id == 0 {
            bail!("[GL] Failed to generate texture object.");
        }

        let target = params.kind.into();
        let (internal_format, format, pixel_type) = params.format.into();

        Self::bind_texture(
            &mut self.state,
            Some(Sampler::Texture(handle)),
            0,
            target,
            id,
        )?;

        Self::bind_texture_params(target, params.wrap, params.filter, params.mipmap)?;

        for (i, v) in data.bytes.iter().enumerate() {
            let face = match params.kind {
                TextureKind::Texture2D => gl::TEXTURE_2D,
                TextureKind::Cubemap => gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as GLenum,
            };

            gl::TexImage2D(
                face,
                0,
                internal_format as GLint,
                params.dimensions.x as GLsizei,
                params.dimensions.y as GLsizei,
                0,
                format,
                pixel_type,
                v.as_ptr() as *const ::std::os::raw::c_void,
            );
        }

        if params.mipmap {
            gl::GenerateMipmap(target);
        }

        check()?;
        self.textures.create(handle, GLTextureData { id, target });
        Ok(())
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        let texture = self
            .textures
            .free(handle)
            .ok_or(Error::TextureHandleInvalid(handle))?;

        for v in self.state.binded_textures.iter_mut() {
            if *v == Some(Sampler::Texture(handle)) {
                *v = None;
            }
        }

        gl::DeleteTextures(1, &texture.id);
        check()
    }

    unsafe fn create_render_texture(
        &mut self,
        handle: RenderTextureHandle,
        params: RenderTextureParams,
    ) -> Result<()> {
        let (internal_format, format, pixel_type) = params.format.into();

        let id = if params.sampler {
            let mut id = 0;
            gl::GenTextures(1, &mut id);
            if id == 0 {
                bail!("[GL] Failed to generate texture object.");
            }

            Self::bind_texture(
                &mut self.state,
                Some(Sampler::RenderTexture(handle)),
                0,
                gl::TEXTURE_2D,
                id,
            )?;

            Self::bind_texture_params(gl::TEXTURE_2D, params.wrap, params.filter, false)?;

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                internal_format as GLint,
                params.dimensions.x as GLsizei,
                params.dimensions.y as GLsizei,
                0,
                format,
                pixel_type,
                ::std::ptr::null(),
            );

            id
        } else {
            let mut id = 0;
            gl::GenRenderbuffers(1, &mut id);
            if id == 0 {
                bail!("[GL] Failed to generate renderbuffer object.");
            }

            gl::BindRenderbuffer(gl::RENDERBUFFER, id);
            gl::RenderbufferStorage(
                gl::RENDERBUFFER,
                internal_format,
                params.dimensions.x as GLint,
                params.dimensions.y as GLint,
            );
            gl::BindRenderbuffer(gl::RENDERBUFFER, 0);
            id
        };

        check()?;

        self.render_textures
            .create(handle, GLRenderTextureData { id, params });

        Ok(())
    }

    unsafe fn delete_render_texture(&mut self, handle: RenderTextureHandle) -> Result<()> {
        let rt = self
            .render_textures
            .free(handle)
            .ok_or(Error::RenderTextureHandleInvalid(handle))?;

        if rt.params.sampler {
            for v in self.state.binded_textures.iter_mut() {
                if *v == Some(Sampler::RenderTexture(handle)) {
                    *v = None;
                }
            }

            gl::DeleteTextures(1, &rt.id);
        } else {
            gl::DeleteRenderbuffers(1, &rt.id);
        }

        check()
    }

    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()> {
        params.validate(&data)?;

        // Vertex array objects capture the element buffer binding, so make sure
        // none is bound while the buffers are created.
        gl::BindVertexArray(0);
        self.state.binded_vao = None;

        let vbo = Self::create_buffer(gl::ARRAY_BUFFER, params.hint, &data.vptr)?;
        let ibo = Self::create_buffer(gl::ELEMENT_ARRAY_BUFFER, params.hint, &data.iptr)?;

        self.meshes.create(
            handle,
            GLMeshData {
                handle,
                vbo,
                ibo,
                params,
            },
        );

        Ok(())
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        let mesh = self
            .meshes
            .free(handle)
            .ok_or(Error::MeshHandleInvalid(handle))?;

        // Removes deprecated `VertexArrayObject`s.
        self.state.vaos.retain(|&(_, h), vao| {
            if h == mesh.handle {
                gl::DeleteVertexArrays(1, vao as *mut u32);
                false
            } else {
                true
            }
        });

        if self.state.binded_vao.map(|v| v.1) == Some(handle) {
            self.state.binded_vao = None;
        }

        gl::DeleteBuffers(1, &mesh.vbo);
        gl::DeleteBuffers(1, &mesh.ibo);
        check()
    }

    unsafe fn bind(
        &mut self,
        handle: Option<SurfaceHandle>,
        dimensions: Vector2<u32>,
    ) -> Result<()> {
        let (id, dimensions) = match handle {
            Some(v) => {
                let surface = self
                    .surfaces
                    .get(v)
                    .ok_or(Error::SurfaceHandleInvalid(v))?;

                (surface.id, surface.dimensions)
            }
            None => (0, dimensions),
        };

        if self.state.binded_surface != Some(handle) {
            gl::BindFramebuffer(gl::FRAMEBUFFER, id);
            self.state.binded_surface = Some(handle);
        }

        // Reset the viewport.
        if self.state.viewport != dimensions {
            gl::Viewport(0, 0, dimensions.x as i32, dimensions.y as i32);
            self.state.viewport = dimensions;
        }

        check()
    }

    unsafe fn clear(&mut self, color: Option<Color<f32>>, depth: Option<f32>) -> Result<()> {
        let mut bits = 0;
        if let Some(v) = color {
            bits |= gl::COLOR_BUFFER_BIT;
            gl::ClearColor(v.r, v.g, v.b, v.a);
        }

        if let Some(v) = depth {
            bits |= gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT;
            gl::ClearDepth(f64::from(v));
            gl::ClearStencil(0);
        }

        if bits != 0 {
            gl::Clear(bits);
            check()
        } else {
            Ok(())
        }
    }

    unsafe fn set_depth_test(&mut self, comparison: Option<Comparison>) -> Result<()> {
        let state = &mut self.state;
        if state.depth_test == comparison {
            return Ok(());
        }

        match comparison {
            Some(v) => {
                if state.depth_test.is_none() {
                    gl::Enable(gl::DEPTH_TEST);
                }

                gl::DepthFunc(v.into());
            }
            None => gl::Disable(gl::DEPTH_TEST),
        }

        state.depth_test = comparison;
        check()
    }

    unsafe fn set_clip_distance(&mut self, enable: bool) -> Result<()> {
        if self.state.clip_distance != enable {
            if enable {
                gl::Enable(gl::CLIP_DISTANCE0);
            } else {
                gl::Disable(gl::CLIP_DISTANCE0);
            }

            self.state.clip_distance = enable;
            check()?;
        }

        Ok(())
    }

    unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        if self.state.polygon_mode != mode {
            gl::PolygonMode(gl::FRONT_AND_BACK, mode.into());
            self.state.polygon_mode = mode;
            check()?;
        }

        Ok(())
    }

    unsafe fn draw(
        &mut self,
        shader: ShaderHandle,
        mesh: MeshHandle,
        mesh_index: MeshIndex,
        uniforms: &[UniformVar],
    ) -> Result<u32> {
        // Bind program and associated uniforms and textures.
        let shader = self
            .shaders
            .get(shader)
            .ok_or(Error::ShaderHandleInvalid(shader))?;

        Self::bind_shader(&mut self.state, &shader)?;

        let mut index = 0usize;
        for &(field, variable) in uniforms {
            let tp = shader
                .params
                .uniforms
                .variable_type(field)
                .ok_or_else(|| Error::UniformUndefined(format!("{:?}", field)))?;

            if tp != variable.variable_type() {
                let name = shader.params.uniforms.variable_name(field).unwrap_or("?");
                return Err(
                    Error::UniformTypeMismatch(name.into(), tp, variable.variable_type()).into(),
                );
            }

            let location = shader
                .hash_uniform_location(field)
                .ok_or_else(|| Error::UniformUndefined(format!("{:?}", field)))?;

            match variable {
                UniformVariable::Texture(handle) => {
                    Self::bind_uniform_variable(location, &UniformVariable::I32(index as i32))?;

                    if let Some(texture) = self.textures.get(handle) {
                        Self::bind_texture(
                            &mut self.state,
                            Some(Sampler::Texture(handle)),
                            index,
                            texture.target,
                            texture.id,
                        )?;
                    } else {
                        Self::bind_texture(&mut self.state, None, index, gl::TEXTURE_2D, 0)?;
                    }

                    index += 1;
                }
                UniformVariable::RenderTexture(handle) => {
                    Self::bind_uniform_variable(location, &UniformVariable::I32(index as i32))?;

                    if let Some(texture) = self.render_textures.get(handle) {
                        if !texture.params.sampler {
                            bail!("The render buffer does not have a sampler.");
                        }

                        Self::bind_texture(
                            &mut self.state,
                            Some(Sampler::RenderTexture(handle)),
                            index,
                            gl::TEXTURE_2D,
                            texture.id,
                        )?;
                    } else {
                        Self::bind_texture(&mut self.state, None, index, gl::TEXTURE_2D, 0)?;
                    }

                    index += 1;
                }
                _ => {
                    Self::bind_uniform_variable(location, &variable)?;
                }
            }
        }

        let mesh = self.meshes.get(mesh).ok_or(Error::MeshHandleInvalid(mesh))?;

        // Bind vertex buffer and vertex array object.
        Self::bind_mesh(&mut self.state, &shader, &mesh)?;

        let (from, len) = mesh.params.range(mesh_index)?;
        let from = from * mesh.params.index_format.stride();

        gl::DrawElements(
            mesh.params.primitive.into(),
            len as i32,
            mesh.params.index_format.into(),
            from as *const u32 as *const ::std::os::raw::c_void,
        );

        check()?;
        Ok(mesh.params.primitive.assemble(len as u32))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        gl::Finish();
        check()
    }
}

impl GLVisitor {
    unsafe fn bind_shader(state: &mut GLMutableState, shader: &GLShaderData) -> Result<()> {
        if state.binded_shader == Some(shader.handle) {
            return Ok(());
        }

        gl::UseProgram(shader.id);
        state.binded_shader = Some(shader.handle);
        check()
    }

    unsafe fn bind_uniform_variable(location: GLint, variable: &UniformVariable) -> Result<()> {
        match *variable {
            UniformVariable::Texture(_) | UniformVariable::RenderTexture(_) => {
                bail!("Samplers are bound through texture units.")
            }
            UniformVariable::I32(v) => gl::Uniform1i(location, v),
            UniformVariable::F32(v) => gl::Uniform1f(location, v),
            UniformVariable::Vector2f(v) => gl::Uniform2f(location, v[0], v[1]),
            UniformVariable::Vector3f(v) => gl::Uniform3f(location, v[0], v[1], v[2]),
            UniformVariable::Vector4f(v) => gl::Uniform4f(location, v[0], v[1], v[2], v[3]),
            UniformVariable::Matrix3f(v, transpose) => {
                let transpose = if transpose { gl::TRUE } else { gl::FALSE };
                gl::UniformMatrix3fv(location, 1, transpose, v[0].as_ptr())
            }
            UniformVariable::Matrix4f(v, transpose) => {
                let transpose = if transpose { gl::TRUE } else { gl::FALSE };
                gl::UniformMatrix4fv(location, 1, transpose, v[0].as_ptr())
            }
        }

        check()
    }

    unsafe fn bind_texture(
        state: &mut GLMutableState,
        sampler: Option<Sampler>,
        index: usize,
        target: GLenum,
        id: GLuint,
    ) -> Result<()> {
        if state.binded_texture_index != index {
            state.binded_texture_index = index;
            gl::ActiveTexture(gl::TEXTURE0 + index as GLuint);
        }

        if state.binded_textures.len() <= index {
            state.binded_textures.resize(index + 1, None);
        }

        if state.binded_textures[index] != sampler || sampler.is_none() {
            state.binded_textures[index] = sampler;
            gl::BindTexture(target, id);
        }

        check()
    }

    unsafe fn bind_mesh(
        state: &mut GLMutableState,
        shader: &GLShaderData,
        mesh: &GLMeshData,
    ) -> Result<()> {
        let k = (shader.handle, mesh.handle);
        if state.binded_vao == Some(k) {
            return Ok(());
        }

        if let Some(vao) = state.vaos.get(&k).cloned() {
            gl::BindVertexArray(vao);
            state.binded_vao = Some(k);
            return check();
        }

        if !shader.params.attributes.is_match(&mesh.params.layout) {
            bail!(
                "Vertex buffer of {:?} has incompatible attributes with {:?}.",
                mesh.handle,
                shader.handle
            );
        }

        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);
        gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vbo);
        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, mesh.ibo);

        let layout = &mesh.params.layout;
        let stride = layout.stride();

        for (name, _) in shader.params.attributes.iter() {
            if let (Some(element), Some(offset)) = (layout.element(name), layout.offset(name)) {
                let location = shader.attribute_location(name.name())?;
                gl::EnableVertexAttribArray(location as GLuint);
                gl::VertexAttribPointer(
                    location as GLuint,
                    GLsizei::from(element.size),
                    element.format.into(),
                    element.normalized as u8,
                    GLsizei::from(stride),
                    offset as usize as *const ::std::os::raw::c_void,
                );
            }
        }

        check()?;
        state.vaos.insert(k, vao);
        state.binded_vao = Some(k);
        Ok(())
    }
}

impl GLVisitor {
    unsafe fn reset_render_state(state: &mut GLMutableState) -> Result<()> {
        gl::Disable(gl::CULL_FACE);

        gl::Enable(gl::DEPTH_TEST);
        gl::DepthMask(gl::TRUE);
        gl::DepthFunc(gl::LESS);
        state.depth_test = Some(Comparison::Less);

        gl::Enable(gl::BLEND);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);

        gl::Disable(gl::CLIP_DISTANCE0);
        state.clip_distance = false;

        gl::PolygonMode(gl::FRONT_AND_BACK, gl::FILL);
        state.polygon_mode = PolygonMode::Fill;

        gl::Enable(gl::TEXTURE_CUBE_MAP_SEAMLESS);
        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        gl::BindFramebuffer(gl::FRAMEBUFFER, 0);

        check()
    }

    unsafe fn update_framebuffer_render_texture(
        id: GLuint,
        params: RenderTextureParams,
        index: usize,
    ) -> Result<()> {
        let location = types::attachment_point(params.format, index);

        if params.sampler {
            gl::FramebufferTexture2D(gl::FRAMEBUFFER, location, gl::TEXTURE_2D, id, 0);
        } else {
            gl::FramebufferRenderbuffer(gl::FRAMEBUFFER, location, gl::RENDERBUFFER, id);
        }

        check()
    }

    unsafe fn compile(shader: GLenum, src: &str) -> Result<GLuint> {
        let c_str = CString::new(src.as_bytes())?;

        let shader = gl::CreateShader(shader);
        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ::std::ptr::null());
        gl::CompileShader(shader);

        // Get the compile status
        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        // Fail on error
        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader,
                len,
                ::std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );

            gl::DeleteShader(shader);
            let log = String::from_utf8_lossy(&buf);
            Err(Error::ShaderInvalid(log.trim_end_matches('\0').to_owned()).into())
        } else {
            Ok(shader)
        }
    }

    unsafe fn link(shaders: &[GLuint]) -> Result<GLuint> {
        let program = gl::CreateProgram();
        for &shader in shaders {
            gl::AttachShader(program, shader);
        }

        gl::LinkProgram(program);

        for &shader in shaders {
            gl::DetachShader(program, shader);
        }

        // Get the link status
        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        // Fail on error
        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buf = vec![0u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                program,
                len,
                ::std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut GLchar,
            );

            gl::DeleteProgram(program);
            let log = String::from_utf8_lossy(&buf);
            Err(Error::ShaderInvalid(log.trim_end_matches('\0').to_owned()).into())
        } else {
            Ok(program)
        }
    }

    unsafe fn create_buffer(tp: GLuint, hint: MeshHint, data: &[u8]) -> Result<GLuint> {
        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        if id == 0 {
            bail!("[GL] Failed to generate buffer object.");
        }

        gl::BindBuffer(tp, id);

        let value = if data.is_empty() {
            ::std::ptr::null()
        } else {
            data.as_ptr() as *const ::std::os::raw::c_void
        };

        gl::BufferData(tp, data.len() as isize, value, hint.into());
        check()?;
        Ok(id)
    }

    unsafe fn bind_texture_params(
        target: GLenum,
        wrap: TextureWrap,
        filter: TextureFilter,
        mipmap: bool,
    ) -> Result<()> {
        let wrap: GLenum = wrap.into();
        gl::TexParameteri(target, gl::TEXTURE_WRAP_S, wrap as GLint);
        gl::TexParameteri(target, gl::TEXTURE_WRAP_T, wrap as GLint);

        if target == gl::TEXTURE_CUBE_MAP {
            gl::TexParameteri(target, gl::TEXTURE_WRAP_R, wrap as GLint);
        }

        let (min_filter, mag_filter) = match (filter, mipmap) {
            (TextureFilter::Nearest, false) => (gl::NEAREST, gl::NEAREST),
            (TextureFilter::Nearest, true) => (gl::NEAREST_MIPMAP_NEAREST, gl::NEAREST),
            (TextureFilter::Linear, false) => (gl::LINEAR, gl::LINEAR),
            (TextureFilter::Linear, true) => (gl::LINEAR_MIPMAP_LINEAR, gl::LINEAR),
        };

        gl::TexParameteri(target, gl::TEXTURE_MIN_FILTER, min_filter as GLint);
        gl::TexParameteri(target, gl::TEXTURE_MAG_FILTER, mag_filter as GLint);
        check()
    }
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => {
            bail!("[GL] An unacceptable value is specified for an enumerated argument.")
        }

        gl::INVALID_VALUE => bail!("[GL] A numeric argument is out of range."),

        gl::INVALID_OPERATION => {
            bail!("[GL] The specified operation is not allowed in the current state.")
        }

        gl::INVALID_FRAMEBUFFER_OPERATION => bail!(
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        ),

        gl::OUT_OF_MEMORY => bail!("[GL] There is not enough memory left to execute the command."),
        _ => bail!("[GL] Oops, Unknown OpenGL error."),
    }
}
