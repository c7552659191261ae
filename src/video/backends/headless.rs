//! A visitor that renders nothing. It keeps the same bookkeeping as the GL
//! visitor, validates every request the way a GL context would, and records
//! the commands it received into a `CommandLog`.

use std::cell::RefCell;
use std::rc::Rc;

use super::super::assets::prelude::*;
use super::super::errors::{Error, INCOMPLETE_ATTACHMENT};
use super::{validate_attachments, UniformVar, Visitor};

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::prelude::{DataVec, FastHashSet, HashValue};

/// A command received by the `HeadlessVisitor`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateSurface(SurfaceHandle),
    DeleteSurface(SurfaceHandle),
    CreateShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    CreateTexture(TextureHandle),
    DeleteTexture(TextureHandle),
    CreateRenderTexture(RenderTextureHandle),
    DeleteRenderTexture(RenderTextureHandle),
    CreateMesh(MeshHandle),
    DeleteMesh(MeshHandle),
    Bind {
        surface: Option<SurfaceHandle>,
        dimensions: Vector2<u32>,
    },
    Clear {
        color: Option<Color<f32>>,
        depth: Option<f32>,
    },
    SetDepthTest(Option<Comparison>),
    SetClipDistance(bool),
    SetPolygonMode(PolygonMode),
    Draw(DrawRecord),
    Flush,
}

/// A draw call along with the pipeline state it was issued with.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub surface: Option<SurfaceHandle>,
    pub shader: ShaderHandle,
    pub mesh: MeshHandle,
    pub index: MeshIndex,
    pub depth_test: Option<Comparison>,
    pub clip_distance: bool,
    pub polygon_mode: PolygonMode,
    pub uniforms: Vec<UniformVar>,
}

impl DrawRecord {
    /// Returns the value of uniform `name` submitted with this draw.
    pub fn uniform<T>(&self, name: T) -> Option<UniformVariable>
    where
        T: Into<HashValue<str>>,
    {
        let field = name.into();
        self.uniforms
            .iter()
            .find(|v| v.0 == field)
            .map(|v| v.1)
    }
}

#[derive(Debug)]
struct PipelineState {
    surface: Option<SurfaceHandle>,
    depth_test: Option<Comparison>,
    clip_distance: bool,
    polygon_mode: PolygonMode,
}

#[derive(Debug)]
struct CommandLogData {
    commands: Vec<Command>,
    state: PipelineState,
}

/// A shared view into the commands recorded by a `HeadlessVisitor`.
#[derive(Debug, Clone)]
pub struct CommandLog(Rc<RefCell<CommandLogData>>);

impl CommandLog {
    fn new() -> Self {
        let data = CommandLogData {
            commands: Vec::new(),
            state: PipelineState {
                surface: None,
                depth_test: Some(Comparison::Less),
                clip_distance: false,
                polygon_mode: PolygonMode::Fill,
            },
        };

        CommandLog(Rc::new(RefCell::new(data)))
    }

    fn push(&self, cmd: Command) {
        self.0.borrow_mut().commands.push(cmd);
    }

    pub fn commands(&self) -> Vec<Command> {
        self.0.borrow().commands.clone()
    }

    pub fn draws(&self) -> Vec<DrawRecord> {
        self.0
            .borrow()
            .commands
            .iter()
            .filter_map(|v| match *v {
                Command::Draw(ref record) => Some(record.clone()),
                _ => None,
            })
            .collect()
    }

    /// The current depth comparison function.
    pub fn depth_test(&self) -> Option<Comparison> {
        self.0.borrow().state.depth_test
    }

    pub fn clip_distance(&self) -> bool {
        self.0.borrow().state.clip_distance
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.0.borrow().state.polygon_mode
    }

    /// The surface that is currently bound, `None` for the screen.
    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.0.borrow().state.surface
    }

    /// Forgets the recorded commands, the pipeline state is kept.
    pub fn clear(&self) {
        self.0.borrow_mut().commands.clear();
    }
}

#[derive(Debug, Clone, Copy)]
struct HeadlessSurface {
    dimensions: Vector2<u32>,
}

pub struct HeadlessVisitor {
    log: CommandLog,
    surfaces: DataVec<HeadlessSurface>,
    shaders: DataVec<ShaderParams>,
    textures: DataVec<TextureParams>,
    render_textures: DataVec<RenderTextureParams>,
    meshes: DataVec<MeshParams>,
}

impl Default for HeadlessVisitor {
    fn default() -> Self {
        HeadlessVisitor::new()
    }
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        HeadlessVisitor {
            log: CommandLog::new(),
            surfaces: DataVec::new(),
            shaders: DataVec::new(),
            textures: DataVec::new(),
            render_textures: DataVec::new(),
            meshes: DataVec::new(),
        }
    }

    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }
}

/// Returns true if the identifier `name` refers to appears in one of the sources.
fn declared(name: &str, sources: &[&str]) -> bool {
    let ident = name.split(|c| c == '.' || c == '[').next().unwrap_or(name);
    sources.iter().any(|src| src.contains(ident))
}

fn identifiers(src: &str) -> impl Iterator<Item = &str> {
    src.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|v| v.chars().next().map_or(false, |c| c.is_alphabetic() || c == '_'))
}

fn strip_comments(src: &str) -> String {
    src.lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits `statement` at its assignment operator, comparisons are not assignments.
fn assignment(statement: &str) -> Option<(&str, &str)> {
    let bytes = statement.as_bytes();
    for (i, &c) in bytes.iter().enumerate() {
        if c != b'=' {
            continue;
        }

        let next = bytes.get(i + 1).cloned();
        let prev = if i > 0 { Some(bytes[i - 1]) } else { None };
        if next == Some(b'=') || prev.map_or(false, |v| b"=!<>".contains(&v)) {
            continue;
        }

        let lhs = statement[..i].trim_end_matches(|c: char| "+-*/".contains(c));
        let lhs = lhs
            .trim_end()
            .rsplit(|c: char| c.is_whitespace() || "{}()".contains(c))
            .next()?;
        let lhs = identifiers(lhs).next()?;
        return Some((lhs, &statement[i + 1..]));
    }

    None
}

/// Returns true if the vertex attribute `name` flows into a vertex output that
/// is read downstream. Linkers strip every other attribute, and a stripped
/// attribute has no location.
fn active(name: &str, vs: &str, consumer: &str) -> bool {
    let vs = strip_comments(vs);
    let consumer = strip_comments(consumer);

    let mut live = FastHashSet::default();
    live.insert("gl_Position");
    live.insert("gl_ClipDistance");

    for line in vs.lines() {
        if identifiers(line).any(|v| v == "out") {
            if let Some(varying) = identifiers(line).last() {
                let read = consumer
                    .lines()
                    .filter(|v| !identifiers(v).any(|w| w == "in"))
                    .any(|v| identifiers(v).any(|w| w == varying));
                if read {
                    live.insert(varying);
                }
            }
        }
    }

    let body = match vs.find("main") {
        Some(v) => &vs[v..],
        None => return false,
    };

    let assignments: Vec<_> = body.split(';').filter_map(assignment).collect();
    loop {
        let len = live.len();
        for &(lhs, rhs) in &assignments {
            if live.contains(lhs) {
                live.extend(identifiers(rhs));
            }
        }

        if live.len() == len {
            return live.contains(name);
        }
    }
}

impl Visitor for HeadlessVisitor {
    unsafe fn create_surface(
        &mut self,
        handle: SurfaceHandle,
        params: SurfaceParams,
    ) -> Result<()> {
        let render_textures = &self.render_textures;
        let dimensions = validate_attachments(&params, |v| render_textures.get(v).cloned())?;

        if dimensions.x == 0 || dimensions.y == 0 {
            return Err(Error::SurfaceIncomplete(INCOMPLETE_ATTACHMENT).into());
        }

        self.surfaces.create(handle, HeadlessSurface { dimensions });
        self.log.push(Command::CreateSurface(handle));
        Ok(())
    }

    unsafe fn delete_surface(&mut self, handle: SurfaceHandle) -> Result<()> {
        self.surfaces
            .free(handle)
            .ok_or(Error::SurfaceHandleInvalid(handle))?;

        {
            let mut data = self.log.0.borrow_mut();
            if data.state.surface == Some(handle) {
                data.state.surface = None;
            }
        }

        self.log.push(Command::DeleteSurface(handle));
        Ok(())
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

        let mut sources = vec![vs, fs];
        sources.extend(gs);

        let consumer = gs.unwrap_or(fs);
        for (name, _) in params.attributes.iter() {
            if !declared(name.name(), &sources[..1]) || !active(name.name(), vs, consumer) {
                bail!("Attribute({:?}) is undefined in shader sources.", name);
            }
        }

        for &(ref name, _) in params.uniforms.iter() {
            if !declared(name, &sources) {
                bail!("Uniform({:?}) is undefined in shader sources.", name);
            }
        }

        self.shaders.create(handle, params);
        self.log.push(Command::CreateShader(handle));
        Ok(())
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.shaders
            .free(handle)
            .ok_or(Error::ShaderHandleInvalid(handle))?;

        self.log.push(Command::DeleteShader(handle));
        Ok(())
    }

    unsafe fn create_texture(
        &mut self,
        handle: TextureHandle,
        params: TextureParams,
        data: TextureData,
    ) -> Result<()> {
        params.validate(&data)?;
        self.textures.create(handle, params);
        self.log.push(Command::CreateTexture(handle));
        Ok(())
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        self.textures
            .free(handle)
            .ok_or(Error::TextureHandleInvalid(handle))?;

        self.log.push(Command::DeleteTexture(handle));
        Ok(())
    }

    unsafe fn create_render_texture(
        &mut self,
        handle: RenderTextureHandle,
        params: RenderTextureParams,
    ) -> Result<()> {
        self.render_textures.create(handle, params);
        self.log.push(Command::CreateRenderTexture(handle));
        Ok(())
    }

    unsafe fn delete_render_texture(&mut self, handle: RenderTextureHandle) -> Result<()> {
        self.render_textures
            .free(handle)
            .ok_or(Error::RenderTextureHandleInvalid(handle))?;

        self.log.push(Command::DeleteRenderTexture(handle));
        Ok(())
    }

    unsafe fn create_mesh(
        &mut self,
        handle: MeshHandle,
        params: MeshParams,
        data: MeshData,
    ) -> Result<()> {
        params.validate(&data)?;
        self.meshes.create(handle, params);
        self.log.push(Command::CreateMesh(handle));
        Ok(())
    }

    unsafe fn delete_mesh(&mut self, handle: MeshHandle) -> Result<()> {
        self.meshes
            .free(handle)
            .ok_or(Error::MeshHandleInvalid(handle))?;

        self.log.push(Command::DeleteMesh(handle));
        Ok(())
    }

    unsafe fn bind(
        &mut self,
        surface: Option<SurfaceHandle>,
        dimensions: Vector2<u32>,
    ) -> Result<()> {
        let dimensions = match surface {
            Some(handle) => {
                self.surfaces
                    .get(handle)
                    .ok_or(Error::SurfaceHandleInvalid(handle))?
                    .dimensions
            }
            None => dimensions,
        };

        self.log.0.borrow_mut().state.surface = surface;
        self.log.push(Command::Bind {
            surface,
            dimensions,
        });

        Ok(())
    }

    unsafe fn clear(&mut self, color: Option<Color<f32>>, depth: Option<f32>) -> Result<()> {
        self.log.push(Command::Clear { color, depth });
        Ok(())
    }

    unsafe fn set_depth_test(&mut self, comparison: Option<Comparison>) -> Result<()> {
        self.log.0.borrow_mut().state.depth_test = comparison;
        self.log.push(Command::SetDepthTest(comparison));
        Ok(())
    }

    unsafe fn set_clip_distance(&mut self, enable: bool) -> Result<()> {
        self.log.0.borrow_mut().state.clip_distance = enable;
        self.log.push(Command::SetClipDistance(enable));
        Ok(())
    }

    unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) -> Result<()> {
        self.log.0.borrow_mut().state.polygon_mode = mode;
        self.log.push(Command::SetPolygonMode(mode));
        Ok(())
    }

    unsafe fn draw(
        &mut self,
        shader: ShaderHandle,
        mesh: MeshHandle,
        mesh_index: MeshIndex,
        uniforms: &[UniformVar],
    ) -> Result<u32> {
        let params = self
            .shaders
            .get(shader)
            .ok_or(Error::ShaderHandleInvalid(shader))?;

        for &(field, variable) in uniforms {
            let tp = params
                .uniforms
                .variable_type(field)
                .ok_or_else(|| Error::UniformUndefined(format!("{:?}", field)))?;

            if tp != variable.variable_type() {
                let name = params.uniforms.variable_name(field).unwrap_or("?");
                return Err(
                    Error::UniformTypeMismatch(name.into(), tp, variable.variable_type()).into(),
                );
            }

            if let UniformVariable::RenderTexture(handle) = variable {
                if let Some(rt) = self.render_textures.get(handle) {
                    if !rt.sampler {
                        bail!("The render buffer does not have a sampler.");
                    }
                }
            }
        }

        let mesh_params = self.meshes.get(mesh).ok_or(Error::MeshHandleInvalid(mesh))?;
        let (_, len) = mesh_params.range(mesh_index)?;

        let record = {
            let data = self.log.0.borrow();
            DrawRecord {
                surface: data.state.surface,
                shader,
                mesh,
                index: mesh_index,
                depth_test: data.state.depth_test,
                clip_distance: data.state.clip_distance,
                polygon_mode: data.state.polygon_mode,
                uniforms: uniforms.to_vec(),
            }
        };

        self.log.push(Command::Draw(record));
        Ok(mesh_params.primitive.assemble(len as u32))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        self.log.push(Command::Flush);
        Ok(())
    }
}
