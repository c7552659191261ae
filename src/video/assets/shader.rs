//! Shader programs, their vertex attributes and their uniform variables.

use std::collections::hash_map::Values;

use crate::math::prelude::{Matrix3, Matrix4, Vector2, Vector3, Vector4};
use crate::utils::prelude::{FastHashMap, HashValue};
use crate::video::assets::mesh::VertexLayout;
use crate::video::assets::texture::{RenderTextureHandle, TextureHandle};
use crate::video::errors::{Error, Result};
use crate::video::{MAX_UNIFORM_VARIABLES, MAX_VERTEX_ATTRIBUTES};

impl_handle!(ShaderHandle);

/// The attributes and uniforms a program promises to consume. Both are checked
/// against the linked program when it is created, and every uniform submitted
/// with a draw must be one of them.
#[derive(Debug, Clone, Default)]
pub struct ShaderParams {
    pub attributes: AttributeLayout,
    pub uniforms: UniformVariableLayout,
}

impl ShaderParams {
    pub fn validate(&self, vs: &str, fs: &str) -> Result<()> {
        if self.uniforms.len() > MAX_UNIFORM_VARIABLES {
            return Err(Error::ShaderInvalid(format!(
                "Too many uniform variables (>= {:?}).",
                MAX_UNIFORM_VARIABLES
            )));
        }

        if vs.is_empty() {
            return Err(Error::ShaderInvalid(
                "Vertex shader is required to describe a proper render pipeline.".into(),
            ));
        }

        if fs.is_empty() {
            return Err(Error::ShaderInvalid(
                "Fragment shader is required to describe a proper render pipeline.".into(),
            ));
        }

        Ok(())
    }
}

/// The possible pre-defined and named attributes in the vertex component, describing
/// what the vertex component is used for.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attribute {
    Position = 0,
    Normal = 1,
    Texcoord0 = 2,
}

impl Attribute {
    /// The name of the attribute in shader sources.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Position => "Position",
            Attribute::Normal => "Normal",
            Attribute::Texcoord0 => "Texcoord0",
        }
    }
}

// AttributeLayout defines an layout of attributes into program.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AttributeLayout {
    len: u8,
    elements: [(Attribute, u8); MAX_VERTEX_ATTRIBUTES],
}

impl Default for AttributeLayout {
    fn default() -> Self {
        AttributeLayout {
            len: 0,
            elements: [(Attribute::Position, 0); MAX_VERTEX_ATTRIBUTES],
        }
    }
}

impl AttributeLayout {
    pub fn build() -> AttributeLayoutBuilder {
        AttributeLayoutBuilder::new()
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (Attribute, u8)> + 'a {
        self.elements[..self.len as usize].iter().cloned()
    }

    /// Returns true if the vertex layout provides every attribute with at least
    /// the required size.
    pub fn is_match(&self, layout: &VertexLayout) -> bool {
        self.iter().all(|(name, size)| match layout.element(name) {
            Some(element) => element.size >= size,
            None => false,
        })
    }
}

#[derive(Default)]
pub struct AttributeLayoutBuilder(AttributeLayout);

impl AttributeLayoutBuilder {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(mut self, attribute: Attribute, size: u8) -> Self {
        assert!(size > 0 && size <= 4);

        for i in 0..self.0.len as usize {
            if self.0.elements[i].0 == attribute {
                self.0.elements[i] = (attribute, size);
                return self;
            }
        }

        assert!((self.0.len as usize) < MAX_VERTEX_ATTRIBUTES);
        self.0.elements[self.0.len as usize] = (attribute, size);
        self.0.len += 1;
        self
    }

    #[inline]
    pub fn finish(self) -> AttributeLayout {
        self.0
    }
}

/// A pixel-wise comparison function.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Comparison {
    Never,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Always,
}

/// How polygons are rasterized.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// Uniform variable type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UniformVariableType {
    Texture,
    RenderTexture,
    I32,
    F32,
    Vector2f,
    Vector3f,
    Vector4f,
    Matrix3f,
    Matrix4f,
}

/// Uniform variable for video program object. Each matrix based `UniformVariable`
/// is assumed to be supplied in column major order with a optional transpose.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformVariable {
    Texture(TextureHandle),
    RenderTexture(RenderTextureHandle),
    I32(i32),
    F32(f32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
    Matrix3f([[f32; 3]; 3], bool),
    Matrix4f([[f32; 4]; 4], bool),
}

impl UniformVariable {
    pub fn variable_type(&self) -> UniformVariableType {
        match *self {
            UniformVariable::RenderTexture(_) => UniformVariableType::RenderTexture,
            UniformVariable::Texture(_) => UniformVariableType::Texture,
            UniformVariable::I32(_) => UniformVariableType::I32,
            UniformVariable::F32(_) => UniformVariableType::F32,
            UniformVariable::Vector2f(_) => UniformVariableType::Vector2f,
            UniformVariable::Vector3f(_) => UniformVariableType::Vector3f,
            UniformVariable::Vector4f(_) => UniformVariableType::Vector4f,
            UniformVariable::Matrix3f(_, _) => UniformVariableType::Matrix3f,
            UniformVariable::Matrix4f(_, _) => UniformVariableType::Matrix4f,
        }
    }
}

impl From<TextureHandle> for UniformVariable {
    fn from(v: TextureHandle) -> Self {
        UniformVariable::Texture(v)
    }
}

impl From<RenderTextureHandle> for UniformVariable {
    fn from(v: RenderTextureHandle) -> Self {
        UniformVariable::RenderTexture(v)
    }
}

impl From<i32> for UniformVariable {
    fn from(v: i32) -> Self {
        UniformVariable::I32(v)
    }
}

impl From<f32> for UniformVariable {
    fn from(v: f32) -> Self {
        UniformVariable::F32(v)
    }
}

impl From<Vector2<f32>> for UniformVariable {
    fn from(v: Vector2<f32>) -> Self {
        UniformVariable::Vector2f(v.into())
    }
}

impl From<Vector3<f32>> for UniformVariable {
    fn from(v: Vector3<f32>) -> Self {
        UniformVariable::Vector3f(v.into())
    }
}

impl From<[f32; 3]> for UniformVariable {
    fn from(v: [f32; 3]) -> Self {
        UniformVariable::Vector3f(v)
    }
}

impl From<Vector4<f32>> for UniformVariable {
    fn from(v: Vector4<f32>) -> Self {
        UniformVariable::Vector4f(v.into())
    }
}

impl From<Matrix3<f32>> for UniformVariable {
    fn from(v: Matrix3<f32>) -> Self {
        UniformVariable::Matrix3f(v.into(), false)
    }
}

impl From<Matrix4<f32>> for UniformVariable {
    fn from(v: Matrix4<f32>) -> Self {
        UniformVariable::Matrix4f(v.into(), false)
    }
}

// UniformVariableLayout defines an layout of uniforms in program.
#[derive(Debug, Clone, Default)]
pub struct UniformVariableLayout {
    variables: FastHashMap<HashValue<str>, (String, UniformVariableType)>,
}

impl UniformVariableLayout {
    pub fn build() -> UniformVariableLayoutBuilder {
        UniformVariableLayoutBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> Values<HashValue<str>, (String, UniformVariableType)> {
        self.variables.values()
    }

    pub fn variable_type<T>(&self, field: T) -> Option<UniformVariableType>
    where
        T: Into<HashValue<str>>,
    {
        self.variables.get(&field.into()).map(|v| v.1)
    }

    pub fn variable_name<T>(&self, field: T) -> Option<&str>
    where
        T: Into<HashValue<str>>,
    {
        self.variables.get(&field.into()).map(|v| v.0.as_ref())
    }
}

#[derive(Default)]
pub struct UniformVariableLayoutBuilder(UniformVariableLayout);

impl UniformVariableLayoutBuilder {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<T>(mut self, field: T, v: UniformVariableType) -> Self
    where
        T: Into<String>,
    {
        let field = field.into();
        let hash = HashValue::from(&field);
        self.0.variables.insert(hash, (field, v));
        self
    }

    #[inline]
    pub fn finish(self) -> UniformVariableLayout {
        self.0
    }
}
