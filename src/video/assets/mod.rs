pub mod shader;
pub mod surface;
pub mod texture;
#[macro_use]
pub mod mesh;

pub mod prelude {
    pub use super::surface::{SurfaceHandle, SurfaceParams};

    pub use super::shader::{
        Attribute, AttributeLayout, AttributeLayoutBuilder, Comparison, PolygonMode,
        ShaderHandle, ShaderParams, UniformVariable, UniformVariableLayout,
        UniformVariableLayoutBuilder, UniformVariableType,
    };

    pub use super::texture::{
        RenderTextureFormat, RenderTextureHandle, RenderTextureParams, TextureData,
        TextureFilter, TextureFormat, TextureHandle, TextureKind, TextureParams, TextureWrap,
    };

    pub use super::mesh::{
        IndexFormat, MeshData, MeshHandle, MeshHint, MeshIndex, MeshParams, MeshPrimitive,
        VertexFormat, VertexLayout,
    };
}
