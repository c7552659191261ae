use gl;
use gl::types::*;

use super::super::super::assets::prelude::*;

impl From<MeshHint> for GLenum {
    fn from(hint: MeshHint) -> Self {
        match hint {
            MeshHint::Immutable => gl::STATIC_DRAW,
            MeshHint::Stream => gl::STREAM_DRAW,
        }
    }
}

impl From<Comparison> for GLenum {
    fn from(cmp: Comparison) -> Self {
        match cmp {
            Comparison::Never => gl::NEVER,
            Comparison::Less => gl::LESS,
            Comparison::LessOrEqual => gl::LEQUAL,
            Comparison::Greater => gl::GREATER,
            Comparison::GreaterOrEqual => gl::GEQUAL,
            Comparison::Equal => gl::EQUAL,
            Comparison::NotEqual => gl::NOTEQUAL,
            Comparison::Always => gl::ALWAYS,
        }
    }
}

impl From<PolygonMode> for GLenum {
    fn from(mode: PolygonMode) -> Self {
        match mode {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        }
    }
}

impl From<VertexFormat> for GLenum {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::UByte => gl::UNSIGNED_BYTE,
            VertexFormat::Float => gl::FLOAT,
        }
    }
}

impl From<MeshPrimitive> for GLenum {
    fn from(primitive: MeshPrimitive) -> Self {
        match primitive {
            MeshPrimitive::Lines => gl::LINES,
            MeshPrimitive::Triangles => gl::TRIANGLES,
        }
    }
}

impl From<IndexFormat> for GLenum {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::U16 => gl::UNSIGNED_SHORT,
            IndexFormat::U32 => gl::UNSIGNED_INT,
        }
    }
}

impl From<TextureKind> for GLenum {
    fn from(kind: TextureKind) -> Self {
        match kind {
            TextureKind::Texture2D => gl::TEXTURE_2D,
            TextureKind::Cubemap => gl::TEXTURE_CUBE_MAP,
        }
    }
}

impl From<TextureFormat> for (GLenum, GLenum, GLenum) {
    fn from(format: TextureFormat) -> Self {
        match format {
            TextureFormat::RGB8 => (gl::RGB8, gl::RGB, gl::UNSIGNED_BYTE),
            TextureFormat::RGBA8 => (gl::RGBA8, gl::RGBA, gl::UNSIGNED_BYTE),
        }
    }
}

impl From<TextureWrap> for GLenum {
    fn from(wrap: TextureWrap) -> Self {
        match wrap {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::Mirror => gl::MIRRORED_REPEAT,
            TextureWrap::Clamp => gl::CLAMP_TO_EDGE,
        }
    }
}

impl From<RenderTextureFormat> for (GLenum, GLenum, GLenum) {
    fn from(format: RenderTextureFormat) -> Self {
        match format {
            RenderTextureFormat::RGB8 => (gl::RGB8, gl::RGB, gl::UNSIGNED_BYTE),
            RenderTextureFormat::RGBA8 => (gl::RGBA8, gl::RGBA, gl::UNSIGNED_BYTE),
            RenderTextureFormat::Depth24 => (gl::DEPTH_COMPONENT24, gl::DEPTH_COMPONENT, gl::FLOAT),
            RenderTextureFormat::Depth24Stencil8 => {
                (gl::DEPTH24_STENCIL8, gl::DEPTH_STENCIL, gl::UNSIGNED_INT_24_8)
            }
        }
    }
}

/// The attachment point of a render texture with `format` at color slot `index`.
pub fn attachment_point(format: RenderTextureFormat, index: usize) -> GLenum {
    match format {
        RenderTextureFormat::RGB8 | RenderTextureFormat::RGBA8 => {
            gl::COLOR_ATTACHMENT0 + index as GLenum
        }
        RenderTextureFormat::Depth24 => gl::DEPTH_ATTACHMENT,
        RenderTextureFormat::Depth24Stencil8 => gl::DEPTH_STENCIL_ATTACHMENT,
    }
}

/// Maps the status of `glCheckFramebufferStatus` to a description.
pub fn framebuffer_status(status: GLenum) -> Option<&'static str> {
    use super::super::super::errors::*;

    match status {
        gl::FRAMEBUFFER_COMPLETE => None,
        gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => Some(INCOMPLETE_ATTACHMENT),
        gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => Some(INCOMPLETE_MISSING_ATTACHMENT),
        gl::FRAMEBUFFER_UNSUPPORTED => Some(UNSUPPORTED),
        _ => Some(INCOMPLETE_UNKNOWN),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn framebuffer_status_messages() {
        assert_eq!(framebuffer_status(gl::FRAMEBUFFER_COMPLETE), None);

        let a = framebuffer_status(gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT);
        let b = framebuffer_status(gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT);
        let c = framebuffer_status(gl::FRAMEBUFFER_UNSUPPORTED);
        let d = framebuffer_status(0);
        assert!(a.is_some() && b.is_some() && c.is_some() && d.is_some());
        assert!(a != b && b != c && c != d && a != d);
    }

    #[test]
    fn attachment_points() {
        assert_eq!(attachment_point(RenderTextureFormat::RGB8, 1), gl::COLOR_ATTACHMENT1);
        assert_eq!(
            attachment_point(RenderTextureFormat::Depth24Stencil8, 0),
            gl::DEPTH_STENCIL_ATTACHMENT
        );
    }
}
