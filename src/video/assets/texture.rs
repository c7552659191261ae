//! Immutable 2D textures, cube maps and render textures. A texture is a container of
//! one or more images. It can be the source of a texture access from a shader.

use crate::math::prelude::Vector2;
use crate::video::errors::{Error, Result};

impl_handle!(TextureHandle);

/// The parameters of a texture object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureParams {
    /// Whether this is a plain 2D texture or a cube map of six faces.
    pub kind: TextureKind,
    /// Sets the wrap parameter for texture.
    pub wrap: TextureWrap,
    /// Specify how the texture is used whenever the pixel being sampled.
    pub filter: TextureFilter,
    /// Should we generates a complete set of mipmaps for a texture object.
    pub mipmap: bool,
    /// Sets the format of data.
    pub format: TextureFormat,
    /// Sets the dimensions of texture, of each face for cube maps.
    pub dimensions: Vector2<u32>,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            kind: TextureKind::Texture2D,
            format: TextureFormat::RGBA8,
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
            mipmap: false,
            dimensions: Vector2::new(0, 0),
        }
    }
}

impl TextureParams {
    pub fn validate(&self, data: &TextureData) -> Result<()> {
        let layers = match self.kind {
            TextureKind::Texture2D => 1,
            TextureKind::Cubemap => 6,
        };

        if data.bytes.len() != layers {
            return Err(Error::OutOfBounds);
        }

        let len = self.format.size() as usize * (self.dimensions.x * self.dimensions.y) as usize;
        if data.bytes.iter().any(|v| v.len() != len) {
            return Err(Error::OutOfBounds);
        }

        Ok(())
    }
}

/// The pixels of a texture, one buffer per layer. Cube map faces are ordered
/// as `+X, -X, +Y, -Y, +Z, -Z`.
#[derive(Debug, Clone, Default)]
pub struct TextureData {
    pub bytes: Vec<Vec<u8>>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureKind {
    Texture2D,
    Cubemap,
}

/// A `RenderTexture` object is basicly texture object with special format. It can
/// be used as a render target. If the `sampler` field is true, it can also be the
/// source of a texture access from a __shader__, otherwise it is a plain renderbuffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderTextureParams {
    pub format: RenderTextureFormat,
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
    pub dimensions: Vector2<u32>,
    pub sampler: bool,
}

impl Default for RenderTextureParams {
    fn default() -> Self {
        RenderTextureParams {
            format: RenderTextureFormat::RGB8,
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
            dimensions: Vector2::new(0, 0),
            sampler: true,
        }
    }
}

impl_handle!(RenderTextureHandle);

/// Specify how the texture is used whenever the pixel being sampled.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureFilter {
    /// Returns the value of the texture element that is nearest (in Manhattan distance)
    /// to the center of the pixel being textured.
    Nearest,
    /// Returns the weighted average of the four texture elements that are closest to the
    /// center of the pixel being textured.
    Linear,
}

/// Sets the wrap parameter for texture.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureWrap {
    /// Samples at coord x + 1 map to coord x.
    Repeat,
    /// Samples at coord x + 1 map to coord 1 - x.
    Mirror,
    /// Samples at coord x + 1 map to coord 1.
    Clamp,
}

/// List of all the possible formats of renderable texture which could be use as
/// attachment of framebuffer.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RenderTextureFormat {
    RGB8,
    RGBA8,
    Depth24,
    Depth24Stencil8,
}

impl RenderTextureFormat {
    pub fn is_color(self) -> bool {
        self == RenderTextureFormat::RGB8 || self == RenderTextureFormat::RGBA8
    }
}

/// List of all the possible formats of input data when uploading to texture.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextureFormat {
    RGB8,
    RGBA8,
}

impl TextureFormat {
    /// Returns the size in bytes of a pixel of this type.
    pub fn size(self) -> u8 {
        match self {
            TextureFormat::RGB8 => 3,
            TextureFormat::RGBA8 => 4,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate() {
        let mut params = TextureParams::default();
        params.dimensions = Vector2::new(2, 2);

        let data = TextureData {
            bytes: vec![vec![0; 16]],
        };
        assert!(params.validate(&data).is_ok());

        params.kind = TextureKind::Cubemap;
        assert!(params.validate(&data).is_err());

        params.format = TextureFormat::RGB8;
        let data = TextureData {
            bytes: vec![vec![0; 12]; 6],
        };
        assert!(params.validate(&data).is_ok());
    }
}
