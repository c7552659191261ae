//! Decodes images into texture data.

use image::{self, GenericImage};

use crate::errors::*;
use crate::math::prelude::Vector2;
use crate::video::assets::texture::*;

/// Decodes an image as a mipmapped, repeating RGBA8 2D texture. Rows are
/// flipped when `flip` is set, since OpenGL expects the bottom row first.
pub fn decode(bytes: &[u8], flip: bool) -> Result<(TextureParams, TextureData)> {
    let mut dynamic = image::load_from_memory(bytes)?;
    if flip {
        dynamic = dynamic.flipv();
    }

    let (w, h) = dynamic.dimensions();
    let params = TextureParams {
        kind: TextureKind::Texture2D,
        wrap: TextureWrap::Repeat,
        filter: TextureFilter::Linear,
        mipmap: true,
        format: TextureFormat::RGBA8,
        dimensions: Vector2::new(w, h),
    };

    let data = TextureData {
        bytes: vec![dynamic.to_rgba().into_raw()],
    };

    Ok((params, data))
}

/// Decodes six images, ordered `+X, -X, +Y, -Y, +Z, -Z`, as a RGB8 cube map.
/// Faces are never flipped.
pub fn decode_cubemap(faces: &[Vec<u8>]) -> Result<(TextureParams, TextureData)> {
    if faces.len() != 6 {
        bail!("A cube map needs 6 faces instead of {}.", faces.len());
    }

    let mut dimensions = None;
    let mut bytes = Vec::with_capacity(6);

    for (i, v) in faces.iter().enumerate() {
        let face = image::load_from_memory(v)?;
        let (w, h) = face.dimensions();

        if let Some(dims) = dimensions {
            if dims != Vector2::new(w, h) {
                bail!("Face {} of cube map is {}x{}, other faces are {:?}.", i, w, h, dims);
            }
        }

        dimensions = Some(Vector2::new(w, h));

        bytes.push(face.to_rgb().into_raw());
    }

    let params = TextureParams {
        kind: TextureKind::Cubemap,
        wrap: TextureWrap::Clamp,
        filter: TextureFilter::Linear,
        mipmap: false,
        format: TextureFormat::RGB8,
        dimensions: dimensions.unwrap_or_else(|| Vector2::new(0, 0)),
    };

    Ok((params, TextureData { bytes }))
}

/// A 1x1 white texture, which stands in for images that could not be loaded.
pub fn placeholder(kind: TextureKind) -> (TextureParams, TextureData) {
    let (format, layers, pixel) = match kind {
        TextureKind::Texture2D => (TextureFormat::RGBA8, 1, vec![255; 4]),
        TextureKind::Cubemap => (TextureFormat::RGB8, 6, vec![255; 3]),
    };

    let params = TextureParams {
        kind,
        wrap: TextureWrap::Clamp,
        filter: TextureFilter::Nearest,
        mipmap: false,
        format,
        dimensions: Vector2::new(1, 1),
    };

    let data = TextureData {
        bytes: vec![pixel; layers],
    };

    (params, data)
}

#[cfg(test)]
mod test {
    use super::*;

    fn png(w: u32, h: u32, rows: &[[u8; 4]]) -> Vec<u8> {
        let mut raw = Vec::new();
        for row in rows {
            for _ in 0..w {
                raw.extend_from_slice(row);
            }
        }

        let mut bytes = Vec::new();
        image::png::PNGEncoder::new(&mut bytes)
            .encode(&raw, w, h, image::ColorType::RGBA(8))
            .unwrap();
        bytes
    }

    #[test]
    fn flip() {
        let bytes = png(1, 2, &[[255, 0, 0, 255], [0, 0, 255, 255]]);

        let (params, data) = decode(&bytes, false).unwrap();
        assert_eq!(params.dimensions, Vector2::new(1, 2));
        assert!(params.validate(&data).is_ok());
        assert_eq!(&data.bytes[0][..4], &[255, 0, 0, 255]);

        let (_, data) = decode(&bytes, true).unwrap();
        assert_eq!(&data.bytes[0][..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn cubemap() {
        let face = png(2, 2, &[[1, 2, 3, 255], [4, 5, 6, 255]]);
        let faces = vec![face.clone(); 6];
        let (params, data) = decode_cubemap(&faces).unwrap();
        assert!(params.validate(&data).is_ok());
        assert_eq!(&data.bytes[5][..3], &[1, 2, 3]);

        let mut faces = faces;
        faces[3] = png(1, 1, &[[0, 0, 0, 255]]);
        assert!(decode_cubemap(&faces).is_err());
        assert!(decode_cubemap(&faces[..5]).is_err());
    }

    #[test]
    fn placeholders() {
        for &kind in &[TextureKind::Texture2D, TextureKind::Cubemap] {
            let (params, data) = placeholder(kind);
            assert!(params.validate(&data).is_ok());
        }
    }
}
