use gl;
use gl::types::*;
use std::cmp;
use std::ffi;

use crate::errors::*;

/// Describes a version. Versions of different APIs are not comparable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        match (*self, *other) {
            (Version::GL(a, b), Version::GL(c, d)) | (Version::ES(a, b), Version::ES(c, d)) => {
                Some((a, b).cmp(&(c, d)))
            }
            _ => None,
        }
    }
}

impl Version {
    /// Parses a `GL_VERSION` string like `"4.1 ATI-1.68.20"` or `"OpenGL ES 3.0 Mesa"`.
    pub fn parse(desc: &str) -> Result<Version> {
        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            (true, &desc[13..])
        } else {
            (false, desc)
        };

        let mut iter = desc
            .split(' ')
            .next()
            .unwrap_or("")
            .split('.')
            .map(|v| v.parse::<u8>());

        let (major, minor) = match (iter.next(), iter.next()) {
            (Some(Ok(major)), Some(Ok(minor))) => (major, minor),
            _ => bail!("[GL] Version {:?} is unformaled.", desc),
        };

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

/// Represents the capabilities of the context. Contrary to the state, these
/// values never change.
#[derive(Debug)]
pub struct Capabilities {
    pub version: Version,
    /// The company responsible for this GL implementation.
    pub vendor: String,
    /// The name of the renderer.
    pub renderer: String,
    /// Maximum width and height of `glViewport`.
    pub max_viewport_dims: (u32, u32),
    /// `glActiveTexture` must be between `GL_TEXTURE0` and `GL_TEXTURE0` + this value - 1.
    pub max_combined_texture_image_units: u32,
    pub max_color_attachments: u32,
    pub max_clip_distances: u32,
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse(&Self::parse_str(gl::VERSION)?)?;

        Ok(Capabilities {
            version,
            vendor: Self::parse_str(gl::VENDOR)?,
            renderer: Self::parse_str(gl::RENDERER)?,
            max_viewport_dims: {
                let mut val: [GLint; 2] = [0, 0];
                gl::GetIntegerv(gl::MAX_VIEWPORT_DIMS, val.as_mut_ptr());
                (val[0] as u32, val[1] as u32)
            },
            max_combined_texture_image_units: Self::parse_integer(
                gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS,
            ),
            max_color_attachments: Self::parse_integer(gl::MAX_COLOR_ATTACHMENTS),
            max_clip_distances: Self::parse_integer(gl::MAX_CLIP_DISTANCES),
        })
    }

    /// Checks the features the renderer relies on: framebuffer objects, vertex array
    /// objects, geometry shaders and user clip distances.
    pub fn check(&self) -> Result<()> {
        if self.version < Version::GL(3, 3) {
            bail!(
                "The OpenGL implementation {:?} is older than the required 3.3 core profile.",
                self.version
            );
        }

        if self.max_clip_distances < 1 {
            bail!("The OpenGL implementation does not supports clip distances.");
        }

        Ok(())
    }

    unsafe fn parse_str(id: GLenum) -> Result<String> {
        let s = gl::GetString(id);
        if s.is_null() {
            bail!("[GL] String of {} is null.", id);
        }

        Ok(ffi::CStr::from_ptr(s as *const _)
            .to_string_lossy()
            .into_owned())
    }

    unsafe fn parse_integer(id: GLenum) -> u32 {
        let mut val = 0;
        gl::GetIntegerv(id, &mut val);
        val.max(0) as u32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version() {
        assert_eq!(Version::parse("4.1 ATI-1.68.20").unwrap(), Version::GL(4, 1));
        assert_eq!(Version::parse("OpenGL ES 3.0 Mesa").unwrap(), Version::ES(3, 0));
        assert!(Version::parse("garbage").is_err());

        assert!(Version::GL(3, 3) > Version::GL(3, 2));
        assert!(Version::GL(4, 0) > Version::GL(3, 3));
        assert!(!(Version::ES(3, 0) >= Version::GL(3, 0)));
        assert!(!(Version::GL(3, 0) >= Version::ES(3, 0)));
    }
}
