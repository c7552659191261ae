//! Draws the offscreen color textures onto small screen-space quads.

use super::geometry::{self, REFLECTION_PREVIEW, REFRACTION_PREVIEW};
use super::uniforms::ScreenUniform;

use crate::errors::*;
use crate::video::assets::prelude::*;
use crate::video::{DrawCall, Video};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    /// Top left.
    Reflection,
    /// Top right.
    Refraction,
}

pub struct Compositor {
    shader: ShaderHandle,
    reflection: MeshHandle,
    refraction: MeshHandle,
}

impl Compositor {
    pub fn new(video: &mut Video, shader: ShaderHandle) -> Result<Self> {
        let (min, max) = REFLECTION_PREVIEW;
        let (params, data) = geometry::screen_quad(min.into(), max.into());
        let reflection = video.create_mesh(params, data)?;

        let (min, max) = REFRACTION_PREVIEW;
        let (params, data) = geometry::screen_quad(min.into(), max.into());
        let refraction = video.create_mesh(params, data)?;

        Ok(Compositor {
            shader,
            reflection,
            refraction,
        })
    }

    /// Binds the screen and draws `texture` into the quad of `preview`. Depth
    /// testing is off while the quad is drawn.
    pub fn draw(
        &self,
        video: &mut Video,
        preview: Preview,
        texture: RenderTextureHandle,
    ) -> Result<()> {
        let mesh = match preview {
            Preview::Reflection => self.reflection,
            Preview::Refraction => self.refraction,
        };

        let mut dc = DrawCall::new(self.shader, mesh);
        dc.set_uniform_variable(ScreenUniform::Texture, texture);

        video.bind(None)?;
        video.with_depth_test(None, |v| v.draw(&dc))?;
        Ok(())
    }

    pub fn release(self, video: &mut Video) -> Result<()> {
        video.delete_mesh(self.reflection)?;
        video.delete_mesh(self.refraction)?;
        Ok(())
    }
}
