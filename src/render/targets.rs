//! Offscreen render targets of the water passes.
//!
//! A target is a RGB8 color texture that shaders can sample, and a combined
//! 24/8 depth-stencil renderbuffer, attached to one surface. Both attachments
//! are created from the same dimensions, so they can never disagree.

use crate::errors::*;
use crate::math::prelude::Vector2;
use crate::video::assets::prelude::*;
use crate::video::Video;

#[derive(Debug)]
pub struct OffscreenTarget {
    surface: SurfaceHandle,
    color: RenderTextureHandle,
    depth_stencil: RenderTextureHandle,
    dimensions: Vector2<u32>,
}

impl OffscreenTarget {
    /// Creates a target and verifies that its framebuffer is complete. Nothing
    /// is left behind if it is not.
    pub fn new(video: &mut Video, dimensions: Vector2<u32>) -> Result<Self> {
        let mut params = RenderTextureParams::default();
        params.format = RenderTextureFormat::RGB8;
        params.filter = TextureFilter::Linear;
        params.wrap = TextureWrap::Clamp;
        params.dimensions = dimensions;
        params.sampler = true;
        let color = video.create_render_texture(params)?;

        params.format = RenderTextureFormat::Depth24Stencil8;
        params.sampler = false;
        let depth_stencil = match video.create_render_texture(params) {
            Ok(v) => v,
            Err(err) => {
                video.delete_render_texture(color)?;
                return Err(err);
            }
        };

        let surface = match video.create_surface(SurfaceParams::new(color, depth_stencil)) {
            Ok(v) => v,
            Err(err) => {
                video.delete_render_texture(depth_stencil)?;
                video.delete_render_texture(color)?;
                return Err(err);
            }
        };

        Ok(OffscreenTarget {
            surface,
            color,
            depth_stencil,
            dimensions,
        })
    }

    #[inline]
    pub fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    /// The color attachment, which can be sampled as a `RenderTexture`.
    #[inline]
    pub fn color(&self) -> RenderTextureHandle {
        self.color
    }

    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    /// Frees the surface and its attachments. Consuming the target makes a
    /// second release impossible.
    pub fn release(self, video: &mut Video) -> Result<()> {
        video.delete_surface(self.surface)?;
        video.delete_render_texture(self.depth_stencil)?;
        video.delete_render_texture(self.color)?;
        Ok(())
    }
}

/// The reflection and refraction targets.
#[derive(Debug)]
pub struct WaterTargets {
    pub reflection: OffscreenTarget,
    pub refraction: OffscreenTarget,
}

impl WaterTargets {
    pub fn new(video: &mut Video, dimensions: Vector2<u32>) -> Result<Self> {
        let reflection = OffscreenTarget::new(video, dimensions)?;
        let refraction = match OffscreenTarget::new(video, dimensions) {
            Ok(v) => v,
            Err(err) => {
                reflection.release(video)?;
                return Err(err);
            }
        };

        info!(
            "Created water targets of {}x{}.",
            dimensions.x, dimensions.y
        );

        Ok(WaterTargets {
            reflection,
            refraction,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.reflection.dimensions()
    }

    /// Re-creates both targets with `dimensions`. Returns false if nothing had
    /// to change, which includes a minimized window with a zero-sized
    /// framebuffer. The previous targets are kept if the new ones fail.
    pub fn resize(&mut self, video: &mut Video, dimensions: Vector2<u32>) -> Result<bool> {
        let previous = self.dimensions();
        if dimensions == previous || dimensions.x == 0 || dimensions.y == 0 {
            return Ok(false);
        }

        let targets = WaterTargets::new(video, dimensions)?;
        ::std::mem::replace(self, targets).release(video)?;

        info!(
            "Re-created water targets from {}x{} to {}x{}.",
            previous.x, previous.y, dimensions.x, dimensions.y
        );

        Ok(true)
    }

    pub fn release(self, video: &mut Video) -> Result<()> {
        self.reflection.release(video)?;
        self.refraction.release(video)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::prelude::Command;

    #[test]
    fn lifecycle() {
        let (mut video, log) = Video::headless(Vector2::new(64, 32));
        let mut targets = WaterTargets::new(&mut video, Vector2::new(64, 32)).unwrap();
        assert_eq!(video.alive(), 6);
        assert_ne!(targets.reflection.color(), targets.refraction.color());

        assert!(!targets.resize(&mut video, Vector2::new(64, 32)).unwrap());
        assert!(!targets.resize(&mut video, Vector2::new(0, 32)).unwrap());
        assert!(targets.resize(&mut video, Vector2::new(128, 64)).unwrap());
        assert_eq!(targets.dimensions(), Vector2::new(128, 64));
        assert_eq!(video.alive(), 6);

        targets.release(&mut video).unwrap();
        assert_eq!(video.alive(), 0);

        let surfaces = log
            .commands()
            .into_iter()
            .filter(|v| match *v {
                Command::DeleteSurface(_) => true,
                _ => false,
            })
            .count();
        assert_eq!(surfaces, 4);
    }

    #[test]
    fn zero_sized() {
        let (mut video, _) = Video::headless(Vector2::new(64, 32));
        assert!(OffscreenTarget::new(&mut video, Vector2::new(0, 0)).is_err());
        assert_eq!(video.alive(), 0);
    }
}
