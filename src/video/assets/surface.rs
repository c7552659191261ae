//! A surface is a framebuffer object and the render textures attached to it.

use crate::video::assets::texture::RenderTextureHandle;
use crate::video::MAX_FRAMEBUFFER_ATTACHMENTS;

impl_handle!(SurfaceHandle);

/// The attachments of a surface. Every attachment must share the same
/// dimensions, and color attachments must use color formats.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceParams {
    pub colors: [Option<RenderTextureHandle>; MAX_FRAMEBUFFER_ATTACHMENTS],
    pub depth_stencil: Option<RenderTextureHandle>,
}

impl SurfaceParams {
    /// A surface with one color attachment and one depth-stencil attachment.
    pub fn new(color: RenderTextureHandle, depth_stencil: RenderTextureHandle) -> Self {
        let mut params = SurfaceParams::default();
        params.colors[0] = Some(color);
        params.depth_stencil = Some(depth_stencil);
        params
    }

    /// Iterates over all the attachments, colors first.
    pub fn attachments<'a>(&'a self) -> impl Iterator<Item = RenderTextureHandle> + 'a {
        self.colors
            .iter()
            .filter_map(|v| *v)
            .chain(self.depth_stencil.iter().cloned())
    }
}
