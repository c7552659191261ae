//! The multi-pass water renderer.
//!
//! `SceneRenderer` draws the scene once into a target with a clipping plane.
//! `WaterPipeline` owns the offscreen targets and sequences the passes of a
//! frame, and `Compositor` shows the targets on screen-space quads.

pub mod compositor;
pub mod geometry;
pub mod passes;
pub mod renderer;
pub mod shaders;
pub mod targets;
pub mod uniforms;

pub mod prelude {
    pub use super::compositor::{Compositor, Preview};
    pub use super::passes::{FrameStats, PassKind, PassOrder, Step, WaterPipeline};
    pub use super::renderer::{Pass, PassStats, SceneRenderer, SceneView, WaterSamplers};
    pub use super::shaders::ShaderLibrary;
    pub use super::targets::{OffscreenTarget, WaterTargets};
}
