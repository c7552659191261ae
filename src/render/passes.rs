//! The per-frame sequence of the water effect.
//!
//! Every frame renders the scene three times: the main view on the screen,
//! the part above the water into the reflection target and the part below it
//! into the refraction target. Both targets are then shown as previews.
//!
//! With `PassOrder::Lagged` the main pass runs first, so the water samples
//! the targets of the previous frame. `PassOrder::FrameExact` renders both
//! targets before the main pass, and the previews after it since the main
//! pass clears the screen.

use std::path::Path;

use super::compositor::{Compositor, Preview};
use super::renderer::{Pass, PassStats, SceneRenderer, SceneView, WaterSamplers};
use super::shaders::ShaderLibrary;
use super::targets::WaterTargets;

use crate::application::settings::WaterParams;
use crate::errors::*;
use crate::math::prelude::*;
use crate::scene::lights::{LightOverrides, LightRig};
use crate::scene::river::RiverScene;
use crate::video::assets::prelude::*;
use crate::video::Video;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassOrder {
    /// Main, reflection, refraction. The water lags one frame behind.
    Lagged,
    /// Reflection, refraction, main.
    FrameExact,
}

impl Default for PassOrder {
    fn default() -> Self {
        PassOrder::Lagged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Main,
    Reflection,
    Refraction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Scene(PassKind),
    Preview(Preview),
}

impl PassOrder {
    pub fn steps(self) -> &'static [Step] {
        use self::PassKind::*;

        const LAGGED: [Step; 5] = [
            Step::Scene(Main),
            Step::Scene(Reflection),
            Step::Preview(Preview::Reflection),
            Step::Scene(Refraction),
            Step::Preview(Preview::Refraction),
        ];

        const FRAME_EXACT: [Step; 5] = [
            Step::Scene(Reflection),
            Step::Scene(Refraction),
            Step::Scene(Main),
            Step::Preview(Preview::Reflection),
            Step::Preview(Preview::Refraction),
        ];

        match self {
            PassOrder::Lagged => &LAGGED,
            PassOrder::FrameExact => &FRAME_EXACT,
        }
    }
}

/// What happened during one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameStats {
    pub passes: Vec<(PassKind, PassStats)>,
}

impl FrameStats {
    pub fn pass(&self, kind: PassKind) -> Option<PassStats> {
        self.passes.iter().find(|v| v.0 == kind).map(|v| v.1)
    }

    pub fn draws(&self) -> usize {
        self.passes.iter().map(|v| v.1.draws).sum()
    }
}

pub struct WaterPipeline {
    order: PassOrder,
    height: f32,
    follow_window: bool,
    fixed_size: Option<Vector2<u32>>,
    wireframe: bool,
    shaders: ShaderLibrary,
    renderer: SceneRenderer,
    compositor: Compositor,
    targets: WaterTargets,
}

impl WaterPipeline {
    /// Creates the shaders, meshes and offscreen targets. The targets take the
    /// size of the screen unless `params` fixes one. The pipeline takes over
    /// `skybox`.
    pub fn new(
        video: &mut Video,
        params: &WaterParams,
        skybox: TextureHandle,
        shader_dir: Option<&Path>,
    ) -> Result<Self> {
        let shaders = ShaderLibrary::new(video, shader_dir)?;
        let renderer = SceneRenderer::new(video, shaders, skybox)?;
        let compositor = Compositor::new(video, shaders.screen)?;

        let dimensions = params.target_size.unwrap_or_else(|| video.dimensions());
        let targets = WaterTargets::new(video, dimensions)?;

        Ok(WaterPipeline {
            order: params.order,
            height: params.height,
            follow_window: params.follow_window,
            fixed_size: params.target_size,
            wireframe: false,
            shaders,
            renderer,
            compositor,
            targets,
        })
    }

    #[inline]
    pub fn order(&self) -> PassOrder {
        self.order
    }

    #[inline]
    pub fn set_order(&mut self, order: PassOrder) {
        self.order = order;
    }

    #[inline]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Rasterizes the scene passes as lines. Previews are always filled.
    #[inline]
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    #[inline]
    pub fn targets(&self) -> &WaterTargets {
        &self.targets
    }

    /// The parameters of pass `kind`.
    pub fn pass(&self, kind: PassKind) -> Pass {
        match kind {
            PassKind::Main => Pass {
                target: None,
                plane: ClipPlane::null(),
                overrides: LightOverrides::none(),
                water: Some(WaterSamplers {
                    reflection: self.targets.reflection.color(),
                    refraction: self.targets.refraction.color(),
                }),
            },
            PassKind::Reflection => Pass {
                target: Some(self.targets.reflection.surface()),
                plane: ClipPlane::above(self.height),
                overrides: LightOverrides::none(),
                water: None,
            },
            PassKind::Refraction => Pass {
                target: Some(self.targets.refraction.surface()),
                plane: ClipPlane::below(self.height),
                overrides: LightOverrides::refraction(),
                water: None,
            },
        }
    }

    /// Runs every pass of one frame. `elapsed` is sampled once by the caller,
    /// so all passes see the scene at the same instant.
    pub fn render(
        &mut self,
        video: &mut Video,
        scene: &RiverScene,
        view: &SceneView,
        rig: &LightRig,
        elapsed: f32,
    ) -> Result<FrameStats> {
        let mut stats = FrameStats::default();
        let mode = if self.wireframe {
            PolygonMode::Line
        } else {
            PolygonMode::Fill
        };

        for &step in self.order.steps() {
            match step {
                Step::Scene(kind) => {
                    video.set_polygon_mode(mode)?;
                    let pass = self.pass(kind);
                    let v = self.renderer.render(video, scene, view, rig, elapsed, &pass)?;
                    stats.passes.push((kind, v));
                }

                Step::Preview(preview) => {
                    video.set_polygon_mode(PolygonMode::Fill)?;
                    let texture = match preview {
                        Preview::Reflection => self.targets.reflection.color(),
                        Preview::Refraction => self.targets.refraction.color(),
                    };

                    self.compositor.draw(video, preview, texture)?;
                }
            }
        }

        Ok(stats)
    }

    /// Follows a new framebuffer size. Targets with a configured size, or with
    /// `follow_window` disabled, are kept as they are.
    pub fn resize(&mut self, video: &mut Video, dimensions: Vector2<u32>) -> Result<bool> {
        if !self.follow_window || self.fixed_size.is_some() {
            return Ok(false);
        }

        self.targets.resize(video, dimensions)
    }

    pub fn release(self, video: &mut Video) -> Result<()> {
        self.targets.release(video)?;
        self.compositor.release(video)?;
        self.renderer.release(video)?;
        self.shaders.release(video)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn steps() {
        let lagged = PassOrder::Lagged.steps();
        assert_eq!(lagged[0], Step::Scene(PassKind::Main));
        assert_eq!(lagged.len(), 5);

        // The main pass clears the screen, previews must come after it.
        let exact = PassOrder::FrameExact.steps();
        let main = exact
            .iter()
            .position(|v| *v == Step::Scene(PassKind::Main))
            .unwrap();
        for (i, v) in exact.iter().enumerate() {
            match *v {
                Step::Preview(_) => assert!(i > main),
                Step::Scene(PassKind::Main) => {}
                Step::Scene(_) => assert!(i < main),
            }
        }

        assert_eq!(PassOrder::default(), PassOrder::Lagged);
    }
}
