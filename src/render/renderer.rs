//! Renders the whole scene once into the bound target, with a clipping plane
//! and a light configuration. Every pass of a frame goes through here.

use super::geometry;
use super::shaders::ShaderLibrary;
use super::uniforms::*;

use crate::application::camera::FlyCamera;
use crate::errors::*;
use crate::math::prelude::*;
use crate::scene::lights::{LightOverrides, LightRig};
use crate::scene::river::{RiverScene, MARKER_SCALE};
use crate::video::assets::prelude::*;
use crate::video::{DrawCall, Video};

pub const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// The camera state every pass of a frame shares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneView {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub eye: Point3<f32>,
}

impl SceneView {
    pub fn new(camera: &FlyCamera, aspect: f32) -> Self {
        SceneView {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect),
            eye: camera.position(),
        }
    }

    /// The view matrix with its translation stripped, so the skybox never moves
    /// with the camera.
    pub fn skybox_view(&self) -> Matrix4<f32> {
        let m = Matrix3::from_cols(
            self.view.x.truncate(),
            self.view.y.truncate(),
            self.view.z.truncate(),
        );

        Matrix4::from(m)
    }
}

/// The color textures the water surface samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterSamplers {
    pub reflection: RenderTextureHandle,
    pub refraction: RenderTextureHandle,
}

/// What a single pass renders with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pass {
    /// The render destination, `None` for the screen.
    pub target: Option<SurfaceHandle>,
    pub plane: ClipPlane,
    pub overrides: LightOverrides,
    /// Draws the water surface if set.
    pub water: Option<WaterSamplers>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub draws: usize,
    /// Objects skipped because they are entirely on the clipped side.
    pub culled: usize,
}

pub struct SceneRenderer {
    shaders: ShaderLibrary,
    cube: MeshHandle,
    skybox_mesh: MeshHandle,
    water: MeshHandle,
    skybox: TextureHandle,
    cube_bounds: Aabb3<f32>,
}

impl SceneRenderer {
    /// Creates the procedural meshes. The renderer takes over `skybox`.
    pub fn new(video: &mut Video, shaders: ShaderLibrary, skybox: TextureHandle) -> Result<Self> {
        let (params, data) = geometry::cube();
        let cube = video.create_mesh(params, data)?;
        let (params, data) = geometry::skybox();
        let skybox_mesh = video.create_mesh(params, data)?;
        let (params, data) = geometry::water_quad();
        let water = video.create_mesh(params, data)?;

        Ok(SceneRenderer {
            shaders,
            cube,
            skybox_mesh,
            water,
            skybox,
            cube_bounds: Aabb3::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5)),
        })
    }

    /// Clears the bound target and draws the objects, the light marker, the
    /// water if the pass asks for it and finally the skybox. The pipeline state
    /// is left with the default depth function and clipping disabled.
    pub fn render(
        &self,
        video: &mut Video,
        scene: &RiverScene,
        view: &SceneView,
        rig: &LightRig,
        elapsed: f32,
        pass: &Pass,
    ) -> Result<PassStats> {
        let mut stats = PassStats::default();

        video.bind(pass.target)?;
        let [r, g, b, a] = CLEAR_COLOR;
        video.clear(Color::new(r, g, b, a), 1.0)?;
        video.set_clip_distance(true)?;

        let plane = pass.plane.0;

        for object in &scene.objects {
            let mesh = match object.model.mesh {
                Some(mesh) if !object.model.is_empty() => mesh,
                _ => continue,
            };

            if pass.plane.classify(&object.world_bounds(elapsed)) == PlaneRelation::Out {
                stats.culled += 1;
                continue;
            }

            let lights = rig.resolve(&pass.overrides.merge(&object.overrides));
            let model = object.placement.world_matrix(elapsed);

            for part in &object.model.parts {
                let mut dc = DrawCall::new(self.shaders.scene, mesh);
                dc.index = part.index;
                dc.set_uniform_variable(SceneUniform::Model, model);
                dc.set_uniform_variable(SceneUniform::View, view.view);
                dc.set_uniform_variable(SceneUniform::Projection, view.projection);
                dc.set_uniform_variable(SceneUniform::ViewPos, view.eye.to_vec());
                dc.set_uniform_variable(SceneUniform::Plane, plane);
                dc.set_uniform_variable(SceneUniform::MaterialDiffuse, part.diffuse);
                dc.set_uniform_variable(SceneUniform::MaterialSpecular, part.specular);
                dc.set_uniform_variable(SceneUniform::MaterialShininess, SHININESS);
                apply_lighting_state(&mut dc, &lights);

                video.draw(&dc)?;
                stats.draws += 1;
            }
        }

        let marker = Matrix4::from_translation(rig.point.position.to_vec())
            * Matrix4::from_scale(MARKER_SCALE);

        if pass.plane.classify(&self.cube_bounds.transform(&marker)) == PlaneRelation::Out {
            stats.culled += 1;
        } else {
            let mut dc = DrawCall::new(self.shaders.light_cube, self.cube);
            dc.set_uniform_variable(MarkerUniform::Model, marker);
            dc.set_uniform_variable(MarkerUniform::View, view.view);
            dc.set_uniform_variable(MarkerUniform::Projection, view.projection);
            dc.set_uniform_variable(MarkerUniform::Plane, plane);
            video.draw(&dc)?;
            stats.draws += 1;
        }

        if let Some(samplers) = pass.water {
            let mut dc = DrawCall::new(self.shaders.water, self.water);
            let model = scene.water.world_matrix(elapsed);
            dc.set_uniform_variable(WaterUniform::Model, model);
            dc.set_uniform_variable(WaterUniform::View, view.view);
            dc.set_uniform_variable(WaterUniform::Projection, view.projection);
            dc.set_uniform_variable(WaterUniform::Reflection, samplers.reflection);
            dc.set_uniform_variable(WaterUniform::Refraction, samplers.refraction);
            video.draw(&dc)?;
            stats.draws += 1;
        }

        // The skybox is drawn at the far plane, where `Less` would reject it.
        let mut dc = DrawCall::new(self.shaders.skybox, self.skybox_mesh);
        dc.set_uniform_variable(SkyboxUniform::View, view.skybox_view());
        dc.set_uniform_variable(SkyboxUniform::Projection, view.projection);
        dc.set_uniform_variable(SkyboxUniform::Skybox, self.skybox);
        video.with_depth_test(Some(Comparison::LessOrEqual), |v| v.draw(&dc))?;
        stats.draws += 1;

        video.set_clip_distance(false)?;
        Ok(stats)
    }

    pub fn release(self, video: &mut Video) -> Result<()> {
        video.delete_mesh(self.cube)?;
        video.delete_mesh(self.skybox_mesh)?;
        video.delete_mesh(self.water)?;
        video.delete_texture(self.skybox)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn skybox_view_has_no_translation() {
        let view = SceneView {
            view: Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
                * Matrix4::from_angle_y(Deg(30.0)),
            projection: Matrix4::identity(),
            eye: Point3::origin(),
        };

        let m = view.skybox_view();
        assert_eq!(m.w, Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(m.x, view.view.x);
        assert_eq!(m.z, view.view.z);
    }
}
