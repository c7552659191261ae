//! The hand-authored river scene.

use std::f32::consts::PI;

use super::lights::LightOverrides;
use super::placement::{Offset, Placement, Transform};

use crate::assets::model::Model;
use crate::assets::AssetLoader;
use crate::errors::*;
use crate::math::prelude::*;
use crate::video::assets::prelude::MeshHandle;
use crate::video::Video;

pub const RIVER_MODEL: &str = "models/river/river.obj";
pub const FISH_MODEL: &str = "models/fish_01/fish.obj";

/// The faces of the skybox, ordered `right, left, top, bottom, front, back`.
pub const SKYBOX_FACES: [&str; 6] = [
    "skybox/right.jpg",
    "skybox/left.jpg",
    "skybox/top.jpg",
    "skybox/bottom.jpg",
    "skybox/front.jpg",
    "skybox/back.jpg",
];

/// The scale of the point light marker cube.
pub const MARKER_SCALE: f32 = 0.2;

/// A model placed in the scene.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: &'static str,
    pub model: Model,
    pub placement: Placement,
    /// Light changes that only apply to this object.
    pub overrides: LightOverrides,
}

impl SceneObject {
    pub fn new(name: &'static str, model: Model, placement: Placement) -> Self {
        SceneObject {
            name,
            model,
            placement,
            overrides: LightOverrides::none(),
        }
    }

    pub fn with_overrides(mut self, overrides: LightOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[inline]
    pub fn world_bounds(&self, elapsed: f32) -> Aabb3<f32> {
        self.placement.world_bounds(&self.model.bounds, elapsed)
    }
}

#[derive(Debug, Clone)]
pub struct RiverScene {
    pub objects: Vec<SceneObject>,
    pub water: Placement,
    pub water_height: f32,
}

impl RiverScene {
    /// A scene with the water surface only.
    pub fn new(water_height: f32) -> Self {
        RiverScene {
            objects: Vec::new(),
            water: water_placement(water_height),
            water_height,
        }
    }

    /// Loads the river and its fish. Missing assets leave empty models behind,
    /// which draw nothing.
    pub fn load(video: &mut Video, loader: &mut AssetLoader, water_height: f32) -> Result<Self> {
        let river = loader.load_model(video, RIVER_MODEL)?;
        let fish = loader.load_model(video, FISH_MODEL)?;

        let mut scene = RiverScene::new(water_height);

        let transform = Transform::new().with_uniform_scale(0.1);
        scene.push(SceneObject::new("river", river, Placement::fixed(transform)));

        let transform = Transform::new()
            .with_translation(-1.5, 0.7, 1.0)
            .with_uniform_scale(0.03)
            .with_rotation(Quaternion::from_angle_y(Deg(90.0)));
        let placement = Placement::animated(transform, swim);
        let object = SceneObject::new("fish", fish.clone(), placement);
        scene.push(object.with_overrides(LightOverrides::fish()));

        let transform = Transform::new()
            .with_translation(1.2, 0.6, -0.8)
            .with_uniform_scale(0.025)
            .with_rotation(Quaternion::from_angle_y(Deg(-90.0)));
        let placement = Placement::animated(transform, drift);
        let object = SceneObject::new("fish", fish, placement);
        scene.push(object.with_overrides(LightOverrides::fish()));

        Ok(scene)
    }

    pub fn push(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Deletes the meshes of every object. Objects that share a model are
    /// released once.
    pub fn release(&mut self, video: &mut Video) -> Result<()> {
        let mut meshes: Vec<MeshHandle> = self
            .objects
            .drain(..)
            .filter_map(|v| v.model.mesh)
            .collect();

        meshes.sort();
        meshes.dedup();

        for v in meshes {
            video.delete_mesh(v)?;
        }

        Ok(())
    }
}

/// The water quad lies in the XY plane, it is laid flat and stretched over the
/// river bed at `height`.
pub fn water_placement(height: f32) -> Placement {
    let transform = Transform::new()
        .with_translation(6.25, height, -7.7)
        .with_scale(12.5, 1.0, 11.0)
        .with_rotation(Quaternion::from_angle_x(Deg(90.0)));

    Placement::fixed(transform)
}

/// A loop around the starting point, facing along the path.
fn swim(t: f32) -> Offset {
    const RADIUS: f32 = 0.6;
    const SPEED: f32 = 0.4;

    let angle = t * SPEED;
    Offset {
        translation: Vector3::new(
            RADIUS * (angle.cos() - 1.0),
            0.05 * (t * 1.7).sin(),
            RADIUS * angle.sin(),
        ),
        rotation: Quaternion::from_angle_y(Rad(-angle)),
    }
}

/// A figure-eight that crosses back and forth under the water line.
fn drift(t: f32) -> Offset {
    let angle = (t * 0.25) % (2.0 * PI);
    Offset {
        translation: Vector3::new(0.8 * angle.sin(), 0.03 * t.sin(), 0.4 * (2.0 * angle).sin()),
        rotation: Quaternion::from_angle_y(Rad(0.3 * (2.0 * angle).cos())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::Transform as _;

    #[test]
    fn water_lies_at_height() {
        let placement = water_placement(1.0);
        let m = placement.world_matrix(0.0);

        for &(x, y) in &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = m.transform_point(Point3::new(x, y, 0.0));
            assert_ulps_eq!(p.y, 1.0, epsilon = 1e-5);
        }

        let center = m.transform_point(Point3::origin());
        assert_ulps_eq!(center, Point3::new(6.25, 1.0, -7.7), epsilon = 1e-5);
    }

    #[test]
    fn swimming_is_a_loop() {
        let period = 2.0 * PI / 0.4;
        let a = swim(1.0);
        let b = swim(1.0 + period);
        assert_ulps_eq!(a.translation.x, b.translation.x, epsilon = 1e-4);
        assert_ulps_eq!(a.translation.z, b.translation.z, epsilon = 1e-4);
        assert_eq!(swim(0.0).translation, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn release_shared_meshes_once() {
        let (mut video, _) = Video::headless(Vector2::new(8, 8));

        let (params, data) = crate::render::geometry::cube();
        let mut model = Model::empty();
        model.mesh = Some(video.create_mesh(params, data).unwrap());

        let mut scene = RiverScene::new(1.0);
        let placement = Placement::fixed(Transform::new());
        scene.push(SceneObject::new("a", model.clone(), placement));
        scene.push(SceneObject::new("b", model, placement));
        assert_eq!(video.alive(), 1);

        scene.release(&mut video).unwrap();
        assert_eq!(video.alive(), 0);
        assert!(scene.objects.is_empty());
    }
}
