//! Where scene objects are, and how they move.

use crate::math::prelude::*;

/// A translation, a non-uniform scale and a rotation, always composed as
/// `translate * scale * rotate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            translation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Quaternion::one(),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn with_translation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }

    #[inline]
    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    #[inline]
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(scale, scale, scale)
    }

    #[inline]
    pub fn with_rotation<R: Into<Quaternion<f32>>>(mut self, rotation: R) -> Self {
        self.rotation = rotation.into();
        self
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
            * Matrix4::from(self.rotation)
    }
}

/// The displacement an animation adds to a placement at some point in time.
/// The translation is in world space, the rotation is applied after the
/// rotation of the placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Offset {
    fn default() -> Self {
        Offset {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
        }
    }
}

/// Maps elapsed seconds to an offset. Animations are plain functions of time,
/// so two frames with the same elapsed time always place objects identically.
pub type Animation = fn(f32) -> Offset;

#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub transform: Transform,
    pub animation: Option<Animation>,
}

impl Placement {
    pub fn fixed(transform: Transform) -> Self {
        Placement {
            transform,
            animation: None,
        }
    }

    pub fn animated(transform: Transform, animation: Animation) -> Self {
        Placement {
            transform,
            animation: Some(animation),
        }
    }

    /// The transform at `elapsed` seconds.
    pub fn at(&self, elapsed: f32) -> Transform {
        let mut transform = self.transform;
        if let Some(animation) = self.animation {
            let offset = animation(elapsed);
            transform.translation += offset.translation;
            transform.rotation = transform.rotation * offset.rotation;
        }

        transform
    }

    #[inline]
    pub fn world_matrix(&self, elapsed: f32) -> Matrix4<f32> {
        self.at(elapsed).matrix()
    }

    /// A conservative world-space bound of `local` at `elapsed` seconds.
    pub fn world_bounds(&self, local: &Aabb3<f32>, elapsed: f32) -> Aabb3<f32> {
        local.transform(&self.world_matrix(elapsed))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::Transform as _;

    fn bob(t: f32) -> Offset {
        Offset {
            translation: Vector3::new(0.0, t.sin(), 0.0),
            rotation: Quaternion::from_angle_y(Rad(t)),
        }
    }

    #[test]
    fn composition_order() {
        let transform = Transform::new()
            .with_translation(1.0, 2.0, 3.0)
            .with_scale(2.0, 1.0, 1.0)
            .with_rotation(Quaternion::from_angle_z(Deg(90.0)));

        // The unit x axis is rotated onto y, then scaled, then translated.
        let p = transform.matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_ulps_eq!(p, Point3::new(1.0, 3.0, 3.0), epsilon = 1e-5);

        // Non-uniform scale happens after the rotation.
        let p = transform.matrix().transform_point(Point3::new(0.0, -1.0, 0.0));
        assert_ulps_eq!(p, Point3::new(3.0, 2.0, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn animation() {
        let placement = Placement::animated(Transform::new(), bob);
        let a = placement.world_matrix(2.5);
        let b = placement.world_matrix(2.5);
        assert_eq!(a, b);
        assert_eq!(placement.at(2.5).translation.y, 2.5f32.sin());

        let bounds = Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let fixed = Placement::fixed(Transform::new().with_translation(0.0, 5.0, 0.0));
        let world = fixed.world_bounds(&bounds, 0.0);
        assert_eq!(world.min, Point3::new(-1.0, 4.0, -1.0));
        assert_eq!(world.max, Point3::new(1.0, 6.0, 1.0));
    }
}
