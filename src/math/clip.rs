//! User clip planes.

use cgmath::prelude::*;
use cgmath::{Point3, Vector4};

use super::plane::{Plane, PlaneBound, PlaneRelation};

/// A plane equation `(a, b, c, d)` with `a*x + b*y + c*z + d = 0` for points on
/// the plane. This is the form uploaded to the vertex stage, which writes
/// `gl_ClipDistance[0] = dot(vec4(world_pos, 1.0), plane)` and keeps vertices
/// whose distance is not negative.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipPlane(pub Vector4<f32>);

impl ClipPlane {
    /// The plane that clips nothing.
    #[inline]
    pub fn null() -> Self {
        ClipPlane(Vector4::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Keeps everything above the horizontal plane `y = height`.
    #[inline]
    pub fn above(height: f32) -> Self {
        ClipPlane(Vector4::new(0.0, 1.0, 0.0, -height))
    }

    /// Keeps everything below the horizontal plane `y = height`.
    #[inline]
    pub fn below(height: f32) -> Self {
        ClipPlane(Vector4::new(0.0, -1.0, 0.0, height))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0 && self.0.z == 0.0 && self.0.w == 0.0
    }

    /// Signed clip distance of a world-space point.
    #[inline]
    pub fn distance(&self, p: Point3<f32>) -> f32 {
        p.to_homogeneous().dot(self.0)
    }

    /// Returns true if the vertex stage keeps a vertex at `p`.
    #[inline]
    pub fn keeps(&self, p: Point3<f32>) -> bool {
        self.distance(p) >= 0.0
    }

    /// Classifies a world-space bound against the kept half-space. `In` is
    /// entirely kept, `Out` is entirely discarded.
    pub fn classify<B>(&self, bound: &B) -> PlaneRelation
    where
        B: PlaneBound<f32>,
    {
        if self.is_null() {
            return PlaneRelation::In;
        }

        bound.relate(Plane::from_vector4_alt(self.0))
    }
}

impl Default for ClipPlane {
    fn default() -> Self {
        ClipPlane::null()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn water_line() {
        let above = ClipPlane::above(1.0);
        let below = ClipPlane::below(1.0);
        let p = Point3::new(3.0, 1.5, -2.0);
        assert!(above.keeps(p));
        assert!(!below.keeps(p));

        let q = Point3::new(0.0, 1.0, 0.0);
        assert!(above.keeps(q) && below.keeps(q));
        assert!(ClipPlane::null().keeps(Point3::new(0.0, -100.0, 0.0)));
    }

    #[test]
    fn classify() {
        use crate::math::aabb::Aabb3;

        let bounds = |y: f32| {
            Aabb3::new(
                Point3::new(-1.0, y - 0.5, -1.0),
                Point3::new(1.0, y + 0.5, 1.0),
            )
        };
        let above = ClipPlane::above(1.0);
        let below = ClipPlane::below(1.0);

        assert_eq!(above.classify(&bounds(3.0)), PlaneRelation::In);
        assert_eq!(below.classify(&bounds(3.0)), PlaneRelation::Out);
        assert_eq!(above.classify(&bounds(-2.0)), PlaneRelation::Out);
        assert_eq!(above.classify(&bounds(1.0)), PlaneRelation::Cross);
        assert_eq!(below.classify(&bounds(1.0)), PlaneRelation::Cross);
        assert_eq!(ClipPlane::null().classify(&bounds(-2.0)), PlaneRelation::In);
    }
}
