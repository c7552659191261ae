use std::fmt;

use cgmath::prelude::*;
use cgmath::{BaseFloat, Point3, Vector3, Vector4};

/// A plane `n . p = d`. Points with `n . p > d` are on the positive side.
#[derive(Copy, Clone, PartialEq)]
pub struct Plane<S> {
    pub n: Vector3<S>,
    pub d: S,
}

impl<S: BaseFloat> Plane<S> {
    /// Converts the `(a, b, c, w)` form used by the clip stage, where points on
    /// the plane satisfy `a*x + b*y + c*z + w = 0`.
    pub fn from_vector4_alt(v: Vector4<S>) -> Plane<S> {
        Plane {
            n: Vector3::new(v.x, v.y, v.z),
            d: -v.w,
        }
    }
}

impl<S: BaseFloat> fmt::Debug for Plane<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?}x + {:?}y + {:?}z = {:?}",
            self.n.x, self.n.y, self.n.z, self.d
        )
    }
}

/// Spatial relation between two objects.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
#[repr(u8)]
pub enum PlaneRelation {
    /// Completely inside.
    In,
    /// Crosses the boundary.
    Cross,
    /// Completely outside.
    Out,
}

/// Anything that can be classified against a plane.
pub trait PlaneBound<S: BaseFloat>: fmt::Debug {
    /// Classify the spatial relation with a plane.
    fn relate(&self, plane: Plane<S>) -> PlaneRelation;
}

impl<S: BaseFloat> PlaneBound<S> for Point3<S> {
    fn relate(&self, plane: Plane<S>) -> PlaneRelation {
        let dist = self.to_vec().dot(plane.n);
        if dist > plane.d {
            PlaneRelation::In
        } else if dist < plane.d {
            PlaneRelation::Out
        } else {
            PlaneRelation::Cross
        }
    }
}
