//! This module contains the math utils that mainly comes from `cgmath` and `collision-rs`.

pub mod aabb;
pub mod clip;
pub mod color;
pub mod plane;

pub mod prelude {
    pub use cgmath::prelude::*;
    pub use cgmath::{
        Deg, Euler, Matrix3, Matrix4, Point2, Point3, Quaternion, Rad, Vector2, Vector3, Vector4,
    };

    pub use super::aabb::Aabb3;
    pub use super::clip::ClipPlane;
    pub use super::color::Color;
    pub use super::plane::{Plane, PlaneBound, PlaneRelation};
}
