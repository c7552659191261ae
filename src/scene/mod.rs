//! The contents of the scene: lights, placed models and the water surface.
//! Nothing in here talks to the graphics API except for loading and
//! releasing models.

pub mod lights;
pub mod placement;
pub mod river;

pub mod prelude {
    pub use super::lights::{
        Attenuation, DirectionalLight, Fragment, LightOverrides, LightRig, LightToggles, Lights,
        Phong, PointLight, SpotLight,
    };
    pub use super::placement::{Animation, Offset, Placement, Transform};
    pub use super::river::{RiverScene, SceneObject};
}
