//! # What is This?
//!
//! Lagoon renders a small river scene with a planar water surface. Every frame
//! the scene is drawn three times: onto the screen, into a reflection target
//! clipped above the water and into a refraction target clipped below it. The
//! water samples both targets projectively.
//!
//! The GPU is reached through `video::Video`, which either drives OpenGL or
//! records every command it was given, so the whole frame can be inspected
//! without a display.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

#[cfg(test)]
#[macro_use]
extern crate approx;

#[macro_use]
pub mod utils;
pub mod errors;
pub mod math;
#[macro_use]
pub mod video;
pub mod application;
pub mod assets;
pub mod render;
pub mod scene;
pub mod window;

pub mod prelude {
    pub use crate::application::prelude::*;
    pub use crate::errors::*;
    pub use crate::math::prelude::*;
    pub use crate::render::prelude::*;
    pub use crate::scene::prelude::*;
    pub use crate::video::prelude::*;
    pub use crate::window::prelude::*;
}
