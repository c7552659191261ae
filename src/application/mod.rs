//! The frame loop and everything it drives per frame.
//!
//! `Engine` owns the window, the video facade and the river scene. Every frame
//! it polls the window, updates the camera and the lights from the input, and
//! runs the passes of the water effect.

pub mod camera;
pub mod input;
pub mod settings;
pub mod time;

mod engine;
pub use self::engine::Engine;

pub mod prelude {
    pub use super::camera::FlyCamera;
    pub use super::input::InputState;
    pub use super::settings::{AssetParams, CameraParams, EngineParams, Settings, WaterParams};
    pub use super::time::{FrameClock, FrameTime};
    pub use super::Engine;
}
