//! Functions for loading settings.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::math::prelude::{Point3, Vector2};
use crate::render::passes::PassOrder;
use crate::window::WindowParams;

/// A structure containing configuration data for the engine, which are used to
/// specify hardware setup stuff to create the window, the water effect, the
/// camera and where assets live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowParams,
    pub engine: EngineParams,
    pub water: WaterParams,
    pub camera: CameraParams,
    pub assets: AssetParams,
}

impl Settings {
    /// Loads settings from a JSON file. A missing file yields the defaults, a
    /// malformed one is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Settings {:?} not found, using defaults.", path);
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&text)
            .map_err(|err| format_err!("Failed to parse settings {:?}: {}", path, err))?;

        info!("Loaded settings from {:?}.", path);
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Caps the frame rate, 0 means unlimited.
    pub max_fps: u32,
    /// Runs without any window or OpenGL context, recording draw calls only.
    pub headless: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            max_fps: 0,
            headless: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    /// The height of the water plane in world space.
    pub height: f32,
    pub order: PassOrder,
    /// Re-creates the offscreen targets when the framebuffer is resized.
    pub follow_window: bool,
    /// The size of the offscreen targets, `None` for the framebuffer size at
    /// creation.
    pub target_size: Option<Vector2<u32>>,
}

impl Default for WaterParams {
    fn default() -> Self {
        WaterParams {
            height: 1.0,
            order: PassOrder::Lagged,
            follow_window: true,
            target_size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub position: Point3<f32>,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Degrees per pixel of cursor movement.
    pub sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        CameraParams {
            position: Point3::new(0.0, 2.0, 2.0),
            speed: 2.5,
            sensitivity: 0.1,
            zoom: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetParams {
    /// The directory models and textures are loaded from.
    pub root: PathBuf,
    /// Loads GLSL sources from this directory instead of the ones compiled
    /// into the binary.
    pub shaders: Option<PathBuf>,
}

impl Default for AssetParams {
    fn default() -> Self {
        AssetParams {
            root: PathBuf::from("res"),
            shaders: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_json() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "engine": { "max_fps": 60 },
                "water": { "order": "FrameExact", "target_size": { "x": 320, "y": 180 } }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.engine.max_fps, 60);
        assert!(!settings.engine.headless);
        assert_eq!(settings.water.order, PassOrder::FrameExact);
        assert_eq!(settings.water.target_size, Some(Vector2::new(320, 180)));
        assert_eq!(settings.water.height, 1.0);
        assert_eq!(settings.camera, CameraParams::default());
        assert_eq!(settings.window.size, Vector2::new(800, 600));
    }

    #[test]
    fn missing_file() {
        let settings = Settings::load("this/file/does/not/exist.json").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
