//! The shader programs of the renderer.
//!
//! Sources are compiled into the binary. A shader directory can be configured
//! to override any of them with a `<name>.vs` and `<name>.fs` pair on disk.

use std::fs;
use std::path::Path;

use super::uniforms::*;

use crate::errors::*;
use crate::video::assets::prelude::*;
use crate::video::Video;

struct Builtin {
    name: &'static str,
    vs: &'static str,
    fs: &'static str,
}

const SCENE: Builtin = Builtin {
    name: "scene",
    vs: include_str!("../../assets/shaders/scene.vs"),
    fs: include_str!("../../assets/shaders/scene.fs"),
};

const LIGHT_CUBE: Builtin = Builtin {
    name: "light_cube",
    vs: include_str!("../../assets/shaders/light_cube.vs"),
    fs: include_str!("../../assets/shaders/light_cube.fs"),
};

const SKYBOX: Builtin = Builtin {
    name: "skybox",
    vs: include_str!("../../assets/shaders/skybox.vs"),
    fs: include_str!("../../assets/shaders/skybox.fs"),
};

const WATER: Builtin = Builtin {
    name: "water",
    vs: include_str!("../../assets/shaders/water.vs"),
    fs: include_str!("../../assets/shaders/water.fs"),
};

const SCREEN: Builtin = Builtin {
    name: "screen",
    vs: include_str!("../../assets/shaders/screen.vs"),
    fs: include_str!("../../assets/shaders/screen.fs"),
};

/// Every program the renderer draws with.
#[derive(Debug, Clone, Copy)]
pub struct ShaderLibrary {
    pub scene: ShaderHandle,
    pub light_cube: ShaderHandle,
    pub skybox: ShaderHandle,
    pub water: ShaderHandle,
    pub screen: ShaderHandle,
}

impl ShaderLibrary {
    pub fn new(video: &mut Video, dir: Option<&Path>) -> Result<Self> {
        let attributes = AttributeLayout::build()
            .with(Attribute::Position, 3)
            .with(Attribute::Normal, 3)
            .with(Attribute::Texcoord0, 2)
            .finish();
        let params = ShaderParams {
            attributes,
            uniforms: SceneUniform::layout(),
        };
        let scene = create(video, dir, &SCENE, params)?;

        let attributes = AttributeLayout::build()
            .with(Attribute::Position, 3)
            .finish();
        let params = ShaderParams {
            attributes,
            uniforms: MarkerUniform::layout(),
        };
        let light_cube = create(video, dir, &LIGHT_CUBE, params)?;

        let params = ShaderParams {
            attributes,
            uniforms: SkyboxUniform::layout(),
        };
        let skybox = create(video, dir, &SKYBOX, params)?;

        // The water samples in projective space, texture coordinates are unused.
        let attributes = AttributeLayout::build()
            .with(Attribute::Position, 3)
            .finish();
        let params = ShaderParams {
            attributes,
            uniforms: WaterUniform::layout(),
        };
        let water = create(video, dir, &WATER, params)?;

        let attributes = AttributeLayout::build()
            .with(Attribute::Position, 2)
            .with(Attribute::Texcoord0, 2)
            .finish();
        let params = ShaderParams {
            attributes,
            uniforms: ScreenUniform::layout(),
        };
        let screen = create(video, dir, &SCREEN, params)?;

        Ok(ShaderLibrary {
            scene,
            light_cube,
            skybox,
            water,
            screen,
        })
    }

    pub fn release(self, video: &mut Video) -> Result<()> {
        video.delete_shader(self.scene)?;
        video.delete_shader(self.light_cube)?;
        video.delete_shader(self.skybox)?;
        video.delete_shader(self.water)?;
        video.delete_shader(self.screen)?;
        Ok(())
    }
}

fn create(
    video: &mut Video,
    dir: Option<&Path>,
    builtin: &Builtin,
    params: ShaderParams,
) -> Result<ShaderHandle> {
    let (vs, fs) = match dir {
        Some(dir) => (
            read(dir, builtin.name, "vs")?,
            read(dir, builtin.name, "fs")?,
        ),
        None => (builtin.vs.to_owned(), builtin.fs.to_owned()),
    };

    video
        .create_shader(params, &vs, &fs, None)
        .map_err(|err| format_err!("Failed to create shader {}: {}", builtin.name, err))
}

fn read(dir: &Path, name: &str, stage: &str) -> Result<String> {
    let path = dir.join(format!("{}.{}", name, stage));
    fs::read_to_string(&path).map_err(|err| format_err!("{:?}: {}", path, err))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::prelude::Vector2;

    #[test]
    fn builtin() {
        let (mut video, _) = Video::headless(Vector2::new(8, 8));
        let shaders = ShaderLibrary::new(&mut video, None).unwrap();
        assert_eq!(video.alive(), 5);

        shaders.release(&mut video).unwrap();
        assert_eq!(video.alive(), 0);
    }

    #[test]
    fn missing_override() {
        let (mut video, _) = Video::headless(Vector2::new(8, 8));
        let dir = Path::new("this/directory/does/not/exist");
        assert!(ShaderLibrary::new(&mut video, Some(dir)).is_err());
        assert_eq!(video.alive(), 0);
    }
}
