//! Loads models, textures and cube maps from the asset directory.
//!
//! Loading never fails because of a missing or broken file. The failure is
//! logged, and a placeholder is returned instead: a 1x1 white texture or an
//! empty model. Only errors of the video subsystem itself are propagated.

pub mod model;
pub mod texture;

pub mod prelude {
    pub use super::model::{Model, ModelData, ModelPart, ModelVertex};
    pub use super::AssetLoader;
}

use std::fs;
use std::path::{Path, PathBuf};

use self::model::{Model, ModelData, ModelPart};

use crate::errors::*;
use crate::utils::prelude::FastHashMap;
use crate::video::assets::prelude::*;
use crate::video::Video;

pub struct AssetLoader {
    root: PathBuf,
    textures: FastHashMap<PathBuf, TextureHandle>,
    placeholder: Option<TextureHandle>,
}

impl AssetLoader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        AssetLoader {
            root: root.into(),
            textures: FastHashMap::default(),
            placeholder: None,
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `path` against the asset root, absolute paths are kept.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.root.join(path)
    }

    /// The shared 1x1 white texture.
    pub fn placeholder(&mut self, video: &mut Video) -> Result<TextureHandle> {
        if let Some(handle) = self.placeholder {
            return Ok(handle);
        }

        let (params, data) = texture::placeholder(TextureKind::Texture2D);
        let handle = video.create_texture(params, data)?;
        self.placeholder = Some(handle);
        Ok(handle)
    }

    /// Loads a model texture. Images are flipped vertically, mipmapped and
    /// repeat. The same file is only uploaded once.
    pub fn load_texture<P: AsRef<Path>>(
        &mut self,
        video: &mut Video,
        path: P,
    ) -> Result<TextureHandle> {
        let path = self.resolve(path);
        self.load_resolved(video, path)
    }

    fn load_resolved(&mut self, video: &mut Video, path: PathBuf) -> Result<TextureHandle> {
        if let Some(&handle) = self.textures.get(&path) {
            return Ok(handle);
        }

        let decoded = fs::read(&path)
            .map_err(Error::from)
            .and_then(|bytes| texture::decode(&bytes, true));

        let handle = match decoded {
            Ok((params, data)) => video.create_texture(params, data)?,
            Err(err) => {
                warn!("Texture failed to load at {:?}: {}", path, err);
                self.placeholder(video)?
            }
        };

        self.textures.insert(path, handle);
        Ok(handle)
    }

    /// Loads a cube map from six faces ordered `right, left, top, bottom,
    /// front, back`. Faces are not flipped.
    pub fn load_cubemap<P: AsRef<Path>>(
        &mut self,
        video: &mut Video,
        faces: &[P],
    ) -> Result<TextureHandle> {
        let decoded = faces
            .iter()
            .map(|v| {
                let path = self.resolve(v);
                fs::read(&path).map_err(|err| format_err!("{:?}: {}", path, err))
            })
            .collect::<Result<Vec<_>>>()
            .and_then(|faces| texture::decode_cubemap(&faces));

        let (params, data) = match decoded {
            Ok(v) => v,
            Err(err) => {
                warn!("Cube map failed to load: {}", err);
                texture::placeholder(TextureKind::Cubemap)
            }
        };

        video.create_texture(params, data)
    }

    /// Loads an OBJ model with its diffuse and specular maps. Parts without a
    /// map sample the white placeholder.
    pub fn load_model<P: AsRef<Path>>(&mut self, video: &mut Video, path: P) -> Result<Model> {
        let path = self.resolve(path);
        let data = match ModelData::load(&path) {
            Ok(v) => v,
            Err(err) => {
                warn!("{}", err);
                return Ok(Model::empty());
            }
        };

        if data.indices.is_empty() {
            warn!("Model {:?} has no faces.", path);
            return Ok(Model::empty());
        }

        let mut parts = Vec::with_capacity(data.parts.len());
        for (i, v) in data.parts.iter().enumerate() {
            let diffuse = self.load_map(video, v.diffuse.as_ref())?;
            let specular = self.load_map(video, v.specular.as_ref())?;
            parts.push(ModelPart {
                index: MeshIndex::SubMesh(i),
                diffuse,
                specular,
            });
        }

        let (params, mesh) = data.mesh();
        let mesh = video.create_mesh(params, mesh)?;

        info!(
            "Loaded model {:?} with {} vertices in {} parts.",
            path,
            data.vertices.len(),
            parts.len()
        );

        Ok(Model {
            mesh: Some(mesh),
            parts,
            bounds: data.bounds,
        })
    }

    // Map paths of a loaded model already include the asset root.
    fn load_map(&mut self, video: &mut Video, path: Option<&PathBuf>) -> Result<TextureHandle> {
        match path {
            Some(v) => self.load_resolved(video, v.clone()),
            None => self.placeholder(video),
        }
    }

    /// Deletes every texture this loader created.
    pub fn release(&mut self, video: &mut Video) -> Result<()> {
        let mut handles: Vec<TextureHandle> = self.textures.drain().map(|v| v.1).collect();
        handles.extend(self.placeholder.take());
        handles.sort_by_key(|v| (v.index(), v.version()));
        handles.dedup();

        for v in handles {
            video.delete_texture(v)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::prelude::Vector2;

    const OBJ: &str = "
mtllib m.mtl
o plane
v -1.0 0.0 -1.0
v 1.0 0.0 -1.0
v 1.0 0.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
usemtl red
f 1/1 2/2 3/3
";

    const MTL: &str = "
newmtl red
map_Kd red.png
map_Ks red.png
";

    fn red_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::png::PNGEncoder::new(&mut bytes)
            .encode(&[255, 0, 0, 255], 1, 1, image::ColorType::RGBA(8))
            .unwrap();
        bytes
    }

    #[test]
    fn model_maps_under_relative_root() {
        // A relative root, the model directory must only be joined once.
        let root = PathBuf::from("target").join(format!("lagoon-assets-{}", std::process::id()));
        let dir = root.join("models").join("m");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("m.obj"), OBJ).unwrap();
        fs::write(dir.join("m.mtl"), MTL).unwrap();
        fs::write(dir.join("red.png"), red_png()).unwrap();

        let (mut video, _) = Video::headless(Vector2::new(8, 8));
        let mut loader = AssetLoader::new(root.clone());
        let model = loader.load_model(&mut video, "models/m/m.obj").unwrap();
        fs::remove_dir_all(&root).unwrap();

        assert!(!model.is_empty());
        let red = loader.textures[&dir.join("red.png")];
        assert_ne!(Some(red), loader.placeholder);
        assert!(model
            .parts
            .iter()
            .any(|v| v.diffuse == red && v.specular == red));

        loader.release(&mut video).unwrap();
        assert_eq!(video.alive(), 1);
    }

    #[test]
    fn placeholders() {
        let (mut video, _) = Video::headless(Vector2::new(8, 8));
        let mut loader = AssetLoader::new("this/root/does/not/exist");

        let a = loader.load_texture(&mut video, "a.png").unwrap();
        let b = loader.load_texture(&mut video, "b.png").unwrap();
        assert_eq!(a, b);
        assert_eq!(Some(a), loader.placeholder);

        let model = loader.load_model(&mut video, "river.obj").unwrap();
        assert!(model.is_empty());

        let faces = ["right.jpg", "left.jpg", "top.jpg", "bottom.jpg", "front.jpg", "back.jpg"];
        loader.load_cubemap(&mut video, &faces).unwrap();
        assert_eq!(video.alive(), 2);

        loader.release(&mut video).unwrap();
        assert_eq!(video.alive(), 1);
    }
}
