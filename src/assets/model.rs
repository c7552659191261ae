//! Wavefront OBJ models.

use std::io;
use std::path::{Path, PathBuf};

use obj;

use crate::errors::*;
use crate::math::prelude::*;
use crate::video::assets::prelude::*;

impl_vertex! {
    ModelVertex {
        position => [Position; 3],
        normal => [Normal; 3],
        texcoord => [Texcoord0; 2],
    }
}

/// A group of faces that share one material.
#[derive(Debug, Clone, PartialEq)]
pub struct PartData {
    /// The first index of this part.
    pub offset: usize,
    pub diffuse: Option<PathBuf>,
    pub specular: Option<PathBuf>,
}

/// The triangulated geometry of an OBJ file.
#[derive(Debug, Clone)]
pub struct ModelData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub parts: Vec<PartData>,
    pub bounds: Aabb3<f32>,
}

impl ModelData {
    /// Reads an OBJ file and the material libraries it references. Texture
    /// paths are resolved against the directory of the OBJ file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ModelData> {
        let path = path.as_ref();
        let mut data = obj::Obj::load(path)
            .map_err(|err| format_err!("Failed to load model {:?}: {}", path, err))?;

        if let Err(errs) = data.load_mtls() {
            for (lib, err) in errs {
                warn!("Failed to load material library {} of {:?}: {:?}", lib, path, err);
            }
        }

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::build(&data, &dir)
    }

    /// Parses OBJ text without any material library.
    pub fn parse<R: io::BufRead>(input: &mut R) -> Result<ModelData> {
        let data = obj::Obj::load_buf(input)?;
        Self::build(&data, Path::new(""))
    }

    fn build(data: &obj::Obj<obj::SimplePolygon>, dir: &Path) -> Result<ModelData> {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut parts = Vec::new();
        let mut bounds: Option<Aabb3<f32>> = None;

        for o in &data.objects {
            for group in &o.groups {
                let (diffuse, specular) = match group.material {
                    Some(ref mtl) => (
                        mtl.map_kd.as_ref().map(|v| dir.join(v)),
                        mtl.map_ks.as_ref().map(|v| dir.join(v)),
                    ),
                    None => (None, None),
                };

                parts.push(PartData {
                    offset: indices.len(),
                    diffuse,
                    specular,
                });

                for poly in &group.polys {
                    if poly.len() < 3 {
                        bail!("Polygon with {} vertices in group {}.", poly.len(), group.name);
                    }

                    let mut corners = Vec::with_capacity(poly.len());
                    for &obj::IndexTuple(p, t, n) in poly {
                        let position = *data.position.get(p).ok_or_else(|| out_of_range(p))?;
                        let texcoord = match t {
                            Some(t) => *data.texture.get(t).ok_or_else(|| out_of_range(t))?,
                            None => [0.0, 0.0],
                        };
                        let normal = match n {
                            Some(n) => Some(*data.normal.get(n).ok_or_else(|| out_of_range(n))?),
                            None => None,
                        };

                        let point = Point3::from(position);
                        bounds = Some(match bounds {
                            Some(b) => b.grow(point),
                            None => Aabb3::new(point, point),
                        });

                        corners.push((position, normal, texcoord));
                    }

                    // Triangulates as a fan around the first corner.
                    for i in 1..corners.len() - 1 {
                        let triangle = [corners[0], corners[i], corners[i + 1]];
                        Self::add(triangle, &mut vertices, &mut indices);
                    }
                }
            }
        }

        // Empty groups would make empty sub-meshes.
        let mut kept: Vec<PartData> = Vec::with_capacity(parts.len());
        for v in parts {
            match kept.last_mut() {
                Some(last) if last.offset == v.offset => *last = v,
                _ => kept.push(v),
            }
        }

        kept.retain(|v| v.offset < indices.len());

        Ok(ModelData {
            vertices,
            indices,
            parts: kept,
            bounds: bounds.unwrap_or_else(|| Aabb3::new(Point3::origin(), Point3::origin())),
        })
    }

    fn add(
        corners: [([f32; 3], Option<[f32; 3]>, [f32; 2]); 3],
        verts: &mut Vec<ModelVertex>,
        idxes: &mut Vec<u32>,
    ) {
        let a = Vector3::from(corners[0].0);
        let b = Vector3::from(corners[1].0);
        let c = Vector3::from(corners[2].0);
        let face = (b - a).cross(c - a);
        let face = if face.magnitude2() > 0.0 {
            face.normalize()
        } else {
            Vector3::unit_y()
        };

        for &(position, normal, texcoord) in &corners {
            idxes.push(verts.len() as u32);
            verts.push(ModelVertex::new(
                position,
                normal.unwrap_or_else(|| face.into()),
                texcoord,
            ));
        }
    }

    /// The mesh params and bytes of this model, one sub-mesh per part.
    pub fn mesh(&self) -> (MeshParams, MeshData) {
        let (index_format, iptr) = IndexFormat::encode(&self.indices);
        let params = MeshParams {
            hint: MeshHint::Immutable,
            layout: ModelVertex::layout(),
            index_format,
            primitive: MeshPrimitive::Triangles,
            num_verts: self.vertices.len(),
            num_idxes: self.indices.len(),
            sub_mesh_offsets: self.parts.iter().map(|v| v.offset).collect(),
        };

        let data = MeshData {
            vptr: ModelVertex::encode(&self.vertices),
            iptr,
        };

        (params, data)
    }
}

fn out_of_range(index: usize) -> Error {
    format_err!("Vertex attribute index {} is out of range.", index)
}

/// A part of a loaded model and the textures it samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPart {
    pub index: MeshIndex,
    pub diffuse: TextureHandle,
    pub specular: TextureHandle,
}

/// A model that lives on the GPU. A model that failed to load is empty and
/// draws nothing.
#[derive(Debug, Clone)]
pub struct Model {
    pub mesh: Option<MeshHandle>,
    pub parts: Vec<ModelPart>,
    /// The bounds in model space.
    pub bounds: Aabb3<f32>,
}

impl Model {
    pub fn empty() -> Self {
        Model {
            mesh: None,
            parts: Vec::new(),
            bounds: Aabb3::new(Point3::origin(), Point3::origin()),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_none() || self.parts.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const QUAD: &str = "
o plane
g water
v -1.0 0.0 -1.0
v 1.0 0.0 -1.0
v 1.0 0.0 1.0
v -1.0 2.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn triangulate() {
        let data = ModelData::parse(&mut QUAD.as_bytes()).unwrap();
        assert_eq!(data.vertices.len(), 6);
        assert_eq!(data.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(data.parts.len(), 1);
        assert_eq!(data.parts[0].offset, 0);
        assert_eq!(data.parts[0].diffuse, None);

        assert_eq!(data.bounds.min, Point3::new(-1.0, 0.0, -1.0));
        assert_eq!(data.bounds.max, Point3::new(1.0, 2.0, 1.0));

        assert_eq!(data.vertices[2].texcoord, [1.0, 1.0]);
        assert_eq!(data.vertices[5].texcoord, [0.0, 1.0]);

        let (params, mesh) = data.mesh();
        assert_eq!(params.index_format, IndexFormat::U16);
        assert!(params.validate(&mesh).is_ok());
    }

    #[test]
    fn missing_file() {
        assert!(ModelData::load("this/model/does/not/exist.obj").is_err());
    }
}
