//! Procedural meshes: the light marker cube, the skybox, the water quad and
//! the screen-space preview quads.

use crate::assets::model::ModelVertex;
use crate::math::prelude::Vector2;
use crate::video::assets::prelude::*;

impl_vertex! {
    SkyboxVertex {
        position => [Position; 3],
    }
}

impl_vertex! {
    ScreenVertex {
        position => [Position; 2],
        texcoord => [Texcoord0; 2],
    }
}

/// The NDC rectangle of the reflection preview, `(min, max)`.
pub const REFLECTION_PREVIEW: ([f32; 2], [f32; 2]) = ([-0.9, 0.4], [-0.1, 1.0]);
/// The NDC rectangle of the refraction preview, `(min, max)`.
pub const REFRACTION_PREVIEW: ([f32; 2], [f32; 2]) = ([0.1, 0.4], [0.9, 1.0]);

fn build(
    layout: VertexLayout,
    num_verts: usize,
    vptr: Vec<u8>,
    idxes: &[u32],
) -> (MeshParams, MeshData) {
    let (index_format, iptr) = IndexFormat::encode(idxes);
    let params = MeshParams {
        hint: MeshHint::Immutable,
        layout,
        index_format,
        primitive: MeshPrimitive::Triangles,
        num_verts,
        num_idxes: idxes.len(),
        sub_mesh_offsets: Vec::new(),
    };

    (params, MeshData { vptr, iptr })
}

/// Two counter-clockwise triangles for each quad of four consecutive vertices.
fn quads(n: u32) -> Vec<u32> {
    let mut idxes = Vec::with_capacity(n as usize * 6);
    for i in 0..n {
        let base = i * 4;
        idxes.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    idxes
}

/// A unit cube centered at the origin, with normals and texcoords per face.
pub fn cube() -> (MeshParams, MeshData) {
    // Normal, then the two axes spanning each face.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let corners = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut verts = Vec::with_capacity(24);
    for &(n, u, v) in &faces {
        for uv in &corners {
            let (s, t) = (uv[0] - 0.5, uv[1] - 0.5);
            let position = [
                n[0] * 0.5 + u[0] * s + v[0] * t,
                n[1] * 0.5 + u[1] * s + v[1] * t,
                n[2] * 0.5 + u[2] * s + v[2] * t,
            ];
            verts.push(ModelVertex::new(position, n, *uv));
        }
    }

    build(ModelVertex::layout(), verts.len(), ModelVertex::encode(&verts), &quads(6))
}

/// A cube spanning `[-1, 1]`, seen from the inside.
pub fn skybox() -> (MeshParams, MeshData) {
    let mut verts = Vec::with_capacity(8);
    for i in 0..8 {
        let x = if i & 1 == 0 { -1.0 } else { 1.0 };
        let y = if i & 2 == 0 { -1.0 } else { 1.0 };
        let z = if i & 4 == 0 { -1.0 } else { 1.0 };
        verts.push(SkyboxVertex::new([x, y, z]));
    }

    let idxes = [
        0, 1, 3, 3, 2, 0, // -z
        4, 6, 7, 7, 5, 4, // +z
        0, 2, 6, 6, 4, 0, // -x
        1, 5, 7, 7, 3, 1, // +x
        2, 3, 7, 7, 6, 2, // +y
        0, 4, 5, 5, 1, 0, // -y
    ];

    build(SkyboxVertex::layout(), verts.len(), SkyboxVertex::encode(&verts), &idxes)
}

/// A quad spanning `[-1, 1]` in the XY plane, facing `+Z`.
pub fn water_quad() -> (MeshParams, MeshData) {
    let n = [0.0, 0.0, 1.0];
    let verts = [
        ModelVertex::new([-1.0, -1.0, 0.0], n, [0.0, 0.0]),
        ModelVertex::new([1.0, -1.0, 0.0], n, [1.0, 0.0]),
        ModelVertex::new([1.0, 1.0, 0.0], n, [1.0, 1.0]),
        ModelVertex::new([-1.0, 1.0, 0.0], n, [0.0, 1.0]),
    ];

    build(ModelVertex::layout(), verts.len(), ModelVertex::encode(&verts), &quads(1))
}

/// A quad given directly in normalized device coordinates.
pub fn screen_quad(min: Vector2<f32>, max: Vector2<f32>) -> (MeshParams, MeshData) {
    let verts = [
        ScreenVertex::new([min.x, min.y], [0.0, 0.0]),
        ScreenVertex::new([max.x, min.y], [1.0, 0.0]),
        ScreenVertex::new([max.x, max.y], [1.0, 1.0]),
        ScreenVertex::new([min.x, max.y], [0.0, 1.0]),
    ];

    build(ScreenVertex::layout(), verts.len(), ScreenVertex::encode(&verts), &quads(1))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid() {
        let (min, max) = REFLECTION_PREVIEW;
        let meshes = vec![
            cube(),
            skybox(),
            water_quad(),
            screen_quad(min.into(), max.into()),
        ];

        for (params, data) in meshes {
            assert!(params.validate(&data).is_ok());
            assert_eq!(params.num_idxes % 3, 0);
        }
    }

    #[test]
    fn cube_faces() {
        let (params, _) = cube();
        assert_eq!(params.num_verts, 24);
        assert_eq!(params.num_idxes, 36);
        assert_eq!(params.layout, ModelVertex::layout());
    }
}
