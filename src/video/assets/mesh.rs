//! Immutable vertex and index data.

use crate::video::assets::shader::Attribute;
use crate::video::errors::{Error, Result};
use crate::video::MAX_VERTEX_ATTRIBUTES;

impl_handle!(MeshHandle);

/// The parameters of mesh object.
#[derive(Debug, Clone)]
pub struct MeshParams {
    /// Usage hints.
    pub hint: MeshHint,
    /// How a single vertex structure looks like.
    pub layout: VertexLayout,
    /// Index format
    pub index_format: IndexFormat,
    /// How the input vertex data is used to assemble primitives.
    pub primitive: MeshPrimitive,
    /// The number of vertices in this mesh.
    pub num_verts: usize,
    /// The number of indices in this mesh.
    pub num_idxes: usize,
    /// The start indices of sub-meshes.
    pub sub_mesh_offsets: Vec<usize>,
}

impl Default for MeshParams {
    fn default() -> Self {
        MeshParams {
            hint: MeshHint::Immutable,
            layout: VertexLayout::default(),
            index_format: IndexFormat::U16,
            primitive: MeshPrimitive::Triangles,
            num_verts: 0,
            num_idxes: 0,
            sub_mesh_offsets: Vec::new(),
        }
    }
}

impl MeshParams {
    #[inline]
    pub fn vertex_buffer_len(&self) -> usize {
        self.num_verts * self.layout.stride() as usize
    }

    #[inline]
    pub fn index_buffer_len(&self) -> usize {
        self.num_idxes * self.index_format.stride()
    }

    pub fn validate(&self, data: &MeshData) -> Result<()> {
        if data.vptr.len() != self.vertex_buffer_len() {
            return Err(Error::OutOfBounds);
        }

        if data.iptr.len() != self.index_buffer_len() {
            return Err(Error::OutOfBounds);
        }

        if self.sub_mesh_offsets.iter().any(|&v| v > self.num_idxes) {
            return Err(Error::OutOfBounds);
        }

        Ok(())
    }

    /// Returns the `(from, len)` index range of `index`.
    pub fn range(&self, index: MeshIndex) -> Result<(usize, usize)> {
        match index {
            MeshIndex::All => Ok((0, self.num_idxes)),
            MeshIndex::SubMesh(i) => {
                let from = *self.sub_mesh_offsets.get(i).ok_or(Error::OutOfBounds)?;
                let to = self
                    .sub_mesh_offsets
                    .get(i + 1)
                    .cloned()
                    .unwrap_or(self.num_idxes);
                Ok((from, to - from))
            }
        }
    }
}

/// The vertex and index bytes of a mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vptr: Vec<u8>,
    pub iptr: Vec<u8>,
}

/// Which part of a mesh to draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeshIndex {
    All,
    SubMesh(usize),
}

/// Hint abouts the intended update strategy of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MeshHint {
    /// The resource is initialized with data and cannot be changed later, this
    /// is the most common and most efficient usage.
    Immutable,
    /// The resource is updated by the CPU in each frame.
    Stream,
}

/// Defines how the input vertex data is used to assemble primitives.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MeshPrimitive {
    Lines,
    Triangles,
}

impl MeshPrimitive {
    pub fn assemble(self, indices: u32) -> u32 {
        match self {
            MeshPrimitive::Lines => indices / 2,
            MeshPrimitive::Triangles => indices / 3,
        }
    }
}

/// Vertex indices can be either 16- or 32-bit.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    pub fn stride(self) -> usize {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }

    pub fn encode(values: &[u32]) -> (IndexFormat, Vec<u8>) {
        if values.iter().all(|&v| v <= u32::from(u16::max_value())) {
            let bytes = values
                .iter()
                .flat_map(|&v| (v as u16).to_le_bytes().to_vec())
                .collect();
            (IndexFormat::U16, bytes)
        } else {
            let bytes = values.iter().flat_map(|&v| v.to_le_bytes().to_vec()).collect();
            (IndexFormat::U32, bytes)
        }
    }
}

/// The data type in the vertex component.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VertexFormat {
    UByte,
    Float,
}

impl VertexFormat {
    pub fn size(self) -> u8 {
        match self {
            VertexFormat::UByte => 1,
            VertexFormat::Float => 4,
        }
    }
}

/// The details of a vertex attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VertexAttribute {
    /// The name of this description.
    pub name: Attribute,
    /// The data type of each component of this element.
    pub format: VertexFormat,
    /// The number of components per generic vertex element.
    pub size: u8,
    /// Whether fixed-point data values should be normalized.
    pub normalized: bool,
}

impl Default for VertexAttribute {
    fn default() -> Self {
        VertexAttribute {
            name: Attribute::Position,
            format: VertexFormat::Float,
            size: 0,
            normalized: false,
        }
    }
}

/// `VertexLayout` defines how a single vertex structure looks like. A vertex
/// layout is a collection of vertex components, and each vertex component
/// consists of a vertex attribute and the vertex format.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct VertexLayout {
    stride: u8,
    len: u8,
    offset: [u8; MAX_VERTEX_ATTRIBUTES],
    elements: [VertexAttribute; MAX_VERTEX_ATTRIBUTES],
}

impl VertexLayout {
    #[inline]
    pub fn build() -> VertexLayoutBuilder {
        VertexLayoutBuilder::new()
    }

    /// Stride of single vertex structure.
    #[inline]
    pub fn stride(&self) -> u8 {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> u8 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Relative element offset from the layout.
    pub fn offset(&self, name: Attribute) -> Option<u8> {
        (0..self.len as usize)
            .find(|&i| self.elements[i].name == name)
            .map(|i| self.offset[i])
    }

    /// Returns named `Attribute` from the layout.
    pub fn element(&self, name: Attribute) -> Option<VertexAttribute> {
        (0..self.len as usize)
            .find(|&i| self.elements[i].name == name)
            .map(|i| self.elements[i])
    }
}

/// Helper structure to build a vertex layout.
#[derive(Default)]
pub struct VertexLayoutBuilder(VertexLayout);

impl VertexLayoutBuilder {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(
        &mut self,
        attribute: Attribute,
        format: VertexFormat,
        size: u8,
        normalized: bool,
    ) -> &mut Self {
        assert!(size > 0 && size <= 4);

        let desc = VertexAttribute {
            name: attribute,
            format,
            size,
            normalized,
        };

        for i in 0..self.0.len as usize {
            if self.0.elements[i].name == attribute {
                self.0.elements[i] = desc;
                return self;
            }
        }

        assert!((self.0.len as usize) < MAX_VERTEX_ATTRIBUTES);
        self.0.elements[self.0.len as usize] = desc;
        self.0.len += 1;
        self
    }

    /// Appends an attribute at an explicit offset, used for `#[repr(C)]` structs.
    pub fn with_offset(
        &mut self,
        attribute: Attribute,
        format: VertexFormat,
        size: u8,
        offset: u8,
    ) -> &mut Self {
        self.with(attribute, format, size, false);
        if let Some(i) = (0..self.0.len as usize).find(|&i| self.0.elements[i].name == attribute)
        {
            self.0.offset[i] = offset;
        }
        self
    }

    /// Packs the attributes tightly in declaration order.
    pub fn finish(&mut self) -> VertexLayout {
        self.0.stride = 0;
        for i in 0..self.0.len as usize {
            let len = self.0.elements[i].size * self.0.elements[i].format.size();
            self.0.offset[i] = self.0.stride;
            self.0.stride += len;
        }
        self.0
    }

    /// Keeps the explicit offsets and uses the given stride.
    pub fn finish_with_stride(&mut self, stride: u8) -> VertexLayout {
        self.0.stride = stride;
        self.0
    }
}

/// Declares a `#[repr(C)]` vertex struct along with its `VertexLayout`.
#[macro_export]
macro_rules! impl_vertex {
    ($name: ident { $($field: ident => [$attribute: tt; $size: tt],)* }) => (
        #[repr(C)]
        #[derive(Debug, Copy, Clone, PartialEq)]
        pub struct $name {
            $(pub $field: [f32; $size], )*
        }

        impl $name {
            pub fn new($($field: [f32; $size], ) *) -> Self {
                $name {
                    $($field,)*
                }
            }

            pub fn layout() -> $crate::video::assets::mesh::VertexLayout {
                let mut builder = $crate::video::assets::mesh::VertexLayoutBuilder::new();
                let probe = ::std::mem::MaybeUninit::<$name>::uninit();
                let base = probe.as_ptr();

                $(
                    let offset = unsafe {
                        (::std::ptr::addr_of!((*base).$field) as usize) - (base as usize)
                    };

                    builder.with_offset(
                        $crate::video::assets::shader::Attribute::$attribute,
                        $crate::video::assets::mesh::VertexFormat::Float,
                        $size,
                        offset as u8);
                ) *

                builder.finish_with_stride(::std::mem::size_of::<$name>() as u8)
            }

            pub fn encode(values: &[Self]) -> Vec<u8> {
                let mut bytes = Vec::with_capacity(values.len() * ::std::mem::size_of::<Self>());
                for v in values {
                    $(
                        for c in v.$field.iter() {
                            bytes.extend_from_slice(&c.to_le_bytes());
                        }
                    )*
                }
                bytes
            }
        }
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let layout = VertexLayout::build()
            .with(Attribute::Position, VertexFormat::Float, 3, false)
            .with(Attribute::Texcoord0, VertexFormat::Float, 2, false)
            .finish();

        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.offset(Attribute::Position), Some(0));
        assert_eq!(layout.offset(Attribute::Texcoord0), Some(12));
        assert_eq!(layout.offset(Attribute::Normal), None);
        assert_eq!(layout.element(Attribute::Position).map(|v| v.size), Some(3));
    }

    impl_vertex! {
        Vertex {
            position => [Position; 3],
            normal => [Normal; 3],
            texcoord => [Texcoord0; 2],
        }
    }

    #[test]
    fn repr_c_layout() {
        let layout = Vertex::layout();
        assert_eq!(layout.stride() as usize, ::std::mem::size_of::<Vertex>());
        assert_eq!(layout.offset(Attribute::Normal), Some(12));
        assert_eq!(layout.offset(Attribute::Texcoord0), Some(24));

        let bytes = Vertex::encode(&[Vertex::new([1.0; 3], [0.0; 3], [0.5; 2])]);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn sub_mesh_range() {
        let mut params = MeshParams::default();
        params.num_idxes = 12;
        params.sub_mesh_offsets = vec![0, 6];
        assert_eq!(params.range(MeshIndex::All).unwrap(), (0, 12));
        assert_eq!(params.range(MeshIndex::SubMesh(1)).unwrap(), (6, 6));
        assert!(params.range(MeshIndex::SubMesh(2)).is_err());

        let (format, bytes) = IndexFormat::encode(&[0, 1, 2]);
        assert_eq!(format, IndexFormat::U16);
        assert_eq!(bytes, vec![0, 0, 1, 0, 2, 0]);
    }
}
