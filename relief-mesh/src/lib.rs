//! Triangle mesh container handed over to a hosting renderer
#![warn(missing_docs)]

mod sphere;

use relief_math::{transform_point, InnerSpace, Mat4, Vec3};
use relief_types::{vertex, Error};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// 3D Model Mesh
pub struct Mesh {
    name: String,
    vertices: HashMap<TypeId, AttributeValues>,
    vertices_count: usize,
    indices: Option<Vec<u32>>,
}

struct AttributeValues {
    values: Box<dyn Any + Send + Sync>,
    bytes: Vec<u8>,
}

impl Mesh {
    /// Constructs new Mesh instance
    pub fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            vertices: HashMap::new(),
            vertices_count: 0,
            indices: None,
        }
    }

    /// Returns name of the mesh
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets vertices attributes by Type
    ///
    /// All attributes of the mesh must have the same number of values.
    pub fn set_vertices<A: vertex::Attribute>(&mut self, values: Vec<A::Raw>) -> Result<(), Error> {
        let vertices_count = values.len();

        if self.vertices_count != vertices_count {
            let others = self
                .vertices
                .keys()
                .any(|type_id| *type_id != TypeId::of::<A>());
            if others {
                return Err(Error::Configuration(format!(
                    "Mesh '{}' has {} vertices, but attribute '{}' was given with {} values",
                    self.name,
                    self.vertices_count,
                    A::name(),
                    vertices_count
                )));
            }
            self.vertices_count = vertices_count;
        }

        let bytes = bytemuck::cast_slice::<A::Raw, u8>(&values).to_vec();
        self.vertices.insert(
            TypeId::of::<A>(),
            AttributeValues {
                values: Box::new(values),
                bytes,
            },
        );
        Ok(())
    }

    /// Returns slice of vertices attributes if exists
    pub fn vertices<A: vertex::Attribute>(&self) -> Option<&[A::Raw]> {
        self.vertices
            .get(&TypeId::of::<A>())
            .and_then(|values| values.values.downcast_ref::<Vec<A::Raw>>())
            .map(|values| values.as_slice())
    }

    /// Sets mesh indices
    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = Some(indices);
    }

    /// Returns mesh indices
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Returns indices as bytes for buffering
    pub fn indices_bytes(&self) -> Option<&[u8]> {
        self.indices
            .as_ref()
            .map(|i| bytemuck::cast_slice(i.as_slice()))
    }

    /// Returns number of vertices
    pub fn count_vertices(&self) -> usize {
        self.vertices_count
    }

    /// Returns number of faces (polygons) in the mesh
    pub fn count_faces(&self) -> usize {
        self.indices
            .as_ref()
            .map(|i| i.len())
            .unwrap_or(self.vertices_count)
            / 3
    }

    /// Returns vector of vertex buffer data according to layout defined by attributes types
    pub fn buffer<T: VertexBufferLayout>(&self) -> Option<Vec<u8>> {
        self.buffer_from_layout(&T::layout())
    }

    /// Returns vector of vertex buffer data according to layout
    ///
    /// Attributes are interleaved per vertex in the layout order.
    pub fn buffer_from_layout(&self, layout: &[(TypeId, usize)]) -> Option<Vec<u8>> {
        let attributes = layout
            .iter()
            .map(|(type_id, size)| self.vertices.get(type_id).map(|values| (values, *size)))
            .collect::<Option<Vec<_>>>()?;

        let stride: usize = attributes.iter().map(|(_, size)| size).sum();
        let mut buffer = Vec::with_capacity(stride * self.vertices_count);
        for i in 0..self.vertices_count {
            for (values, size) in attributes.iter() {
                let offset = i * size;
                buffer.extend_from_slice(&values.bytes[offset..offset + size]);
            }
        }
        Some(buffer)
    }

    /// Calculates smooth vertex normals from the faces of the Mesh
    ///
    /// Every vertex gets the normalized sum of normals of the faces it belongs to, face
    /// normals follow counter-clockwise winding.
    pub fn calculate_normals(&self) -> Option<Vec<[f32; 3]>> {
        self.vertices::<vertex::Position>().map(|positions| {
            let mut normals = vec![Vec3::new(0.0, 0.0, 0.0); self.vertices_count];
            for face in 0..self.count_faces() {
                let [i0, i1, i2] = self.face(face);
                let v0 = Vec3::from(positions[i0]);
                let v1 = Vec3::from(positions[i1]);
                let v2 = Vec3::from(positions[i2]);
                let normal = (v1 - v0).cross(v2 - v0);
                normals[i0] += normal;
                normals[i1] += normal;
                normals[i2] += normal;
            }
            normals
                .into_iter()
                .map(|normal| {
                    if normal.magnitude2() > 0.0 {
                        normal.normalize().into()
                    } else {
                        [0.0, 1.0, 0.0]
                    }
                })
                .collect()
        })
    }

    /// Calculates normals for the mesh and stores them
    pub fn auto_normals(&mut self) -> Result<(), Error> {
        if self.vertices.contains_key(&TypeId::of::<vertex::Normal>()) {
            return Ok(());
        }
        match self.calculate_normals() {
            Some(normals) => self.set_vertices::<vertex::Normal>(normals),
            None => Ok(()),
        }
    }

    /// Returns axis aligned bounding box of the mesh positions after the transformation
    pub fn bounds(&self, matrix: &Mat4) -> Option<(Vec3, Vec3)> {
        let positions = self.vertices::<vertex::Position>()?;
        let mut points = positions
            .iter()
            .map(|position| transform_point(matrix, Vec3::from(*position)).0);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), point| {
            (
                Vec3::new(min.x.min(point.x), min.y.min(point.y), min.z.min(point.z)),
                Vec3::new(max.x.max(point.x), max.y.max(point.y), max.z.max(point.z)),
            )
        }))
    }

    fn face(&self, face: usize) -> [usize; 3] {
        let i0 = face * 3;
        match self.indices.as_ref() {
            Some(indices) => [
                indices[i0] as usize,
                indices[i0 + 1] as usize,
                indices[i0 + 2] as usize,
            ],
            None => [i0, i0 + 1, i0 + 2],
        }
    }
}

/// Defines interleaved vertex buffer layout from attributes types
pub trait VertexBufferLayout {
    /// Returns attributes type ids with their sizes
    fn layout() -> Vec<(TypeId, usize)>;
}

macro_rules! impl_vertex_buffer_layout {
    ($($attr: ident),+) => {
        impl<$($attr: vertex::Attribute),+> VertexBufferLayout for ($($attr,)+) {
            fn layout() -> Vec<(TypeId, usize)> {
                vec![$((TypeId::of::<$attr>(), $attr::format().size())),+]
            }
        }
    };
}

impl_vertex_buffer_layout!(A);
impl_vertex_buffer_layout!(A, B);
impl_vertex_buffer_layout!(A, B, C);
impl_vertex_buffer_layout!(A, B, C, D);
