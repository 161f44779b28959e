use super::Mesh;
use relief_types::{vertex, Error};

impl Mesh {
    /// Constructs a sphere mesh of unit diameter centered at the origin
    ///
    /// `u` is the number of points across the equator of the sphere
    ///
    /// `v` is the number of points from pole to pole
    pub fn sphere(name: impl ToString, u: usize, v: usize) -> Result<Self, Error> {
        if u < 2 || v < 2 {
            return Err(Error::Configuration(format!(
                "Sphere needs at least 2x2 subdivisions, {}x{} given",
                u, v
            )));
        }
        Mesh::generate(name, genmesh::generators::SphereUv::new(u, v), 0.5)
    }

    fn generate<G, P>(name: impl ToString, generator: G, radius: f32) -> Result<Self, Error>
    where
        P: genmesh::EmitTriangles<Vertex = usize>,
        G: genmesh::generators::SharedVertex<genmesh::Vertex>
            + genmesh::generators::IndexedPolygon<P>,
    {
        use genmesh::Triangulate;

        let mut positions = Vec::with_capacity(generator.shared_vertex_count());
        let mut normals = Vec::with_capacity(generator.shared_vertex_count());
        for vertex in generator.shared_vertex_iter() {
            positions.push([
                vertex.pos.x * radius,
                vertex.pos.y * radius,
                vertex.pos.z * radius,
            ]);
            normals.push([vertex.normal.x, vertex.normal.y, vertex.normal.z]);
        }

        let indices = generator
            .indexed_polygon_iter()
            .triangulate()
            .flat_map(|triangle| [triangle.x as u32, triangle.y as u32, triangle.z as u32])
            .collect::<Vec<_>>();

        let mut mesh = Mesh::new(name);
        mesh.set_vertices::<vertex::Position>(positions)?;
        mesh.set_vertices::<vertex::Normal>(normals)?;
        mesh.set_indices(indices);
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::Mesh;
    use relief_math::Mat4;

    #[test]
    fn sphere_has_unit_diameter() {
        let sphere = Mesh::sphere("marker", 16, 16).unwrap();
        let (min, max) = sphere.bounds(&Mat4::from_scale(1.0)).unwrap();
        let size = max - min;
        assert!((size.x - 1.0).abs() < 1e-3);
        assert!((size.y - 1.0).abs() < 1e-3);
        assert!((min + max).x.abs() < 1e-3);
        assert!(sphere.count_faces() > 0);
        assert!(sphere
            .indices()
            .unwrap()
            .iter()
            .all(|i| (*i as usize) < sphere.count_vertices()));
    }

    #[test]
    fn sphere_scales_with_transformation() {
        let sphere = Mesh::sphere("marker", 16, 16).unwrap();
        let (min, max) = sphere.bounds(&Mat4::from_scale(5.0)).unwrap();
        assert!(((max - min).x - 5.0).abs() < 1e-2);
    }

    #[test]
    fn degenerate_sphere_is_rejected() {
        assert!(Mesh::sphere("marker", 1, 8).is_err());
    }
}
