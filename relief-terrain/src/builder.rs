use relief_log as log;
use relief_math::Vec3;
use relief_mesh::Mesh;
use relief_types::{vertex, Error};

use crate::Heightmap;

/// Default multiplier of heightmap intensities
pub const DEFAULT_HEIGHT_SCALE: f32 = 30.0;

/// Builds triangulated terrain grid out of a heightmap
#[derive(Debug, Clone, Copy)]
pub struct HeightmapMeshBuilder {
    height_scale: f32,
}

impl HeightmapMeshBuilder {
    /// Constructs the builder with the height multiplier
    pub fn new(height_scale: f32) -> Self {
        Self { height_scale }
    }

    /// Returns the height multiplier
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Builds vertices and indices for the heightmap
    ///
    /// Vertex of the grid point `(x, z)` is stored at `z * width + x` and lifted by
    /// `intensity * height_scale`. Each cell emits two counter-clockwise triangles.
    pub fn build(&self, heightmap: &Heightmap) -> Result<TerrainMesh, Error> {
        if !(self.height_scale > 0.0 && self.height_scale.is_finite()) {
            return Err(Error::Configuration(format!(
                "Height scale must be positive, {} given",
                self.height_scale
            )));
        }

        let width = heightmap.width();
        let height = heightmap.height();
        if width < 2 || height < 2 {
            log::warn!("heightmap {}x{} can't form a single triangle", width, height);
            return Err(Error::Configuration(format!(
                "Heightmap must be at least 2x2 to form triangles, {}x{} given",
                width, height
            )));
        }

        let mut vertices = Vec::with_capacity((width * height) as usize);
        for z in 0..height {
            for x in 0..width {
                let y = heightmap.value(x, z) * self.height_scale;
                vertices.push([x as f32, y, z as f32]);
            }
        }

        let indices = Self::indices(width, height);

        log::info!(
            "terrain mesh {}x{}: {} vertices, {} triangles",
            width,
            height,
            vertices.len(),
            indices.len() / 3
        );

        Ok(TerrainMesh {
            width,
            height,
            vertices,
            indices,
        })
    }

    /// Returns number of indices for the grid
    pub fn indices_count(width: u32, height: u32) -> usize {
        6 * width.saturating_sub(1) as usize * height.saturating_sub(1) as usize
    }

    fn indices(width: u32, height: u32) -> Vec<u32> {
        let mut indices = Vec::with_capacity(Self::indices_count(width, height));
        for z in 0..height - 1 {
            let offset = z * width;
            for x in 0..width - 1 {
                /*
                  TL *---* TR
                     | \ |
                  BL *---* BR
                */
                let top_left = offset + x;
                let top_right = top_left + 1;
                let bottom_left = top_left + width;
                let bottom_right = bottom_left + 1;

                indices.extend([
                    top_left,
                    bottom_left,
                    bottom_right,
                    top_left,
                    bottom_right,
                    top_right,
                ]);
            }
        }
        indices
    }
}

impl Default for HeightmapMeshBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_SCALE)
    }
}

/// Terrain vertex and index buffers, immutable once built
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    width: u32,
    height: u32,
    vertices: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl TerrainMesh {
    /// Number of grid points along X axis
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of grid points along Z axis
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Vertices in `z * width + x` order
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Triangle indices, three per face
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns index of the grid point vertex
    pub fn vertex_index(&self, x: u32, z: u32) -> Option<usize> {
        if x < self.width && z < self.height {
            Some((z * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Returns local position of the grid point vertex
    pub fn vertex(&self, x: u32, z: u32) -> Option<Vec3> {
        self.vertex_index(x, z).map(|i| Vec3::from(self.vertices[i]))
    }

    /// Returns local height of the grid point
    pub fn height_at(&self, x: u32, z: u32) -> Option<f32> {
        self.vertex_index(x, z).map(|i| self.vertices[i][1])
    }

    /// Packs buffers into a mesh with recalculated normals
    pub fn to_mesh(&self, name: impl ToString) -> Result<Mesh, Error> {
        let mut mesh = Mesh::new(name);
        mesh.set_vertices::<vertex::Position>(self.vertices.clone())?;
        mesh.set_indices(self.indices.clone());
        mesh.auto_normals()?;
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::{HeightmapMeshBuilder, TerrainMesh};
    use crate::Heightmap;
    use relief_math::{InnerSpace, Vec3};
    use relief_types::{vertex, Error};

    fn build(width: u32, height: u32, scale: f32) -> TerrainMesh {
        let values = (0..width * height)
            .map(|i| (i % 7) as f32 / 7.0)
            .collect::<Vec<_>>();
        let heightmap = Heightmap::from_values(width, height, values).unwrap();
        HeightmapMeshBuilder::new(scale).build(&heightmap).unwrap()
    }

    #[test]
    fn vertex_height_is_scaled_intensity() {
        let values = (0..5 * 3).map(|i| (i % 7) as f32 / 7.0).collect::<Vec<_>>();
        let heightmap = Heightmap::from_values(5, 3, values).unwrap();
        let mesh = HeightmapMeshBuilder::new(12.5).build(&heightmap).unwrap();

        assert_eq!(mesh.vertices().len(), 15);
        for z in 0..3 {
            for x in 0..5 {
                let vertex = mesh.vertices()[(z * 5 + x) as usize];
                assert_eq!(vertex[0], x as f32);
                assert_eq!(vertex[2], z as f32);
                assert!((vertex[1] - heightmap.value(x, z) * 12.5).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn indices_cover_every_cell() {
        for (width, height) in [(2, 2), (4, 4), (7, 3), (3, 9)] {
            let mesh = build(width, height, 30.0);
            let expected = 6 * (width - 1) as usize * (height - 1) as usize;
            assert_eq!(mesh.indices().len(), expected);
            assert_eq!(
                HeightmapMeshBuilder::indices_count(width, height),
                expected
            );
            let vertices_count = (width * height) as usize;
            assert!(mesh.indices().iter().all(|i| (*i as usize) < vertices_count));
        }
    }

    #[test]
    fn first_cell_winding() {
        let mesh = build(3, 2, 1.0);
        // TL=0, TR=1, BL=3, BR=4
        assert_eq!(&mesh.indices()[0..6], &[0, 3, 4, 0, 4, 1]);
    }

    #[test]
    fn flat_faces_point_up() {
        let heightmap = Heightmap::new(4, 3).unwrap();
        let mesh = HeightmapMeshBuilder::default().build(&heightmap).unwrap();
        for face in mesh.indices().chunks(3) {
            let v0 = Vec3::from(mesh.vertices()[face[0] as usize]);
            let v1 = Vec3::from(mesh.vertices()[face[1] as usize]);
            let v2 = Vec3::from(mesh.vertices()[face[2] as usize]);
            let normal = (v1 - v0).cross(v2 - v0).normalize();
            assert!((normal - Vec3::unit_y()).magnitude() < 1e-6);
        }
    }

    #[test]
    fn degenerate_sizes_fail() {
        for (width, height) in [(1, 1), (1, 5), (5, 1)] {
            let heightmap = Heightmap::new(width, height).unwrap();
            let result = HeightmapMeshBuilder::default().build(&heightmap);
            assert!(matches!(result, Err(Error::Configuration(_))));
        }
    }

    #[test]
    fn height_scale_must_be_positive() {
        let heightmap = Heightmap::new(2, 2).unwrap();
        for scale in [0.0, -1.0, f32::NAN] {
            assert!(HeightmapMeshBuilder::new(scale).build(&heightmap).is_err());
        }
    }

    #[test]
    fn flat_map_scaled_by_thirty_stays_flat() {
        let heightmap = Heightmap::new(4, 4).unwrap();
        let mesh = HeightmapMeshBuilder::new(30.0).build(&heightmap).unwrap();
        assert!(mesh.vertices().iter().all(|v| v[1] == 0.0));
    }

    #[test]
    fn single_raised_pixel() {
        let mut heightmap = Heightmap::new(4, 4).unwrap();
        heightmap.set(2, 1, 1.0);
        let mesh = HeightmapMeshBuilder::new(10.0).build(&heightmap).unwrap();

        for (i, vertex) in mesh.vertices().iter().enumerate() {
            let expected = if i == 1 * 4 + 2 { 10.0 } else { 0.0 };
            assert_eq!(vertex[1], expected);
        }
        assert_eq!(mesh.height_at(2, 1), Some(10.0));
        assert_eq!(mesh.height_at(4, 1), None);
    }

    #[test]
    fn mesh_carries_upward_normals() {
        let heightmap = Heightmap::new(3, 3).unwrap();
        let terrain = HeightmapMeshBuilder::default().build(&heightmap).unwrap();
        let mesh = terrain.to_mesh("terrain").unwrap();
        assert_eq!(mesh.count_vertices(), 9);
        assert_eq!(mesh.count_faces(), 8);
        for normal in mesh.vertices::<vertex::Normal>().unwrap() {
            assert!((Vec3::from(*normal) - Vec3::unit_y()).magnitude() < 1e-6);
        }
    }
}
