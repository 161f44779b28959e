use relief_math::Vec3;
use relief_mesh::Mesh;
use relief_types::{Color, Error, Id, Transform};

/// Sphere subdivisions of the marker mesh
const SPHERE_SEGMENTS: usize = 24;

/// Movable sphere showing the current grid position
pub struct Marker {
    id: Id<Marker>,
    mesh: Mesh,
    transform: Transform,
    color: Color,
}

impl Marker {
    /// Constructs a unit diameter sphere marker scaled by the factor
    pub fn new(scale: f32, color: Color) -> Result<Self, Error> {
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(Error::Configuration(format!(
                "Marker scale must be positive, {} given",
                scale
            )));
        }
        Ok(Self {
            id: Id::random(),
            mesh: Mesh::sphere("marker", SPHERE_SEGMENTS, SPHERE_SEGMENTS)?,
            transform: Transform::from_scale_factor(scale),
            color,
        })
    }

    /// Handle of the marker for the hosting renderer
    pub fn id(&self) -> Id<Marker> {
        self.id
    }

    /// Marker mesh in local space
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Marker placement in the world
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Marker color
    pub fn color(&self) -> Color {
        self.color
    }

    /// World position of the marker center
    pub fn position(&self) -> Vec3 {
        self.transform.translate
    }

    /// Moves the marker center
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.translate = position;
    }

    /// Half of the world bounding box width
    pub fn radius(&self) -> f32 {
        self.mesh
            .bounds(&self.transform.matrix())
            .map(|(min, max)| (max.x - min.x) / 2.0)
            .unwrap_or(0.0)
    }
}
