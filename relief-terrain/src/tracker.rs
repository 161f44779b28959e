use relief_log as log;
use relief_math::Vec3;
use relief_types::{Error, Transform};

use crate::TerrainMesh;

/// Discrete point of the terrain grid
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GridPosition {
    /// Column, along X axis
    pub x: u32,
    /// Row, along Z axis
    pub z: u32,
}

impl GridPosition {
    /// Constructs new grid position
    pub fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

/// Step on the grid
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Towards greater Z
    North,
    /// Towards lower Z
    South,
    /// Towards greater X
    East,
    /// Towards lower X
    West,
}

/// Keeps a position on the grid within `[0, width - 1] x [0, height - 1]`
#[derive(Debug, Clone)]
pub struct GridPositionTracker {
    position: GridPosition,
    width: u32,
    height: u32,
}

impl GridPositionTracker {
    /// Constructs tracker at the origin of a `width x height` grid
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::Configuration(format!(
                "Grid must not be empty, {}x{} given",
                width, height
            )));
        }
        Ok(Self {
            position: GridPosition::default(),
            width,
            height,
        })
    }

    /// Constructs tracker over the terrain grid
    pub fn from_terrain(terrain: &TerrainMesh) -> Self {
        Self {
            position: GridPosition::default(),
            width: terrain.width(),
            height: terrain.height(),
        }
    }

    /// Places the tracker, clamping the position into the grid
    #[must_use]
    pub fn with_position(mut self, position: GridPosition) -> Self {
        self.position = self.clamp(position);
        self
    }

    /// Current position
    pub fn position(&self) -> GridPosition {
        self.position
    }

    /// Grid size as `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Makes one step, returns false if the grid edge stopped it
    pub fn step(&mut self, direction: Direction) -> bool {
        let GridPosition { x, z } = self.position;
        let target = match direction {
            Direction::North => GridPosition::new(x, z.saturating_add(1)),
            Direction::South => GridPosition::new(x, z.saturating_sub(1)),
            Direction::East => GridPosition::new(x.saturating_add(1), z),
            Direction::West => GridPosition::new(x.saturating_sub(1), z),
        };
        let clamped = self.clamp(target);
        let moved = clamped != self.position;
        if !moved {
            log::trace!("{:?} step from {:?} stopped by the edge", direction, self.position);
        }
        self.position = clamped;
        moved
    }

    /// Steps towards greater Z
    pub fn move_north(&mut self) -> bool {
        self.step(Direction::North)
    }

    /// Steps towards lower Z
    pub fn move_south(&mut self) -> bool {
        self.step(Direction::South)
    }

    /// Steps towards greater X
    pub fn move_east(&mut self) -> bool {
        self.step(Direction::East)
    }

    /// Steps towards lower X
    pub fn move_west(&mut self) -> bool {
        self.step(Direction::West)
    }

    /// Applies all directions received during a tick
    pub fn apply(&mut self, directions: &[Direction]) -> GridPosition {
        for direction in directions.iter() {
            self.step(*direction);
        }
        self.position
    }

    /// Returns world position of a marker resting on the grid vertex at the current position
    ///
    /// The vertex is looked up at `z * width + x`, moved into world space with the terrain
    /// transformation and lifted by the marker radius.
    pub fn world_position(
        &self,
        vertices: &[[f32; 3]],
        transform: &Transform,
        marker_radius: f32,
    ) -> Result<Vec3, Error> {
        if vertices.is_empty() {
            return Err(Error::InvalidState("terrain vertices are not built yet"));
        }
        let GridPosition { x, z } = self.position;
        if x >= self.width || z >= self.height {
            return Err(Error::InvalidState("grid position is outside of the grid"));
        }
        let index = (z * self.width + x) as usize;
        let vertex = vertices
            .get(index)
            .ok_or(Error::InvalidState("grid position is outside of the vertex buffer"))?;

        let mut position = transform.transform_point(Vec3::from(*vertex));
        position.y += marker_radius;
        Ok(position)
    }

    fn clamp(&self, position: GridPosition) -> GridPosition {
        GridPosition::new(
            position.x.min(self.width - 1),
            position.z.min(self.height - 1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, GridPosition, GridPositionTracker};
    use crate::{Heightmap, HeightmapMeshBuilder};
    use relief_math::{Deg, InnerSpace, Quat, Rotation3, Vec3};
    use relief_types::{Error, Transform};

    #[test]
    fn moves_are_clamped_to_inclusive_bounds() {
        let mut tracker = GridPositionTracker::new(4, 4).unwrap();
        let steps = [Direction::North; 5]
            .into_iter()
            .chain([Direction::East; 5])
            .collect::<Vec<_>>();
        assert_eq!(tracker.apply(&steps), GridPosition::new(3, 3));

        assert!(!tracker.move_north());
        assert!(!tracker.move_east());
        assert!(tracker.move_south());
        assert!(tracker.move_west());
        assert_eq!(tracker.position(), GridPosition::new(2, 2));
    }

    #[test]
    fn origin_edges_hold() {
        let mut tracker = GridPositionTracker::new(3, 5).unwrap();
        assert!(!tracker.move_south());
        assert!(!tracker.move_west());
        assert_eq!(tracker.position(), GridPosition::new(0, 0));
    }

    #[test]
    fn any_walk_stays_on_the_grid() {
        let directions = [
            Direction::North,
            Direction::East,
            Direction::East,
            Direction::South,
            Direction::West,
            Direction::North,
            Direction::North,
        ];
        let mut tracker = GridPositionTracker::new(2, 3).unwrap();
        for i in 0..200 {
            tracker.step(directions[(i * 7 + i / 3) % directions.len()]);
            let GridPosition { x, z } = tracker.position();
            assert!(x <= 1 && z <= 2);
        }
    }

    #[test]
    fn start_position_is_clamped() {
        let tracker = GridPositionTracker::new(4, 2)
            .unwrap()
            .with_position(GridPosition::new(10, 10));
        assert_eq!(tracker.position(), GridPosition::new(3, 1));
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(matches!(
            GridPositionTracker::new(0, 3),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn marker_rests_on_top_of_the_vertex() {
        let mut heightmap = Heightmap::new(4, 4).unwrap();
        heightmap.set(2, 1, 0.5);
        let terrain = HeightmapMeshBuilder::new(10.0).build(&heightmap).unwrap();
        let tracker = GridPositionTracker::from_terrain(&terrain)
            .with_position(GridPosition::new(2, 1));

        let transform = Transform::from_rotation(Quat::from_angle_y(Deg(-15.0)));
        let position = tracker
            .world_position(terrain.vertices(), &transform, 2.5)
            .unwrap();

        assert!((position.y - (5.0 + 2.5)).abs() < 1e-5);
        let expected = transform.transform_point(Vec3::new(2.0, 5.0, 1.0)) + Vec3::unit_y() * 2.5;
        assert!((position - expected).magnitude() < 1e-5);
    }

    #[test]
    fn translation_moves_the_marker() {
        let terrain = HeightmapMeshBuilder::default()
            .build(&Heightmap::new(2, 2).unwrap())
            .unwrap();
        let tracker = GridPositionTracker::from_terrain(&terrain);
        let transform = Transform::from_translation(Vec3::new(-1.0, 3.0, 4.0));
        let position = tracker
            .world_position(terrain.vertices(), &transform, 1.0)
            .unwrap();
        assert!((position - Vec3::new(-1.0, 4.0, 4.0)).magnitude() < 1e-6);
    }

    #[test]
    fn query_without_vertices_fails() {
        let tracker = GridPositionTracker::new(4, 4).unwrap();
        let result = tracker.world_position(&[], &Transform::default(), 1.0);
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn query_past_a_short_buffer_fails() {
        let tracker = GridPositionTracker::new(4, 4)
            .unwrap()
            .with_position(GridPosition::new(3, 3));
        let vertices = vec![[0.0, 0.0, 0.0]; 8];
        let result = tracker.world_position(&vertices, &Transform::default(), 1.0);
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }
}
