//! Relief terrain: heightmaps, triangulated grids and grid positions on top of them
#![warn(missing_docs)]

mod builder;
mod heightmap;
mod tracker;

pub use builder::{HeightmapMeshBuilder, TerrainMesh, DEFAULT_HEIGHT_SCALE};
pub use heightmap::{Heightmap, NoiseConfig};
pub use tracker::{Direction, GridPosition, GridPositionTracker};
