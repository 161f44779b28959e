//! Relief builds terrain meshes out of heightmaps, keeps a marker on top of the terrain
//! and projects it into screen space for an overlay reticle.

mod marker;
mod scene;
mod settings;

pub use marker::Marker;
pub use scene::{Scene, Tick};
pub use settings::Settings;

// Relief crates
pub use relief_camera as camera;
pub use relief_log as log;
pub use relief_math as math;
pub use relief_mesh as mesh;
pub use relief_terrain as terrain;
pub use relief_types as types;

pub use relief_log::Log;
pub use relief_types::Error;
