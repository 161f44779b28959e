//! Relief types crate provides values shared by terrain, mesh and camera crates.

#![warn(missing_docs)]

mod color;
mod error;

pub mod camera;
pub mod id;
pub mod transform;
pub mod vertex;

pub use camera::Camera;
pub use color::Color;
pub use error::Error;
pub use id::Id;
pub use transform::Transform;
