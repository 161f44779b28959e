//! Relief wrapper around cgmath
//!
//! Type aliases and helpers shared by terrain, mesh and camera crates.

#![warn(missing_docs)]

pub use cgmath::num_traits::clamp;
pub use cgmath::ortho;
pub use cgmath::perspective;
pub use cgmath::Deg;
pub use cgmath::EuclideanSpace;
pub use cgmath::InnerSpace;
pub use cgmath::MetricSpace;
pub use cgmath::Rad;
pub use cgmath::Rotation3;
pub use cgmath::SquareMatrix;
pub use cgmath::VectorSpace;

/// 3x3 Matrix of f32
pub type Mat3 = cgmath::Matrix3<f32>;
/// 4x4 Matrix of f32
pub type Mat4 = cgmath::Matrix4<f32>;
/// 2 dimentional point of f32
pub type Point2 = cgmath::Point2<f32>;
/// 3 dimentional point of f32
pub type Point3 = cgmath::Point3<f32>;
/// 4 dimentional vector of f32
pub type Vec4 = cgmath::Vector4<f32>;
/// 3 dimentional vector of f32
pub type Vec3 = cgmath::Vector3<f32>;
/// 2 dimentional vector of f32
pub type Vec2 = cgmath::Vector2<f32>;
/// 2 dimentional vector of u32
pub type Vec2u = cgmath::Vector2<u32>;
/// Quaternion of f32
pub type Quat = cgmath::Quaternion<f32>;

/// Transforms a point by the matrix, applying perspective division
///
/// Returns the homogeneous `w` component alongside the divided point, so callers can tell
/// points behind the eye from points in front of it.
pub fn transform_point(matrix: &Mat4, point: Vec3) -> (Vec3, f32) {
    let clip = *matrix * point.extend(1.0);
    (clip.truncate() / clip.w, clip.w)
}
