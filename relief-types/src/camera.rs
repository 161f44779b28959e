//! Camera module

use std::ops::Range;

use relief_math::{perspective, Mat4, Point3, Rad, Vec3};

/// Camera object and constructor
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Projection matrix
    pub proj: Mat4,
    /// View matrix
    pub view: Mat4,
}

impl Camera {
    /// Constructs new instance of Camera
    pub fn new(proj: Mat4, view: Mat4) -> Self {
        Self { proj, view }
    }

    /// Returns view matrix constructor
    pub fn at(x: f32, y: f32, z: f32) -> View {
        View::new(x, y, z)
    }

    /// Returns projection matrix constructor
    pub fn lens(fov: impl Into<Rad<f32>>, plane: Range<f32>) -> Lens {
        Lens::new(fov, plane)
    }

    /// Returns combined world-to-clip matrix
    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view
    }
}

/// Projection matrix constructor
#[derive(Debug, Clone)]
pub struct Lens {
    /// Field of View (rad)
    pub fov: Rad<f32>,
    /// Near..Far plane
    pub plane: Range<f32>,
}

impl Lens {
    /// Returns new instance of projection matrix constructor
    pub fn new(fov: impl Into<Rad<f32>>, plane: Range<f32>) -> Self {
        Self {
            fov: fov.into(),
            plane,
        }
    }

    /// Returns projection matrix for the surface
    pub fn proj(&self, surface_width: u32, surface_height: u32) -> Mat4 {
        let aspect_ratio = surface_width as f32 / surface_height as f32;
        perspective(self.fov, aspect_ratio, self.plane.start, self.plane.end)
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov: Rad(1.1),
            plane: 0.0625..524288.06,
        }
    }
}

/// View matrix constructor
pub struct View {
    /// Camera position
    pub point: Vec3,
}

impl View {
    /// Returns new view matrix constructor
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            point: Vec3::new(x, y, z),
        }
    }

    /// Return view matrix looking at the target with Y axis up
    pub fn target(&self, target: Vec3) -> Mat4 {
        self.target_up(target, Vec3::unit_y())
    }

    /// Return view matrix made from target and up vector
    pub fn target_up(&self, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(
            Point3::new(self.point.x, self.point.y, self.point.z),
            Point3::new(target.x, target.y, target.z),
            up,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use relief_math::{transform_point, InnerSpace, Vec3};

    #[test]
    fn target_lands_in_the_middle_of_clip_space() {
        let lens = Camera::lens(relief_math::Rad(1.1), 0.1..1000.0);
        let view = Camera::at(0.0, 50.0, -40.0).target(Vec3::new(0.0, 0.0, 0.0));
        let camera = Camera::new(lens.proj(800, 600), view);

        let (ndc, w) = transform_point(&camera.view_proj(), Vec3::new(0.0, 0.0, 0.0));
        assert!(w > 0.0);
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let view = Camera::at(1.0, 2.0, 3.0).target(Vec3::new(1.0, 2.0, 0.0));
        let (eye, _) = transform_point(&view, Vec3::new(1.0, 2.0, 3.0));
        assert!(eye.magnitude() < 1e-5);
    }
}
