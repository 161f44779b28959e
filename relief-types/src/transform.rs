//! Placement of scene objects in the world
use relief_math::{transform_point, Mat4, Quat, Rad, Rotation3, Vec3};

/// Chained placement of an object: scale first, then heading around Y, then position
#[derive(Default)]
pub struct Builder {
    transform: Transform,
}

impl Builder {
    /// Places the object origin at the world point
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.translate = position;
        self
    }

    /// Turns the object around the world Y axis
    #[must_use]
    pub fn heading(mut self, angle: impl Into<Rad<f32>>) -> Self {
        self.transform.rotate = Quat::from_angle_y(angle.into());
        self
    }

    /// Scales the object along all axes
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.transform.scale = Vec3::new(factor, factor, factor);
        self
    }

    /// Returns the placement
    pub fn build(self) -> Transform {
        self.transform
    }
}

/// Local-to-world transformation of an object
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    /// Translation vector
    pub translate: Vec3,
    /// Rotation quaternion
    pub rotate: Quat,
    /// Scale vector
    pub scale: Vec3,
}

impl Transform {
    /// Constructs new transformation with values that won't change the model
    pub fn new() -> Self {
        Self {
            translate: Vec3::new(0.0, 0.0, 0.0),
            rotate: Quat::from_angle_y(Rad(0.0)),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Constructs transformation builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns transformation matrix
    pub fn matrix(&self) -> Mat4 {
        let t = Mat4::from_translation(self.translate);
        let r = Mat4::from(self.rotate);
        let s = Mat4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }

    /// Transforms a point from local space into world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        transform_point(&self.matrix(), point).0
    }

    /// Constructs new transformation from the translation vector
    pub fn from_translation(translate: Vec3) -> Self {
        Self {
            translate,
            ..Default::default()
        }
    }

    /// Constructs new transformation from the rotation quaternion
    pub fn from_rotation(rotate: Quat) -> Self {
        Self {
            rotate,
            ..Default::default()
        }
    }

    /// Constructs new transformation from the scale factor
    pub fn from_scale_factor(scale: f32) -> Self {
        Self {
            scale: Vec3::new(scale, scale, scale),
            ..Default::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
