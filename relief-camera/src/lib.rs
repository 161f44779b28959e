//! Projection of world points into overlay drawing coordinates
#![warn(missing_docs)]

use relief_log as log;
use relief_math::{transform_point, Point2, Vec3};
use relief_types::{Camera, Error};
use serde::{Deserialize, Serialize};

/// Edge length of the reticle icon, pixels
pub const DEFAULT_ICON_SIZE: f32 = 50.0;

/// Pixel size of the drawing surface
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Constructs new viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Rectangle in drawing coordinates: origin at the top-left corner, Y goes down
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl ScreenRect {
    /// Returns center point of the rectangle
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Converts world points into overlay drawing coordinates
pub struct WorldToScreenProjector {
    camera: Option<Camera>,
    viewport: Viewport,
    icon_size: f32,
}

impl WorldToScreenProjector {
    /// Constructs projector for the viewport, camera has to be assigned before projecting
    pub fn new(viewport: Viewport) -> Self {
        Self {
            camera: None,
            viewport,
            icon_size: DEFAULT_ICON_SIZE,
        }
    }

    /// Sets the camera
    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Sets edge length of the icon drawn over projected points
    #[must_use]
    pub fn with_icon_size(mut self, icon_size: f32) -> Self {
        self.icon_size = icon_size;
        self
    }

    /// Replaces the camera, for example after it moved
    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    /// Replaces the viewport, for example after the window was resized
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Returns the viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Projects the world point into screen pixels, Y goes up from the bottom edge
    ///
    /// Points lying in the camera plane give non-finite coordinates.
    pub fn world_to_screen(&self, point: Vec3) -> Result<Point2, Error> {
        let camera = self
            .camera
            .as_ref()
            .ok_or(Error::InvalidState("camera is not assigned to the projector"))?;
        let (ndc, w) = transform_point(&camera.view_proj(), point);
        if w <= 0.0 {
            log::debug!("projected point {:?} is behind the camera", point);
        }
        Ok(Point2::new(
            (ndc.x + 1.0) / 2.0 * self.viewport.width as f32,
            (ndc.y + 1.0) / 2.0 * self.viewport.height as f32,
        ))
    }

    /// Projects the world point into drawing coordinates, Y goes down from the top edge
    pub fn world_to_draw(&self, point: Vec3) -> Result<Point2, Error> {
        let screen = self.world_to_screen(point)?;
        Ok(Point2::new(screen.x, self.viewport.height as f32 - screen.y))
    }

    /// Returns rectangle of the icon centered over the projected world point
    pub fn project(&self, point: Vec3) -> Result<ScreenRect, Error> {
        let draw = self.world_to_draw(point)?;
        let half = self.icon_size / 2.0;
        Ok(ScreenRect {
            x: draw.x - half,
            y: draw.y - half,
            width: self.icon_size,
            height: self.icon_size,
        })
    }
}
