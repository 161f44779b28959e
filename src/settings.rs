use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use relief_camera::{Viewport, DEFAULT_ICON_SIZE};
use relief_terrain::{GridPosition, DEFAULT_HEIGHT_SCALE};
use relief_types::Error;
use serde::{Deserialize, Serialize};

/// Relief scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Multiplier of heightmap intensities
    pub height_scale: f32,
    /// Uniform scale of the unit diameter marker sphere
    pub marker_scale: f32,
    /// Marker color, normalized RGB
    pub marker_color: [f32; 3],
    /// Terrain color, normalized RGB
    pub terrain_color: [f32; 3],
    /// Terrain rotation around Y axis, degrees
    pub terrain_rotation: f32,
    /// Terrain translation
    pub terrain_position: [f32; 3],
    /// Initial marker position on the grid `[x, z]`
    pub start_position: [u32; 2],
    /// Project a reticle over the marker every tick
    pub reticle: bool,
    /// Reticle edge length, pixels
    pub reticle_size: f32,
    /// Image the host draws in the reticle rectangle
    pub reticle_image: Option<PathBuf>,
    /// Drawing surface size
    pub viewport: Viewport,
    /// Eye of the default camera, placed above the terrain if not set
    pub camera_position: Option<[f32; 3]>,
    /// Field of view of the default camera, radians
    pub fov: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            height_scale: DEFAULT_HEIGHT_SCALE,
            marker_scale: 5.0,
            marker_color: [1.0, 0.0, 0.0],
            terrain_color: [0.0, 1.0, 0.0],
            terrain_rotation: -15.0,
            terrain_position: [0.0, 0.0, 0.0],
            start_position: [0, 0],
            reticle: true,
            reticle_size: DEFAULT_ICON_SIZE,
            reticle_image: None,
            viewport: Viewport::default(),
            camera_position: None,
            fov: 1.1,
        }
    }
}

impl Settings {
    /// Reads settings from JSON, missing fields get default values
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|err| Error::Configuration(format!("Can't parse settings ({})", err)))
    }

    /// Reads settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            Error::Configuration(format!("Can't read settings '{}' ({})", path.display(), err))
        })?;
        Self::from_json(&json)
    }

    /// Serializes settings into pretty JSON
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|err| Error::Configuration(format!("Can't serialize settings ({})", err)))
    }

    /// Sets height scale
    pub fn height_scale(mut self, value: f32) -> Self {
        self.height_scale = value;
        self
    }

    /// Sets marker scale
    pub fn marker_scale(mut self, value: f32) -> Self {
        self.marker_scale = value;
        self
    }

    /// Sets terrain rotation around Y axis in degrees
    pub fn terrain_rotation(mut self, value: f32) -> Self {
        self.terrain_rotation = value;
        self
    }

    /// Sets terrain translation
    pub fn terrain_position(mut self, value: [f32; 3]) -> Self {
        self.terrain_position = value;
        self
    }

    /// Sets initial marker position on the grid
    pub fn start_position(mut self, value: GridPosition) -> Self {
        self.start_position = [value.x, value.z];
        self
    }

    /// Enables or disables the reticle
    pub fn reticle(mut self, value: bool) -> Self {
        self.reticle = value;
        self
    }

    /// Sets reticle size
    pub fn reticle_size(mut self, value: f32) -> Self {
        self.reticle_size = value;
        self
    }

    /// Sets reticle image path
    pub fn reticle_image(mut self, value: Option<PathBuf>) -> Self {
        self.reticle_image = value;
        self
    }

    /// Sets viewport
    pub fn viewport(mut self, value: Viewport) -> Self {
        self.viewport = value;
        self
    }

    /// Sets position of the default camera
    pub fn camera_position(mut self, value: Option<[f32; 3]>) -> Self {
        self.camera_position = value;
        self
    }

    /// Checks values that can't be fixed up at runtime
    pub fn validate(&self) -> Result<(), Error> {
        let positive = |name: &str, value: f32| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(Error::Configuration(format!(
                    "`{}` must be positive, {} given",
                    name, value
                )))
            }
        };
        positive("height_scale", self.height_scale)?;
        positive("marker_scale", self.marker_scale)?;
        positive("reticle_size", self.reticle_size)?;
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(Error::Configuration(format!(
                "`fov` must be in range 0..PI, {} given",
                self.fov
            )));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::Configuration(format!(
                "`viewport` must not be empty, {}x{} given",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}
