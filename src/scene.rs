use std::path::{Path, PathBuf};

use relief_camera::{ScreenRect, Viewport, WorldToScreenProjector};
use relief_log as log;
use relief_math::{Deg, InnerSpace, Vec3};
use relief_mesh::Mesh;
use relief_terrain::{
    Direction, GridPosition, GridPositionTracker, Heightmap, HeightmapMeshBuilder, TerrainMesh,
};
use relief_types::{Camera, Color, Error, Transform};

use crate::{Marker, Settings};

/// Result of a single scene tick
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Tick number, starting from 1
    pub number: u64,
    /// Marker position on the grid after the input was applied
    pub grid: GridPosition,
    /// Marker center in world space
    pub marker_position: Vec3,
    /// Reticle rectangle in drawing coordinates, if the reticle is enabled
    pub reticle: Option<ScreenRect>,
}

/// Terrain, marker and projection state driven by the host frame loop
pub struct Scene {
    terrain: TerrainMesh,
    terrain_mesh: Mesh,
    terrain_transform: Transform,
    terrain_color: Color,
    tracker: GridPositionTracker,
    marker: Marker,
    projector: Option<WorldToScreenProjector>,
    reticle_image: Option<PathBuf>,
    ticks: u64,
}

impl Scene {
    /// Builds the terrain and places the marker
    ///
    /// Without a camera the scene looks at the terrain from the settings' camera position or
    /// from above the terrain.
    pub fn init(
        settings: &Settings,
        heightmap: &Heightmap,
        camera: Option<Camera>,
    ) -> Result<Self, Error> {
        settings.validate()?;

        let terrain = HeightmapMeshBuilder::new(settings.height_scale).build(heightmap)?;
        let terrain_mesh = terrain.to_mesh("terrain")?;
        let terrain_transform = Transform::builder()
            .at(Vec3::from(settings.terrain_position))
            .heading(Deg(settings.terrain_rotation))
            .build();

        let [x, z] = settings.start_position;
        let tracker =
            GridPositionTracker::from_terrain(&terrain).with_position(GridPosition::new(x, z));

        let marker = Marker::new(
            settings.marker_scale,
            Color::from_normalized(settings.marker_color),
        )?;

        let projector = if settings.reticle {
            let camera = match camera {
                Some(camera) => camera,
                None => default_camera(settings, &terrain, &terrain_transform)?,
            };
            Some(
                WorldToScreenProjector::new(settings.viewport)
                    .with_camera(camera)
                    .with_icon_size(settings.reticle_size),
            )
        } else {
            None
        };

        log::info!(
            "scene ready: terrain {}x{}, marker {:?} at {:?}",
            terrain.width(),
            terrain.height(),
            marker.id(),
            tracker.position()
        );

        let mut scene = Self {
            terrain,
            terrain_mesh,
            terrain_transform,
            terrain_color: Color::from_normalized(settings.terrain_color),
            tracker,
            marker,
            projector,
            reticle_image: settings.reticle_image.clone(),
            ticks: 0,
        };
        scene.place_marker()?;
        Ok(scene)
    }

    /// Applies the tick input, then places the marker and its reticle
    pub fn update(&mut self, input: &[Direction]) -> Result<Tick, Error> {
        self.ticks += 1;
        let grid = self.tracker.apply(input);
        let marker_position = self.place_marker()?;
        let reticle = match self.projector.as_ref() {
            Some(projector) => Some(projector.project(marker_position)?),
            None => None,
        };

        log::debug!(
            "tick {}: grid {:?}, marker {:?}, reticle {:?}",
            self.ticks,
            grid,
            marker_position,
            reticle
        );

        Ok(Tick {
            number: self.ticks,
            grid,
            marker_position,
            reticle,
        })
    }

    /// Releases the scene
    pub fn teardown(self) {
        log::info!(
            "scene teardown after {} ticks, marker {:?} released",
            self.ticks,
            self.marker.id()
        );
    }

    /// Replaces the camera used for the reticle, `None` makes projection fail
    pub fn set_camera(&mut self, camera: Option<Camera>) {
        if let Some(projector) = self.projector.as_mut() {
            projector.set_camera(camera);
        }
    }

    /// Replaces the viewport used for the reticle
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if let Some(projector) = self.projector.as_mut() {
            projector.set_viewport(viewport);
        }
    }

    /// Terrain buffers
    pub fn terrain(&self) -> &TerrainMesh {
        &self.terrain
    }

    /// Terrain mesh with normals, ready for the hosting renderer
    pub fn terrain_mesh(&self) -> &Mesh {
        &self.terrain_mesh
    }

    /// Local-to-world transformation of the terrain
    pub fn terrain_transform(&self) -> &Transform {
        &self.terrain_transform
    }

    /// Terrain color
    pub fn terrain_color(&self) -> Color {
        self.terrain_color
    }

    /// The marker
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Image to draw in the reticle rectangle, if any
    pub fn reticle_image(&self) -> Option<&Path> {
        self.reticle_image.as_deref()
    }

    /// Current grid position of the marker
    pub fn grid_position(&self) -> GridPosition {
        self.tracker.position()
    }

    fn place_marker(&mut self) -> Result<Vec3, Error> {
        let position = self.tracker.world_position(
            self.terrain.vertices(),
            &self.terrain_transform,
            self.marker.radius(),
        )?;
        self.marker.set_position(position);
        Ok(position)
    }
}

fn default_camera(
    settings: &Settings,
    terrain: &TerrainMesh,
    transform: &Transform,
) -> Result<Camera, Error> {
    let width = (terrain.width() - 1) as f32;
    let depth = (terrain.height() - 1) as f32;
    let target = transform.transform_point(Vec3::new(width / 2.0, 0.0, depth / 2.0));
    let eye = match settings.camera_position {
        Some(position) => Vec3::from(position),
        None => {
            let extent = width.max(depth);
            target + Vec3::new(0.0, extent + settings.height_scale, -extent)
        }
    };
    let direction = target - eye;
    let distance = direction.magnitude();
    if !(distance > f32::EPSILON && distance.is_finite()) {
        return Err(Error::Configuration(format!(
            "Camera at {:?} can't look at the terrain center {:?}",
            eye, target
        )));
    }
    let at = Camera::at(eye.x, eye.y, eye.z);
    // Y up is undefined for a camera looking straight down or up
    let view = if direction.cross(Vec3::unit_y()).magnitude() <= distance * 1e-4 {
        log::debug!("camera at {:?} looks along Y, using -Z as up", eye);
        at.target_up(target, -Vec3::unit_z())
    } else {
        at.target(target)
    };
    let proj = Camera::lens(relief_math::Rad(settings.fov), 0.1..10000.0)
        .proj(settings.viewport.width, settings.viewport.height);
    Ok(Camera::new(proj, view))
}
