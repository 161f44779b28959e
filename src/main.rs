use image::GenericImageView;
use relief::log::{error, info, LevelFilter};
use relief::terrain::{Direction, Heightmap, NoiseConfig};
use relief::{Error, Log, Scene, Settings};

const NOISE_MAP_SIZE: u32 = 64;

fn main() {
    Log::default()
        .level("relief", LevelFilter::Debug)
        .level("*", LevelFilter::Warn)
        .subscribe();

    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

/// Usage: relief [settings.json] [heightmap.png]
fn run() -> Result<(), Error> {
    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let heightmap = match args.next() {
        Some(path) => {
            let image = image::open(&path).map_err(|err| {
                Error::Configuration(format!("Can't load heightmap '{}' ({})", path, err))
            })?;
            Heightmap::from_image(&image)?
        }
        None => Heightmap::from_noise(NOISE_MAP_SIZE, NOISE_MAP_SIZE, &NoiseConfig::default())?,
    };

    let mut scene = Scene::init(&settings, &heightmap, None)?;

    if let Some(path) = scene.reticle_image() {
        let reticle = image::open(path).map_err(|err| {
            Error::Configuration(format!(
                "Can't load reticle image '{}' ({})",
                path.display(),
                err
            ))
        })?;
        let (width, height) = reticle.dimensions();
        info!("reticle image '{}' {}x{}", path.display(), width, height);
    }

    let script = [
        vec![Direction::North; 3],
        vec![Direction::East; 4],
        vec![Direction::South, Direction::West],
        vec![Direction::South; 10],
        vec![Direction::West; 10],
    ];
    for input in script.iter() {
        let tick = scene.update(input)?;
        info!(
            "tick {}: grid ({}, {}) -> marker ({:.2}, {:.2}, {:.2})",
            tick.number,
            tick.grid.x,
            tick.grid.z,
            tick.marker_position.x,
            tick.marker_position.y,
            tick.marker_position.z
        );
        if let Some(reticle) = tick.reticle {
            info!(
                "tick {}: reticle at ({:.1}, {:.1}) {}x{}",
                tick.number, reticle.x, reticle.y, reticle.width, reticle.height
            );
        }
    }

    scene.teardown();
    Ok(())
}
