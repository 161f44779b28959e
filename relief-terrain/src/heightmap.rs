use noise::{NoiseFn, Perlin};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use relief_log as log;
use relief_types::Error;

/// Grid of intensities in range from 0 to 1, stored row by row (`z * width + x`)
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl Heightmap {
    /// Constructs a flat heightmap
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        let pixels_count = Self::validate_size(width, height)?;
        Ok(Self {
            values: vec![0.0; pixels_count],
            width,
            height,
        })
    }

    /// Constructs heightmap from row-major intensities
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> Result<Self, Error> {
        let pixels_count = Self::validate_size(width, height)?;
        if values.len() != pixels_count {
            return Err(Error::Configuration(format!(
                "Heightmap {}x{} expects {} values, {} given",
                width,
                height,
                pixels_count,
                values.len()
            )));
        }
        if let Some(value) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(Error::Configuration(format!(
                "Heightmap intensity {} is out of range 0..1",
                value
            )));
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Constructs heightmap from raw little-endian pixels of any number of bytes
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, Error> {
        let pixels_count = Self::validate_size(width, height)?;
        let bytes_per_pixel = bytes.len() / pixels_count;
        if bytes_per_pixel == 0 || bytes_per_pixel > 4 || bytes.len() % pixels_count != 0 {
            return Err(Error::Configuration(format!(
                "Heightmap {}x{} can't be read from {} bytes",
                width,
                height,
                bytes.len()
            )));
        }

        let max_value = (0..bytes_per_pixel).fold(0u64, |max, _| (max << 8) | 0xFF);
        let values = bytes
            .chunks_exact(bytes_per_pixel)
            .map(|pixel| {
                let value = pixel
                    .iter()
                    .rev()
                    .fold(0u64, |value, byte| (value << 8) | *byte as u64);
                (value as f64 / max_value as f64) as f32
            })
            .collect::<Vec<_>>();

        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Constructs heightmap from the red channel of a decoded grayscale image
    ///
    /// Texture rows go from the bottom up, so the last row of the image becomes `z = 0`.
    pub fn from_image(image: &image::DynamicImage) -> Result<Self, Error> {
        let pixels = image.to_rgba32f();
        let (width, height) = pixels.dimensions();
        let pixels_count = Self::validate_size(width, height)?;

        let mut values = Vec::with_capacity(pixels_count);
        for z in 0..height {
            let row = height - 1 - z;
            for x in 0..width {
                values.push(pixels.get_pixel(x, row)[0].clamp(0.0, 1.0));
            }
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Constructs heightmap from fractal Perlin noise normalized to 0..1
    pub fn from_noise(width: u32, height: u32, config: &NoiseConfig) -> Result<Self, Error> {
        let pixels_count = Self::validate_size(width, height)?;
        if !(config.scale > 0.0 && config.scale.is_finite()) {
            return Err(Error::Configuration(format!(
                "Noise scale must be positive, {} given",
                config.scale
            )));
        }

        let noise = Perlin::new(config.seed);
        let mut pseudo_rng = SmallRng::seed_from_u64(config.seed as u64);
        let octaves_offsets = (0..config.octaves)
            .map(|_| {
                [
                    randomize_offset(config.offset[0], &mut pseudo_rng),
                    randomize_offset(config.offset[1], &mut pseudo_rng),
                ]
            })
            .collect::<Vec<_>>();

        let half_width = (width / 2) as f32;
        let half_height = (height / 2) as f32;
        let mut values = Vec::with_capacity(pixels_count);
        for z in 0..height {
            for x in 0..width {
                let mut value = 0.0;
                let mut amplitude = 1.0;
                let mut frequency = 1.0;
                for offset in octaves_offsets.iter() {
                    let xf = (x as f32 - half_width) / config.scale * frequency + offset[0];
                    let zf = (z as f32 - half_height) / config.scale * frequency + offset[1];
                    value += noise.get([xf as f64, zf as f64]) as f32 * amplitude;
                    amplitude *= config.persistence;
                    frequency *= config.lacunarity;
                }
                values.push(value);
            }
        }

        let (min, max) = values
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), v| (min.min(*v), max.max(*v)));
        let delta = max - min;
        for value in values.iter_mut() {
            *value = if delta > 0.0 {
                ((*value - min) / delta).clamp(0.0, 1.0)
            } else {
                0.0
            };
        }

        log::debug!("noise heightmap {}x{} (seed {})", width, height, config.seed);
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Returns number of values along X axis
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns number of values along Z axis
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns intensity at the point or `None` outside of the map
    pub fn get(&self, x: u32, z: u32) -> Option<f32> {
        if x < self.width && z < self.height {
            Some(self.values[(z * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Returns intensity at the point
    ///
    /// Panics if the point is outside of the map
    pub fn value(&self, x: u32, z: u32) -> f32 {
        self.values[(z * self.width + x) as usize]
    }

    /// Sets intensity at the point, points outside of the map are ignored
    pub fn set(&mut self, x: u32, z: u32, value: f32) {
        if x < self.width && z < self.height {
            self.values[(z * self.width + x) as usize] = value.clamp(0.0, 1.0);
        }
    }

    /// Returns number of values in the map of the size
    fn validate_size(width: u32, height: u32) -> Result<usize, Error> {
        if width == 0 || height == 0 {
            return Err(Error::Configuration(format!(
                "Heightmap must not be empty, {}x{} given",
                width, height
            )));
        }
        width
            .checked_mul(height)
            .map(|count| count as usize)
            .ok_or_else(|| {
                Error::Configuration(format!("Heightmap {}x{} is too large", width, height))
            })
    }
}

fn randomize_offset(value: f32, pseudo_rng: &mut SmallRng) -> f32 {
    value + (pseudo_rng.next_u32() & 0xFFFF) as f32 - 32768.0
}

/// Noise configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Number of octaves
    pub octaves: u32,
    /// Noise persistence
    pub persistence: f32,
    /// Noise Lacunarity
    pub lacunarity: f32,
    /// Noise scale
    pub scale: f32,
    /// Offset of the noise sampling
    pub offset: [f32; 2],
    /// Noise seed
    pub seed: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 25.0,
            offset: [0.0, 0.0],
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Heightmap, NoiseConfig};
    use relief_types::Error;

    #[test]
    fn empty_heightmap_is_rejected() {
        assert!(matches!(
            Heightmap::new(0, 4),
            Err(Error::Configuration(_))
        ));
        assert!(Heightmap::from_values(3, 0, vec![]).is_err());
    }

    #[test]
    fn oversized_heightmap_is_rejected() {
        assert!(matches!(
            Heightmap::new(65536, 65536),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            Heightmap::from_bytes(65536, 65536, &[0; 4]),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            Heightmap::from_values(u32::MAX, 2, vec![0.0; 4]),
            Err(Error::Configuration(_))
        ));
        assert!(Heightmap::from_noise(65536, 65536, &NoiseConfig::default()).is_err());
    }

    #[test]
    fn values_are_validated() {
        assert!(Heightmap::from_values(2, 2, vec![0.0; 3]).is_err());
        assert!(Heightmap::from_values(2, 2, vec![0.0, 0.5, 1.0, 1.5]).is_err());
        assert!(Heightmap::from_values(2, 2, vec![0.0, f32::NAN, 1.0, 0.5]).is_err());
        let map = Heightmap::from_values(2, 2, vec![0.0, 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(map.value(1, 0), 0.25);
        assert_eq!(map.value(0, 1), 0.5);
    }

    #[test]
    fn get_is_bounded() {
        let mut map = Heightmap::new(4, 3).unwrap();
        map.set(3, 2, 2.0);
        map.set(4, 0, 1.0);
        assert_eq!(map.get(3, 2), Some(1.0));
        assert_eq!(map.get(4, 0), None);
        assert_eq!(map.get(0, 3), None);
    }

    #[test]
    fn bytes_are_little_endian() {
        let map = Heightmap::from_bytes(2, 1, &[0x00, 0x00, 0xFF, 0xFF]).unwrap();
        assert_eq!(map.value(0, 0), 0.0);
        assert_eq!(map.value(1, 0), 1.0);

        let map = Heightmap::from_bytes(1, 1, &[0xFF, 0x00]).unwrap();
        assert!((map.value(0, 0) - 255.0 / 65535.0).abs() < 1e-6);

        assert!(Heightmap::from_bytes(2, 2, &[0; 3]).is_err());
    }

    #[test]
    fn image_rows_are_read_bottom_up() {
        let mut pixels = image::GrayImage::new(3, 2);
        // top row of the picture
        pixels.put_pixel(1, 0, image::Luma([255]));
        let map = Heightmap::from_image(&image::DynamicImage::ImageLuma8(pixels)).unwrap();

        assert_eq!((map.width(), map.height()), (3, 2));
        assert_eq!(map.value(1, 1), 1.0);
        assert_eq!(map.value(1, 0), 0.0);
    }

    #[test]
    fn noise_is_normalized_and_seeded() {
        let config = NoiseConfig {
            seed: 7,
            ..Default::default()
        };
        let a = Heightmap::from_noise(32, 16, &config).unwrap();
        let b = Heightmap::from_noise(32, 16, &config).unwrap();
        assert_eq!(a, b);

        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for z in 0..16 {
            for x in 0..32 {
                let value = a.value(x, z);
                min = min.min(value);
                max = max.max(value);
            }
        }
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn noise_scale_must_be_finite() {
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = NoiseConfig {
                scale,
                ..Default::default()
            };
            assert!(matches!(
                Heightmap::from_noise(4, 4, &config),
                Err(Error::Configuration(_))
            ));
        }
    }

    #[test]
    fn noise_config_reads_partial_json() {
        let config: NoiseConfig = serde_json::from_str(r#"{ "seed": 3 }"#).unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.octaves, NoiseConfig::default().octaves);
    }
}
