//! Color of scene objects

/// RGBA color with normalized channels
#[derive(Default, Copy, Clone, Debug, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque color from RGB channels
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from an RGB array, channels are clamped to 0..1
    pub fn from_normalized(rgb: [f32; 3]) -> Self {
        let [r, g, b] = rgb.map(|channel| channel.clamp(0.0, 1.0));
        Self::rgb(r, g, b)
    }

    /// Red color (r: 1.0, g: 0.0, b: 0.0)
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
}
