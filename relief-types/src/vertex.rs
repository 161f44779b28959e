//! Vertex attributes

/// Format of a vertex attribute value
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Format {
    /// Single f32 value
    Float32,
    /// Two f32 values
    Float32x2,
    /// Three f32 values
    Float32x3,
    /// Four f32 values
    Float32x4,
}

impl Format {
    /// Size of the value in bytes
    pub fn size(&self) -> usize {
        match self {
            Format::Float32 => 4,
            Format::Float32x2 => 8,
            Format::Float32x3 => 12,
            Format::Float32x4 => 16,
        }
    }
}

/// Vertex attribute abstraction
pub trait Attribute: 'static {
    /// Raw value representation
    type Raw: bytemuck::Pod + Send + Sync;
    /// Attribute name
    fn name() -> &'static str;
    /// Raw value format
    fn format() -> Format;
}

/// Vertex position attribute
pub struct Position;

impl Attribute for Position {
    type Raw = [f32; 3];
    fn name() -> &'static str {
        "Position"
    }
    fn format() -> Format {
        Format::Float32x3
    }
}

/// Vertex normal attribute
pub struct Normal;

impl Attribute for Normal {
    type Raw = [f32; 3];
    fn name() -> &'static str {
        "Normal"
    }
    fn format() -> Format {
        Format::Float32x3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_matches_raw_size() {
        assert_eq!(Position::format().size(), std::mem::size_of::<[f32; 3]>());
        assert_eq!(Normal::format().size(), std::mem::size_of::<[f32; 3]>());
        assert_eq!(Format::Float32x2.size(), std::mem::size_of::<[f32; 2]>());
    }
}
