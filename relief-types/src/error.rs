/// Errors of terrain construction and per-tick queries
///
/// Moving past the edge of the grid is not an error, positions are clamped instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or invalid input supplied at initialization
    Configuration(String),
    /// Operation requested before its data exists, or against a missing collaborator
    InvalidState(&'static str),
}

impl Error {
    /// Shortcut for `Error::Configuration`
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Configuration(message) => write!(f, "Invalid configuration: {}", message),
            Error::InvalidState(message) => write!(f, "Invalid state: {}", message),
        }
    }
}
