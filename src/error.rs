//! Error types for trueno-plotspec operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synthesizing chart specifications.
#[derive(Error, Debug)]
pub enum Error {
    /// Co-dependent arrays handed to the sanitizer disagree in shape.
    ///
    /// This is a caller contract violation, not a recoverable condition.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Shape of the first array.
        expected: Vec<usize>,
        /// Shape of the offending array.
        found: Vec<usize>,
    },

    /// A layer cannot provide the requested attribute.
    #[error("Incompatible attribute: {0}")]
    IncompatibleAttribute(String),

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Vector anchor name not recognized.
    #[error("Unknown vector anchor: {0}")]
    UnknownVectorAnchor(String),

    /// 3D marker geometry not recognized.
    #[error("Invalid geometry: {0}")]
    UnknownGeometry(String),

    /// Colormap name not recognized.
    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    /// Image stretch name not recognized.
    #[error("Unknown stretch: {0}")]
    UnknownStretch(String),

    /// Line style name not recognized.
    #[error("Unknown line style: {0}")]
    UnknownLineStyle(String),

    /// Projection name not recognized.
    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Style configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization of a figure failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error only disqualifies a single layer from export.
    ///
    /// Layer-local failures are swallowed by the figure assembly functions;
    /// everything else is a contract violation and propagates.
    #[must_use]
    pub fn is_layer_local(&self) -> bool {
        matches!(self, Error::IncompatibleAttribute(_) | Error::EmptyData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ShapeMismatch {
            expected: vec![3],
            found: vec![4],
        };
        assert!(err.to_string().contains("Shape mismatch"));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_unknown_geometry_message() {
        let err = Error::UnknownGeometry("cube".to_string());
        assert_eq!(err.to_string(), "Invalid geometry: cube");
    }

    #[test]
    fn test_layer_local_classification() {
        assert!(Error::EmptyData.is_layer_local());
        assert!(Error::IncompatibleAttribute("z".into()).is_layer_local());
        assert!(!Error::UnknownVectorAnchor("base".into()).is_layer_local());
        assert!(!Error::ShapeMismatch { expected: vec![1], found: vec![2] }.is_layer_local());
    }
}
