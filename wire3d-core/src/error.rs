/// Error types for Wire3D
use thiserror::Error;

/// Main error type for Wire3D operations
///
/// Every variant is a contract violation raised at the call that caused it.
/// Nothing here is retried or clamped internally.
#[derive(Error, Debug)]
pub enum Error {
    /// A numeric argument outside its valid domain (projection parameters)
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A matrix or vector built from a slice of the wrong length
    #[error("wrong element count: expected {expected}, got {actual}")]
    WrongElementCount { expected: usize, actual: usize },

    /// Axis or row index outside the valid range
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Inversion of a matrix whose determinant is below machine epsilon
    #[error("singular matrix (determinant {determinant:e})")]
    SingularMatrix { determinant: f64 },

    /// Normalization of a zero-length vector, or a look-at with parallel up
    #[error("degenerate vector: length is zero")]
    DegenerateVector,

    /// A space tag that is not world, view or screen
    #[error("unsupported space: {0}")]
    UnsupportedSpace(String),

    /// Malformed STL input
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Wire3D operations
pub type Result<T> = std::result::Result<T, Error>;
