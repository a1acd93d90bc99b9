use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegridError {
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Unsupported domain: {0}")]
    UnsupportedDomain(String),
}

pub type Result<T> = std::result::Result<T, RegridError>;
