use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("non-finite field value {value} at node {node}")]
    NonFiniteValue { node: usize, value: f64 },
    #[error("invalid grid dimensions {nelx}x{nely}")]
    InvalidDimensions { nelx: usize, nely: usize },
    #[error("invalid grid spacing {0}")]
    InvalidSpacing(f64),
    #[error("node {node} out of range for a grid of {len} nodes")]
    NodeOutOfRange { node: usize, len: usize },
}
