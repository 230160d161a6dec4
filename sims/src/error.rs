use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("kernel size must be odd and non-zero, got {0}")]
    KernelSize(usize),

    #[error("kernel of size {size} needs {expected} weights, got {actual}")]
    KernelWeights {
        size: usize,
        expected: usize,
        actual: usize,
    },

    #[error("pixel buffer of {width}x{height} needs {expected} bytes, got {actual}")]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
}
