//! Error types for plotview

use thiserror::Error;

/// Main error type for plotview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Graphics context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Camera has not been shot yet")]
    CameraNotShot,

    #[error("Projection matrix is not invertible")]
    SingularProjection,

    #[error("Overlay paint failed: {0}")]
    Overlay(String),
}

/// Result type alias for plotview operations
pub type Result<T> = std::result::Result<T, Error>;
