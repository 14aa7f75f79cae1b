use thiserror::Error;

/// Recoverable navigation failures. None of these halt the frame loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavError {
    /// A focus or tour request matched zero points
    #[error("nothing matches {0}")]
    EmptyInput(String),

    /// The platform refused exclusive pointer capture
    #[error("pointer capture denied: {0}")]
    ResourceAcquisition(String),

    /// Too few points to build a tour path
    #[error("need at least 3 points for a tour, have {points}")]
    DegenerateGeometry { points: usize },
}

pub type Result<T> = std::result::Result<T, NavError>;
