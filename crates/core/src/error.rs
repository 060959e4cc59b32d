use thiserror::Error;

/// Errors shared across the engine crates.
#[derive(Error, Debug)]
pub enum OthelloError {
    #[error("Invalid board description: {0}")]
    InvalidBoard(String),

    #[error("Value {0} is outside range [-1, 1]")]
    InvalidValue(f32),
}

/// Convenience Result type for engine operations
pub type Result<T> = std::result::Result<T, OthelloError>;
