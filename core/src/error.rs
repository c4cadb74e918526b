use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Board side length must be at least 1")]
    InvalidSize,
    #[error("Too many bombs, must be fewer than the number of cells")]
    TooManyBombs,
}

pub type Result<T> = core::result::Result<T, GameError>;
