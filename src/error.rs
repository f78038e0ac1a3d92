use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("table capacity must be positive")]
    InvalidCapacity,
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("a cell already exists at {x}-{y}")]
    LocationOccupied { x: u32, y: u32 },
    #[error("hash table is full")]
    TableFull,
    #[error("unexpected character {0:?} in pattern")]
    UnexpectedCharacter(char),
}
