use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board dimension exceeds the coordinate range")]
    BoardTooLarge,
    #[error("Path must join at least two points with unit steps")]
    BrokenPath,
    #[error("Selection does not point at a tile on the board")]
    StaleSelection,
}

pub type Result<T> = core::result::Result<T, BoardError>;
