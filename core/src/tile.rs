use serde::{Deserialize, Serialize};

/// Matchable category of a tile.
pub type Kind = u8;

/// Content of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Kind(Kind),
}

impl Tile {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    pub const fn kind(self) -> Option<Kind> {
        match self {
            Self::Empty => None,
            Self::Kind(kind) => Some(kind),
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Option<Kind>> for Tile {
    fn from(kind: Option<Kind>) -> Self {
        kind.map_or(Self::Empty, Self::Kind)
    }
}
