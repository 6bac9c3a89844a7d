#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use pathing::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod engine;
mod error;
mod pathing;
mod tile;
mod types;

/// Turn budget used by the classic rules: a connector may bend at most twice.
pub const DEFAULT_MAX_TURNS: u8 = 2;

/// Upper bound accepted by [`MatchRules::new`].
pub const MAX_TURNS_LIMIT: u8 = 8;

/// What tapping the already pending tile again does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReselectPolicy {
    /// The tile stays selected, the tap is ignored.
    Keep,
    /// The selection is dropped.
    Deselect,
}

impl Default for ReselectPolicy {
    fn default() -> Self {
        Self::Keep
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub max_turns: u8,
    pub reselect: ReselectPolicy,
}

impl MatchRules {
    pub const fn new_unchecked(max_turns: u8, reselect: ReselectPolicy) -> Self {
        Self {
            max_turns,
            reselect,
        }
    }

    pub fn new(max_turns: u8, reselect: ReselectPolicy) -> Self {
        if max_turns > MAX_TURNS_LIMIT {
            log::warn!(
                "Turn budget clamped, requested {} but the limit is {}",
                max_turns,
                MAX_TURNS_LIMIT
            );
        }
        Self::new_unchecked(max_turns.min(MAX_TURNS_LIMIT), reselect)
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_MAX_TURNS, ReselectPolicy::default())
    }
}

/// Initial tile assignment of a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutTiles")]
pub struct TileLayout {
    tiles: Array2<Tile>,
}

#[derive(Deserialize)]
struct LayoutTiles {
    tiles: Array2<Tile>,
}

impl TryFrom<LayoutTiles> for TileLayout {
    type Error = BoardError;

    fn try_from(LayoutTiles { tiles }: LayoutTiles) -> Result<Self> {
        Self::from_tiles(tiles)
    }
}

impl TileLayout {
    pub fn from_tiles(tiles: Array2<Tile>) -> Result<Self> {
        let (rows, cols) = tiles.dim();
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        if rows > Coord::MAX.into() || cols > Coord::MAX.into() {
            return Err(BoardError::BoardTooLarge);
        }
        Ok(Self { tiles })
    }

    /// Builds a layout from `rows * cols` kinds in row-major order, `None` being an empty cell.
    pub fn from_kinds(size: Coord2, kinds: &[Option<Kind>]) -> Result<Self> {
        let tiles: Vec<Tile> = kinds.iter().copied().map(Tile::from).collect();
        let tiles = Array2::from_shape_vec(size.to_nd_index(), tiles)
            .map_err(|_| BoardError::InvalidBoardShape)?;
        Self::from_tiles(tiles)
    }

    pub fn from_rows<R: AsRef<[Option<Kind>]>>(rows: &[R]) -> Result<Self> {
        let row_count = Coord::try_from(rows.len()).map_err(|_| BoardError::BoardTooLarge)?;
        let col_count = rows.first().map_or(0, |row| row.as_ref().len());
        let col_count = Coord::try_from(col_count).map_err(|_| BoardError::BoardTooLarge)?;

        let mut kinds = Vec::with_capacity(mult(row_count, col_count).into());
        for row in rows {
            let row = row.as_ref();
            if row.len() != usize::from(col_count) {
                return Err(BoardError::InvalidBoardShape);
            }
            kinds.extend_from_slice(row);
        }

        Self::from_kinds((row_count, col_count), &kinds)
    }

    pub fn empty(size: Coord2) -> Result<Self> {
        Self::from_tiles(Array2::default(size.to_nd_index()))
    }

    pub fn with_tile(mut self, coords: Coord2, tile: Tile) -> Result<Self> {
        let coords = self.validate_coords(coords)?;
        self[coords] = tile;
        Ok(self)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(BoardError::InvalidCoords)
        }
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn size(&self) -> Coord2 {
        self.tiles.grid_size()
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn occupied_count(&self) -> CellCount {
        let count = self.tiles.iter().filter(|tile| tile.is_occupied()).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    pub fn get(&self, coords: Coord2) -> Option<Tile> {
        self.contains(coords).then(|| self[coords])
    }

    /// Occupied cells in row-major order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Coord2, Kind)> + '_ {
        self.tiles.indexed_iter().filter_map(|((row, col), tile)| {
            let kind = tile.kind()?;
            Some(((row as Coord, col as Coord), kind))
        })
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }
}

impl Index<Coord2> for TileLayout {
    type Output = Tile;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.tiles[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for TileLayout {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.tiles[(row as usize, col as usize)]
    }
}

/// A cleared (or clearable) pair together with the connector that joins it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub first: Coord2,
    pub second: Coord2,
    pub kind: Kind,
    pub path: Path,
}

/// Outcome of tapping a tile
#[derive(Clone, Debug, PartialEq)]
pub enum ActivateOutcome {
    NoChange,
    Selected(Coord2),
    Deselected(Coord2),
    Matched(Match),
}

impl ActivateOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(&self) -> bool {
        use ActivateOutcome::*;
        match self {
            NoChange => false,
            Selected(_) => true,
            Deselected(_) => true,
            Matched(_) => true,
        }
    }

    pub fn matched(&self) -> Option<&Match> {
        match self {
            Self::Matched(found) => Some(found),
            _ => None,
        }
    }
}
