use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Signed axis used on the bordered grid, where `-1`, `rows` and `cols` address the virtual border.
pub type BorderCoord = i16;

/// Two-dimensional bordered coordinates `(row, col)`.
pub type BorderCoord2 = (BorderCoord, BorderCoord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub trait ToBorderCoords {
    fn to_border_coords(self) -> BorderCoord2;
}

impl ToBorderCoords for Coord2 {
    fn to_border_coords(self) -> BorderCoord2 {
        (self.0.into(), self.1.into())
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts a bordered position back to board coordinates when it lies on the board proper.
pub fn board_coords((row, col): BorderCoord2, (rows, cols): Coord2) -> Option<Coord2> {
    let row = Coord::try_from(row).ok()?;
    let col = Coord::try_from(col).ok()?;
    (row < rows && col < cols).then_some((row, col))
}

pub trait GridSizeExt {
    fn grid_size(&self) -> Coord2;
}

impl<T> GridSizeExt for Array2<T> {
    fn grid_size(&self) -> Coord2 {
        let (rows, cols) = self.dim();
        (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        )
    }
}

/// Heading of a straight path segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn delta(self) -> (BorderCoord, BorderCoord) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// The two headings reachable with a single 90 degree turn.
    pub const fn perpendicular(self) -> [Direction; 2] {
        if self.is_vertical() {
            [Self::Left, Self::Right]
        } else {
            [Self::Up, Self::Down]
        }
    }

    /// Heading of a unit step between two orthogonally adjacent points.
    pub fn between(from: BorderCoord2, to: BorderCoord2) -> Option<Direction> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.step(from) == to)
    }

    pub const fn step(self, (row, col): BorderCoord2) -> BorderCoord2 {
        let (d_row, d_col) = self.delta();
        (row + d_row, col + d_col)
    }

    /// Steps `pos` one cell, returning a value only while it stays inside the bordered grid
    /// `[-1, rows] x [-1, cols]`.
    pub fn step_within_border(self, pos: BorderCoord2, (rows, cols): Coord2) -> Option<BorderCoord2> {
        let (row, col) = self.step(pos);
        let rows = BorderCoord::from(rows);
        let cols = BorderCoord::from(cols);
        ((-1..=rows).contains(&row) && (-1..=cols).contains(&col)).then_some((row, col))
    }
}
