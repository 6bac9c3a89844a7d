use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;
pub use search::*;

mod search;

/// Connector between two tiles, endpoints included.
///
/// Points are bordered coordinates: a point with a `-1` component, or one equal to the board's
/// row or column count, lies on the virtual border around the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PathPoints")]
pub struct Path {
    points: Vec<BorderCoord2>,
}

#[derive(Deserialize)]
struct PathPoints {
    points: Vec<BorderCoord2>,
}

impl TryFrom<PathPoints> for Path {
    type Error = BoardError;

    fn try_from(PathPoints { points }: PathPoints) -> Result<Self> {
        let joined = points.len() >= 2
            && points
                .windows(2)
                .all(|pair| Direction::between(pair[0], pair[1]).is_some());
        if !joined {
            return Err(BoardError::BrokenPath);
        }
        Ok(Self { points })
    }
}

impl Path {
    pub(crate) fn from_points(points: Vec<BorderCoord2>) -> Self {
        debug_assert!(points.len() >= 2, "a path joins two distinct tiles");
        Self { points }
    }

    pub fn points(&self) -> &[BorderCoord2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> BorderCoord2 {
        self.points[0]
    }

    pub fn end(&self) -> BorderCoord2 {
        self.points[self.points.len() - 1]
    }

    /// Endpoints plus every point where the connector bends, in order. This is what a renderer
    /// needs to draw the connector as straight segments.
    pub fn corners(&self) -> SmallVec<[BorderCoord2; 4]> {
        let mut corners = SmallVec::new();
        corners.push(self.start());
        for window in self.points.windows(3) {
            let incoming = Direction::between(window[0], window[1]);
            let outgoing = Direction::between(window[1], window[2]);
            if incoming != outgoing {
                corners.push(window[1]);
            }
        }
        corners.push(self.end());
        corners
    }

    pub fn turns(&self) -> usize {
        self.corners().len() - 2
    }

    /// Whether any point of the connector runs through the virtual border.
    pub fn uses_border(&self, size: Coord2) -> bool {
        self.points
            .iter()
            .any(|&point| board_coords(point, size).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = BorderCoord2> + '_ {
        self.points.iter().copied()
    }
}
