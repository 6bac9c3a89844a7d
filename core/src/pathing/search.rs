use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashMap;
use ndarray::Array2;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct SearchState {
    pos: BorderCoord2,
    heading: Direction,
    turns: u8,
}

/// Looks for a connector between two occupied tiles.
///
/// The connector is made of at most `max_turns + 1` straight segments. Every point strictly
/// between the endpoints has to be either an empty board cell or a cell of the one-wide virtual
/// border around the board. Tile kinds are not compared here, callers decide what may match.
///
/// Returns `None` when either endpoint is off the board or empty, when both endpoints are the
/// same cell, or when no such connector exists. Among the connectors found, one with the fewest
/// unit steps is returned.
pub fn find_path(tiles: &Array2<Tile>, from: Coord2, to: Coord2, max_turns: u8) -> Option<Path> {
    let from_tile = tiles.get(from.to_nd_index())?;
    let to_tile = tiles.get(to.to_nd_index())?;
    if from == to || from_tile.is_empty() || to_tile.is_empty() {
        return None;
    }

    let path = PathSearch::new(tiles, from, to).run(max_turns);
    if let Some(path) = &path {
        log::trace!(
            "path {:?} -> {:?} found with {} turns",
            from,
            to,
            path.turns()
        );
    }
    path
}

/// Breadth-first search over (position, heading, turns used) on the bordered grid.
struct PathSearch<'a> {
    tiles: &'a Array2<Tile>,
    size: Coord2,
    start: BorderCoord2,
    goal: BorderCoord2,
    // fewest turns seen so far per (position, heading); arriving again with at least as many
    // turns cannot reach anything new
    best_turns: HashMap<(BorderCoord2, Direction), u8>,
    parents: HashMap<SearchState, Option<SearchState>>,
    queue: VecDeque<SearchState>,
}

impl<'a> PathSearch<'a> {
    fn new(tiles: &'a Array2<Tile>, from: Coord2, to: Coord2) -> Self {
        Self {
            tiles,
            size: tiles.grid_size(),
            start: from.to_border_coords(),
            goal: to.to_border_coords(),
            best_turns: HashMap::new(),
            parents: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    fn run(mut self, max_turns: u8) -> Option<Path> {
        for heading in Direction::ALL {
            self.visit(None, heading, 0);
        }

        while let Some(state) = self.queue.pop_front() {
            if state.pos == self.goal {
                return Some(self.rebuild(state));
            }

            self.visit(Some(state), state.heading, state.turns);
            if state.turns < max_turns {
                for heading in state.heading.perpendicular() {
                    self.visit(Some(state), heading, state.turns + 1);
                }
            }
        }

        None
    }

    fn visit(&mut self, parent: Option<SearchState>, heading: Direction, turns: u8) {
        let origin = parent.map_or(self.start, |state| state.pos);
        let Some(pos) = heading.step_within_border(origin, self.size) else {
            return;
        };
        if pos != self.goal && !is_passable(self.tiles, pos, self.size) {
            return;
        }
        if let Some(&seen) = self.best_turns.get(&(pos, heading)) {
            if seen <= turns {
                return;
            }
        }
        self.best_turns.insert((pos, heading), turns);

        let state = SearchState {
            pos,
            heading,
            turns,
        };
        self.parents.insert(state, parent);
        self.queue.push_back(state);
    }

    fn rebuild(&self, goal: SearchState) -> Path {
        let mut points = Vec::new();
        let mut current = Some(goal);
        while let Some(state) = current {
            points.push(state.pos);
            current = self.parents.get(&state).copied().flatten();
        }
        points.push(self.start);
        points.reverse();
        Path::from_points(points)
    }
}

/// Border points are always passable, board cells only when empty.
fn is_passable(tiles: &Array2<Tile>, pos: BorderCoord2, size: Coord2) -> bool {
    match board_coords(pos, size) {
        Some(coords) => tiles[coords.to_nd_index()].is_empty(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: i8 = -1;

    fn tiles(rows: &[&[i8]]) -> Array2<Tile> {
        let rows: Vec<Vec<Option<Kind>>> = rows
            .iter()
            .map(|row| row.iter().map(|&k| Kind::try_from(k).ok()).collect())
            .collect();
        TileLayout::from_rows(&rows).unwrap().tiles().clone()
    }

    /// Checks that `path` is a unit-step connector whose interior is passable.
    fn assert_witness(tiles: &Array2<Tile>, path: &Path, from: Coord2, to: Coord2, max_turns: u8) {
        let size = tiles.grid_size();
        assert_eq!(path.start(), from.to_border_coords());
        assert_eq!(path.end(), to.to_border_coords());
        for pair in path.points().windows(2) {
            assert!(Direction::between(pair[0], pair[1]).is_some(), "{pair:?} not adjacent");
        }
        for &point in &path.points()[1..path.len() - 1] {
            assert!(is_passable(tiles, point, size), "{point:?} is blocked");
        }
        assert!(path.turns() <= max_turns as usize);
    }

    #[test]
    fn straight_line_through_empty_cells() {
        let grid = tiles(&[&[0, E, E, 0], &[1, 2, 3, 4]]);

        let path = find_path(&grid, (0, 0), (0, 3), 2).unwrap();

        assert_eq!(path.points(), &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_witness(&grid, &path, (0, 0), (0, 3), 2);
    }

    #[test]
    fn adjacent_tiles_connect_directly() {
        let grid = tiles(&[&[5, 5], &[1, 2]]);

        let path = find_path(&grid, (0, 0), (0, 1), 0).unwrap();

        assert_eq!(path.points(), &[(0, 0), (0, 1)]);
    }

    #[test]
    fn one_bend_around_corner() {
        let grid = tiles(&[
            &[E, E, E, E],
            &[E, 0, E, E],
            &[E, E, E, 0],
            &[E, E, E, E],
        ]);

        let path = find_path(&grid, (1, 1), (2, 3), 2).unwrap();

        assert_eq!(path.len(), 4);
        assert_witness(&grid, &path, (1, 1), (2, 3), 2);
    }

    #[test]
    fn turn_budget_is_enforced() {
        // both short detours hit a tile, the border detours bend three times
        let grid = tiles(&[&[0, 1, 2], &[3, E, 4], &[5, 6, 0]]);

        let within_two = find_path(&grid, (0, 0), (2, 2), 2);
        let within_three = find_path(&grid, (0, 0), (2, 2), 3).unwrap();

        assert_eq!(within_two, None);
        assert_eq!(within_three.turns(), 3);
        assert!(within_three.uses_border(grid.grid_size()));
        assert_witness(&grid, &within_three, (0, 0), (2, 2), 3);
    }

    #[test]
    fn rim_tiles_connect_through_virtual_border() {
        let grid = tiles(&[&[0, 1, 0], &[2, 3, 4]]);

        let path = find_path(&grid, (0, 0), (0, 2), 2).unwrap();

        assert!(path.uses_border(grid.grid_size()));
        assert_eq!(
            path.corners().as_slice(),
            &[(0, 0), (-1, 0), (-1, 2), (0, 2)]
        );
        assert_witness(&grid, &path, (0, 0), (0, 2), 2);
    }

    #[test]
    fn opposite_corners_use_border_and_empty_middle_row() {
        let grid = tiles(&[&[0, E, 0], &[E, E, E], &[0, E, 0]]);

        let diagonal = find_path(&grid, (0, 0), (2, 2), 2).unwrap();
        let edge = find_path(&grid, (0, 0), (0, 2), 2).unwrap();

        assert_witness(&grid, &diagonal, (0, 0), (2, 2), 2);
        assert_eq!(edge.turns(), 0);
    }

    #[test]
    fn blocked_interior_has_no_path() {
        let grid = tiles(&[
            &[0, 1, 2, 3],
            &[1, 2, 3, 0],
            &[2, 3, 0, 1],
            &[3, 0, 1, 2],
        ]);

        assert_eq!(find_path(&grid, (0, 0), (3, 3), 2), None);
        assert_eq!(find_path(&grid, (1, 1), (0, 2), 2), None);
    }

    #[test]
    fn endpoints_must_be_distinct_occupied_and_on_board() {
        let grid = tiles(&[&[0, E, 0], &[E, E, E], &[0, E, 0]]);

        assert_eq!(find_path(&grid, (0, 0), (0, 0), 2), None);
        assert_eq!(find_path(&grid, (0, 0), (0, 1), 2), None);
        assert_eq!(find_path(&grid, (0, 1), (0, 0), 2), None);
        assert_eq!(find_path(&grid, (0, 0), (3, 3), 2), None);
        assert_eq!(find_path(&grid, (3, 0), (2, 2), 2), None);
    }

    #[test]
    fn kinds_are_not_compared() {
        let grid = tiles(&[&[0, E, 7]]);

        assert!(find_path(&grid, (0, 0), (0, 2), 0).is_some());
    }
}
