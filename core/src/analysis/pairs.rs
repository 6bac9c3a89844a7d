use alloc::collections::{BTreeMap, btree_map};
use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Occupied cells grouped by kind, each group in row-major order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct KindGroups {
    groups: BTreeMap<Kind, SmallVec<[Coord2; 4]>>,
}

impl KindGroups {
    pub fn from_tiles(tiles: &Array2<Tile>) -> Self {
        let mut groups: BTreeMap<Kind, SmallVec<[Coord2; 4]>> = BTreeMap::new();
        for ((row, col), tile) in tiles.indexed_iter() {
            if let Tile::Kind(kind) = *tile {
                groups
                    .entry(kind)
                    .or_default()
                    .push((row as Coord, col as Coord));
            }
        }
        Self { groups }
    }

    pub fn kind_count(&self) -> usize {
        self.groups.len()
    }

    pub fn cells_of(&self, kind: Kind) -> &[Coord2] {
        self.groups
            .get(&kind)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Kinds with an odd number of tiles left; a board holding any of them can never be cleared.
    pub fn unpaired_kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.groups
            .iter()
            .filter(|(_, cells)| cells.len() % 2 == 1)
            .map(|(&kind, _)| kind)
    }

    /// Every unordered pair of same-kind cells, grouped by ascending kind.
    pub fn candidate_pairs(&self) -> impl Iterator<Item = (Kind, Coord2, Coord2)> + '_ {
        self.groups.iter().flat_map(|(&kind, cells)| {
            cells.iter().enumerate().flat_map(move |(i, &first)| {
                cells[i + 1..]
                    .iter()
                    .map(move |&second| (kind, first, second))
            })
        })
    }

    /// Owning version of [`KindGroups::candidate_pairs`], yielding pairs one at a time.
    pub fn into_candidate_pairs(self) -> CandidatePairs {
        CandidatePairs {
            groups: self.groups.into_iter(),
            current: None,
            first: 0,
            second: 1,
        }
    }
}

/// Lazy walk over every unordered same-kind pair of a [`KindGroups`].
#[derive(Debug)]
pub struct CandidatePairs {
    groups: btree_map::IntoIter<Kind, SmallVec<[Coord2; 4]>>,
    current: Option<(Kind, SmallVec<[Coord2; 4]>)>,
    first: usize,
    second: usize,
}

impl Iterator for CandidatePairs {
    type Item = (Kind, Coord2, Coord2);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((kind, cells)) = &self.current {
                if self.second < cells.len() {
                    let pair = (*kind, cells[self.first], cells[self.second]);
                    self.second += 1;
                    return Some(pair);
                }
                if self.first + 2 < cells.len() {
                    self.first += 1;
                    self.second = self.first + 1;
                    continue;
                }
            }
            self.current = Some(self.groups.next()?);
            self.first = 0;
            self.second = 1;
        }
    }
}

/// Same-kind pairs that can currently be cleared, each with its connector.
pub fn matching_pairs(tiles: &Array2<Tile>, max_turns: u8) -> impl Iterator<Item = Match> + '_ {
    KindGroups::from_tiles(tiles)
        .into_candidate_pairs()
        .filter_map(move |(kind, first, second)| {
            find_path(tiles, first, second, max_turns).map(|path| Match {
                first,
                second,
                kind,
                path,
            })
        })
}
