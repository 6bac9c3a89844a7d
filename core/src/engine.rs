use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Self::One, Self::Two];

    const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// Tile a player has picked and that waits for a partner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Idle,
    Pending(Coord2),
}

impl Selection {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub const fn pending(self) -> Option<Coord2> {
        match self {
            Self::Idle => None,
            Self::Pending(coords) => Some(coords),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStatus {
    /// At least one pair can still be cleared.
    Playing,
    /// Tiles remain but none of them can be paired.
    Deadlocked,
    /// Every tile has been cleared.
    Cleared,
}

impl BoardStatus {
    pub const fn is_cleared(self) -> bool {
        matches!(self, Self::Cleared)
    }

    pub const fn is_deadlocked(self) -> bool {
        matches!(self, Self::Deadlocked)
    }
}

/// Gameplay state of one round: the tile grid and the selection of each player.
///
/// Every operation is total. Taps outside the board or on empty cells are ignored, failed match
/// attempts move the selection, and nothing here returns an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardState")]
pub struct Board {
    layout: TileLayout,
    rules: MatchRules,
    selections: [Selection; 2],
}

#[derive(Deserialize)]
struct BoardState {
    layout: TileLayout,
    rules: MatchRules,
    selections: [Selection; 2],
}

impl TryFrom<BoardState> for Board {
    type Error = BoardError;

    /// Restores a snapshot. Pending selections must point at occupied tiles, and the turn
    /// budget is clamped like [`MatchRules::new`] does.
    fn try_from(state: BoardState) -> Result<Self> {
        for selection in state.selections {
            if let Some(coords) = selection.pending() {
                if !state.layout.get(coords).is_some_and(|tile| tile.is_occupied()) {
                    return Err(BoardError::StaleSelection);
                }
            }
        }

        let rules = MatchRules::new(state.rules.max_turns, state.rules.reselect);
        Ok(Self {
            layout: state.layout,
            rules,
            selections: state.selections,
        })
    }
}

impl Board {
    pub fn new(layout: TileLayout) -> Self {
        Self::with_rules(layout, MatchRules::default())
    }

    pub fn with_rules(layout: TileLayout, rules: MatchRules) -> Self {
        Self {
            layout,
            rules,
            selections: Default::default(),
        }
    }

    /// Starts a new round on `layout`, dropping every selection. Rules are kept.
    pub fn reset(&mut self, layout: TileLayout) {
        log::debug!("Board reset to {:?}", layout.size());
        self.layout = layout;
        self.selections = Default::default();
    }

    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.layout.get(coords)
    }

    pub fn remaining_tiles(&self) -> CellCount {
        self.layout.occupied_count()
    }

    pub fn selection(&self) -> Selection {
        self.selection_of(Player::One)
    }

    pub fn selection_of(&self, player: Player) -> Selection {
        self.selections[player.index()]
    }

    pub fn clear_selection(&mut self, player: Player) {
        self.selections[player.index()] = Selection::Idle;
    }

    /// Single-player tap, see [`Board::activate_as`].
    pub fn activate(&mut self, coords: Coord2) -> ActivateOutcome {
        self.activate_as(Player::One, coords)
    }

    /// Single-player tap in signed host coordinates. Negative values and values past the board
    /// are ignored like any other out-of-range tap.
    pub fn activate_signed(&mut self, row: i32, col: i32) -> ActivateOutcome {
        match (Coord::try_from(row), Coord::try_from(col)) {
            (Ok(row), Ok(col)) => self.activate((row, col)),
            _ => {
                log::trace!("Ignoring tap on ({}, {}), off the board", row, col);
                ActivateOutcome::NoChange
            }
        }
    }

    /// Handles a tap by `player` on `coords`.
    ///
    /// With nothing pending the tile becomes pending. With a tile pending, a tile of the same
    /// kind that can be connected to it clears both; anything else makes the tapped tile the new
    /// pending one. Tapping the pending tile again follows [`MatchRules::reselect`].
    pub fn activate_as(&mut self, player: Player, coords: Coord2) -> ActivateOutcome {
        use ActivateOutcome::*;

        let Some(Tile::Kind(kind)) = self.layout.get(coords) else {
            log::trace!("Ignoring tap on {:?}, nothing to select", coords);
            return NoChange;
        };

        let pending = match self.selection_of(player) {
            Selection::Idle => return self.select(player, coords),
            Selection::Pending(pending) => pending,
        };

        if pending == coords {
            return match self.rules.reselect {
                ReselectPolicy::Keep => NoChange,
                ReselectPolicy::Deselect => {
                    self.clear_selection(player);
                    Deselected(coords)
                }
            };
        }

        if self.layout.get(pending) != Some(Tile::Kind(kind)) {
            log::trace!("Kinds differ between {:?} and {:?}", pending, coords);
            return self.select(player, coords);
        }

        match self.find_path(pending, coords) {
            Some(path) => Matched(self.clear_pair(pending, coords, kind, path)),
            None => {
                log::trace!("No connector between {:?} and {:?}", pending, coords);
                self.select(player, coords)
            }
        }
    }

    /// Connector between two occupied tiles under the board's turn budget, see
    /// [`crate::find_path`]. Kinds are not compared.
    pub fn find_path(&self, from: Coord2, to: Coord2) -> Option<Path> {
        find_path(self.layout.tiles(), from, to, self.rules.max_turns)
    }

    /// Whether every tile has been cleared.
    pub fn is_finished(&self) -> bool {
        self.layout.tiles().iter().all(|tile| tile.is_empty())
    }

    /// Whether any two tiles of the same kind can currently be cleared.
    pub fn has_matching_pairs(&self) -> bool {
        self.find_hint().is_some()
    }

    /// First clearable pair in kind then row-major order, with its connector.
    pub fn find_hint(&self) -> Option<Match> {
        matching_pairs(self.layout.tiles(), self.rules.max_turns).next()
    }

    pub fn count_matching_pairs(&self) -> usize {
        matching_pairs(self.layout.tiles(), self.rules.max_turns).count()
    }

    pub fn status(&self) -> BoardStatus {
        if self.is_finished() {
            BoardStatus::Cleared
        } else if self.has_matching_pairs() {
            BoardStatus::Playing
        } else {
            log::debug!(
                "Board deadlocked with {} tiles left",
                self.remaining_tiles()
            );
            BoardStatus::Deadlocked
        }
    }

    fn select(&mut self, player: Player, coords: Coord2) -> ActivateOutcome {
        self.selections[player.index()] = Selection::Pending(coords);
        ActivateOutcome::Selected(coords)
    }

    fn clear_pair(&mut self, first: Coord2, second: Coord2, kind: Kind, path: Path) -> Match {
        self.layout[first] = Tile::Empty;
        self.layout[second] = Tile::Empty;

        // a pending tile that just disappeared cannot stay selected, whoever picked it
        for selection in &mut self.selections {
            if matches!(selection.pending(), Some(coords) if coords == first || coords == second) {
                *selection = Selection::Idle;
            }
        }

        log::debug!(
            "Cleared kind {} at {:?} and {:?} with {} turns",
            kind,
            first,
            second,
            path.turns()
        );
        Match {
            first,
            second,
            kind,
            path,
        }
    }
}
