use serde::{Deserialize, Serialize};

/// What the player can see of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Closed,
    Opened,
    FlaggedAsBomb,
    /// Bomb revealed when the game was won.
    Defused,
    /// Bomb revealed when the game was lost.
    Detonated,
}

impl Visibility {
    /// Whether the state is final for the rest of the game.
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Opened | Self::Defused | Self::Detonated)
    }
}

/// One grid position: bomb presence plus visibility.
///
/// Revealed states ([`Visibility::is_revealed`]) are only reachable from `Closed` or
/// `FlaggedAsBomb` and never change afterwards; only [`Cell::reset`] undoes them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    has_bomb: bool,
    visibility: Visibility,
}

impl Cell {
    pub const fn visibility(self) -> Visibility {
        self.visibility
    }

    pub const fn has_bomb(self) -> bool {
        self.has_bomb
    }

    pub fn set_bomb(&mut self, has_bomb: bool) {
        self.has_bomb = has_bomb;
    }

    pub const fn is_closed(self) -> bool {
        matches!(self.visibility, Visibility::Closed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.visibility, Visibility::FlaggedAsBomb)
    }

    pub const fn is_revealed(self) -> bool {
        self.visibility.is_revealed()
    }

    /// Opens the cell, or detonates it if it holds a bomb. Returns whether it changed.
    pub fn open_or_detonate(&mut self) -> bool {
        self.open_or(Visibility::Detonated)
    }

    /// Opens the cell, or defuses it if it holds a bomb. Returns whether it changed.
    pub fn open_or_defuse(&mut self) -> bool {
        self.open_or(Visibility::Defused)
    }

    /// Switches between `Closed` and `FlaggedAsBomb`. Returns whether it changed.
    pub fn toggle_flag(&mut self) -> bool {
        use Visibility::*;

        self.visibility = match self.visibility {
            Closed => FlaggedAsBomb,
            FlaggedAsBomb => Closed,
            _ => return false,
        };
        true
    }

    /// Removes the bomb and closes the cell. Returns whether the visible state changed.
    pub fn reset(&mut self) -> bool {
        self.has_bomb = false;
        if self.is_closed() {
            false
        } else {
            self.visibility = Visibility::Closed;
            true
        }
    }

    fn open_or(&mut self, bomb_state: Visibility) -> bool {
        debug_assert!(matches!(
            bomb_state,
            Visibility::Defused | Visibility::Detonated
        ));

        match self.visibility {
            Visibility::Closed | Visibility::FlaggedAsBomb => {
                self.visibility = if self.has_bomb {
                    bomb_state
                } else {
                    Visibility::Opened
                };
                true
            }
            _ => false,
        }
    }
}
