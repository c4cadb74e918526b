//! Rule engine for a square minesweeper board.
//!
//! A [`Board`] owns an `N x N` grid of [`Cell`]s, places bombs through a [`BombPlacer`] and
//! reports every visible change to a [`BoardObserver`]. Rendering and input are left to the
//! caller, which drives the board with [`Board::open_cell`], [`Board::toggle_flag`] and
//! [`Board::restart`].
#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use observer::*;
pub use placement::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod observer;
mod placement;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Detonated,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn ends_game(self) -> bool {
        matches!(self, Self::Detonated | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
