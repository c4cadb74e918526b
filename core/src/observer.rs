use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible view of one cell.
///
/// `adjacent_bombs` is only set for [`Visibility::Opened`] cells so that the count never
/// leaks bomb positions around cells that are still closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellData {
    pub visibility: Visibility,
    pub adjacent_bombs: Option<u8>,
}

/// A notification emitted by a [`Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    CellChanged { coords: Coord2, data: CellData },
    PhaseChanged(Phase),
}

/// Receives board notifications synchronously, while the board operation is still running.
///
/// The board is mutably borrowed for the whole call, so an observer cannot issue commands
/// back into it; forwarding them from a notification is not supported.
pub trait BoardObserver {
    fn cell_changed(&mut self, coords: Coord2, data: CellData) {
        let _ = (coords, data);
    }

    fn phase_changed(&mut self, phase: Phase) {
        let _ = phase;
    }
}

impl BoardObserver for () {}

/// Records every notification in order.
impl BoardObserver for Vec<BoardEvent> {
    fn cell_changed(&mut self, coords: Coord2, data: CellData) {
        self.push(BoardEvent::CellChanged { coords, data });
    }

    fn phase_changed(&mut self, phase: Phase) {
        self.push(BoardEvent::PhaseChanged(phase));
    }
}

impl<O: BoardObserver + ?Sized> BoardObserver for &mut O {
    fn cell_changed(&mut self, coords: Coord2, data: CellData) {
        (**self).cell_changed(coords, data);
    }

    fn phase_changed(&mut self, phase: Phase) {
        (**self).phase_changed(phase);
    }
}
