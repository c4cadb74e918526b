use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Game-level state. Only moves forward, except through [`Board::restart`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Ready,
    Running,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The grid, its bombs and the phase state machine.
///
/// Every change to a cell's visible state and every phase transition is reported to the
/// observer `O` as it happens, so a renderer never needs to diff the board.
pub struct Board<O = ()> {
    config: GameConfig,
    cells: Array2<Cell>,
    bomb_count: CellCount,
    phase: Phase,
    placer: Box<dyn BombPlacer>,
    observer: O,
}

impl Board {
    /// Board with randomly placed bombs and no observer.
    pub fn random(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomPlacer::seeded(seed), ())
    }
}

impl<O: BoardObserver> Board<O> {
    /// Allocates the grid and places the bombs, leaving the board [`Phase::Ready`].
    pub fn new(config: GameConfig, placer: impl BombPlacer + 'static, observer: O) -> Result<Self> {
        config.validate()?;

        let mut board = Self {
            config,
            cells: Array2::default((config.size, config.size).to_nd_index()),
            bomb_count: 0,
            phase: Phase::Ready,
            placer: Box::new(placer),
            observer,
        };
        board.place_bombs();
        Ok(board)
    }

    /// Board whose bombs are always exactly `layout`, also after a restart.
    pub fn with_layout(layout: BombLayout, observer: O) -> Result<Self> {
        let config = GameConfig::new(layout.size(), layout.bomb_count())?;
        Self::new(config, layout, observer)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of bombs actually placed, which can be lower than requested.
    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    pub fn bombs_left(&self) -> isize {
        (self.bomb_count as isize) - (self.flag_count() as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn has_bomb_at(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(Cell::has_bomb)
    }

    /// Current view of a cell, the same shape as the change notification.
    pub fn cell_data(&self, coords: Coord2) -> Result<CellData> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.data_at(coords))
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Opens a cell, cascading through zero-count neighborhoods.
    ///
    /// Starts the game when it is ready and does nothing once it has ended.
    pub fn open_cell(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if !self.start_if_ready() {
            return Ok(OpenOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.open_or_detonate() {
            return Ok(OpenOutcome::NoChange);
        }
        let detonated = cell.visibility() == Visibility::Detonated;
        self.notify_cell(coords);

        if detonated {
            log::debug!("Bomb detonated at {:?}", coords);
            self.reveal_all(Cell::open_or_detonate);
            self.set_phase(Phase::Lost);
            return Ok(OpenOutcome::Detonated);
        }

        if self.adjacent_bomb_count(coords) == 0 {
            self.flood_open(coords);
        }

        Ok(if self.finish_if_won() {
            OpenOutcome::Won
        } else {
            OpenOutcome::Opened
        })
    }

    /// Flags or unflags a closed cell.
    ///
    /// Starts the game when it is ready and does nothing once it has ended.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if !self.start_if_ready() {
            return Ok(FlagOutcome::NoChange);
        }

        if !self.cells[coords.to_nd_index()].toggle_flag() {
            return Ok(FlagOutcome::NoChange);
        }
        self.notify_cell(coords);

        Ok(if self.finish_if_won() {
            FlagOutcome::Won
        } else {
            FlagOutcome::Changed
        })
    }

    /// Closes every cell, removes every bomb and places them again.
    pub fn restart(&mut self) {
        for coords in iter_coords(self.size()) {
            if self.cells[coords.to_nd_index()].reset() {
                self.notify_cell(coords);
            }
        }
        self.place_bombs();
        self.set_phase(Phase::Ready);
    }

    fn place_bombs(&mut self) {
        let layout = self.placer.place(&self.config);
        self.bomb_count = 0;
        for coords in iter_coords(self.size()) {
            let has_bomb = layout.contains_bomb(coords);
            self.cells[coords.to_nd_index()].set_bomb(has_bomb);
            if has_bomb {
                self.bomb_count += 1;
            }
        }
        log::debug!(
            "Board {}x{} ready with {} bombs",
            self.size(),
            self.size(),
            self.bomb_count
        );
    }

    /// Opens everything reachable from `start` through zero-count cells. Flags inside the
    /// region are opened too, they can't hide a bomb there.
    fn flood_open(&mut self, start: Coord2) {
        let mut to_visit: Vec<Coord2> = self.cells.iter_neighbors(start).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            start,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop() {
            if !self.cells[visit_coords.to_nd_index()].open_or_detonate() {
                continue;
            }
            self.notify_cell(visit_coords);

            let visit_count = self.adjacent_bomb_count(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, bomb count: {}",
                visit_coords,
                visit_count
            );

            if visit_count == 0 {
                to_visit.extend(
                    self.cells
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| !self.cells[pos.to_nd_index()].is_revealed()),
                );
            }
        }
    }

    fn is_won(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| !cell.is_closed() && (!cell.is_flagged() || cell.has_bomb()))
    }

    fn finish_if_won(&mut self) -> bool {
        if self.phase != Phase::Running || !self.is_won() {
            return false;
        }
        self.reveal_all(Cell::open_or_defuse);
        self.set_phase(Phase::Won);
        true
    }

    fn reveal_all(&mut self, reveal: fn(&mut Cell) -> bool) {
        for coords in iter_coords(self.size()) {
            if reveal(&mut self.cells[coords.to_nd_index()]) {
                self.notify_cell(coords);
            }
        }
    }

    /// Moves a ready game to running, returns whether moves are accepted.
    fn start_if_ready(&mut self) -> bool {
        if self.phase.is_ready() {
            self.set_phase(Phase::Running);
        }
        self.phase == Phase::Running
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.observer.phase_changed(phase);
    }

    fn adjacent_bomb_count(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].has_bomb())
            .count() as u8
    }

    fn data_at(&self, coords: Coord2) -> CellData {
        let visibility = self.cells[coords.to_nd_index()].visibility();
        let adjacent_bombs = match visibility {
            Visibility::Opened => Some(self.adjacent_bomb_count(coords)),
            _ => None,
        };
        CellData {
            visibility,
            adjacent_bombs,
        }
    }

    fn notify_cell(&mut self, coords: Coord2) {
        let data = self.data_at(coords);
        self.observer.cell_changed(coords, data);
    }
}

impl<O: fmt::Debug> fmt::Debug for Board<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("bomb_count", &self.bomb_count)
            .field("phase", &self.phase)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}
