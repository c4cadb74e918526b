use core::ops::{Index, IndexMut};

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Constraint a new bomb must satisfy against the bombs already placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRule {
    /// No two bombs may be 8-adjacent.
    #[default]
    NoAdjacentBombs,
    /// No bomb may end up with every one of its neighbors holding a bomb.
    NoSurroundedBombs,
}

/// Where the bombs are on a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BombLayout {
    bomb_mask: Array2<bool>,
    bomb_count: CellCount,
}

impl BombLayout {
    pub fn empty(size: Coord) -> Self {
        Self {
            bomb_mask: Array2::default((size, size).to_nd_index()),
            bomb_count: 0,
        }
    }

    /// Builds a fixed layout, mostly useful to set up a board without randomness.
    pub fn from_bomb_coords(size: Coord, bomb_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut layout = Self::empty(size);
        for &coords in bomb_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            layout.insert(coords);
        }
        Ok(layout)
    }

    pub fn size(&self) -> Coord {
        self.bomb_mask.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn contains_bomb(&self, coords: Coord2) -> bool {
        self.bomb_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn adjacent_bomb_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_bombs(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.bomb_mask.iter_neighbors(coords)
    }

    /// Whether `rule` allows a new bomb at `coords`.
    pub fn can_place(&self, coords: Coord2, rule: PlacementRule) -> bool {
        if self[coords] {
            return false;
        }

        match rule {
            PlacementRule::NoAdjacentBombs => self.iter_neighbors(coords).all(|pos| !self[pos]),
            PlacementRule::NoSurroundedBombs => {
                // a cell without neighbors counts as surrounded
                let surrounded = self.iter_neighbors(coords).all(|pos| self[pos]);
                !surrounded
                    && !self.iter_neighbors(coords).filter(|&pos| self[pos]).any(|bomb| {
                        self.iter_neighbors(bomb)
                            .all(|pos| pos == coords || self[pos])
                    })
            }
        }
    }

    fn insert(&mut self, coords: Coord2) {
        if !self[coords] {
            self[coords] = true;
            self.bomb_count += 1;
        }
    }
}

impl Index<Coord2> for BombLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.bomb_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for BombLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.bomb_mask[coords.to_nd_index()]
    }
}

/// Source of bomb layouts for a board, consulted on construction and on every restart.
pub trait BombPlacer {
    fn place(&mut self, config: &GameConfig) -> BombLayout;
}

/// A fixed layout places itself every time.
impl BombPlacer for BombLayout {
    fn place(&mut self, config: &GameConfig) -> BombLayout {
        if self.size() != config.size {
            log::warn!(
                "Fixed layout is {0}x{0} but board is {1}x{1}, placing no bombs",
                self.size(),
                config.size
            );
            return BombLayout::empty(config.size);
        }
        self.clone()
    }
}

/// Uniform random placement honoring [`GameConfig::rule`].
///
/// Picks random cells until every bomb is placed or `size * size` picks have been rejected,
/// in which case the layout ends up with fewer bombs than requested.
#[derive(Clone, Debug)]
pub struct RandomPlacer<R> {
    rng: R,
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPlacer<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BombPlacer for RandomPlacer<R> {
    fn place(&mut self, config: &GameConfig) -> BombLayout {
        let mut layout = BombLayout::empty(config.size);
        if config.size == 0 {
            return layout;
        }

        let mut failures_left = config.total_cells();
        while layout.bomb_count() < config.bombs && failures_left > 0 {
            let coords = (
                self.rng.random_range(0..config.size),
                self.rng.random_range(0..config.size),
            );
            if layout.can_place(coords, config.rule) {
                layout.insert(coords);
            } else {
                failures_left -= 1;
            }
        }

        if layout.bomb_count() < config.bombs {
            log::warn!(
                "Bomb placement gave up, requested {} but placed {} on {}x{}",
                config.bombs,
                layout.bomb_count(),
                config.size,
                config.size
            );
        } else {
            log::debug!(
                "Placed {} bombs on {}x{} ({} rejected picks)",
                layout.bomb_count(),
                config.size,
                config.size,
                config.total_cells() - failures_left
            );
        }
        layout
    }
}
