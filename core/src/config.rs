use serde::{Deserialize, Serialize};

use crate::*;

/// Parameters a board is built from.
///
/// Loaded by the collaborator (typically from JSON) and checked with [`GameConfig::validate`]
/// before use; [`GameConfig::new`] does both in one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid.
    pub size: Coord,
    /// Requested number of bombs, strictly fewer than `size * size`.
    pub bombs: CellCount,
    #[serde(default)]
    pub rule: PlacementRule,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, bombs: CellCount) -> Self {
        Self {
            size,
            bombs,
            rule: PlacementRule::NoAdjacentBombs,
        }
    }

    pub fn new(size: Coord, bombs: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, bombs);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_rule(self, rule: PlacementRule) -> Self {
        Self { rule, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.bombs >= self.total_cells() {
            return Err(GameError::TooManyBombs);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}
