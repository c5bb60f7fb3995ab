//! Symbol grid and random grid generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Position};
use crate::error::{ScratchError, ScratchResult};
use crate::sampler::WeightedSampler;

/// Chance that a generated grid receives one bonus cell
pub const BONUS_PLACEMENT_PROBABILITY: f64 = 0.3;

/// Clamp a placement chance to 0..=1; non-finite values fall back to the default
pub fn bonus_probability(probability: f64) -> f64 {
    if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        log::warn!("Bonus probability {probability} is not finite, using {BONUS_PLACEMENT_PROBABILITY}");
        BONUS_PLACEMENT_PROBABILITY
    }
}

/// Rows × columns matrix of symbol names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from rows; every row must have the same length
    pub fn from_rows(cells: Vec<Vec<String>>) -> ScratchResult<Self> {
        let columns = cells.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(ScratchError::input("Grid must have at least one row and one column"));
        }
        if let Some(row) = cells.iter().position(|r| r.len() != columns) {
            return Err(ScratchError::input(format!(
                "Grid row {row} has {} cells, expected {columns}",
                cells[row].len()
            )));
        }
        Ok(Self { cells })
    }

    /// Convenience for literal grids
    pub fn from_strs<const C: usize>(rows: &[[&str; C]]) -> ScratchResult<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    /// Symbol at a position
    pub fn get(&self, pos: Position) -> Option<&str> {
        self.cells
            .get(pos.row)
            .and_then(|r| r.get(pos.column))
            .map(String::as_str)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, &str)> {
        self.cells.iter().enumerate().flat_map(|(row, r)| {
            r.iter()
                .enumerate()
                .map(move |(column, s)| (Position::new(row, column), s.as_str()))
        })
    }

    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Check the grid matches the configured dimensions
    pub fn check_dimensions(&self, config: &GameConfig) -> ScratchResult<()> {
        if self.rows() != config.rows || self.columns() != config.columns {
            return Err(ScratchError::input(format!(
                "Grid is {}x{}, configuration expects {}x{}",
                self.rows(),
                self.columns(),
                config.rows,
                config.columns
            )));
        }
        Ok(())
    }

    fn set(&mut self, pos: Position, symbol: &str) {
        if let Some(cell) = self.cells.get_mut(pos.row).and_then(|r| r.get_mut(pos.column)) {
            *cell = symbol.to_string();
        }
    }
}

/// Generates random grids from a configuration
pub struct MatrixGenerator<'a> {
    config: &'a GameConfig,
    bonus_probability: f64,
}

impl<'a> MatrixGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            config,
            bonus_probability: BONUS_PLACEMENT_PROBABILITY,
        }
    }

    /// Override the bonus placement chance (see [`bonus_probability`])
    pub fn with_bonus_probability(mut self, probability: f64) -> Self {
        self.bonus_probability = bonus_probability(probability);
        self
    }

    /// Fill every cell with a standard symbol, then maybe place one bonus
    pub fn generate<R: Rng>(&self, rng: &mut R) -> ScratchResult<Grid> {
        let rows = self.config.rows;
        let columns = self.config.columns;
        let mut cells = Vec::with_capacity(rows);

        for row in 0..rows {
            let mut line = Vec::with_capacity(columns);
            for column in 0..columns {
                let weights = self.config.cell_weights(row, column)?;
                let symbol = WeightedSampler::new(weights)?.sample(rng);
                line.push(symbol.to_string());
            }
            cells.push(line);
        }

        let mut grid = Grid::from_rows(cells)?;

        if rng.random_bool(self.bonus_probability) {
            let pos = Position::new(rng.random_range(0..rows), rng.random_range(0..columns));
            let bonus = WeightedSampler::new(self.config.bonus_weights())?.sample(rng);
            log::debug!("Placing bonus symbol {bonus} at {pos}");
            grid.set(pos, bonus);
        }

        Ok(grid)
    }
}
