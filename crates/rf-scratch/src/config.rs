//! Game configuration model
//!
//! Mirrors the configuration document consumed by the engine: grid size,
//! symbol table, per-cell and bonus probabilities, and the catalog of win
//! combinations. Weight tables and combinations keep their declaration order,
//! which drives sampling buckets and combination tie-breaks.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ScratchError, ScratchResult};
use crate::symbols::{SymbolKind, SymbolTable};

/// Symbol name → integer weight, in declaration order
pub type WeightTable = IndexMap<String, u32>;

/// Default rows/columns when the document omits them
pub const DEFAULT_DIMENSION: usize = 3;

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

// ═══════════════════════════════════════════════════════════════════════════════
// POSITIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Zero-indexed grid coordinate, written as `"row:column"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl FromStr for Position {
    type Err = ScratchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once(':')
            .ok_or_else(|| ScratchError::config(format!("Position '{s}' is not 'row:column'")))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ScratchError::config(format!("Position '{s}' is not 'row:column'")))
        };

        Ok(Self::new(parse(row)?, parse(column)?))
    }
}

impl TryFrom<String> for Position {
    type Error = ScratchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROBABILITIES
// ═══════════════════════════════════════════════════════════════════════════════

/// Standard-symbol weights for one cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellProbability {
    pub row: usize,
    pub column: usize,
    pub symbols: WeightTable,
}

impl CellProbability {
    pub fn new(row: usize, column: usize, symbols: WeightTable) -> Self {
        Self { row, column, symbols }
    }
}

/// Bonus-symbol weights, shared by every cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusProbability {
    pub symbols: WeightTable,
}

/// Probabilities section of the configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    #[serde(default)]
    pub standard_symbols: Vec<CellProbability>,
    #[serde(default)]
    pub bonus_symbols: BonusProbability,
}

// ═══════════════════════════════════════════════════════════════════════════════
// WIN COMBINATIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// How a combination is triggered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// At least `count` occurrences of one symbol anywhere on the grid
    SameSymbols { count: usize },
    /// Every position of a covered area holds the same symbol
    LinearSymbols { covered_areas: Vec<Vec<Position>> },
}

/// A named winning combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WinCombinationDoc", into = "WinCombinationDoc")]
pub struct WinCombination {
    pub reward_multiplier: Decimal,
    pub trigger: Trigger,
    /// Informational grouping tag carried by the document format
    pub group: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TriggerKind {
    SameSymbols,
    LinearSymbols,
}

/// Flat document form of a combination
///
/// Kept flat so numbers never pass through serde's buffered content, which
/// loses them once serde_json runs with `arbitrary_precision`.
#[derive(Serialize, Deserialize)]
struct WinCombinationDoc {
    reward_multiplier: Decimal,
    when: TriggerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    covered_areas: Option<Vec<Vec<Position>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

impl TryFrom<WinCombinationDoc> for WinCombination {
    type Error = String;

    fn try_from(doc: WinCombinationDoc) -> Result<Self, Self::Error> {
        let trigger = match (doc.when, doc.count, doc.covered_areas) {
            (TriggerKind::SameSymbols, Some(count), _) => Trigger::SameSymbols { count },
            (TriggerKind::SameSymbols, None, _) => {
                return Err("same_symbols combination needs a count".into());
            }
            (TriggerKind::LinearSymbols, _, Some(covered_areas)) => {
                Trigger::LinearSymbols { covered_areas }
            }
            (TriggerKind::LinearSymbols, _, None) => {
                return Err("linear_symbols combination needs covered_areas".into());
            }
        };
        Ok(Self {
            reward_multiplier: doc.reward_multiplier,
            trigger,
            group: doc.group,
        })
    }
}

impl From<WinCombination> for WinCombinationDoc {
    fn from(combination: WinCombination) -> Self {
        let (when, count, covered_areas) = match combination.trigger {
            Trigger::SameSymbols { count } => (TriggerKind::SameSymbols, Some(count), None),
            Trigger::LinearSymbols { covered_areas } => {
                (TriggerKind::LinearSymbols, None, Some(covered_areas))
            }
        };
        Self {
            reward_multiplier: combination.reward_multiplier,
            when,
            count,
            covered_areas,
            group: combination.group,
        }
    }
}

impl WinCombination {
    /// Count-based combination
    pub fn same_symbols(count: usize, reward_multiplier: Decimal) -> Self {
        Self {
            reward_multiplier,
            trigger: Trigger::SameSymbols { count },
            group: Some("same_symbols".into()),
        }
    }

    /// Pattern-based combination
    pub fn linear(covered_areas: Vec<Vec<Position>>, reward_multiplier: Decimal) -> Self {
        Self {
            reward_multiplier,
            trigger: Trigger::LinearSymbols { covered_areas },
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Required count for `same_symbols`, `None` otherwise
    pub fn required_count(&self) -> Option<usize> {
        match self.trigger {
            Trigger::SameSymbols { count } => Some(count),
            Trigger::LinearSymbols { .. } => None,
        }
    }

    /// Covered areas for `linear_symbols`, `None` otherwise
    pub fn covered_areas(&self) -> Option<&[Vec<Position>]> {
        match &self.trigger {
            Trigger::LinearSymbols { covered_areas } => Some(covered_areas),
            Trigger::SameSymbols { .. } => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GAME CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_dimension")]
    pub columns: usize,
    #[serde(default = "default_dimension")]
    pub rows: usize,
    pub symbols: SymbolTable,
    pub probabilities: Probabilities,
    pub win_combinations: IndexMap<String, WinCombination>,
}

impl GameConfig {
    /// Empty configuration for a `rows × columns` grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            columns,
            rows,
            symbols: SymbolTable::new(),
            probabilities: Probabilities::default(),
            win_combinations: IndexMap::new(),
        }
    }

    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_cell(mut self, cell: CellProbability) -> Self {
        self.probabilities.standard_symbols.push(cell);
        self
    }

    pub fn with_bonus_weights(mut self, symbols: WeightTable) -> Self {
        self.probabilities.bonus_symbols = BonusProbability { symbols };
        self
    }

    pub fn with_combination(mut self, name: impl Into<String>, combination: WinCombination) -> Self {
        self.win_combinations.insert(name.into(), combination);
        self
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    /// Standard-symbol weights for a cell
    ///
    /// Cells without an explicit entry use the first declared table.
    pub fn cell_weights(&self, row: usize, column: usize) -> ScratchResult<&WeightTable> {
        let cells = &self.probabilities.standard_symbols;

        if let Some(cell) = cells.iter().find(|c| c.row == row && c.column == column) {
            return Ok(&cell.symbols);
        }

        let fallback = cells
            .first()
            .ok_or_else(|| ScratchError::config("No standard symbol probabilities configured"))?;
        log::debug!(
            "No probabilities for cell {row}:{column}, using {}:{}",
            fallback.row,
            fallback.column
        );
        Ok(&fallback.symbols)
    }

    /// Bonus-symbol weights
    pub fn bonus_weights(&self) -> &WeightTable {
        &self.probabilities.bonus_symbols.symbols
    }

    pub fn combination(&self, name: &str) -> Option<&WinCombination> {
        self.win_combinations.get(name)
    }

    /// `same_symbols` combinations as (name, required count), declaration order
    pub fn same_symbol_combinations(&self) -> impl Iterator<Item = (&str, usize)> {
        self.win_combinations
            .iter()
            .filter_map(|(name, c)| c.required_count().map(|count| (name.as_str(), count)))
    }

    /// `linear_symbols` combinations as (name, areas), declaration order
    pub fn linear_combinations(&self) -> impl Iterator<Item = (&str, &[Vec<Position>])> {
        self.win_combinations
            .iter()
            .filter_map(|(name, c)| c.covered_areas().map(|areas| (name.as_str(), areas)))
    }

    /// Cells that have no explicit probability entry
    pub fn cells_without_probabilities(&self) -> Vec<Position> {
        let declared: HashSet<(usize, usize)> = self
            .probabilities
            .standard_symbols
            .iter()
            .map(|c| (c.row, c.column))
            .collect();

        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| Position::new(row, column)))
            .filter(|p| !declared.contains(&(p.row, p.column)))
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> ScratchResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ScratchError::config("Grid must have at least 1 row and 1 column"));
        }

        if self.symbols.is_empty() {
            return Err(ScratchError::config("Symbol table is empty"));
        }

        for (name, symbol) in self.symbols.iter() {
            symbol.validate(name)?;
        }

        self.validate_probabilities()?;
        self.validate_combinations()?;

        let fallback_cells = self.cells_without_probabilities();
        if !fallback_cells.is_empty() {
            log::warn!(
                "{} of {} cells have no probability entry and fall back to the first declared table",
                fallback_cells.len(),
                self.total_positions()
            );
        }

        Ok(())
    }

    fn validate_probabilities(&self) -> ScratchResult<()> {
        let cells = &self.probabilities.standard_symbols;
        if cells.is_empty() {
            return Err(ScratchError::config("No standard symbol probabilities configured"));
        }

        let mut seen = HashSet::new();
        for cell in cells {
            let label = format!("cell {}:{}", cell.row, cell.column);
            if !self.contains(Position::new(cell.row, cell.column)) {
                return Err(ScratchError::config(format!("{label} is outside the grid")));
            }
            if !seen.insert((cell.row, cell.column)) {
                return Err(ScratchError::config(format!("{label} is declared twice")));
            }
            self.validate_weights(&label, &cell.symbols, SymbolKind::Standard)?;
        }

        self.validate_weights("bonus symbols", self.bonus_weights(), SymbolKind::Bonus)
    }

    fn validate_weights(&self, label: &str, weights: &WeightTable, kind: SymbolKind) -> ScratchResult<()> {
        if weights.is_empty() {
            return Err(ScratchError::config(format!("Weights for {label} are empty")));
        }

        let mut total: u64 = 0;
        for (name, &weight) in weights {
            let symbol = self.symbols.get(name).ok_or_else(|| {
                ScratchError::config(format!("Weights for {label} reference unknown symbol '{name}'"))
            })?;
            if symbol.kind != kind {
                return Err(ScratchError::config(format!(
                    "Weights for {label} reference '{name}' which is not a {kind:?} symbol"
                )));
            }
            if weight == 0 {
                return Err(ScratchError::config(format!(
                    "Weights for {label} give '{name}' a zero weight"
                )));
            }
            total += u64::from(weight);
        }

        if total > u64::from(u32::MAX) {
            return Err(ScratchError::config(format!("Total weight for {label} overflows")));
        }

        Ok(())
    }

    fn validate_combinations(&self) -> ScratchResult<()> {
        if self.win_combinations.is_empty() {
            return Err(ScratchError::config("No win combinations configured"));
        }

        for (name, combination) in &self.win_combinations {
            if combination.reward_multiplier.is_sign_negative() {
                return Err(ScratchError::config(format!(
                    "Combination '{name}' has a negative reward multiplier"
                )));
            }

            match &combination.trigger {
                Trigger::SameSymbols { count } => {
                    if *count == 0 {
                        return Err(ScratchError::config(format!(
                            "Combination '{name}' requires a count of at least 1"
                        )));
                    }
                }
                Trigger::LinearSymbols { covered_areas } => {
                    if covered_areas.is_empty() {
                        return Err(ScratchError::config(format!(
                            "Combination '{name}' has no covered areas"
                        )));
                    }
                    for area in covered_areas {
                        if area.is_empty() {
                            return Err(ScratchError::config(format!(
                                "Combination '{name}' has an empty covered area"
                            )));
                        }
                        if let Some(pos) = area.iter().find(|p| !self.contains(**p)) {
                            return Err(ScratchError::config(format!(
                                "Combination '{name}' covers {pos} which is outside the grid"
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Shared fixture for unit tests across the crate
#[cfg(test)]
pub(crate) fn test_config() -> GameConfig {
    serde_json::from_str(include_str!("../tests/fixtures/config.json"))
        .expect("fixture config parses")
}
