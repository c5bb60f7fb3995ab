//! Win combination matching

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, Position};
use crate::error::ScratchResult;
use crate::matrix::Grid;

/// Standard symbol → names of the combinations it matched
///
/// Keys are sorted so serialized output is stable; each list keeps match order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinningCombinations {
    by_symbol: BTreeMap<String, Vec<String>>,
}

impl WinningCombinations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a matched combination for a symbol
    pub fn add(&mut self, symbol: &str, combination: &str) {
        self.by_symbol
            .entry(symbol.to_string())
            .or_default()
            .push(combination.to_string());
    }

    /// Combinations matched by one symbol
    pub fn get(&self, symbol: &str) -> Option<&[String]> {
        self.by_symbol.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str, combination: &str) -> bool {
        self.get(symbol)
            .is_some_and(|names| names.iter().any(|n| n == combination))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_symbol
            .iter()
            .map(|(symbol, names)| (symbol.as_str(), names.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Number of symbols with at least one match
    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }
}

/// Finds the combinations a grid satisfies
pub struct CombinationEvaluator<'a> {
    config: &'a GameConfig,
}

impl<'a> CombinationEvaluator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Run the same-symbol and linear passes over a grid
    ///
    /// Fails with `InvalidSymbol` if any cell names an unknown symbol.
    pub fn evaluate(&self, grid: &Grid) -> ScratchResult<WinningCombinations> {
        let counts = self.count_standard_symbols(grid)?;

        let mut wins = WinningCombinations::new();
        self.check_same_symbols(&counts, &mut wins);
        self.check_linear_symbols(grid, &mut wins)?;

        Ok(wins)
    }

    /// Occurrences of each standard symbol, in first-seen order
    fn count_standard_symbols<'g>(&self, grid: &'g Grid) -> ScratchResult<IndexMap<&'g str, usize>> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();

        for (pos, name) in grid.cells() {
            let symbol = self.config.symbols.resolve(name, pos.row, pos.column)?;
            if !symbol.is_standard() {
                continue;
            }
            *counts.entry(name).or_default() += 1;
        }

        Ok(counts)
    }

    /// Best `same_symbols` match per symbol: the largest required count that
    /// the observed count reaches; the first declared wins a tie
    fn check_same_symbols(&self, counts: &IndexMap<&str, usize>, wins: &mut WinningCombinations) {
        for (&symbol, &count) in counts {
            let mut best: Option<(&str, usize)> = None;

            for (name, required) in self.config.same_symbol_combinations() {
                if required <= count && best.is_none_or(|(_, b)| required > b) {
                    best = Some((name, required));
                }
            }

            if let Some((name, _)) = best {
                wins.add(symbol, name);
            }
        }
    }

    /// One entry per covered area whose cells all hold the same standard symbol
    fn check_linear_symbols(&self, grid: &Grid, wins: &mut WinningCombinations) -> ScratchResult<()> {
        for (name, areas) in self.config.linear_combinations() {
            for area in areas {
                if let Some(symbol) = self.area_symbol(grid, area)? {
                    wins.add(symbol, name);
                }
            }
        }
        Ok(())
    }

    fn area_symbol<'g>(&self, grid: &'g Grid, area: &[Position]) -> ScratchResult<Option<&'g str>> {
        let Some(&first) = area.first() else {
            return Ok(None);
        };
        let Some(name) = grid.get(first) else {
            return Ok(None);
        };

        let symbol = self.config.symbols.resolve(name, first.row, first.column)?;
        if !symbol.is_standard() {
            return Ok(None);
        }

        let matched = area.iter().all(|&pos| grid.get(pos) == Some(name));
        Ok(matched.then_some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{test_config, WinCombination};
    use crate::error::ScratchError;
    use rust_decimal_macros::dec;

    fn evaluate(rows: &[[&str; 3]]) -> ScratchResult<WinningCombinations> {
        let config = test_config();
        let grid = Grid::from_strs(rows).unwrap();
        CombinationEvaluator::new(&config).evaluate(&grid)
    }

    #[test]
    fn test_best_same_symbol_match_only() {
        let wins = evaluate(&[["A", "B", "A"], ["A", "C", "A"], ["D", "A", "E"]]).unwrap();
        assert_eq!(wins.get("A"), Some(&["same_symbol_5_times".to_string()][..]));
        assert!(!wins.contains("A", "same_symbol_3_times"));
        assert!(wins.get("B").is_none());
    }

    #[test]
    fn test_standard_counts_skip_bonus_cells() {
        let config = test_config();
        let grid = Grid::from_strs(&[["C", "A", "C"], ["10x", "A", "C"], ["B", "A", "MISS"]]).unwrap();
        let counts = CombinationEvaluator::new(&config).count_standard_symbols(&grid).unwrap();

        assert_eq!(counts.iter().map(|(&s, &n)| (s, n)).collect::<Vec<_>>(), vec![
            ("C", 3),
            ("A", 3),
            ("B", 1)
        ]);
    }

    #[test]
    fn test_linear_and_same_combine() {
        let wins = evaluate(&[["A", "A", "B"], ["A", "+1000", "B"], ["A", "A", "B"]]).unwrap();
        assert!(wins.contains("A", "same_symbol_5_times"));
        assert!(wins.contains("A", "same_symbols_vertically"));
        assert!(wins.contains("B", "same_symbol_3_times"));
        assert!(wins.contains("B", "same_symbols_vertically"));
        assert_eq!(wins.len(), 2);
    }

    #[test]
    fn test_one_entry_per_matching_area() {
        let wins = evaluate(&[["F", "F", "F"], ["F", "F", "F"], ["C", "D", "E"]]).unwrap();
        let f = wins.get("F").unwrap();
        assert_eq!(f[0], "same_symbol_6_times");
        let horizontal = f.iter().filter(|n| *n == "same_symbols_horizontally").count();
        assert_eq!(horizontal, 2);
    }

    #[test]
    fn test_diagonals() {
        let wins = evaluate(&[["C", "A", "C"], ["B", "C", "D"], ["C", "E", "C"]]).unwrap();
        let c = wins.get("C").unwrap();
        assert_eq!(
            c,
            &[
                "same_symbol_5_times".to_string(),
                "same_symbols_diagonally_left_to_right".to_string(),
                "same_symbols_diagonally_right_to_left".to_string(),
            ][..]
        );
    }

    #[test]
    fn test_bonus_cells_break_lines() {
        let wins = evaluate(&[["10x", "A", "B"], ["10x", "C", "D"], ["10x", "E", "F"]]).unwrap();
        assert!(wins.is_empty());
    }

    #[test]
    fn test_no_match() {
        let wins = evaluate(&[["A", "B", "C"], ["E", "B", "5x"], ["F", "D", "C"]]).unwrap();
        assert!(wins.is_empty());
    }

    #[test]
    fn test_unknown_symbol_fails() {
        let result = evaluate(&[["A", "Z", "C"], ["E", "B", "F"], ["F", "D", "C"]]);
        assert!(matches!(
            result,
            Err(ScratchError::InvalidSymbol { ref symbol, row: 0, column: 1 }) if symbol == "Z"
        ));
    }

    #[test]
    fn test_tie_first_declared_wins() {
        let config = test_config()
            .with_combination("three_again", WinCombination::same_symbols(3, dec!(7)));
        let grid = Grid::from_strs(&[["B", "B", "B"], ["A", "C", "D"], ["E", "F", "A"]]).unwrap();
        let wins = CombinationEvaluator::new(&config).evaluate(&grid).unwrap();
        assert!(wins.contains("B", "same_symbol_3_times"));
        assert!(!wins.contains("B", "three_again"));
    }

    #[test]
    fn test_evaluation_deterministic() {
        let config = test_config();
        let grid = Grid::from_strs(&[["A", "A", "A"], ["B", "A", "B"], ["A", "B", "B"]]).unwrap();
        let evaluator = CombinationEvaluator::new(&config);
        assert_eq!(evaluator.evaluate(&grid).unwrap(), evaluator.evaluate(&grid).unwrap());
    }
}
