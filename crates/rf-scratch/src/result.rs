//! Round result

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::combinations::WinningCombinations;
use crate::matrix::Grid;

/// Complete outcome of one evaluated round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Grid the round was evaluated on
    pub matrix: Grid,
    /// Final reward, bonus included
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub reward: Decimal,
    /// Matched combinations per standard symbol
    pub applied_winning_combinations: WinningCombinations,
    /// Bonus symbol that modified the reward
    pub applied_bonus_symbol: Option<String>,
}

impl RoundResult {
    /// Check if this round pays anything
    pub fn is_win(&self) -> bool {
        self.reward > Decimal::ZERO
    }

    /// Pretty JSON, the CLI output format
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
