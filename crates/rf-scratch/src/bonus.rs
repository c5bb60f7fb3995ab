//! Bonus symbol resolution

use rust_decimal::Decimal;

use crate::config::GameConfig;
use crate::error::{ScratchError, ScratchResult};
use crate::matrix::Grid;
use crate::reward::checked_mul;
use crate::symbols::BonusImpact;

/// Outcome of applying a bonus to a base reward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusOutcome {
    /// Reward after the bonus
    pub reward: Decimal,
    /// Symbol to report as applied
    pub applied: Option<String>,
}

/// Locates and applies the bonus symbol of a grid
pub struct BonusResolver<'a> {
    config: &'a GameConfig,
}

impl<'a> BonusResolver<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// First bonus symbol in row-major order
    pub fn find<'g>(&self, grid: &'g Grid) -> Option<&'g str> {
        grid.cells()
            .map(|(_, name)| name)
            .find(|name| self.config.symbols.get(name).is_some_and(|s| s.is_bonus()))
    }

    /// Apply the grid's bonus to a base reward
    ///
    /// Losing rounds are returned untouched with no bonus reported.
    pub fn resolve(&self, grid: &Grid, base: Decimal) -> ScratchResult<BonusOutcome> {
        let untouched = BonusOutcome {
            reward: base,
            applied: None,
        };

        if base <= Decimal::ZERO {
            return Ok(untouched);
        }

        let Some(name) = self.find(grid) else {
            return Ok(untouched);
        };
        let symbol = self
            .config
            .symbols
            .get(name)
            .ok_or_else(|| ScratchError::config(format!("Bonus symbol '{name}' vanished")))?;

        let reward = match symbol.impact {
            Some(BonusImpact::MultiplyReward) => checked_mul(base, symbol.multiplier())?,
            Some(BonusImpact::ExtraBonus) => base
                .checked_add(symbol.extra_amount())
                .ok_or_else(|| ScratchError::input("Reward overflows"))?,
            Some(BonusImpact::Miss) => {
                log::debug!("Bonus {name} is a miss");
                return Ok(untouched);
            }
            None => {
                return Err(ScratchError::config(format!(
                    "Bonus symbol '{name}' is missing impact"
                )));
            }
        };

        log::debug!("Bonus {name} turns {base} into {reward}");
        Ok(BonusOutcome {
            reward,
            applied: Some(name.to_string()),
        })
    }
}
