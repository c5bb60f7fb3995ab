//! Reward calculation

use rust_decimal::Decimal;

use crate::combinations::WinningCombinations;
use crate::config::GameConfig;
use crate::error::{ScratchError, ScratchResult};

/// Converts matched combinations into a base reward
pub struct RewardCalculator<'a> {
    config: &'a GameConfig,
}

impl<'a> RewardCalculator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Sum over symbols of `bet × symbol multiplier × Π combination multipliers`
    pub fn calculate(&self, bet: Decimal, wins: &WinningCombinations) -> ScratchResult<Decimal> {
        let mut total = Decimal::ZERO;

        for (name, combinations) in wins.iter() {
            let symbol = self.config.symbols.get(name).ok_or_else(|| {
                ScratchError::config(format!("Winning symbol '{name}' is not in the symbol table"))
            })?;

            let mut reward = checked_mul(bet, symbol.multiplier())?;
            for combination in combinations {
                let multiplier = self
                    .config
                    .combination(combination)
                    .ok_or_else(|| {
                        ScratchError::config(format!("Unknown win combination '{combination}'"))
                    })?
                    .reward_multiplier;
                reward = checked_mul(reward, multiplier)?;
            }

            log::debug!("Symbol {name} pays {reward} via {combinations:?}");
            total = total
                .checked_add(reward)
                .ok_or_else(|| ScratchError::input("Reward overflows"))?;
        }

        Ok(total)
    }
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal) -> ScratchResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| ScratchError::input("Reward overflows"))
}
