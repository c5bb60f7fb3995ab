//! Scratch Engine — round orchestration
//!
//! A round moves linearly through three phases:
//!
//! ```text
//! GridReady ──► CombinationsEvaluated ──► RewardFinalized
//!  (generated      (same-symbol +           (base reward,
//!   or supplied)    linear passes)           bonus if base > 0)
//! ```

use rand::Rng;
use rust_decimal::Decimal;

use crate::bonus::BonusResolver;
use crate::combinations::CombinationEvaluator;
use crate::config::GameConfig;
use crate::error::{ScratchError, ScratchResult};
use crate::matrix::{bonus_probability, Grid, MatrixGenerator, BONUS_PLACEMENT_PROBABILITY};
use crate::result::RoundResult;
use crate::reward::RewardCalculator;

/// Phases of a round, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    GridReady,
    CombinationsEvaluated,
    RewardFinalized,
}

/// Scratch Engine
///
/// Borrows a validated configuration; holds no per-round state, so one engine
/// can serve any number of rounds and can be shared across threads. Randomness
/// comes from the generator passed to [`ScratchEngine::play`].
#[derive(Debug, Clone, Copy)]
pub struct ScratchEngine<'a> {
    config: &'a GameConfig,
    bonus_probability: f64,
}

impl<'a> ScratchEngine<'a> {
    /// Validate the configuration and create an engine over it
    pub fn new(config: &'a GameConfig) -> ScratchResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            bonus_probability: BONUS_PLACEMENT_PROBABILITY,
        })
    }

    /// Override the bonus placement chance used for generated grids
    pub fn with_bonus_probability(mut self, probability: f64) -> Self {
        self.bonus_probability = bonus_probability(probability);
        self
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUND EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Generate a grid and evaluate it
    pub fn play<R: Rng>(&self, rng: &mut R, bet: Decimal) -> ScratchResult<RoundResult> {
        check_bet(bet)?;
        let grid = MatrixGenerator::new(self.config)
            .with_bonus_probability(self.bonus_probability)
            .generate(rng)?;
        self.evaluate(bet, grid)
    }

    /// Evaluate a caller-supplied grid
    pub fn play_with_grid(&self, bet: Decimal, grid: Grid) -> ScratchResult<RoundResult> {
        check_bet(bet)?;
        grid.check_dimensions(self.config)?;
        self.evaluate(bet, grid)
    }

    fn evaluate(&self, bet: Decimal, grid: Grid) -> ScratchResult<RoundResult> {
        trace_phase(RoundPhase::GridReady);

        let wins = CombinationEvaluator::new(self.config).evaluate(&grid)?;
        trace_phase(RoundPhase::CombinationsEvaluated);

        let base = RewardCalculator::new(self.config).calculate(bet, &wins)?;
        let bonus = BonusResolver::new(self.config).resolve(&grid, base)?;
        trace_phase(RoundPhase::RewardFinalized);

        log::debug!(
            "Round settled: bet {bet}, base {base}, final {}, bonus {:?}",
            bonus.reward,
            bonus.applied
        );

        Ok(RoundResult {
            matrix: grid,
            reward: bonus.reward,
            applied_winning_combinations: wins,
            applied_bonus_symbol: bonus.applied,
        })
    }
}

fn trace_phase(phase: RoundPhase) {
    log::debug!("Round phase: {phase:?}");
}

fn check_bet(bet: Decimal) -> ScratchResult<()> {
    if bet.is_sign_negative() && !bet.is_zero() {
        return Err(ScratchError::input(format!("Bet amount must not be negative, got {bet}")));
    }
    Ok(())
}

/// Generate and evaluate one round
pub fn evaluate_round<R: Rng>(config: &GameConfig, bet: Decimal, rng: &mut R) -> ScratchResult<RoundResult> {
    ScratchEngine::new(config)?.play(rng, bet)
}

/// Evaluate one round on a supplied grid
pub fn evaluate_grid(config: &GameConfig, bet: Decimal, grid: Grid) -> ScratchResult<RoundResult> {
    ScratchEngine::new(config)?.play_with_grid(bet, grid)
}
