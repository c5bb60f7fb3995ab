//! Round Scenario Test Suite
//!
//! End-to-end rounds against the fixture configuration:
//! - Fixed-grid payouts with and without bonuses
//! - Losing rounds and bonus suppression
//! - Unknown symbols and malformed input
//! - Seeded generation and idempotent evaluation

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rf_scratch::{ConfigLoader, GameConfig, Grid, RoundResult, ScratchEngine, ScratchError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/config.json")
}

fn load_config() -> GameConfig {
    ConfigLoader::new().load(fixture_path()).unwrap()
}

fn play(rows: &[[&str; 3]], bet: Decimal) -> Result<RoundResult, ScratchError> {
    let config = load_config();
    let engine = ScratchEngine::new(&config)?;
    engine.play_with_grid(bet, Grid::from_strs(rows)?)
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIXED GRIDS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_multiple_combinations_with_extra_bonus() {
    let result = play(&[["A", "A", "B"], ["A", "+1000", "B"], ["A", "A", "B"]], dec!(100)).unwrap();

    assert_eq!(result.reward, dec!(3600));
    assert_eq!(result.applied_bonus_symbol.as_deref(), Some("+1000"));

    let wins = &result.applied_winning_combinations;
    assert!(wins.contains("A", "same_symbol_5_times"));
    assert!(wins.contains("A", "same_symbols_vertically"));
    assert!(wins.contains("B", "same_symbol_3_times"));
    assert!(wins.contains("B", "same_symbols_vertically"));
}

#[test]
fn test_ten_times_multiplier_bonus() {
    let result = play(&[["A", "B", "C"], ["E", "B", "10x"], ["F", "D", "B"]], dec!(100)).unwrap();

    assert_eq!(result.reward, dec!(3000));
    assert_eq!(result.applied_bonus_symbol.as_deref(), Some("10x"));
    assert_eq!(
        result.applied_winning_combinations.get("B"),
        Some(&["same_symbol_3_times".to_string()][..])
    );
}

#[test]
fn test_lost_game_returns_zero() {
    let result = play(&[["A", "B", "C"], ["E", "B", "5x"], ["F", "D", "C"]], dec!(100)).unwrap();

    assert_eq!(result.reward, Decimal::ZERO);
    assert!(result.applied_bonus_symbol.is_none());
    assert!(result.applied_winning_combinations.is_empty());
}

#[test]
fn test_miss_bonus_leaves_reward() {
    let result = play(&[["D", "D", "D"], ["E", "MISS", "F"], ["A", "B", "C"]], dec!(10)).unwrap();

    // D: 10 × 2 × (3 times: 1) × (horizontal: 2)
    assert_eq!(result.reward, dec!(40));
    assert!(result.applied_bonus_symbol.is_none());
}

#[test]
fn test_fractional_bet_is_exact() {
    let result = play(&[["E", "E", "E"], ["E", "A", "B"], ["C", "D", "+500"]], dec!(0.3)).unwrap();

    // E: 0.3 × 1.2 × (4 times: 1.5) × (horizontal: 2) = 1.08, then +500
    assert_eq!(result.reward, dec!(501.08));
    assert_eq!(result.applied_bonus_symbol.as_deref(), Some("+500"));
}

#[test]
fn test_large_reward_survives_json() {
    let result = play(&[["B", "A", "C"], ["E", "B", "D"], ["F", "D", "B"]], dec!(1234567890.123456789)).unwrap();

    // B: bet × 3 × (3 times: 1) × (diagonal: 5)
    assert_eq!(result.reward, dec!(18518518351.851851835));
    assert!(result.applied_winning_combinations.contains("B", "same_symbols_diagonally_left_to_right"));

    let json = result.to_json_pretty().unwrap();
    assert!(json.contains("18518518351.851851835"));

    let parsed: RoundResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.reward, result.reward);
    assert_eq!(parsed, result);
}

#[test]
fn test_full_grid_of_one_symbol() {
    let result = play(&[["F", "F", "F"], ["F", "F", "F"], ["F", "F", "F"]], dec!(1)).unwrap();

    // 9 times: 20, three rows, three columns, two diagonals
    // 1 × 1 × 20 × 2³ × 2³ × 5 × 5
    assert_eq!(result.reward, dec!(32000));
    assert_eq!(result.applied_winning_combinations.get("F").map(<[String]>::len), Some(9));
}

// ═══════════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_invalid_symbol_fails() {
    let result = play(&[["A", "Z", "C"], ["E", "B", "F"], ["F", "D", "C"]], dec!(100));
    assert!(matches!(result, Err(ScratchError::InvalidSymbol { .. })));
}

#[test]
fn test_invalid_symbol_on_losing_grid_still_fails() {
    let result = play(&[["A", "B", "C"], ["E", "D", "F"], ["F", "D", "??"]], dec!(100));
    assert!(matches!(result, Err(ScratchError::InvalidSymbol { row: 2, column: 2, .. })));
}

#[test]
fn test_wrong_grid_size_fails() {
    let config = load_config();
    let engine = ScratchEngine::new(&config).unwrap();
    let grid = Grid::from_strs(&[["A", "A", "A", "A"]]).unwrap();
    assert!(matches!(
        engine.play_with_grid(dec!(1), grid),
        Err(ScratchError::InvalidInput(_))
    ));
}

#[test]
fn test_negative_bet_fails() {
    let result = play(&[["A", "A", "A"], ["B", "C", "D"], ["E", "F", "B"]], dec!(-5));
    assert!(matches!(result, Err(ScratchError::InvalidInput(_))));
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETERMINISM
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_fixed_grid_is_idempotent() {
    let rows = [["A", "A", "B"], ["A", "+1000", "B"], ["A", "A", "B"]];
    let first = play(&rows, dec!(100)).unwrap();
    let second = play(&rows, dec!(100)).unwrap();

    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
}

#[test]
fn test_seeded_rounds_reproducible() {
    let config = load_config();
    let engine = ScratchEngine::new(&config).unwrap();

    let run = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..25)
            .map(|_| engine.play(&mut rng, dec!(50)).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_zero_reward_rounds_carry_no_bonus() {
    let config = load_config();
    let engine = ScratchEngine::new(&config).unwrap().with_bonus_probability(1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..300 {
        let result = engine.play(&mut rng, dec!(25)).unwrap();
        if result.reward.is_zero() {
            assert!(result.applied_bonus_symbol.is_none());
        }
    }
}

#[test]
fn test_config_shared_across_threads() {
    let config = load_config();
    let engine = ScratchEngine::new(&config).unwrap();

    std::thread::scope(|scope| {
        for seed in 0..4u64 {
            scope.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                for _ in 0..100 {
                    assert!(engine.play(&mut rng, dec!(1)).is_ok());
                }
            });
        }
    });
}
