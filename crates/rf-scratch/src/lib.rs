//! # rf-scratch — Scratch-Card Round Engine
//!
//! Evaluates single rounds of a scratch-card game from a declarative
//! configuration: weighted per-cell symbol generation, combination matching,
//! exact-decimal reward accumulation and a single bonus modifier.
//!
//! ## Architecture
//!
//! ```text
//! ScratchEngine
//!     │
//!     ├── MatrixGenerator ── WeightedSampler (per-cell + bonus weights)
//!     ├── CombinationEvaluator (same_symbols, linear_symbols)
//!     ├── RewardCalculator (bet × symbol × Π combinations)
//!     └── BonusResolver (multiply_reward, extra_bonus, miss)
//!           │
//!           v
//!     RoundResult
//! ```
//!
//! Randomness is always supplied by the caller, so seeded generators give
//! reproducible rounds and a shared configuration is safe across threads.

pub mod bonus;
pub mod combinations;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod matrix;
pub mod result;
pub mod reward;
pub mod sampler;
pub mod symbols;

pub use bonus::*;
pub use combinations::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use loader::*;
pub use matrix::*;
pub use result::*;
pub use reward::*;
pub use sampler::*;
pub use symbols::*;
