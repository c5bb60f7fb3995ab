//! Symbol definitions and the symbol table

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ScratchError, ScratchResult};

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Takes part in combination matching
    Standard,
    /// Modifies the reward of a winning round
    Bonus,
}

/// What a bonus symbol does to a positive base reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusImpact {
    /// base × reward_multiplier
    MultiplyReward,
    /// base + extra
    ExtraBonus,
    /// No effect, never reported as applied
    Miss,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol type
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    /// Pay multiplier (standard symbols, `multiply_reward` bonuses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_multiplier: Option<Decimal>,
    /// Bonus effect (bonus symbols only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<BonusImpact>,
    /// Flat amount added by `extra_bonus`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Decimal>,
}

impl Symbol {
    /// Create a standard symbol
    pub fn standard(reward_multiplier: Decimal) -> Self {
        Self {
            kind: SymbolKind::Standard,
            reward_multiplier: Some(reward_multiplier),
            impact: None,
            extra: None,
        }
    }

    /// Create a `multiply_reward` bonus symbol
    pub fn multiplier_bonus(reward_multiplier: Decimal) -> Self {
        Self {
            kind: SymbolKind::Bonus,
            reward_multiplier: Some(reward_multiplier),
            impact: Some(BonusImpact::MultiplyReward),
            extra: None,
        }
    }

    /// Create an `extra_bonus` symbol
    pub fn extra_bonus(extra: Decimal) -> Self {
        Self {
            kind: SymbolKind::Bonus,
            reward_multiplier: None,
            impact: Some(BonusImpact::ExtraBonus),
            extra: Some(extra),
        }
    }

    /// Create the no-effect bonus symbol
    pub fn miss() -> Self {
        Self {
            kind: SymbolKind::Bonus,
            reward_multiplier: None,
            impact: Some(BonusImpact::Miss),
            extra: None,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.kind == SymbolKind::Standard
    }

    pub fn is_bonus(&self) -> bool {
        self.kind == SymbolKind::Bonus
    }

    /// Pay multiplier, `1` when not declared
    pub fn multiplier(&self) -> Decimal {
        self.reward_multiplier.unwrap_or(Decimal::ONE)
    }

    /// Flat bonus amount, `0` when not declared
    pub fn extra_amount(&self) -> Decimal {
        self.extra.unwrap_or(Decimal::ZERO)
    }

    /// Check the fields required by this symbol's kind and impact
    pub fn validate(&self, name: &str) -> ScratchResult<()> {
        if self.reward_multiplier.is_some_and(|m| m.is_sign_negative()) {
            return Err(ScratchError::config(format!(
                "Symbol '{name}' has a negative reward multiplier"
            )));
        }

        match (self.kind, self.impact) {
            (SymbolKind::Standard, None) => {
                if self.reward_multiplier.is_none() {
                    return Err(ScratchError::config(format!(
                        "Standard symbol '{name}' is missing reward_multiplier"
                    )));
                }
            }
            (SymbolKind::Standard, Some(_)) => {
                return Err(ScratchError::config(format!(
                    "Standard symbol '{name}' cannot declare an impact"
                )));
            }
            (SymbolKind::Bonus, None) => {
                return Err(ScratchError::config(format!(
                    "Bonus symbol '{name}' is missing impact"
                )));
            }
            (SymbolKind::Bonus, Some(BonusImpact::MultiplyReward)) => {
                if self.reward_multiplier.is_none() {
                    return Err(ScratchError::config(format!(
                        "Bonus symbol '{name}' multiplies the reward but has no reward_multiplier"
                    )));
                }
            }
            (SymbolKind::Bonus, Some(BonusImpact::ExtraBonus)) => match self.extra {
                None => {
                    return Err(ScratchError::config(format!(
                        "Bonus symbol '{name}' adds an extra bonus but has no extra amount"
                    )));
                }
                Some(extra) if extra.is_sign_negative() => {
                    return Err(ScratchError::config(format!(
                        "Bonus symbol '{name}' has a negative extra amount"
                    )));
                }
                Some(_) => {}
            },
            (SymbolKind::Bonus, Some(BonusImpact::Miss)) => {}
        }

        Ok(())
    }
}

/// All symbols of a game, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a symbol
    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) {
        self.symbols.insert(name.into(), symbol);
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, symbol: Symbol) -> Self {
        self.insert(name, symbol);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Resolve the symbol found in a grid cell
    pub fn resolve(&self, name: &str, row: usize, column: usize) -> ScratchResult<&Symbol> {
        self.get(name).ok_or_else(|| ScratchError::InvalidSymbol {
            symbol: name.to_string(),
            row,
            column,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Names of all standard symbols, in declaration order
    pub fn standard_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, s)| s.is_standard())
            .map(|(name, _)| name)
            .collect()
    }

    /// Names of all bonus symbols, in declaration order
    pub fn bonus_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, s)| s.is_bonus())
            .map(|(name, _)| name)
            .collect()
    }
}
