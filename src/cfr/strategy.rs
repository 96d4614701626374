//! Mixed strategies over the three RPS actions.
//!
//! A [`Strategy`] is a validated probability vector. Every strategy handed to
//! the trainers from outside goes through [`Strategy::new`] or
//! [`Strategy::normalized`], so malformed distributions are rejected before
//! they can skew training.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::rps::{Action, NUM_ACTIONS};

/// Allowed deviation of a probability vector's total from 1.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// A probability distribution over Rock, Paper and Scissors.
///
/// Entries are indexed by [`Action::index`], are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; NUM_ACTIONS]", into = "[f64; NUM_ACTIONS]")]
pub struct Strategy([f64; NUM_ACTIONS]);

impl Strategy {
    /// Validate a probability vector.
    ///
    /// # Errors
    /// Rejects non-finite or negative entries and totals further than
    /// [`SUM_TOLERANCE`] from 1.
    pub fn new(probs: [f64; NUM_ACTIONS]) -> Result<Self, StrategyError> {
        let total = check_entries(&probs)?;
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(StrategyError::BadSum(total));
        }
        Ok(Self(probs))
    }

    /// Build a strategy from non-negative weights by dividing by their total.
    ///
    /// Weights are scaled by their maximum first, so the total stays finite
    /// even when the raw sum would overflow.
    ///
    /// # Errors
    /// Rejects non-finite or negative weights and an all-zero vector.
    pub fn normalized(weights: [f64; NUM_ACTIONS]) -> Result<Self, StrategyError> {
        check_entries(&weights)?;
        let max = weights.iter().copied().fold(0.0, f64::max);
        if max <= 0.0 {
            return Err(StrategyError::ZeroTotal);
        }
        let scaled = weights.map(|w| w / max);
        let total: f64 = scaled.iter().sum();
        Ok(Self(scaled.map(|w| w / total)))
    }

    /// Equal probability for every action.
    pub fn uniform() -> Self {
        Self([1.0 / NUM_ACTIONS as f64; NUM_ACTIONS])
    }

    /// Always play `action`.
    pub fn pure(action: Action) -> Self {
        let mut probs = [0.0; NUM_ACTIONS];
        probs[action.index()] = 1.0;
        Self(probs)
    }

    /// Wrap a vector the caller has already normalised.
    pub(crate) fn from_raw(probs: [f64; NUM_ACTIONS]) -> Self {
        debug_assert!(probs.iter().all(|&p| p >= 0.0));
        Self(probs)
    }

    /// Probability assigned to `action`.
    pub fn probability(&self, action: Action) -> f64 {
        self.0[action.index()]
    }

    /// Underlying probability vector.
    pub fn as_array(&self) -> &[f64; NUM_ACTIONS] {
        &self.0
    }

    /// Sum of all entries (1 within floating tolerance).
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Largest absolute per-entry difference to `other`.
    pub fn max_deviation(&self, other: &Strategy) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::uniform()
    }
}

impl TryFrom<[f64; NUM_ACTIONS]> for Strategy {
    type Error = StrategyError;

    fn try_from(probs: [f64; NUM_ACTIONS]) -> Result<Self, Self::Error> {
        Self::new(probs)
    }
}

impl From<Strategy> for [f64; NUM_ACTIONS] {
    fn from(strategy: Strategy) -> Self {
        strategy.0
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rock={:.4}, Paper={:.4}, Scissors={:.4}",
            self.0[0], self.0[1], self.0[2]
        )
    }
}

fn check_entries(values: &[f64; NUM_ACTIONS]) -> Result<f64, StrategyError> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(StrategyError::NonFinite { index });
        }
        if value < 0.0 {
            return Err(StrategyError::Negative { index, value });
        }
    }
    Ok(values.iter().sum())
}

/// Errors raised when a vector is not a valid mixed strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyError {
    /// An entry is NaN or infinite.
    NonFinite {
        /// Offending action index.
        index: usize,
    },
    /// An entry is below zero.
    Negative {
        /// Offending action index.
        index: usize,
        /// The negative value.
        value: f64,
    },
    /// Entries do not sum to 1.
    BadSum(f64),
    /// Weights are all zero and cannot be normalised.
    ZeroTotal,
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyError::NonFinite { index } => {
                write!(f, "probability for action {} is not finite", index)
            }
            StrategyError::Negative { index, value } => {
                write!(f, "probability {} for action {} is negative", value, index)
            }
            StrategyError::BadSum(total) => {
                write!(f, "probabilities sum to {} instead of 1", total)
            }
            StrategyError::ZeroTotal => write!(f, "weights sum to zero"),
        }
    }
}

impl std::error::Error for StrategyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_distribution() {
        let strategy = Strategy::new([0.4, 0.3, 0.3]).unwrap();
        assert_eq!(strategy.probability(Action::Rock), 0.4);
        assert!((strategy.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_malformed_distributions() {
        assert_eq!(
            Strategy::new([0.5, -0.1, 0.6]),
            Err(StrategyError::Negative { index: 1, value: -0.1 })
        );
        assert_eq!(
            Strategy::new([0.5, f64::NAN, 0.5]),
            Err(StrategyError::NonFinite { index: 1 })
        );
        assert!(matches!(
            Strategy::new([0.5, 0.5, 0.5]),
            Err(StrategyError::BadSum(_))
        ));
    }

    #[test]
    fn test_normalized() {
        let strategy = Strategy::normalized([2.0, 1.0, 1.0]).unwrap();
        assert_eq!(strategy.as_array(), &[0.5, 0.25, 0.25]);

        assert_eq!(
            Strategy::normalized([0.0, 0.0, 0.0]),
            Err(StrategyError::ZeroTotal)
        );
    }

    #[test]
    fn test_normalized_huge_weights() {
        // The raw sum overflows to infinity
        let strategy = Strategy::normalized([f64::MAX, f64::MAX, 0.0]).unwrap();
        assert_eq!(strategy.as_array(), &[0.5, 0.5, 0.0]);
        assert!((strategy.total() - 1.0).abs() < 1e-12);

        let strategy = Strategy::normalized([f64::MAX; 3]).unwrap();
        assert_eq!(strategy, Strategy::uniform());
    }

    #[test]
    fn test_uniform_and_pure() {
        assert_eq!(Strategy::uniform().as_array(), &[1.0 / 3.0; 3]);
        assert_eq!(Strategy::pure(Action::Paper).as_array(), &[0.0, 1.0, 0.0]);
        assert_eq!(Strategy::default(), Strategy::uniform());
    }

    #[test]
    fn test_max_deviation() {
        let a = Strategy::new([0.5, 0.25, 0.25]).unwrap();
        let b = Strategy::new([0.25, 0.5, 0.25]).unwrap();
        assert!((a.max_deviation(&b) - 0.25).abs() < 1e-12);
        assert_eq!(a.max_deviation(&a), 0.0);
    }

    #[test]
    fn test_serde_validates() {
        let strategy: Strategy = serde_json::from_str("[0.2, 0.4, 0.4]").unwrap();
        assert_eq!(strategy.as_array(), &[0.2, 0.4, 0.4]);
        assert_eq!(serde_json::to_string(&strategy).unwrap(), "[0.2,0.4,0.4]");

        assert!(serde_json::from_str::<Strategy>("[0.9, 0.4, 0.4]").is_err());
    }
}
