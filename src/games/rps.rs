//! Rock-Paper-Scissors rules.
//!
//! RPS is the smallest interesting zero-sum game: every action beats exactly
//! one other action and loses to the remaining one, so the payoff structure
//! is a 3-cycle.
//!
//! ## Payoff Cycle
//!
//! ```text
//!        Rock
//!       ↗    ↘
//!  Paper ←─── Scissors
//! ```
//!
//! An arrow `a → b` reads "a beats b". Index arithmetic follows the cycle:
//! the action at `(i + 1) mod 3` beats the action at `i`.
//!
//! ## Known Nash Equilibrium
//!
//! - Both players: Rock = Paper = Scissors = 1/3
//! - **Expected Value**: 0 for both players

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cfr::strategy::Strategy;

/// Number of actions available to each player.
pub const NUM_ACTIONS: usize = 3;

/// Actions in Rock-Paper-Scissors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Beats Scissors, loses to Paper.
    Rock = 0,
    /// Beats Rock, loses to Scissors.
    Paper = 1,
    /// Beats Paper, loses to Rock.
    Scissors = 2,
}

impl Action {
    /// All actions in index order.
    pub const ALL: [Action; NUM_ACTIONS] = [Action::Rock, Action::Paper, Action::Scissors];

    /// Position of this action in regret and strategy vectors.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Action stored at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The action this one defeats.
    pub fn beats(self) -> Action {
        Self::ALL[(self.index() + NUM_ACTIONS - 1) % NUM_ACTIONS]
    }

    /// The action that defeats this one.
    pub fn beaten_by(self) -> Action {
        Self::ALL[(self.index() + 1) % NUM_ACTIONS]
    }

    /// Short label used in compact output.
    pub fn symbol(self) -> char {
        match self {
            Action::Rock => 'R',
            Action::Paper => 'P',
            Action::Scissors => 'S',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Rock => write!(f, "Rock"),
            Action::Paper => write!(f, "Paper"),
            Action::Scissors => write!(f, "Scissors"),
        }
    }
}

/// Payoff to the player choosing `mine` when the opponent chooses `theirs`.
pub fn payoff(mine: Action, theirs: Action) -> f64 {
    if mine == theirs {
        0.0
    } else if mine == theirs.beaten_by() {
        1.0
    } else {
        -1.0
    }
}

/// Utility of every action against the opponent's realized action.
///
/// `u[opponent] = 0`, the action beating it scores `+1` and the action it
/// beats scores `-1`.
pub fn utility_vector(opponent: Action) -> [f64; NUM_ACTIONS] {
    let mut utility = [0.0; NUM_ACTIONS];
    utility[opponent.beaten_by().index()] = 1.0;
    utility[opponent.beats().index()] = -1.0;
    utility
}

/// Expected payoff of playing `action` against a mixed strategy.
pub fn expected_utility(action: Action, opponent: &Strategy) -> f64 {
    Action::ALL
        .iter()
        .map(|&theirs| opponent.probability(theirs) * payoff(action, theirs))
        .sum()
}

/// Pure best response to a mixed strategy. Ties go to the lowest index.
pub fn best_response(opponent: &Strategy) -> Action {
    let mut best = Action::Rock;
    let mut best_value = expected_utility(best, opponent);
    for &action in &Action::ALL[1..] {
        let value = expected_utility(action, opponent);
        if value > best_value {
            best = action;
            best_value = value;
        }
    }
    best
}

/// Value a best-responding opponent gains against `strategy`.
///
/// Always non-negative, and exactly zero only at the uniform equilibrium.
pub fn exploitability(strategy: &Strategy) -> f64 {
    expected_utility(best_response(strategy), strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_relations() {
        assert_eq!(Action::Rock.beats(), Action::Scissors);
        assert_eq!(Action::Paper.beats(), Action::Rock);
        assert_eq!(Action::Scissors.beats(), Action::Paper);

        for action in Action::ALL {
            assert_eq!(action.beats().beaten_by(), action);
            assert_ne!(action.beats(), action.beaten_by());
        }
    }

    #[test]
    fn test_index_round_trip() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(3), None);
    }

    #[test]
    fn test_payoffs_are_zero_sum() {
        for mine in Action::ALL {
            for theirs in Action::ALL {
                assert_eq!(payoff(mine, theirs), -payoff(theirs, mine));
            }
        }
        assert_eq!(payoff(Action::Paper, Action::Rock), 1.0);
        assert_eq!(payoff(Action::Rock, Action::Paper), -1.0);
        assert_eq!(payoff(Action::Scissors, Action::Scissors), 0.0);
    }

    #[test]
    fn test_utility_vector() {
        assert_eq!(utility_vector(Action::Rock), [0.0, 1.0, -1.0]);
        assert_eq!(utility_vector(Action::Paper), [-1.0, 0.0, 1.0]);
        assert_eq!(utility_vector(Action::Scissors), [1.0, -1.0, 0.0]);

        // Each entry agrees with the pairwise payoff
        for theirs in Action::ALL {
            let utility = utility_vector(theirs);
            for mine in Action::ALL {
                assert_eq!(utility[mine.index()], payoff(mine, theirs));
            }
        }
    }

    #[test]
    fn test_best_response() {
        let rock_heavy = Strategy::new([0.4, 0.3, 0.3]).unwrap();
        assert_eq!(best_response(&rock_heavy), Action::Paper);

        let scissors_heavy = Strategy::new([0.2, 0.2, 0.6]).unwrap();
        assert_eq!(best_response(&scissors_heavy), Action::Rock);

        let value = expected_utility(Action::Paper, &rock_heavy);
        assert!((value - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_exploitability() {
        assert!(exploitability(&Strategy::uniform()).abs() < 1e-12);

        let pure_rock = Strategy::new([1.0, 0.0, 0.0]).unwrap();
        assert!((exploitability(&pure_rock) - 1.0).abs() < 1e-12);

        let skewed = Strategy::new([0.6, 0.1, 0.3]).unwrap();
        assert!(exploitability(&skewed) > 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Rock.to_string(), "Rock");
        assert_eq!(Action::Scissors.symbol(), 'S');
    }
}
