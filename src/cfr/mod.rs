//! Counterfactual Regret Minimization for Rock-Paper-Scissors.
//!
//! This module provides the regret-matching training loop in two modes:
//! a single agent learning against a fixed opponent distribution, and two
//! agents learning against each other in self-play.
//!
//! # Overview
//!
//! Every iteration:
//! 1. Derive a mixed strategy from positive accumulated regret
//! 2. Sample an action for each side
//! 3. Build the utility vector from the opponent's realized action
//! 4. Add the counterfactual regret of every alternative action
//!
//! After many iterations the time-averaged strategy is the output: a best
//! response against a fixed opponent, the uniform Nash equilibrium in
//! self-play.
//!
//! # Example
//!
//! ```
//! use rps_cfr::cfr::{RegretMatchingAgent, Strategy};
//!
//! let opponent = Strategy::new([0.4, 0.3, 0.3]).unwrap();
//! let mut agent = RegretMatchingAgent::new(opponent, Some(42));
//!
//! let stats = agent.train(100_000);
//! println!("Trained {} iterations in {:.2}s", stats.iterations, stats.elapsed_seconds);
//!
//! // Paper beats the opponent's favourite action
//! let strategy = agent.average_strategy();
//! assert!(strategy.as_array()[1] > 0.9);
//! ```
//!
//! # Theory
//!
//! **Regret**: how much better an action would have done than the one played.
//! ```text
//! Regret(a) += Utility(a) - Utility(played)
//! ```
//!
//! **Regret Matching**: play proportionally to positive regret.
//! ```text
//! Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
//! ```
//!
//! **Convergence**: average regret decreases as O(1/sqrt(T)), and in a
//! two-player zero-sum game the average strategies converge to equilibrium.
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Neller, T., Lanctot, M. "An Introduction to Counterfactual Regret Minimization" (2013)

pub mod agent;
pub mod config;
pub mod parallel;
pub mod simulator;
pub mod strategy;

// Re-export main types for convenient access
pub use agent::RegretMatchingAgent;
pub use config::{ConfigError, RegretUpdate, Scenario, ScenarioFile, TrainerConfig, TrainingStats};
pub use parallel::{self_play_independent, train_independent};
pub use simulator::SelfPlaySimulator;
pub use strategy::{Strategy, StrategyError};
