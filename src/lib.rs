//! # RPS CFR
//!
//! Counterfactual Regret Minimization (CFR) for Rock-Paper-Scissors,
//! converging average strategies toward a best response (fixed opponent) or
//! the Nash equilibrium (self-play).
//!
//! ## Features
//!
//! - **Regret Matching Agent**: strategy derivation, sampling, regret and
//!   strategy-sum accumulation for one player
//! - **Self-Play Simulator**: two co-evolving agents
//! - **Seedable**: every agent owns its random source, runs are reproducible
//! - **Independent Runs**: many seeds trained in parallel with rayon
//! - **Exploitability**: measure how far a strategy is from equilibrium
//!
//! ## Quick Start
//!
//! ```
//! use rps_cfr::{SelfPlaySimulator, Strategy, TrainerConfig};
//!
//! let p1 = Strategy::new([0.6, 0.1, 0.3]).unwrap();
//! let p2 = Strategy::new([0.2, 0.4, 0.4]).unwrap();
//! let config = TrainerConfig::default().with_seed(7);
//!
//! let mut sim = SelfPlaySimulator::new(p1, p2, &config);
//! sim.run_iterations(50_000);
//!
//! let [avg1, avg2] = sim.get_average_strategies();
//! println!("player 1: {}\nplayer 2: {}", avg1, avg2);
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Regret-matching agent, self-play simulator and configuration
//! - [`games`]: Rock-Paper-Scissors rules and payoff helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              SelfPlaySimulator               │
//! │  - round loop        - shared utility vector │
//! └──────────────────────────────────────────────┘
//!          │                          │
//!          ▼                          ▼
//!  ┌───────────────┐          ┌───────────────┐
//!  │ RegretMatching│          │ RegretMatching│
//!  │    Agent 1    │          │    Agent 2    │
//!  └───────────────┘          └───────────────┘
//!          │   train() vs fixed opponent
//!          ▼
//!  ┌──────────────────────────────────────────────┐
//!  │         games::rps (payoffs, utility)        │
//!  └──────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

/// CFR (Counterfactual Regret Minimization) module.
///
/// Regret-matching agent, self-play simulator and their configuration.
pub mod cfr;

/// Game rules module.
///
/// Rock-Paper-Scissors actions, payoffs and best-response helpers.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{
    RegretMatchingAgent, RegretUpdate, SelfPlaySimulator, Strategy, TrainerConfig, TrainingStats,
};
pub use games::rps::{Action, NUM_ACTIONS};
