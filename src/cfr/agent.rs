//! Regret-matching agent for a single RPS decision point.
//!
//! The agent keeps two accumulators indexed by [`Action::index`]:
//! - **Regret sum**: cumulative counterfactual regret for each action
//! - **Strategy sum**: cumulative probability mass of every derived strategy
//!
//! Used directly, the agent trains against a fixed opponent distribution.
//! [`SelfPlaySimulator`](crate::cfr::SelfPlaySimulator) pairs two agents and
//! drives their updates from each other's play instead.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfr::config::{TrainerConfig, TrainingStats};
use crate::cfr::strategy::Strategy;
use crate::games::rps::{self, Action, NUM_ACTIONS};

/// One player's regret-matching state.
///
/// # Example
/// ```
/// use rps_cfr::cfr::{RegretMatchingAgent, Strategy};
///
/// let opponent = Strategy::new([0.4, 0.3, 0.3]).unwrap();
/// let mut agent = RegretMatchingAgent::new(opponent, Some(42));
/// agent.train(10_000);
///
/// let strategy = agent.average_strategy();
/// assert!((strategy.total() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct RegretMatchingAgent {
    /// Cumulative regret for not having played each action.
    regret_sum: [f64; NUM_ACTIONS],

    /// Sum of every strategy derived so far.
    strategy_sum: [f64; NUM_ACTIONS],

    /// Stationary distribution trained against in fixed-opponent mode.
    opponent: Strategy,

    /// Number of strategies derived.
    iterations: u64,

    /// Statistics tracking.
    stats: TrainingStats,

    /// Random number generator.
    rng: StdRng,
}

impl RegretMatchingAgent {
    /// Create an agent responding to `opponent`.
    ///
    /// With `Some(seed)` the agent's random sequence is reproducible.
    pub fn new(opponent: Strategy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(opponent, rng)
    }

    /// Create an agent seeded from a trainer configuration.
    pub fn from_config(opponent: Strategy, config: &TrainerConfig) -> Self {
        Self::new(opponent, config.seed)
    }

    /// Create an agent that draws from an existing random source.
    pub fn with_rng(opponent: Strategy, rng: StdRng) -> Self {
        Self {
            regret_sum: [0.0; NUM_ACTIONS],
            strategy_sum: [0.0; NUM_ACTIONS],
            opponent,
            iterations: 0,
            stats: TrainingStats::new(),
            rng,
        }
    }

    /// Derive the current mixed strategy by regret matching.
    ///
    /// Each action's probability is its positive regret over the sum of
    /// positive regrets, or `1/3` when no regret is positive. The result is
    /// added into the strategy sum, so call this exactly once per iteration
    /// or the average strategy becomes biased.
    pub fn derive_strategy(&mut self) -> Strategy {
        let positive = self.regret_sum.map(|r| r.max(0.0));
        let normalizing_sum: f64 = positive.iter().sum();

        let strategy = if normalizing_sum > 0.0 {
            positive.map(|r| r / normalizing_sum)
        } else {
            [1.0 / NUM_ACTIONS as f64; NUM_ACTIONS]
        };

        for (sum, &prob) in self.strategy_sum.iter_mut().zip(strategy.iter()) {
            *sum += prob;
        }
        self.iterations += 1;

        Strategy::from_raw(strategy)
    }

    /// Sample an action from `strategy` by inverse CDF.
    ///
    /// Walks the first two entries; anything past them, including rounding
    /// slop, lands on Scissors.
    pub fn sample_action(&mut self, strategy: &Strategy) -> Action {
        let r: f64 = self.rng.gen();
        let mut cumulative = 0.0;

        for &action in &Action::ALL[..NUM_ACTIONS - 1] {
            cumulative += strategy.probability(action);
            if r < cumulative {
                return action;
            }
        }

        Action::Scissors
    }

    /// Add counterfactual regret for one round.
    ///
    /// `regret[i] += utility[i] - utility[realized]`: what the agent would
    /// have gained by playing `i` instead.
    pub fn accumulate_regret(&mut self, utility: &[f64; NUM_ACTIONS], realized: Action) {
        let realized_utility = utility[realized.index()];
        for (regret, &u) in self.regret_sum.iter_mut().zip(utility.iter()) {
            *regret += u - realized_utility;
        }
    }

    /// Time-averaged strategy, the converged output of training.
    ///
    /// Uniform until at least one strategy has been derived.
    pub fn average_strategy(&self) -> Strategy {
        let total: f64 = self.strategy_sum.iter().sum();
        if total > 0.0 {
            Strategy::from_raw(self.strategy_sum.map(|s| s / total))
        } else {
            Strategy::uniform()
        }
    }

    /// Run one iteration against the fixed opponent distribution.
    pub fn run_iteration(&mut self) {
        let strategy = self.derive_strategy();
        let mine = self.sample_action(&strategy);
        let opponent = self.opponent;
        let theirs = self.sample_action(&opponent);

        let utility = rps::utility_vector(theirs);
        self.accumulate_regret(&utility, mine);
    }

    /// Train against the fixed opponent distribution.
    ///
    /// # Returns
    /// Statistics from the training run.
    pub fn train(&mut self, iterations: u64) -> &TrainingStats {
        log::info!(
            "training against fixed opponent [{}] for {} iterations",
            self.opponent,
            iterations
        );
        let start_time = Instant::now();

        for _ in 0..iterations {
            self.run_iteration();
        }

        self.finish_batch(iterations, start_time);
        log::info!(
            "trained {} iterations in {:.2}s, average strategy [{}]",
            iterations,
            self.stats.elapsed_seconds,
            self.average_strategy()
        );

        &self.stats
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run
    /// * `callback_interval` - How often to call the callback
    /// * `callback` - Function called every `callback_interval` iterations
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &TrainingStats
    where
        F: FnMut(&TrainingStats),
    {
        let start_time = Instant::now();
        let interval = callback_interval.max(1);

        for i in 0..iterations {
            self.run_iteration();

            if (i + 1) % interval == 0 {
                self.stats.iterations = self.iterations;
                self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
                self.stats.update_rate(i + 1);
                log::debug!(
                    "iteration {}: average strategy [{}]",
                    self.iterations,
                    self.average_strategy()
                );
                callback(&self.stats);
            }
        }

        self.finish_batch(iterations, start_time);
        &self.stats
    }

    fn finish_batch(&mut self, batch: u64, start_time: Instant) {
        self.stats.iterations = self.iterations;
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.update_rate(batch);
        self.stats
            .record_exploitability(rps::exploitability(&self.average_strategy()));
    }

    /// Cumulative regret per action.
    pub fn regret_sum(&self) -> &[f64; NUM_ACTIONS] {
        &self.regret_sum
    }

    /// Cumulative strategy mass per action.
    pub fn strategy_sum(&self) -> &[f64; NUM_ACTIONS] {
        &self.strategy_sum
    }

    /// The fixed opponent distribution this agent was built with.
    pub fn opponent(&self) -> &Strategy {
        &self.opponent
    }

    /// Number of strategies derived so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Get current statistics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> RegretMatchingAgent {
        RegretMatchingAgent::new(Strategy::uniform(), Some(7))
    }

    fn assert_valid(strategy: &Strategy) {
        assert!(strategy.as_array().iter().all(|&p| p >= 0.0));
        assert!((strategy.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_without_positive_regret() {
        let mut agent = agent();
        assert_eq!(agent.derive_strategy(), Strategy::uniform());

        // Only negative and zero regrets: still uniform
        agent.accumulate_regret(&[0.0, -1.0, -1.0], Action::Rock);
        assert_eq!(agent.regret_sum(), &[0.0, -1.0, -1.0]);
        assert_eq!(agent.derive_strategy(), Strategy::uniform());
    }

    #[test]
    fn test_strategy_proportional_to_positive_regret() {
        let mut agent = agent();
        // Opponent played Rock, we played Scissors
        agent.accumulate_regret(&rps::utility_vector(Action::Rock), Action::Scissors);
        assert_eq!(agent.regret_sum(), &[1.0, 2.0, 0.0]);

        let strategy = agent.derive_strategy();
        assert_valid(&strategy);
        assert!((strategy.probability(Action::Rock) - 1.0 / 3.0).abs() < 1e-12);
        assert!((strategy.probability(Action::Paper) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(strategy.probability(Action::Scissors), 0.0);
    }

    #[test]
    fn test_derived_strategies_always_valid() {
        let mut agent = agent();
        for _ in 0..1_000 {
            let strategy = agent.derive_strategy();
            assert_valid(&strategy);
            let mine = agent.sample_action(&strategy);
            let theirs = agent.sample_action(&Strategy::new([0.5, 0.2, 0.3]).unwrap());
            agent.accumulate_regret(&rps::utility_vector(theirs), mine);
        }
    }

    #[test]
    fn test_regret_when_tying() {
        let mut agent = agent();
        // Realized action is the utility vector's zero entry
        agent.accumulate_regret(&rps::utility_vector(Action::Paper), Action::Paper);
        assert_eq!(agent.regret_sum()[Action::Paper.index()], 0.0);
        assert_eq!(agent.regret_sum()[Action::Scissors.index()], 1.0);
        assert_eq!(agent.regret_sum()[Action::Rock.index()], -1.0);
    }

    #[test]
    fn test_strategy_sum_accumulates() {
        let mut agent = agent();
        agent.derive_strategy();
        agent.accumulate_regret(&[1.0, 0.0, 0.0], Action::Paper);
        agent.derive_strategy();

        let sums = agent.strategy_sum();
        assert!((sums[0] - (1.0 / 3.0 + 1.0)).abs() < 1e-12);
        assert!((sums[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((sums[2] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(agent.iterations(), 2);
    }

    #[test]
    fn test_average_strategy_before_training() {
        let agent = agent();
        assert_eq!(agent.average_strategy(), Strategy::uniform());
        assert_eq!(agent.strategy_sum(), &[0.0; 3]);
    }

    #[test]
    fn test_average_strategy_is_pure_read() {
        let mut agent = agent();
        agent.train(1_000);

        let first = agent.average_strategy();
        let second = agent.average_strategy();
        assert_eq!(first, second);
        assert_valid(&first);
        assert_eq!(agent.iterations(), 1_000);
    }

    #[test]
    fn test_sample_action_follows_distribution() {
        let mut agent = agent();
        assert_eq!(agent.sample_action(&Strategy::pure(Action::Rock)), Action::Rock);
        assert_eq!(agent.sample_action(&Strategy::pure(Action::Paper)), Action::Paper);
        assert_eq!(
            agent.sample_action(&Strategy::pure(Action::Scissors)),
            Action::Scissors
        );

        let strategy = Strategy::new([0.5, 0.3, 0.2]).unwrap();
        let mut counts = [0usize; 3];
        for _ in 0..100_000 {
            counts[agent.sample_action(&strategy).index()] += 1;
        }
        assert!((counts[0] as f64 / 100_000.0 - 0.5).abs() < 0.01);
        assert!((counts[1] as f64 / 100_000.0 - 0.3).abs() < 0.01);
        assert!((counts[2] as f64 / 100_000.0 - 0.2).abs() < 0.01);
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let strategy = Strategy::new([0.2, 0.5, 0.3]).unwrap();
        let draw = |seed| {
            let mut agent = RegretMatchingAgent::new(Strategy::uniform(), Some(seed));
            (0..200).map(|_| agent.sample_action(&strategy)).collect::<Vec<_>>()
        };

        assert_eq!(draw(11), draw(11));
        assert_ne!(draw(11), draw(12));
    }

    #[test]
    fn test_seeded_training_is_bit_identical() {
        let opponent = Strategy::new([0.4, 0.3, 0.3]).unwrap();
        let mut a = RegretMatchingAgent::new(opponent, Some(5));
        let mut b = RegretMatchingAgent::new(opponent, Some(5));
        a.train(10_000);
        b.train(10_000);

        assert_eq!(a.regret_sum(), b.regret_sum());
        assert_eq!(a.strategy_sum(), b.strategy_sum());
    }

    #[test]
    fn test_split_training_matches_single_batch() {
        let opponent = Strategy::new([0.4, 0.3, 0.3]).unwrap();
        let mut split = RegretMatchingAgent::new(opponent, Some(21));
        split.train(500_000);
        split.train(500_000);

        let mut single = RegretMatchingAgent::new(opponent, Some(21));
        single.train(1_000_000);

        assert_eq!(split.average_strategy(), single.average_strategy());
        assert_eq!(split.iterations(), single.iterations());
    }

    #[test]
    fn test_zero_iterations() {
        let mut agent = agent();
        let stats = agent.train(0);
        assert_eq!(stats.iterations, 0);
        assert_eq!(agent.average_strategy(), Strategy::uniform());
    }

    #[test]
    fn test_callback_intervals() {
        let mut agent = agent();
        let mut seen = Vec::new();
        agent.train_with_callback(1_000, 250, |stats| seen.push(stats.iterations));

        assert_eq!(seen, vec![250, 500, 750, 1_000]);
        assert_eq!(agent.stats().iterations, 1_000);
        assert!(agent.stats().exploitability.is_some());
    }

    #[test]
    fn test_fixed_opponent_convergence() {
        let opponent = Strategy::new([0.4, 0.3, 0.3]).unwrap();
        let mut agent = RegretMatchingAgent::new(opponent, Some(42));
        agent.train(1_000_000);

        let strategy = agent.average_strategy();
        println!("Average strategy vs [{}]: [{}]", opponent, strategy);

        // Paper beats the opponent's most likely action
        let best = Strategy::pure(Action::Paper);
        assert!(
            strategy.max_deviation(&best) < 0.05,
            "average strategy [{}] should be near pure Paper",
            strategy
        );
        assert_eq!(rps::best_response(&opponent), Action::Paper);
    }
}
