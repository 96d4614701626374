//! Self-play between two regret-matching agents.
//!
//! Each round both agents derive a strategy, play simultaneously, and update
//! their regrets from the realized actions. The two average strategies
//! converge toward the uniform Nash equilibrium.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfr::agent::RegretMatchingAgent;
use crate::cfr::config::{RegretUpdate, TrainerConfig, TrainingStats};
use crate::cfr::strategy::Strategy;
use crate::games::rps;

/// Two co-evolving agents playing repeated RPS.
///
/// Player 1 is built with player 2's initial strategy as its opponent
/// distribution and vice versa. Self-play never samples those distributions;
/// both players act from their live regret-matched strategies.
///
/// # Example
/// ```
/// use rps_cfr::cfr::{SelfPlaySimulator, Strategy, TrainerConfig};
///
/// let p1 = Strategy::new([0.6, 0.1, 0.3]).unwrap();
/// let p2 = Strategy::new([0.2, 0.4, 0.4]).unwrap();
/// let mut sim = SelfPlaySimulator::new(p1, p2, &TrainerConfig::default().with_seed(1));
/// sim.run_iterations(10_000);
///
/// let [avg1, avg2] = sim.get_average_strategies();
/// assert!((avg1.total() - 1.0).abs() < 1e-9);
/// assert!((avg2.total() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SelfPlaySimulator {
    /// The two players, indexed 0 and 1.
    players: [RegretMatchingAgent; 2],

    /// How realized actions become regret updates.
    regret_update: RegretUpdate,

    /// Rounds played.
    rounds: u64,

    /// Statistics tracking.
    stats: TrainingStats,
}

impl SelfPlaySimulator {
    /// Create a simulator from both players' initial strategies.
    ///
    /// A seeded config gives each player an independent random source derived
    /// from the seed, so whole runs are reproducible.
    pub fn new(player1: Strategy, player2: Strategy, config: &TrainerConfig) -> Self {
        let mut seeder = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let rng1 = StdRng::seed_from_u64(seeder.gen());
        let rng2 = StdRng::seed_from_u64(seeder.gen());

        Self {
            players: [
                RegretMatchingAgent::with_rng(player2, rng1),
                RegretMatchingAgent::with_rng(player1, rng2),
            ],
            regret_update: config.regret_update,
            rounds: 0,
            stats: TrainingStats::new(),
        }
    }

    /// Play one simultaneous round.
    pub fn play_round(&mut self) {
        let [player1, player2] = &mut self.players;

        let strategy1 = player1.derive_strategy();
        let strategy2 = player2.derive_strategy();

        let action1 = player1.sample_action(&strategy1);
        let action2 = player2.sample_action(&strategy2);

        // Utilities from player 1's perspective
        let utility = rps::utility_vector(action2);
        let utility2 = match self.regret_update {
            RegretUpdate::Shared => utility,
            RegretUpdate::PerPlayer => rps::utility_vector(action1),
        };

        player1.accumulate_regret(&utility, action1);
        player2.accumulate_regret(&utility2, action2);

        self.rounds += 1;
    }

    /// Play `count` rounds.
    ///
    /// # Returns
    /// Statistics from the training run.
    pub fn run_iterations(&mut self, count: u64) -> &TrainingStats {
        log::info!(
            "running {} self-play rounds ({:?} regret update)",
            count,
            self.regret_update
        );
        let start_time = Instant::now();

        for _ in 0..count {
            self.play_round();
        }

        self.finish_batch(count, start_time);
        let [avg1, avg2] = self.get_average_strategies();
        log::info!(
            "played {} rounds in {:.2}s, player 1 [{}], player 2 [{}]",
            count,
            self.stats.elapsed_seconds,
            avg1,
            avg2
        );

        &self.stats
    }

    /// Play rounds with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `count` - Number of rounds to play
    /// * `callback_interval` - How often to call the callback
    /// * `callback` - Function called every `callback_interval` rounds
    pub fn run_with_callback<F>(
        &mut self,
        count: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &TrainingStats
    where
        F: FnMut(&TrainingStats),
    {
        let start_time = Instant::now();
        let interval = callback_interval.max(1);

        for i in 0..count {
            self.play_round();

            if (i + 1) % interval == 0 {
                self.stats.iterations = self.rounds;
                self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
                self.stats.update_rate(i + 1);
                log::debug!("round {}: exploitability {:.4}", self.rounds, self.exploitability());
                callback(&self.stats);
            }
        }

        self.finish_batch(count, start_time);
        &self.stats
    }

    fn finish_batch(&mut self, batch: u64, start_time: Instant) {
        self.stats.iterations = self.rounds;
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.update_rate(batch);
        let exploitability = self.exploitability();
        self.stats.record_exploitability(exploitability);
    }

    /// Average strategy of each player, player 1 first.
    pub fn get_average_strategies(&self) -> [Strategy; 2] {
        [
            self.players[0].average_strategy(),
            self.players[1].average_strategy(),
        ]
    }

    /// Mean exploitability of the two average strategies.
    pub fn exploitability(&self) -> f64 {
        let [avg1, avg2] = self.get_average_strategies();
        (rps::exploitability(&avg1) + rps::exploitability(&avg2)) / 2.0
    }

    /// Player 1's agent.
    pub fn player1(&self) -> &RegretMatchingAgent {
        &self.players[0]
    }

    /// Player 2's agent.
    pub fn player2(&self) -> &RegretMatchingAgent {
        &self.players[1]
    }

    /// Regret update rule in use.
    pub fn regret_update(&self) -> RegretUpdate {
        self.regret_update
    }

    /// Rounds played so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Get current statistics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }
}
