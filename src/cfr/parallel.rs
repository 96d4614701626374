//! Independent training runs on the rayon thread pool.
//!
//! A single run is strictly sequential: iteration `k + 1` derives its strategy
//! from the regrets written in iteration `k`. Separate runs share nothing, so
//! they parallelise cleanly as long as each gets its own agents and seed.

use rayon::prelude::*;

use crate::cfr::agent::RegretMatchingAgent;
use crate::cfr::config::TrainerConfig;
use crate::cfr::simulator::SelfPlaySimulator;
use crate::cfr::strategy::Strategy;

/// Train one fixed-opponent agent per seed and return each average strategy.
///
/// Results are in seed order and equal what sequential runs with the same
/// seeds produce.
pub fn train_independent(opponent: Strategy, iterations: u64, seeds: &[u64]) -> Vec<Strategy> {
    seeds
        .par_iter()
        .map(|&seed| {
            let mut agent = RegretMatchingAgent::new(opponent, Some(seed));
            agent.train(iterations);
            agent.average_strategy()
        })
        .collect()
}

/// Run one self-play simulation per seed and return both average strategies.
///
/// `config.seed` is replaced by each entry of `seeds`; every other setting is
/// shared by all runs.
pub fn self_play_independent(
    player1: Strategy,
    player2: Strategy,
    config: &TrainerConfig,
    seeds: &[u64],
) -> Vec<[Strategy; 2]> {
    seeds
        .par_iter()
        .map(|&seed| {
            let run_config = config.clone().with_seed(seed);
            let mut sim = SelfPlaySimulator::new(player1, player2, &run_config);
            sim.run_iterations(run_config.iterations);
            sim.get_average_strategies()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let opponent = Strategy::new([0.4, 0.3, 0.3]).unwrap();
        let seeds = [1, 2, 3, 4];

        let parallel = train_independent(opponent, 5_000, &seeds);
        let sequential: Vec<Strategy> = seeds
            .iter()
            .map(|&seed| {
                let mut agent = RegretMatchingAgent::new(opponent, Some(seed));
                agent.train(5_000);
                agent.average_strategy()
            })
            .collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_self_play_runs_use_their_own_seed() {
        let p1 = Strategy::new([0.6, 0.1, 0.3]).unwrap();
        let p2 = Strategy::new([0.2, 0.4, 0.4]).unwrap();
        let config = TrainerConfig::default().with_iterations(2_000);

        let results = self_play_independent(p1, p2, &config, &[10, 10, 11]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], results[1]);
        assert_ne!(results[0], results[2]);

        let mut sim = SelfPlaySimulator::new(p1, p2, &config.clone().with_seed(11));
        sim.run_iterations(2_000);
        assert_eq!(results[2], sim.get_average_strategies());
    }
}
