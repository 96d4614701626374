//! Watch both training modes converge.

use rps_cfr::cfr::{RegretMatchingAgent, SelfPlaySimulator, Strategy, TrainerConfig};
use rps_cfr::games::rps;

fn main() {
    let opponent = Strategy::new([0.4, 0.3, 0.3]).unwrap();
    let mut agent = RegretMatchingAgent::new(opponent, Some(42));

    println!("Fixed opponent [{}]:", opponent);
    for i in 1..=10 {
        agent.train(100_000);
        let strategy = agent.average_strategy();
        println!("  After {:>9} iterations: {}", i * 100_000, strategy);
    }
    println!("  Expected best response: {}", rps::best_response(&opponent));
    println!();

    let p1 = Strategy::new([0.6, 0.1, 0.3]).unwrap();
    let p2 = Strategy::new([0.2, 0.4, 0.4]).unwrap();
    let mut sim = SelfPlaySimulator::new(p1, p2, &TrainerConfig::default().with_seed(42));

    println!("Self-play:");
    for i in 1..=10 {
        sim.run_iterations(100_000);
        let [avg1, avg2] = sim.get_average_strategies();
        println!("  After {:>9} rounds:", i * 100_000);
        println!("    Player 1: {}", avg1);
        println!("    Player 2: {}", avg2);
        println!("    Exploitability: {:.4}", sim.exploitability());
    }

    println!("\nExpected Nash Equilibrium:");
    println!("  Rock=0.3333, Paper=0.3333, Scissors=0.3333");
}
