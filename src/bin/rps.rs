//! Rock-Paper-Scissors CFR trainer binary.
//!
//! Usage:
//!   cargo run --release --bin rps -- train --opponent 0.4,0.3,0.3
//!   cargo run --release --bin rps -- self-play --player1 0.6,0.1,0.3 --player2 0.2,0.4,0.4
//!   cargo run --release --bin rps -- scenario scenario.json
//!
//! Set `RUST_LOG=debug` for progress checkpoints in the log.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use rps_cfr::cfr::{
    ConfigError, RegretMatchingAgent, RegretUpdate, Scenario, ScenarioFile, SelfPlaySimulator,
    Strategy, TrainerConfig, TrainingStats,
};
use rps_cfr::games::rps;

#[derive(Parser)]
#[command(name = "rps", about = "Counterfactual regret minimization for Rock-Paper-Scissors")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the result as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Hide the progress bar
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Train one agent against a fixed opponent distribution
    Train {
        /// Opponent strategy as rock,paper,scissors
        #[arg(long, value_parser = parse_strategy, default_value = "0.4,0.3,0.3")]
        opponent: Strategy,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Two learning agents playing each other
    SelfPlay {
        /// Player 1's initial strategy
        #[arg(long, value_parser = parse_strategy, default_value = "0.6,0.1,0.3")]
        player1: Strategy,

        /// Player 2's initial strategy
        #[arg(long, value_parser = parse_strategy, default_value = "0.2,0.4,0.4")]
        player2: Strategy,

        /// Build each player's utilities from the other player's action
        #[arg(long)]
        per_player: bool,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Run a scenario described in a JSON file
    Scenario {
        /// Path to the scenario file
        path: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Number of iterations
    #[arg(short, long, default_value_t = 1_000_000)]
    iterations: u64,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,
}

impl RunArgs {
    fn config(&self) -> TrainerConfig {
        let config = TrainerConfig::default().with_iterations(self.iterations);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{}: {}", v, e)))
        .collect::<Result<_, _>>()?;
    let probs: [f64; 3] = values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected 3 probabilities, got {}", v.len()))?;
    Strategy::new(probs).map_err(|e| ConfigError::from(e).to_string())
}

/// Result of a training run, printed as text or JSON.
#[derive(Serialize)]
struct Report {
    mode: &'static str,
    seed: Option<u64>,
    players: Vec<PlayerReport>,
    stats: TrainingStats,
}

#[derive(Serialize)]
struct PlayerReport {
    name: &'static str,
    average_strategy: Strategy,
    exploitability: f64,
}

impl PlayerReport {
    fn new(name: &'static str, average_strategy: Strategy) -> Self {
        Self {
            name,
            exploitability: rps::exploitability(&average_strategy),
            average_strategy,
        }
    }
}

fn progress_bar(iterations: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(iterations);
    match ProgressStyle::with_template(
        "{elapsed_precise} [{bar:40.cyan/blue}] {pos:>9}/{len:9} ({per_sec}, eta {eta})",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("=> ")),
        Err(e) => log::warn!("default progress style: {}", e),
    }
    pb
}

fn train(opponent: Strategy, config: &TrainerConfig, quiet: bool) -> Report {
    let mut agent = RegretMatchingAgent::from_config(opponent, config);
    let pb = progress_bar(config.iterations, quiet);

    agent.train_with_callback(config.iterations, config.progress_interval, |stats| {
        pb.set_position(stats.iterations)
    });
    pb.finish_and_clear();

    Report {
        mode: "fixed_opponent",
        seed: config.seed,
        players: vec![PlayerReport::new("agent", agent.average_strategy())],
        stats: agent.stats().clone(),
    }
}

fn self_play(player1: Strategy, player2: Strategy, config: &TrainerConfig, quiet: bool) -> Report {
    let mut sim = SelfPlaySimulator::new(player1, player2, config);
    let pb = progress_bar(config.iterations, quiet);

    sim.run_with_callback(config.iterations, config.progress_interval, |stats| {
        pb.set_position(stats.iterations)
    });
    pb.finish_and_clear();

    let [avg1, avg2] = sim.get_average_strategies();
    Report {
        mode: "self_play",
        seed: config.seed,
        players: vec![
            PlayerReport::new("player1", avg1),
            PlayerReport::new("player2", avg2),
        ],
        stats: sim.stats().clone(),
    }
}

fn print_report(report: &Report) {
    println!("=================================================");
    println!("  Rock-Paper-Scissors CFR ({})", report.mode);
    println!("=================================================");
    println!();
    for player in &report.players {
        println!("{} average strategy: {}", player.name, player.average_strategy);
        println!("  Exploitability: {:.4}", player.exploitability);
        let response = rps::best_response(&player.average_strategy);
        println!("  Best response:  {} ({})", response, response.symbol());
    }
    println!();
    println!("Iterations: {}", report.stats.iterations);
    println!(
        "Time: {:.2}s ({:.0} it/s)",
        report.stats.elapsed_seconds, report.stats.iterations_per_second
    );
    if let Some(seed) = report.seed {
        println!("Seed: {}", seed);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let report = match cli.command {
        Command::Train { opponent, run } => train(opponent, &run.config(), cli.quiet),
        Command::SelfPlay {
            player1,
            player2,
            per_player,
            run,
        } => {
            let update = if per_player {
                RegretUpdate::PerPlayer
            } else {
                RegretUpdate::Shared
            };
            let config = run.config().with_regret_update(update);
            self_play(player1, player2, &config, cli.quiet)
        }
        Command::Scenario { path } => {
            log::info!("loading scenario from {}", path.display());
            let file = ScenarioFile::from_json_file(&path)?;
            match file.scenario {
                Scenario::FixedOpponent { opponent } => train(opponent, &file.trainer, cli.quiet),
                Scenario::SelfPlay { player1, player2 } => {
                    self_play(player1, player2, &file.trainer, cli.quiet)
                }
            }
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
