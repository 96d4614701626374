//! Configuration options for the RPS trainers.
//!
//! This module provides configuration structs that control how long training
//! runs, how randomness is seeded and how self-play feeds regret back into
//! the two agents. Configurations can be built in code or loaded from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cfr::strategy::{Strategy, StrategyError};
use crate::games::rps::NUM_ACTIONS;

/// How the self-play round turns realized actions into regret updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegretUpdate {
    /// One utility vector, built from player 2's action, is read by both
    /// players. Player 1 sees correct zero-sum utilities; player 2 is
    /// credited against its own action.
    #[default]
    Shared,

    /// Each player's utility vector is built from the other player's action.
    ///
    /// This is the fully symmetric zero-sum update and produces different
    /// output from [`RegretUpdate::Shared`] for the same seed.
    PerPlayer,
}

/// Configuration for training runs.
///
/// # Example
/// ```
/// use rps_cfr::cfr::TrainerConfig;
///
/// let config = TrainerConfig::default().with_seed(42);
/// assert_eq!(config.iterations, 1_000_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Number of iterations (rounds in self-play) to run.
    pub iterations: u64,

    /// Random seed for reproducibility.
    ///
    /// If set, every agent derives its random source from this seed and
    /// results are bit-identical across runs. If `None`, entropy is used.
    pub seed: Option<u64>,

    /// Regret update rule for self-play. Ignored by fixed-opponent training.
    pub regret_update: RegretUpdate,

    /// Iterations between progress callbacks.
    pub progress_interval: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000_000,
            seed: None,
            regret_update: RegretUpdate::Shared,
            progress_interval: 10_000,
        }
    }
}

impl TrainerConfig {
    /// Create a new TrainerConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set iteration count.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the self-play regret update rule.
    pub fn with_regret_update(mut self, regret_update: RegretUpdate) -> Self {
        self.regret_update = regret_update;
        self
    }

    /// Builder method: set progress callback interval.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_interval == 0 {
            return Err(ConfigError::InvalidProgressInterval);
        }
        Ok(())
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }
}

/// Which trainer a scenario runs and with which starting strategies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Scenario {
    /// One learning agent against a stationary opponent.
    FixedOpponent {
        /// The opponent's fixed mixed strategy.
        opponent: Strategy,
    },
    /// Two learning agents playing each other.
    SelfPlay {
        /// Player 1's initial strategy.
        player1: Strategy,
        /// Player 2's initial strategy.
        player2: Strategy,
    },
}

/// A complete training job: scenario plus trainer settings.
///
/// ```json
/// {
///   "scenario": { "mode": "self_play", "player1": [0.6, 0.1, 0.3], "player2": [0.2, 0.4, 0.4] },
///   "trainer": { "iterations": 1000000, "seed": 7 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioFile {
    /// What to train.
    pub scenario: Scenario,
    /// How to train it.
    pub trainer: TrainerConfig,
}

impl ScenarioFile {
    /// Parse a scenario from a JSON string.
    ///
    /// Malformed JSON is a [`ConfigError::ParseError`]; a well-formed file
    /// whose distributions are not valid strategies is a
    /// [`ConfigError::InvalidStrategy`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawScenarioFile =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let file = Self::try_from(raw)?;
        file.trainer.validate()?;
        Ok(file)
    }

    /// Load a scenario from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }
}

/// Scenario as written on disk, before strategy validation.
#[derive(Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum RawScenario {
    FixedOpponent {
        opponent: [f64; NUM_ACTIONS],
    },
    SelfPlay {
        player1: [f64; NUM_ACTIONS],
        player2: [f64; NUM_ACTIONS],
    },
}

#[derive(Deserialize)]
struct RawScenarioFile {
    scenario: RawScenario,
    #[serde(default)]
    trainer: TrainerConfig,
}

impl TryFrom<RawScenarioFile> for ScenarioFile {
    type Error = ConfigError;

    fn try_from(raw: RawScenarioFile) -> Result<Self, Self::Error> {
        let scenario = match raw.scenario {
            RawScenario::FixedOpponent { opponent } => Scenario::FixedOpponent {
                opponent: Strategy::new(opponent)?,
            },
            RawScenario::SelfPlay { player1, player2 } => Scenario::SelfPlay {
                player1: Strategy::new(player1)?,
                player2: Strategy::new(player2)?,
            },
        };
        Ok(Self {
            scenario,
            trainer: raw.trainer,
        })
    }
}

/// Errors that can occur when building or loading configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Progress interval must be positive.
    InvalidProgressInterval,
    /// A supplied distribution is not a valid strategy.
    InvalidStrategy(StrategyError),
    /// Reading a config file failed.
    IoError(String),
    /// JSON was malformed or did not match the schema.
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidProgressInterval => {
                write!(f, "progress interval must be at least 1")
            }
            ConfigError::InvalidStrategy(e) => write!(f, "invalid strategy: {}", e),
            ConfigError::IoError(e) => write!(f, "failed to read config: {}", e),
            ConfigError::ParseError(e) => write!(f, "failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidStrategy(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StrategyError> for ConfigError {
    fn from(e: StrategyError) -> Self {
        ConfigError::InvalidStrategy(e)
    }
}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Time spent in the most recent training call (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second over the most recent training call.
    pub iterations_per_second: f64,

    /// Exploitability of the average strategy at the last measurement.
    pub exploitability: Option<f64>,
}

impl TrainingStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second from a batch size and the elapsed time.
    pub fn update_rate(&mut self, batch: u64) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = batch as f64 / self.elapsed_seconds;
        }
    }

    /// Record an exploitability measurement.
    pub fn record_exploitability(&mut self, exploitability: f64) {
        self.exploitability = Some(exploitability);
    }
}
