// Configuration module for reading Snake.toml
// Board size, optimiser safety tuning, runner limits and score logging

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub board: BoardConfig,
    pub safety: SafetyConfig,
    pub runner: RunnerConfig,
    pub scores: ScoresConfig,
}

/// Board dimensions, including the one-tile wall border
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
}

/// Shortcut safety margin for the optimised Hamiltonian solver.
///
/// The margin grows linearly with occupancy between the two breakpoints;
/// margins are fractions of the cycle length.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SafetyConfig {
    pub min_occupancy: f64,
    pub max_occupancy: f64,
    pub min_margin: f64,
    pub max_margin: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        SafetyConfig {
            min_occupancy: 0.04,
            max_occupancy: 0.8,
            min_margin: 0.01,
            max_margin: 0.25,
        }
    }
}

/// Headless episode loop limits
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RunnerConfig {
    pub episodes: usize,
    pub max_ticks_per_episode: u64,
    /// Fixed RNG seed; OS entropy when absent
    pub seed: Option<u64>,
}

/// Score log output
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoresConfig {
    pub enabled: bool,
    pub directory: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            board: BoardConfig {
                width: 12,
                height: 12,
            },
            safety: SafetyConfig::default(),
            runner: RunnerConfig {
                episodes: 10,
                max_ticks_per_episode: 100_000,
                seed: None,
            },
            scores: ScoresConfig {
                enabled: true,
                directory: "scores".to_string(),
            },
        }
    }

    /// Loads Snake.toml, falling back to the hardcoded defaults
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Checks values the TOML schema cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.board.width < 4 || self.board.height < 4 {
            return Err(format!(
                "Board must be at least 4x4 including walls, got {}x{}",
                self.board.width, self.board.height
            ));
        }
        let safety = &self.safety;
        if !(0.0..=1.0).contains(&safety.min_occupancy)
            || !(0.0..=1.0).contains(&safety.max_occupancy)
            || safety.min_occupancy > safety.max_occupancy
        {
            return Err(format!(
                "Occupancy breakpoints must satisfy 0 <= min <= max <= 1, got {} and {}",
                safety.min_occupancy, safety.max_occupancy
            ));
        }
        if safety.min_margin < 0.0 || safety.max_margin < safety.min_margin {
            return Err(format!(
                "Margins must satisfy 0 <= min <= max, got {} and {}",
                safety.min_margin, safety.max_margin
            ));
        }
        if self.runner.max_ticks_per_episode == 0 {
            return Err("runner.max_ticks_per_episode must be positive".to_string());
        }
        Ok(())
    }
}
