// Headless episode loop
//
// Drives one environment with one solver. An episode ends on death, on a
// full board, or when the tick cap is reached; the board is then reset for
// the next one.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::environment::{DeathReason, Environment, StepOutcome};
use crate::scores::ScoreLogger;
use crate::solvers::Solver;

/// How a single episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub score: usize,
    pub won: bool,
    pub ticks: u64,
    /// `None` for wins and for episodes cut off by the tick cap
    pub death: Option<DeathReason>,
}

impl EpisodeSummary {
    pub fn timed_out(&self) -> bool {
        !self.won && self.death.is_none()
    }
}

/// Aggregate over a batch of episodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub episodes: usize,
    pub wins: usize,
    pub deaths: usize,
    pub timeouts: usize,
    pub mean_score: f64,
    pub max_score: usize,
    pub mean_ticks: f64,
}

impl BatchSummary {
    pub fn from_episodes(summaries: &[EpisodeSummary]) -> Self {
        if summaries.is_empty() {
            return BatchSummary::default();
        }
        let count = summaries.len() as f64;
        BatchSummary {
            episodes: summaries.len(),
            wins: summaries.iter().filter(|s| s.won).count(),
            deaths: summaries.iter().filter(|s| s.death.is_some()).count(),
            timeouts: summaries.iter().filter(|s| s.timed_out()).count(),
            mean_score: summaries.iter().map(|s| s.score as f64).sum::<f64>() / count,
            max_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
            mean_ticks: summaries.iter().map(|s| s.ticks as f64).sum::<f64>() / count,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.wins as f64 / self.episodes as f64
        }
    }
}

/// Result of a single `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Running,
    Finished(EpisodeSummary),
}

pub struct Runner {
    environment: Environment,
    solver: Box<dyn Solver>,
    max_ticks: u64,
    ticks: u64,
    scores: Option<ScoreLogger>,
}

impl Runner {
    /// Takes a fresh environment, paints the walls and places snake and fruit.
    /// The solver is reseeded from the environment, so a seeded environment
    /// replays the same batch.
    pub fn new(
        mut environment: Environment,
        mut solver: Box<dyn Solver>,
        max_ticks: u64,
    ) -> Self {
        environment.init_wall();
        environment.init_fruit();
        environment.init_snake();
        solver.reseed(environment.derive_seed());
        Runner {
            environment,
            solver,
            max_ticks,
            ticks: 0,
            scores: None,
        }
    }

    /// Takes an environment whose walls, snake and fruit are already placed
    pub fn with_prepared(
        mut environment: Environment,
        mut solver: Box<dyn Solver>,
        max_ticks: u64,
    ) -> Self {
        solver.reseed(environment.derive_seed());
        Runner {
            environment,
            solver,
            max_ticks,
            ticks: 0,
            scores: None,
        }
    }

    /// Records every finished episode through `scores`
    pub fn with_scores(mut self, scores: ScoreLogger) -> Self {
        self.scores = Some(scores);
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Advances the game by one action
    pub fn tick(&mut self) -> TickResult {
        let action = self.solver.next_action(&self.environment);
        let outcome = self.environment.step(action);
        self.ticks += 1;

        let summary = match outcome {
            StepOutcome::Died(reason) => Some(self.summary(Some(reason))),
            _ if self.environment.won() => Some(self.summary(None)),
            _ if self.ticks >= self.max_ticks => {
                warn!(
                    "{} hit the tick cap of {} at length {}",
                    self.solver.info().abbreviation,
                    self.max_ticks,
                    self.environment.reward()
                );
                Some(self.summary(None))
            }
            _ => None,
        };

        self.solver.after_action(&self.environment, summary.is_some());

        match summary {
            Some(summary) => {
                self.finish(&summary);
                TickResult::Finished(summary)
            }
            None => TickResult::Running,
        }
    }

    /// Ticks until the current episode ends
    pub fn run_episode(&mut self) -> EpisodeSummary {
        loop {
            if let TickResult::Finished(summary) = self.tick() {
                return summary;
            }
        }
    }

    pub fn run_batch(&mut self, episodes: usize) -> BatchSummary {
        let summaries: Vec<EpisodeSummary> = (0..episodes).map(|_| self.run_episode()).collect();
        BatchSummary::from_episodes(&summaries)
    }

    fn summary(&self, death: Option<DeathReason>) -> EpisodeSummary {
        EpisodeSummary {
            score: self.environment.reward(),
            won: death.is_none() && self.environment.won(),
            ticks: self.ticks,
            death,
        }
    }

    fn finish(&mut self, summary: &EpisodeSummary) {
        let info = self.solver.info();
        match summary.death {
            Some(reason) => {
                info!(
                    "{} died after {} ticks with score {}: {}",
                    info.abbreviation, summary.ticks, summary.score, reason
                );
                debug!("Board at death:\n{}", self.environment);
            }
            None if summary.won => info!(
                "{} won after {} ticks with score {}",
                info.abbreviation, summary.ticks, summary.score
            ),
            None => {}
        }

        if let Some(scores) = &self.scores {
            if let Err(e) = scores.log_score(info.short_name, summary) {
                warn!("Failed to record score: {}", e);
            }
        }

        self.solver.reset();
        self.ticks = 0;
        self.environment.init_snake();
        // A winning move eats the last fruit without placing a new one
        if self.environment.fruit().get_vector().is_none() {
            self.environment.init_fruit();
        }
    }
}
