// Score log
//
// One JSON object per line, one file per solver: <directory>/<short_name>.jsonl.
// Files are only ever appended to.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::environment::DeathReason;
use crate::runner::EpisodeSummary;

/// A single line of a score file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub policy: String,
    pub score: usize,
    pub won: bool,
    pub ticks: u64,
    pub death: Option<DeathReason>,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct ScoreLogger {
    directory: PathBuf,
}

impl ScoreLogger {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        ScoreLogger {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, short_name: &str) -> PathBuf {
        self.directory.join(format!("{}.jsonl", short_name))
    }

    /// Appends one episode result, creating the directory if needed
    pub fn log_score(&self, short_name: &str, summary: &EpisodeSummary) -> Result<(), String> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            format!(
                "Failed to create score directory '{}': {}",
                self.directory.display(),
                e
            )
        })?;

        let entry = ScoreEntry {
            policy: short_name.to_string(),
            score: summary.score,
            won: summary.won,
            ticks: summary.ticks,
            death: summary.death,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let line = serde_json::to_string(&entry)
            .map_err(|e| format!("Failed to serialize score entry: {}", e))?;

        let path = self.path_for(short_name);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("Failed to open score file '{}': {}", path.display(), e))?;
        writeln!(file, "{}", line)
            .map_err(|e| format!("Failed to write score file '{}': {}", path.display(), e))?;

        debug!("Recorded score {} to {}", entry.score, path.display());
        Ok(())
    }

    /// Reads every entry logged for `short_name`; a missing file is empty
    pub fn read_scores(&self, short_name: &str) -> Result<Vec<ScoreEntry>, String> {
        let path = self.path_for(short_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read score file '{}': {}", path.display(), e))?;

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    format!("Invalid entry on line {} of '{}': {}", i + 1, path.display(), e)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_directory(name: &str) -> PathBuf {
        let directory = std::env::temp_dir().join(format!(
            "snake-solvers-scores-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&directory);
        directory
    }

    #[test]
    fn test_log_score_appends_lines() {
        let directory = temp_directory("append");
        let logger = ScoreLogger::new(&directory);
        let won = EpisodeSummary {
            score: 16,
            won: true,
            ticks: 70,
            death: None,
        };
        let died = EpisodeSummary {
            score: 3,
            won: false,
            ticks: 12,
            death: Some(DeathReason::HitWall),
        };

        logger.log_score("hamiltonian_cycle", &won).unwrap();
        logger.log_score("hamiltonian_cycle", &died).unwrap();

        let entries = logger.read_scores("hamiltonian_cycle").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].policy, "hamiltonian_cycle");
        assert_eq!(entries[0].score, 16);
        assert!(entries[0].won);
        assert_eq!(entries[1].death, Some(DeathReason::HitWall));
        assert!(chrono::DateTime::parse_from_rfc3339(&entries[1].timestamp).is_ok());

        let raw = fs::read_to_string(logger.path_for("hamiltonian_cycle")).unwrap();
        assert!(raw.contains("\"death\":\"hit_wall\""));

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let logger = ScoreLogger::new(temp_directory("missing"));
        assert!(logger.read_scores("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_path_uses_short_name() {
        let logger = ScoreLogger::new("scores");
        assert_eq!(
            logger.path_for("human"),
            Path::new("scores").join("human.jsonl")
        );
    }
}
