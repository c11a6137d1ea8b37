//! Ranked high-score table with aggregate stats for the results screen.

use crate::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LeaderboardStats {
    pub total_players: u64,
    pub games_played: u64,
    pub total_acorns: u64,
    pub total_distance: u64,
    pub average_score: u64,
}

const SEED_SCORES: [(&str, u64, &str); 8] = [
    ("BranchMaster", 25420, "2024-01-15"),
    ("AcornHunter", 22890, "2024-01-14"),
    ("TreeRunner", 21650, "2024-01-13"),
    ("NutCollector", 19870, "2024-01-12"),
    ("SquirrelKing", 18900, "2024-01-11"),
    ("ForestDash", 17800, "2024-01-10"),
    ("BranchJumper", 16500, "2024-01-09"),
    ("SpeedSquirrel", 15200, "2024-01-08"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board pre-filled with the default rivals shown on a fresh install.
    pub fn seeded() -> Self {
        let entries = SEED_SCORES
            .iter()
            .map(|(name, score, timestamp)| ScoreEntry {
                name: (*name).to_owned(),
                score: *score,
                timestamp: (*timestamp).to_owned(),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a score and return its 1-based rank, or `None` if it did not
    /// make the board. A blank name becomes `Player{n}`.
    pub fn submit(&mut self, name: Option<&str>, score: u64, timestamp: &str) -> Option<usize> {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_owned(),
            _ => format!("Player{}", self.entries.len() + 1),
        };
        // Ties rank below existing entries with the same score.
        let at = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(
            at,
            ScoreEntry {
                name,
                score,
                timestamp: timestamp.to_owned(),
            },
        );
        self.entries.truncate(LEADERBOARD_CAPACITY);
        (at < self.entries.len()).then_some(at + 1)
    }

    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn stats(&self) -> LeaderboardStats {
        let total_players = self.entries.len() as u64;
        let total_score: u64 = self.entries.iter().map(|e| e.score).sum();
        LeaderboardStats {
            total_players,
            games_played: total_players * GAMES_PER_PLAYER_ESTIMATE,
            total_acorns: total_score / POINTS_PER_ACORN,
            total_distance: total_score / POINTS_PER_METER,
            average_score: total_score.checked_div(total_players).unwrap_or(0),
        }
    }
}
