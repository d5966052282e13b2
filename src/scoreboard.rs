//! Session scoreboard
//!
//! Round wins per team, kept for the whole video and never reset. Entries keep
//! roster order, which is also the order teams first appear in round 1.

use serde::{Deserialize, Serialize};

/// A single scoreboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub wins: u32,
}

/// Win counts in roster order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    /// Create a scoreboard with every team at zero
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut board = Self::default();
        for name in names {
            let name = name.into();
            if board.get(&name).is_none() {
                board.entries.push(ScoreEntry { name, wins: 0 });
            }
        }
        board
    }

    /// Wins for a team (None if not on the board)
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.wins)
    }

    /// Add a round win. Unknown teams are appended. Returns the new total.
    pub fn record_win(&mut self, name: &str) -> u32 {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.wins += 1;
                entry.wins
            }
            None => {
                self.entries.push(ScoreEntry {
                    name: name.to_string(),
                    wins: 1,
                });
                1
            }
        }
    }

    /// Total wins across all teams (= completed rounds)
    pub fn total_wins(&self) -> u32 {
        self.entries.iter().map(|e| e.wins).sum()
    }

    /// Overall champion: most wins, ties go to the earliest team in roster order
    pub fn champion(&self) -> Option<&ScoreEntry> {
        self.entries
            .iter()
            .fold(None, |best: Option<&ScoreEntry>, e| match best {
                Some(b) if b.wins >= e.wins => Some(b),
                _ => Some(e),
            })
    }

    /// Every team sharing the top score, in roster order
    pub fn leaders(&self) -> Vec<&str> {
        let Some(top) = self.champion().map(|c| c.wins) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .filter(|e| e.wins == top)
            .map(|e| e.name.as_str())
            .collect()
    }

    /// "RED 3  |  BLUE 2" tally for the given teams
    pub fn tally<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> String {
        names
            .into_iter()
            .map(|n| format!("{n} {}", self.get(n).unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  |  ")
    }
}
