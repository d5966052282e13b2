//! Rival rosters
//!
//! A theme database maps a category ("FOOTBALL", "POLITICS", ...) to named
//! rivals with a color and an image search query. Without a theme the session
//! plays the default RED / BLUE / GREEN roster.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::palette::{self, Rgb};

/// A team or themed rival
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub color: Rgb,
    /// Icon search query (themed rivals only)
    #[serde(default)]
    pub search_query: Option<String>,
}

impl Team {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
            search_query: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }
}

/// Roster used when no (or too few) rivals are supplied
pub fn default_roster() -> Vec<Team> {
    vec![
        Team::new("RED", palette::RED),
        Team::new("BLUE", palette::BLUE),
        Team::new("GREEN", palette::GREEN),
    ]
}

/// Category -> rivals, loaded from `themes.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeDatabase {
    categories: BTreeMap<String, Vec<Team>>,
}

impl ThemeDatabase {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load the database, falling back to an empty one
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("{} not found ({e}), using empty theme database", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(db) => {
                log::info!("Loaded {} categories from {}", db.len(), path.display());
                for (category, rivals) in &db.categories {
                    log::debug!("  {category}: {} rivals", rivals.len());
                }
                db
            }
            Err(e) => {
                log::warn!("Error loading {}: {e}, using empty theme database", path.display());
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category names in sorted order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Rivals for a category (case-insensitive lookup)
    pub fn rivals(&self, category: &str) -> Option<&[Team]> {
        self.categories
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(_, rivals)| rivals.as_slice())
    }
}
