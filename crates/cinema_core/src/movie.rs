//! The top-level playable document.

use crate::Scene;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A parsed movie: display title plus scenes in play order.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Movie {
    /// Human-readable title
    title: String,
    /// Scenes in play order
    scenes: Vec<Scene>,
}

impl Movie {
    /// Create a movie from already-built scenes.
    pub fn new(title: impl Into<String>, scenes: Vec<Scene>) -> Self {
        Self {
            title: title.into(),
            scenes,
        }
    }

    /// Number of dialogue lines across all scenes, intros excluded.
    pub fn line_count(&self) -> usize {
        self.scenes.iter().map(|s| s.lines().len()).sum()
    }

    /// Sum of every line delay.
    pub fn running_time(&self) -> Duration {
        self.scenes
            .iter()
            .flat_map(|s| s.script())
            .map(|l| *l.delay())
            .sum()
    }
}
