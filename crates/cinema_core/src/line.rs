//! A single spoken line.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One utterance in a scene.
///
/// `delay` is how long playback holds after emitting this line, before the
/// next one goes out.
///
/// # Examples
///
/// ```
/// use cinema_core::Line;
/// use std::time::Duration;
///
/// let line = Line::new("Marty", "Hey, Doc!", Duration::from_secs(3));
/// assert_eq!(line.actor(), "Marty");
/// assert!(!line.is_intro());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Line {
    /// Speaker name, empty for scene intros
    actor: String,
    /// Message body, may contain HTML markup
    text: String,
    /// Pause after this line is emitted
    delay: Duration,
}

impl Line {
    /// Create a dialogue line.
    pub fn new(actor: impl Into<String>, text: impl Into<String>, delay: Duration) -> Self {
        Self {
            actor: actor.into(),
            text: text.into(),
            delay,
        }
    }

    /// Create a scene intro line: no actor, no delay.
    pub fn intro(text: impl Into<String>) -> Self {
        Self {
            actor: String::new(),
            text: text.into(),
            delay: Duration::ZERO,
        }
    }

    /// Whether this is a scene intro rather than dialogue.
    pub fn is_intro(&self) -> bool {
        self.actor.is_empty()
    }

    /// Number of whitespace-separated words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
