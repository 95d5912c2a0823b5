//! A contiguous block of dialogue.

use crate::{Color, Line};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A scene: an intro, an actor color table and the dialogue in order.
///
/// Lines are only added through [`Scene::push_line`], which assigns a color
/// the first time an actor shows up, so every actor in `lines` has an entry
/// in `actors`.
///
/// # Examples
///
/// ```
/// use cinema_core::{Color, Line, Scene};
/// use std::time::Duration;
///
/// let mut scene = Scene::new("A parking lot at night");
/// scene.push_line(Line::new("Doc", "Marty!", Duration::from_secs(3)), || Color::Red);
/// scene.push_line(Line::new("Doc", "You made it!", Duration::from_secs(3)), || Color::Green);
///
/// assert_eq!(scene.intro().text(), "<em>A parking lot at night</em>");
/// assert_eq!(scene.color_of("Doc"), Some(Color::Red));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scene {
    /// Line zero, describing the scene
    intro: Line,
    /// Actor name to color
    actors: HashMap<String, Color>,
    /// Dialogue in script order
    lines: Vec<Line>,
}

impl Scene {
    /// Start a scene from its description; the intro is emphasized.
    pub fn new(description: &str) -> Self {
        Self {
            intro: Line::intro(format!("<em>{}</em>", description.trim())),
            actors: HashMap::new(),
            lines: Vec::new(),
        }
    }

    /// Append a line. `color` is only called for an actor's first line.
    pub fn push_line(&mut self, line: Line, color: impl FnOnce() -> Color) {
        self.actors
            .entry(line.actor().clone())
            .or_insert_with(color);
        self.lines.push(line);
    }

    /// Color assigned to an actor in this scene.
    pub fn color_of(&self, actor: &str) -> Option<Color> {
        self.actors.get(actor).copied()
    }

    /// Intro followed by the dialogue, in emission order.
    pub fn script(&self) -> impl Iterator<Item = &Line> {
        std::iter::once(&self.intro).chain(self.lines.iter())
    }
}
