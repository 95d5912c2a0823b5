//! Line-oriented screenplay parser.

use crate::{ColorPolicy, RandomColors, line_delay};
use cinema_core::{Line, Movie, Scene};
use cinema_error::{ScriptError, ScriptErrorKind};
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const SCENE_KEYWORD: &str = "SCENE";

/// Parses screenplay text into a [`Movie`].
///
/// Every physical line is one directive:
/// - `SCENE: <description>` starts a new scene (keyword is case-insensitive)
/// - `<actor>: <text>` adds dialogue to the current scene
///
/// Only the first `:` separates the fields. Blank lines, lines without a
/// separator and dialogue before the first scene are errors.
///
/// # Examples
///
/// ```
/// use cinema_script::{CyclingColors, ScriptParser};
///
/// let parser = ScriptParser::new(CyclingColors);
/// let movie = parser
///     .parse_str("Hackers", "SCENE: A courtroom\nJudge: Dade Murphy: you are hereby banned.")
///     .unwrap();
///
/// assert_eq!(movie.scenes().len(), 1);
/// let line = &movie.scenes()[0].lines()[0];
/// assert_eq!(line.actor(), "Judge");
/// assert_eq!(line.text(), "Dade Murphy: you are hereby banned.");
/// ```
#[derive(Clone)]
pub struct ScriptParser {
    colors: Arc<dyn ColorPolicy>,
}

impl ScriptParser {
    /// Create a parser that colors actors with `colors`.
    pub fn new(colors: impl ColorPolicy + 'static) -> Self {
        Self {
            colors: Arc::new(colors),
        }
    }

    /// Parse a script given as a string.
    pub fn parse_str(&self, title: &str, source: &str) -> Result<Movie, ScriptError> {
        self.parse_lines(title, source.lines())
    }

    /// Parse a script from a reader, surfacing read failures as `FileRead`.
    pub fn parse_reader(&self, title: &str, reader: impl BufRead) -> Result<Movie, ScriptError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        self.parse_lines(title, lines)
    }

    /// Parse a sequence of script lines.
    #[instrument(skip(self, lines))]
    pub fn parse_lines<I>(&self, title: &str, lines: I) -> Result<Movie, ScriptError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut scenes: Vec<Scene> = Vec::new();

        for (index, raw) in lines.into_iter().enumerate() {
            let raw = raw.as_ref();
            let line_number = index + 1;

            if raw.trim().is_empty() {
                return Err(ScriptError::new(ScriptErrorKind::BlankLine { line_number }));
            }

            let Some((key, rest)) = raw.split_once(':') else {
                return Err(ScriptError::new(ScriptErrorKind::MissingSeparator {
                    line_number,
                    text: raw.to_string(),
                }));
            };
            let key = key.trim();
            let text = rest.trim();

            if key.eq_ignore_ascii_case(SCENE_KEYWORD) {
                debug!(line_number, scene = scenes.len(), "Scene started");
                scenes.push(Scene::new(text));
                continue;
            }

            if key.is_empty() {
                return Err(ScriptError::new(ScriptErrorKind::EmptyActor {
                    line_number,
                    text: raw.to_string(),
                }));
            }

            let scene_index = scenes.len().saturating_sub(1);
            let Some(scene) = scenes.last_mut() else {
                return Err(ScriptError::new(ScriptErrorKind::DialogueBeforeScene {
                    line_number,
                    text: raw.to_string(),
                }));
            };

            let color = match scene.color_of(key) {
                Some(color) => color,
                None => {
                    let color = self.colors.assign(scene_index, scene.actors().len(), key);
                    debug!(actor = key, %color, scene = scene_index, "Actor colored");
                    color
                }
            };

            scene.push_line(Line::new(key, text, line_delay(text)), || color);
        }

        if scenes.is_empty() {
            return Err(ScriptError::new(ScriptErrorKind::NoScenes));
        }

        let movie = Movie::new(title, scenes);
        info!(
            scenes = movie.scenes().len(),
            lines = movie.line_count(),
            running_secs = movie.running_time().as_secs(),
            "Script parsed"
        );
        Ok(movie)
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new(RandomColors)
    }
}

impl std::fmt::Debug for ScriptParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptParser").finish_non_exhaustive()
    }
}
