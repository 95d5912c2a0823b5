//! Allowed movies and their scripts on disk.

use crate::ScriptParser;
use cinema_core::{Movie, movie_title};
use cinema_error::{ScriptError, ScriptErrorKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Movies shipped with the bot.
pub const DEFAULT_MOVIES: [&str; 5] = [
    "back_to_the_future",
    "bill_and_ted",
    "hackers",
    "the_holy_grail",
    "the_princess_bride",
];

const SCRIPT_FILE: &str = "script.txt";

/// Allow-list of movie identifiers backed by a directory of scripts.
///
/// Each movie lives at `<root>/<identifier>/script.txt`.
///
/// # Examples
///
/// ```
/// use cinema_script::MovieLibrary;
///
/// let library = MovieLibrary::with_defaults("./movies");
/// assert!(library.is_allowed("hackers"));
/// assert!(!library.is_allowed("../etc"));
/// assert!(library.script_path("hackers").ends_with("hackers/script.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct MovieLibrary {
    root: PathBuf,
    allowed: BTreeSet<String>,
    parser: ScriptParser,
}

impl MovieLibrary {
    /// Create a library over `root` allowing exactly `allowed`.
    pub fn new<I, S>(root: impl Into<PathBuf>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
            parser: ScriptParser::default(),
        }
    }

    /// Create a library over `root` allowing [`DEFAULT_MOVIES`].
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self::new(root, DEFAULT_MOVIES)
    }

    /// Replace the parser used by [`MovieLibrary::load`].
    pub fn with_parser(mut self, parser: ScriptParser) -> Self {
        self.parser = parser;
        self
    }

    /// Directory holding the movie folders.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `identifier` may be played.
    pub fn is_allowed(&self, identifier: &str) -> bool {
        self.allowed.contains(identifier)
    }

    /// Allowed identifiers, sorted.
    pub fn allowed(&self) -> Vec<&str> {
        self.allowed.iter().map(String::as_str).collect()
    }

    /// Location of the script for `identifier`.
    pub fn script_path(&self, identifier: &str) -> PathBuf {
        self.root.join(identifier).join(SCRIPT_FILE)
    }

    /// Read and parse the script for an allowed movie.
    ///
    /// # Errors
    ///
    /// - `UnknownMovie` if `identifier` is not allowed
    /// - `FileRead` if the script cannot be read
    /// - any parse error from [`ScriptParser`]
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn load(&self, identifier: &str) -> Result<Movie, ScriptError> {
        if !self.is_allowed(identifier) {
            warn!("Movie not in allow-list");
            return Err(ScriptError::new(ScriptErrorKind::UnknownMovie(
                identifier.to_string(),
            )));
        }

        let path = self.script_path(identifier);
        debug!(path = %path.display(), "Reading script");
        let source = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ScriptError::new(ScriptErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        self.parser.parse_str(&movie_title(identifier), &source)
    }
}
