//! Script loading and parsing error types.

/// Specific error conditions for loading and parsing a movie script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScriptErrorKind {
    /// Script source could not be read
    #[display("Failed to read script: {}", _0)]
    FileRead(String),
    /// Movie identifier is not in the allow-list
    #[display("Unknown movie: {}", _0)]
    UnknownMovie(String),
    /// A blank line appeared in the script
    #[display("Line {}: blank lines are not allowed", line_number)]
    BlankLine {
        /// 1-based line number in the script
        line_number: usize,
    },
    /// A line has no `:` separating actor from text
    #[display("Line {}: missing ':' separator in '{}'", line_number, text)]
    MissingSeparator {
        /// 1-based line number in the script
        line_number: usize,
        /// Offending line
        text: String,
    },
    /// A dialogue line has nothing before the separator
    #[display("Line {}: empty actor name in '{}'", line_number, text)]
    EmptyActor {
        /// 1-based line number in the script
        line_number: usize,
        /// Offending line
        text: String,
    },
    /// A dialogue line appeared before the first `SCENE:` directive
    #[display("Line {}: dialogue before any SCENE directive in '{}'", line_number, text)]
    DialogueBeforeScene {
        /// 1-based line number in the script
        line_number: usize,
        /// Offending line
        text: String,
    },
    /// The script contains no `SCENE:` directive at all
    #[display("Script contains no scenes")]
    NoScenes,
}

impl ScriptErrorKind {
    /// 1-based script line the error points at, if any.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::BlankLine { line_number }
            | Self::MissingSeparator { line_number, .. }
            | Self::EmptyActor { line_number, .. }
            | Self::DialogueBeforeScene { line_number, .. } => Some(*line_number),
            Self::FileRead(_) | Self::UnknownMovie(_) | Self::NoScenes => None,
        }
    }
}

/// Error type for script operations.
///
/// # Examples
///
/// ```
/// use cinema_error::{ScriptError, ScriptErrorKind};
///
/// let err = ScriptError::new(ScriptErrorKind::NoScenes);
/// assert!(format!("{}", err).contains("no scenes"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// The specific error condition
    pub kind: ScriptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new ScriptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScriptErrorKind {
        &self.kind
    }
}

impl From<std::io::Error> for ScriptError {
    #[track_caller]
    fn from(e: std::io::Error) -> Self {
        Self::new(ScriptErrorKind::FileRead(e.to_string()))
    }
}
