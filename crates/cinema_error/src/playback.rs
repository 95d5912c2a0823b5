//! Playback error types.

/// Specific error conditions for starting playback in a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlaybackErrorKind {
    /// A movie is already playing in the room
    #[display("Movie is already playing in room {}", _0)]
    AlreadyPlaying(String),
    /// The room was never installed
    #[display("Room {} is not registered", _0)]
    UnknownRoom(String),
}

impl PlaybackErrorKind {
    /// Policy errors are user-facing rejections, not failures.
    pub fn is_policy(&self) -> bool {
        matches!(self, Self::AlreadyPlaying(_))
    }
}

/// Error type for playback operations.
///
/// # Examples
///
/// ```
/// use cinema_error::{PlaybackError, PlaybackErrorKind};
///
/// let err = PlaybackError::new(PlaybackErrorKind::AlreadyPlaying("42".into()));
/// assert!(err.is_policy());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Playback Error: {} at line {} in {}", kind, line, file)]
pub struct PlaybackError {
    /// The specific error condition
    pub kind: PlaybackErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PlaybackError {
    /// Create a new PlaybackError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlaybackErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check if this is a policy rejection.
    pub fn is_policy(&self) -> bool {
        self.kind.is_policy()
    }
}
