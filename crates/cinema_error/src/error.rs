//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, PlaybackError, ScriptError, SinkError};

/// Every error the Cinema crates can produce.
///
/// # Examples
///
/// ```
/// use cinema_error::{CinemaError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: CinemaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CinemaErrorKind {
    /// Script load or parse error
    #[from(ScriptError)]
    Script(ScriptError),
    /// Playback policy or registry error
    #[from(PlaybackError)]
    Playback(PlaybackError),
    /// Notification delivery error
    #[from(SinkError)]
    Sink(SinkError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
}

/// Cinema error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cinema Error: {}", _0)]
pub struct CinemaError(Box<CinemaErrorKind>);

impl CinemaError {
    /// Create a new error from a kind.
    pub fn new(kind: CinemaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CinemaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CinemaErrorKind
impl<T> From<T> for CinemaError
where
    T: Into<CinemaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cinema operations.
pub type CinemaResult<T> = std::result::Result<T, CinemaError>;
