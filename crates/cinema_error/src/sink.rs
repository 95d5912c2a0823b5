//! Emit sink error types.

/// Failure to deliver one line to its destination.
///
/// Recoverable errors are logged and playback moves on to the next line.
/// Fatal errors end the playback run.
///
/// # Examples
///
/// ```
/// use cinema_error::SinkError;
///
/// assert!(!SinkError::new("timeout").is_fatal());
/// assert!(SinkError::fatal("token revoked").is_fatal());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Sink Error: {} at line {} in {}", message, line, file)]
pub struct SinkError {
    /// Error message
    pub message: String,
    /// Whether playback should stop
    pub fatal: bool,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl SinkError {
    /// Create a recoverable sink error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_fatal(message, false)
    }

    /// Create a sink error that ends playback.
    #[track_caller]
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::with_fatal(message, true)
    }

    #[track_caller]
    fn with_fatal(message: impl Into<String>, fatal: bool) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            fatal,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check if playback should stop.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }
}
