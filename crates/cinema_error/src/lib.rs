//! Error types for the Cinema workspace.
//!
//! Every layer gets its own error type, built the same way:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use cinema_error::{CinemaResult, ScriptError, ScriptErrorKind};
//!
//! fn load() -> CinemaResult<()> {
//!     Err(ScriptError::new(ScriptErrorKind::NoScenes))?
//! }
//!
//! match load() {
//!     Ok(()) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod playback;
mod script;
mod sink;

pub use config::ConfigError;
pub use error::{CinemaError, CinemaErrorKind, CinemaResult};
pub use http::HttpError;
pub use playback::{PlaybackError, PlaybackErrorKind};
pub use script::{ScriptError, ScriptErrorKind};
pub use sink::SinkError;
