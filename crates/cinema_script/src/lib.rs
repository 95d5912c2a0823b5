//! Screenplay parsing for Cinema.
//!
//! Scripts are plain text, one directive per line:
//!
//! ```text
//! SCENE: A garage in Hill Valley, 1985
//! Doc: Marty, you made it!
//! Marty: Whoa, Doc. What's with the truck?
//! ```
//!
//! [`ScriptParser`] turns that into a [`cinema_core::Movie`], computing a
//! reading delay for every line and coloring actors through a
//! [`ColorPolicy`]. [`MovieLibrary`] maps allowed movie identifiers to script
//! files on disk.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod library;
mod palette;
mod parser;
mod timing;

pub use library::{DEFAULT_MOVIES, MovieLibrary};
pub use palette::{ColorPolicy, CyclingColors, FixedColor, RandomColors};
pub use parser::ScriptParser;
pub use timing::{MIN_DELAY_SECS, WORDS_PER_SECOND, line_delay};
