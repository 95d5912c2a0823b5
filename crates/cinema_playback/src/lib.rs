//! Movie playback for Cinema.
//!
//! - [`Scheduler`] walks a [`cinema_core::Movie`] and hands each line to an
//!   [`EmitSink`], pausing for the line's delay
//! - [`StopSignal`] lets the outside world end a run early, including in the
//!   middle of a pause
//! - [`Theater`] keeps one run per room and rejects a second `play` while a
//!   movie is showing

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod scheduler;
mod signal;
mod sink;
mod theater;

pub use scheduler::{PlaybackOutcome, PlaybackReport, Scheduler};
pub use signal::{StopHandle, StopSignal, stop_signal};
pub use sink::{EmitSink, SharedSink, TracingSink};
pub use theater::{PlayTicket, Reservation, RoomId, StopStatus, Theater};
