//! Reading-time delays for dialogue lines.

use std::time::Duration;

/// Shortest pause after any dialogue line.
pub const MIN_DELAY_SECS: u64 = 3;

/// Words read per second of delay.
pub const WORDS_PER_SECOND: usize = 4;

/// Delay held after a line with the given text.
///
/// Truncates `words / 4` first, then applies the three second floor.
///
/// # Examples
///
/// ```
/// use cinema_script::line_delay;
/// use std::time::Duration;
///
/// assert_eq!(line_delay("Great Scott!"), Duration::from_secs(3));
/// assert_eq!(line_delay(&"word ".repeat(40)), Duration::from_secs(10));
/// ```
pub fn line_delay(text: &str) -> Duration {
    let words = text.split_whitespace().count();
    let secs = (words / WORDS_PER_SECOND) as u64;
    Duration::from_secs(secs.max(MIN_DELAY_SECS))
}
