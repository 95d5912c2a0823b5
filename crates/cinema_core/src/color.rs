//! Notification color palette.

use serde::{Deserialize, Serialize};

/// Display color of a chat notification.
///
/// The lowercase display form is the value the chat service expects.
///
/// # Examples
///
/// ```
/// use cinema_core::Color;
///
/// assert_eq!(Color::Purple.to_string(), "purple");
/// assert_eq!("yellow".parse::<Color>(), Ok(Color::Yellow));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Color {
    /// Gray
    #[strum(to_string = "gray", serialize = "grey")]
    Gray,
    /// Green
    Green,
    /// Purple
    Purple,
    /// Red
    Red,
    /// Yellow
    Yellow,
}

impl Color {
    /// The full palette actors are colored from.
    pub const ALL: [Color; 5] = [
        Color::Gray,
        Color::Green,
        Color::Purple,
        Color::Red,
        Color::Yellow,
    ];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn palette_matches_variants() {
        let all: Vec<Color> = Color::iter().collect();
        assert_eq!(all, Color::ALL.to_vec());
    }

    #[test]
    fn display_matches_wire_value() {
        for color in Color::iter() {
            assert_eq!(color.to_string(), color.as_str());
        }
    }

    #[test]
    fn parsing_accepts_aliases_and_any_case() {
        assert_eq!("grey".parse::<Color>(), Ok(Color::Gray));
        assert_eq!("GREEN".parse::<Color>(), Ok(Color::Green));
        assert_eq!("Purple".parse::<Color>(), Ok(Color::Purple));
        assert!("blue".parse::<Color>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for color in Color::iter() {
            assert_eq!(color.to_string().parse::<Color>(), Ok(color));
        }
        assert_eq!(Color::Gray.to_string(), "gray");
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&Color::Red).unwrap();
        assert_eq!(json, "\"red\"");
    }
}
