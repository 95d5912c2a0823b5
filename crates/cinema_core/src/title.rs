//! Movie identifier to display title.

const SMALL_WORDS: [&str; 5] = ["a", "an", "on", "the", "to"];

/// Turn a movie identifier into a display title.
///
/// Underscores and hyphens separate words. Every word is capitalized except
/// the small words `a`, `an`, `on`, `the` and `to` when they are not first.
///
/// # Examples
///
/// ```
/// use cinema_core::movie_title;
///
/// assert_eq!(movie_title("back_to_the_future"), "Back to the Future");
/// assert_eq!(movie_title("the_holy_grail"), "The Holy Grail");
/// ```
pub fn movie_title(identifier: &str) -> String {
    identifier
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(index, word)| {
            if index > 0 && SMALL_WORDS.contains(&word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
