//! Splits a line of text into countable words.
//!

use crate::LengthBounds;

/// Lazily yields the eligible words of `line`, left to right.
///
/// The line is split on whitespace. Each piece is lowercased, then every
/// character that is not alphabetic after lowercasing is removed (interior
/// punctuation included, so `don't` becomes `dont`). Pieces whose cleaned
/// length falls outside `bounds` are skipped.
///
/// The returned iterator is [`Clone`], so the sequence can be restarted.
pub fn tokenize(line: &str, bounds: LengthBounds) -> impl Iterator<Item = String> + Clone + '_ {
    line.split_whitespace().filter_map(move |piece| {
        let word = piece
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphabetic())
            .collect::<String>();
        bounds.accepts(&word).then_some(word)
    })
}
