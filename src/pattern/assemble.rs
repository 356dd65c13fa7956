//! Turn pieces of folded text into regex fragments using the variant table.

use itertools::Itertools;

use super::render::{array_to_pattern, sequence_pattern};
use crate::config::MAX_PIECE_LEN;
use crate::split::splits;
use crate::table::VariantTable;

/// Map each piece to its table pattern, or to its escaped literal when the
/// table has no entry.
///
/// Returns `None` unless at least `min_replacements` chars were covered by
/// table hits.
pub fn map_sequence<S: AsRef<str>>(
    table: &VariantTable,
    pieces: &[S],
    min_replacements: usize,
) -> Option<String> {
    let mut replaced = 0;
    let fragments: Vec<String> = pieces
        .iter()
        .map(S::as_ref)
        .map(|piece| match table.get(piece) {
            Some(pattern) => {
                replaced += piece.chars().count();
                pattern.to_string()
            }
            None => regex::escape(piece),
        })
        .collect();
    (replaced >= min_replacements).then(|| sequence_pattern(&fragments))
}

/// Alternate the patterns of every useful partition of `text`.
///
/// A partition is useful when table hits cover all but at most one of its
/// chars (and always at least one). Text with no useful partition comes back
/// as its escaped literal.
pub fn splits_to_pattern(table: &VariantTable, text: &str) -> String {
    let min_replacements = text.chars().count().saturating_sub(1).max(1);
    let patterns: Vec<String> = splits(text, MAX_PIECE_LEN)
        .filter_map(|pieces| map_sequence(table, &pieces, min_replacements))
        .unique()
        .collect();
    if patterns.is_empty() {
        regex::escape(text)
    } else {
        array_to_pattern(&patterns)
    }
}
