//! Compile a needle into a pattern matching its Unicode variants.
//!
//! The needle is folded, then walked once to find where multi-character keys
//! (`tm`, `rs`, `1/4`, ...) may start. Overlapping keys fork the walk into
//! alternative piece sequences; wherever every sequence agrees again the
//! pieces seen so far are flushed, so each partitioned piece stays short.

use std::collections::HashSet;

use itertools::Itertools;

use crate::config::MAX_LIVE_SEQUENCES;
use crate::fold::fold;
use crate::pattern::{array_to_pattern, map_sequence, sequence_pattern, splits_to_pattern};
use crate::table::{self, VariantTable};

/// A run of folded chars, `start..end` in char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Piece {
    fn new(chars: &[char], start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
            text: chars[start..start + len].iter().collect(),
        }
    }

    /// The same piece cut short to end at `end`.
    fn truncated(&self, end: usize) -> Self {
        Self {
            start: self.start,
            end,
            text: self.text.chars().take(end - self.start).collect(),
        }
    }
}

/// What a sequence did at one position of the walk.
#[derive(Debug, PartialEq, Eq, Hash)]
enum Step {
    Appended(String),
    Waited,
}

/// Compile `needle` against the process-wide table.
pub fn compile(needle: &str) -> String {
    compile_with(table::global(), needle)
}

/// Compile `needle` against `table`.
pub fn compile_with(table: &VariantTable, needle: &str) -> String {
    let folded = fold(needle);
    let chars: Vec<char> = folded.chars().collect();

    let has_multi_char_key = (0..chars.len()).any(|i| table.longest_key_at(&chars[i..]).is_some());
    if !has_multi_char_key {
        let pieces: Vec<String> = chars.iter().map(char::to_string).collect();
        return map_sequence(table, &pieces, 0).unwrap_or_default();
    }

    let mut pattern = String::new();
    let mut sequences: Vec<Vec<Piece>> = vec![Vec::new()];
    let mut flushes = 0usize;

    for i in 0..chars.len() {
        let key_len = table.longest_key_at(&chars[i..]);
        let mut forks = Vec::new();
        let mut steps = HashSet::new();

        for sequence in sequences.iter_mut() {
            let covers_i = sequence.last().is_some_and(|last| last.end > i);
            if !covers_i {
                let piece = Piece::new(&chars, i, key_len.unwrap_or(1));
                steps.insert(Step::Appended(piece.text.clone()));
                sequence.push(piece);
            } else if let Some(len) = key_len {
                let mut fork = sequence.clone();
                if let Some(last) = fork.pop() {
                    fork.push(last.truncated(i));
                }
                fork.push(Piece::new(&chars, i, len));
                forks.push(fork);
            } else {
                // Appending here would overlap the key still in progress.
                steps.insert(Step::Waited);
            }
        }

        if !forks.is_empty() {
            if sequences.len() + forks.len() <= MAX_LIVE_SEQUENCES {
                sequences.extend(forks);
                continue;
            }
            // Runs like "ffff" overlap at every char and never agree, so end
            // the chunk here. Keys spanning `i` are given up.
            let cut: Vec<Vec<Piece>> = sequences.iter().map(|sequence| cut_at(sequence, i)).collect();
            pattern.push_str(&sequences_to_pattern(table, &cut, true));
            let len = key_len.unwrap_or(1);
            sequences = vec![vec![Piece::new(&chars, i, len)]];
            flushes += 1;
            tracing::debug!(needle, at = i, "too many overlapping keys, cutting chunk");
            continue;
        }

        if i > 0 && steps.len() == 1 && !steps.contains(&Step::Waited) {
            pattern.push_str(&sequences_to_pattern(table, &sequences, false));
            let shared = sequences[0].last().cloned();
            sequences = vec![shared.into_iter().collect()];
            flushes += 1;
        }
    }

    tracing::trace!(
        needle,
        sequences = sequences.len(),
        flushes,
        "compiled needle with multi-char keys"
    );
    pattern.push_str(&sequences_to_pattern(table, &sequences, true));
    pattern
}

/// The pieces of `sequence` that start before `at`, the last one cut to end
/// there.
fn cut_at(sequence: &[Piece], at: usize) -> Vec<Piece> {
    sequence
        .iter()
        .filter(|piece| piece.start < at)
        .map(|piece| if piece.end > at { piece.truncated(at) } else { piece.clone() })
        .collect()
}

/// Alternate the patterns of every sequence, leaving out each sequence's
/// last piece unless `include_last` is set.
fn sequences_to_pattern(table: &VariantTable, sequences: &[Vec<Piece>], include_last: bool) -> String {
    let patterns: Vec<String> = sequences
        .iter()
        .map(|sequence| {
            let len = if include_last {
                sequence.len()
            } else {
                sequence.len().saturating_sub(1)
            };
            let fragments: Vec<String> = sequence[..len]
                .iter()
                .map(|piece| splits_to_pattern(table, &piece.text))
                .collect();
            sequence_pattern(&fragments)
        })
        .unique()
        .collect();
    array_to_pattern(&patterns)
}
