//! Pure string-to-pattern rendering: alternation, repetition and atom tests.

use itertools::Itertools;

/// Is `fragment` one literal character, escaped or not?
pub fn is_single_char(fragment: &str) -> bool {
    let mut chars = fragment.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(_), None, _) => true,
        (Some('\\'), Some(_), None) => true,
        _ => false,
    }
}

/// Can `fragment` take a quantifier without being grouped first?
///
/// True for single characters and for fragments that are one bracketed
/// class or one group from the first byte to the last.
pub fn is_atom(fragment: &str) -> bool {
    if is_single_char(fragment) {
        return true;
    }
    let (open, close) = match fragment.chars().next() {
        Some('[') => ('[', ']'),
        Some('(') => ('(', ')'),
        _ => return false,
    };
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in fragment.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return i + c.len_utf8() == fragment.len();
            }
        }
    }
    false
}

/// Combine alternatives into one pattern.
///
/// `["ab", "a"]` becomes `(?:ab|a)` and `["a", "b"]` becomes `[ab]`.
/// Empty fragments are ignored.
pub fn array_to_pattern<S: AsRef<str>>(fragments: &[S]) -> String {
    let fragments: Vec<&str> = fragments
        .iter()
        .map(S::as_ref)
        .filter(|f| !f.is_empty())
        .collect();
    match fragments.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        _ if fragments.iter().all(|f| is_single_char(f)) => {
            format!("[{}]", fragments.concat())
        }
        _ => format!("(?:{})", fragments.iter().join("|")),
    }
}

/// Concatenate fragments, collapsing runs of identical neighbours into a
/// bounded repetition: `["a", "a", "b"]` becomes `a{2}b`.
pub fn sequence_pattern<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut pattern = String::new();
    for (run, fragment) in fragments.iter().map(S::as_ref).dedup_with_count() {
        if run < 2 || fragment.is_empty() {
            pattern.push_str(fragment);
        } else if is_atom(fragment) {
            pattern.push_str(&format!("{fragment}{{{run}}}"));
        } else {
            pattern.push_str(&format!("(?:{fragment}){{{run}}}"));
        }
    }
    pattern
}
