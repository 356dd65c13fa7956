//! Code-point scan producing the characters worth a table entry.

use unicode_normalization::UnicodeNormalization;

use crate::config::{CodePointRange, MAX_FOLDED_LEN};
use crate::fold::fold;

/// One scanned character together with its folded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub code_point: u32,
    pub composed: char,
    pub folded: String,
}

/// Fold `composed` and decide whether it says anything the table needs.
///
/// Characters whose fold is just their lowercase, folds that are empty or
/// longer than [`MAX_FOLDED_LEN`], and characters with no decomposition of
/// their own are all dropped.
pub fn candidate(composed: char) -> Option<Candidate> {
    let mut buf = [0u8; 4];
    let text: &str = composed.encode_utf8(&mut buf);
    let folded = fold(text);

    if folded == text.to_lowercase() {
        return None;
    }
    let folded_len = folded.chars().count();
    if folded_len == 0 || folded_len > MAX_FOLDED_LEN {
        return None;
    }

    let decomposed: String = text.nfkd().collect();
    let recomposed: String = decomposed.nfc().collect();
    if recomposed == text && folded == decomposed {
        return None;
    }

    Some(Candidate {
        code_point: u32::from(composed),
        composed,
        folded,
    })
}

/// A precomposed character whose canonical decomposition survives folding,
/// such as a Hangul syllable or an Arabic letter with madda above.
///
/// [`candidate`] drops these, but text may hold either form and regex
/// engines do not treat them as equal, so the composed char is recorded as a
/// variant of its decomposition.
pub fn composite(composed: char) -> Option<Candidate> {
    let mut buf = [0u8; 4];
    let text: &str = composed.encode_utf8(&mut buf);
    let folded = fold(text);

    let folded_len = folded.chars().count();
    if folded_len < 2 || folded_len > MAX_FOLDED_LEN {
        return None;
    }
    if !text.nfd().eq(folded.chars()) || !folded.nfc().eq(text.chars()) {
        return None;
    }

    Some(Candidate {
        code_point: u32::from(composed),
        composed,
        folded,
    })
}

/// Every [`Candidate`] and [`composite`] in `ranges`, in scan order.
///
/// Ranges are assumed to be validated already.
pub fn candidates(ranges: &[CodePointRange]) -> impl Iterator<Item = Candidate> + '_ {
    ranges
        .iter()
        .flat_map(CodePointRange::chars)
        .filter_map(|c| candidate(c).or_else(|| composite(c)))
}
