//! Folding: reduce text to a lowercase, mark-stripped, ligature-expanded form.

use phf::{Map, phf_map};
use unicode_normalization::UnicodeNormalization;

/// Letters with no compatibility decomposition that still read as a plain
/// base letter, plus the fraction slashes that stand in for `/`.
const SUBSTITUTIONS: Map<char, &'static str> = phf_map! {
    'æ' => "ae",
    'ⱥ' => "a",
    'ø' => "o",
    '\u{2044}' => "/",
    '\u{2215}' => "/",
};

/// Tibetan vowel signs that NFKD reorders across character boundaries.
const REORDER_SENSITIVE: std::ops::RangeInclusive<char> = '\u{0F71}'..='\u{0F81}';

/// Is `c` deleted during folding?
///
/// Covers the Combining Diacritical Marks block plus middle dot and
/// modifier letter right half ring, both of which show up as pseudo-accents.
pub fn is_accent(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{00B7}' | '\u{02BE}')
}

/// Compatibility decomposition that keeps mark order intact.
///
/// `"\u{594}\u{595}\u{596}"` must not come back as `"\u{596}\u{594}\u{595}"`,
/// so text containing reorder-sensitive marks is decomposed one character at
/// a time.
pub fn decompose(text: &str) -> String {
    if text.chars().any(|c| REORDER_SENSITIVE.contains(&c)) {
        text.chars().flat_map(|c| std::iter::once(c).nfkd()).collect()
    } else {
        text.nfkd().collect()
    }
}

/// Fold `text` to its comparison form.
pub fn fold(text: &str) -> String {
    let lowered = decompose(text).to_lowercase();
    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if let Some(replacement) = SUBSTITUTIONS.get(&c) {
            folded.push_str(replacement);
        } else if !is_accent(c) {
            folded.push(c);
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents() {
        assert_eq!(fold("ÀÁÂÃÄÅ"), "aaaaaa");
        assert_eq!(fold("Crème Brûlée"), "creme brulee");
    }

    #[test]
    fn expands_compatibility_forms() {
        assert_eq!(fold("™"), "tm");
        assert_eq!(fold("₨"), "rs");
        assert_eq!(fold("ﬄ"), "ffl");
        assert_eq!(fold("Ⓐ"), "a");
    }

    #[test]
    fn applies_substitutions() {
        assert_eq!(fold("æⱥø"), "aeao");
        assert_eq!(fold("Æ"), "ae");
        assert_eq!(fold("¼"), "1/4");
        assert_eq!(fold("1∕2"), "1/2");
    }

    #[test]
    fn ascii_is_only_lowercased() {
        assert_eq!(fold("Hello, World!"), "hello, world!");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn keeps_tibetan_mark_order() {
        let text = "\u{0F73}\u{0F71}";
        let decomposed = decompose(text);
        assert_eq!(decomposed, "\u{0F71}\u{0F72}\u{0F71}");
    }

    #[test]
    fn unassigned_code_points_fall_through() {
        assert_eq!(fold("\u{0378}"), "\u{0378}");
        assert_eq!(fold("\u{E000}"), "\u{E000}");
    }

    #[test]
    fn fold_is_idempotent() {
        for text in [
            "TM", "™", "ⓉM", "Tℳ", "RSM", "₨M", "R℠", "1/4", "⅟4", "¼", "ÀÁÂÃÄÅ", "æⱥø", "…",
            "‥.", "ﬃ", "Ǆ", "İĲ", "Straße", "ﾊﾞ", "㎧", "⑴",
        ] {
            let once = fold(text);
            assert_eq!(fold(&once), once, "fold not idempotent for {text:?}");
        }
    }
}
