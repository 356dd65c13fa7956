//! The growing set of source spellings that share one folded form.

use regex::{Regex, RegexBuilder};

use crate::pattern::array_to_pattern;

/// Escaped variants of one folded form, in the order they were accepted.
///
/// A candidate joins the set only if the set's own pattern, anchored and
/// case-insensitive, does not already match it. `É` is never added next to
/// `é`.
#[derive(Debug, Default)]
pub struct VariantSet {
    raw: Vec<String>,
    escaped: Vec<String>,
    matcher: Option<Regex>,
}

impl VariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.escaped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.escaped.is_empty()
    }

    /// Add `variant` unless the set already matches it. Returns whether it
    /// was added.
    pub fn add_matching(&mut self, variant: &str) -> bool {
        if self.matches(variant) {
            return false;
        }
        self.raw.push(variant.to_string());
        self.escaped.push(regex::escape(variant));
        self.matcher = None;
        true
    }

    fn matches(&mut self, variant: &str) -> bool {
        if self.raw.iter().any(|r| r == variant) {
            return true;
        }
        if self.escaped.is_empty() {
            return false;
        }
        if self.matcher.is_none() {
            let anchored = format!("^(?:{})$", self.pattern());
            match RegexBuilder::new(&anchored).case_insensitive(true).build() {
                Ok(matcher) => self.matcher = Some(matcher),
                Err(err) => {
                    tracing::warn!(pattern = %anchored, error = %err, "variant set pattern rejected");
                    return false;
                }
            }
        }
        self.matcher.as_ref().is_some_and(|m| m.is_match(variant))
    }

    /// Render the set as one self-contained alternation.
    pub fn pattern(&self) -> String {
        array_to_pattern(&self.escaped)
    }

    /// Unescaped members, first-added first.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.raw.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_case_variants() {
        let mut set = VariantSet::new();
        assert!(set.add_matching("é"));
        assert!(!set.add_matching("É"));
        assert!(!set.add_matching("é"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn single_chars_render_as_class() {
        let mut set = VariantSet::new();
        set.add_matching("a");
        set.add_matching("ⓐ");
        set.add_matching("Ⓐ");
        assert_eq!(set.pattern(), "[aⓐ]");
    }

    #[test]
    fn multi_chars_render_as_group() {
        let mut set = VariantSet::new();
        set.add_matching("tm");
        set.add_matching("™");
        assert_eq!(set.pattern(), "(?:tm|™)");
        assert_eq!(set.variants().collect::<Vec<_>>(), vec!["tm", "™"]);
    }

    #[test]
    fn metacharacters_are_escaped() {
        let mut set = VariantSet::new();
        set.add_matching(".");
        set.add_matching("．");
        assert_eq!(set.pattern(), "[\\.．]");
        // An escaped dot is not a wildcard.
        assert!(set.add_matching("x"));
    }
}
