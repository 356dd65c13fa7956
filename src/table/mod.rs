//! The variant table: folded form to the pattern matching every spelling of it.
//!
//! Built once by scanning code-point ranges. The process-wide instance lives
//! in a [`OnceLock`] and is read-only after construction; callers that need a
//! different range set build their own [`VariantTable`] value.

mod scan;
mod variant_set;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;
use std::time::Instant;

use unicode_normalization::UnicodeNormalization;

use crate::config::{CodePointRange, ConfigError, DEFAULT_CODE_POINTS, MAX_FOLDED_LEN, validate_ranges};

pub use scan::{Candidate, candidate, candidates, composite};
pub use variant_set::VariantSet;

static GLOBAL: OnceLock<VariantTable> = OnceLock::new();

/// Immutable mapping from folded form to alternation pattern.
#[derive(Debug, Default)]
pub struct VariantTable {
    patterns: HashMap<String, String>,
    multi_char_keys: HashSet<String>,
}

impl VariantTable {
    /// Scan `ranges` and build a table.
    ///
    /// Every range is validated before the scan starts.
    pub fn build(ranges: &[CodePointRange]) -> Result<Self, ConfigError> {
        validate_ranges(ranges)?;
        Ok(Self::scan(ranges))
    }

    fn scan(ranges: &[CodePointRange]) -> Self {
        let started = Instant::now();
        tracing::debug!(ranges = ranges.len(), "building variant table");

        let mut sets: BTreeMap<String, VariantSet> = BTreeMap::new();
        let mut scanned = 0usize;
        for Candidate {
            composed, folded, ..
        } in candidates(ranges)
        {
            scanned += 1;
            let mut buf = [0u8; 4];
            let composed: &str = composed.encode_utf8(&mut buf);
            let set = sets.entry(folded.clone()).or_default();
            set.add_matching(&folded);
            set.add_matching(composed);
            // Text may carry the same letter in canonically decomposed form.
            let canonical: String = composed.nfd().collect();
            if canonical != composed {
                set.add_matching(&canonical);
            }
        }

        let before = sets.len();
        sets.retain(|_, set| set.len() >= 2);

        let table = Self::from_sets(&sets);
        tracing::info!(
            scanned,
            keys = table.len(),
            pruned = before - sets.len(),
            multi_char_keys = table.multi_char_key_count(),
            elapsed = ?started.elapsed(),
            "variant table built"
        );
        table
    }

    fn from_sets(sets: &BTreeMap<String, VariantSet>) -> Self {
        let mut patterns = HashMap::with_capacity(sets.len());
        let mut multi_char_keys = HashSet::new();
        for (folded, set) in sets {
            patterns.insert(folded.clone(), set.pattern());
            if folded.chars().count() > 1 {
                multi_char_keys.insert(folded.clone());
            }
        }
        Self {
            patterns,
            multi_char_keys,
        }
    }

    /// Pattern for a folded form, if any spelling other than the folded form
    /// itself exists.
    pub fn get(&self, folded: &str) -> Option<&str> {
        self.patterns.get(folded).map(String::as_str)
    }

    pub fn contains(&self, folded: &str) -> bool {
        self.patterns.contains_key(folded)
    }

    pub fn is_multi_char_key(&self, folded: &str) -> bool {
        self.multi_char_keys.contains(folded)
    }

    /// Length in chars of the longest multi-character key that `chars`
    /// starts with.
    pub fn longest_key_at(&self, chars: &[char]) -> Option<usize> {
        let mut key = String::new();
        (2..=MAX_FOLDED_LEN.min(chars.len())).rev().find(|&len| {
            key.clear();
            key.extend(&chars[..len]);
            self.is_multi_char_key(&key)
        })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn multi_char_key_count(&self) -> usize {
        self.multi_char_keys.len()
    }

    /// `(folded, pattern)` pairs sorted by folded form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .patterns
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries.into_iter()
    }

    /// Compile `needle` against this table.
    pub fn compile(&self, needle: &str) -> String {
        crate::compiler::compile_with(self, needle)
    }
}

/// Build the process-wide table from `ranges` (or the BMP) unless it exists.
///
/// Once built, later calls return the existing table and ignore `ranges`.
pub fn initialize(ranges: Option<&[CodePointRange]>) -> Result<&'static VariantTable, ConfigError> {
    if let Some(table) = GLOBAL.get() {
        return Ok(table);
    }
    let ranges = ranges.unwrap_or(DEFAULT_CODE_POINTS);
    validate_ranges(ranges)?;
    Ok(GLOBAL.get_or_init(|| VariantTable::scan(ranges)))
}

/// The process-wide table, built from the BMP on first use.
pub fn global() -> &'static VariantTable {
    GLOBAL.get_or_init(|| VariantTable::scan(DEFAULT_CODE_POINTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{is_atom, is_single_char};

    fn latin_and_letterlike() -> VariantTable {
        VariantTable::build(&[CodePointRange::new(0, 0x24F), CodePointRange::new(0x2100, 0x214F)])
            .expect("valid ranges")
    }

    #[test]
    fn invalid_ranges_fail_before_scanning() {
        let err = VariantTable::build(&[CodePointRange::new(0x300, 0x100)]).unwrap_err();
        assert_eq!(err, ConfigError::InvertedRange { low: 0x300, high: 0x100 });
        let err = VariantTable::build(&[CodePointRange::new(0, 0x11_0000)]).unwrap_err();
        assert_eq!(err, ConfigError::OutOfRange { high: 0x11_0000 });
    }

    #[test]
    fn empty_range_list_builds_empty_table() {
        let table = VariantTable::build(&[]).expect("no ranges is valid");
        assert!(table.is_empty());
    }

    #[test]
    fn accented_letters_share_a_key() {
        let table = latin_and_letterlike();
        let pattern = table.get("e").expect("e has variants");
        let matcher = regex::Regex::new(&format!("(?i)^{pattern}$")).expect("valid pattern");
        for text in ["e", "E", "è", "é", "ê", "ë", "È", "É", "ℯ"] {
            assert!(matcher.is_match(text), "{text} not matched by {pattern}");
        }
        assert!(!matcher.is_match("a"));
        // Only one of È and è is kept; the other is a case variant.
        assert!(!(pattern.contains('È') && pattern.contains('è')));
    }

    #[test]
    fn every_key_has_at_least_two_variants() {
        let table = latin_and_letterlike();
        assert!(!table.is_empty());
        for (folded, pattern) in table.iter() {
            assert!(
                is_atom(pattern) && !is_single_char(pattern),
                "{folded:?} maps to {pattern:?}"
            );
        }
    }

    #[test]
    fn multi_char_keys_are_recorded() {
        let table = latin_and_letterlike();
        assert!(table.is_multi_char_key("tm"));
        assert!(table.is_multi_char_key("ae"));
        assert!(!table.is_multi_char_key("e"));
        assert!(table.contains("e"));
        assert_eq!(table.get("tm"), Some("(?:tm|™)"));
    }

    #[test]
    fn longest_key_prefers_longer_keys() {
        let table = latin_and_letterlike();
        let chars: Vec<char> = "tmx".chars().collect();
        assert_eq!(table.longest_key_at(&chars), Some(2));
        assert_eq!(table.longest_key_at(&chars[1..]), None);
        assert_eq!(table.longest_key_at(&[]), None);
    }

    #[test]
    fn table_iteration_is_sorted() {
        let table = latin_and_letterlike();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn global_table_is_built_once() {
        let first = initialize(None).expect("default ranges are valid");
        let second = global();
        assert!(std::ptr::eq(first, second));
        assert!(first.is_multi_char_key("rs"));
    }

    #[test]
    fn concurrent_first_use_sees_one_table() {
        let tables: Vec<&'static VariantTable> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    scope.spawn(move || {
                        if n % 2 == 0 {
                            initialize(None).expect("default ranges are valid")
                        } else {
                            global()
                        }
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("thread panicked"))
                .collect()
        });
        for table in &tables {
            assert!(std::ptr::eq(*table, tables[0]));
            assert!(table.is_multi_char_key("tm"));
        }
    }

    #[test]
    fn composed_syllables_are_keyed_by_their_jamo() {
        let table = VariantTable::build(&[CodePointRange::new(0xAC00, 0xAC03)]).expect("valid ranges");
        assert!(table.is_multi_char_key("\u{1100}\u{1161}"));
        let pattern = table.get("\u{1100}\u{1161}\u{11A8}").expect("각 has a key");
        let matcher = regex::Regex::new(&format!("^{pattern}$")).expect("valid pattern");
        assert!(matcher.is_match("각"));
        assert!(matcher.is_match("\u{1100}\u{1161}\u{11A8}"));
    }
}
