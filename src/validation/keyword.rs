//! Keyword normalization and verbatim occurrence matching.
//!
//! A keyword stored as "four-vector" must match haiku text that renders it
//! as "four vector" or "four—vector", and the generating model capitalizes
//! inconsistently, so both sides are normalized before comparison.

use serde::{Deserialize, Serialize};

use crate::syllable::DASH_VARIANTS;

/// How many verbatim keyword occurrences a record is allowed.
///
/// Curated keyword/haiku records require exactly one occurrence; raw
/// prompt/response records tolerate a single repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccurrenceRule {
    /// The keyword must appear exactly once.
    ExactlyOne,
    /// The keyword must appear once or twice.
    OneOrTwo,
}

impl OccurrenceRule {
    /// Whether `occurrences` satisfies this rule.
    pub fn allows(&self, occurrences: usize) -> bool {
        match self {
            OccurrenceRule::ExactlyOne => occurrences == 1,
            OccurrenceRule::OneOrTwo => occurrences == 1 || occurrences == 2,
        }
    }
}

/// Result of the keyword check on a single haiku.
#[derive(Debug, Clone, Copy)]
pub struct KeywordCheck {
    /// Whether the occurrence count satisfied the rule.
    pub passed: bool,
    /// Non-overlapping occurrences of the normalized keyword.
    pub occurrences: usize,
}

/// Normalizes text for keyword comparison: lowercase, dash variants
/// replaced by spaces, whitespace runs collapsed to a single space,
/// trimmed.
pub fn normalize(text: &str) -> String {
    let lowered = text
        .chars()
        .map(|c| if DASH_VARIANTS.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .to_lowercase();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Counts non-overlapping literal occurrences of the normalized `keyword`
/// in the normalized `text`.
pub fn count_occurrences(keyword: &str, text: &str) -> usize {
    let keyword = normalize(keyword);
    let text = normalize(text);
    text.matches(&keyword).count()
}

/// Checks `keyword` against `text` under the given occurrence rule.
pub fn check_keyword(keyword: &str, text: &str, rule: OccurrenceRule) -> KeywordCheck {
    let occurrences = count_occurrences(keyword, text);
    KeywordCheck {
        passed: rule.allows(occurrences),
        occurrences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dash_variants() {
        assert_eq!(normalize("Four-Vector"), "four vector");
        assert_eq!(normalize("four vector"), "four vector");
        assert_eq!(normalize("four\u{2014}vector"), "four vector");
        assert_eq!(normalize("four\u{2212}vector"), "four vector");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  heat   capacity \n"), "heat capacity");
    }

    #[test]
    fn test_count_occurrences_across_renderings() {
        assert_eq!(
            count_occurrences("four-vector", "the Four Vector appears once"),
            1
        );
        assert_eq!(count_occurrences("force", "force meets force"), 2);
        assert_eq!(count_occurrences("entropy", "no such word here"), 0);
    }

    #[test]
    fn test_exactly_one_rule() {
        let check = check_keyword("four-vector", "the Four Vector appears once", OccurrenceRule::ExactlyOne);
        assert!(check.passed);
        assert_eq!(check.occurrences, 1);

        let check = check_keyword("force", "force meets force", OccurrenceRule::ExactlyOne);
        assert!(!check.passed);
        assert_eq!(check.occurrences, 2);
    }

    #[test]
    fn test_one_or_two_rule() {
        assert!(OccurrenceRule::OneOrTwo.allows(1));
        assert!(OccurrenceRule::OneOrTwo.allows(2));
        assert!(!OccurrenceRule::OneOrTwo.allows(0));
        assert!(!OccurrenceRule::OneOrTwo.allows(3));
    }
}
