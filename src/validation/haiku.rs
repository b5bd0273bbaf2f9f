//! The composed haiku validator: line shape, keyword inclusion and the
//! 5-7-5 syllable contract, with accumulated diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::SyllableError;
use crate::syllable::SyllableCounter;

use super::keyword::{check_keyword, OccurrenceRule};

/// The fixed per-line syllable targets of a haiku.
const SYLLABLE_TARGETS: [usize; 3] = [5, 7, 5];

/// Pass/fail verdict for a single record.
///
/// `reason` is `Some` iff the record failed, holding every failing check's
/// diagnostic joined with " | " in line / keyword / syllable order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    pub reason: Option<String>,
}

impl Verdict {
    fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    fn fail(reason: String) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
        }
    }
}

/// Result of the line-count check.
#[derive(Debug, Clone, Copy)]
pub struct LineCheck {
    pub passed: bool,
    /// Number of lines actually present.
    pub lines: usize,
}

/// Result of the syllable check, with per-line counts for diagnostics.
#[derive(Debug, Clone)]
pub struct SyllableCheck {
    pub passed: bool,
    /// Counts for every present line, including any beyond the third.
    pub counts: Vec<usize>,
}

/// Validates (keyword, haiku) pairs against the three structural checks.
///
/// The checks are independent and all applicable diagnostics are reported
/// together; nothing short-circuits.
pub struct HaikuValidator {
    counter: SyllableCounter,
    rule: OccurrenceRule,
}

impl HaikuValidator {
    /// Creates a validator for curated records (exactly one keyword
    /// occurrence).
    pub fn new() -> Result<Self, SyllableError> {
        Self::with_rule(OccurrenceRule::ExactlyOne)
    }

    /// Creates a validator with an explicit occurrence rule.
    pub fn with_rule(rule: OccurrenceRule) -> Result<Self, SyllableError> {
        Ok(Self {
            counter: SyllableCounter::new()?,
            rule,
        })
    }

    /// The occurrence rule this validator applies.
    pub fn rule(&self) -> OccurrenceRule {
        self.rule
    }

    /// Access to the underlying syllable counter.
    pub fn counter(&self) -> &SyllableCounter {
        &self.counter
    }

    /// Checks that the haiku has exactly 3 newline-separated lines.
    pub fn check_lines(&self, haiku: &str) -> LineCheck {
        let lines = haiku.trim().split('\n').count();
        LineCheck {
            passed: lines == 3,
            lines,
        }
    }

    /// Checks every present line against the 5-7-5 targets.
    ///
    /// Counts are reported for all lines so diagnostics stay useful past
    /// the third line. The check passes iff at least 3 lines are present
    /// and each of the first 3 matches its target; it never panics on
    /// short input.
    pub fn check_syllables(&self, haiku: &str) -> SyllableCheck {
        let counts: Vec<usize> = haiku
            .trim()
            .split('\n')
            .map(|line| self.counter.count_phrase(line))
            .collect();

        let passed = counts.len() >= SYLLABLE_TARGETS.len()
            && counts
                .iter()
                .zip(SYLLABLE_TARGETS.iter())
                .all(|(actual, target)| actual == target);

        SyllableCheck { passed, counts }
    }

    /// Runs all three checks and accumulates every failing diagnostic.
    pub fn validate(&self, keyword: &str, haiku: &str) -> Verdict {
        let mut failed_checks = Vec::new();

        let lines = self.check_lines(haiku);
        if !lines.passed {
            failed_checks.push(format!("LINE COUNT ERROR: Haiku has {} lines.", lines.lines));
        }

        let keyword_check = check_keyword(keyword, haiku, self.rule);
        if !keyword_check.passed {
            failed_checks.push(format!(
                "KEYWORD ERROR: Keyword appears {} times.",
                keyword_check.occurrences
            ));
        }

        let syllables = self.check_syllables(haiku);
        if !syllables.passed {
            failed_checks.push(format!(
                "SYLLABLE COUNT ERROR: Syllable counts per line: {:?}.",
                syllables.counts
            ));
        }

        if failed_checks.is_empty() {
            Verdict::pass()
        } else {
            Verdict::fail(failed_checks.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Built from monosyllabic words so the dictionary counts are stable.
    const GOOD_HAIKU: &str = "the sun burns so bright\nlight falls through the cold dark night\nwarm rays touch the ground";

    fn validator() -> HaikuValidator {
        HaikuValidator::new().expect("embedded dictionaries should load")
    }

    #[test]
    fn test_valid_haiku_passes() {
        let verdict = validator().validate("sun", GOOD_HAIKU);
        assert!(verdict.passed, "reason: {:?}", verdict.reason);
        assert!(verdict.reason.is_none());
    }

    #[test]
    fn test_two_lines_fail_line_and_syllable_checks() {
        let verdict = validator().validate("force", "line one\nline two");
        assert!(!verdict.passed);
        let reason = verdict.reason.expect("failing verdict carries a reason");
        assert!(reason.contains("LINE COUNT ERROR: Haiku has 2 lines."));
        assert!(reason.contains("SYLLABLE COUNT ERROR"));
    }

    #[test]
    fn test_repeated_keyword_fails_with_occurrence_count() {
        let haiku = "force force force here\nwind blows through the tall dark pines\nstones rest on wet moss";
        let verdict = validator().validate("force", haiku);
        assert!(!verdict.passed);
        let reason = verdict.reason.expect("failing verdict carries a reason");
        assert!(reason.contains("KEYWORD ERROR: Keyword appears 3 times."));
    }

    #[test]
    fn test_four_lines_fail_only_line_check_when_syllables_match() {
        let haiku = format!("{GOOD_HAIKU}\nmoss on stone");
        let verdict = validator().validate("sun", &haiku);
        assert!(!verdict.passed);
        let reason = verdict.reason.expect("failing verdict carries a reason");
        assert!(reason.contains("LINE COUNT ERROR: Haiku has 4 lines."));
        // First three lines still meet 5-7-5, so no syllable diagnostic.
        assert!(!reason.contains("SYLLABLE COUNT ERROR"));
    }

    #[test]
    fn test_syllable_diagnostic_reports_all_line_counts() {
        let check = validator().check_syllables("line one\nline two");
        assert!(!check.passed);
        assert_eq!(check.counts.len(), 2);
    }

    #[test]
    fn test_one_or_two_rule_tolerates_repeat() {
        let validator = HaikuValidator::with_rule(OccurrenceRule::OneOrTwo)
            .expect("embedded dictionaries should load");
        let haiku = "the sun meets the sun\nlight falls through the cold dark night\nwarm rays touch the ground";
        let verdict = validator.validate("sun", haiku);
        assert!(verdict.passed, "reason: {:?}", verdict.reason);
    }

    #[test]
    fn test_keyword_matches_across_hyphen_renderings() {
        // Keyword is stored hyphenated, haiku renders it with a space.
        let haiku = "the four vector turns\nlight falls through the cold dark night\nwarm rays touch the ground";
        let verdict = validator().validate("four-vector", haiku);
        let reason = verdict.reason.clone().unwrap_or_default();
        assert!(
            !reason.contains("KEYWORD ERROR"),
            "unexpected keyword failure: {reason}"
        );
    }
}
