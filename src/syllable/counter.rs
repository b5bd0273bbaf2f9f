//! Syllable counter over a phonetic dictionary with estimator fallback.
//!
//! The exact tier looks words up in the embedded CMU pronouncing dictionary
//! and counts the stress markers of the first listed pronunciation. Words
//! absent from the dictionary fall back to a Knuth-Liang hyphenation
//! estimate. The dictionary result always wins when present; the two tiers
//! are never blended.

use arpabet::{load_cmudict, Arpabet};
use hyphenation::{Hyphenator, Language, Load, Standard};

use crate::error::SyllableError;

/// Hyphen and dash variants that join compound physics terms.
pub(crate) const DASH_VARIANTS: &[char] = &['-', '\u{2013}', '\u{2014}', '\u{2212}'];

/// Counts syllables in single words and whitespace-separated phrases.
///
/// Counting is pure and deterministic: the same word always yields the
/// same count.
pub struct SyllableCounter {
    cmudict: &'static Arpabet,
    estimator: Standard,
}

impl SyllableCounter {
    /// Creates a counter backed by the embedded CMU dictionary and English
    /// hyphenation patterns.
    pub fn new() -> Result<Self, SyllableError> {
        Ok(Self {
            cmudict: load_cmudict(),
            estimator: Standard::from_embedded(Language::EnglishUS)?,
        })
    }

    /// Counts syllables in a single token.
    ///
    /// Hyphenated compounds are counted per part ("non-inertial" is "non"
    /// plus "inertial", not one opaque token). Tokens that reduce to
    /// nothing once stripped of non-letter characters contribute zero.
    pub fn count(&self, word: &str) -> usize {
        word.split(DASH_VARIANTS)
            .map(|part| self.count_part(part))
            .sum()
    }

    /// Sums [`count`](Self::count) over the whitespace-separated words of
    /// a phrase. Used for haiku lines and multi-word keywords.
    pub fn count_phrase(&self, text: &str) -> usize {
        text.split_whitespace().map(|word| self.count(word)).sum()
    }

    fn count_part(&self, part: &str) -> usize {
        let cleaned: String = part
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || *c == '\'')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if cleaned.is_empty() {
            return 0;
        }

        match self.cmudict.get_polyphone_str(&cleaned) {
            Some(phones) => phones
                .iter()
                .filter(|phone| {
                    phone
                        .chars()
                        .last()
                        .map(|c| c.is_ascii_digit())
                        .unwrap_or(false)
                })
                .count(),
            None => self.estimate(&cleaned),
        }
    }

    /// Hyphenation-based estimate for words missing from the dictionary.
    fn estimate(&self, word: &str) -> usize {
        self.estimator.hyphenate(word).breaks.len() + 1
    }
}
