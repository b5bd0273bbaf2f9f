//! Two-tier syllable counting: exact phonetic dictionary lookup with a
//! hyphenation-based estimator fallback.

mod counter;

pub(crate) use counter::DASH_VARIANTS;
pub use counter::SyllableCounter;
