//! Haiku validation: keyword matching and the composed 5-7-5 validator.

mod haiku;
mod keyword;

pub use haiku::{HaikuValidator, LineCheck, SyllableCheck, Verdict};
pub use keyword::{check_keyword, count_occurrences, normalize, KeywordCheck, OccurrenceRule};
