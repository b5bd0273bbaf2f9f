//! Physics keyword families used to solicit haiku generation, and the
//! keyword syllable-budget audit.

mod families;

pub use families::{audit_keywords, Family, OversizedKeyword, KEYWORD_SYLLABLE_BUDGET};
