//! Export stages: SFT reformatting of merged corpora.

mod sft;

pub use sft::{format_for_sft, SftFormatter, SftRecord};
