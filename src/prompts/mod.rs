//! Prompt templates used to solicit haiku generation, and keyword
//! recovery from raw prompt/response records.
//!
//! Generation itself happens in an external LLM; this module only carries
//! the fixed template data, the composed batch-generation request, and the
//! extraction table that recovers a keyword from a concrete prompt.

mod extraction;
mod templates;

pub use extraction::ExtractionTable;
pub use templates::{
    build_generation_prompt, render_prompt, HAIKU_PROMPTS, KEYWORD_PLACEHOLDER,
};
