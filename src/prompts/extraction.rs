//! Keyword recovery from raw generation prompts.
//!
//! Each template contributes the 10 characters immediately preceding the
//! keyword placeholder; that prefix locates the keyword inside a concrete
//! prompt. The table is built once from the template set and passed to
//! whichever collaborator needs it, instead of accumulating in module
//! state at load time.

use regex::Regex;

use crate::error::PromptError;

use super::templates::{HAIKU_PROMPTS, KEYWORD_PLACEHOLDER};

/// How many characters before the placeholder identify a template.
const PREFIX_LEN: usize = 10;

/// Trailing qualifier of template 4, which embeds the keyword
/// mid-sentence.
const TEMPLATE_4_SUFFIX: &str = " in physics";
const TEMPLATE_4_INDEX: usize = 4;

/// Compiled per-template patterns for keyword extraction.
pub struct ExtractionTable {
    patterns: Vec<Regex>,
}

impl ExtractionTable {
    /// Builds the table from a template set.
    ///
    /// Every template must contain the `<keyword>` placeholder preceded by
    /// enough unique context to identify it in a concrete prompt.
    pub fn new(templates: &[&str]) -> Result<Self, PromptError> {
        let mut patterns = Vec::with_capacity(templates.len());
        for (i, template) in templates.iter().enumerate() {
            let position = template
                .find(KEYWORD_PLACEHOLDER)
                .ok_or(PromptError::MissingPlaceholder(i + 1))?;
            let prefix = &template[position.saturating_sub(PREFIX_LEN)..position];
            let pattern = Regex::new(&format!("{}(.+?)\\.", regex::escape(prefix)))?;
            patterns.push(pattern);
        }
        Ok(Self { patterns })
    }

    /// Builds the table for the standard five templates.
    pub fn standard() -> Result<Self, PromptError> {
        Self::new(&HAIKU_PROMPTS)
    }

    /// Number of templates the table covers.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Recovers the keyword from a concrete prompt produced by template
    /// `prompt_index` (1-based).
    pub fn extract_keyword(
        &self,
        prompt: &str,
        prompt_index: usize,
    ) -> Result<String, PromptError> {
        let pattern = self
            .patterns
            .get(prompt_index.wrapping_sub(1))
            .ok_or(PromptError::IndexOutOfRange(
                prompt_index,
                self.patterns.len(),
            ))?;

        let captured = pattern
            .captures(prompt)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| PromptError::KeywordNotFound(prompt.to_string()))?
            .as_str()
            .trim();

        let keyword = if prompt_index == TEMPLATE_4_INDEX {
            captured
                .strip_suffix(TEMPLATE_4_SUFFIX)
                .ok_or_else(|| PromptError::KeywordNotFound(prompt.to_string()))?
        } else {
            captured
        };

        Ok(keyword.trim().to_string())
    }
}
