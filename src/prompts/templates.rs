//! The fixed haiku generation prompt templates and the composed
//! batch-generation request.

use crate::error::PromptError;

/// Placeholder substituted with a keyword in each template.
pub const KEYWORD_PLACEHOLDER: &str = "<keyword>";

/// The five prompt templates Cartesian-producted with keywords during
/// data generation (generation only, not SFT itself).
pub const HAIKU_PROMPTS: [&str; 5] = [
    "write a haiku about <keyword>",
    "generate a physics haiku on <keyword>",
    "compose a haiku related to <keyword>",
    "create a haiku that describes <keyword> in physics",
    "produce a short haiku about the physics of <keyword>",
];

const GENERATION_HEADER: &str = "Write .jsonl output where each of 25 JSON objects \
has three key-value pairs. The first key is 'prompt_num', the second key is \
'keyword' and the third key is 'haiku'. For the prompt_num value, insert";

const KEYWORD_INSTRUCTION: &str = "For the keyword value, insert <keyword> where \
<keyword> is replaced by one of 25 keywords from the list";

const HAIKU_INSTRUCTION: &str = "For the 'haiku' value,";

const GENERATION_FOOTER: &str = "where <keyword> is the same as the keyword value. \
Be sure to enforce a 5-7-5 syllable count, to enforce 3 line haikus, and to \
use the physics keyword somewhere once while sticking to the physics topic as \
best as you can. Make sure the first line has five syllables. Make sure the second \
line has seven syllables. Make sure the third line has five syllables. Use a careful \
algorithm to count and enforce each of the lines' syllables. If a line does not \
have the correct syllable count, regenerate that line until it does. \
Do not repeat any lines between different haikus.";

fn template(prompt_index: usize) -> Result<&'static str, PromptError> {
    HAIKU_PROMPTS
        .get(prompt_index.wrapping_sub(1))
        .copied()
        .ok_or(PromptError::IndexOutOfRange(
            prompt_index,
            HAIKU_PROMPTS.len(),
        ))
}

/// Renders the concrete prompt a single record carries, for template
/// `prompt_index` (1-based).
pub fn render_prompt(prompt_index: usize, keyword: &str) -> Result<String, PromptError> {
    Ok(format!(
        "{}.",
        template(prompt_index)?.replace(KEYWORD_PLACEHOLDER, keyword)
    ))
}

/// Composes the batch generation request for one keyword family and one
/// of the five templates (1-based `prompt_index`).
pub fn build_generation_prompt(
    keywords: &[&str],
    prompt_index: usize,
) -> Result<String, PromptError> {
    let template = template(prompt_index)?;
    let keyword_list = format!("['{}']", keywords.join("', '"));
    Ok(format!(
        "{GENERATION_HEADER} {prompt_index}. {KEYWORD_INSTRUCTION} {keyword_list}. \
{HAIKU_INSTRUCTION} {template} {GENERATION_FOOTER}"
    ))
}
