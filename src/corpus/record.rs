//! Record schemas for haiku corpora.
//!
//! Two line-delimited JSON shapes exist: curated {"keyword", "haiku"}
//! records, and raw {"prompt", "response"} records from which the keyword
//! must be recovered via the prompt template that produced them.

use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::prompts::ExtractionTable;
use crate::validation::OccurrenceRule;

/// A curated training record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaikuRecord {
    pub keyword: String,
    pub haiku: String,
}

/// A raw generation record; the producing template's index arrives out of
/// band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    pub prompt: String,
    pub response: String,
}

/// A record resolved to the (keyword, haiku) pair the validator consumes.
#[derive(Debug, Clone)]
pub struct ResolvedRecord {
    pub keyword: String,
    pub haiku: String,
}

/// Resolves raw JSONL lines into validator input for one record schema.
#[derive(Clone, Copy)]
pub enum RecordResolver<'a> {
    /// Curated {"keyword", "haiku"} records.
    Curated,
    /// Raw {"prompt", "response"} records produced by prompt template
    /// `prompt_index` (1-based), resolved through an extraction table.
    PromptResponse {
        table: &'a ExtractionTable,
        prompt_index: usize,
    },
}

impl RecordResolver<'_> {
    /// Parses one JSONL line into a resolved record.
    ///
    /// `index` is the record's 1-based position in its file, carried into
    /// diagnostics.
    pub fn resolve(&self, line: &str, index: usize) -> Result<ResolvedRecord, ScanError> {
        match self {
            RecordResolver::Curated => {
                let record: HaikuRecord = parse_record(line, index)?;
                Ok(ResolvedRecord {
                    keyword: record.keyword,
                    haiku: record.haiku,
                })
            }
            RecordResolver::PromptResponse {
                table,
                prompt_index,
            } => {
                let record: PromptRecord = parse_record(line, index)?;
                let keyword = table
                    .extract_keyword(&record.prompt, *prompt_index)
                    .map_err(|e| ScanError::Malformed {
                        index,
                        reason: e.to_string(),
                    })?;
                Ok(ResolvedRecord {
                    keyword,
                    haiku: record.response,
                })
            }
        }
    }

    /// The occurrence rule canonical for this schema: curated records
    /// require exactly one keyword occurrence, raw records tolerate two.
    pub fn occurrence_rule(&self) -> OccurrenceRule {
        match self {
            RecordResolver::Curated => OccurrenceRule::ExactlyOne,
            RecordResolver::PromptResponse { .. } => OccurrenceRule::OneOrTwo,
        }
    }
}

fn parse_record<T: for<'de> Deserialize<'de>>(line: &str, index: usize) -> Result<T, ScanError> {
    serde_json::from_str(line).map_err(|e| ScanError::Malformed {
        index,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_resolution() {
        let resolver = RecordResolver::Curated;
        let record = resolver
            .resolve(r#"{"keyword": "force", "haiku": "a\nb\nc"}"#, 1)
            .expect("well-formed record");
        assert_eq!(record.keyword, "force");
        assert_eq!(record.haiku, "a\nb\nc");
    }

    #[test]
    fn test_curated_missing_field_is_malformed() {
        let resolver = RecordResolver::Curated;
        let result = resolver.resolve(r#"{"keyword": "force"}"#, 7);
        match result {
            Err(ScanError::Malformed { index, .. }) => assert_eq!(index, 7),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_prompt_response_resolution() {
        let table = ExtractionTable::standard().expect("standard templates are well-formed");
        let resolver = RecordResolver::PromptResponse {
            table: &table,
            prompt_index: 1,
        };
        let line = r#"{"prompt": "write a haiku about entropy.", "response": "a\nb\nc"}"#;
        let record = resolver.resolve(line, 1).expect("well-formed record");
        assert_eq!(record.keyword, "entropy");
        assert_eq!(record.haiku, "a\nb\nc");
        assert_eq!(resolver.occurrence_rule(), OccurrenceRule::OneOrTwo);
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let resolver = RecordResolver::Curated;
        let record = resolver
            .resolve(r#"{"keyword": "force", "haiku": "a\nb\nc", "id": 3}"#, 1)
            .expect("extra fields are fine");
        assert_eq!(record.keyword, "force");
    }
}
