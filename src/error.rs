//! Error types for haiku-forge operations.
//!
//! Defines error types for the major subsystems:
//! - Syllable counter construction
//! - Prompt templates and keyword extraction
//! - Corpus scanning
//! - Merge and SFT formatting pipelines
//!
//! Validation failure is never an error: it is reported as data through
//! `Verdict` and `CorpusReport`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while constructing the syllable counter.
#[derive(Debug, Error)]
pub enum SyllableError {
    #[error("Failed to load hyphenation patterns: {0}")]
    PatternLoad(#[from] hyphenation::load::Error),
}

/// Errors that can occur during prompt template handling.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Template {0} has no <keyword> placeholder")]
    MissingPlaceholder(usize),

    #[error("Prompt index {0} is out of range (expected 1..={1})")]
    IndexOutOfRange(usize, usize),

    #[error("Could not extract keyword from prompt: {0}")]
    KeywordNotFound(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Errors that can occur while scanning a corpus file.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A record whose required fields are absent or unparseable. Under the
    /// strict policy this terminates the current file's scan.
    #[error("Record #{index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Failed to create output file '{path}': {source}")]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write to output file: {0}")]
    WriteOutput(std::io::Error),

    #[error("Scan failed for source '{path}': {source}")]
    Scan { path: PathBuf, source: ScanError },
}

/// Errors that can occur during SFT reformatting.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Record #{index} has {lines} lines; SFT formatting requires 3")]
    ShortHaiku { index: usize, lines: usize },

    #[error("Record #{index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
