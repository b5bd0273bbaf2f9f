//! SFT reformatting: derives prompt/response fields from validated
//! curated records, so training-format experiments stay cheap.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::HaikuRecord;
use crate::error::FormatError;

/// Terminator appended to every SFT response.
const RESPONSE_END: &str = "<END>";

/// A curated record with the derived SFT fields attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SftRecord {
    pub keyword: String,
    pub haiku: String,
    pub prompt: String,
    pub response: String,
}

/// Derives the SFT prompt/response pair for one curated record.
///
/// `index` is the record's 1-based position, used in diagnostics. The
/// haiku must have at least 3 lines; merged corpora guarantee exactly 3.
pub fn format_for_sft(record: &HaikuRecord, index: usize) -> Result<SftRecord, FormatError> {
    let lines: Vec<&str> = record.haiku.trim().split('\n').collect();
    if lines.len() < 3 {
        return Err(FormatError::ShortHaiku {
            index,
            lines: lines.len(),
        });
    }

    let prompt = format!("Write 3 lines about Keyword: {}\n1)\n2)\n3)", record.keyword);
    let response = format!(
        "1) {}\n2) {}\n3) {}\n{RESPONSE_END}",
        lines[0], lines[1], lines[2]
    );

    Ok(SftRecord {
        keyword: record.keyword.clone(),
        haiku: record.haiku.clone(),
        prompt,
        response,
    })
}

/// Rewrites a merged corpus file with SFT fields added to every record.
pub struct SftFormatter;

impl SftFormatter {
    /// Reads `input` and writes the reformatted records to `output`,
    /// truncating it first. Returns the number of records written.
    pub fn run(input: &Path, output: &Path) -> Result<usize, FormatError> {
        let reader = BufReader::new(File::open(input)?);
        let mut out = BufWriter::new(File::create(output)?);

        let mut written = 0;
        for line in reader.lines() {
            let line = line?;
            written += 1;
            let record: HaikuRecord =
                serde_json::from_str(&line).map_err(|e| FormatError::Malformed {
                    index: written,
                    reason: e.to_string(),
                })?;
            let formatted = format_for_sft(&record, written)?;
            let json = serde_json::to_string(&formatted)?;
            writeln!(out, "{json}")?;
        }
        out.flush()?;

        info!(
            records = written,
            output = %output.display(),
            "SFT reformat finished"
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(keyword: &str, haiku: &str) -> HaikuRecord {
        HaikuRecord {
            keyword: keyword.to_string(),
            haiku: haiku.to_string(),
        }
    }

    #[test]
    fn test_format_derives_prompt_and_response() {
        let formatted = format_for_sft(&record("force", "one\ntwo\nthree"), 1)
            .expect("three lines are enough");
        assert_eq!(
            formatted.prompt,
            "Write 3 lines about Keyword: force\n1)\n2)\n3)"
        );
        assert_eq!(formatted.response, "1) one\n2) two\n3) three\n<END>");
        // Original fields survive.
        assert_eq!(formatted.keyword, "force");
        assert_eq!(formatted.haiku, "one\ntwo\nthree");
    }

    #[test]
    fn test_format_rejects_short_haiku() {
        let err = format_for_sft(&record("force", "one\ntwo"), 4).expect_err("two lines");
        match err {
            FormatError::ShortHaiku { index, lines } => {
                assert_eq!(index, 4);
                assert_eq!(lines, 2);
            }
            other => panic!("expected short-haiku error, got {other}"),
        }
    }

    #[test]
    fn test_run_truncates_output_between_runs() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("merged.jsonl");
        let output = dir.path().join("train_data.jsonl");

        fs::write(
            &input,
            "{\"keyword\": \"force\", \"haiku\": \"one\\ntwo\\nthree\"}\n",
        )
        .expect("write input");

        let first = SftFormatter::run(&input, &output).expect("format succeeds");
        let first_bytes = fs::read(&output).expect("output exists");
        let second = SftFormatter::run(&input, &output).expect("format succeeds");
        let second_bytes = fs::read(&output).expect("output exists");

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_run_reports_malformed_record_index() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("merged.jsonl");
        let output = dir.path().join("train_data.jsonl");

        fs::write(&input, "not json\n").expect("write input");

        let err = SftFormatter::run(&input, &output).expect_err("malformed input");
        match err {
            FormatError::Malformed { index, .. } => assert_eq!(index, 1),
            other => panic!("expected malformed error, got {other}"),
        }
    }
}
