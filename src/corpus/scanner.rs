//! Corpus scanner: applies the validator to every record of a JSONL file
//! and produces a per-file report.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScanError;
use crate::validation::HaikuValidator;

use super::record::RecordResolver;

/// Sink for human-readable progress and summary lines.
///
/// Scanning and merging report through this trait so callers can capture,
/// redirect or suppress the output.
pub trait ReportSink {
    fn line(&mut self, message: &str);
}

/// Prints report lines to stdout.
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn line(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Discards all report lines.
pub struct NullSink;

impl ReportSink for NullSink {
    fn line(&mut self, _message: &str) {}
}

/// What to do with a record whose required fields are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the current file's scan (fail-fast data hygiene).
    #[default]
    Strict,
    /// Count the record as failed with a distinct diagnostic and continue.
    Lenient,
}

/// Options controlling a corpus scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// When set, the file must contain exactly this many records; a
    /// mismatch is a file-level failure tracked separately from the
    /// failed-record tally.
    pub expected_count: Option<usize>,
    pub malformed: MalformedPolicy,
}

/// A single failed record, or a file-level failure, in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureDetail {
    /// 1-based record index; count-mismatch entries use total + 1.
    pub index: usize,
    pub reason: String,
}

/// Aggregate result of scanning one corpus file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusReport {
    /// Records read.
    pub total: usize,
    /// Records that failed validation.
    pub failed: usize,
    /// One entry per failed record, plus any expected-count mismatch.
    pub failure_details: Vec<FailureDetail>,
}

impl CorpusReport {
    /// Whether the file passed: no failed records and no file-level
    /// failure such as an expected-count mismatch.
    pub fn passed(&self) -> bool {
        self.failure_details.is_empty()
    }
}

/// Scans corpus files record by record, in file order.
pub struct CorpusScanner<'a> {
    validator: &'a HaikuValidator,
    resolver: RecordResolver<'a>,
    options: ScanOptions,
}

impl<'a> CorpusScanner<'a> {
    pub fn new(
        validator: &'a HaikuValidator,
        resolver: RecordResolver<'a>,
        options: ScanOptions,
    ) -> Self {
        Self {
            validator,
            resolver,
            options,
        }
    }

    /// Scans a reader of line-delimited JSON records.
    ///
    /// Indices in the report are 1-based and follow file order. Under the
    /// strict malformed policy an unparseable record terminates the scan;
    /// under the lenient policy it is counted as a failure and the scan
    /// continues.
    pub fn scan<R: BufRead>(&self, reader: R) -> Result<CorpusReport, ScanError> {
        let mut report = CorpusReport::default();

        for line in reader.lines() {
            let line = line?;
            report.total += 1;
            let index = report.total;

            let resolved = match self.resolver.resolve(&line, index) {
                Ok(resolved) => resolved,
                Err(err) => match self.options.malformed {
                    MalformedPolicy::Strict => return Err(err),
                    MalformedPolicy::Lenient => {
                        report.failed += 1;
                        report.failure_details.push(FailureDetail {
                            index,
                            reason: format!("Haiku #{index} malformed: {err}"),
                        });
                        continue;
                    }
                },
            };

            let verdict = self.validator.validate(&resolved.keyword, &resolved.haiku);
            if let Some(reason) = verdict.reason {
                report.failed += 1;
                report.failure_details.push(FailureDetail {
                    index,
                    reason: format!("Haiku #{index} failed: {reason}"),
                });
            }
        }

        if let Some(expected) = self.options.expected_count {
            if report.total != expected {
                report.failure_details.push(FailureDetail {
                    index: report.total + 1,
                    reason: format!("HAIKU COUNT ERROR: Found {}.", report.total),
                });
            }
        }

        debug!(
            total = report.total,
            failed = report.failed,
            "scan finished"
        );
        Ok(report)
    }

    /// Scans a file and reports a summary through the sink.
    pub fn scan_file(
        &self,
        path: &Path,
        sink: &mut dyn ReportSink,
    ) -> Result<CorpusReport, ScanError> {
        let reader = BufReader::new(File::open(path)?);
        let report = self.scan(reader)?;

        sink.line(&format!("--- Haiku Check Summary for {} ---", path.display()));
        sink.line(&format!("Total haikus checked: {}", report.total));
        sink.line(&format!("Total haikus failed: {}", report.failed));

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const GOOD_LINE: &str = r#"{"keyword": "sun", "haiku": "the sun burns so bright\nlight falls through the cold dark night\nwarm rays touch the ground"}"#;
    const BAD_LINE: &str = r#"{"keyword": "sun", "haiku": "too short"}"#;

    fn validator() -> HaikuValidator {
        HaikuValidator::new().expect("embedded dictionaries should load")
    }

    fn scan(input: &str, options: ScanOptions) -> Result<CorpusReport, ScanError> {
        let validator = validator();
        let scanner = CorpusScanner::new(&validator, RecordResolver::Curated, options);
        scanner.scan(Cursor::new(input.to_string()))
    }

    #[test]
    fn test_all_passing_records() {
        let input = format!("{GOOD_LINE}\n{GOOD_LINE}\n");
        let report = scan(&input, ScanOptions::default()).expect("scan succeeds");
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 0);
        assert!(report.passed());
    }

    #[test]
    fn test_failed_records_are_indexed_one_based() {
        let input = format!("{GOOD_LINE}\n{BAD_LINE}\n");
        let report = scan(&input, ScanOptions::default()).expect("scan succeeds");
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failure_details[0].index, 2);
        assert!(report.failure_details[0].reason.contains("Haiku #2 failed"));
    }

    #[test]
    fn test_expected_count_mismatch_is_file_level_failure() {
        let options = ScanOptions {
            expected_count: Some(25),
            ..ScanOptions::default()
        };
        let report = scan(GOOD_LINE, options).expect("scan succeeds");
        // No record failed, but the file itself did.
        assert_eq!(report.failed, 0);
        assert!(!report.passed());
        assert_eq!(report.failure_details.len(), 1);
        assert_eq!(report.failure_details[0].index, 2);
        assert!(report.failure_details[0]
            .reason
            .contains("HAIKU COUNT ERROR: Found 1."));
    }

    #[test]
    fn test_expected_count_satisfied() {
        let options = ScanOptions {
            expected_count: Some(2),
            ..ScanOptions::default()
        };
        let input = format!("{GOOD_LINE}\n{GOOD_LINE}\n");
        let report = scan(&input, options).expect("scan succeeds");
        assert!(report.passed());
    }

    #[test]
    fn test_strict_policy_aborts_on_malformed_record() {
        let input = format!("{GOOD_LINE}\nnot json\n{GOOD_LINE}\n");
        let err = scan(&input, ScanOptions::default()).expect_err("strict scan aborts");
        match err {
            ScanError::Malformed { index, .. } => assert_eq!(index, 2),
            other => panic!("expected malformed error, got {other}"),
        }
    }

    #[test]
    fn test_lenient_policy_counts_malformed_and_continues() {
        let options = ScanOptions {
            malformed: MalformedPolicy::Lenient,
            ..ScanOptions::default()
        };
        let input = format!("{GOOD_LINE}\nnot json\n{GOOD_LINE}\n");
        let report = scan(&input, options).expect("lenient scan continues");
        assert_eq!(report.total, 3);
        assert_eq!(report.failed, 1);
        assert!(report.failure_details[0]
            .reason
            .contains("Haiku #2 malformed"));
    }
}
