//! Merge pipeline: filters corpora down to validated records and
//! consolidates them into a single output file.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{MergeError, ScanError};
use crate::validation::HaikuValidator;

use super::record::RecordResolver;
use super::scanner::{MalformedPolicy, ReportSink};

/// A source skipped because it could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregate counts from a merge run.
#[derive(Debug, Default, Serialize)]
pub struct MergeOutcome {
    /// Records that passed validation and were written out.
    pub kept: usize,
    /// Records dropped for failing validation (or, under the lenient
    /// policy, for being malformed).
    pub dropped: usize,
    /// Sources skipped as unreadable; accounted for, never silent.
    pub skipped_sources: Vec<SkippedSource>,
}

/// Merges one or more corpora into a consolidated output file.
pub struct MergePipeline<'a> {
    validator: &'a HaikuValidator,
    resolver: RecordResolver<'a>,
    malformed: MalformedPolicy,
}

impl<'a> MergePipeline<'a> {
    pub fn new(validator: &'a HaikuValidator, resolver: RecordResolver<'a>) -> Self {
        Self {
            validator,
            resolver,
            malformed: MalformedPolicy::default(),
        }
    }

    /// Sets the malformed-record policy. Strict (the default) aborts the
    /// whole run on the first unparseable record.
    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    /// Merges `sources`, in order, into `out_path`.
    ///
    /// The output is truncated once at the start of the run and then
    /// appended to monotonically; passing records are written as their
    /// original input line, byte for byte. A source that cannot be opened
    /// is skipped with a warning and recorded in the outcome; remaining
    /// sources are unaffected. Zero sources is not an error.
    pub fn merge(
        &self,
        sources: &[PathBuf],
        out_path: &Path,
        sink: &mut dyn ReportSink,
    ) -> Result<MergeOutcome, MergeError> {
        let out_file = File::create(out_path).map_err(|source| MergeError::CreateOutput {
            path: out_path.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(out_file);

        let mut outcome = MergeOutcome::default();

        for path in sources {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable source");
                    outcome.skipped_sources.push(SkippedSource {
                        path: path.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            sink.line(&format!("--- Getting haikus from {} ---", path.display()));

            let (kept, dropped) = self
                .merge_source(BufReader::new(file), &mut out)
                .map_err(|source| MergeError::Scan {
                    path: path.clone(),
                    source,
                })?;

            outcome.kept += kept;
            outcome.dropped += dropped;
        }

        out.flush().map_err(MergeError::WriteOutput)?;

        info!(
            kept = outcome.kept,
            dropped = outcome.dropped,
            skipped = outcome.skipped_sources.len(),
            output = %out_path.display(),
            "merge finished"
        );
        Ok(outcome)
    }

    fn merge_source<R: BufRead, W: Write>(
        &self,
        reader: R,
        out: &mut W,
    ) -> Result<(usize, usize), ScanError> {
        let mut kept = 0;
        let mut dropped = 0;
        let mut index = 0;

        for line in reader.lines() {
            let line = line?;
            index += 1;

            let resolved = match self.resolver.resolve(&line, index) {
                Ok(resolved) => resolved,
                Err(err) => match self.malformed {
                    MalformedPolicy::Strict => return Err(err),
                    MalformedPolicy::Lenient => {
                        dropped += 1;
                        continue;
                    }
                },
            };

            if self
                .validator
                .validate(&resolved.keyword, &resolved.haiku)
                .passed
            {
                out.write_all(line.as_bytes())?;
                out.write_all(b"\n")?;
                kept += 1;
            } else {
                dropped += 1;
            }
        }

        Ok((kept, dropped))
    }
}
