//! Corpus scanning and merging over line-delimited JSON record files.

mod merge;
mod record;
mod scanner;

pub use merge::{MergeOutcome, MergePipeline, SkippedSource};
pub use record::{HaikuRecord, PromptRecord, RecordResolver, ResolvedRecord};
pub use scanner::{
    ConsoleSink, CorpusReport, CorpusScanner, FailureDetail, MalformedPolicy, NullSink,
    ReportSink, ScanOptions,
};
