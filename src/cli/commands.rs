//! CLI command definitions for haiku_forge.
//!
//! This module provides the command-line surface over the validation,
//! merge and export pipelines: check corpora, merge the good records,
//! reformat for SFT, audit keyword budgets and emit generation prompts.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::corpus::{
    ConsoleSink, CorpusReport, CorpusScanner, MalformedPolicy, MergePipeline, NullSink,
    RecordResolver, ReportSink, ScanOptions,
};
use crate::export::SftFormatter;
use crate::keywords::{audit_keywords, Family, KEYWORD_SYLLABLE_BUDGET};
use crate::prompts::{build_generation_prompt, ExtractionTable};
use crate::syllable::SyllableCounter;
use crate::validation::HaikuValidator;

/// Default file names excluded when a merge expands a directory, so a
/// previous run's outputs are not re-consumed as sources.
const DEFAULT_MERGE_IGNORE: &str = "merged.jsonl,train_data.jsonl";

/// Physics haiku SFT data curation for LLM fine-tuning.
#[derive(Parser)]
#[command(name = "haiku-forge")]
#[command(about = "Validate, curate and merge physics haiku SFT training data")]
#[command(version)]
#[command(
    long_about = "haiku-forge validates machine-generated physics haikus (3 lines, verbatim keyword inclusion, 5-7-5 syllables) and curates clean training corpora.\n\nRecords are line-delimited JSON.\n\nExample usage:\n  haiku-forge check data/train --expect-count 25\n  haiku-forge merge data/train --output data/train/merged.jsonl"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Check haiku corpora against the 5-7-5 structural contract.
    ///
    /// Every record is validated for line count, verbatim keyword
    /// inclusion and per-line syllable counts; failures are tallied per
    /// file with 1-based record indices.
    Check(CheckArgs),

    /// Merge validated records from one or more corpora into a single file.
    Merge(MergeArgs),

    /// Add SFT prompt/response fields to a merged corpus.
    Format(FormatArgs),

    /// Audit keyword families against the per-line syllable budget.
    Keywords(KeywordsArgs),

    /// Emit the batch generation prompt for keyword families.
    Prompt(PromptArgs),
}

/// Which record shape the input files use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaArg {
    /// {"keyword": ..., "haiku": ...} records (exactly one keyword
    /// occurrence allowed).
    Curated,
    /// {"prompt": ..., "response": ...} records (one or two keyword
    /// occurrences allowed).
    PromptResponse,
}

/// Arguments for `haiku-forge check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Corpus files or directories of .jsonl files to check.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Record schema of the input files.
    #[arg(long, value_enum, default_value_t = SchemaArg::Curated)]
    pub schema: SchemaArg,

    /// 1-based prompt template index for prompt-response records.
    #[arg(long, default_value_t = 1)]
    pub prompt_index: usize,

    /// Require each file to contain exactly this many records.
    #[arg(long)]
    pub expect_count: Option<usize>,

    /// Count malformed records as failures instead of aborting the file's
    /// scan.
    #[arg(long)]
    pub lenient: bool,

    /// Print per-record failure details.
    #[arg(short, long)]
    pub verbose: bool,

    /// Output the aggregate report as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `haiku-forge merge`.
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Source files or directories of .jsonl files to merge, in order.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Consolidated output file, truncated at the start of the run.
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// File names skipped when a directory is expanded.
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_MERGE_IGNORE)]
    pub ignore: Vec<String>,

    /// Record schema of the source files.
    #[arg(long, value_enum, default_value_t = SchemaArg::Curated)]
    pub schema: SchemaArg,

    /// 1-based prompt template index for prompt-response records.
    #[arg(long, default_value_t = 1)]
    pub prompt_index: usize,

    /// Drop malformed records instead of aborting the run.
    #[arg(long)]
    pub lenient: bool,

    /// Output the merge counts as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `haiku-forge format`.
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Merged corpus of curated records to reformat.
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output file, truncated at the start of the run.
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Output the record count as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `haiku-forge keywords`.
#[derive(Parser, Debug)]
pub struct KeywordsArgs {
    /// Family file stems to audit (defaults to every family).
    pub families: Vec<String>,

    /// Maximum syllables a keyword phrase may occupy.
    #[arg(long, default_value_t = KEYWORD_SYLLABLE_BUDGET)]
    pub budget: usize,

    /// Output the oversized keywords as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `haiku-forge prompt`.
#[derive(Parser, Debug)]
pub struct PromptArgs {
    /// Family file stem to emit a prompt for (defaults to every training
    /// family).
    pub family: Option<String>,

    /// 1-based prompt template index.
    #[arg(long, default_value_t = 5)]
    pub prompt_index: usize,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before
/// running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli())
}

/// Run the CLI with the parsed arguments.
///
/// This is the main entry point for the haiku-forge CLI.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check(args) => run_check_command(args),
        Commands::Merge(args) => run_merge_command(args),
        Commands::Format(args) => run_format_command(args),
        Commands::Keywords(args) => run_keywords_command(args),
        Commands::Prompt(args) => run_prompt_command(args),
    }
}

// ============================================================================
// Check
// ============================================================================

#[derive(Serialize)]
struct FileReport {
    file: String,
    #[serde(flatten)]
    report: CorpusReport,
}

#[derive(Serialize)]
struct CheckSummary {
    files: Vec<FileReport>,
    total_failed: usize,
    files_with_failures: usize,
    passed: bool,
}

fn run_check_command(args: CheckArgs) -> anyhow::Result<()> {
    let table = ExtractionTable::standard()?;
    let resolver = record_resolver(args.schema, &table, args.prompt_index);
    let validator = HaikuValidator::with_rule(resolver.occurrence_rule())?;
    let options = ScanOptions {
        expected_count: args.expect_count,
        malformed: malformed_policy(args.lenient),
    };
    let scanner = CorpusScanner::new(&validator, resolver, options);

    let sources = expand_sources(&args.paths, &[])?;
    anyhow::ensure!(
        !sources.is_empty(),
        "no .jsonl corpora found under the given paths"
    );

    let mut sink = make_sink(args.json);

    let mut files = Vec::new();
    let mut total_failed = 0;
    let mut files_with_failures = 0;

    sink.line("=== Starting haiku data checks ===");
    for path in &sources {
        sink.line(&format!("\n--- Checking haikus in {} ---", path.display()));
        let report = scanner
            .scan_file(path, sink.as_mut())
            .with_context(|| format!("checking {}", path.display()))?;

        total_failed += report.failed;
        if !report.passed() {
            files_with_failures += 1;
        }
        if args.verbose {
            for detail in &report.failure_details {
                sink.line(&format!("\n{}", detail.reason));
            }
        }
        files.push(FileReport {
            file: path.display().to_string(),
            report,
        });
    }

    sink.line(&format!(
        "\nFinished haiku data checks. Total files with failures: {files_with_failures}. Total haikus failed: {total_failed}."
    ));

    let passed = files_with_failures == 0;
    if args.json {
        let summary = CheckSummary {
            files,
            total_failed,
            files_with_failures,
            passed,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    anyhow::ensure!(passed, "{files_with_failures} file(s) contain failing haikus");
    Ok(())
}

// ============================================================================
// Merge
// ============================================================================

fn run_merge_command(args: MergeArgs) -> anyhow::Result<()> {
    let table = ExtractionTable::standard()?;
    let resolver = record_resolver(args.schema, &table, args.prompt_index);
    let validator = HaikuValidator::with_rule(resolver.occurrence_rule())?;
    let pipeline =
        MergePipeline::new(&validator, resolver).with_malformed_policy(malformed_policy(args.lenient));

    let mut sources = expand_sources(&args.paths, &args.ignore)?;
    // Never re-consume the output file as a source.
    sources.retain(|path| path != &args.output);

    let mut sink = make_sink(args.json);

    sink.line("=== Starting haiku data merge ===");
    let outcome = pipeline.merge(&sources, &args.output, sink.as_mut())?;

    sink.line(&format!(
        "\nFinished haiku data merge.\n{} good haikus found and saved to {}.",
        outcome.kept,
        args.output.display()
    ));
    sink.line(&format!("{} bad haikus omitted.", outcome.dropped));
    for skipped in &outcome.skipped_sources {
        sink.line(&format!(
            "Skipped unreadable source {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(())
}

// ============================================================================
// Format
// ============================================================================

#[derive(Serialize)]
struct FormatSummary {
    records: usize,
}

fn run_format_command(args: FormatArgs) -> anyhow::Result<()> {
    let mut sink = make_sink(args.json);
    sink.line(&format!(
        "Re-formatting data from {} and saving to {}.",
        args.input.display(),
        args.output.display()
    ));

    let records = SftFormatter::run(&args.input, &args.output)
        .with_context(|| format!("formatting {}", args.input.display()))?;

    sink.line(&format!("{records} haikus re-formatted."));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&FormatSummary { records })?);
    }
    Ok(())
}

// ============================================================================
// Keywords
// ============================================================================

fn run_keywords_command(args: KeywordsArgs) -> anyhow::Result<()> {
    let counter = SyllableCounter::new()?;
    let families = if args.families.is_empty() {
        Family::all()
    } else {
        args.families
            .iter()
            .map(|stem| {
                Family::from_stem(stem)
                    .ok_or_else(|| anyhow::anyhow!("unknown keyword family '{stem}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let oversized = audit_keywords(&counter, &families, args.budget);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&oversized)?);
    } else if oversized.is_empty() {
        println!(
            "All keywords fit within {} syllables.",
            args.budget
        );
    } else {
        for keyword in &oversized {
            println!(
                "Keyword '{}' fails since it has {} syllables.",
                keyword.keyword, keyword.syllables
            );
        }
    }
    Ok(())
}

// ============================================================================
// Prompt
// ============================================================================

fn run_prompt_command(args: PromptArgs) -> anyhow::Result<()> {
    let families = match args.family {
        Some(stem) => vec![Family::from_stem(&stem)
            .ok_or_else(|| anyhow::anyhow!("unknown keyword family '{stem}'"))?],
        None => Family::train(),
    };

    for family in families {
        let prompt = build_generation_prompt(family.keywords(), args.prompt_index)?;
        println!("{prompt}\n");
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn record_resolver<'a>(
    schema: SchemaArg,
    table: &'a ExtractionTable,
    prompt_index: usize,
) -> RecordResolver<'a> {
    match schema {
        SchemaArg::Curated => RecordResolver::Curated,
        SchemaArg::PromptResponse => RecordResolver::PromptResponse {
            table,
            prompt_index,
        },
    }
}

fn malformed_policy(lenient: bool) -> MalformedPolicy {
    if lenient {
        MalformedPolicy::Lenient
    } else {
        MalformedPolicy::Strict
    }
}

fn make_sink(json: bool) -> Box<dyn ReportSink> {
    if json {
        Box::new(NullSink)
    } else {
        Box::new(ConsoleSink)
    }
}

/// Expands files and directories into an ordered list of .jsonl sources.
///
/// Directory entries are sorted by path so runs are reproducible; `ignore`
/// filters by file name during expansion only.
fn expand_sources(paths: &[PathBuf], ignore: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)
                .with_context(|| format!("reading directory {}", path.display()))?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| p.extension().map(|x| x == "jsonl").unwrap_or(false))
                .filter(|p| {
                    p.file_name()
                        .and_then(|name| name.to_str())
                        .map(|name| !ignore.iter().any(|skip| skip == name))
                        .unwrap_or(true)
                })
                .collect();
            entries.sort();
            sources.extend(entries);
        } else {
            sources.push(path.clone());
        }
    }
    Ok(sources)
}
