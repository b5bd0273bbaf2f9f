//! Command-line interface for haiku_forge.
//!
//! Provides commands for corpus checking, merging, SFT reformatting,
//! keyword auditing and generation-prompt emission.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli, Commands};
