//! Command-line interface orchestration for the keiretsu dataset generator.
//!
//! The CLI offers a `generate` command that synthesises a train/test pair of
//! supply-chain graph datasets (or a single dataset with `--single`) from one
//! seeded RNG stream.

mod commands;

pub use commands::{
    Cli, CliError, Command, DatasetReport, ExecutionSummary, GenerateCommand, render_summary,
    run_cli,
};

#[cfg(test)]
mod tests;
