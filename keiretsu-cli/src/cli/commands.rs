//! Command implementations and argument parsing for the keiretsu CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use keiretsu_core::{ConfigError, DatasetBuilder, DatasetError, DatasetSummary};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_GRAPH_COUNT: usize = 1000;
const DEFAULT_SEED: u64 = 123;
const DEFAULT_NODE_SCALE_MU: f64 = 4.5;
const DEFAULT_NODE_SCALE_SIGMA: f64 = 1.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "keiretsu",
    about = "Generate synthetic supply-chain graph datasets."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate datasets of random weighted supply-chain graphs.
    Generate(GenerateCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Root directory for the generated datasets.
    pub output_root: PathBuf,

    /// Number of graphs per dataset.
    #[arg(long = "n-graphs", default_value_t = DEFAULT_GRAPH_COUNT)]
    pub n_graphs: usize,

    /// Seed for the random number generator; a fixed seed reproduces the
    /// output tree byte-for-byte.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Log-normal location parameter for per-graph node counts.
    #[arg(long = "nodes-mu", default_value_t = DEFAULT_NODE_SCALE_MU)]
    pub nodes_mu: f64,

    /// Log-normal scale parameter for per-graph node counts.
    #[arg(long = "nodes-sigma", default_value_t = DEFAULT_NODE_SCALE_SIGMA)]
    pub nodes_sigma: f64,

    /// Write a single dataset into the root instead of a train/test pair.
    #[arg(long)]
    pub single: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generator configuration was rejected before any output was written.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Dataset generation failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// A labelled dataset summary.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    /// Dataset label: `train`, `test`, or `dataset` for `--single` runs.
    pub label: &'static str,
    /// Core summary of the generated dataset.
    pub summary: DatasetSummary,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Seed the RNG stream was initialised with.
    pub seed: u64,
    /// One report per generated dataset, in generation order.
    pub reports: Vec<DatasetReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when configuration validation or generation fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use keiretsu_cli::cli::{Cli, Command, GenerateCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         output_root: dir.path().to_path_buf(),
///         n_graphs: 2,
///         seed: 123,
///         nodes_mu: 4.5,
///         nodes_sigma: 1.0,
///         single: true,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.reports.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(generate) => {
            Span::current().record("command", field::display("generate"));
            run_generate(generate)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(output_root = field::Empty, n_graphs = field::Empty, seed = field::Empty),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("output_root", field::display(command.output_root.display()));
    span.record("n_graphs", field::display(command.n_graphs));
    span.record("seed", field::display(command.seed));

    let generator = DatasetBuilder::new()
        .with_graph_count(command.n_graphs)
        .with_node_scale(command.nodes_mu, command.nodes_sigma)
        .build()?;

    let mut rng = SmallRng::seed_from_u64(command.seed);
    let mut reports = Vec::new();
    if command.single {
        let summary = generator.generate_into(&command.output_root, &mut rng)?;
        reports.push(DatasetReport {
            label: "dataset",
            summary,
        });
    } else {
        for label in ["train", "test"] {
            let summary = generator.generate_into(&command.output_root.join(label), &mut rng)?;
            reports.push(DatasetReport { label, summary });
        }
    }

    info!(
        seed = command.seed,
        datasets = reports.len(),
        "generation completed"
    );
    Ok(ExecutionSummary {
        seed: command.seed,
        reports,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use keiretsu_cli::cli::{DatasetReport, ExecutionSummary, render_summary};
/// # use keiretsu_core::DatasetSummary;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     seed: 123,
///     reports: vec![DatasetReport {
///         label: "train",
///         summary: DatasetSummary {
///             graphs: 2,
///             edges: 31,
///             positives: 1,
///             output_dir: "data/train".into(),
///         },
///     }],
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.starts_with("seed: 123\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "seed: {}", summary.seed)?;
    for report in &summary.reports {
        writeln!(
            writer,
            "{}: {} graphs, {} edges, {} positive labels -> {}",
            report.label,
            report.summary.graphs,
            report.summary.edges,
            report.summary.positives,
            report.summary.output_dir.display(),
        )?;
    }
    Ok(())
}
