//! Unit tests for the CLI commands and summary rendering.

use super::commands::run_generate;
use super::{
    Cli, CliError, Command, DatasetReport, ExecutionSummary, GenerateCommand, render_summary,
    run_cli,
};

use std::fs;
use std::io::Cursor;
use std::path::Path;

use clap::Parser;
use keiretsu_core::{ConfigError, DatasetSummary};
use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn generate_command(output_root: &Path) -> GenerateCommand {
    GenerateCommand {
        output_root: output_root.to_path_buf(),
        n_graphs: 3,
        seed: 123,
        nodes_mu: 4.5,
        nodes_sigma: 1.0,
        single: false,
    }
}

#[rstest]
fn parse_applies_documented_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["keiretsu", "generate", "data"])?;
    let Command::Generate(command) = cli.command;
    assert_eq!(command.output_root, Path::new("data"));
    assert_eq!(command.n_graphs, 1000);
    assert_eq!(command.seed, 123);
    assert!((command.nodes_mu - 4.5).abs() < f64::EPSILON);
    assert!((command.nodes_sigma - 1.0).abs() < f64::EPSILON);
    assert!(!command.single);
    Ok(())
}

#[rstest]
fn parse_accepts_overrides() -> TestResult {
    let cli = Cli::try_parse_from([
        "keiretsu",
        "generate",
        "data",
        "--n-graphs",
        "5",
        "--seed",
        "7",
        "--nodes-mu",
        "3.0",
        "--nodes-sigma",
        "0.5",
        "--single",
    ])?;
    let Command::Generate(command) = cli.command;
    assert_eq!(command.n_graphs, 5);
    assert_eq!(command.seed, 7);
    assert!(command.single);
    Ok(())
}

#[rstest]
fn parse_rejects_missing_output_root() {
    let result = Cli::try_parse_from(["keiretsu", "generate"]);
    assert!(result.is_err(), "generate requires an output root");
}

#[rstest]
fn generate_writes_a_train_test_pair() -> TestResult {
    let dir = TempDir::new()?;
    let summary = run_generate(generate_command(dir.path()))?;

    assert_eq!(summary.seed, 123);
    let labels: Vec<&str> = summary.reports.iter().map(|report| report.label).collect();
    assert_eq!(labels, ["train", "test"]);
    for label in ["train", "test"] {
        let dataset_dir = dir.path().join(label);
        assert!(dataset_dir.join("0.edgelist").exists());
        assert!(dataset_dir.join("2.edgelist").exists());
        assert!(dataset_dir.join("target.csv").exists());
    }
    Ok(())
}

#[rstest]
fn generate_single_writes_into_the_root() -> TestResult {
    let dir = TempDir::new()?;
    let summary = run_generate(GenerateCommand {
        single: true,
        ..generate_command(dir.path())
    })?;

    let labels: Vec<&str> = summary.reports.iter().map(|report| report.label).collect();
    assert_eq!(labels, ["dataset"]);
    assert!(dir.path().join("0.edgelist").exists());
    assert!(dir.path().join("target.csv").exists());
    Ok(())
}

#[rstest]
fn generate_is_reproducible_for_a_fixed_seed() -> TestResult {
    let left = TempDir::new()?;
    let right = TempDir::new()?;
    run_generate(generate_command(left.path()))?;
    run_generate(generate_command(right.path()))?;

    for label in ["train", "test"] {
        let left_targets = fs::read(left.path().join(label).join("target.csv"))?;
        let right_targets = fs::read(right.path().join(label).join("target.csv"))?;
        assert_eq!(left_targets, right_targets);

        let left_graph = fs::read(left.path().join(label).join("0.edgelist"))?;
        let right_graph = fs::read(right.path().join(label).join("0.edgelist"))?;
        assert_eq!(left_graph, right_graph);
    }
    Ok(())
}

#[rstest]
fn run_cli_rejects_zero_graphs() -> TestResult {
    let dir = TempDir::new()?;
    let cli = Cli {
        command: Command::Generate(GenerateCommand {
            n_graphs: 0,
            ..generate_command(dir.path())
        }),
    };
    let err = run_cli(cli).expect_err("zero graphs must fail");
    assert!(matches!(err, CliError::Config(ConfigError::ZeroGraphs)));
    Ok(())
}

#[rstest]
fn run_cli_rejects_invalid_node_sigma() -> TestResult {
    let dir = TempDir::new()?;
    let cli = Cli {
        command: Command::Generate(GenerateCommand {
            nodes_sigma: -1.0,
            ..generate_command(dir.path())
        }),
    };
    let err = run_cli(cli).expect_err("negative sigma must fail");
    assert!(matches!(
        err,
        CliError::Config(ConfigError::InvalidFloatParameter {
            parameter: "n_nodes_sigma"
        })
    ));
    Ok(())
}

#[rstest]
fn render_summary_lists_each_dataset() -> TestResult {
    let summary = ExecutionSummary {
        seed: 42,
        reports: vec![
            DatasetReport {
                label: "train",
                summary: DatasetSummary {
                    graphs: 3,
                    edges: 61,
                    positives: 2,
                    output_dir: "data/train".into(),
                },
            },
            DatasetReport {
                label: "test",
                summary: DatasetSummary {
                    graphs: 3,
                    edges: 58,
                    positives: 1,
                    output_dir: "data/test".into(),
                },
            },
        ],
    };
    let mut buffer = Cursor::new(Vec::new());
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer.into_inner())?;
    assert_eq!(
        text,
        "seed: 42\n\
         train: 3 graphs, 61 edges, 2 positive labels -> data/train\n\
         test: 3 graphs, 58 edges, 1 positive labels -> data/test\n"
    );
    Ok(())
}
