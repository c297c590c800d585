//! Flat-file writers for generated datasets.
//!
//! Edge lists are comma-separated `src,dst,weight` rows without a header;
//! the target file carries a `company_id,target` header. Weights use Rust's
//! shortest-roundtrip float formatting, which keeps output byte-stable for a
//! fixed seed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::dataset::TargetRecord;
use crate::edgelist::Edge;
use crate::error::DatasetError;

/// Writes one graph's edge list to `path` as headerless CSV.
///
/// # Errors
/// Returns [`DatasetError::Write`] carrying `path` when file creation or a
/// write fails.
pub fn write_edgelist(path: &Path, edges: &[Edge]) -> Result<(), DatasetError> {
    let file = File::create(path).map_err(|source| write_failure(path, source))?;
    let mut writer = BufWriter::new(file);
    for edge in edges {
        writeln!(writer, "{},{},{}", edge.src, edge.dst, edge.weight)
            .map_err(|source| write_failure(path, source))?;
    }
    writer.flush().map_err(|source| write_failure(path, source))
}

/// Writes the indexed target file to `path` with a `company_id,target`
/// header.
///
/// # Errors
/// Returns [`DatasetError::Write`] carrying `path` when file creation or a
/// write fails.
pub fn write_targets(path: &Path, records: &[TargetRecord]) -> Result<(), DatasetError> {
    let file = File::create(path).map_err(|source| write_failure(path, source))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "company_id,target").map_err(|source| write_failure(path, source))?;
    for record in records {
        writeln!(writer, "{},{}", record.company_id, record.target)
            .map_err(|source| write_failure(path, source))?;
    }
    writer.flush().map_err(|source| write_failure(path, source))
}

fn write_failure(path: &Path, source: io::Error) -> DatasetError {
    DatasetError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn edgelist_rows_are_headerless_csv() {
        let dir = TempDir::new().expect("temp dir must be created");
        let path = dir.path().join("0.edgelist");
        let edges = [
            Edge {
                src: 0,
                dst: 7,
                weight: 1.5,
            },
            Edge {
                src: 9,
                dst: 3,
                weight: 0.25,
            },
        ];
        write_edgelist(&path, &edges).expect("edge list must be written");
        let written = std::fs::read_to_string(&path).expect("file must be readable");
        assert_eq!(written, "0,7,1.5\n9,3,0.25\n");
    }

    #[rstest]
    fn target_file_carries_header_and_rows() {
        let dir = TempDir::new().expect("temp dir must be created");
        let path = dir.path().join("target.csv");
        let records = [
            TargetRecord {
                company_id: 0,
                target: 1,
            },
            TargetRecord {
                company_id: 1,
                target: 0,
            },
        ];
        write_targets(&path, &records).expect("target file must be written");
        let written = std::fs::read_to_string(&path).expect("file must be readable");
        assert_eq!(written, "company_id,target\n0,1\n1,0\n");
    }

    #[rstest]
    fn write_errors_carry_the_offending_path() {
        let dir = TempDir::new().expect("temp dir must be created");
        let path = dir.path().join("missing").join("0.edgelist");
        let error = write_edgelist(&path, &[]).expect_err("missing parent must fail");
        match error {
            DatasetError::Write { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
