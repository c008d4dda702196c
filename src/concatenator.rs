// ==============================================================================
// concatenator.rs - Cohort File Concatenation
// ==============================================================================
// Description: Merges per-cohort specimen exports into a single alldata.tsv
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Output = header of the first input + data lines of every included input.
// Lines are copied byte-for-byte; only a missing final newline is added.
// ==============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Cohort, Selection};

/// Inputs included in every run, in order
pub const MANDATORY_INPUTS: [&str; 3] = ["breast.tsv", "ovarian.tsv", "prostate.tsv"];

/// Concatenated output consumed by the transform pass
pub const CONCATENATED_FILE: &str = "alldata.tsv";

/// Errors that can occur while concatenating inputs
#[derive(Error, Debug)]
pub enum ConcatError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },
}

/// Counts reported after a concatenation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcatSummary {
    /// Input files read
    pub files: usize,
    /// Data lines written (header excluded)
    pub data_lines: usize,
    /// Path of the concatenated file
    pub output: PathBuf,
}

pub struct Concatenator {
    data_dir: PathBuf,
    selection: Selection,
}

impl Concatenator {
    pub fn new(data_dir: impl Into<PathBuf>, selection: Selection) -> Self {
        Self {
            data_dir: data_dir.into(),
            selection,
        }
    }

    /// Input paths for the current selection, in concatenation order
    pub fn input_files(&self) -> Vec<PathBuf> {
        let optional = Cohort::ALL
            .iter()
            .filter(|cohort| self.selection.includes(**cohort))
            .map(|cohort| cohort.file_name());

        MANDATORY_INPUTS
            .iter()
            .copied()
            .chain(optional)
            .map(|name| self.data_dir.join(name))
            .collect()
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(CONCATENATED_FILE)
    }

    /// Write alldata.tsv from the selected inputs
    ///
    /// Every input is checked before the output is created, so a missing
    /// file never leaves a partial alldata.tsv behind.
    pub fn run(&self) -> Result<ConcatSummary, ConcatError> {
        let inputs = self.input_files();
        for path in &inputs {
            if !path.is_file() {
                return Err(ConcatError::MissingInput { path: path.clone() });
            }
        }

        let output = self.output_path();
        let mut writer = BufWriter::new(File::create(&output)?);
        let mut data_lines = 0;

        for (index, path) in inputs.iter().enumerate() {
            info!("Concatenating {}", path.display());
            let copied = append_file(path, &mut writer, index == 0)?;
            debug!("{} data lines from {}", copied, path.display());
            data_lines += copied;
        }

        writer.flush()?;

        info!(
            "Concatenation complete: {} files, {} data lines → {}",
            inputs.len(),
            data_lines,
            output.display()
        );

        Ok(ConcatSummary {
            files: inputs.len(),
            data_lines,
            output,
        })
    }
}

/// Copy one input into `writer`, returning the number of data lines copied
fn append_file(
    path: &Path,
    writer: &mut impl Write,
    keep_header: bool,
) -> Result<usize, ConcatError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    let mut line_number = 0;
    let mut data_lines = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        line_number += 1;

        if line_number == 1 && !keep_header {
            continue;
        }
        if line_number > 1 {
            data_lines += 1;
        }

        writer.write_all(&line)?;
        if !line.ends_with(b"\n") {
            writer.write_all(b"\n")?;
        }
    }

    Ok(data_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "personId\tpersonAge\n";

    fn write_input(dir: &Path, name: &str, rows: &[&str]) {
        let mut contents = HEADER.to_string();
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(dir.join(name), contents).unwrap();
    }

    fn seed_all_inputs(dir: &Path) {
        write_input(dir, "breast.tsv", &["b1\t40", "b2\t41"]);
        write_input(dir, "ovarian.tsv", &["o1\t50"]);
        write_input(dir, "prostate.tsv", &["p1\t60"]);
        write_input(dir, "lung.tsv", &["l1\t70"]);
        write_input(dir, "gyn.tsv", &["g1\t30"]);
        write_input(dir, "sarcoma.tsv", &["s1\t20"]);
        write_input(dir, "neuro.tsv", &["n1\t10"]);
        write_input(dir, "headNeck.tsv", &["h1\t55"]);
    }

    #[test]
    fn test_mandatory_only() {
        let dir = tempdir().unwrap();
        seed_all_inputs(dir.path());

        let summary = Concatenator::new(dir.path(), Selection::None).run().unwrap();
        let output = fs::read_to_string(dir.path().join(CONCATENATED_FILE)).unwrap();

        assert_eq!(summary.files, 3);
        assert_eq!(summary.data_lines, 4);
        assert_eq!(output, format!("{}b1\t40\nb2\t41\no1\t50\np1\t60\n", HEADER));
    }

    #[test]
    fn test_cohort_selection() {
        let dir = tempdir().unwrap();
        seed_all_inputs(dir.path());

        Concatenator::new(dir.path(), "lung".parse().unwrap()).run().unwrap();
        let output = fs::read_to_string(dir.path().join(CONCATENATED_FILE)).unwrap();

        assert!(output.contains("l1\t70"));
        for excluded in ["g1", "s1", "n1", "h1"] {
            assert!(!output.contains(excluded), "{} should be excluded", excluded);
        }
        // Header appears once
        assert_eq!(output.matches("personId").count(), 1);
    }

    #[test]
    fn test_debug_includes_every_cohort() {
        let dir = tempdir().unwrap();
        seed_all_inputs(dir.path());

        let summary = Concatenator::new(dir.path(), Selection::Debug).run().unwrap();
        let output = fs::read_to_string(dir.path().join(CONCATENATED_FILE)).unwrap();

        assert_eq!(summary.files, 8);
        assert_eq!(summary.data_lines, 9);
        for included in ["l1", "g1", "s1", "n1", "h1"] {
            assert!(output.contains(included), "{} should be included", included);
        }
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempdir().unwrap();
        write_input(dir.path(), "breast.tsv", &["b1\t40"]);
        write_input(dir.path(), "ovarian.tsv", &["o1\t50"]);

        let err = Concatenator::new(dir.path(), Selection::None).run().unwrap_err();
        match err {
            ConcatError::MissingInput { path } => assert!(path.ends_with("prostate.tsv")),
            other => panic!("Expected MissingInput error, got {:?}", other),
        }
        assert!(!dir.path().join(CONCATENATED_FILE).exists());
    }

    #[test]
    fn test_missing_final_newline() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("breast.tsv"), "h\nb1").unwrap();
        fs::write(dir.path().join("ovarian.tsv"), "h\r\no1\r\n").unwrap();
        fs::write(dir.path().join("prostate.tsv"), "h\n").unwrap();

        let summary = Concatenator::new(dir.path(), Selection::None).run().unwrap();
        let output = fs::read(dir.path().join(CONCATENATED_FILE)).unwrap();

        assert_eq!(summary.data_lines, 2);
        assert_eq!(output, b"h\nb1\no1\r\n".to_vec());
    }
}
