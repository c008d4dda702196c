// ==============================================================================
// pipeline.rs - Two-Pass Specimen ETL Pipeline
// ==============================================================================
// Description: Runs concatenation then transformation over a data directory
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::concatenator::{ConcatSummary, Concatenator, CONCATENATED_FILE};
use crate::models::{Selection, Stage};
use crate::transformer::{TransformSummary, Transformer, SPECIMEN_TYPES_FILE, TRANSFORMED_FILE};

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the cohort inputs; outputs are written here too
    pub data_dir: PathBuf,
    pub selection: Selection,
    pub stage: Stage,
}

impl PipelineConfig {
    pub fn new(data_dir: impl Into<PathBuf>, selection: Selection) -> Self {
        Self {
            data_dir: data_dir.into(),
            selection,
            stage: Stage::All,
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }
}

/// What a run produced
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub concat: Option<ConcatSummary>,
    pub transform: Option<TransformSummary>,
}

/// Run the passes selected by `config.stage`
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    info!(
        "Specimen ETL starting in {} (selection: {:?}, stage: {:?})",
        config.data_dir.display(),
        config.selection,
        config.stage
    );

    let mut report = PipelineReport::default();

    if config.stage.runs_concatenate() {
        let summary = Concatenator::new(&config.data_dir, config.selection)
            .run()
            .context("Concatenation failed")?;
        report.concat = Some(summary);
    }

    if config.stage.runs_transform() {
        let input = config.data_dir.join(CONCATENATED_FILE);
        let output = config.data_dir.join(TRANSFORMED_FILE);
        let specimen_types = config.data_dir.join(SPECIMEN_TYPES_FILE);

        let summary = Transformer::new(config.selection.is_debug())
            .run_files(&input, &output, &specimen_types)
            .with_context(|| format!("Failed to transform {}", input.display()))?;
        report.transform = Some(summary);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cohort;
    use crate::pseudonymizer::hash_person_id;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const HEADER: &str = "personId\tpersonAgeAtSpecimenCollection\tpersonGender\tpersonRace\tpersonEthnicity\tpersonPathStage\tpersonPathDiagnosis\tpersonPrimaryHistDiagnosis\tpersonPrimarySite\tpersonPriorCancerHistory\tspecimenId\tspecimenSite\tspecimenType\tspecimenPreservationMethod\tspecimenPathDiagnosis\tspecimenHistDiagnosis\tspecimenPathGrade\tspecimenTumorMarkers\tspecimenPriorTx\tspecimenNotes\trepositoryShortName\tdataOrigin";

    fn row(
        person_id: &str,
        age: &str,
        site: &str,
        specimen_type: &str,
        repository: &str,
    ) -> String {
        [
            person_id, age, "f", "asian", "unknown", "", "cancer", "", site, "", "SP-1",
            "", specimen_type, "", "carcinoma", "", "", "", "", "", repository, "export",
        ]
        .join("\t")
    }

    fn write_cohort(dir: &Path, name: &str, rows: &[String]) {
        let mut contents = format!("{}\n", HEADER);
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(dir.join(name), contents).unwrap();
    }

    fn seed(dir: &Path) {
        write_cohort(dir, "breast.tsv", &[row("B1", "50", "Breast", "tissue", "BRCA")]);
        write_cohort(dir, "ovarian.tsv", &[row("O1", "95", "ovary", "serum", "OVB")]);
        write_cohort(dir, "prostate.tsv", &[row("P1", "x", "prostate", "plasma", "PRC")]);
        write_cohort(dir, "lung.tsv", &[row("L1", "60", "lung", "met", "LNG")]);
        write_cohort(dir, "gyn.tsv", &[row("G1", "40", "", "tissue", "GYN")]);
        write_cohort(dir, "sarcoma.tsv", &[row("S1", "30", "bone", "other", "SRC")]);
        write_cohort(dir, "neuro.tsv", &[row("N1", "20", "cns", "tissue", "NRO")]);
        write_cohort(dir, "headNeck.tsv", &[row("H1", "70", "larynx", "blood", "HNK")]);
    }

    fn output_rows(dir: &Path) -> Vec<Vec<String>> {
        fs::read_to_string(dir.join(TRANSFORMED_FILE))
            .unwrap()
            .lines()
            .skip(1)
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_full_run_with_cohort() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let config = PipelineConfig::new(dir.path(), Selection::Cohort(Cohort::Lung));
        let report = run(&config).unwrap();

        let concat = report.concat.unwrap();
        assert_eq!(concat.files, 4);
        assert_eq!(concat.data_lines, 4);

        // O1 is over 89 and dropped; P1 keeps a sentinel age
        let transform = report.transform.unwrap();
        assert_eq!(transform.rows_read, 4);
        assert_eq!(transform.rows_written, 3);

        let rows = output_rows(dir.path());
        let ids: Vec<&str> = rows.iter().map(|r| r[2].as_str()).collect();
        assert_eq!(
            ids,
            vec![
                hash_person_id("B1").to_string(),
                hash_person_id("P1").to_string(),
                hash_person_id("L1").to_string(),
            ]
        );
        assert_eq!(rows[0][0], "tissue cancer");
        assert_eq!(rows[0][1], "breast cancer");
        assert_eq!(rows[1][3], "-1");
        assert_eq!(rows[2][0], "metastatic");

        let specimen_types = fs::read_to_string(dir.path().join(SPECIMEN_TYPES_FILE)).unwrap();
        assert_eq!(specimen_types, "carcinoma\n");
    }

    #[test]
    fn test_debug_run() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let report = run(&PipelineConfig::new(dir.path(), Selection::Debug)).unwrap();
        let transform = report.transform.unwrap();

        // P1 ("x") is dropped; O1 (95) is kept in debug
        assert_eq!(transform.rows_read, 8);
        assert_eq!(transform.rows_written, 7);
        assert_eq!(transform.dropped_invalid_age, 1);

        let rows = output_rows(dir.path());
        let categories: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
        assert!(categories.contains(&"neuro cancer"));
        assert!(categories.contains(&"ovarian cancer"));
    }

    #[test]
    fn test_stages_run_independently() {
        let dir = tempdir().unwrap();
        seed(dir.path());

        let concat_only =
            PipelineConfig::new(dir.path(), Selection::None).with_stage(Stage::Concatenate);
        let report = run(&concat_only).unwrap();
        assert!(report.concat.is_some());
        assert!(report.transform.is_none());
        assert!(!dir.path().join(TRANSFORMED_FILE).exists());

        let transform_only =
            PipelineConfig::new(dir.path(), Selection::None).with_stage(Stage::Transform);
        let report = run(&transform_only).unwrap();
        assert!(report.concat.is_none());
        assert_eq!(report.transform.unwrap().rows_written, 2);
    }

    #[test]
    fn test_transform_without_concatenated_input_fails() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::new(dir.path(), Selection::None).with_stage(Stage::Transform);

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to transform"));
    }

    #[test]
    fn test_missing_cohort_file_fails() {
        let dir = tempdir().unwrap();
        seed(dir.path());
        fs::remove_file(dir.path().join("sarcoma.tsv")).unwrap();

        assert!(run(&PipelineConfig::new(dir.path(), Selection::Cohort(Cohort::Lung))).is_ok());

        let err = run(&PipelineConfig::new(dir.path(), Selection::Debug)).unwrap_err();
        assert!(err.to_string().contains("Concatenation failed"));
    }
}
