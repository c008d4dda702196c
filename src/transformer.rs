// ==============================================================================
// transformer.rs - Specimen Row Transformation
// ==============================================================================
// Description: De-identifies, normalizes and categorizes concatenated specimen rows
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Per row, in order:
//   1. age validation          5. primary site
//   2. age ceiling (>89)       6. specimen category (+ tissue diagnosis log)
//   3. person id hash          7. person category
//   4. specimen id digest      8. demographic normalization
// Output row = specimenCategory, personCategory, then every input column.
// ==============================================================================

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::classifier::{self, SpecimenClassification};
use crate::lookup;
use crate::models::SpecimenCategory;
use crate::parsers::{RowParseError, SpecimenRow};
use crate::pseudonymizer::{self, PseudonymError, SpecimenDigest};
use crate::validator::{self, AgeCheck, INVALID_AGE_SENTINEL};

/// Final output of the transform pass
pub const TRANSFORMED_FILE: &str = "transformed_data.tsv";

/// Normalized diagnosis of every tissue specimen, one per line
pub const SPECIMEN_TYPES_FILE: &str = "specimen_types.txt";

/// Header written to the transformed output
pub const OUTPUT_HEADER: [&str; 23] = [
    "specimenCategory",
    "personCategory",
    "personId",
    "personAgeAtSpecimenCollection",
    "personGender",
    "personRace",
    "personEthnicity",
    "personPathStage",
    "personPathDiagnosis",
    "personPrimaryHistDiagnosis",
    "personPrimarySite",
    "personPriorCancerHistory",
    "specimenId",
    "specimenSite",
    "specimenType",
    "specimenPreservationMethod",
    "specimenPathDiagnosis",
    "specimenHistDiagnosis",
    "specimenPathGrade",
    "specimenTumorMarkers",
    "specimenPriorTx",
    "specimenNotes",
    "repositoryShortName",
];

/// Errors that abort a transform run
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error(transparent)]
    MalformedRow(#[from] RowParseError),

    #[error("Line {line}: {source}")]
    UnmappedSurrogateField {
        line: u64,
        #[source]
        source: PseudonymError,
    },
}

/// Why a row was left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Unparseable age in debug mode
    InvalidAge,
    /// Age above the reportable ceiling
    AgeCeiling,
}

/// A row ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedRow {
    pub specimen_category: SpecimenCategory,
    pub person_category: String,
    /// Normalized diagnosis for the specimen types log (tissue only)
    pub tissue_diagnosis: Option<String>,
    pub row: SpecimenRow,
}

impl TransformedRow {
    /// Output fields: categories first, then the row's columns
    pub fn output_fields(&self) -> impl Iterator<Item = &str> {
        [self.specimen_category.as_str(), self.person_category.as_str()]
            .into_iter()
            .chain(self.row.fields())
    }
}

/// Result of transforming one input row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Written(Box<TransformedRow>),
    Dropped(DropReason),
}

/// Counts reported after a transform run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSummary {
    pub rows_read: u64,
    pub rows_written: u64,
    pub dropped_invalid_age: u64,
    pub dropped_age_ceiling: u64,
    /// Invalid ages replaced with the sentinel
    pub sentinel_ages: u64,
    pub synthesized_person_ids: u64,
    pub tissue_specimens: u64,
}

/// Single-pass transformer; owns the specimen digest for the whole run
pub struct Transformer {
    debug: bool,
    digest: SpecimenDigest,
    summary: TransformSummary,
}

impl Transformer {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            digest: SpecimenDigest::new(),
            summary: TransformSummary::default(),
        }
    }

    /// Transform the `input` file into `output` and the specimen types log
    pub fn run_files(
        mut self,
        input: &Path,
        output: &Path,
        specimen_types: &Path,
    ) -> Result<TransformSummary, TransformError> {
        info!("Transforming {} → {}", input.display(), output.display());

        let input = File::open(input)?;
        let output = BufWriter::new(File::create(output)?);
        let specimen_types = BufWriter::new(File::create(specimen_types)?);

        self.transform(input, output, specimen_types)?;
        Ok(self.summary)
    }

    /// Stream every row of `input` through [`Transformer::transform_row`]
    ///
    /// The first line of `input` is a header and is discarded. Every other
    /// line is a row, blank lines included: a blank line has no columns and
    /// aborts the run as malformed.
    pub fn transform<R, W, D>(
        &mut self,
        input: R,
        output: W,
        mut specimen_types: D,
    ) -> Result<(), TransformError>
    where
        R: Read,
        W: Write,
        D: Write,
    {
        if self.debug {
            info!("In Debug mode");
        }

        let mut reader = BufReader::new(input);

        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(output);

        writer.write_record(OUTPUT_HEADER)?;

        let mut buffer = String::new();
        let mut line: u64 = 0;

        // Header
        if reader.read_line(&mut buffer)? > 0 {
            line += 1;
        }

        loop {
            buffer.clear();
            if reader.read_line(&mut buffer)? == 0 {
                break;
            }
            line += 1;

            let text = buffer.trim_end_matches('\n').trim_end_matches('\r');
            let fields = text.split('\t').filter(|_| !text.is_empty());
            let row = SpecimenRow::from_fields(fields, line)?;
            self.summary.rows_read += 1;

            match self.transform_row(row, line)? {
                RowOutcome::Written(transformed) => {
                    if let Some(diagnosis) = &transformed.tissue_diagnosis {
                        writeln!(specimen_types, "{}", diagnosis)?;
                    }
                    writer.write_record(transformed.output_fields())?;
                    self.summary.rows_written += 1;
                }
                RowOutcome::Dropped(reason) => {
                    debug!("Dropped line {}: {:?}", line, reason);
                }
            }
        }

        writer.flush()?;
        specimen_types.flush()?;

        info!(
            "Transform complete: {} rows read, {} written, {} dropped (invalid age), {} dropped (age > {})",
            self.summary.rows_read,
            self.summary.rows_written,
            self.summary.dropped_invalid_age,
            self.summary.dropped_age_ceiling,
            validator::MAX_REPORTABLE_AGE,
        );
        debug!("{} specimen ids digested", self.digest.ids_digested());

        Ok(())
    }

    /// Apply every field rule to one row
    pub fn transform_row(
        &mut self,
        mut row: SpecimenRow,
        line: u64,
    ) -> Result<RowOutcome, TransformError> {
        // 1. Age validation
        if validator::check_age(&row.person_age) == AgeCheck::Invalid {
            warn!("person age not a number ({})", row.person_age);
            if self.debug {
                self.summary.dropped_invalid_age += 1;
                return Ok(RowOutcome::Dropped(DropReason::InvalidAge));
            }
            row.person_age = INVALID_AGE_SENTINEL.to_string();
            self.summary.sentinel_ages += 1;
        }

        // 2. Age ceiling
        if !self.debug && validator::exceeds_age_ceiling(&row.person_age) {
            info!(
                "Person age greater than {} ({}), ignoring",
                validator::MAX_REPORTABLE_AGE,
                row.person_age
            );
            self.summary.dropped_age_ceiling += 1;
            return Ok(RowOutcome::Dropped(DropReason::AgeCeiling));
        }

        // 3. Person id
        let mut person_id = row.person_id.trim().to_string();
        if person_id.is_empty() {
            debug!("Generating a fake person ID");
            person_id = pseudonymizer::surrogate_person_key(&row)
                .map_err(|source| TransformError::UnmappedSurrogateField { line, source })?;
            self.summary.synthesized_person_ids += 1;
        }
        row.person_id = pseudonymizer::hash_person_id(&person_id).to_string();

        // 4. Specimen id
        let specimen_id = row.specimen_id.trim().to_string();
        if !specimen_id.is_empty() {
            row.specimen_id = self.digest.pseudonymize(&specimen_id);
        }

        // 5-7. Categories
        let repository = match row.repository_short_name() {
            Some(repository) => repository.to_string(),
            None => {
                warn!(
                    "repository short name not in row (line {}, {} columns)",
                    line,
                    row.column_count()
                );
                String::new()
            }
        };
        let primary_site = classifier::primary_site(&row.person_primary_site, &repository);

        let SpecimenClassification {
            category: specimen_category,
            tissue_diagnosis,
        } = classifier::classify_specimen(&row);
        if tissue_diagnosis.is_some() {
            self.summary.tissue_specimens += 1;
        }

        let person_category = classifier::person_category(
            &primary_site,
            &row.person_gender,
            &row.person_path_diagnosis,
        );

        // 8. Normalization
        row.person_race = lookup::normalize_race(&row.person_race).to_string();
        row.person_gender = lookup::normalize_gender(&row.person_gender).to_string();
        if !row.person_path_diagnosis.is_empty() {
            row.person_path_diagnosis = lookup::normalize_key(&row.person_path_diagnosis);
        }
        row.person_ethnicity = lookup::normalize_ethnicity(&row.person_ethnicity).to_string();
        row.person_primary_site = primary_site;

        Ok(RowOutcome::Written(Box::new(TransformedRow {
            specimen_category,
            person_category,
            tissue_diagnosis,
            row,
        })))
    }

    pub fn summary(&self) -> &TransformSummary {
        &self.summary
    }
}
