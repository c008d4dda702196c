// ==============================================================================
// specimen_row.rs - Biorepository Specimen Row Parser
// ==============================================================================
// Description: Named-field view over one tab-delimited specimen record
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Format: Tab-delimited, positional columns
//   0  personId                      11 specimenSite
//   1  personAgeAtSpecimenCollection 12 specimenType
//   2  personGender                  13 specimenPreservationMethod
//   3  personRace                    14 specimenPathDiagnosis
//   4  personEthnicity               15 specimenHistDiagnosis
//   5  personPathStage               16 specimenPathGrade
//   6  personPathDiagnosis           17 specimenTumorMarkers
//   7  personPrimaryHistDiagnosis    18 specimenPriorTx
//   8  personPrimarySite             19 specimenNotes
//   9  personPriorCancerHistory      20 repositoryShortName
//   10 specimenId                    21 dataOrigin
// Columns 0-14 are required; 15 onwards are carried through as-is.
// ==============================================================================

use thiserror::Error;

/// Number of leading columns every row must carry
pub const REQUIRED_COLUMNS: usize = 15;

/// Column index of the repository short name
pub const REPOSITORY_SHORT_NAME: usize = 20;

/// Errors raised while mapping a raw record onto [`SpecimenRow`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowParseError {
    #[error("Malformed row at line {line}: expected at least {expected} columns, found {found}")]
    TooFewColumns {
        line: u64,
        found: usize,
        expected: usize,
    },
}

/// One specimen record with its fields named
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecimenRow {
    pub person_id: String,
    pub person_age: String,
    pub person_gender: String,
    pub person_race: String,
    pub person_ethnicity: String,
    pub person_path_stage: String,
    pub person_path_diagnosis: String,
    pub person_primary_hist_diagnosis: String,
    pub person_primary_site: String,
    pub person_prior_cancer_history: String,
    pub specimen_id: String,
    pub specimen_site: String,
    pub specimen_type: String,
    pub specimen_preservation_method: String,
    pub specimen_path_diagnosis: String,
    /// Columns from specimenHistDiagnosis onwards, in input order
    pub trailing: Vec<String>,
}

impl SpecimenRow {
    /// Build a row from its tab-split fields
    ///
    /// # Arguments
    /// * `fields` - Raw fields in column order
    /// * `line` - 1-based line number, for error reporting
    ///
    /// # Returns
    /// * `Err(RowParseError::TooFewColumns)` - Fewer than [`REQUIRED_COLUMNS`] fields
    pub fn from_fields<'a, I>(fields: I, line: u64) -> Result<Self, RowParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter().map(str::to_string);
        let mut required: Vec<String> = fields.by_ref().take(REQUIRED_COLUMNS).collect();

        if required.len() < REQUIRED_COLUMNS {
            return Err(RowParseError::TooFewColumns {
                line,
                found: required.len(),
                expected: REQUIRED_COLUMNS,
            });
        }

        let trailing: Vec<String> = fields.collect();
        let mut take = |i: usize| std::mem::take(&mut required[i]);

        Ok(Self {
            person_id: take(0),
            person_age: take(1),
            person_gender: take(2),
            person_race: take(3),
            person_ethnicity: take(4),
            person_path_stage: take(5),
            person_path_diagnosis: take(6),
            person_primary_hist_diagnosis: take(7),
            person_primary_site: take(8),
            person_prior_cancer_history: take(9),
            specimen_id: take(10),
            specimen_site: take(11),
            specimen_type: take(12),
            specimen_preservation_method: take(13),
            specimen_path_diagnosis: take(14),
            trailing,
        })
    }

    /// Repository short name, if the row carries that column
    pub fn repository_short_name(&self) -> Option<&str> {
        self.trailing
            .get(REPOSITORY_SHORT_NAME - REQUIRED_COLUMNS)
            .map(String::as_str)
    }

    /// Number of columns the row will be written with
    pub fn column_count(&self) -> usize {
        REQUIRED_COLUMNS + self.trailing.len()
    }

    /// Fields in their original column order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        [
            &self.person_id,
            &self.person_age,
            &self.person_gender,
            &self.person_race,
            &self.person_ethnicity,
            &self.person_path_stage,
            &self.person_path_diagnosis,
            &self.person_primary_hist_diagnosis,
            &self.person_primary_site,
            &self.person_prior_cancer_history,
            &self.specimen_id,
            &self.specimen_site,
            &self.specimen_type,
            &self.specimen_preservation_method,
            &self.specimen_path_diagnosis,
        ]
        .into_iter()
        .chain(self.trailing.iter())
        .map(String::as_str)
    }
}
