// ==============================================================================
// pseudonymizer.rs - Identifier Pseudonymization
// ==============================================================================
// Description: Replaces person and specimen identifiers with derived surrogates
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Person ids:   DefaultHasher over the (possibly synthesized) id string.
//               Same input => same output within a build; NOT stable across
//               toolchains and NOT equal to ids produced by earlier tooling.
// Specimen ids: One SHA-1 context per transform run. Each non-empty id is fed
//               into the running context and the row receives the digest of
//               every id seen so far. Output depends on row order.
// ==============================================================================

use sha1::{Digest, Sha1};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::lookup::{self, ETHNICITY_CODES, RACE_CODES};
use crate::parsers::SpecimenRow;

/// Errors raised while building a surrogate person key
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PseudonymError {
    #[error("Cannot synthesize person id: unmapped {field} '{value}'")]
    UnmappedField { field: &'static str, value: String },
}

/// Build a stand-in person key from demographic fields
///
/// Format: `<gender>_<raceCode>_<ethnicityCode>_<diagnosis>`, where the
/// diagnosis is the lowercased text (`unknown` when empty).
///
/// # Returns
/// * `Err(PseudonymError::UnmappedField)` - Race or ethnicity has no code
pub fn surrogate_person_key(row: &SpecimenRow) -> Result<String, PseudonymError> {
    let gender = lookup::normalize_key(&row.person_gender);

    let race = lookup::lookup(&RACE_CODES, &row.person_race).ok_or_else(|| {
        PseudonymError::UnmappedField {
            field: "race",
            value: row.person_race.clone(),
        }
    })?;

    let ethnicity = lookup::lookup(&ETHNICITY_CODES, &row.person_ethnicity).ok_or_else(|| {
        PseudonymError::UnmappedField {
            field: "ethnicity",
            value: row.person_ethnicity.clone(),
        }
    })?;

    let diagnosis = if row.person_path_diagnosis.is_empty() {
        "unknown".to_string()
    } else {
        lookup::normalize_key(&row.person_path_diagnosis)
    };

    Ok(format!("{}_{}_{}_{}", gender, race, ethnicity, diagnosis))
}

/// Non-reversible integer surrogate for a person id
pub fn hash_person_id(person_id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    person_id.hash(&mut hasher);
    hasher.finish()
}

/// Running SHA-1 context shared by every specimen id in one pass
#[derive(Debug, Clone, Default)]
pub struct SpecimenDigest {
    hasher: Sha1,
    ids_digested: u64,
}

impl SpecimenDigest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one specimen id and return the hex digest of everything fed so far
    pub fn pseudonymize(&mut self, specimen_id: &str) -> String {
        self.hasher.update(specimen_id.as_bytes());
        self.ids_digested += 1;
        format!("{:x}", self.hasher.clone().finalize())
    }

    /// Number of ids fed into the context
    pub fn ids_digested(&self) -> u64 {
        self.ids_digested
    }
}
