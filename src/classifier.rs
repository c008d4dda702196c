// ==============================================================================
// classifier.rs - Specimen and Person Categorization
// ==============================================================================
// Description: Derives primary site, specimen category and person category
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Specimen category precedence:
//   1. type contains "met"                         → metastatic
//   2. type contains "tissue" / starts "lymph node" → tissue (non) cancer
//   3. type contains "blood" or is a blood product  → blood
//   4. anything else                                → other
// ==============================================================================

use crate::lookup::normalize_key;
use crate::models::SpecimenCategory;
use crate::parsers::SpecimenRow;

/// Specimen types that are blood products
const BLOOD_SPECIMEN_TYPES: [&str; 4] = ["serum", "plasma", "buffy coat", "wbc pellet"];

/// Specimen type phrases marking tissue as non-cancer
const NON_CANCER_TYPE_KEYWORDS: [&str; 2] = ["benign", "not cancer"];

/// Specimen diagnosis phrases marking tissue as non-cancer
const NON_CANCER_DIAGNOSIS_KEYWORDS: [&str; 9] = [
    "benign",
    "other",
    "norm",
    "functional cyst",
    "corpus luteum",
    "necrosis only",
    "inflammatory lesion",
    "not cancer",
    "no cancer",
];

/// Primary site text that maps to ovarian
const OVARIAN_SITE_KEYWORDS: [&str; 3] = ["ovar", "endom", "fallopian"];

/// Repository names whose donors are all gynecologic
const OVARIAN_REPOSITORY_KEYWORDS: [&str; 2] = ["gyn", "pocrc"];

/// Result of classifying one specimen
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenClassification {
    pub category: SpecimenCategory,
    /// Normalized pathology diagnosis, kept for tissue specimens only
    pub tissue_diagnosis: Option<String>,
}

/// Derive the person's primary anatomical site
///
/// `repository` is the repository short name, empty when the row lacks it.
pub fn primary_site(raw_site: &str, repository: &str) -> String {
    let site = normalize_key(raw_site);
    let repository = normalize_key(repository);

    if OVARIAN_SITE_KEYWORDS.iter().any(|k| site.contains(k)) {
        "ovarian".to_string()
    } else if site.contains("breast") {
        "breast".to_string()
    } else if OVARIAN_REPOSITORY_KEYWORDS.iter().any(|k| repository.contains(k)) {
        "ovarian".to_string()
    } else {
        site
    }
}

/// Classify a specimen from its type and pathology diagnosis
pub fn classify_specimen(row: &SpecimenRow) -> SpecimenClassification {
    let specimen_type = normalize_key(&row.specimen_type);
    let diagnosis = normalize_key(&row.specimen_path_diagnosis);

    if specimen_type.contains("met") {
        return SpecimenClassification {
            category: SpecimenCategory::Metastatic,
            tissue_diagnosis: None,
        };
    }

    if specimen_type.contains("tissue") || specimen_type.starts_with("lymph node") {
        let non_cancer = NON_CANCER_TYPE_KEYWORDS.iter().any(|k| specimen_type.contains(k))
            || NON_CANCER_DIAGNOSIS_KEYWORDS.iter().any(|k| diagnosis.contains(k));

        let category = if non_cancer {
            SpecimenCategory::TissueNonCancer
        } else {
            SpecimenCategory::TissueCancer
        };

        return SpecimenClassification {
            category,
            tissue_diagnosis: Some(diagnosis),
        };
    }

    let category = if specimen_type.contains("blood")
        || BLOOD_SPECIMEN_TYPES.contains(&specimen_type.as_str())
    {
        SpecimenCategory::Blood
    } else {
        SpecimenCategory::Other
    };

    SpecimenClassification {
        category,
        tissue_diagnosis: None,
    }
}

/// Person category: "<site> cancer" or "non-cancer <gender>"
pub fn person_category(primary_site: &str, raw_gender: &str, raw_diagnosis: &str) -> String {
    let site = if primary_site == "cns" { "neuro" } else { primary_site };
    let gender = if normalize_key(raw_gender) == "f" { "female" } else { "male" };

    if normalize_key(raw_diagnosis) == "cancer" {
        format!("{} cancer", site)
    } else {
        format!("non-cancer {}", gender)
    }
}
