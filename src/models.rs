// ==============================================================================
// models.rs - Cohort and Category Models
// ==============================================================================
// Description: Value types shared by the concatenation and transform passes
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use std::fmt;
use std::str::FromStr;

/// Optional clinical cohort that can be pulled into a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cohort {
    Lung,
    Gyn,
    Sarcoma,
    Neuro,
    HeadNeck,
}

impl Cohort {
    /// All optional cohorts, in concatenation order
    pub const ALL: [Cohort; 5] = [
        Cohort::Lung,
        Cohort::Gyn,
        Cohort::Sarcoma,
        Cohort::Neuro,
        Cohort::HeadNeck,
    ];

    /// Selection key accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Cohort::Lung => "lung",
            Cohort::Gyn => "gyn",
            Cohort::Sarcoma => "sarcoma",
            Cohort::Neuro => "neuro",
            Cohort::HeadNeck => "headneck",
        }
    }

    /// Source file holding this cohort's rows
    pub fn file_name(&self) -> &'static str {
        match self {
            Cohort::Lung => "lung.tsv",
            Cohort::Gyn => "gyn.tsv",
            Cohort::Sarcoma => "sarcoma.tsv",
            Cohort::Neuro => "neuro.tsv",
            Cohort::HeadNeck => "headNeck.tsv",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which optional inputs a run includes, and whether it runs in debug mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Mandatory files only
    #[default]
    None,
    /// Every optional cohort, and lenient transform rules
    Debug,
    /// Mandatory files plus one cohort
    Cohort(Cohort),
}

impl Selection {
    pub fn is_debug(&self) -> bool {
        matches!(self, Selection::Debug)
    }

    /// Whether the given optional cohort is pulled in by this selection
    pub fn includes(&self, cohort: Cohort) -> bool {
        match self {
            Selection::None => false,
            Selection::Debug => true,
            Selection::Cohort(selected) => *selected == cohort,
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        if key == "debug" {
            return Ok(Selection::Debug);
        }

        Cohort::ALL
            .iter()
            .find(|cohort| cohort.as_str() == key)
            .map(|cohort| Selection::Cohort(*cohort))
            .ok_or_else(|| {
                format!(
                    "unknown selection '{}' (expected debug, lung, gyn, sarcoma, neuro, headneck)",
                    s
                )
            })
    }
}

/// Coarse classification of a specimen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecimenCategory {
    Metastatic,
    TissueCancer,
    TissueNonCancer,
    Blood,
    Other,
}

impl SpecimenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecimenCategory::Metastatic => "metastatic",
            SpecimenCategory::TissueCancer => "tissue cancer",
            SpecimenCategory::TissueNonCancer => "tissue non cancer",
            SpecimenCategory::Blood => "blood",
            SpecimenCategory::Other => "other",
        }
    }

    pub fn is_tissue(&self) -> bool {
        matches!(
            self,
            SpecimenCategory::TissueCancer | SpecimenCategory::TissueNonCancer
        )
    }
}

impl fmt::Display for SpecimenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline passes to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Stage {
    /// Concatenate, then transform
    #[default]
    All,
    /// Build alldata.tsv only
    Concatenate,
    /// Transform an existing alldata.tsv only
    Transform,
}

impl Stage {
    pub fn runs_concatenate(&self) -> bool {
        matches!(self, Stage::All | Stage::Concatenate)
    }

    pub fn runs_transform(&self) -> bool {
        matches!(self, Stage::All | Stage::Transform)
    }
}
