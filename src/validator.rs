// ==============================================================================
// validator.rs - Row Field Validation
// ==============================================================================
// Description: Age validation and top-coding for de-identified specimen rows
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// Compliance: HIPAA § 164.514(b)(2)(i)(C) (ages over 89)
// ==============================================================================

/// Oldest age that may appear in the output
pub const MAX_REPORTABLE_AGE: u32 = 89;

/// Value written in place of an unparseable age outside debug mode
pub const INVALID_AGE_SENTINEL: &str = "-1";

/// Outcome of checking a raw age field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeCheck {
    /// Empty field, nothing to check
    Missing,
    /// Non-negative integer
    Valid,
    /// Present but not a non-negative integer
    Invalid,
}

/// Classify a raw age field
///
/// The field is checked as-is: surrounding whitespace makes it invalid.
pub fn check_age(raw: &str) -> AgeCheck {
    if raw.is_empty() {
        AgeCheck::Missing
    } else if raw.bytes().all(|b| b.is_ascii_digit()) {
        AgeCheck::Valid
    } else {
        AgeCheck::Invalid
    }
}

/// Whether a digit-only age string is above [`MAX_REPORTABLE_AGE`]
///
/// Compares the digit string directly so arbitrarily long values never
/// overflow. Non-digit input (including the `-1` sentinel) is never over.
pub fn exceeds_age_ceiling(age: &str) -> bool {
    if check_age(age) != AgeCheck::Valid {
        return false;
    }

    let significant = age.trim_start_matches('0');
    if significant.is_empty() {
        return false;
    }

    match significant.parse::<u32>() {
        Ok(value) => value > MAX_REPORTABLE_AGE,
        // Too many digits for u32, far past the ceiling
        Err(_) => true,
    }
}
