// ==============================================================================
// lookup.rs - Demographic Lookup Tables
// ==============================================================================
// Description: Static mappings from raw demographic values to canonical codes
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Keys are lowercased and trimmed before lookup. Tables are built once on
// first use and never mutated.
// ==============================================================================

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Race → single-letter code used in synthesized person keys
pub static RACE_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("african american/black", "b"),
        ("asian", "a"),
        ("caucasian/white", "c"),
        ("hawaiian/pacific islander", "h"),
        ("multiple", "m"),
        ("mixed race", "m"),
        ("native american/native alaskan", "i"),
        ("unknown", "x"),
        ("", "o"),
        ("other", "o"),
        ("a", "a"),
        ("b", "b"),
        ("c", "c"),
        ("h", "h"),
        ("i", "i"),
        ("o", "o"),
        ("x", "x"),
    ])
});

/// Ethnicity → code used in synthesized person keys
pub static ETHNICITY_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("ashkenazi", "aj"),
        ("ashkenazi jewish", "aj"),
        ("hispanic/latino", "hl"),
        ("not hispanic/latino", "nhl"),
        ("", "u"),
        ("unknown/prefer not to answer", "u"),
        ("unknown", "u"),
        ("mixed ethnicity", "m"),
        ("other", "o"),
    ])
});

/// Race → display value written to the output
pub static RACE_DISPLAY: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("african american/black", "african american/black"),
        ("asian", "asian"),
        ("caucasian/white", "caucasian/white"),
        ("caucasian", "caucasian/white"),
        ("hawaiian/pacific islander", "hawaiian/pacific islander"),
        ("asian/pac islander", "hawaiian/pacific islander"),
        ("multiple", "multiple"),
        ("mixed race", "multiple"),
        ("native american/native alaskan", "native american/native alaskan"),
        ("native american", "native american/native alaskan"),
        ("unknown", "unknown"),
        ("unk", "unknown"),
        ("", "unknown"),
        ("other", "other"),
        ("a", "asian"),
        ("b", "african american/black"),
        ("aa", "african american/black"),
        ("c", "caucasian/white"),
        ("h", "hawaiian/pacific islander"),
        ("i", "native american/native alaskan"),
        ("o", "other"),
        ("x", "unknown"),
    ])
});

/// Ethnicity → display value written to the output
pub static ETHNICITY_DISPLAY: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        HashMap::from([
            ("ashkenazi", "Ashkenazi"),
            ("ashkenazi jewish", "Ashkenazi"),
            ("hispanic/latino", "Hispanic/Latino"),
            ("not hispanic/latino", "Not Hispanic/Latino"),
            ("", "Unknown"),
            ("unknown/prefer not to answer", "Unknown"),
            ("unknown", "Unknown"),
            ("mixed ethnicity", "Mixed Ethnicity"),
            ("other", "Other"),
        ])
    });

/// Gender → display value written to the output
pub static GENDER_DISPLAY: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([("m", "m"), ("f", "f"), ("male", "m"), ("female", "f")])
});

/// Fallback for race values missing from [`RACE_DISPLAY`]
pub const UNKNOWN_RACE: &str = "unknown";
/// Fallback for ethnicity values missing from [`ETHNICITY_DISPLAY`]
pub const UNKNOWN_ETHNICITY: &str = "Unknown";
/// Fallback for gender values missing from [`GENDER_DISPLAY`]
pub const UNKNOWN_GENDER: &str = "unknown";

/// Lowercase and trim a raw field into lookup-key form
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Look up a raw value in one of the tables above
pub fn lookup(table: &HashMap<&'static str, &'static str>, raw: &str) -> Option<&'static str> {
    table.get(normalize_key(raw).as_str()).copied()
}

/// Canonical race display value, `unknown` when unmapped
pub fn normalize_race(raw: &str) -> &'static str {
    lookup(&RACE_DISPLAY, raw).unwrap_or_else(|| {
        warn!("Unknown race {}", normalize_key(raw));
        UNKNOWN_RACE
    })
}

/// Canonical ethnicity display value, `Unknown` when unmapped
pub fn normalize_ethnicity(raw: &str) -> &'static str {
    lookup(&ETHNICITY_DISPLAY, raw).unwrap_or_else(|| {
        warn!("Unknown ethnicity {}", normalize_key(raw));
        UNKNOWN_ETHNICITY
    })
}

/// Canonical gender code, `unknown` when unmapped
pub fn normalize_gender(raw: &str) -> &'static str {
    lookup(&GENDER_DISPLAY, raw).unwrap_or_else(|| {
        warn!("Unknown gender {}", normalize_key(raw));
        UNKNOWN_GENDER
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        assert_eq!(lookup(&RACE_DISPLAY, "  Caucasian "), Some("caucasian/white"));
        assert_eq!(lookup(&ETHNICITY_DISPLAY, "HISPANIC/LATINO"), Some("Hispanic/Latino"));
        assert_eq!(lookup(&GENDER_DISPLAY, "Female"), Some("f"));
    }

    #[test]
    fn test_blank_values_are_mapped() {
        assert_eq!(lookup(&RACE_CODES, ""), Some("o"));
        assert_eq!(lookup(&ETHNICITY_CODES, "   "), Some("u"));
        assert_eq!(lookup(&RACE_DISPLAY, ""), Some("unknown"));
        assert_eq!(lookup(&ETHNICITY_DISPLAY, ""), Some("Unknown"));
    }

    #[test]
    fn test_unmapped_values() {
        assert_eq!(lookup(&RACE_CODES, "caucasian"), None);
        assert_eq!(lookup(&GENDER_DISPLAY, "x"), None);
    }

    #[test]
    fn test_normalizers_fall_back() {
        assert_eq!(normalize_race("AA"), "african american/black");
        assert_eq!(normalize_race("martian"), "unknown");
        assert_eq!(normalize_ethnicity("Ashkenazi Jewish"), "Ashkenazi");
        assert_eq!(normalize_ethnicity("n/a"), "Unknown");
        assert_eq!(normalize_gender("MALE"), "m");
        assert_eq!(normalize_gender(""), "unknown");
    }

    #[test]
    fn test_display_values_are_self_consistent() {
        // Every race code letter has a display value
        for code in RACE_CODES.values() {
            if *code != "m" {
                assert!(RACE_DISPLAY.contains_key(code), "missing display for {}", code);
            }
        }
    }
}
