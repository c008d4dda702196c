// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for biorepository specimen data files
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

pub mod specimen_row;

pub use specimen_row::{RowParseError, SpecimenRow, REQUIRED_COLUMNS};
