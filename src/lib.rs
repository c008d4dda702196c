// ==============================================================================
// lib.rs - Specimen ETL Library
// ==============================================================================
// Description: Library interface for specimen de-identification modules
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

pub mod parsers;
pub mod models;
pub mod lookup;
pub mod validator;
pub mod pseudonymizer;
pub mod classifier;
pub mod concatenator;
pub mod transformer;
pub mod pipeline;
