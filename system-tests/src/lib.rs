// system-tests/src/lib.rs
// ============================================================================
// Module: Category Probe System Tests Library
// Description: Shared configuration for system test suites.
// Purpose: Provide common settings for the stub and live-api test binaries.
// Dependencies: category-probe
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the category-probe
//! system-test binaries in `system-tests/tests`.
//! Security posture: live credentials are read from disk and never logged.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
