// crates/category-probe/src/config/mod.rs
// ============================================================================
// Module: Probe Configuration
// Description: Centralized configuration for category probe runs.
// Purpose: Provide typed access to environment settings and defaults.
// Dependencies: std, thiserror
// ============================================================================

//! ## Overview
//! Probe configuration is read from environment variables and mapped into a
//! small typed structure. CLI flags are layered on top by the binary.
//! Security posture: environment inputs are untrusted and parsed fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::ProbeConfig;
pub use env::ProbeEnv;
pub use env::parse_timeout_seconds;
pub use env::read_env_strict;
