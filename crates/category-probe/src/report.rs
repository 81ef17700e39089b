// crates/category-probe/src/report.rs
// ============================================================================
// Module: Suite Report
// Description: Per-scenario outcomes and report artifacts for a run.
// Purpose: Summarize pass/fail results and persist them deterministically.
// Dependencies: serde, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! A [`SuiteReport`] collects one [`ScenarioOutcome`] per executed scenario.
//! When a report directory is configured the run writes `summary.json`
//! (canonical JCS JSON), `summary.md`, and `transcript.json`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use thiserror::Error;

use crate::client::TranscriptEntry;
use crate::scenarios::ScenarioGroup;
use crate::scenarios::ScenarioId;
use crate::scenarios::ScenarioResult;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical JSON summary file name.
pub const SUMMARY_JSON: &str = "summary.json";
/// Markdown summary file name.
pub const SUMMARY_MARKDOWN: &str = "summary.md";
/// HTTP transcript file name.
pub const TRANSCRIPT_JSON: &str = "transcript.json";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Report artifact errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("failed to write report artifact {path}: {source}")]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Canonical serialization failure.
    #[error("failed to serialize report artifact {name}: {message}")]
    Serialize {
        /// Artifact name.
        name: &'static str,
        /// Serializer message.
        message: String,
    },
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Pass/fail status of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Contract held.
    Pass,
    /// Contract violated or exchange failed.
    Fail,
}

impl ScenarioStatus {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario identifier.
    pub scenario: ScenarioId,
    /// Endpoint group.
    pub group: ScenarioGroup,
    /// Contract description.
    pub description: String,
    /// Pass/fail status.
    pub status: ScenarioStatus,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Failure description when failed.
    pub detail: Option<String>,
    /// Observations recorded by a passing scenario.
    pub notes: Vec<String>,
}

impl ScenarioOutcome {
    /// Builds an outcome from a scenario result.
    #[must_use]
    pub fn from_result(id: ScenarioId, elapsed: Duration, result: ScenarioResult) -> Self {
        let (status, detail, notes) = match result {
            Ok(evidence) => (ScenarioStatus::Pass, None, evidence.notes),
            Err(failure) => (ScenarioStatus::Fail, Some(failure.to_string()), Vec::new()),
        };
        Self {
            scenario: id,
            group: id.group(),
            description: id.description().to_string(),
            status,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            detail,
            notes,
        }
    }

    /// Returns true when the scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Pass
    }
}

/// Outcomes of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Start time in milliseconds since the Unix epoch.
    pub started_at_ms: u64,
    /// End time in milliseconds since the Unix epoch.
    pub ended_at_ms: u64,
    /// Run duration in milliseconds.
    pub duration_ms: u64,
    /// Outcomes in execution order.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Starts an empty report stamped with the current time.
    #[must_use]
    pub fn start() -> Self {
        let now = now_millis();
        Self {
            started_at_ms: now,
            ended_at_ms: now,
            duration_ms: 0,
            outcomes: Vec::new(),
        }
    }

    /// Appends an outcome.
    pub fn push(&mut self, outcome: ScenarioOutcome) {
        self.outcomes.push(outcome);
    }

    /// Stamps the end time.
    pub fn finish(&mut self) {
        self.ended_at_ms = now_millis();
        self.duration_ms = self.ended_at_ms.saturating_sub(self.started_at_ms);
    }

    /// Returns true when every outcome passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    /// Returns the number of passing outcomes.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    /// Returns the number of failing outcomes.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    /// Returns the outcome for a scenario, if it ran.
    #[must_use]
    pub fn outcome(&self, id: ScenarioId) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.scenario == id)
    }

    /// Renders a Markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Category Contract Summary\n\n");
        out.push_str("## Status\n\n");
        let _ = writeln!(out, "- Passed: {}", self.passed_count());
        let _ = writeln!(out, "- Failed: {}", self.failed_count());
        let _ = writeln!(out, "- Duration (ms): {}", self.duration_ms);
        let mut current_group = None;
        for outcome in &self.outcomes {
            if current_group != Some(outcome.group) {
                current_group = Some(outcome.group);
                let _ = write!(out, "\n## {}\n\n", outcome.group.title());
            }
            let _ = writeln!(
                out,
                "- [{}] `{}`: {}",
                outcome.status.as_str(),
                outcome.scenario,
                outcome.description
            );
            if let Some(detail) = &outcome.detail {
                let _ = writeln!(out, "  - {detail}");
            }
            for note in &outcome.notes {
                let _ = writeln!(out, "  - {note}");
            }
        }
        out
    }

    /// Writes `summary.json`, `summary.md`, and `transcript.json` into `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the directory or a file cannot be written.
    pub fn write_artifacts(
        &self,
        dir: &Path,
        transcript: &[TranscriptEntry],
    ) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(dir).map_err(|source| ReportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let summary = canonical_json(SUMMARY_JSON, self)?;
        let transcript = canonical_json(TRANSCRIPT_JSON, &transcript)?;
        let mut written = Vec::new();
        for (name, bytes) in [
            (SUMMARY_JSON, summary),
            (SUMMARY_MARKDOWN, self.to_markdown().into_bytes()),
            (TRANSCRIPT_JSON, transcript),
        ] {
            let path = dir.join(name);
            fs::write(&path, bytes).map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        Ok(written)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Serializes a value with JCS canonicalization.
fn canonical_json<T: Serialize + ?Sized>(
    name: &'static str,
    value: &T,
) -> Result<Vec<u8>, ReportError> {
    serde_jcs::to_vec(value).map_err(|err| ReportError::Serialize {
        name,
        message: err.to_string(),
    })
}

/// Returns milliseconds since the Unix epoch.
fn now_millis() -> u64 {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
    u64::try_from(millis).unwrap_or(u64::MAX)
}
