//! Translation consistency audit
//!
//! Compares translated `strings.xml` files against the default-language
//! baseline and reports, per candidate, the keys it lacks and the keys the
//! baseline does not know about.

use crate::resources::{extract_keys, KeySet};
use droidtools_core::config::{CandidateErrorPolicy, UnnamedEntryPolicy};
use droidtools_core::error::{Error, ErrorReport, Result, ResultExt};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Audit outcome for a single candidate file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    /// Candidate path as given by the caller
    pub candidate: PathBuf,
    /// Keys in the baseline but not in the candidate
    pub missing: KeySet,
    /// Keys in the candidate but not in the baseline
    pub superfluous: KeySet,
}

impl TranslationReport {
    /// Compare a candidate key set against the baseline
    pub fn compare(candidate: impl Into<PathBuf>, baseline: &KeySet, keys: &KeySet) -> Self {
        Self {
            candidate: candidate.into(),
            missing: baseline.difference(keys).cloned().collect(),
            superfluous: keys.difference(baseline).cloned().collect(),
        }
    }

    /// Whether the candidate has exactly the baseline's keys
    pub fn is_synchronized(&self) -> bool {
        self.missing.is_empty() && self.superfluous.is_empty()
    }

    /// Write the human-readable report block
    ///
    /// Both listings are always written, even when empty.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Report for {}:", self.candidate.display())?;
        writeln!(out, "Missing translations:")?;
        for key in &self.missing {
            writeln!(out, "   {}", key)?;
        }
        writeln!(out, "Superfluous translations:")?;
        for key in &self.superfluous {
            writeln!(out, "   {}", key)?;
        }
        Ok(())
    }
}

/// A candidate that could not be audited
#[derive(Debug, Clone, Serialize)]
pub struct CandidateFailure {
    /// Candidate path as given by the caller
    pub candidate: PathBuf,
    /// Why the candidate could not be read
    pub error: ErrorReport,
}

/// Audits candidates against a baseline key set read once up front
#[derive(Debug, Clone)]
pub struct Auditor {
    baseline_path: PathBuf,
    baseline: KeySet,
    policy: UnnamedEntryPolicy,
}

impl Auditor {
    /// Read the baseline file
    ///
    /// Any failure here is fatal for the whole run.
    pub fn open(baseline_path: &Path, policy: UnnamedEntryPolicy) -> Result<Self> {
        let baseline = extract_keys(baseline_path, policy)
            .context(format!("While reading baseline {}", baseline_path.display()))?;

        tracing::info!(
            baseline = %baseline_path.display(),
            keys = baseline.len(),
            "baseline loaded"
        );

        Ok(Self::with_baseline(baseline_path, baseline, policy))
    }

    /// Build an auditor from an already extracted baseline
    pub fn with_baseline(
        baseline_path: impl Into<PathBuf>,
        baseline: KeySet,
        policy: UnnamedEntryPolicy,
    ) -> Self {
        Self {
            baseline_path: baseline_path.into(),
            baseline,
            policy,
        }
    }

    /// Path the baseline was read from
    pub fn baseline_path(&self) -> &Path {
        &self.baseline_path
    }

    /// Keys of the baseline
    pub fn baseline(&self) -> &KeySet {
        &self.baseline
    }

    /// Audit a single candidate file
    pub fn audit_candidate(&self, candidate: &Path) -> Result<TranslationReport> {
        let keys = extract_keys(candidate, self.policy)
            .context(format!("While reading candidate {}", candidate.display()))?;
        let report = TranslationReport::compare(candidate, &self.baseline, &keys);

        tracing::info!(
            candidate = %candidate.display(),
            missing = report.missing.len(),
            superfluous = report.superfluous.len(),
            "candidate audited"
        );

        Ok(report)
    }

    /// Audit candidates in order, stopping at the first failure
    pub fn audit_all<P: AsRef<Path>>(&self, candidates: &[P]) -> Result<Vec<TranslationReport>> {
        candidates
            .iter()
            .map(|c| self.audit_candidate(c.as_ref()))
            .collect()
    }

    /// Audit candidates under the given failure policy
    ///
    /// `on_report` is invoked for every audited candidate as soon as it is
    /// ready, in input order. With [`CandidateErrorPolicy::Abort`] the first
    /// failure is returned; with [`CandidateErrorPolicy::Continue`] failures
    /// are handed to `on_failure` and the run goes on.
    pub fn run<P, R, F>(
        &self,
        candidates: &[P],
        policy: CandidateErrorPolicy,
        mut on_report: R,
        mut on_failure: F,
    ) -> Result<AuditSummary>
    where
        P: AsRef<Path>,
        R: FnMut(&TranslationReport) -> Result<()>,
        F: FnMut(&Path, &Error),
    {
        let mut summary = AuditSummary::default();

        for candidate in candidates {
            let candidate = candidate.as_ref();
            match self.audit_candidate(candidate) {
                Ok(report) => {
                    summary.audited += 1;
                    if !report.is_synchronized() {
                        summary.out_of_sync += 1;
                    }
                    on_report(&report)?;
                }
                Err(error) => match policy {
                    CandidateErrorPolicy::Abort => return Err(error),
                    CandidateErrorPolicy::Continue => {
                        tracing::warn!(candidate = %candidate.display(), %error, "candidate skipped");
                        summary.failed += 1;
                        on_failure(candidate, &error);
                    }
                },
            }
        }

        Ok(summary)
    }
}

/// Counters collected by [`Auditor::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    /// Candidates that produced a report
    pub audited: usize,
    /// Reports with at least one missing or superfluous key
    pub out_of_sync: usize,
    /// Candidates skipped under [`CandidateErrorPolicy::Continue`]
    pub failed: usize,
}

/// Audit `candidates` against the baseline at `baseline_path`
///
/// The baseline is read once. Reports come back in candidate order and the
/// first failing candidate aborts the audit.
pub fn audit<P: AsRef<Path>>(
    baseline_path: &Path,
    candidates: &[P],
    policy: UnnamedEntryPolicy,
) -> Result<Vec<TranslationReport>> {
    Auditor::open(baseline_path, policy)?.audit_all(candidates)
}

/// Machine-readable audit output
#[derive(Debug, Serialize)]
pub struct JsonAuditOutput {
    /// Baseline path
    pub baseline: PathBuf,
    /// Number of keys in the baseline
    pub baseline_keys: usize,
    /// Reports in candidate order
    pub reports: Vec<TranslationReport>,
    /// Candidates that could not be audited
    pub failures: Vec<CandidateFailure>,
}
