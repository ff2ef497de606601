//! appaudit: best-practice auditor for cloud app hosting snapshots.
//!
//! Offline and deterministic: reads a configuration snapshot produced by the
//! collection step, runs the check catalogue against every resource and
//! emits a findings report for the renderers.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use appaudit::{analyze, AuditOptions};
//!
//! let options = AuditOptions::default();
//! let run = analyze(Path::new("./app-services.json"), &options).unwrap();
//! println!("Pass: {}, Findings: {}", run.verdict.pass, run.report.total_findings);
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod rules;
pub mod snapshot;
pub mod source;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use config::Config;
use error::Result;
use output::OutputFormat;
use rules::policy::PolicyVerdict;
use rules::{Catalogue, FindingsReport, ReportMetadata};
use snapshot::Snapshot;
use source::{JsonFileSource, SnapshotSource};

/// Options for an analyze invocation.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Path to config file (defaults to `.appaudit.toml` next to the snapshot).
    pub config_path: Option<PathBuf>,
    /// CLI override for fail_on threshold.
    pub fail_on_override: Option<rules::Severity>,
    /// Evaluate records on the rayon pool.
    pub parallel: bool,
    /// Timestamp stamped into the report; current time when unset.
    pub analysis_date: Option<DateTime<Utc>>,
}

/// Report plus the policy decision drawn from it.
#[derive(Debug)]
pub struct AuditRun {
    pub report: FindingsReport,
    pub verdict: PolicyVerdict,
}

/// Evaluate one snapshot against a catalogue and aggregate the result.
///
/// Pure: the same snapshot, catalogue and `analysis_date` always give the
/// same report.
pub fn audit(snapshot: &Snapshot, catalogue: &Catalogue, analysis_date: DateTime<Utc>) -> FindingsReport {
    let findings = rules::evaluate(snapshot, catalogue);
    rules::aggregate(findings, ReportMetadata::from_snapshot(snapshot, analysis_date))
}

/// Same as [`audit`], evaluating records in parallel.
pub fn audit_parallel(
    snapshot: &Snapshot,
    catalogue: &Catalogue,
    analysis_date: DateTime<Utc>,
) -> FindingsReport {
    let findings = rules::evaluate_parallel(snapshot, catalogue);
    rules::aggregate(findings, ReportMetadata::from_snapshot(snapshot, analysis_date))
}

/// Run a complete analysis: load config, build the catalogue, load the
/// snapshot, evaluate, aggregate, apply policy.
///
/// Catalogue problems fail here, before the snapshot is read.
pub fn analyze(snapshot_path: &Path, options: &AuditOptions) -> Result<AuditRun> {
    let config_path = options.config_path.clone().unwrap_or_else(|| {
        snapshot_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".appaudit.toml")
    });
    let mut config = Config::load(&config_path)?;

    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }

    let catalogue = config.catalogue()?;
    let snapshot = JsonFileSource::new(snapshot_path).load()?;

    let analysis_date = options.analysis_date.unwrap_or_else(Utc::now);
    let report = if options.parallel {
        audit_parallel(&snapshot, &catalogue, analysis_date)
    } else {
        audit(&snapshot, &catalogue, analysis_date)
    };
    let verdict = config.policy.evaluate(&report);

    tracing::info!(
        resources = snapshot.resources.len(),
        checks = catalogue.len(),
        findings = report.total_findings,
        pass = verdict.pass,
        "analysis complete"
    );

    Ok(AuditRun { report, verdict })
}

/// Render an analysis run in the specified format.
pub fn render_report(run: &AuditRun, format: OutputFormat) -> Result<String> {
    output::render(&run.report, &run.verdict, format)
}
