//! Rule evaluation engine.
//!
//! Output order is resource-major, check-minor, then each check's own
//! emission order. The parallel variant produces the identical sequence.

use rayon::prelude::*;

use super::{Catalogue, Category, CheckFault, CheckMetadata, Finding, Registered, Severity};
use crate::snapshot::{ResourceRecord, Snapshot};

pub const SKIPPED_TITLE: &str = "check evaluation skipped";

/// Check id carried by the diagnostic for a record that could not be read at all.
pub const RECORD_DIAGNOSTIC_ID: &str = "APPSVC-000";

/// Run every catalogued check against every record, sequentially.
pub fn evaluate(snapshot: &Snapshot, catalogue: &Catalogue) -> Vec<Finding> {
    snapshot
        .resources
        .iter()
        .flat_map(|record| evaluate_record(record, catalogue))
        .collect()
}

/// Same result as [`evaluate`], with records spread over the rayon pool.
pub fn evaluate_parallel(snapshot: &Snapshot, catalogue: &Catalogue) -> Vec<Finding> {
    let per_record: Vec<Vec<Finding>> = snapshot
        .resources
        .par_iter()
        .map(|record| evaluate_record(record, catalogue))
        .collect();
    per_record.into_iter().flatten().collect()
}

/// Run every catalogued check, in registration order, against one record.
pub fn evaluate_record(record: &ResourceRecord, catalogue: &Catalogue) -> Vec<Finding> {
    let resource = record.display_name();
    if let Some(reason) = &record.unreadable {
        tracing::warn!(resource, error = %reason, "resource record unreadable, no checks run");
        return vec![unreadable_record_finding(resource, reason)];
    }
    tracing::debug!(resource, checks = catalogue.len(), "evaluating resource");

    let mut findings = Vec::new();
    for entry in catalogue.entries() {
        findings.extend(run_one(entry, record, resource));
    }
    findings
}

fn run_one(entry: &Registered, record: &ResourceRecord, resource: &str) -> Vec<Finding> {
    match entry.check.run(record) {
        Ok(findings) => findings
            .into_iter()
            .map(|mut f| {
                if f.resource_name.is_empty() {
                    f.resource_name = resource.to_string();
                }
                if f.check_id.is_empty() {
                    f.check_id = entry.metadata.id.clone();
                }
                f
            })
            .collect(),
        Err(fault) => {
            tracing::warn!(
                check = %entry.metadata.id,
                resource,
                error = %fault,
                "check faulted, recording diagnostic finding"
            );
            vec![skipped_finding(&entry.metadata, resource, &fault)]
        }
    }
}

fn skipped_finding(meta: &CheckMetadata, resource: &str, fault: &CheckFault) -> Finding {
    Finding {
        resource_name: resource.to_string(),
        check_id: meta.id.clone(),
        category: Category::Monitoring,
        severity: Severity::Low,
        title: SKIPPED_TITLE.into(),
        description: format!(
            "Check {} ({}) could not be evaluated for '{}': {}",
            meta.id, meta.name, resource, fault
        ),
        recommendation: "Inspect the collected configuration for this resource and re-run \
                         the collection step; the check result is unknown until then."
            .into(),
        reference: String::new(),
    }
}

fn unreadable_record_finding(resource: &str, reason: &str) -> Finding {
    Finding {
        resource_name: resource.to_string(),
        check_id: RECORD_DIAGNOSTIC_ID.into(),
        category: Category::Monitoring,
        severity: Severity::Low,
        title: SKIPPED_TITLE.into(),
        description: format!("Resource record could not be read, no checks were run: {reason}"),
        recommendation: "Inspect the snapshot entry for this resource and re-run the collection step."
            .into(),
        reference: String::new(),
    }
}
