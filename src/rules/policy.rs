use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{FindingsReport, Severity};

/// The pass/fail decision drawn from a finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_findings: usize,
    pub highest_severity: Option<Severity>,
    pub fail_threshold: Severity,
}

/// Policy configuration loaded from `.appaudit.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Minimum severity that fails the run.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
    /// Check ids left out of the catalogue.
    #[serde(default)]
    pub disabled_checks: HashSet<String>,
}

fn default_fail_on() -> Severity {
    Severity::High
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: default_fail_on(),
            disabled_checks: HashSet::new(),
        }
    }
}

impl Policy {
    /// Evaluate a report against this policy. The report itself is not changed.
    pub fn evaluate(&self, report: &FindingsReport) -> PolicyVerdict {
        let highest = report.highest_severity();
        let failed = highest.is_some_and(|sev| sev >= self.fail_on);

        PolicyVerdict {
            pass: !failed,
            total_findings: report.total_findings,
            highest_severity: highest,
            fail_threshold: self.fail_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{aggregate, Category, Finding, ReportMetadata};
    use chrono::{TimeZone, Utc};

    fn report_with(severities: &[Severity]) -> FindingsReport {
        let findings = severities
            .iter()
            .map(|&severity| Finding {
                resource_name: "app".into(),
                check_id: "APPSVC-001".into(),
                category: Category::Security,
                severity,
                title: "t".into(),
                description: "d".into(),
                recommendation: "r".into(),
                reference: String::new(),
            })
            .collect();
        aggregate(
            findings,
            ReportMetadata {
                subscription: None,
                subscription_id: None,
                tenant_id: None,
                assessment_date: None,
                analysis_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            },
        )
    }

    #[test]
    fn default_policy_fails_on_high() {
        let verdict = Policy::default().evaluate(&report_with(&[Severity::High]));
        assert!(!verdict.pass);
        assert_eq!(verdict.highest_severity, Some(Severity::High));
    }

    #[test]
    fn default_policy_passes_on_medium() {
        let verdict = Policy::default().evaluate(&report_with(&[Severity::Medium, Severity::Low]));
        assert!(verdict.pass);
        assert_eq!(verdict.total_findings, 2);
    }

    #[test]
    fn empty_report_passes() {
        let verdict = Policy::default().evaluate(&report_with(&[]));
        assert!(verdict.pass);
        assert_eq!(verdict.highest_severity, None);
    }

    #[test]
    fn lower_threshold_fails_on_low() {
        let policy = Policy {
            fail_on: Severity::Low,
            ..Default::default()
        };
        assert!(!policy.evaluate(&report_with(&[Severity::Low])).pass);
    }
}
