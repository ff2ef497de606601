use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Finding, Severity};
use crate::snapshot::Snapshot;

/// Run identity carried into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub subscription: Option<String>,
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    pub assessment_date: Option<String>,
    pub analysis_date: DateTime<Utc>,
}

impl ReportMetadata {
    pub fn from_snapshot(snapshot: &Snapshot, analysis_date: DateTime<Utc>) -> Self {
        Self {
            subscription: snapshot.subscription.clone(),
            subscription_id: snapshot.subscription_id.clone(),
            tenant_id: snapshot.tenant_id.clone(),
            assessment_date: snapshot.assessment_date.clone(),
            analysis_date,
        }
    }
}

/// Counts per severity; every bucket is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(rename = "Critical")]
    pub critical: usize,
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl SeverityCounts {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut counts = Self::default();
        for f in findings {
            counts.record(f.severity);
        }
        counts
    }

    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Counts per category; every bucket is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(rename = "Security")]
    pub security: usize,
    #[serde(rename = "Reliability")]
    pub reliability: usize,
    #[serde(rename = "Performance")]
    pub performance: usize,
    #[serde(rename = "Monitoring")]
    pub monitoring: usize,
    #[serde(rename = "DevOps")]
    pub devops: usize,
}

impl CategoryCounts {
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Security => self.security += 1,
            Category::Reliability => self.reliability += 1,
            Category::Performance => self.performance += 1,
            Category::Monitoring => self.monitoring += 1,
            Category::DevOps => self.devops += 1,
        }
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Security => self.security,
            Category::Reliability => self.reliability,
            Category::Performance => self.performance,
            Category::Monitoring => self.monitoring,
            Category::DevOps => self.devops,
        }
    }

    pub fn total(&self) -> usize {
        self.security + self.reliability + self.performance + self.monitoring + self.devops
    }
}

/// The aggregated output of one evaluation run, handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingsReport {
    #[serde(flatten)]
    pub metadata: ReportMetadata,
    pub total_findings: usize,
    pub findings_by_severity: SeverityCounts,
    pub findings_by_category: CategoryCounts,
    /// Engine emission order.
    pub findings: Vec<Finding>,
}

/// Per-resource severity tally, as shown in summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    pub resource_name: String,
    pub counts: SeverityCounts,
}

impl FindingsReport {
    /// `totalFindings == |findings| == Σ severity == Σ category`.
    pub fn is_consistent(&self) -> bool {
        self.total_findings == self.findings.len()
            && self.total_findings == self.findings_by_severity.total()
            && self.total_findings == self.findings_by_category.total()
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Severity counts per resource, sorted by resource name.
    pub fn by_resource(&self) -> Vec<ResourceSummary> {
        let mut tally: std::collections::BTreeMap<&str, SeverityCounts> =
            std::collections::BTreeMap::new();
        for f in &self.findings {
            tally
                .entry(f.resource_name.as_str())
                .or_default()
                .record(f.severity);
        }
        tally
            .into_iter()
            .map(|(name, counts)| ResourceSummary {
                resource_name: name.to_string(),
                counts,
            })
            .collect()
    }
}

/// Reduce the engine's findings into a report. Preserves finding order.
pub fn aggregate(findings: Vec<Finding>, metadata: ReportMetadata) -> FindingsReport {
    let mut by_severity = SeverityCounts::default();
    let mut by_category = CategoryCounts::default();
    for f in &findings {
        by_severity.record(f.severity);
        by_category.record(f.category);
    }

    FindingsReport {
        metadata,
        total_findings: findings.len(),
        findings_by_severity: by_severity,
        findings_by_category: by_category,
        findings,
    }
}
