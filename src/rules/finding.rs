use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snapshot::ShapeError;

/// A best-practice finding produced by a check against one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Audited resource (filled in by the engine when a check leaves it empty).
    #[serde(alias = "appService")]
    pub resource_name: String,
    /// Id of the check that produced this finding (e.g., "APPSVC-001").
    pub check_id: String,
    pub category: Category,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Remediation text, may embed an example command.
    pub recommendation: String,
    /// Documentation pointer.
    #[serde(default)]
    pub reference: String,
}

impl Finding {
    /// Start a finding for the given check. Resource attribution is left to the engine.
    pub fn new(meta: &CheckMetadata, severity: Severity, title: impl Into<String>) -> Self {
        Self {
            resource_name: String::new(),
            check_id: meta.id.clone(),
            category: meta.category,
            severity,
            title: title.into(),
            description: String::new(),
            recommendation: String::new(),
            reference: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }
}

/// Finding severity, ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "critical")]
    Critical,
}

impl Severity {
    /// Most severe first.
    pub const ALL: [Severity; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Best-practice area a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Security,
    Reliability,
    Performance,
    Monitoring,
    DevOps,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Security,
        Self::Reliability,
        Self::Performance,
        Self::Monitoring,
        Self::DevOps,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Security => write!(f, "Security"),
            Self::Reliability => write!(f, "Reliability"),
            Self::Performance => write!(f, "Performance"),
            Self::Monitoring => write!(f, "Monitoring"),
            Self::DevOps => write!(f, "DevOps"),
        }
    }
}

/// Metadata about a check, used for registration and `list-checks` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub default_severity: Severity,
}

/// A check could not reach a verdict for a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFault {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("{0}")]
    Unreadable(String),
}
