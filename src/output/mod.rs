pub mod console;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::policy::PolicyVerdict;
use crate::rules::FindingsReport;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" | "summary" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render a findings report into the specified format.
pub fn render(report: &FindingsReport, verdict: &PolicyVerdict, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(report, verdict)),
        OutputFormat::Json => json::render(report),
    }
}
