use crate::error::Result;
use crate::rules::FindingsReport;

/// Render the findings report document handed to downstream renderers.
pub fn render(report: &FindingsReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
