use crate::rules::policy::PolicyVerdict;
use crate::rules::{Category, Finding, FindingsReport, Severity};

const RULE: usize = 80;

/// Render a plain-text executive summary: totals, per-resource and
/// per-category tallies, critical findings in full, then the verdict.
pub fn render(report: &FindingsReport, verdict: &PolicyVerdict) -> String {
    let mut output = String::new();
    let meta = &report.metadata;

    output.push_str(&format!("{}\n", "=".repeat(RULE)));
    output.push_str("APP SERVICE ASSESSMENT - EXECUTIVE SUMMARY\n");
    output.push_str(&format!("{}\n\n", "=".repeat(RULE)));
    output.push_str(&format!(
        "Subscription:    {}\n",
        meta.subscription.as_deref().unwrap_or("N/A")
    ));
    output.push_str(&format!(
        "Subscription ID: {}\n",
        meta.subscription_id.as_deref().unwrap_or("N/A")
    ));
    output.push_str(&format!(
        "Assessment Date: {}\n",
        meta.assessment_date.as_deref().unwrap_or("N/A")
    ));
    output.push_str(&format!(
        "Analysis Date:   {}\n\n",
        meta.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if report.findings.is_empty() {
        output.push_str("  No best-practice findings detected.\n\n");
        push_verdict(&mut output, verdict);
        return output;
    }

    output.push_str("FINDINGS BY SEVERITY\n");
    output.push_str(&format!("{}\n", "-".repeat(RULE)));
    for severity in Severity::ALL {
        output.push_str(&format!(
            "  {:<9} {}\n",
            format!("{severity}:"),
            report.findings_by_severity.get(severity)
        ));
    }
    output.push_str(&format!("  {:<9} {}\n\n", "TOTAL:", report.total_findings));

    output.push_str("FINDINGS BY RESOURCE\n");
    output.push_str(&format!("{}\n", "-".repeat(RULE)));
    for summary in report.by_resource() {
        let c = summary.counts;
        output.push_str(&format!(
            "  {:<40} Critical: {}, High: {}, Medium: {}, Low: {} (total {})\n",
            summary.resource_name,
            c.critical,
            c.high,
            c.medium,
            c.low,
            c.total()
        ));
    }
    output.push('\n');

    output.push_str("FINDINGS BY CATEGORY\n");
    output.push_str(&format!("{}\n", "-".repeat(RULE)));
    for category in Category::ALL {
        output.push_str(&format!(
            "  {:<12} {}\n",
            category.to_string(),
            report.findings_by_category.get(category)
        ));
    }
    output.push('\n');

    let critical: Vec<&Finding> = report
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .collect();
    if !critical.is_empty() {
        output.push_str("CRITICAL FINDINGS (Immediate Action Required)\n");
        output.push_str(&format!("{}\n", "=".repeat(RULE)));
        for f in critical {
            output.push_str(&format!("\n[{}] {} ({})\n", f.resource_name, f.title, f.check_id));
            output.push_str(&format!("  Category: {}\n", f.category));
            output.push_str(&format!("  Issue:    {}\n", f.description));
            output.push_str(&format!("  Fix:      {}\n", f.recommendation));
            if !f.reference.is_empty() {
                output.push_str(&format!("  Docs:     {}\n", f.reference));
            }
        }
        output.push('\n');
    }

    push_verdict(&mut output, verdict);
    output
}

fn push_verdict(output: &mut String, verdict: &PolicyVerdict) {
    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "Result: {} (threshold: {}, highest: {})\n",
        status,
        verdict.fail_threshold,
        verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::policy::Policy;
    use crate::rules::{aggregate, ReportMetadata};
    use chrono::{TimeZone, Utc};

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            subscription: Some("Prod".into()),
            subscription_id: None,
            tenant_id: None,
            assessment_date: None,
            analysis_date: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn empty_report_passes() {
        let report = aggregate(vec![], metadata());
        let text = render(&report, &Policy::default().evaluate(&report));
        assert!(text.contains("No best-practice findings detected."));
        assert!(text.contains("Result: PASS"));
        assert!(text.contains("Subscription ID: N/A"));
    }

    #[test]
    fn critical_findings_are_detailed() {
        let finding = Finding {
            resource_name: "web-prod".into(),
            check_id: "APPSVC-001".into(),
            category: Category::Security,
            severity: Severity::Critical,
            title: "Minimum TLS version not set to 1.2 or higher".into(),
            description: "Current TLS version: Not set.".into(),
            recommendation: "az webapp config set --min-tls-version 1.2".into(),
            reference: String::new(),
        };
        let report = aggregate(vec![finding], metadata());
        let text = render(&report, &Policy::default().evaluate(&report));
        assert!(text.contains("CRITICAL FINDINGS"));
        assert!(text.contains("[web-prod] Minimum TLS version"));
        assert!(text.contains("Result: FAIL (threshold: High, highest: Critical)"));
        assert!(!text.contains("Docs:"));
    }
}
