use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::{ResourceRecord, SiteMember};

/// App settings that wire up Application Insights.
const TELEMETRY_SETTINGS: &[&str] = &[
    "APPLICATIONINSIGHTS_CONNECTION_STRING",
    "APPINSIGHTS_INSTRUMENTATIONKEY",
];

/// APPSVC-020: Diagnostic Logs
pub struct DiagnosticLogsCheck;

impl Check for DiagnosticLogsCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-020".into(),
            name: "Diagnostic Logs".into(),
            description: "No application or HTTP log streaming".into(),
            category: Category::Monitoring,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let logging = record
            .diagnostic_logs()?
            .is_some_and(|logs| logs.application_logging_enabled() || logs.http_logging_enabled());
        if logging {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "Diagnostic logging not configured")
            .description("Neither application nor HTTP logging is enabled, which leaves nothing to troubleshoot with.")
            .recommendation("Enable diagnostic logs: az webapp log config --application-logging filesystem --level information --web-server-logging filesystem")
            .reference(format!("{DOCS}/troubleshoot-diagnostic-logs"))])
    }
}

/// APPSVC-021: Telemetry
///
/// Looks for Application Insights settings in the app settings. Settings
/// that were not collected count as missing.
pub struct TelemetryCheck;

impl Check for TelemetryCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-021".into(),
            name: "Telemetry".into(),
            description: "No Application Insights integration detected".into(),
            category: Category::Monitoring,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let site = record.site_config(&[SiteMember::AppSettings])?;
        if TELEMETRY_SETTINGS.iter().any(|name| site.has_app_setting(name)) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "Application Insights not configured")
            .description("No telemetry integration was detected; requests, dependencies and exceptions are not traced.")
            .recommendation("Connect Application Insights: az monitor app-insights component connect-webapp --app <insights> --web-app <app> --resource-group <rg>")
            .reference("https://learn.microsoft.com/en-us/azure/azure-monitor/app/azure-web-apps")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::test_support::record;
    use serde_json::json;

    #[test]
    fn missing_logs_flagged() {
        let findings = DiagnosticLogsCheck.run(&record(json!({"name": "a"}))).unwrap();
        assert_eq!(findings[0].category, Category::Monitoring);
    }

    #[test]
    fn off_levels_count_as_disabled() {
        let rec = record(json!({
            "name": "a",
            "diagnosticLogs": {
                "applicationLogsConfiguration": {"fileSystem": {"level": "Off"}},
                "httpLogsConfiguration": {"fileSystem": {"enabled": false}}
            }
        }));
        assert_eq!(DiagnosticLogsCheck.run(&rec).unwrap().len(), 1);
    }

    #[test]
    fn any_sink_enables_logging() {
        let app = record(json!({"name": "a", "diagnosticLogs": {"applicationLogs": {"azureBlobStorage": {"level": "Warning"}}}}));
        assert!(DiagnosticLogsCheck.run(&app).unwrap().is_empty());
        let http = record(json!({"name": "a", "diagnosticLogs": {"httpLogs": {"fileSystem": {"enabled": true}}}}));
        assert!(DiagnosticLogsCheck.run(&http).unwrap().is_empty());
    }

    #[test]
    fn telemetry_detected_from_app_settings() {
        let rec = record(json!({
            "name": "a",
            "config": {"appSettings": [{"name": "APPLICATIONINSIGHTS_CONNECTION_STRING", "value": null}]}
        }));
        assert!(TelemetryCheck.run(&rec).unwrap().is_empty());
        assert_eq!(TelemetryCheck.run(&record(json!({"name": "a"}))).unwrap().len(), 1);
    }
}
