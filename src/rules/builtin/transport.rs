use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity, TlsVersion};
use crate::snapshot::{ResourceRecord, SiteMember};

/// APPSVC-001: Minimum TLS Version
///
/// Flags apps whose minimum TLS version is unset or below the configured floor.
pub struct MinTlsVersionCheck {
    pub floor: TlsVersion,
}

impl Check for MinTlsVersionCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-001".into(),
            name: "Minimum TLS Version".into(),
            description: format!("Minimum TLS version is unset or below {}", self.floor),
            category: Category::Security,
            default_severity: Severity::Critical,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let site = record.site_config(&[SiteMember::MinTlsVersion])?;

        let current = match site.min_tls_version.as_deref().filter(|v| !v.trim().is_empty()) {
            None => None,
            Some(raw) => Some(raw.parse::<TlsVersion>().map_err(CheckFault::Unreadable)?),
        };
        if current.is_some_and(|v| v >= self.floor) {
            return Ok(vec![]);
        }

        let shown = current
            .map(|v| v.to_string())
            .unwrap_or_else(|| "Not set".into());
        let meta = self.metadata();
        Ok(vec![Finding::new(
            &meta,
            Severity::Critical,
            format!("Minimum TLS version not set to {} or higher", self.floor),
        )
        .description(format!(
            "Current TLS version: {shown}. TLS versions below {} are deprecated and insecure.",
            self.floor
        ))
        .recommendation(format!(
            "Set the minimum TLS version: az webapp config set --min-tls-version {}",
            self.floor
        ))
        .reference(format!("{DOCS}/configure-ssl-bindings#enforce-tls-versions"))])
    }
}

/// APPSVC-002: HTTPS Only
pub struct HttpsOnlyCheck;

impl Check for HttpsOnlyCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-002".into(),
            name: "HTTPS Only".into(),
            description: "Plain HTTP requests are not redirected to HTTPS".into(),
            category: Category::Security,
            default_severity: Severity::High,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        if record.site_config(&[SiteMember::HttpsOnly])?.https_only == Some(true) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::High, "HTTPS Only not enforced")
            .description(
                "App is reachable over plain HTTP, exposing traffic to man-in-the-middle attacks.",
            )
            .recommendation("Enable HTTPS Only: az webapp update --https-only true")
            .reference(format!("{DOCS}/configure-ssl-bindings#enforce-https"))])
    }
}

/// APPSVC-003: FTPS State
///
/// Plain FTP must not be accepted. An unreported FTPS state is treated as
/// allowing plain FTP.
pub struct FtpsStateCheck;

impl Check for FtpsStateCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-003".into(),
            name: "FTPS State".into(),
            description: "Plain FTP deployments are allowed".into(),
            category: Category::Security,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let site = record.site_config(&[SiteMember::FtpsState])?;
        let state = site.ftps_state.as_deref().unwrap_or("");
        let restricted = state.eq_ignore_ascii_case("FtpsOnly") || state.eq_ignore_ascii_case("Disabled");
        if restricted {
            return Ok(vec![]);
        }

        let shown = if state.is_empty() { "Not set" } else { state };
        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "FTP is allowed (not secure)")
            .description(format!(
                "FTPS state: {shown}. Plain FTP sends credentials in clear text; only FTPS should be allowed."
            ))
            .recommendation("Set FTPS to FtpsOnly or Disabled: az webapp config set --ftps-state FtpsOnly")
            .reference(format!("{DOCS}/deploy-ftp"))])
    }
}

/// APPSVC-004: Client Certificate Mode
pub struct ClientCertModeCheck;

impl Check for ClientCertModeCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-004".into(),
            name: "Client Certificate Mode".into(),
            description: "Client certificates enabled but optional".into(),
            category: Category::Security,
            default_severity: Severity::Low,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let site = record.site_config(&[SiteMember::ClientCertEnabled, SiteMember::ClientCertMode])?;
        let optional = site
            .client_cert_mode
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("Optional"));
        if site.client_cert_enabled != Some(true) || !optional {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Low, "Client certificates set to Optional")
            .description("Client certificates are enabled but clients may connect without one.")
            .recommendation(
                "If mutual TLS is required, enforce it: az webapp update --client-cert-mode Required",
            )
            .reference(format!("{DOCS}/app-service-web-configure-tls-mutual-auth"))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::test_support::record;
    use serde_json::json;

    fn tls() -> MinTlsVersionCheck {
        MinTlsVersionCheck {
            floor: TlsVersion::new(1, 2),
        }
    }

    #[test]
    fn unset_tls_is_critical() {
        let findings = tls().run(&record(json!({"name": "app1"}))).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings[0].description.contains("Not set"));
    }

    #[test]
    fn old_tls_is_flagged() {
        let rec = record(json!({"name": "app1", "tlsConfig": {"minTlsVersion": "1.0"}}));
        assert_eq!(tls().run(&rec).unwrap().len(), 1);
    }

    #[test]
    fn compliant_tls_and_https_pass() {
        let rec = record(json!({"name": "app1", "config": {"minTlsVersion": "1.2", "httpsOnly": true}}));
        assert!(tls().run(&rec).unwrap().is_empty());
        assert!(HttpsOnlyCheck.run(&rec).unwrap().is_empty());
    }

    #[test]
    fn floor_is_configurable() {
        let strict = MinTlsVersionCheck {
            floor: TlsVersion::new(1, 3),
        };
        let rec = record(json!({"name": "app1", "config": {"minTlsVersion": "1.2"}}));
        let findings = strict.run(&rec).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].title.contains("1.3"));
    }

    #[test]
    fn unreadable_tls_version_faults() {
        let rec = record(json!({"name": "app1", "config": {"minTlsVersion": "latest"}}));
        assert!(matches!(tls().run(&rec), Err(CheckFault::Unreadable(_))));
    }

    #[test]
    fn https_missing_is_flagged() {
        let rec = record(json!({"name": "app1", "config": {}}));
        let findings = HttpsOnlyCheck.run(&rec).unwrap();
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn ftps_all_allowed_is_flagged() {
        let rec = record(json!({"name": "app1", "runtimeConfig": {"ftpsState": "AllAllowed"}}));
        assert_eq!(FtpsStateCheck.run(&rec).unwrap().len(), 1);
        let ok = record(json!({"name": "app1", "runtimeConfig": {"ftpsState": "FtpsOnly"}}));
        assert!(FtpsStateCheck.run(&ok).unwrap().is_empty());
    }

    #[test]
    fn unset_ftps_state_is_flagged() {
        let findings = FtpsStateCheck.run(&record(json!({"name": "app1", "config": {}}))).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].description.contains("Not set"));
        let disabled = record(json!({"name": "app1", "config": {"ftpsState": "Disabled"}}));
        assert!(FtpsStateCheck.run(&disabled).unwrap().is_empty());
    }

    #[test]
    fn null_or_bad_cors_does_not_hide_old_tls() {
        for cors in [json!({"allowedOrigins": null}), json!("garbage")] {
            let rec = record(json!({
                "name": "app1",
                "runtimeConfig": {"minTlsVersion": "1.0", "cors": cors}
            }));
            let findings = tls().run(&rec).unwrap();
            assert_eq!(findings.len(), 1);
            assert_eq!(findings[0].severity, Severity::Critical);
            assert!(findings[0].description.contains("1.0"));
        }
    }

    #[test]
    fn optional_client_cert_only_when_enabled() {
        let on = record(json!({"name": "a", "config": {"clientCertEnabled": true, "clientCertMode": "Optional"}}));
        assert_eq!(ClientCertModeCheck.run(&on).unwrap().len(), 1);
        let off = record(json!({"name": "a", "config": {"clientCertEnabled": false, "clientCertMode": "Optional"}}));
        assert!(ClientCertModeCheck.run(&off).unwrap().is_empty());
    }
}
