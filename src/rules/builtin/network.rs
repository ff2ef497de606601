use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::{ResourceRecord, SiteMember};

/// APPSVC-007: Network Exposure
///
/// Main site: flagged when no access restriction beyond the default
/// allow-all exists and the app has no private network integration.
/// SCM site: flagged when it has no restrictions of its own and does not
/// inherit the main site's.
pub struct NetworkExposureCheck;

impl Check for NetworkExposureCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-007".into(),
            name: "Network Exposure".into(),
            description: "Site or SCM endpoint reachable from any address".into(),
            category: Category::Security,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let restrictions = record.ip_restrictions()?.unwrap_or_default();
        let integrated = !record.network_integration()?.is_empty();
        let meta = self.metadata();
        let mut findings = Vec::new();

        if restrictions.effective_main_rules().next().is_none() && !integrated {
            findings.push(
                Finding::new(&meta, Severity::Medium, "No IP restrictions configured")
                    .description(
                        "App is reachable from any IP address on the internet and has no private network integration.",
                    )
                    .recommendation(
                        "Restrict inbound access: az webapp config access-restriction add --rule-name allow-corp --action Allow --ip-address 203.0.113.0/24 --priority 100",
                    )
                    .reference(format!("{DOCS}/app-service-ip-restrictions")),
            );
        }

        if restrictions.effective_scm_rules().next().is_none() && !restrictions.scm_uses_main() {
            findings.push(
                Finding::new(&meta, Severity::Medium, "No SCM IP restrictions configured")
                    .description("The Kudu/SCM deployment site is reachable from any IP address.")
                    .recommendation(
                        "Restrict the SCM site or reuse the main site rules: az webapp config access-restriction set --use-same-restrictions-for-scm-site true",
                    )
                    .reference(format!("{DOCS}/app-service-ip-restrictions")),
            );
        }

        Ok(findings)
    }
}

/// APPSVC-008: VNet Integration
pub struct VnetIntegrationCheck;

impl Check for VnetIntegrationCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-008".into(),
            name: "VNet Integration".into(),
            description: "App is not integrated with a virtual network".into(),
            category: Category::Security,
            default_severity: Severity::Low,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        if !record.network_integration()?.is_empty() {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Low, "VNet integration not configured")
            .description("App is not integrated with a virtual network, limiting network isolation options.")
            .recommendation(
                "Integrate with a VNet for private access to backend resources: az webapp vnet-integration add",
            )
            .reference(format!("{DOCS}/overview-vnet-integration"))])
    }
}

/// APPSVC-009: CORS Wildcard
///
/// Only runs when CORS is configured; no CORS policy is compliant.
pub struct CorsWildcardCheck;

impl Check for CorsWildcardCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-009".into(),
            name: "CORS Wildcard".into(),
            description: "CORS allows every origin".into(),
            category: Category::Security,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let site = record.site_config(&[SiteMember::Cors])?;
        let Some(cors) = site.cors else {
            return Ok(vec![]);
        };
        if !cors.allows_any_origin() {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "CORS configured with wildcard (*)")
            .description("CORS allows all origins, exposing the API to calls from any website.")
            .recommendation(
                "Restrict CORS to known origins: az webapp cors remove --allowed-origins '*' && az webapp cors add --allowed-origins https://example.com",
            )
            .reference(format!("{DOCS}/app-service-web-tutorial-rest-api"))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::test_support::record;
    use serde_json::json;

    #[test]
    fn open_site_yields_main_and_scm_findings() {
        let findings = NetworkExposureCheck.run(&record(json!({"name": "a"}))).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].title, "No IP restrictions configured");
        assert_eq!(findings[1].title, "No SCM IP restrictions configured");
    }

    #[test]
    fn null_rule_lists_are_open_not_unreadable() {
        let rec = record(json!({
            "name": "a",
            "ipRestrictions": {"ipSecurityRestrictions": null, "scmIpSecurityRestrictions": null}
        }));
        assert_eq!(NetworkExposureCheck.run(&rec).unwrap().len(), 2);
    }

    #[test]
    fn null_allowed_origins_is_compliant() {
        let rec = record(json!({"name": "a", "runtimeConfig": {"cors": {"allowedOrigins": null}}}));
        assert!(CorsWildcardCheck.run(&rec).unwrap().is_empty());
    }

    #[test]
    fn default_allow_rule_does_not_count() {
        let rec = record(json!({
            "name": "a",
            "ipRestrictions": {
                "ipSecurityRestrictions": [{"action": "Allow", "ipAddress": "Any", "name": "Allow all"}],
                "scmIpSecurityRestrictionsUseMain": true
            }
        }));
        let findings = NetworkExposureCheck.run(&rec).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "No IP restrictions configured");
    }

    #[test]
    fn vnet_integration_suppresses_main_site_finding() {
        let rec = record(json!({
            "name": "a",
            "networkIntegration": [{"name": "vnet", "vnetResourceId": "/subs/x/vnet"}],
            "ipRestrictions": {"scmIpSecurityRestrictions": [{"action": "Deny", "ipAddress": "0.0.0.0/0"}]}
        }));
        assert!(NetworkExposureCheck.run(&rec).unwrap().is_empty());
        assert!(VnetIntegrationCheck.run(&rec).unwrap().is_empty());
    }

    #[test]
    fn missing_vnet_is_low() {
        let findings = VnetIntegrationCheck.run(&record(json!({"name": "a"}))).unwrap();
        assert_eq!(findings[0].severity, Severity::Low);
    }

    #[test]
    fn cors_absent_is_compliant() {
        assert!(CorsWildcardCheck.run(&record(json!({"name": "a"}))).unwrap().is_empty());
    }

    #[test]
    fn cors_wildcard_is_flagged() {
        let rec = record(json!({"name": "a", "runtimeConfig": {"cors": {"allowedOrigins": ["https://ok.example", "*"]}}}));
        assert_eq!(CorsWildcardCheck.run(&rec).unwrap().len(), 1);
    }
}
