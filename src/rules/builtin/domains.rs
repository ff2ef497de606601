use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::{CustomDomain, ResourceRecord};

/// APPSVC-010: Custom Domain SSL
///
/// One finding per custom hostname that has neither an SSL binding nor an
/// uploaded certificate covering it. Platform hostnames are skipped.
pub struct CustomDomainSslCheck;

impl Check for CustomDomainSslCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-010".into(),
            name: "Custom Domain SSL".into(),
            description: "Custom hostname served without an SSL binding".into(),
            category: Category::Security,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let domains = record.custom_domains()?;
        let certificates = record.ssl_certificates()?;
        let meta = self.metadata();

        let findings = domains
            .iter()
            .filter(|d| !d.is_platform_host() && !d.has_binding())
            .filter_map(CustomDomain::host)
            .filter(|host| !certificates.iter().any(|c| c.covers(host)))
            .map(|host| {
                Finding::new(&meta, Severity::Medium, "Custom domain without SSL certificate")
                    .description(format!(
                        "Custom domain '{host}' has no SSL binding; browsers will reject HTTPS connections to it."
                    ))
                    .recommendation(format!(
                        "Bind a certificate: az webapp config ssl bind --ssl-type SNI --certificate-thumbprint <thumbprint> --hostname {host}"
                    ))
                    .reference(format!("{DOCS}/configure-ssl-certificate"))
            })
            .collect();

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::test_support::record;
    use serde_json::json;

    #[test]
    fn one_finding_per_unbound_domain() {
        let rec = record(json!({
            "name": "a",
            "customDomains": [
                {"hostName": "a.azurewebsites.net"},
                {"hostName": "www.contoso.com", "sslState": "Disabled"},
                {"hostName": "api.contoso.com"},
                {"hostName": "shop.contoso.com", "sslState": "SniEnabled"}
            ]
        }));
        let findings = CustomDomainSslCheck.run(&rec).unwrap();
        assert_eq!(findings.len(), 2);
        assert!(findings[0].description.contains("www.contoso.com"));
        assert!(findings[1].description.contains("api.contoso.com"));
    }

    #[test]
    fn binding_with_name_and_host_name_is_flagged() {
        let rec = record(json!({
            "name": "app1",
            "customDomains": [
                {"name": "www.contoso.com", "hostName": "www.contoso.com", "sslState": "Disabled"},
                {"name": "legacy.contoso.com"}
            ]
        }));
        let findings = CustomDomainSslCheck.run(&rec).unwrap();
        assert_eq!(findings.len(), 2);
        assert!(findings[0].description.contains("www.contoso.com"));
        assert!(findings[1].description.contains("legacy.contoso.com"));
    }

    #[test]
    fn wildcard_certificate_covers_domains() {
        let rec = record(json!({
            "name": "a",
            "customDomains": [{"name": "www.contoso.com"}],
            "sslCertificates": [{"hostNames": ["*.contoso.com"], "thumbprint": "AB"}]
        }));
        assert!(CustomDomainSslCheck.run(&rec).unwrap().is_empty());
    }

    #[test]
    fn no_custom_domains_is_compliant() {
        assert!(CustomDomainSslCheck.run(&record(json!({"name": "a"}))).unwrap().is_empty());
    }
}
