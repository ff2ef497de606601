use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::{PlanTier, ResourceRecord, SiteMember};

/// APPSVC-018: Always On
pub struct AlwaysOnCheck;

impl Check for AlwaysOnCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-018".into(),
            name: "Always On".into(),
            description: "Always On disabled on a production tier".into(),
            category: Category::Performance,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let tier = record.plan_tier()?;
        if tier.is_dev_tier() || tier == PlanTier::Dynamic {
            return Ok(vec![]);
        }
        if record.site_config(&[SiteMember::AlwaysOn])?.always_on == Some(true) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "Always On is not enabled")
            .description("The app is unloaded after idle periods and pays a cold start on the next request.")
            .recommendation("Enable Always On: az webapp config set --always-on true")
            .reference(format!("{DOCS}/configure-common#configure-general-settings"))])
    }
}

/// APPSVC-019: HTTP/2
pub struct Http2Check;

impl Check for Http2Check {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-019".into(),
            name: "HTTP/2".into(),
            description: "HTTP/2 is not enabled".into(),
            category: Category::Performance,
            default_severity: Severity::Low,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        if record.site_config(&[SiteMember::Http20Enabled])?.http20_enabled == Some(true) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Low, "HTTP/2 not enabled")
            .description("HTTP/2 multiplexes requests and compresses headers.")
            .recommendation("Enable HTTP/2: az webapp config set --http20-enabled true")
            .reference(format!("{DOCS}/configure-common#configure-general-settings"))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::test_support::record;
    use serde_json::json;

    #[test]
    fn always_on_not_required_on_free() {
        let rec = record(json!({"name": "a", "hostingPlan": {"sku": {"tier": "Free"}}}));
        assert!(AlwaysOnCheck.run(&rec).unwrap().is_empty());
    }

    #[test]
    fn always_on_required_on_basic() {
        let rec = record(json!({"name": "a", "hostingPlan": {"sku": {"tier": "Basic"}}}));
        let findings = AlwaysOnCheck.run(&rec).unwrap();
        assert_eq!(findings[0].category, Category::Performance);
    }

    #[test]
    fn http2_flag() {
        assert_eq!(Http2Check.run(&record(json!({"name": "a"}))).unwrap().len(), 1);
        let on = record(json!({"name": "a", "tlsConfig": {"http20Enabled": true}}));
        assert!(Http2Check.run(&on).unwrap().is_empty());
    }
}
