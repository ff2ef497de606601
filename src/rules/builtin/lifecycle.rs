use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::{PlanTier, ResourceRecord, SiteMember};

/// APPSVC-016: Auto-Heal
pub struct AutoHealCheck;

impl Check for AutoHealCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-016".into(),
            name: "Auto-Heal".into(),
            description: "Auto-heal rules are not enabled".into(),
            category: Category::Reliability,
            default_severity: Severity::Low,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        if record.site_config(&[SiteMember::AutoHealEnabled])?.auto_heal_enabled == Some(true) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Low, "Auto-heal not configured")
            .description("Auto-heal recycles the worker process on memory, request or status-code triggers.")
            .recommendation("Enable auto-heal with triggers and actions suited to the workload")
            .reference(format!("{DOCS}/overview-diagnostics#auto-healing"))])
    }
}

/// APPSVC-017: Backup
///
/// Applies to tiers with built-in backups. An unreported tier is assumed
/// to support them.
pub struct BackupCheck;

impl Check for BackupCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-017".into(),
            name: "Backup".into(),
            description: "No scheduled backup configured".into(),
            category: Category::Reliability,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let tier = record.plan_tier()?;
        if !(tier.supports_backup() || tier == PlanTier::Unknown) {
            return Ok(vec![]);
        }
        if record.backups()?.iter().any(|b| b.is_active()) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "Backup not configured")
            .description("No backup schedule is configured for the app.")
            .recommendation("Configure scheduled backups for disaster recovery: az webapp config backup update --frequency 1d --retain-one true")
            .reference(format!("{DOCS}/manage-backup"))])
    }
}

/// APPSVC-022: Staging Slot
///
/// Fires on every tier. Tiers without slot support get an upgrade
/// recommendation instead of a slot command.
pub struct StagingSlotCheck;

impl Check for StagingSlotCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-022".into(),
            name: "Staging Slot".into(),
            description: "No deployment slot for staged releases".into(),
            category: Category::DevOps,
            default_severity: Severity::Low,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        if !record.deployment_slots()?.is_empty() {
            return Ok(vec![]);
        }
        let tier = record.plan_tier()?;

        let recommendation = if tier.supports_slots() || tier == PlanTier::Unknown {
            "Create a staging slot and deploy through slot swaps: az webapp deployment slot create --slot staging".to_string()
        } else {
            format!(
                "The {tier} tier has no deployment slots. Move to Standard or above, then create a staging slot: az webapp deployment slot create --slot staging"
            )
        };

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Low, "No deployment slots configured")
            .description("Deployment slots enable zero-downtime releases and instant rollback.")
            .recommendation(recommendation)
            .reference(format!("{DOCS}/deploy-staging-slots"))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::test_support::record;
    use serde_json::json;

    #[test]
    fn auto_heal_flagged_unless_enabled() {
        assert_eq!(AutoHealCheck.run(&record(json!({"name": "a"}))).unwrap().len(), 1);
        let on = record(json!({"name": "a", "runtimeConfig": {"autoHealEnabled": true}}));
        assert!(AutoHealCheck.run(&on).unwrap().is_empty());
    }

    #[test]
    fn backup_skipped_on_basic() {
        let rec = record(json!({"name": "a", "hostingPlan": {"sku": {"tier": "Basic"}}}));
        assert!(BackupCheck.run(&rec).unwrap().is_empty());
    }

    #[test]
    fn backup_required_on_standard() {
        let rec = record(json!({"name": "a", "hostingPlan": {"sku": {"tier": "Standard"}}}));
        assert_eq!(BackupCheck.run(&rec).unwrap().len(), 1);
        let disabled = record(json!({
            "name": "a",
            "hostingPlan": {"sku": {"tier": "Standard"}},
            "backupConfig": {"name": "nightly", "enabled": false}
        }));
        assert_eq!(BackupCheck.run(&disabled).unwrap().len(), 1);
        let enabled = record(json!({
            "name": "a",
            "hostingPlan": {"sku": {"tier": "Standard"}},
            "backupConfig": [{"name": "nightly", "enabled": true}]
        }));
        assert!(BackupCheck.run(&enabled).unwrap().is_empty());
    }

    #[test]
    fn staging_slot_flagged_on_free_with_upgrade_advice() {
        let rec = record(json!({"name": "a", "hostingPlan": {"sku": {"tier": "Free"}}, "deploymentSlots": []}));
        let findings = StagingSlotCheck.run(&rec).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::DevOps);
        assert!(findings[0].recommendation.contains("Move to Standard"));
    }

    #[test]
    fn existing_slot_passes() {
        let rec = record(json!({"name": "a", "deploymentSlots": [{"name": "staging"}]}));
        assert!(StagingSlotCheck.run(&rec).unwrap().is_empty());
    }
}
