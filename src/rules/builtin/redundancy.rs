use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::{PlanTier, ResourceRecord, SiteMember};

/// APPSVC-013: Plan Redundancy
///
/// Free/Shared plans have no SLA and cannot scale out (High). Production
/// plans running fewer instances than the configured minimum have no
/// redundancy (Medium). Consumption plans scale on demand and are skipped.
pub struct PlanRedundancyCheck {
    pub min_instances: u32,
}

impl Check for PlanRedundancyCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-013".into(),
            name: "Plan Redundancy".into(),
            description: "Hosting plan tier or instance count provides no redundancy".into(),
            category: Category::Reliability,
            default_severity: Severity::High,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let plan = record.hosting_plan()?.unwrap_or_default();
        let tier = plan.tier();
        let capacity = plan.capacity();
        let meta = self.metadata();

        if tier.is_dev_tier() {
            return Ok(vec![Finding::new(&meta, Severity::High, "Using Free or Shared tier")
                .description(format!(
                    "The {tier} tier has limited resources, no SLA and none of the production features."
                ))
                .recommendation(
                    "Move to at least the Basic tier for production workloads: az appservice plan update --sku B1",
                )
                .reference(format!("{DOCS}/overview-hosting-plans"))]);
        }

        if tier == PlanTier::Dynamic || capacity >= self.min_instances {
            return Ok(vec![]);
        }

        let title = if capacity <= 1 {
            "Single instance configuration".to_string()
        } else {
            format!("Fewer than {} instances", self.min_instances)
        };
        Ok(vec![Finding::new(&meta, Severity::Medium, title)
            .description(format!(
                "Running on {capacity} instance(s); an instance failure or platform upgrade takes the app down."
            ))
            .recommendation(format!(
                "Scale out to at least {} instances or enable autoscale: az appservice plan update --number-of-workers {}",
                self.min_instances, self.min_instances
            ))
            .reference(format!("{DOCS}/manage-scale-up"))])
    }
}

/// APPSVC-014: Zone Redundancy
pub struct ZoneRedundancyCheck;

impl Check for ZoneRedundancyCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-014".into(),
            name: "Zone Redundancy".into(),
            description: "Zone redundancy disabled on a tier that supports it".into(),
            category: Category::Reliability,
            default_severity: Severity::Low,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let Some(plan) = record.hosting_plan()? else {
            return Ok(vec![]);
        };
        if !plan.tier().supports_zone_redundancy() || plan.zone_redundant == Some(true) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Low, "Zone redundancy not enabled")
            .description(
                "Zone redundancy spreads instances across availability zones to survive a zone outage.",
            )
            .recommendation("Enable zone redundancy on the plan for critical production apps")
            .reference(format!("{DOCS}/how-to-zone-redundancy"))])
    }
}

/// APPSVC-015: Health Check
///
/// Multi-instance production apps need a health check path so unhealthy
/// instances are taken out of rotation.
pub struct HealthCheckCheck;

impl Check for HealthCheckCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-015".into(),
            name: "Health Check".into(),
            description: "Multi-instance app without a health check path".into(),
            category: Category::Reliability,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let plan = record.hosting_plan()?.unwrap_or_default();
        if !plan.tier().is_production_capable() || plan.capacity() <= 1 {
            return Ok(vec![]);
        }
        let site = record.site_config(&[SiteMember::HealthCheckPath])?;
        if site
            .health_check_path
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
        {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "Health check not configured")
            .description("No health check endpoint is configured for a multi-instance deployment.")
            .recommendation("Configure a health check path: az webapp config set --generic-configurations '{\"healthCheckPath\": \"/health\"}'")
            .reference(format!("{DOCS}/monitor-instances-health-check"))])
    }
}
