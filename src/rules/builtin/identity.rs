use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::ResourceRecord;

/// APPSVC-005: Managed Identity
///
/// Flags apps without a system- or user-assigned identity unless the
/// identity document records an explicit opt-out.
pub struct ManagedIdentityCheck;

impl Check for ManagedIdentityCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-005".into(),
            name: "Managed Identity".into(),
            description: "No managed identity assigned".into(),
            category: Category::Security,
            default_severity: Severity::Medium,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        if let Some(identity) = record.identity()? {
            if identity.is_assigned() || identity.is_opted_out() {
                return Ok(vec![]);
            }
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Medium, "Managed Identity not enabled")
            .description(
                "Without a managed identity, credentials for downstream services end up in code or configuration.",
            )
            .recommendation("Enable a system-assigned managed identity: az webapp identity assign")
            .reference(format!("{DOCS}/overview-managed-identity"))])
    }
}

/// APPSVC-006: App Service Authentication
pub struct AppServiceAuthCheck;

impl Check for AppServiceAuthCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-006".into(),
            name: "App Service Authentication".into(),
            description: "Built-in authentication is not enabled".into(),
            category: Category::Security,
            default_severity: Severity::Low,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let enabled = record
            .auth_config()?
            .is_some_and(|auth| auth.enabled == Some(true));
        if enabled {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::Low, "App Service Authentication not enabled")
            .description("Built-in authentication (Easy Auth) is not configured. Confirm the app authenticates callers itself.")
            .recommendation(
                "If the app requires authentication, enable it: az webapp auth update --enabled true",
            )
            .reference(format!("{DOCS}/overview-authentication-authorization"))])
    }
}
