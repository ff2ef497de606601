use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::null_as_default;

/// Built-in authentication ("Easy Auth") settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub unauthenticated_client_action: Option<String>,
    #[serde(default)]
    pub default_provider: Option<String>,
}

/// Managed identity assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedIdentity {
    #[serde(default, rename = "type")]
    pub identity_type: Option<String>,
    #[serde(default)]
    pub principal_id: Option<String>,
    #[serde(default)]
    pub user_assigned_identities: Option<Value>,
    /// Recorded decision not to use a managed identity for this app.
    #[serde(default)]
    pub opt_out: Option<bool>,
}

impl ManagedIdentity {
    pub fn is_assigned(&self) -> bool {
        match self.identity_type.as_deref() {
            Some(t) => {
                let t = t.to_lowercase();
                t.contains("systemassigned") || t.contains("userassigned")
            }
            None => false,
        }
    }

    pub fn is_opted_out(&self) -> bool {
        self.opt_out == Some(true)
    }
}

/// Access restriction rules for the main site and the SCM (Kudu) site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRestrictions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_security_restrictions: Vec<IpRule>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scm_ip_security_restrictions: Vec<IpRule>,
    #[serde(default)]
    pub scm_ip_security_restrictions_use_main: Option<bool>,
}

impl IpRestrictions {
    /// Main-site rules excluding the platform's default allow-all entry.
    pub fn effective_main_rules(&self) -> impl Iterator<Item = &IpRule> {
        self.ip_security_restrictions
            .iter()
            .filter(|r| !r.is_default_allow_all())
    }

    pub fn effective_scm_rules(&self) -> impl Iterator<Item = &IpRule> {
        self.scm_ip_security_restrictions
            .iter()
            .filter(|r| !r.is_default_allow_all())
    }

    pub fn scm_uses_main(&self) -> bool {
        self.scm_ip_security_restrictions_use_main == Some(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRule {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub vnet_subnet_resource_id: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl IpRule {
    pub fn is_default_allow_all(&self) -> bool {
        let allow = self
            .action
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case("allow"));
        let any = self
            .ip_address
            .as_deref()
            .is_some_and(|ip| ip.eq_ignore_ascii_case("any"));
        allow && any
    }
}

/// Regional virtual network integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnetConnection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vnet_resource_id: Option<String>,
}
