//! Configuration snapshot: the collected, read-only record set the engine audits.
//!
//! The collector writes one JSON document per run. Every resource record keeps
//! its sub-documents raw and decodes them on demand, so a sub-document with an
//! unexpected shape only affects the checks that read it.

pub mod access;
pub mod deployment;
pub mod diagnostics;
pub mod domains;
pub mod hosting_plan;
pub mod site_config;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use access::{AuthConfig, IpRestrictions, IpRule, ManagedIdentity, VnetConnection};
pub use deployment::{BackupConfig, DeploymentSlot};
pub use diagnostics::DiagnosticLogs;
pub use domains::{CustomDomain, SslCertificate};
pub use hosting_plan::{HostingPlan, PlanTier, Sku};
pub use site_config::{AppSetting, Cors, SiteConfig, SiteMember};

/// Complete snapshot for one assessment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// When the collector ran (opaque string, passed through to the report).
    #[serde(default)]
    pub assessment_date: Option<String>,
    /// Each entry is decoded on its own; see [`ResourceRecord`]'s `From<Value>`.
    #[serde(default, alias = "appServices", deserialize_with = "null_as_default")]
    pub resources: Vec<ResourceRecord>,
}

impl Snapshot {
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

/// One audited application instance.
///
/// Built from any JSON value and never fails to deserialize. An entry that
/// is not an object keeps the reason in `unreadable` and is reported as a
/// single diagnostic by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct ResourceRecord {
    pub name: Option<String>,
    pub resource_group: Option<String>,
    pub config: Document,
    pub hosting_plan: Document,
    pub runtime_config: Document,
    pub tls_config: Document,
    pub auth_config: Document,
    pub diagnostic_logs: Document,
    pub custom_domains: Document,
    pub ssl_certificates: Document,
    pub deployment_slots: Document,
    pub backup_config: Document,
    pub identity: Document,
    pub network_integration: Document,
    pub ip_restrictions: Document,
    #[serde(skip)]
    pub unreadable: Option<String>,
}

impl From<Value> for ResourceRecord {
    fn from(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Self {
                    unreadable: Some(format!("expected an object, found {}", json_kind(&other))),
                    ..Self::default()
                }
            }
        };

        let name = text_member(map.remove("name"));
        let resource_group = text_member(map.remove("resourceGroup"));
        // First non-empty spelling wins; collector aliases never collide.
        let mut doc = |keys: &[&str]| -> Document {
            keys.iter()
                .filter_map(|key| map.remove(*key))
                .find(|value| !is_absent_value(value))
                .map(Document)
                .unwrap_or_default()
        };

        Self {
            name,
            resource_group,
            config: doc(&["config"]),
            hosting_plan: doc(&["hostingPlan", "appServicePlan"]),
            runtime_config: doc(&["runtimeConfig"]),
            tls_config: doc(&["tlsConfig"]),
            auth_config: doc(&["authConfig"]),
            diagnostic_logs: doc(&["diagnosticLogs"]),
            custom_domains: doc(&["customDomains"]),
            ssl_certificates: doc(&["sslCertificates"]),
            deployment_slots: doc(&["deploymentSlots"]),
            backup_config: doc(&["backupConfig"]),
            identity: doc(&["identity"]),
            network_integration: doc(&["networkIntegration", "vnetIntegration"]),
            ip_restrictions: doc(&["ipRestrictions"]),
            unreadable: None,
        }
    }
}

/// Non-blank string members only; anything else reads as unset.
fn text_member(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

impl ResourceRecord {
    /// Name used to attribute findings. Records without a name report as `Unknown`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// The `reads` members of the site configuration, merged from `config`,
    /// `runtimeConfig` and `tlsConfig` (first present value wins, except
    /// risk flags, which are set if any section sets them).
    ///
    /// Only the requested members are decoded, so a bad member elsewhere in
    /// the configuration does not fail the caller.
    pub fn site_config(&self, reads: &[SiteMember]) -> Result<SiteConfig, ShapeError> {
        SiteConfig::merge(
            &[
                (Section::Config, &self.config),
                (Section::RuntimeConfig, &self.runtime_config),
                (Section::TlsConfig, &self.tls_config),
            ],
            reads,
        )
    }

    pub fn hosting_plan(&self) -> Result<Option<HostingPlan>, ShapeError> {
        self.hosting_plan.decode(Section::HostingPlan)
    }

    /// Tier of the hosting plan; `Unknown` when the plan was not collected.
    pub fn plan_tier(&self) -> Result<PlanTier, ShapeError> {
        Ok(self
            .hosting_plan()?
            .map(|plan| plan.tier())
            .unwrap_or(PlanTier::Unknown))
    }

    pub fn auth_config(&self) -> Result<Option<AuthConfig>, ShapeError> {
        self.auth_config.decode(Section::AuthConfig)
    }

    pub fn diagnostic_logs(&self) -> Result<Option<DiagnosticLogs>, ShapeError> {
        self.diagnostic_logs.decode(Section::DiagnosticLogs)
    }

    pub fn identity(&self) -> Result<Option<ManagedIdentity>, ShapeError> {
        self.identity.decode(Section::Identity)
    }

    pub fn ip_restrictions(&self) -> Result<Option<IpRestrictions>, ShapeError> {
        self.ip_restrictions.decode(Section::IpRestrictions)
    }

    pub fn custom_domains(&self) -> Result<Vec<CustomDomain>, ShapeError> {
        self.custom_domains.decode_list(Section::CustomDomains)
    }

    pub fn ssl_certificates(&self) -> Result<Vec<SslCertificate>, ShapeError> {
        self.ssl_certificates.decode_list(Section::SslCertificates)
    }

    pub fn deployment_slots(&self) -> Result<Vec<DeploymentSlot>, ShapeError> {
        self.deployment_slots.decode_list(Section::DeploymentSlots)
    }

    pub fn backups(&self) -> Result<Vec<BackupConfig>, ShapeError> {
        self.backup_config.decode_list(Section::BackupConfig)
    }

    pub fn network_integration(&self) -> Result<Vec<VnetConnection>, ShapeError> {
        self.network_integration
            .decode_list(Section::NetworkIntegration)
    }
}

/// Named sub-document of a resource record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Config,
    HostingPlan,
    RuntimeConfig,
    TlsConfig,
    AuthConfig,
    DiagnosticLogs,
    CustomDomains,
    SslCertificates,
    DeploymentSlots,
    BackupConfig,
    Identity,
    NetworkIntegration,
    IpRestrictions,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            Self::Config => "config",
            Self::HostingPlan => "hostingPlan",
            Self::RuntimeConfig => "runtimeConfig",
            Self::TlsConfig => "tlsConfig",
            Self::AuthConfig => "authConfig",
            Self::DiagnosticLogs => "diagnosticLogs",
            Self::CustomDomains => "customDomains",
            Self::SslCertificates => "sslCertificates",
            Self::DeploymentSlots => "deploymentSlots",
            Self::BackupConfig => "backupConfig",
            Self::Identity => "identity",
            Self::NetworkIntegration => "networkIntegration",
            Self::IpRestrictions => "ipRestrictions",
        };
        f.write_str(key)
    }
}

/// A sub-document whose shape does not match what a check expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected shape in '{section}': {message}")]
pub struct ShapeError {
    pub section: Section,
    pub message: String,
}

/// Raw sub-document as written by the collector.
///
/// `null`, `{}`, `[]` and `""` all mean "not configured" (or not collected)
/// and decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn is_absent(&self) -> bool {
        is_absent_value(&self.0)
    }

    /// Decode into a typed view, `None` when absent.
    pub fn decode<T: DeserializeOwned>(&self, section: Section) -> Result<Option<T>, ShapeError> {
        if self.is_absent() {
            return Ok(None);
        }
        T::deserialize(&self.0)
            .map(Some)
            .map_err(|e| ShapeError {
                section,
                message: e.to_string(),
            })
    }

    /// Decode a list sub-document. A single object is a one-element list;
    /// `null` entries are dropped.
    pub fn decode_list<T: DeserializeOwned>(&self, section: Section) -> Result<Vec<T>, ShapeError> {
        if self.is_absent() {
            return Ok(Vec::new());
        }
        let shape_error = |e: serde_json::Error| ShapeError {
            section,
            message: e.to_string(),
        };
        match &self.0 {
            Value::Array(items) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| T::deserialize(item).map_err(shape_error))
                .collect(),
            Value::Object(_) => T::deserialize(&self.0).map(|t| vec![t]).map_err(shape_error),
            other => Err(ShapeError {
                section,
                message: format!("expected a list or object, found {}", json_kind(other)),
            }),
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

pub(crate) fn is_absent_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// `deserialize_with` helper: an explicit `null` reads like a missing member.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
