use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{is_absent_value, json_kind, null_as_default, Document, Section, ShapeError};

/// Site configuration. `config`, `runtimeConfig` and `tlsConfig` all decode
/// into this shape; members the collector did not return stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub https_only: Option<bool>,
    #[serde(default)]
    pub min_tls_version: Option<String>,
    #[serde(default)]
    pub ftps_state: Option<String>,
    #[serde(default)]
    pub client_cert_enabled: Option<bool>,
    #[serde(default)]
    pub client_cert_mode: Option<String>,
    #[serde(default)]
    pub always_on: Option<bool>,
    #[serde(default)]
    pub http20_enabled: Option<bool>,
    #[serde(default)]
    pub remote_debugging_enabled: Option<bool>,
    #[serde(default)]
    pub linux_fx_version: Option<String>,
    #[serde(default)]
    pub windows_fx_version: Option<String>,
    #[serde(default)]
    pub health_check_path: Option<String>,
    #[serde(default)]
    pub auto_heal_enabled: Option<bool>,
    #[serde(default)]
    pub cors: Option<Cors>,
    /// `null` entries are dropped.
    #[serde(default, deserialize_with = "settings_list")]
    pub app_settings: Option<Vec<AppSetting>>,
}

/// A member of the site configuration, as named by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteMember {
    HttpsOnly,
    MinTlsVersion,
    FtpsState,
    ClientCertEnabled,
    ClientCertMode,
    AlwaysOn,
    Http20Enabled,
    RemoteDebuggingEnabled,
    LinuxFxVersion,
    WindowsFxVersion,
    HealthCheckPath,
    AutoHealEnabled,
    Cors,
    AppSettings,
}

impl SiteMember {
    pub fn key(self) -> &'static str {
        match self {
            Self::HttpsOnly => "httpsOnly",
            Self::MinTlsVersion => "minTlsVersion",
            Self::FtpsState => "ftpsState",
            Self::ClientCertEnabled => "clientCertEnabled",
            Self::ClientCertMode => "clientCertMode",
            Self::AlwaysOn => "alwaysOn",
            Self::Http20Enabled => "http20Enabled",
            Self::RemoteDebuggingEnabled => "remoteDebuggingEnabled",
            Self::LinuxFxVersion => "linuxFxVersion",
            Self::WindowsFxVersion => "windowsFxVersion",
            Self::HealthCheckPath => "healthCheckPath",
            Self::AutoHealEnabled => "autoHealEnabled",
            Self::Cors => "cors",
            Self::AppSettings => "appSettings",
        }
    }

    /// Flags that count as set when any section sets them.
    fn is_risk_flag(self) -> bool {
        matches!(self, Self::RemoteDebuggingEnabled)
    }
}

impl SiteConfig {
    /// Merge `reads` across `sections`, earlier sections taking precedence.
    ///
    /// Each member is decoded on its own. A section that is not an object
    /// fails only the reads it was consulted for.
    pub(crate) fn merge(
        sections: &[(Section, &Document)],
        reads: &[SiteMember],
    ) -> Result<SiteConfig, ShapeError> {
        let mut merged = SiteConfig::default();
        for &member in reads {
            let key = member.key();
            let mut chosen: Option<(Section, &Value)> = None;

            for &(section, doc) in sections {
                let map = match &doc.0 {
                    Value::Object(map) => map,
                    other if is_absent_value(other) => continue,
                    other => {
                        return Err(ShapeError {
                            section,
                            message: format!("expected an object, found {}", json_kind(other)),
                        })
                    }
                };
                let Some(value) = map.get(key).filter(|v| !is_absent_value(v)) else {
                    continue;
                };
                match chosen {
                    None => chosen = Some((section, value)),
                    Some(_) if member.is_risk_flag() && *value == Value::Bool(true) => {
                        chosen = Some((section, value))
                    }
                    Some(_) => {}
                }
                if !member.is_risk_flag() {
                    break;
                }
            }

            if let Some((section, value)) = chosen {
                let mut single = Map::new();
                single.insert(key.to_string(), value.clone());
                let decoded = SiteConfig::deserialize(Value::Object(single)).map_err(|e| ShapeError {
                    section,
                    message: e.to_string(),
                })?;
                merged = merged.or(decoded);
            }
        }
        Ok(merged)
    }

    /// Fill every unset member from `fallback`.
    pub fn or(self, fallback: SiteConfig) -> SiteConfig {
        SiteConfig {
            https_only: self.https_only.or(fallback.https_only),
            min_tls_version: self.min_tls_version.or(fallback.min_tls_version),
            ftps_state: self.ftps_state.or(fallback.ftps_state),
            client_cert_enabled: self.client_cert_enabled.or(fallback.client_cert_enabled),
            client_cert_mode: self.client_cert_mode.or(fallback.client_cert_mode),
            always_on: self.always_on.or(fallback.always_on),
            http20_enabled: self.http20_enabled.or(fallback.http20_enabled),
            remote_debugging_enabled: self
                .remote_debugging_enabled
                .or(fallback.remote_debugging_enabled),
            linux_fx_version: self.linux_fx_version.or(fallback.linux_fx_version),
            windows_fx_version: self.windows_fx_version.or(fallback.windows_fx_version),
            health_check_path: self.health_check_path.or(fallback.health_check_path),
            auto_heal_enabled: self.auto_heal_enabled.or(fallback.auto_heal_enabled),
            cors: self.cors.or(fallback.cors),
            app_settings: self.app_settings.or(fallback.app_settings),
        }
    }

    /// Runtime stack string, Linux first.
    pub fn fx_version(&self) -> Option<&str> {
        self.linux_fx_version
            .as_deref()
            .filter(|v| !v.is_empty())
            .or_else(|| self.windows_fx_version.as_deref().filter(|v| !v.is_empty()))
    }

    pub fn has_app_setting(&self, name: &str) -> bool {
        self.app_settings
            .iter()
            .flatten()
            .filter_map(|s| s.name.as_deref())
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cors {
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub support_credentials: Option<bool>,
}

impl Cors {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o.trim() == "*")
    }
}

fn settings_list<'de, D>(deserializer: D) -> Result<Option<Vec<AppSetting>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let items: Option<Vec<Option<AppSetting>>> = Option::deserialize(deserializer)?;
    Ok(items.map(|items| items.into_iter().flatten().collect()))
}

/// App setting as listed by the collector. Values are usually redacted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSetting {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub slot_setting: Option<bool>,
}
