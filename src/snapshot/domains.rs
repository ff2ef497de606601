use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Suffix of the platform-provided hostname; bindings under it are covered
/// by the platform certificate.
pub const PLATFORM_HOST_SUFFIX: &str = ".azurewebsites.net";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDomain {
    #[serde(default)]
    pub host_name: Option<String>,
    /// Binding resource name; older collector output carries only this.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ssl_state: Option<String>,
    #[serde(default)]
    pub thumbprint: Option<String>,
}

impl CustomDomain {
    /// `hostName`, falling back to `name`.
    pub fn host(&self) -> Option<&str> {
        [&self.host_name, &self.name]
            .into_iter()
            .flatten()
            .map(|h| h.trim())
            .find(|h| !h.is_empty())
    }

    pub fn is_platform_host(&self) -> bool {
        self.host()
            .is_some_and(|h| h.to_lowercase().ends_with(PLATFORM_HOST_SUFFIX))
    }

    /// SNI or IP-based binding recorded on the hostname itself.
    pub fn has_binding(&self) -> bool {
        self.ssl_state.as_deref().is_some_and(|s| {
            let s = s.to_lowercase();
            s == "snienabled" || s == "ipbasedenabled"
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslCertificate {
    #[serde(default)]
    pub thumbprint: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host_names: Vec<String>,
}

impl SslCertificate {
    /// Whether this certificate covers `host`, honouring single-label wildcards.
    pub fn covers(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.host_names
            .iter()
            .chain(self.subject_name.iter())
            .any(|name| host_matches(&name.to_lowercase(), &host))
    }
}

fn host_matches(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(suffix) => host
            .split_once('.')
            .is_some_and(|(label, rest)| !label.is_empty() && rest == suffix),
        None => pattern == host,
    }
}
