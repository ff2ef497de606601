use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tunable limits used by individual checks. Passed to the catalogue at
/// registration; nothing reads them from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lowest acceptable negotiated TLS version.
    #[serde(default = "default_min_tls_version")]
    pub min_tls_version: TlsVersion,
    /// Instance count below which a production plan has no redundancy.
    #[serde(default = "default_min_instance_count")]
    pub min_instance_count: u32,
}

fn default_min_tls_version() -> TlsVersion {
    TlsVersion::new(1, 2)
}

fn default_min_instance_count() -> u32 {
    2
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_tls_version: default_min_tls_version(),
            min_instance_count: default_min_instance_count(),
        }
    }
}

/// A `major.minor` TLS protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TlsVersion {
    pub major: u8,
    pub minor: u8,
}

impl TlsVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl FromStr for TlsVersion {
    type Err = String;

    /// Accepts `1.2`, `TLS1.2`, `TLS1_2` and `tls 1.2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_lowercase();
        let digits = lowered
            .strip_prefix("tls")
            .unwrap_or(lowered.as_str())
            .trim()
            .replace('_', ".");

        let (major, minor) = digits.split_once('.').unwrap_or((digits.as_str(), "0"));
        match (major.parse::<u8>(), minor.parse::<u8>()) {
            (Ok(major), Ok(minor)) => Ok(Self { major, minor }),
            _ => Err(format!("unrecognised TLS version '{trimmed}'")),
        }
    }
}

impl std::fmt::Display for TlsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Serialize for TlsVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TlsVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
