use once_cell::sync::Lazy;
use regex::Regex;

use super::DOCS;
use crate::rules::{Category, Check, CheckFault, CheckMetadata, Finding, Severity};
use crate::snapshot::{ResourceRecord, SiteMember};

/// APPSVC-011: Remote Debugging
pub struct RemoteDebuggingCheck;

impl Check for RemoteDebuggingCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-011".into(),
            name: "Remote Debugging".into(),
            description: "Remote debugging is enabled".into(),
            category: Category::Security,
            default_severity: Severity::High,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        if record
            .site_config(&[SiteMember::RemoteDebuggingEnabled])?
            .remote_debugging_enabled != Some(true) {
            return Ok(vec![]);
        }

        let meta = self.metadata();
        Ok(vec![Finding::new(&meta, Severity::High, "Remote debugging is enabled")
            .description("Remote debugging opens extra ports and should only be enabled temporarily.")
            .recommendation(
                "Disable remote debugging: az webapp config set --remote-debugging-enabled false",
            )
            .reference(format!("{DOCS}/configure-common#configure-general-settings"))])
    }
}

/// APPSVC-012: Runtime Version
///
/// Flags runtime stacks past end of support. At most one finding per app.
pub struct RuntimeVersionCheck;

static DEPRECATED_RUNTIMES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)^node\|(?:[0-9]|1[0-4])(?:[.\-]|$)").unwrap(),
            "Node.js 14 or older",
        ),
        (
            Regex::new(r"(?i)^dotnetcore\|(?:[12](?:\.|$)|3\.0(?:[^0-9]|$))").unwrap(),
            ".NET Core 3.0 or older",
        ),
        (
            Regex::new(r"(?i)^python\|(?:2(?:\.|$)|3\.[0-7](?:[^0-9]|$))").unwrap(),
            "Python 3.7 or older",
        ),
        (
            Regex::new(r"(?i)^php\|(?:[0-6](?:\.|$)|7\.[0-3](?:[^0-9]|$))").unwrap(),
            "PHP 7.3 or older",
        ),
        (
            Regex::new(r"(?i)^java\|8(?:[.\-]|$)").unwrap(),
            "Java 8",
        ),
    ]
});

impl Check for RuntimeVersionCheck {
    fn metadata(&self) -> CheckMetadata {
        CheckMetadata {
            id: "APPSVC-012".into(),
            name: "Runtime Version".into(),
            description: "Runtime stack is deprecated or out of support".into(),
            category: Category::Security,
            default_severity: Severity::High,
        }
    }

    fn run(&self, record: &ResourceRecord) -> Result<Vec<Finding>, CheckFault> {
        let site = record.site_config(&[SiteMember::LinuxFxVersion, SiteMember::WindowsFxVersion])?;
        let Some(fx) = site.fx_version() else {
            return Ok(vec![]);
        };
        let fx = fx.trim();

        let Some((_, label)) = DEPRECATED_RUNTIMES.iter().find(|(re, _)| re.is_match(fx)) else {
            return Ok(vec![]);
        };

        let meta = self.metadata();
        Ok(vec![Finding::new(
            &meta,
            Severity::High,
            "Using deprecated or outdated runtime version",
        )
        .description(format!(
            "Runtime '{fx}' ({label}) no longer receives security updates."
        ))
        .recommendation(
            "Move to a supported runtime: az webapp config set --linux-fx-version <STACK|VERSION> (or --windows-fx-version)",
        )
        .reference(format!("{DOCS}/overview-patch-os-runtime"))])
    }
}
