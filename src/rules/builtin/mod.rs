mod domains;
mod identity;
mod lifecycle;
mod network;
mod observability;
mod performance;
mod redundancy;
mod runtime;
mod transport;

use super::{CatalogueBuilder, Thresholds};
use crate::error::Result;

/// Register every built-in check. Registration order is report order.
pub fn register_all(builder: &mut CatalogueBuilder, thresholds: &Thresholds) -> Result<()> {
    builder
        .register(Box::new(transport::MinTlsVersionCheck {
            floor: thresholds.min_tls_version,
        }))?
        .register(Box::new(transport::HttpsOnlyCheck))?
        .register(Box::new(transport::FtpsStateCheck))?
        .register(Box::new(transport::ClientCertModeCheck))?
        .register(Box::new(identity::ManagedIdentityCheck))?
        .register(Box::new(identity::AppServiceAuthCheck))?
        .register(Box::new(network::NetworkExposureCheck))?
        .register(Box::new(network::VnetIntegrationCheck))?
        .register(Box::new(network::CorsWildcardCheck))?
        .register(Box::new(domains::CustomDomainSslCheck))?
        .register(Box::new(runtime::RemoteDebuggingCheck))?
        .register(Box::new(runtime::RuntimeVersionCheck))?
        .register(Box::new(redundancy::PlanRedundancyCheck {
            min_instances: thresholds.min_instance_count,
        }))?
        .register(Box::new(redundancy::ZoneRedundancyCheck))?
        .register(Box::new(redundancy::HealthCheckCheck))?
        .register(Box::new(lifecycle::AutoHealCheck))?
        .register(Box::new(lifecycle::BackupCheck))?
        .register(Box::new(performance::AlwaysOnCheck))?
        .register(Box::new(performance::Http2Check))?
        .register(Box::new(observability::DiagnosticLogsCheck))?
        .register(Box::new(observability::TelemetryCheck))?
        .register(Box::new(lifecycle::StagingSlotCheck))?;
    Ok(())
}

pub(crate) const DOCS: &str = "https://learn.microsoft.com/en-us/azure/app-service";
