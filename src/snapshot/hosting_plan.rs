use serde::{Deserialize, Serialize};

/// Hosting plan the app runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingPlan {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<Sku>,
    #[serde(default)]
    pub zone_redundant: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl HostingPlan {
    pub fn tier(&self) -> PlanTier {
        self.sku
            .as_ref()
            .and_then(|sku| sku.tier.as_deref())
            .map(PlanTier::from_str_lenient)
            .unwrap_or(PlanTier::Unknown)
    }

    /// Instance count; an unreported capacity counts as a single instance.
    pub fn capacity(&self) -> u32 {
        self.sku.as_ref().and_then(|sku| sku.capacity).unwrap_or(1)
    }
}

/// Pricing tier of a hosting plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanTier {
    Free,
    Shared,
    Basic,
    Standard,
    Premium,
    PremiumV2,
    PremiumV3,
    Isolated,
    IsolatedV2,
    ElasticPremium,
    Dynamic,
    Unknown,
}

impl PlanTier {
    pub fn from_str_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "free" => Self::Free,
            "shared" => Self::Shared,
            "basic" => Self::Basic,
            "standard" => Self::Standard,
            "premium" => Self::Premium,
            "premiumv2" => Self::PremiumV2,
            "premiumv3" => Self::PremiumV3,
            "isolated" => Self::Isolated,
            "isolatedv2" => Self::IsolatedV2,
            "elasticpremium" => Self::ElasticPremium,
            "dynamic" => Self::Dynamic,
            _ => Self::Unknown,
        }
    }

    /// Tiers without an SLA or scale-out.
    pub fn is_dev_tier(self) -> bool {
        matches!(self, Self::Free | Self::Shared)
    }

    pub fn is_production_capable(self) -> bool {
        !self.is_dev_tier()
    }

    pub fn supports_slots(self) -> bool {
        matches!(
            self,
            Self::Standard
                | Self::Premium
                | Self::PremiumV2
                | Self::PremiumV3
                | Self::Isolated
                | Self::IsolatedV2
                | Self::ElasticPremium
        )
    }

    pub fn supports_backup(self) -> bool {
        self.supports_slots()
    }

    pub fn supports_zone_redundancy(self) -> bool {
        matches!(
            self,
            Self::PremiumV2 | Self::PremiumV3 | Self::IsolatedV2 | Self::ElasticPremium
        )
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Shared => write!(f, "Shared"),
            Self::Basic => write!(f, "Basic"),
            Self::Standard => write!(f, "Standard"),
            Self::Premium => write!(f, "Premium"),
            Self::PremiumV2 => write!(f, "PremiumV2"),
            Self::PremiumV3 => write!(f, "PremiumV3"),
            Self::Isolated => write!(f, "Isolated"),
            Self::IsolatedV2 => write!(f, "IsolatedV2"),
            Self::ElasticPremium => write!(f, "ElasticPremium"),
            Self::Dynamic => write!(f, "Dynamic"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parsing_is_case_insensitive() {
        assert_eq!(PlanTier::from_str_lenient("PremiumV3"), PlanTier::PremiumV3);
        assert_eq!(PlanTier::from_str_lenient(" free "), PlanTier::Free);
        assert_eq!(PlanTier::from_str_lenient("Mystery"), PlanTier::Unknown);
    }

    #[test]
    fn capability_matrix() {
        assert!(!PlanTier::Free.is_production_capable());
        assert!(PlanTier::Basic.is_production_capable());
        assert!(!PlanTier::Basic.supports_slots());
        assert!(PlanTier::Standard.supports_backup());
        assert!(!PlanTier::Standard.supports_zone_redundancy());
        assert!(PlanTier::PremiumV3.supports_zone_redundancy());
    }

    #[test]
    fn missing_capacity_counts_as_one() {
        let plan = HostingPlan {
            sku: Some(Sku {
                tier: Some("Standard".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(plan.capacity(), 1);
        assert_eq!(plan.tier(), PlanTier::Standard);
    }
}
