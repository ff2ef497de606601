pub mod aggregate;
pub mod builtin;
pub mod engine;
pub mod finding;
pub mod policy;
pub mod thresholds;

use std::collections::{BTreeSet, HashSet};

use crate::error::{AuditError, Result};
use crate::snapshot::ResourceRecord;

pub use aggregate::{aggregate, CategoryCounts, FindingsReport, ReportMetadata, SeverityCounts};
pub use engine::{evaluate, evaluate_parallel, evaluate_record};
pub use finding::{Category, CheckFault, CheckMetadata, Finding, Severity};
pub use thresholds::{Thresholds, TlsVersion};

/// A check inspects one resource record and produces findings.
///
/// Checks are pure: no I/O, no shared state. Absent configuration is a
/// verdict, not an error; `CheckFault` is reserved for data the check
/// cannot interpret.
pub trait Check: Send + Sync {
    /// Metadata about this check (id, name, category, default severity).
    fn metadata(&self) -> CheckMetadata;

    /// Run the check against a resource record.
    fn run(&self, record: &ResourceRecord) -> std::result::Result<Vec<Finding>, CheckFault>;
}

pub(crate) struct Registered {
    pub(crate) metadata: CheckMetadata,
    pub(crate) check: Box<dyn Check>,
}

/// The ordered, validated set of checks the engine runs.
pub struct Catalogue {
    entries: Vec<Registered>,
}

impl Catalogue {
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::default()
    }

    /// All built-in checks, configured with `thresholds`.
    pub fn builtin(thresholds: &Thresholds) -> Result<Self> {
        let mut builder = Self::builder();
        builtin::register_all(&mut builder, thresholds)?;
        builder.build()
    }

    /// Built-in checks minus `disabled`. Every disabled id must exist.
    pub fn builtin_without(thresholds: &Thresholds, disabled: &HashSet<String>) -> Result<Self> {
        let mut builder = Self::builder();
        builtin::register_all(&mut builder, thresholds)?;
        builder.disable(disabled)?;
        builder.build()
    }

    /// List metadata for all registered checks, in registration order.
    pub fn list_checks(&self) -> Vec<CheckMetadata> {
        self.entries.iter().map(|e| e.metadata.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Registered] {
        &self.entries
    }
}

/// Collects checks and validates the catalogue before any evaluation.
#[derive(Default)]
pub struct CatalogueBuilder {
    entries: Vec<Registered>,
    ids: BTreeSet<String>,
}

impl CatalogueBuilder {
    pub fn register(&mut self, check: Box<dyn Check>) -> Result<&mut Self> {
        let metadata = check.metadata();
        if !self.ids.insert(metadata.id.clone()) {
            return Err(AuditError::DuplicateCheck(metadata.id));
        }
        self.entries.push(Registered { metadata, check });
        Ok(self)
    }

    /// Remove checks by id.
    pub fn disable(&mut self, ids: &HashSet<String>) -> Result<&mut Self> {
        let mut unknown: Vec<&String> = ids.iter().filter(|id| !self.ids.contains(*id)).collect();
        unknown.sort();
        if let Some(id) = unknown.first() {
            return Err(AuditError::UnknownCheck((*id).clone()));
        }
        self.entries.retain(|e| !ids.contains(&e.metadata.id));
        self.ids.retain(|id| !ids.contains(id));
        Ok(self)
    }

    pub fn build(self) -> Result<Catalogue> {
        if self.entries.is_empty() {
            return Err(AuditError::EmptyCatalogue);
        }
        Ok(Catalogue {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl Check for Fixed {
        fn metadata(&self) -> CheckMetadata {
            CheckMetadata {
                id: self.0.into(),
                name: "Fixed".into(),
                description: "test".into(),
                category: Category::DevOps,
                default_severity: Severity::Low,
            }
        }

        fn run(&self, _record: &ResourceRecord) -> std::result::Result<Vec<Finding>, CheckFault> {
            Ok(vec![])
        }
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut builder = Catalogue::builder();
        builder.register(Box::new(Fixed("T-1"))).unwrap();
        let err = builder.register(Box::new(Fixed("T-1"))).err().unwrap();
        assert!(matches!(err, AuditError::DuplicateCheck(id) if id == "T-1"));
    }

    #[test]
    fn empty_catalogue_is_rejected() {
        let err = Catalogue::builder().build().err().unwrap();
        assert!(matches!(err, AuditError::EmptyCatalogue));
        assert!(err.is_catalogue_error());
    }

    #[test]
    fn disabling_every_check_is_an_empty_catalogue() {
        let mut builder = Catalogue::builder();
        builder.register(Box::new(Fixed("T-1"))).unwrap();
        builder.disable(&HashSet::from(["T-1".to_string()])).unwrap();
        assert!(matches!(builder.build(), Err(AuditError::EmptyCatalogue)));
    }

    #[test]
    fn disabling_unknown_id_fails() {
        let mut builder = Catalogue::builder();
        builder.register(Box::new(Fixed("T-1"))).unwrap();
        let err = builder
            .disable(&HashSet::from(["T-9".to_string()]))
            .err()
            .unwrap();
        assert!(matches!(err, AuditError::UnknownCheck(id) if id == "T-9"));
    }

    #[test]
    fn builtin_catalogue_has_unique_ids() {
        let catalogue = Catalogue::builtin(&Thresholds::default()).unwrap();
        let ids: BTreeSet<String> = catalogue.list_checks().into_iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), catalogue.len());
        assert_eq!(catalogue.len(), 22);
    }

    #[test]
    fn builtin_without_preserves_order() {
        let disabled = HashSet::from(["APPSVC-002".to_string()]);
        let catalogue = Catalogue::builtin_without(&Thresholds::default(), &disabled).unwrap();
        let ids: Vec<String> = catalogue.list_checks().into_iter().map(|m| m.id).collect();
        assert_eq!(ids[0], "APPSVC-001");
        assert_eq!(ids[1], "APPSVC-003");
        assert_eq!(ids.len(), 21);
    }
}
