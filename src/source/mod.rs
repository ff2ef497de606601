//! Snapshot sources, the seam to the collection step.
//!
//! Collection itself (querying the control plane) happens elsewhere; this
//! crate only reads what the collector wrote.

pub mod json_file;

use crate::error::Result;
use crate::snapshot::Snapshot;

pub use json_file::JsonFileSource;

/// Something that yields a complete configuration snapshot.
pub trait SnapshotSource: Send + Sync {
    /// Short label used in logs and errors.
    fn name(&self) -> String;

    /// Load the snapshot.
    fn load(&self) -> Result<Snapshot>;
}
