//! Persisted model state.

pub mod snapshot;

pub use snapshot::SnapshotError;
