//! Utility functions for the memsentry security reviewer.

pub mod file_discovery;

pub use file_discovery::{DiscoveryError, FileDiscovery, TargetKind};
