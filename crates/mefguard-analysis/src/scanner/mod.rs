//! Scanner subsystem: parallel discovery of C# sources.

pub mod walker;

pub use walker::{walk_directory, DiscoveredFile, DEFAULT_IGNORES};
