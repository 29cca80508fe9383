//! Tool catalog - the static registry of research bots
//!
//! Maps a stable tool id to display metadata and the declared input schema.
//! Read-only after initialization; lookups by unknown id are a defined error.

pub mod builtin;
pub mod descriptor;
pub mod registry;

pub use descriptor::{ToolDescriptor, ToolEntry};
pub use registry::ToolCatalog;
