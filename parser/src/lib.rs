// Parser crate for Freifunk node snapshots
// Formats are trait objects collected in a registry and tried in order

pub mod types;
pub mod base_format;
pub mod formats;
pub mod registry;

// Individual format implementations
pub mod meshviewer;
pub mod nodes_json;
pub mod alfred;
pub mod routerlist;

// Re-export main types
pub use types::*;
pub use base_format::Format;
pub use registry::FormatRegistry;

// Re-export formats
pub use meshviewer::MeshviewerFormat;
pub use nodes_json::{NodesJsonV1Format, NodesJsonV2Format};
pub use alfred::AlfredFormat;
pub use routerlist::RouterlistFormat;
