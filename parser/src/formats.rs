//! Central format registration module
//!
//! Detection tries formats in the order returned here, so order is the
//! tie-break between payloads that satisfy more than one shape. When adding a
//! new format:
//! 1. Create the format file (e.g. `hopglass.rs`) implementing `Format`
//! 2. Export it in lib.rs
//! 3. Add it to `all_formats()` below, at the position it should be tried

use crate::base_format::Format;
use crate::{AlfredFormat, MeshviewerFormat, NodesJsonV1Format, NodesJsonV2Format, RouterlistFormat};
use tracing::debug;

/// Returns all built-in formats in detection order.
///
/// ```rust
/// let names: Vec<_> = mesh_parser::formats::all_formats()
///     .iter()
///     .map(|f| f.name())
///     .collect();
/// assert_eq!(names[0], "meshviewer");
/// ```
pub fn all_formats() -> Vec<Box<dyn Format>> {
    debug!("Initializing format collection");

    crate::register_formats![
        MeshviewerFormat,
        NodesJsonV1Format,
        NodesJsonV2Format,
        AlfredFormat,
        RouterlistFormat,
    ]
}

/// Build a `Vec<Box<dyn Format>>` from format values
///
/// Usage:
/// ```rust,ignore
/// register_formats![
///     MeshviewerFormat,
///     HopglassFormat,     // <-- Just add format here
/// ]
/// ```
#[macro_export]
macro_rules! register_formats {
    ($($format:expr),* $(,)?) => {
        vec![
            $(Box::new($format) as Box<dyn $crate::base_format::Format>),*
        ]
    };
}
