use crate::base_format::{is_object_array, Format};
use crate::{ExtractOptions, NodeRecord};
use serde_json::Value;
use tracing::info;

/// Compatibility tag written by the Freifunk Franken extended routerlist
pub const ROUTERLIST_VERSION: &str = "1.1.0";

/// Freifunk Franken extended routerlist - hardware is a plain string per node
/// Example: {"version": "1.1.0", "nodes": [{"name": "...", "hardware": "..."}]}
pub struct RouterlistFormat;

impl Format for RouterlistFormat {
    fn name(&self) -> &'static str {
        "franken extended routerlist"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["franken"]
    }

    fn matches(&self, data: &Value) -> bool {
        data.get("version").and_then(Value::as_str) == Some(ROUTERLIST_VERSION)
            && is_object_array(data, "nodes")
    }

    fn extract(&self, data: &Value, _options: &ExtractOptions) -> Vec<NodeRecord> {
        let Some(nodes) = data["nodes"].as_array() else {
            return Vec::new();
        };

        let records: Vec<NodeRecord> = nodes
            .iter()
            .filter_map(|node| node.get("hardware").and_then(Value::as_str))
            .map(NodeRecord::new)
            .collect();

        info!("routerlist: {} of {} routers report hardware", records.len(), nodes.len());
        records
    }
}
