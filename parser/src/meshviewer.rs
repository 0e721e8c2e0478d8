use crate::base_format::{has_string, is_object_array, Format};
use crate::{ExtractOptions, NodeRecord};
use serde_json::Value;
use tracing::{debug, info};

/// Meshviewer graph snapshot - `meshviewer.json` as served by yanic
/// Example: {"timestamp": "...", "nodes": [{"model": "...", "domain": "..."}], "links": [...]}
pub struct MeshviewerFormat;

impl Format for MeshviewerFormat {
    fn name(&self) -> &'static str {
        "meshviewer"
    }

    fn matches(&self, data: &Value) -> bool {
        data.is_object()
            && has_string(data, "timestamp")
            && is_object_array(data, "nodes")
            && is_object_array(data, "links")
    }

    fn extract(&self, data: &Value, options: &ExtractOptions) -> Vec<NodeRecord> {
        let nodes = data["nodes"].as_array().map(Vec::as_slice).unwrap_or_default();
        info!("Extracting {} meshviewer nodes", nodes.len());

        let records: Vec<NodeRecord> = nodes
            .iter()
            .filter(|node| {
                let excluded = node
                    .get("domain")
                    .and_then(Value::as_str)
                    .map_or(false, |domain| options.exclude_domains.contains(domain));
                if excluded {
                    debug!("Dropping node from excluded domain {}", node["domain"]);
                }
                !excluded
            })
            .map(|node| NodeRecord {
                model: node.get("model").and_then(Value::as_str).map(str::to_owned),
            })
            .collect();

        debug!("{} meshviewer nodes kept after domain filter", records.len());
        records
    }
}
