use crate::base_format::{has_string, has_version, model_at, Format};
use crate::{ExtractOptions, NodeRecord};
use serde_json::Value;
use tracing::info;

const MODEL_PATH: &[&str] = &["nodeinfo", "hardware", "model"];

/// nodes.json version 1 - nodes keyed by node id
/// Example: {"timestamp": "...", "version": 1, "nodes": {"c46e1faabb0c": {"nodeinfo": {...}}}}
pub struct NodesJsonV1Format;

impl Format for NodesJsonV1Format {
    fn name(&self) -> &'static str {
        "nodes.json v1"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["nodes-v1"]
    }

    fn matches(&self, data: &Value) -> bool {
        has_string(data, "timestamp")
            && has_version(data, 1)
            && data
                .get("nodes")
                .and_then(Value::as_object)
                .map_or(false, |nodes| nodes.values().all(Value::is_object))
    }

    fn extract(&self, data: &Value, _options: &ExtractOptions) -> Vec<NodeRecord> {
        let Some(nodes) = data["nodes"].as_object() else {
            return Vec::new();
        };

        let records: Vec<NodeRecord> = nodes
            .values()
            .filter_map(|node| model_at(node, MODEL_PATH))
            .collect();

        info!("nodes.json v1: {} of {} nodes report a model", records.len(), nodes.len());
        records
    }
}

/// nodes.json version 2 - nodes as a list
/// Example: {"timestamp": "...", "version": 2, "nodes": [{"nodeinfo": {...}}]}
///
/// Some generators put plain strings in the list; those are skipped.
pub struct NodesJsonV2Format;

impl Format for NodesJsonV2Format {
    fn name(&self) -> &'static str {
        "nodes.json v2"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["nodes-v2"]
    }

    fn matches(&self, data: &Value) -> bool {
        has_string(data, "timestamp")
            && has_version(data, 2)
            && data
                .get("nodes")
                .and_then(Value::as_array)
                .map_or(false, |nodes| {
                    nodes.iter().all(|n| n.is_object() || n.is_string())
                })
    }

    fn extract(&self, data: &Value, _options: &ExtractOptions) -> Vec<NodeRecord> {
        let Some(nodes) = data["nodes"].as_array() else {
            return Vec::new();
        };

        let records: Vec<NodeRecord> = nodes
            .iter()
            .filter(|node| !node.is_string())
            .filter_map(|node| model_at(node, MODEL_PATH))
            .collect();

        info!("nodes.json v2: {} of {} nodes report a model", records.len(), nodes.len());
        records
    }
}
