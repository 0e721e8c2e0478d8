use crate::base_format::{is_hardware_address, model_at, Format};
use crate::{ExtractOptions, NodeRecord};
use serde_json::Value;
use tracing::info;

/// alfred announcement dump - one object per node, keyed by MAC address
/// Example: {"c4:6e:1f:aa:bb:0c": {"hardware": {"model": "..."}, "hostname": "..."}}
pub struct AlfredFormat;

impl Format for AlfredFormat {
    fn name(&self) -> &'static str {
        "alfred"
    }

    fn matches(&self, data: &Value) -> bool {
        let Some(entries) = data.as_object() else {
            return false;
        };

        // nodes.json and routerlist payloads carry these at top level
        if entries.contains_key("timestamp") || entries.contains_key("version") {
            return false;
        }

        !entries.is_empty()
            && entries
                .iter()
                .all(|(key, value)| is_hardware_address(key) && value.is_object())
    }

    fn extract(&self, data: &Value, _options: &ExtractOptions) -> Vec<NodeRecord> {
        let Some(entries) = data.as_object() else {
            return Vec::new();
        };

        let records: Vec<NodeRecord> = entries
            .values()
            .filter_map(|node| model_at(node, &["hardware", "model"]))
            .collect();

        info!("alfred: {} of {} announcements report a model", records.len(), entries.len());
        records
    }
}
