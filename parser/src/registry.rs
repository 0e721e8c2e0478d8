use crate::base_format::{snapshot_timestamp, Format};
use crate::formats::all_formats;
use crate::{ExtractOptions, FormatError, Snapshot};
use serde_json::Value;
use std::io::Read;
use tracing::{debug, info, warn};

/// FormatRegistry - holds the known node formats and detects which one a
/// payload is in
///
/// ## Adding a New Format
///
/// Built-in formats come from `formats::all_formats()`; see `formats.rs`.
/// Formats registered at runtime with [`FormatRegistry::register`] are tried
/// after the built-in ones.
pub struct FormatRegistry {
    formats: Vec<Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats
    pub fn new() -> Self {
        let formats = all_formats();

        debug!(
            "Registered {} formats: {}",
            formats.len(),
            formats.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
        );

        Self { formats }
    }

    /// Register a custom format
    pub fn register(&mut self, format: Box<dyn Format>) {
        info!("Registering custom format: {}", format.name());
        self.formats.push(format);
    }

    /// Registered format names in detection order
    pub fn names(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.name()).collect()
    }

    /// Get format by name or alias
    pub fn get_format(&self, name: &str) -> Option<&dyn Format> {
        debug!("Looking up format by name: {}", name);
        let result = self
            .formats
            .iter()
            .find(|f| f.name() == name || f.aliases().contains(&name))
            .map(|f| f.as_ref());

        if result.is_none() {
            warn!("Format not found: {}", name);
        }

        result
    }

    /// First format, in registration order, whose predicate accepts `data`
    pub fn detect(&self, data: &Value) -> Option<&dyn Format> {
        self.formats
            .iter()
            .find(|f| {
                let matches = f.matches(data);
                debug!("Format '{}' matches: {}", f.name(), matches);
                matches
            })
            .map(|f| f.as_ref())
    }

    /// Detect the payload's format and extract its nodes
    pub fn detect_and_extract(
        &self,
        data: &Value,
        options: &ExtractOptions,
    ) -> Result<Snapshot, FormatError> {
        match self.detect(data) {
            Some(format) => {
                info!("Detected format: {}", format.name());
                Ok(extract_with(format, data, options))
            }
            None => Err(FormatError::Unrecognized {
                tried: self.names().join(", "),
            }),
        }
    }

    /// Extract with explicit format hints (format names or aliases)
    ///
    /// The first hinted format whose shape the payload has is used. Unknown
    /// hints are ignored; when no hint fits, falls back to auto-detection.
    pub fn extract_with_hint(
        &self,
        data: &Value,
        hints: &[&str],
        options: &ExtractOptions,
    ) -> Result<Snapshot, FormatError> {
        let hinted = hints
            .iter()
            .filter_map(|hint| self.get_format(hint))
            .find(|format| format.matches(data));

        match hinted {
            Some(format) => {
                info!("Payload matches hinted format '{}'", format.name());
                Ok(extract_with(format, data, options))
            }
            None => {
                warn!(
                    "Payload is not in any of [{}], falling back to auto-detection",
                    hints.join(", ")
                );
                self.detect_and_extract(data, options)
            }
        }
    }

    /// Read a JSON document and detect its format
    pub fn parse_auto(
        &self,
        reader: Box<dyn Read>,
        options: &ExtractOptions,
    ) -> Result<Snapshot, FormatError> {
        let data: Value = serde_json::from_reader(reader)?;
        self.detect_and_extract(&data, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_with(format: &dyn Format, data: &Value, options: &ExtractOptions) -> Snapshot {
    let snapshot = Snapshot {
        format: format.name(),
        timestamp: snapshot_timestamp(data),
        nodes: format.extract(data, options),
    };

    if let Some(ts) = snapshot.timestamp {
        debug!("Snapshot taken at {}", ts);
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeRecord;
    use serde_json::json;
    use std::io::Cursor;

    fn samples() -> Vec<(&'static str, Value)> {
        vec![
            (
                "meshviewer",
                json!({
                    "timestamp": "2024-03-01T12:00:00+00:00",
                    "nodes": [{"model": "X1", "domain": "a"}, {"node_id": "gw"}],
                    "links": []
                }),
            ),
            (
                "nodes.json v1",
                json!({
                    "timestamp": "t",
                    "version": 1,
                    "nodes": {"a": {"nodeinfo": {"hardware": {"model": "X1"}}}}
                }),
            ),
            (
                "nodes.json v2",
                json!({
                    "timestamp": "t",
                    "version": 2,
                    "nodes": ["s", {"nodeinfo": {"hardware": {"model": "X2"}}}]
                }),
            ),
            (
                "alfred",
                json!({"c4:6e:1f:aa:bb:0c": {"hardware": {"model": "X3"}}}),
            ),
            (
                "franken extended routerlist",
                json!({"version": "1.1.0", "nodes": [{"hardware": "X4"}]}),
            ),
        ]
    }

    #[test]
    fn test_registry_order() {
        let registry = FormatRegistry::new();
        assert_eq!(
            registry.names(),
            vec![
                "meshviewer",
                "nodes.json v1",
                "nodes.json v2",
                "alfred",
                "franken extended routerlist"
            ]
        );
    }

    #[test]
    fn test_samples_match_exactly_one_format() {
        let registry = FormatRegistry::new();
        for (name, data) in samples() {
            let matching: Vec<_> = registry
                .formats
                .iter()
                .filter(|f| f.matches(&data))
                .map(|f| f.name())
                .collect();
            assert_eq!(matching, vec![name]);
        }
    }

    #[test]
    fn test_detect_and_extract_equals_direct_extraction() {
        let registry = FormatRegistry::new();
        let options = ExtractOptions::excluding(["b"]);

        for (name, data) in samples() {
            let snapshot = registry.detect_and_extract(&data, &options).unwrap();
            let direct = registry.get_format(name).unwrap().extract(&data, &options);

            assert_eq!(snapshot.format, name);
            assert_eq!(snapshot.nodes, direct);
        }
    }

    #[test]
    fn test_unrecognized_payloads() {
        let registry = FormatRegistry::new();
        let payloads = vec![
            json!(null),
            json!([1, 2, 3]),
            json!("nodes"),
            json!({}),
            json!({"timestamp": "t", "version": 3, "nodes": []}),
            json!({"timestamp": "t", "nodes": [], "links": "none"}),
            json!({"c4:6e:1f:aa:bb:0c": {}, "timestamp": "t"}),
        ];

        for data in payloads {
            let result = registry.detect_and_extract(&data, &ExtractOptions::default());
            assert!(
                matches!(result, Err(FormatError::Unrecognized { .. })),
                "expected unrecognized for {}",
                data
            );
        }
    }

    #[test]
    fn test_snapshot_timestamp_is_kept() {
        let registry = FormatRegistry::new();
        let (_, data) = samples().remove(0);

        let snapshot = registry.detect_and_extract(&data, &ExtractOptions::default()).unwrap();

        assert_eq!(
            snapshot.timestamp.map(|ts| ts.to_rfc3339()),
            Some("2024-03-01T12:00:00+00:00".to_string())
        );
        assert_eq!(snapshot.modelled(), 1);
    }

    #[test]
    fn test_get_format_by_alias() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.get_format("franken").unwrap().name(), "franken extended routerlist");
        assert_eq!(registry.get_format("nodes-v2").unwrap().name(), "nodes.json v2");
        assert!(registry.get_format("hopglass").is_none());
    }

    #[test]
    fn test_extract_with_hint_falls_back() {
        let registry = FormatRegistry::new();
        let data = json!({"version": "1.1.0", "nodes": [{"hardware": "X4"}]});

        let snapshot = registry
            .extract_with_hint(&data, &["meshviewer", "hopglass"], &ExtractOptions::default())
            .unwrap();

        assert_eq!(snapshot.format, "franken extended routerlist");
        assert_eq!(snapshot.nodes, vec![NodeRecord::new("X4")]);
    }

    #[test]
    fn test_extract_with_hint_picks_matching_hint() {
        let registry = FormatRegistry::new();
        let data = json!({
            "timestamp": "t",
            "version": 2,
            "nodes": [{"nodeinfo": {"hardware": {"model": "X2"}}}]
        });

        let snapshot = registry
            .extract_with_hint(&data, &["nodes-v1", "nodes-v2"], &ExtractOptions::default())
            .unwrap();

        assert_eq!(snapshot.format, "nodes.json v2");
        assert_eq!(snapshot.nodes, vec![NodeRecord::new("X2")]);
    }

    #[test]
    fn test_parse_auto_reads_json() {
        let registry = FormatRegistry::new();
        let data = r#"{"timestamp": "t", "version": 2, "nodes": [{"nodeinfo": {"hardware": {"model": "X2"}}}]}"#;

        let snapshot = registry
            .parse_auto(Box::new(Cursor::new(data)), &ExtractOptions::default())
            .unwrap();
        assert_eq!(snapshot.format, "nodes.json v2");

        let broken = registry.parse_auto(Box::new(Cursor::new("{nodes")), &ExtractOptions::default());
        assert!(matches!(broken, Err(FormatError::Json(_))));
    }

    struct EverythingFormat;

    impl Format for EverythingFormat {
        fn name(&self) -> &'static str {
            "everything"
        }

        fn matches(&self, _data: &Value) -> bool {
            true
        }

        fn extract(&self, _data: &Value, _options: &ExtractOptions) -> Vec<NodeRecord> {
            vec![NodeRecord::new("catch-all")]
        }
    }

    #[test]
    fn test_custom_format_is_tried_last() {
        let mut registry = FormatRegistry::new();
        registry.register(Box::new(EverythingFormat));

        let alfred = json!({"c4:6e:1f:aa:bb:0c": {"hardware": {"model": "X3"}}});
        let snapshot = registry.detect_and_extract(&alfred, &ExtractOptions::default()).unwrap();
        assert_eq!(snapshot.format, "alfred");

        let snapshot = registry.detect_and_extract(&json!([]), &ExtractOptions::default()).unwrap();
        assert_eq!(snapshot.format, "everything");
    }
}
