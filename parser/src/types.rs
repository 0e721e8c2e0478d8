use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A network node reduced to the one datum the calculator needs.
///
/// `model` is `None` for nodes that report no hardware (usually gateways).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub model: Option<String>,
}

impl NodeRecord {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
        }
    }

    pub fn gateway() -> Self {
        Self { model: None }
    }
}

/// Caller supplied options applied during extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Domains whose nodes are dropped. Only meshviewer data carries a domain.
    pub exclude_domains: HashSet<String>,
}

impl ExtractOptions {
    pub fn excluding<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude_domains: domains.into_iter().map(Into::into).collect(),
        }
    }
}

/// Normalized result of detecting and extracting one payload.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Name of the format that matched
    pub format: &'static str,
    /// Top-level `timestamp`, when present and RFC 3339
    pub timestamp: Option<DateTime<Utc>>,
    pub nodes: Vec<NodeRecord>,
}

impl Snapshot {
    /// Number of nodes that carry a hardware model
    pub fn modelled(&self) -> usize {
        self.nodes.iter().filter(|n| n.model.is_some()).count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload matches no known node format (tried: {tried})")]
    Unrecognized { tried: String },
}
