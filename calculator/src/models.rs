use serde::{Deserialize, Serialize, Serializer};

/// Total of a model whose loss cannot be computed: not legacy, no price, or
/// no matching price entry.
pub const SENTINEL_UNKNOWN: f64 = -1.0;

/// One row of the price table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Fragment matched as a substring of the device model
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub legacy: bool,
}

/// Devices of one hardware model seen in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAggregate {
    pub model: String,
    pub count: u64,
    pub total: f64,
}

impl ModelAggregate {
    /// Replacement cost, or `None` for sentinel rows
    pub fn loss(&self) -> Option<f64> {
        if self.total == SENTINEL_UNKNOWN {
            None
        } else {
            Some(self.total)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelLoss {
    pub count: u64,
    pub loss: f64,
}

/// Loss report handed to output
///
/// Serializes as `{"models": {"<model>": {"count": n, "loss": x}}, "loss": total}`
/// with models in descending loss order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(serialize_with = "serialize_in_order")]
    pub models: Vec<(String, ModelLoss)>,
    pub loss: f64,
}

fn serialize_in_order<S: Serializer>(
    models: &[(String, ModelLoss)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(models.iter().map(|(model, loss)| (model, loss)))
}
