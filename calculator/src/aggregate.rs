use crate::models::{ModelAggregate, SENTINEL_UNKNOWN};
use crate::prices::PriceTable;
use mesh_parser::NodeRecord;
use std::collections::HashMap;
use tracing::{debug, info};

/// Counts devices per hardware model and prices the legacy ones
pub struct Aggregator {
    prices: PriceTable,
}

impl Aggregator {
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    /// Group `nodes` by model and compute each model's replacement cost.
    ///
    /// Models are grouped by exact string, in order of first appearance, then
    /// stably sorted by total, highest first. Rows that cannot be priced carry
    /// [`SENTINEL_UNKNOWN`] and sort by that literal value.
    pub fn aggregate(&self, nodes: &[NodeRecord]) -> Vec<ModelAggregate> {
        let mut counts: Vec<(&str, u64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for model in nodes.iter().filter_map(|n| n.model.as_deref()) {
            match index.get(model) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(model, counts.len());
                    counts.push((model, 1));
                }
            }
        }

        let gateways = nodes.len() - counts.iter().map(|(_, c)| *c as usize).sum::<usize>();
        debug!("{} distinct models, {} nodes without model", counts.len(), gateways);

        let mut aggregates: Vec<ModelAggregate> = counts
            .into_iter()
            .map(|(model, count)| ModelAggregate {
                model: model.to_string(),
                count,
                total: self.total_for(model, count),
            })
            .collect();

        aggregates.sort_by(|a, b| b.total.total_cmp(&a.total));

        info!(
            "{} of {} models are priced legacy devices",
            aggregates.iter().filter(|a| a.loss().is_some()).count(),
            aggregates.len()
        );

        aggregates
    }

    fn total_for(&self, model: &str, count: u64) -> f64 {
        match self.prices.lookup(model) {
            Some(entry) if entry.legacy => match entry.price {
                Some(price) => count as f64 * price,
                None => SENTINEL_UNKNOWN,
            },
            _ => SENTINEL_UNKNOWN,
        }
    }
}
