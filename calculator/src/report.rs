use crate::models::{ModelAggregate, ModelLoss, Report};
use std::fmt::Write;

impl Report {
    /// Build the report from aggregates, dropping rows without a computable loss
    pub fn from_aggregates(aggregates: &[ModelAggregate]) -> Self {
        let models: Vec<(String, ModelLoss)> = aggregates
            .iter()
            .filter_map(|a| {
                a.loss().map(|loss| {
                    (
                        a.model.clone(),
                        ModelLoss {
                            count: a.count,
                            loss,
                        },
                    )
                })
            })
            .collect();
        let loss = models.iter().fold(0.0, |total, (_, m)| total + m.loss);

        Self { models, loss }
    }
}

/// Human readable lines, one per model, then the total
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for (model, entry) in &report.models {
        let _ = writeln!(
            out,
            "{} - Device count: {} - Loss: {}€",
            model, entry.count, entry.loss
        );
    }
    let _ = writeln!(out, "Total loss:  {}€", report.loss);
    out
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string(report)
}
