use crate::aggregate::Aggregator;
use crate::config::{Settings, Source};
use crate::fetch::Fetcher;
use crate::models::Report;
use crate::prices::PriceTableError;
use mesh_parser::{ExtractOptions, FormatError, FormatRegistry, NodeRecord};
use tracing::{info, instrument, warn};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("no data source given")]
    NoInput,
    #[error("no nodes found in any data source")]
    NoData,
    #[error(transparent)]
    PriceTable(#[from] PriceTableError),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::NoInput => 1,
            RunError::NoData => 2,
            RunError::PriceTable(_) => 3,
        }
    }
}

/// Fetch every source, aggregate all nodes and build the loss report
pub async fn run(settings: &Settings) -> Result<Report, RunError> {
    if settings.sources.is_empty() {
        return Err(RunError::NoInput);
    }

    let prices = settings.prices.load()?;
    if prices.is_empty() {
        warn!("Price table is empty, no loss can be computed");
    }
    let fetcher = Fetcher::new(settings.timeout);
    let registry = FormatRegistry::new();

    let mut nodes = Vec::new();
    for source in &settings.sources {
        nodes.extend(load_source(&fetcher, &registry, source, &settings.extract).await);
    }

    if nodes.is_empty() {
        return Err(RunError::NoData);
    }
    info!("Collected {} nodes from {} sources", nodes.len(), settings.sources.len());

    let aggregates = Aggregator::new(prices).aggregate(&nodes);
    Ok(Report::from_aggregates(&aggregates))
}

/// Nodes of one source; every failure yields no nodes
#[instrument(skip(fetcher, registry, source, options), fields(url = %source.url))]
async fn load_source(
    fetcher: &Fetcher,
    registry: &FormatRegistry,
    source: &Source,
    options: &ExtractOptions,
) -> Vec<NodeRecord> {
    let Some(data) = fetcher.load(&source.url).await else {
        return Vec::new();
    };

    let result = if source.hints.is_empty() {
        registry.detect_and_extract(&data, options)
    } else {
        registry.extract_with_hint(&data, source.hints, options)
    };

    match result {
        Ok(snapshot) => {
            info!(
                "{}: {} nodes ({} with model) in {} format",
                source.url,
                snapshot.nodes.len(),
                snapshot.modelled(),
                snapshot.format
            );
            snapshot.nodes
        }
        Err(FormatError::Unrecognized { tried }) => {
            warn!("{} is in no known format (tried: {})", source.url, tried);
            Vec::new()
        }
        Err(e) => {
            warn!("Could not read nodes from {}: {}", source.url, e);
            Vec::new()
        }
    }
}
