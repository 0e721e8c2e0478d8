use crate::models::PriceEntry;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Price table shipped with the binary
const BUNDLED_DEVICES: &str = include_str!("../data/devices.json");

#[derive(Debug, thiserror::Error)]
pub enum PriceTableError {
    #[error("failed to read price table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid price table {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Ordered device price list. Table order is match precedence.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    entries: Vec<PriceEntry>,
}

impl PriceTable {
    pub fn new(entries: Vec<PriceEntry>) -> Self {
        Self { entries }
    }

    /// The table compiled into the binary
    pub fn builtin() -> Result<Self, PriceTableError> {
        Self::from_reader(BUNDLED_DEVICES.as_bytes(), Path::new("<bundled devices.json>"))
    }

    pub fn load(path: &Path) -> Result<Self, PriceTableError> {
        let file = File::open(path).map_err(|source| PriceTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file), path)?;
        info!("Loaded {} price entries from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a JSON array of `{name, price, legacy}`; `origin` is only used in errors
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, PriceTableError> {
        let entries: Vec<PriceEntry> =
            serde_json::from_reader(reader).map_err(|source| PriceTableError::Json {
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(Self { entries })
    }

    /// First entry whose name is contained in `model`
    pub fn lookup(&self, model: &str) -> Option<&PriceEntry> {
        let entry = self.entries.iter().find(|e| model.contains(e.name.as_str()));
        if entry.is_none() {
            debug!("No price entry for model '{}'", model);
        }
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
