//! Text sources feeding the record store.
//!
//! A [`TextSource`] only has to hand back the raw text of each source;
//! retries and timeouts belong to the implementation.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::{FinanceError, Result};

/// The two datasets a load reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Vehicles,
    Installments,
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vehicles => f.write_str("vehicles"),
            Self::Installments => f.write_str("installments"),
        }
    }
}

/// Retrieves the raw delimited text of a source.
pub trait TextSource {
    fn fetch_text(&mut self, source: SourceId) -> Result<String>;
}

/// Fetch both sources, failing if either fails.
///
/// Returns `(vehicle_text, installment_text)`.
pub fn fetch_pair<S: TextSource + ?Sized>(source: &mut S) -> Result<(String, String)> {
    let vehicles = source.fetch_text(SourceId::Vehicles)?;
    let installments = source.fetch_text(SourceId::Installments)?;
    debug!(
        vehicle_bytes = vehicles.len(),
        installment_bytes = installments.len(),
        "fetched both sources"
    );
    Ok((vehicles, installments))
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// Source backed by in-memory texts.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    texts: HashMap<SourceId, String>,
}

impl MemorySource {
    pub fn new(vehicles: impl Into<String>, installments: impl Into<String>) -> Self {
        Self {
            texts: HashMap::from([
                (SourceId::Vehicles, vehicles.into()),
                (SourceId::Installments, installments.into()),
            ]),
        }
    }

    /// Replace the text of one source.
    pub fn set(&mut self, source: SourceId, text: impl Into<String>) {
        self.texts.insert(source, text.into());
    }

    /// Drop a source so fetching it fails.
    pub fn remove(&mut self, source: SourceId) {
        self.texts.remove(&source);
    }
}

impl TextSource for MemorySource {
    fn fetch_text(&mut self, source: SourceId) -> Result<String> {
        self.texts
            .get(&source)
            .cloned()
            .ok_or_else(|| FinanceError::NotFound(format!("No text for source: {}", source)))
    }
}
