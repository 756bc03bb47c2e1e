//! The event catalog — the immutable pool every mode draws from.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::event::{EventId, HistoricalEvent};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate event id: {0:?}")]
    DuplicateId(EventId),
}

/// An ordered, finite, static collection of historical events.
///
/// Supplied by the hosting app (typically from a bundled RON file) and
/// only ever read by the engine. Event ids are unique within a catalog;
/// `from_events` enforces this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCatalog {
    events: Vec<HistoricalEvent>,
}

impl EventCatalog {
    /// Build a catalog, rejecting duplicate event ids.
    pub fn from_events(events: Vec<HistoricalEvent>) -> Result<Self, CatalogError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for event in &events {
            if !seen.insert(event.id) {
                return Err(CatalogError::DuplicateId(event.id));
            }
        }
        Ok(Self { events })
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: EventCatalog = ron::from_str(&contents)?;
        Self::from_events(catalog.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoricalEvent> {
        self.events.iter()
    }

    /// Look up an event by id.
    pub fn get(&self, id: EventId) -> Option<&HistoricalEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}
