//! Shared registry of immutable aircraft definitions
//!
//! Every calculation only reads its `Aircraft`, so one `Arc` per airframe is
//! handed out to any number of concurrent callers without locking.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

use crate::core_types::aircraft::Aircraft;

#[derive(Debug, Clone, Default)]
pub struct AircraftCatalog {
    aircraft: FxHashMap<String, Arc<Aircraft>>,
}

impl AircraftCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in reference airframes
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(Aircraft::cessna_172n());
        catalog.insert(Aircraft::piper_pa28_181());
        catalog
    }

    /// Register an aircraft under its id, returning the entry it replaced
    pub fn insert(&mut self, aircraft: Aircraft) -> Option<Arc<Aircraft>> {
        debug!(aircraft = %aircraft.id, name = %aircraft.name, "Registering aircraft");
        self.aircraft.insert(aircraft.id.clone(), Arc::new(aircraft))
    }

    /// Shared handle to an aircraft
    pub fn get(&self, id: &str) -> Option<Arc<Aircraft>> {
        self.aircraft.get(id).cloned()
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.aircraft.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}
