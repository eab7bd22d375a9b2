//! In-memory record store holding the vehicle and installment snapshots.
//!
//! Both record sets are parsed up front and installed together as one
//! immutable [`Snapshot`]. A reload builds a fresh snapshot and swaps it in
//! whole, so a reader never pairs new vehicles with stale installments.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{Installment, Vehicle};
use crate::table;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One consistent pair of parsed record sets.
#[derive(Debug, Default)]
pub struct Snapshot {
    vehicles: Vec<Vehicle>,
    installments: Vec<Installment>,
    by_id: HashMap<String, usize>,
}

impl Snapshot {
    /// Parse both source texts into a snapshot.
    ///
    /// When a `vehicle_id` repeats, lookups resolve to its first row. Rows
    /// with an empty `vehicle_id` stay listed but are never resolvable.
    pub fn from_texts(vehicle_text: &str, installment_text: &str) -> Self {
        let vehicles: Vec<Vehicle> = table::to_records(vehicle_text)
            .iter()
            .map(Vehicle::from)
            .collect();
        let installments: Vec<Installment> = table::to_records(installment_text)
            .iter()
            .map(Installment::from)
            .collect();

        let mut by_id = HashMap::with_capacity(vehicles.len());
        for (idx, v) in vehicles.iter().enumerate() {
            if v.vehicle_id.is_empty() {
                warn!(row = idx + 1, "vehicle row without vehicle_id is not addressable");
                continue;
            }
            match by_id.entry(v.vehicle_id.clone()) {
                Entry::Vacant(e) => {
                    e.insert(idx);
                }
                Entry::Occupied(_) => {
                    warn!(vehicle_id = %v.vehicle_id, row = idx + 1, "duplicate vehicle_id ignored for lookups");
                }
            }
        }

        Self {
            vehicles,
            installments,
            by_id,
        }
    }

    /// All vehicles in file order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// All installments in file order.
    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// Vehicle with exactly this `vehicle_id`.
    pub fn find_primary(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.by_id.get(vehicle_id).map(|&idx| &self.vehicles[idx])
    }

    /// Installments for `buyer_id`, ascending by EMI number.
    ///
    /// The sort is stable, so rows with equal numbers keep file order.
    pub fn children_for(&self, buyer_id: &str) -> Vec<Installment> {
        let mut rows: Vec<Installment> = self
            .installments
            .iter()
            .filter(|i| i.buyer_id == buyer_id)
            .cloned()
            .collect();
        rows.sort_by_key(Installment::ordinal);
        rows
    }
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

/// Owner of the current [`Snapshot`].
#[derive(Debug, Default)]
pub struct RecordStore {
    current: Arc<Snapshot>,
}

impl RecordStore {
    /// Create an empty store (no vehicles, no installments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse both texts and replace the held snapshot.
    pub fn load(&mut self, vehicle_text: &str, installment_text: &str) {
        let snapshot = Snapshot::from_texts(vehicle_text, installment_text);
        info!(
            vehicles = snapshot.vehicles.len(),
            installments = snapshot.installments.len(),
            "record store loaded"
        );
        self.current = Arc::new(snapshot);
    }

    /// Shared handle to the current snapshot.
    ///
    /// The handle stays valid and unchanged across later loads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Borrow the current snapshot.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Vehicle with exactly this `vehicle_id` in the current snapshot.
    pub fn find_primary(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.current.find_primary(vehicle_id)
    }

    /// Installments for `buyer_id`, ascending by EMI number.
    pub fn children_for(&self, buyer_id: &str) -> Vec<Installment> {
        self.current.children_for(buyer_id)
    }

    /// Every vehicle in file order.
    pub fn all(&self) -> &[Vehicle] {
        self.current.vehicles()
    }

    /// Every installment in file order.
    pub fn installments(&self) -> &[Installment] {
        self.current.installments()
    }
}
