//! Free-text and categorical filtering over the vehicle list.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Installment, InstallmentStatus, Vehicle, VehicleStatus};
use crate::store::Snapshot;

// ---------------------------------------------------------------------------
// QueryState
// ---------------------------------------------------------------------------

/// Vehicle type clause. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    /// Read a filter value as submitted by a select box (`"all"` or a type).
    pub fn from_param(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => vehicle.type_field == *t,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(VehicleStatus),
}

impl StatusFilter {
    /// Read a filter value as submitted by a select box. Unknown values
    /// fall back to `All`.
    pub fn from_param(value: &str) -> Self {
        VehicleStatus::parse(value).map_or(Self::All, Self::Only)
    }

    fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            Self::All => true,
            Self::Only(s) => vehicle.status == Some(*s),
        }
    }
}

/// Current search selection. All clauses are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Search term, stored lower-cased.
    pub text: String,
    pub vehicle_type: TypeFilter,
    pub status: StatusFilter,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, term: &str) -> Self {
        self.text = term.to_lowercase();
        self
    }

    pub fn vehicle_type(mut self, filter: TypeFilter) -> Self {
        self.vehicle_type = filter;
        self
    }

    pub fn status(mut self, filter: StatusFilter) -> Self {
        self.status = filter;
        self
    }

    /// Whether `vehicle` passes every clause.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.vehicle_type.matches(vehicle)
            && self.status.matches(vehicle)
            && (self.text.is_empty() || vehicle.search_key().contains(self.text.as_str()))
    }
}

/// Vehicles passing `query`, in input order.
pub fn apply<'a>(records: &'a [Vehicle], query: &QueryState) -> Vec<&'a Vehicle> {
    records.iter().filter(|v| query.matches(v)).collect()
}

/// Distinct vehicle types in first-seen order, skipping empty values.
pub fn type_options(records: &[Vehicle]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|v| !v.type_field.is_empty() && seen.insert(v.type_field.as_str()))
        .map(|v| v.type_field.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Dashboard counts over the full, unfiltered vehicle set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub in_stock: usize,
    pub sold: usize,
    /// Vehicles whose buyer has at least one overdue installment.
    pub emi_pending: usize,
}

impl Summary {
    pub fn compute(vehicles: &[Vehicle], installments: &[Installment], today: NaiveDate) -> Self {
        let overdue = overdue_buyers(installments, today);
        let count_status = |s: VehicleStatus| vehicles.iter().filter(|v| v.status == Some(s)).count();
        Self {
            total: vehicles.len(),
            in_stock: count_status(VehicleStatus::Stock),
            sold: count_status(VehicleStatus::Sold),
            emi_pending: vehicles.iter().filter(|v| owes_overdue(v, &overdue)).count(),
        }
    }
}

/// Buyer ids with at least one overdue installment on `today`.
pub fn overdue_buyers(installments: &[Installment], today: NaiveDate) -> HashSet<&str> {
    installments
        .iter()
        .filter(|i| i.status_on(today) == InstallmentStatus::Overdue)
        .map(|i| i.buyer_id.as_str())
        .collect()
}

/// Keep only the rows whose buyer has an overdue installment on `today`.
pub fn retain_emi_pending(rows: &mut Vec<&Vehicle>, installments: &[Installment], today: NaiveDate) {
    let overdue = overdue_buyers(installments, today);
    rows.retain(|v| owes_overdue(v, &overdue));
}

fn owes_overdue(vehicle: &Vehicle, overdue: &HashSet<&str>) -> bool {
    vehicle.has_buyer() && overdue.contains(vehicle.buyer_id.as_str())
}

// ---------------------------------------------------------------------------
// VehicleQuery
// ---------------------------------------------------------------------------

/// Query interface over the vehicles of one [`Snapshot`].
pub struct VehicleQuery<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> VehicleQuery<'a> {
    /// Create a new `VehicleQuery` bound to the given snapshot.
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// Vehicles passing `query`, in file order.
    pub fn search(&self, query: &QueryState) -> Vec<&'a Vehicle> {
        apply(self.snapshot.vehicles(), query)
    }

    /// Dashboard counts as of `today`.
    pub fn summary(&self, today: NaiveDate) -> Summary {
        Summary::compute(self.snapshot.vehicles(), self.snapshot.installments(), today)
    }

    /// Vehicles counted by [`Summary::emi_pending`], in file order.
    pub fn emi_pending(&self, today: NaiveDate) -> Vec<&'a Vehicle> {
        let mut rows: Vec<&'a Vehicle> = self.snapshot.vehicles().iter().collect();
        retain_emi_pending(&mut rows, self.snapshot.installments(), today);
        rows
    }

    pub fn types(&self) -> Vec<String> {
        type_options(self.snapshot.vehicles())
    }
}
