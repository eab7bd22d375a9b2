//! List/detail navigation kept in step with a shareable location token.
//!
//! The token is what a browser would carry in its fragment identifier:
//! empty for the list, `vehicle-<id>` for a selected vehicle. User
//! selection and an external token change (deep link, back/forward) run
//! through the same state, so both land on the same view for the same id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Buyer, ScheduledInstallment, Seller, Vehicle};
use crate::store::RecordStore;

const TOKEN_PREFIX: &str = "vehicle-";

/// Which view is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    #[default]
    ListView,
    DetailView(String),
}

/// Encode a selection as a shareable token.
pub fn encode_token(vehicle_id: &str) -> String {
    format!("{TOKEN_PREFIX}{vehicle_id}")
}

/// Decode a shareable token. A leading `#` is tolerated.
///
/// Returns `None` for an empty token, an unrelated token, or a prefix with
/// no id after it.
pub fn decode_token(token: &str) -> Option<&str> {
    let token = token.strip_prefix('#').unwrap_or(token);
    token
        .strip_prefix(TOKEN_PREFIX)
        .filter(|id| !id.is_empty())
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Buyer side of the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuyerBlock {
    /// No `buyer_id` is linked: the vehicle has not been sold.
    NoBuyer,
    /// Sold; `installments` may legitimately be empty.
    Sold {
        buyer: Buyer,
        installments: Vec<ScheduledInstallment>,
    },
}

/// Everything the detail view shows for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    pub seller: Seller,
    pub buyer: BuyerBlock,
}

impl VehicleDetail {
    /// Build the detail for `vehicle`, joining its installments from `store`
    /// and deriving each one's status as of `today`.
    pub fn build(vehicle: &Vehicle, store: &RecordStore, today: NaiveDate) -> Self {
        let buyer = match vehicle.buyer() {
            Some(buyer) => BuyerBlock::Sold {
                installments: store
                    .children_for(&buyer.buyer_id)
                    .into_iter()
                    .map(|i| ScheduledInstallment::new(i, today))
                    .collect(),
                buyer,
            },
            None => BuyerBlock::NoBuyer,
        };
        Self {
            vehicle: vehicle.clone(),
            seller: vehicle.seller(),
            buyer,
        }
    }
}

/// Result of materializing the current view state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailLookup {
    /// The list view is active.
    NoSelection,
    Found(VehicleDetail),
    /// The selected id does not resolve in the current data.
    NotFound(String),
}

// ---------------------------------------------------------------------------
// NavigationController
// ---------------------------------------------------------------------------

/// Current view plus the token that reproduces it.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    state: ViewState,
    token: String,
}

impl NavigationController {
    /// Start in the list view with an empty token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active view.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current shareable token (empty in the list view).
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Open the detail view for `vehicle_id`.
    ///
    /// An empty id is no selection, the same as the bare `vehicle-` token,
    /// and returns to the list.
    pub fn select(&mut self, vehicle_id: &str) {
        if vehicle_id.is_empty() {
            self.back();
            return;
        }
        self.state = ViewState::DetailView(vehicle_id.to_string());
        self.token = encode_token(vehicle_id);
    }

    /// Return to the list view.
    pub fn back(&mut self) {
        self.state = ViewState::ListView;
        self.token.clear();
    }

    /// Follow a token set from outside (deep link, history navigation).
    pub fn on_external_token_change(&mut self, token: &str) {
        match decode_token(token) {
            Some(id) => self.select(id),
            None => self.back(),
        }
    }

    /// Resolve the current state against `store`. Installment statuses are
    /// derived as of `today`.
    pub fn materialize(&self, store: &RecordStore, today: NaiveDate) -> DetailLookup {
        match &self.state {
            ViewState::ListView => DetailLookup::NoSelection,
            ViewState::DetailView(id) => match store.find_primary(id) {
                Some(vehicle) => DetailLookup::Found(VehicleDetail::build(vehicle, store, today)),
                None => DetailLookup::NotFound(id.clone()),
            },
        }
    }
}
