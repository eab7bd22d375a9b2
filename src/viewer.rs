//! Command interface tying the store, the filter state and navigation together.
//!
//! Each user gesture is a [`Command`]; [`Viewer::dispatch`] applies it and
//! returns the [`ViewModel`] a rendering layer should draw. The viewer never
//! touches presentation objects itself.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::filter::{self, QueryState, StatusFilter, Summary, TypeFilter};
use crate::models::Vehicle;
use crate::navigation::{DetailLookup, NavigationController, VehicleDetail, ViewState};
use crate::source::{self, TextSource};
use crate::store::RecordStore;

/// One user gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    FilterType(TypeFilter),
    FilterStatus(StatusFilter),
    /// Narrow the list to vehicles whose buyer has an overdue installment.
    EmiPending(bool),
    Select(String),
    Back,
    TokenChanged(String),
}

/// What the rendering layer should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
    List {
        vehicles: Vec<Vehicle>,
        summary: Summary,
        /// Set when a detail was requested for an id that no longer resolves.
        missing: Option<String>,
    },
    Detail(VehicleDetail),
}

impl ViewModel {
    /// Serialize for a JavaScript/JSON rendering layer.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Viewer {
    store: RecordStore,
    query: QueryState,
    nav: NavigationController,
    emi_pending_only: bool,
    today: Option<NaiveDate>,
}

impl Viewer {
    /// Empty viewer in the list view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewer over an already loaded store.
    pub fn with_store(store: RecordStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Pin the reference date used for overdue installments.
    ///
    /// Defaults to the local calendar date at each render.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    /// Whether the list is narrowed to vehicles with overdue installments.
    pub fn emi_pending_only(&self) -> bool {
        self.emi_pending_only
    }

    /// Current shareable token.
    pub fn token(&self) -> &str {
        self.nav.token()
    }

    /// Fetch both sources and replace the store contents.
    ///
    /// Both texts are fetched before anything is replaced; if either fetch
    /// fails the previous data stays in place.
    pub fn load<S: TextSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        let (vehicles, installments) = source::fetch_pair(source)?;
        self.store.load(&vehicles, &installments);
        Ok(())
    }

    /// Load from texts already in hand.
    pub fn load_texts(&mut self, vehicle_text: &str, installment_text: &str) {
        self.store.load(vehicle_text, installment_text);
    }

    /// Apply one gesture and return the resulting view.
    pub fn dispatch(&mut self, command: Command) -> ViewModel {
        debug!(?command, "dispatch");
        match command {
            Command::Search(term) => self.query.text = term.to_lowercase(),
            Command::FilterType(f) => self.query.vehicle_type = f,
            Command::FilterStatus(f) => self.query.status = f,
            Command::EmiPending(on) => self.emi_pending_only = on,
            Command::Select(id) => self.nav.select(&id),
            Command::Back => self.nav.back(),
            Command::TokenChanged(token) => self.nav.on_external_token_change(&token),
        }
        self.render()
    }

    /// View for the current state.
    ///
    /// A detail request for an unknown id falls back to the list view and
    /// clears the token, so no stale detail is ever shown.
    pub fn render(&mut self) -> ViewModel {
        match self.nav.materialize(&self.store, self.today()) {
            DetailLookup::Found(detail) => ViewModel::Detail(detail),
            DetailLookup::NoSelection => self.list_view(None),
            DetailLookup::NotFound(id) => {
                warn!(vehicle_id = %id, "selected vehicle not found; returning to list");
                self.nav.back();
                self.list_view(Some(id))
            }
        }
    }

    /// Dashboard counts over every loaded vehicle.
    pub fn summary(&self) -> Summary {
        Summary::compute(self.store.all(), self.store.installments(), self.today())
    }

    /// Vehicles in the list view under the current filters.
    pub fn visible(&self) -> Vec<&Vehicle> {
        let mut rows = filter::apply(self.store.all(), &self.query);
        if self.emi_pending_only {
            filter::retain_emi_pending(&mut rows, self.store.installments(), self.today());
        }
        rows
    }

    /// Whether the detail view is active.
    pub fn is_detail(&self) -> bool {
        matches!(self.nav.state(), ViewState::DetailView(_))
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn list_view(&self, missing: Option<String>) -> ViewModel {
        ViewModel::List {
            vehicles: self.visible().into_iter().cloned().collect(),
            summary: self.summary(),
            missing,
        }
    }
}
