//! Vehicle finance SDK for Rust.
//!
//! Reads a vehicle inventory and its installment (EMI) schedules from two
//! CSV exports, joins them in memory, and serves the list/detail queries a
//! viewer needs: search and filtering, dashboard counts, and navigation
//! between the list and a single vehicle's detail, kept in sync with a
//! shareable location token.
//!
//! # Quick start
//!
//! ```no_run
//! use vehicle_finance_sdk::{Command, VehicleFinanceSdk};
//!
//! let mut sdk = VehicleFinanceSdk::builder()
//!     .base_url("https://example.com/data")
//!     .build()
//!     .unwrap();
//! sdk.load().unwrap();
//!
//! let view = sdk.viewer_mut().dispatch(Command::Search("pulsar".into()));
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod navigation;
pub mod source;
pub mod store;
pub mod table;
pub mod viewer;

#[cfg(feature = "async")]
pub use async_client::AsyncVehicleFinanceSdk;
pub use cache::CacheManager;
pub use error::{FinanceError, Result};
pub use filter::{QueryState, StatusFilter, Summary, TypeFilter};
pub use navigation::{BuyerBlock, DetailLookup, NavigationController, VehicleDetail, ViewState};
pub use source::{MemorySource, SourceId, TextSource};
pub use store::RecordStore;
pub use viewer::{Command, ViewModel, Viewer};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

// ---------------------------------------------------------------------------
// VehicleFinanceSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`VehicleFinanceSdk`] instance.
///
/// Use [`VehicleFinanceSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](VehicleFinanceSdkBuilder::build) to create the SDK.
pub struct VehicleFinanceSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    base_url: Option<String>,
    vehicles_file: Option<String>,
    installments_file: Option<String>,
}

impl Default for VehicleFinanceSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
            base_url: None,
            vehicles_file: None,
            installments_file: None,
        }
    }
}

impl VehicleFinanceSdkBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/vehicle-finance-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never downloads and only uses previously cached
    /// source files. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for downloads.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the URL (or local directory) both source files live under.
    ///
    /// Defaults to `$VEHICLE_FINANCE_BASE_URL`, then [`config::DEFAULT_BASE_URL`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the vehicle file name (default `full.csv`).
    pub fn vehicles_file(mut self, name: impl Into<String>) -> Self {
        self.vehicles_file = Some(name.into());
        self
    }

    /// Override the installment file name (default `emi.csv`).
    pub fn installments_file(mut self, name: impl Into<String>) -> Self {
        self.installments_file = Some(name.into());
        self
    }

    /// Build the SDK. Nothing is fetched until [`VehicleFinanceSdk::load`].
    pub fn build(self) -> Result<VehicleFinanceSdk> {
        let mut cache = CacheManager::new(self.cache_dir, self.offline, self.timeout)?;
        if let Some(url) = self.base_url {
            cache = cache.with_base_url(url);
        }
        if let Some(name) = self.vehicles_file {
            cache = cache.with_file(SourceId::Vehicles, name);
        }
        if let Some(name) = self.installments_file {
            cache = cache.with_file(SourceId::Installments, name);
        }
        Ok(VehicleFinanceSdk {
            cache,
            viewer: Viewer::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// VehicleFinanceSdk
// ---------------------------------------------------------------------------

/// The main entry point for the SDK.
///
/// Owns the [`CacheManager`] that fetches the sources and the [`Viewer`]
/// holding the loaded records and the current query/navigation state.
///
/// Created via [`VehicleFinanceSdk::builder()`].
pub struct VehicleFinanceSdk {
    cache: CacheManager,
    viewer: Viewer,
}

impl VehicleFinanceSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> VehicleFinanceSdkBuilder {
        VehicleFinanceSdkBuilder::default()
    }

    /// Fetch both sources and replace the loaded records.
    ///
    /// If either source cannot be fetched the error is returned and the
    /// previously loaded records are kept.
    pub fn load(&mut self) -> Result<()> {
        self.viewer.load(&mut self.cache)?;
        info!(vehicles = self.viewer.store().all().len(), "sdk load complete");
        Ok(())
    }

    /// Access the vehicle query interface.
    ///
    /// Returns a lightweight wrapper that borrows the current snapshot and
    /// provides search, summary and type listing.
    pub fn vehicles(&self) -> filter::VehicleQuery<'_> {
        filter::VehicleQuery::new(self.viewer.store().current())
    }

    /// Shared handle to the current snapshot, stable across later loads.
    pub fn snapshot(&self) -> Arc<store::Snapshot> {
        self.viewer.store().snapshot()
    }

    pub fn store(&self) -> &RecordStore {
        self.viewer.store()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    /// Apply a user gesture; shorthand for `viewer_mut().dispatch(..)`.
    pub fn dispatch(&mut self, command: Command) -> ViewModel {
        self.viewer.dispatch(command)
    }

    /// Remove all cached source files.
    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }

    /// Return a reference to the underlying [`CacheManager`].
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for VehicleFinanceSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VehicleFinanceSdk(base_url={}, cache_dir={}, vehicles={}, offline={})",
            self.cache.base_url,
            self.cache.cache_dir.display(),
            self.viewer.store().all().len(),
            self.cache.offline
        )
    }
}
