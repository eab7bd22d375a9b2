//! Async wrapper around [`VehicleFinanceSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. This is
//! the asynchronous `load` boundary: it awaits both source fetches, then
//! parses synchronously.
//!
//! # Example
//!
//! ```no_run
//! use vehicle_finance_sdk::{AsyncVehicleFinanceSdk, Command};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncVehicleFinanceSdk::builder()
//!         .base_url("https://example.com/data")
//!         .build()
//!         .await
//!         .unwrap();
//!     sdk.load().await.unwrap();
//!
//!     let view = sdk.dispatch(Command::Select("V42".into())).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{FinanceError, Result};
use crate::filter::Summary;
use crate::viewer::{Command, ViewModel};
use crate::VehicleFinanceSdk;

// ---------------------------------------------------------------------------
// AsyncVehicleFinanceSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncVehicleFinanceSdk`] instance.
#[derive(Default)]
pub struct AsyncVehicleFinanceSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Option<Duration>,
    base_url: Option<String>,
    vehicles_file: Option<String>,
    installments_file: Option<String>,
}

impl AsyncVehicleFinanceSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the URL (or local directory) both source files live under.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the vehicle file name.
    pub fn vehicles_file(mut self, name: impl Into<String>) -> Self {
        self.vehicles_file = Some(name.into());
        self
    }

    /// Override the installment file name.
    pub fn installments_file(mut self, name: impl Into<String>) -> Self {
        self.installments_file = Some(name.into());
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncVehicleFinanceSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = VehicleFinanceSdk::builder().offline(self.offline);
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(name) = self.vehicles_file {
                builder = builder.vehicles_file(name);
            }
            if let Some(name) = self.installments_file {
                builder = builder.installments_file(name);
            }
            let sdk = builder.build()?;
            Ok(AsyncVehicleFinanceSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| FinanceError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncVehicleFinanceSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`VehicleFinanceSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying SDK is protected by a
/// [`Mutex`], so a second `load` simply queues behind the first.
pub struct AsyncVehicleFinanceSdk {
    inner: Arc<Mutex<VehicleFinanceSdk>>,
}

impl AsyncVehicleFinanceSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncVehicleFinanceSdkBuilder {
        AsyncVehicleFinanceSdkBuilder::default()
    }

    /// Wrap an already built SDK.
    pub fn from_sdk(sdk: VehicleFinanceSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&mut VehicleFinanceSdk` and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut VehicleFinanceSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = sdk
                .lock()
                .map_err(|_| FinanceError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| FinanceError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch both sources and replace the loaded records.
    pub async fn load(&self) -> Result<()> {
        self.run(|s| s.load()).await
    }

    /// Apply a user gesture and return the resulting view.
    pub async fn dispatch(&self, command: Command) -> Result<ViewModel> {
        self.run(move |s| Ok(s.dispatch(command))).await
    }

    /// Dashboard counts over every loaded vehicle.
    pub async fn summary(&self) -> Result<Summary> {
        self.run(|s| Ok(s.viewer().summary())).await
    }

    /// Close the SDK, releasing all resources.
    ///
    /// The SDK is dropped on the blocking pool, where the blocking HTTP
    /// client may be torn down safely.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| FinanceError::InvalidArgument(format!("Task join error: {e}")))
    }
}
