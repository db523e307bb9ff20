//! Async wrapper around [`DropcitoSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use dropcito_sdk::{AsyncDropcitoSdk, Country};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncDropcitoSdk::builder().build().await.unwrap();
//!
//!     let catalog = sdk.load_catalog().await.unwrap();
//!     let rates = sdk.resolve_rates(Country::Argentina).await.unwrap();
//!     println!("{} items, {:?}", catalog.len(), rates);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::error::{DropcitoError, Result};
use crate::models::{Country, ExchangeRates};
use crate::DropcitoSdk;

// ---------------------------------------------------------------------------
// AsyncDropcitoSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDropcitoSdk`] instance.
pub struct AsyncDropcitoSdkBuilder {
    settings: Option<Settings>,
    cache_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for AsyncDropcitoSdkBuilder {
    fn default() -> Self {
        Self {
            settings: None,
            cache_dir: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl AsyncDropcitoSdkBuilder {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncDropcitoSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = DropcitoSdk::builder().timeout(self.timeout);
            if let Some(settings) = self.settings {
                builder = builder.settings(settings);
            }
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            Ok(AsyncDropcitoSdk::from_sdk(builder.build()?))
        })
        .await
        .map_err(|e| DropcitoError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDropcitoSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`DropcitoSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. Cloning is cheap and shares the same
/// underlying SDK.
#[derive(Clone)]
pub struct AsyncDropcitoSdk {
    inner: Arc<Mutex<DropcitoSdk>>,
}

impl AsyncDropcitoSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncDropcitoSdkBuilder {
        AsyncDropcitoSdkBuilder::default()
    }

    /// Wrap an already built SDK (custom transport, token store, ...).
    pub fn from_sdk(sdk: DropcitoSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use dropcito_sdk::AsyncDropcitoSdk;
    /// # async fn example() -> dropcito_sdk::Result<()> {
    /// # let sdk = AsyncDropcitoSdk::builder().build().await?;
    /// let token = sdk.run(|s| s.backend().auth_token()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DropcitoSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DropcitoError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DropcitoError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch and group the shop. Network failures give an empty catalog.
    pub async fn load_catalog(&self) -> Result<Catalog> {
        self.run(|s| Ok(s.catalog().load())).await
    }

    /// Resolve exchange rates for `country`, falling back on failure.
    pub async fn resolve_rates(&self, country: Country) -> Result<ExchangeRates> {
        self.run(move |s| Ok(s.rates().resolve(country))).await
    }

    /// Send a token-authenticated friend request.
    pub async fn add_friend(&self, display_name: &str) -> Result<()> {
        let name = display_name.to_string();
        self.run(move |s| s.backend().add_friend(&name)).await
    }

    /// A copy of the settings the SDK was built with.
    pub async fn settings(&self) -> Result<Settings> {
        self.run(|s| Ok(s.settings().clone())).await
    }
}
