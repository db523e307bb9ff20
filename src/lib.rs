//! Dropcito storefront SDK for Rust.
//!
//! Fetches the Fortnite item shop, normalizes listings into display items,
//! prices them in Peruvian soles or Argentine pesos, and drives the purchase
//! contact flow (WhatsApp handoff or friend request through the Dropcito
//! backend). The storefront page and its cards are exposed as headless view
//! models, so any frontend can render them.
//!
//! # Quick start
//!
//! ```no_run
//! use dropcito_sdk::{Country, DropcitoSdk};
//!
//! let sdk = DropcitoSdk::builder().build().unwrap();
//!
//! let mut page = sdk.page(Country::Peru);
//! page.mount(&sdk);
//!
//! for section in page.visible_sections() {
//!     println!("{} ({} items)", section.category, section.cards.len());
//! }
//! ```

pub mod accounts;
#[cfg(feature = "async")]
pub mod async_client;
pub mod backend;
pub mod card;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod countdown;
pub mod debounce;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pricing;
pub mod style;
#[cfg(feature = "async")]
pub mod ticker;
pub mod token_store;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncDropcitoSdk;
pub use backend::{BackendClient, LegacyBackendClient};
pub use card::{CardKey, CardView, ContactState, ItemCard};
pub use catalog::{Catalog, CatalogPage, CatalogQuery};
pub use config::Settings;
pub use contact::{FriendRequest, FriendRequestSender, Submission};
pub use error::{DropcitoError, Result};
pub use models::{Country, DisplayItem, ExchangeRates, PriceQuote};
pub use pricing::RateProvider;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// DropcitoSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DropcitoSdk`] instance.
///
/// Use [`DropcitoSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DropcitoSdkBuilder::build) to create the SDK.
pub struct DropcitoSdkBuilder {
    settings: Option<Settings>,
    cache_dir: Option<PathBuf>,
    timeout: Duration,
    transport: Option<Box<dyn HttpTransport>>,
    token_store: Option<Box<dyn TokenStore>>,
}

impl Default for DropcitoSdkBuilder {
    fn default() -> Self {
        Self {
            settings: None,
            cache_dir: None,
            timeout: Duration::from_secs(30),
            transport: None,
            token_store: None,
        }
    }
}

impl DropcitoSdkBuilder {
    /// Use explicit settings instead of reading `DROPCITO_*` variables.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set a custom cache directory for the persisted auth token.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/dropcito-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route every request through a custom transport.
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Keep the auth token somewhere other than the cache directory.
    pub fn token_store(mut self, store: impl TokenStore + 'static) -> Self {
        self.token_store = Some(Box::new(store));
        self
    }

    /// Build the SDK.
    ///
    /// Creates the cache directory when the default file token store is
    /// used. Nothing is fetched eagerly.
    pub fn build(self) -> Result<DropcitoSdk> {
        let settings = self.settings.unwrap_or_else(Settings::from_env);
        let transport: Box<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Box::new(ReqwestTransport::new(self.timeout)?),
        };
        let tokens: Box<dyn TokenStore> = match self.token_store {
            Some(s) => s,
            None => {
                let dir = self.cache_dir.unwrap_or_else(config::default_cache_dir);
                Box::new(FileTokenStore::new(dir)?)
            }
        };
        Ok(DropcitoSdk {
            settings,
            transport,
            tokens,
        })
    }
}

// ---------------------------------------------------------------------------
// DropcitoSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Dropcito SDK.
///
/// Owns the settings, the HTTP transport and the token store, and hands out
/// lightweight borrowing clients for each concern.
///
/// Created via [`DropcitoSdk::builder()`].
pub struct DropcitoSdk {
    settings: Settings,
    transport: Box<dyn HttpTransport>,
    tokens: Box<dyn TokenStore>,
}

impl DropcitoSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DropcitoSdkBuilder {
        DropcitoSdkBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Access the item shop catalog.
    pub fn catalog(&self) -> CatalogQuery<'_> {
        CatalogQuery::new(self.transport.as_ref(), &self.settings)
    }

    /// Access exchange-rate resolution.
    pub fn rates(&self) -> RateProvider<'_> {
        RateProvider::new(self.transport.as_ref(), &self.settings)
    }

    /// Access the token-authenticated backend.
    pub fn backend(&self) -> BackendClient<'_> {
        BackendClient::new(self.transport.as_ref(), self.tokens.as_ref(), &self.settings)
    }

    /// Access the deprecated unauthenticated `/addtofriends` endpoint.
    pub fn legacy_backend(&self) -> LegacyBackendClient<'_> {
        LegacyBackendClient::new(self.transport.as_ref(), &self.settings)
    }

    /// The token store shared by every backend call.
    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    /// A fresh, not yet mounted storefront page.
    pub fn page(&self, country: Country) -> CatalogPage {
        CatalogPage::new(country, self.settings.whatsapp_number.clone())
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DropcitoSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DropcitoSdk(catalog={}, backend={}, token={})",
            self.settings.catalog_url,
            self.settings.backend_url,
            if self.tokens.get().is_some() { "stored" } else { "none" }
        )
    }
}
