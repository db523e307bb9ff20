use std::sync::Mutex;

use dropcito_sdk::Catalog;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async Dropcito SDK. Blocking calls run on Tokio's blocking pool.
    pub sdk: dropcito_sdk::AsyncDropcitoSdk,

    /// Last non-empty catalog, so repeated page loads don't refetch the shop.
    pub catalog: Mutex<Option<Catalog>>,
}
