//! Async wrapper tests; each call runs on the blocking pool.

#![cfg(feature = "async")]

mod common;

use common::MockTransport;
use dropcito_sdk::models::Country;
use dropcito_sdk::{pricing, AsyncDropcitoSdk, MemoryTokenStore};
use serde_json::json;

fn async_sdk(transport: &MockTransport) -> AsyncDropcitoSdk {
    AsyncDropcitoSdk::from_sdk(common::sample_sdk(transport))
}

#[tokio::test]
async fn load_catalog_runs_off_the_event_loop() {
    let transport = MockTransport::new();
    transport.respond("/shop", 200, common::sample_shop());
    let sdk = async_sdk(&transport);

    let catalog = sdk.load_catalog().await.unwrap();
    assert_eq!(catalog.len(), 3);
}

#[tokio::test]
async fn resolve_rates_matches_sync_result() {
    let transport = MockTransport::new();
    transport.respond("/latest", 200, common::sample_rates(1100.0));
    let sdk = async_sdk(&transport);

    let rates = sdk.resolve_rates(Country::Argentina).await.unwrap();
    assert_eq!(rates, pricing::rates_for(Country::Argentina, 1100.0));
}

#[tokio::test]
async fn add_friend_and_run_share_one_sdk() {
    let transport = MockTransport::new();
    transport.respond("/sendfriendrequest", 200, json!({}));
    let sdk = AsyncDropcitoSdk::from_sdk(common::sdk_with_tokens(
        &transport,
        MemoryTokenStore::with_token("tok"),
    ));
    let clone = sdk.clone();

    clone.add_friend("TestUser123").await.unwrap();
    let token = sdk.run(|s| s.backend().auth_token()).await.unwrap();

    assert_eq!(token.as_deref(), Some("tok"));
    assert_eq!(transport.calls_to("/sendfriendrequest").len(), 1);
}

#[tokio::test]
async fn errors_propagate_through_run() {
    let transport = MockTransport::new();
    transport.fail("/shop");
    let sdk = async_sdk(&transport);

    assert!(sdk.run(|s| s.catalog().fetch()).await.is_err());
    assert!(sdk.load_catalog().await.unwrap().is_empty());
}
