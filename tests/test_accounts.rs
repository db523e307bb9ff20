//! Store accounts panel tests.

mod common;

use std::time::Instant;

use common::MockTransport;
use dropcito_sdk::accounts::{self, AccountsPanel, ACCOUNT_ITEM_NAME, SHOW_LESS_LABEL};
use dropcito_sdk::contact::{ContactError, SUCCESS_RESET_DELAY};
use dropcito_sdk::{MemoryTokenStore, Submission};
use serde_json::json;

#[test]
fn collapsed_panel_shows_first_three() {
    let panel = AccountsPanel::default();
    let rows = panel.visible();

    assert_eq!(panel.accounts().len(), 10);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].label, "#1");
    assert_eq!(rows[0].name, "DropCito0001");
    assert_eq!(rows[2].name, "DropCito0003");
    assert_eq!(panel.toggle_label().as_deref(), Some("Mostrar 7 más"));
}

#[test]
fn toggle_expands_and_collapses() {
    let mut panel = AccountsPanel::default();
    panel.toggle();

    assert!(panel.is_expanded());
    assert_eq!(panel.visible().len(), 10);
    assert_eq!(panel.visible()[9].name, "DropCito0010");
    assert_eq!(panel.toggle_label().as_deref(), Some(SHOW_LESS_LABEL));

    panel.toggle();
    assert_eq!(panel.visible().len(), 3);
}

#[test]
fn small_panel_needs_no_toggle() {
    let panel = AccountsPanel::new(2);
    assert_eq!(panel.visible().len(), 2);
    assert_eq!(panel.toggle_label(), None);
}

#[test]
fn account_names_are_zero_padded() {
    assert_eq!(accounts::account_name(7), "DropCito0007");
    assert_eq!(accounts::account_name(123), "DropCito0123");
}

#[test]
fn select_and_back() {
    let mut panel = AccountsPanel::default();
    assert!(!panel.select(10));
    assert!(panel.select(4));
    assert_eq!(panel.selected(), Some("DropCito0005"));

    panel.set_username("TestUser123");
    assert_eq!(panel.username(), "TestUser123");

    panel.back();
    assert_eq!(panel.selected(), None);
    assert_eq!(panel.username(), "");
}

#[test]
fn submit_sends_account_addition_and_returns_to_list() {
    let transport = MockTransport::new();
    transport.respond("/addtofriends", 200, json!({}));
    let sdk = common::sample_sdk(&transport);
    let mut panel = AccountsPanel::default();
    panel.select(0);
    panel.set_username("TestUser123");

    let start = Instant::now();
    assert_eq!(panel.submit(&sdk.legacy_backend(), start), Submission::Success);

    let calls = transport.calls_to("/addtofriends");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        Some(json!({
            "username": "TestUser123",
            "itemName": ACCOUNT_ITEM_NAME,
            "itemPrice": "0.00"
        }))
    );

    assert!(panel.poll(start + SUCCESS_RESET_DELAY));
    assert_eq!(panel.selected(), None);
}

#[test]
fn submit_through_token_backend_logs_in_first() {
    let transport = MockTransport::new();
    transport.respond("/loginform", 200, json!({ "success": true, "token": "tok" }));
    transport.respond("/sendfriendrequest", 200, json!({}));
    let sdk = common::sdk_with_tokens(&transport, MemoryTokenStore::new());
    let mut panel = AccountsPanel::default();
    panel.select(2);
    panel.set_username("TestUser123");

    let start = Instant::now();
    assert_eq!(panel.submit(&sdk.backend(), start), Submission::Success);

    let sends = transport.calls_to("/sendfriendrequest");
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].bearer.as_deref(), Some("tok"));
    assert!(panel.poll(start + SUCCESS_RESET_DELAY));
    assert_eq!(panel.selected(), None);
}

#[test]
fn submit_without_selection_or_username_sends_nothing() {
    let transport = MockTransport::new();
    let sdk = common::sample_sdk(&transport);
    let mut panel = AccountsPanel::default();

    panel.set_username("ignored");
    assert_eq!(panel.submit(&sdk.legacy_backend(), Instant::now()), Submission::Idle);

    panel.select(1);
    assert_eq!(
        panel.submit(&sdk.legacy_backend(), Instant::now()),
        Submission::Error(ContactError::EmptyUsername)
    );
    assert!(transport.calls().is_empty());
}
