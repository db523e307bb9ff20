//! Price conversion and exchange-rate resolution tests.

mod common;

use common::MockTransport;
use dropcito_sdk::models::{Country, Currency, ExchangeRates};
use dropcito_sdk::pricing::{self, FALLBACK_BASE_RATE, PEN_DISCOUNTED_RATE, PEN_REGULAR_RATE};
use serde_json::json;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// quote
// ---------------------------------------------------------------------------

#[test]
fn peru_quote_uses_fixed_rates() {
    let rates = ExchangeRates::fallback(Country::Peru);
    let quote = pricing::quote(1000, Country::Peru, rates);

    assert_eq!(quote.currency, Currency::Pen);
    assert_eq!(quote.regular_label(), "S/ 19.55");
    assert_eq!(quote.discounted_label(), "S/ 15.00");
    assert_eq!(quote.discounted_amount(), "15.00");
}

#[test]
fn argentina_quote_scales_with_base_rate() {
    let rates = pricing::rates_for(Country::Argentina, 1000.0);
    assert!(close(rates.regular, 5.3));
    assert!(close(rates.discounted, 4.1));

    let quote = pricing::quote(1000, Country::Argentina, rates);
    assert_eq!(quote.currency, Currency::Ars);
    assert_eq!(quote.regular_label(), "$ 5300.00");
    assert_eq!(quote.discounted_label(), "$ 4100.00");
}

#[test]
fn zero_v_bucks_is_free() {
    let quote = pricing::quote(0, Country::Peru, ExchangeRates::fallback(Country::Peru));
    assert_eq!(quote.regular_amount(), "0.00");
    assert_eq!(quote.discounted_amount(), "0.00");
}

#[test]
fn peru_ignores_base_rate() {
    let rates = pricing::rates_for(Country::Peru, 1234.0);
    assert_eq!(rates.regular, PEN_REGULAR_RATE);
    assert_eq!(rates.discounted, PEN_DISCOUNTED_RATE);
}

// ---------------------------------------------------------------------------
// RateProvider
// ---------------------------------------------------------------------------

#[test]
fn resolve_peru_makes_no_request() {
    let transport = MockTransport::new();
    let sdk = common::sample_sdk(&transport);

    let rates = sdk.rates().resolve(Country::Peru);
    assert_eq!(rates, ExchangeRates::fallback(Country::Peru));
    assert!(transport.calls().is_empty());
}

#[test]
fn resolve_argentina_uses_blue_sell_rate() {
    let transport = MockTransport::new();
    transport.respond("/latest", 200, common::sample_rates(1200.0));
    let sdk = common::sample_sdk(&transport);

    assert!(close(sdk.rates().fetch_base_rate().unwrap(), 1200.0));
    let rates = sdk.rates().resolve(Country::Argentina);
    assert!(close(rates.regular, 1200.0 * 0.0053));
    assert!(close(rates.discounted, 1200.0 * 0.0041));
    assert_eq!(transport.calls_to("/latest")[0].url, "http://rates.test/v2/latest");
}

#[test]
fn oficial_rate_used_when_blue_missing() {
    let transport = MockTransport::new();
    transport.respond("/latest", 200, json!({ "oficial": { "value_sell": 950.0 } }));
    let sdk = common::sample_sdk(&transport);

    assert!(close(sdk.rates().fetch_base_rate().unwrap(), 950.0));
}

#[test]
fn oficial_rate_used_when_blue_unusable() {
    let transport = MockTransport::new();
    transport.respond(
        "/latest",
        200,
        json!({ "blue": { "value_sell": -3.0 }, "oficial": { "value_sell": 950.0 } }),
    );
    let sdk = common::sample_sdk(&transport);

    assert!(close(sdk.rates().fetch_base_rate().unwrap(), 950.0));
    assert_eq!(
        sdk.rates().resolve(Country::Argentina),
        pricing::rates_for(Country::Argentina, 950.0)
    );
}

#[test]
fn failed_fetch_falls_back_to_base_rate_one() {
    let transport = MockTransport::new();
    transport.fail("/latest");
    let sdk = common::sample_sdk(&transport);

    let rates = sdk.rates().resolve(Country::Argentina);
    assert_eq!(rates, pricing::rates_for(Country::Argentina, FALLBACK_BASE_RATE));
}

#[test]
fn unusable_payloads_fall_back() {
    for (status, body) in [
        (500, json!({})),
        (200, json!({ "blue": { "value_sell": null } })),
        (200, json!({ "blue": { "value_sell": -3.0 } })),
    ] {
        let transport = MockTransport::new();
        transport.respond("/latest", status, body);
        let sdk = common::sample_sdk(&transport);

        assert!(sdk.rates().fetch_base_rate().is_err());
        assert_eq!(
            sdk.rates().resolve(Country::Argentina),
            ExchangeRates::fallback(Country::Argentina)
        );
    }
}

// ---------------------------------------------------------------------------
// Country
// ---------------------------------------------------------------------------

#[test]
fn country_parses_and_toggles() {
    assert_eq!("Perú".parse::<Country>().unwrap(), Country::Peru);
    assert_eq!("AR".parse::<Country>().unwrap(), Country::Argentina);
    assert!("chile".parse::<Country>().is_err());
    assert_eq!(Country::Peru.toggled(), Country::Argentina);
    assert_eq!(Country::default(), Country::Argentina);
}
