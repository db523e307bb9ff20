//! Shared test fixtures for the Dropcito SDK integration tests.
//!
//! Provides a recording [`MockTransport`] with canned responses keyed by URL
//! fragment, a small sample shop document, and `sample_sdk()` which wires
//! both into a [`DropcitoSdk`] with an in-memory token store.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use dropcito_sdk::{
    DropcitoError, DropcitoSdk, HttpResponse, HttpTransport, MemoryTokenStore, Result, Settings,
};
use serde_json::{json, Value};

pub const SHOP_BASE: &str = "http://shop.test/v2";
pub const RATES_BASE: &str = "http://rates.test/v2";
pub const BACKEND_BASE: &str = "http://backend.test";

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail,
}

#[derive(Default)]
struct State {
    routes: Vec<(String, VecDeque<Reply>)>,
    calls: Vec<Call>,
}

/// Transport that answers from a script and records every call.
///
/// Replies for a route are consumed in order; the last one repeats. URLs
/// without a route answer 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply for URLs containing `fragment`.
    pub fn respond(&self, fragment: &str, status: u16, body: Value) -> &Self {
        self.push(fragment, Reply::Respond(HttpResponse::json_body(status, &body)))
    }

    /// Queue a raw-body reply for URLs containing `fragment`.
    pub fn respond_raw(&self, fragment: &str, status: u16, body: &str) -> &Self {
        self.push(fragment, Reply::Respond(HttpResponse::new(status, body)))
    }

    /// Queue a transport failure for URLs containing `fragment`.
    pub fn fail(&self, fragment: &str) -> &Self {
        self.push(fragment, Reply::Fail)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls whose URL contains `fragment`.
    pub fn calls_to(&self, fragment: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.url.contains(fragment))
            .collect()
    }

    fn push(&self, fragment: &str, reply: Reply) -> &Self {
        let mut state = self.state.lock().unwrap();
        let existing = state.routes.iter().position(|(f, _)| f == fragment);
        match existing {
            Some(i) => state.routes[i].1.push_back(reply),
            None => state
                .routes
                .push((fragment.to_string(), VecDeque::from([reply]))),
        }
        drop(state);
        self
    }

    fn answer(&self, call: Call) -> Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        let url = call.url.clone();
        state.calls.push(call);
        let reply = state
            .routes
            .iter_mut()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .and_then(|(_, queue)| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            });
        match reply {
            Some(Reply::Respond(resp)) => Ok(resp),
            Some(Reply::Fail) => Err(DropcitoError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("mock refused {url}"),
            ))),
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.answer(Call {
            method: "GET",
            url: url.to_string(),
            bearer: None,
            body: None,
        })
    }

    fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<HttpResponse> {
        self.answer(Call {
            method: "POST",
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
            body: Some(body.clone()),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn test_settings() -> Settings {
    Settings {
        whatsapp_number: "51911222333".to_string(),
        backend_url: BACKEND_BASE.to_string(),
        api_user: "Public".to_string(),
        api_password: "s3cret".to_string(),
        catalog_url: SHOP_BASE.to_string(),
        rates_url: RATES_BASE.to_string(),
    }
}

/// SDK over `transport` with an empty in-memory token store.
pub fn sample_sdk(transport: &MockTransport) -> DropcitoSdk {
    sdk_with_tokens(transport, MemoryTokenStore::new())
}

pub fn sdk_with_tokens(transport: &MockTransport, tokens: MemoryTokenStore) -> DropcitoSdk {
    DropcitoSdk::builder()
        .settings(test_settings())
        .transport(transport.clone())
        .token_store(tokens)
        .build()
        .unwrap()
}

fn entry(offer_id: &str, name: &str, layout: &str, final_price: i64, out_date: &str) -> Value {
    json!({
        "regularPrice": final_price + 200,
        "finalPrice": final_price,
        "devName": format!("[VIRTUAL]1 x {name}"),
        "offerId": offer_id,
        "outDate": out_date,
        "layout": { "id": layout.to_lowercase(), "name": layout },
        "colors": {
            "color1": "ff8800",
            "color2": "#3355ff",
            "textBackgroundColor": "1a1a2e"
        },
        "newDisplayAsset": {
            "renderImages": [
                { "productTag": "Product.BR", "image": format!("https://img.test/{offer_id}.png") }
            ]
        },
        "brItems": [
            {
                "id": format!("cid_{}", name.to_lowercase().replace(' ', "_")),
                "name": name,
                "type": { "value": "outfit", "displayValue": "Traje", "backendValue": "AthenaCharacter" },
                "rarity": { "value": "legendary", "displayValue": "Legendario", "backendValue": "EFortRarity::Legendary" },
                "images": { "icon": format!("https://img.test/{offer_id}-icon.png") }
            }
        ]
    })
}

/// Shop document with three usable listings across two categories, one
/// listing without cosmetics and one malformed entry.
pub fn sample_shop() -> Value {
    json!({
        "status": 200,
        "data": {
            "hash": "abc123",
            "date": "2030-01-01T00:00:00Z",
            "entries": [
                entry("v2:/alpha", "Alpha Outfit", "Outfits", 1000, "2030-01-02T00:00:00Z"),
                entry("v2:/beta", "Beta Pickaxe", "Tools", 800, "2030-01-03T00:00:00Z"),
                entry("v2:/gamma", "Gamma Glider", "Outfits", 1500, "2030-01-04T00:00:00Z"),
                { "offerId": "v2:/jam", "finalPrice": 500, "layout": { "name": "Jam Tracks" } },
                { "offerId": "v2:/broken", "finalPrice": "not a number" }
            ]
        }
    })
}

/// Rate document with a blue sell rate of `blue_sell`.
pub fn sample_rates(blue_sell: f64) -> Value {
    json!({
        "oficial": { "value_avg": 900.0, "value_sell": 920.0, "value_buy": 880.0 },
        "blue": { "value_avg": blue_sell - 20.0, "value_sell": blue_sell, "value_buy": blue_sell - 40.0 },
        "last_update": "2030-01-01T12:00:00-03:00"
    })
}
