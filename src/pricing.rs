//! V-Bucks to local currency conversion.
//!
//! Peru is priced from fixed constants. Argentina starts from the USD sell
//! rate published by the rate API and multiplies it by fixed USD-per-V-Buck
//! multipliers.

use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{DropcitoError, Result};
use crate::models::{Country, ExchangeRates, PriceQuote, RateResponse};
use crate::transport::HttpTransport;

pub const PEN_REGULAR_RATE: f64 = 0.01955;
pub const PEN_DISCOUNTED_RATE: f64 = 0.015;

pub const USD_REGULAR_MULTIPLIER: f64 = 0.0053;
pub const USD_DISCOUNTED_MULTIPLIER: f64 = 0.0041;

/// Base rate used when the rate API cannot be reached or parsed.
pub const FALLBACK_BASE_RATE: f64 = 1.0;

/// Convert a V-Bucks amount with the given rates.
pub fn quote(v_bucks: u64, country: Country, rates: ExchangeRates) -> PriceQuote {
    let amount = v_bucks as f64;
    PriceQuote {
        regular: amount * rates.regular,
        discounted: amount * rates.discounted,
        currency: country.currency(),
    }
}

/// Rates for `country` given an ARS-per-USD base rate.
///
/// The base rate is ignored for Peru.
pub fn rates_for(country: Country, base_rate: f64) -> ExchangeRates {
    match country {
        Country::Peru => ExchangeRates {
            regular: PEN_REGULAR_RATE,
            discounted: PEN_DISCOUNTED_RATE,
        },
        Country::Argentina => ExchangeRates {
            regular: base_rate * USD_REGULAR_MULTIPLIER,
            discounted: base_rate * USD_DISCOUNTED_MULTIPLIER,
        },
    }
}

impl ExchangeRates {
    /// Rates shown before any fetch has completed.
    pub fn fallback(country: Country) -> Self {
        rates_for(country, FALLBACK_BASE_RATE)
    }
}

// ---------------------------------------------------------------------------
// RateProvider
// ---------------------------------------------------------------------------

/// Resolves exchange rates per country, fetching the base rate when needed.
pub struct RateProvider<'a> {
    transport: &'a dyn HttpTransport,
    settings: &'a Settings,
}

impl<'a> RateProvider<'a> {
    pub fn new(transport: &'a dyn HttpTransport, settings: &'a Settings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Fetch the ARS-per-USD sell rate.
    ///
    /// Prefers the `blue` quote and falls back to `oficial`.
    pub fn fetch_base_rate(&self) -> Result<f64> {
        let url = self.settings.latest_rate_url();
        let resp = self.transport.get(&url)?.error_for_status(&url)?;
        let rates: RateResponse = resp.json()?;
        let rate = [rates.blue.as_ref(), rates.oficial.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|q| q.value_sell.filter(|v| v.is_finite() && *v > 0.0));
        rate.ok_or_else(|| DropcitoError::NotFound(format!("No sell rate in response from {url}")))
    }

    /// Resolve rates for `country`. Never fails.
    ///
    /// Any problem fetching the base rate is logged and priced with
    /// [`FALLBACK_BASE_RATE`].
    pub fn resolve(&self, country: Country) -> ExchangeRates {
        if country == Country::Peru {
            return rates_for(country, FALLBACK_BASE_RATE);
        }
        let base = match self.fetch_base_rate() {
            Ok(rate) => {
                debug!(rate, "fetched base exchange rate");
                rate
            }
            Err(e) => {
                warn!(error = %e, "exchange rate unavailable, using fallback base rate");
                FALLBACK_BASE_RATE
            }
        };
        rates_for(country, base)
    }
}
