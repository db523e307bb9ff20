use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DropcitoError;

// ---------------------------------------------------------------------------
// Country / Currency
// ---------------------------------------------------------------------------

/// Countries the storefront quotes prices for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    /// Baseline country, priced from fixed constants.
    Peru,
    /// Priced from a fetched USD sell rate.
    #[default]
    Argentina,
}

impl Country {
    pub fn currency(&self) -> Currency {
        match self {
            Country::Peru => Currency::Pen,
            Country::Argentina => Currency::Ars,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Country::Peru => Country::Argentina,
            Country::Argentina => Country::Peru,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Peru => "peru",
            Country::Argentina => "argentina",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = DropcitoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "peru" | "perú" | "pe" => Ok(Country::Peru),
            "argentina" | "ar" => Ok(Country::Argentina),
            other => Err(DropcitoError::InvalidArgument(format!(
                "Unknown country: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Pen,
    Ars,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pen => "PEN",
            Currency::Ars => "ARS",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Pen => "S/",
            Currency::Ars => "$",
        }
    }
}

// ---------------------------------------------------------------------------
// ExchangeRates: Local currency per V-Buck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub regular: f64,
    pub discounted: f64,
}

// ---------------------------------------------------------------------------
// PriceQuote: V-Bucks converted for one country
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub regular: f64,
    pub discounted: f64,
    pub currency: Currency,
}

impl PriceQuote {
    /// Regular amount with two decimals, e.g. `"19.55"`.
    pub fn regular_amount(&self) -> String {
        format!("{:.2}", self.regular)
    }

    /// Discounted amount with two decimals, e.g. `"15.00"`.
    pub fn discounted_amount(&self) -> String {
        format!("{:.2}", self.discounted)
    }

    pub fn regular_label(&self) -> String {
        format!("{} {}", self.currency.symbol(), self.regular_amount())
    }

    pub fn discounted_label(&self) -> String {
        format!("{} {}", self.currency.symbol(), self.discounted_amount())
    }
}
