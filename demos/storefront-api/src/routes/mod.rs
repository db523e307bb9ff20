pub mod friends;
pub mod rates;
pub mod shop;

use dropcito_sdk::models::Country;

use crate::error::AppError;

/// Parse an optional `country` query value; absent means the default.
pub fn parse_country(raw: Option<&str>) -> Result<Country, AppError> {
    match raw {
        Some(s) => s.parse().map_err(AppError::from),
        None => Ok(Country::default()),
    }
}
