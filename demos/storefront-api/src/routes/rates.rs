use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::parse_country;
use crate::routes::shop::CountryParams;
use crate::state::AppState;

/// GET /api/rates?country=argentina
///
/// Local currency per V-Buck. Argentina falls back to a base rate of 1
/// when the rate API is down.
pub async fn get_rates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> Result<Json<Value>, AppError> {
    let country = parse_country(params.country.as_deref())?;
    let rates = state.sdk.resolve_rates(country).await?;

    Ok(Json(json!({
        "country": country,
        "currency": country.currency().code(),
        "data": rates
    })))
}
