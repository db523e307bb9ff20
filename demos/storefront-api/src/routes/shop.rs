use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::Utc;
use dropcito_sdk::{Catalog, ItemCard};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::parse_country;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ShopParams {
    pub country: Option<String>,
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct CountryParams {
    pub country: Option<String>,
}

/// Cached catalog, or a fresh load when nothing usable is cached yet.
async fn catalog(state: &AppState) -> Result<Catalog, AppError> {
    {
        let cached = state
            .catalog
            .lock()
            .map_err(|_| AppError::internal("Catalog lock poisoned"))?;
        if let Some(catalog) = cached.as_ref() {
            return Ok(catalog.clone());
        }
    }

    let catalog = state.sdk.load_catalog().await?;
    if !catalog.is_empty() {
        let mut cached = state
            .catalog
            .lock()
            .map_err(|_| AppError::internal("Catalog lock poisoned"))?;
        *cached = Some(catalog.clone());
    }
    Ok(catalog)
}

/// GET /api/shop?country=peru&q=alpha
///
/// Shop sections with fully rendered cards, priced for `country` and
/// filtered by item name.
pub async fn get_shop(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShopParams>,
) -> Result<Json<Value>, AppError> {
    let country = parse_country(params.country.as_deref())?;
    let catalog = catalog(&state).await?;
    let rates = state.sdk.resolve_rates(country).await?;
    let settings = state.sdk.settings().await?;

    let now = Utc::now();
    let query = params.q.unwrap_or_default();
    let sections: Vec<Value> = catalog
        .filter(&query)
        .into_iter()
        .map(|section| {
            let cards: Vec<_> = section
                .items
                .into_iter()
                .map(|item| {
                    ItemCard::new(item.clone(), country, rates, settings.whatsapp_number.clone())
                        .view(now)
                })
                .collect();
            json!({ "category": section.category, "cards": cards })
        })
        .collect();

    let count = sections.len();
    Ok(Json(json!({
        "country": country,
        "rates": rates,
        "sections": sections,
        "count": count
    })))
}

/// GET /api/shop/{id}/whatsapp?country=argentina
///
/// WhatsApp handoff link for one item.
pub async fn whatsapp_link(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<CountryParams>,
) -> Result<Json<Value>, AppError> {
    let country = parse_country(params.country.as_deref())?;
    let catalog = catalog(&state).await?;
    let item = catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("No shop item with id '{id}'")))?;
    let rates = state.sdk.resolve_rates(country).await?;
    let settings = state.sdk.settings().await?;

    let card = ItemCard::new(item, country, rates, settings.whatsapp_number);
    Ok(Json(json!({ "data": { "id": id, "url": card.whatsapp_link() } })))
}
