//! Mapping from raw shop listings to [`DisplayItem`]s.
//!
//! Every field goes through an explicit fallback chain, so normalization is
//! total: partial or malformed listings degrade to placeholder values and
//! only listings without any cosmetic are dropped.

use crate::models::{CatalogEntry, DisplayItem, ItemColors, ItemPrice};

pub const FALLBACK_ID: &str = "unknown-offer";
pub const FALLBACK_NAME: &str = "Sin nombre";
pub const FALLBACK_RARITY: &str = "Común";
pub const FALLBACK_TYPE: &str = "Desconocido";
pub const FALLBACK_CATEGORY: &str = "Otros";

/// Normalize one listing, or `None` when it references no cosmetic.
pub fn normalize(entry: &CatalogEntry) -> Option<DisplayItem> {
    let item = entry.br_items.as_ref()?.first()?;

    let bundle = entry.bundle.as_ref();
    let layout_name = entry.layout.as_ref().and_then(|l| l.name.as_deref());
    let item_type = item.type_field.as_ref();
    let rarity = item.rarity.as_ref();

    let name = first_non_empty([
        bundle.and_then(|b| b.name.as_deref()),
        item.name.as_deref(),
        entry.dev_name.as_deref(),
    ])
    .unwrap_or(FALLBACK_NAME);

    let render_image = entry
        .new_display_asset
        .as_ref()
        .and_then(|a| a.render_images.as_ref())
        .and_then(|imgs| imgs.first())
        .and_then(|img| img.image.as_deref());
    let image = first_non_empty([
        render_image,
        bundle.and_then(|b| b.image.as_deref()),
        item.images.as_ref().and_then(|i| i.icon.as_deref()),
    ])
    .unwrap_or("");

    let rarity = first_non_empty([
        rarity.and_then(|r| r.display_value.as_deref()),
        rarity.and_then(|r| r.backend_value.as_deref()),
        rarity.and_then(|r| r.value.as_deref()),
    ])
    .unwrap_or(FALLBACK_RARITY);

    let type_name = first_non_empty([
        bundle.and_then(|b| b.info.as_deref()),
        item_type.and_then(|t| t.display_value.as_deref()),
        item_type.and_then(|t| t.backend_value.as_deref()),
        item_type.and_then(|t| t.value.as_deref()),
        layout_name,
    ])
    .unwrap_or(FALLBACK_TYPE);

    let category = first_non_empty([layout_name]).unwrap_or(FALLBACK_CATEGORY);
    let id = first_non_empty([entry.offer_id.as_deref()]).unwrap_or(FALLBACK_ID);

    let colors = entry
        .colors
        .as_ref()
        .map(|c| ItemColors {
            primary: hex_color(c.color1.as_deref()),
            secondary: hex_color(c.color2.as_deref()),
            tertiary: hex_color(c.color3.as_deref()),
            background: hex_color(c.text_background_color.as_deref()),
        })
        .unwrap_or_default();

    Some(DisplayItem {
        id: id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        rarity: rarity.to_string(),
        item_type: type_name.to_string(),
        category: category.to_string(),
        price: ItemPrice {
            v_bucks: non_negative(entry.final_price),
            regular_v_bucks: non_negative(entry.regular_price),
        },
        colors,
        expires_at: first_non_empty([entry.out_date.as_deref()]).map(str::to_string),
    })
}

/// Normalize a batch, dropping listings without a cosmetic.
pub fn normalize_all<'a, I>(entries: I) -> Vec<DisplayItem>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    entries.into_iter().filter_map(normalize).collect()
}

/// First candidate that is present and not blank.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

/// Prefix bare hex with `#`; keep values that already carry it.
fn hex_color(raw: Option<&str>) -> Option<String> {
    let raw = first_non_empty([raw])?.trim();
    if raw.starts_with('#') {
        Some(raw.to_string())
    } else {
        Some(format!("#{raw}"))
    }
}

fn non_negative(price: Option<i64>) -> u64 {
    price.and_then(|p| u64::try_from(p).ok()).unwrap_or(0)
}
