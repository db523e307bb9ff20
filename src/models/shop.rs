use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

// ---------------------------------------------------------------------------
// ShopResponse: Envelope returned by `GET /shop`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopResponse {
    pub status: Option<i64>,
    pub data: Option<ShopData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopData {
    pub hash: Option<String>,
    pub date: Option<String>,
    pub vbuck_icon: Option<String>,
    /// Kept untyped so one malformed entry cannot sink the whole shop.
    pub entries: Option<Vec<Value>>,
}

impl ShopResponse {
    /// Decode every entry that fits [`CatalogEntry`], skipping the rest.
    pub fn catalog_entries(&self) -> Vec<CatalogEntry> {
        let Some(entries) = self.data.as_ref().and_then(|d| d.entries.as_ref()) else {
            return Vec::new();
        };
        entries
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| match CatalogEntry::deserialize(raw) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(index = idx, error = %e, "skipping undecodable shop entry");
                    None
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// CatalogEntry: One raw shop listing (all fields optional)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub regular_price: Option<i64>,
    pub final_price: Option<i64>,
    pub dev_name: Option<String>,
    pub offer_id: Option<String>,
    pub in_date: Option<String>,
    pub out_date: Option<String>,
    pub giftable: Option<bool>,
    pub refundable: Option<bool>,
    pub sort_priority: Option<i64>,
    pub layout_id: Option<String>,
    pub layout: Option<Layout>,
    pub colors: Option<EntryColors>,
    pub tile_size: Option<String>,
    pub new_display_asset: Option<NewDisplayAsset>,
    pub br_items: Option<Vec<BrItem>>,
    pub bundle: Option<Bundle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub index: Option<i64>,
    pub rank: Option<i64>,
    pub background: Option<String>,
}

/// Hex colors as sent by the API, usually without the leading `#`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryColors {
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub color3: Option<String>,
    pub text_background_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDisplayAsset {
    pub id: Option<String>,
    pub cosmetic_id: Option<String>,
    pub render_images: Option<Vec<RenderImage>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderImage {
    pub product_tag: Option<String>,
    pub file_name: Option<String>,
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// BrItem: Cosmetic referenced by a listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_field: Option<TaggedValue>,
    pub rarity: Option<TaggedValue>,
    pub images: Option<ItemImages>,
    pub added: Option<String>,
}

/// The `{value, displayValue, backendValue}` triple used for type and rarity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedValue {
    pub value: Option<String>,
    pub display_value: Option<String>,
    pub backend_value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImages {
    pub small_icon: Option<String>,
    pub icon: Option<String>,
    pub featured: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub name: Option<String>,
    pub info: Option<String>,
    pub image: Option<String>,
}
