use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DisplayItem: Normalized, UI-ready projection of a catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub category: String,
    pub price: ItemPrice,
    pub colors: ItemColors,
    /// Raw expiry timestamp as sent by the shop; parsed lazily by the countdown.
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPrice {
    /// Final price in V-Bucks, the amount that gets converted.
    pub v_bucks: u64,
    pub regular_v_bucks: u64,
}

/// `#`-prefixed hex colors; `None` when the shop sent nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub tertiary: Option<String>,
    pub background: Option<String>,
}

// ---------------------------------------------------------------------------
// ItemSelected: Notification raised when a visitor clicks "Comprar"
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSelected {
    pub id: String,
    pub name: String,
    pub v_bucks: u64,
}
