use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire bodies for the auth/friend-request backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendFriendRequest {
    pub display_name: String,
}

/// Body of the deprecated unauthenticated `/addtofriends` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToFriends {
    pub username: String,
    pub item_name: String,
    pub item_price: String,
}

// ---------------------------------------------------------------------------
// RateResponse: `GET /latest` from the exchange-rate API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateResponse {
    pub oficial: Option<RateQuote>,
    pub blue: Option<RateQuote>,
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateQuote {
    pub value_avg: Option<f64>,
    pub value_sell: Option<f64>,
    pub value_buy: Option<f64>,
}
