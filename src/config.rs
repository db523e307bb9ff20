use std::env;
use std::path::PathBuf;

pub const CATALOG_BASE: &str = "https://fortnite-api.com/v2";
pub const RATES_BASE: &str = "https://api.bluelytics.com.ar/v2";
pub const BACKEND_BASE: &str = "http://localhost:8080";
pub const CATALOG_LANGUAGE: &str = "es-419";

pub const DEFAULT_WHATSAPP_NUMBER: &str = "51999999999";
pub const DEFAULT_API_USER: &str = "Public";

/// Fortnite account visitors add before sharing their username.
pub const STORE_ACCOUNT: &str = "DropCito0001";

pub const TOKEN_FILE: &str = "api_token";

/// Runtime settings for the storefront.
///
/// Every value has a fallback so the SDK is usable with an empty
/// environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Destination number for the WhatsApp handoff, digits only.
    pub whatsapp_number: String,
    /// Base URL of the auth/friend-request backend.
    pub backend_url: String,
    /// Login used to obtain the backend bearer token.
    pub api_user: String,
    pub api_password: String,
    /// Base URL of the item shop API (`/shop` is appended).
    pub catalog_url: String,
    /// Base URL of the exchange-rate API (`/latest` is appended).
    pub rates_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            backend_url: BACKEND_BASE.to_string(),
            api_user: DEFAULT_API_USER.to_string(),
            api_password: String::new(),
            catalog_url: CATALOG_BASE.to_string(),
            rates_url: RATES_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `DROPCITO_*` environment variables.
    ///
    /// Unset or blank variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str, fallback: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };
        Self {
            whatsapp_number: get("DROPCITO_WHATSAPP_NUMBER", defaults.whatsapp_number),
            backend_url: trim_slash(get("DROPCITO_API_URL", defaults.backend_url)),
            api_user: get("DROPCITO_API_USER", defaults.api_user),
            // A password may legitimately be blank, so it is read verbatim.
            api_password: lookup("DROPCITO_API_PASSWORD").unwrap_or(defaults.api_password),
            catalog_url: trim_slash(get("DROPCITO_CATALOG_URL", defaults.catalog_url)),
            rates_url: trim_slash(get("DROPCITO_RATES_URL", defaults.rates_url)),
        }
    }

    pub fn shop_url(&self) -> String {
        format!("{}/shop?language={}", self.catalog_url, CATALOG_LANGUAGE)
    }

    pub fn latest_rate_url(&self) -> String {
        format!("{}/latest", self.rates_url)
    }

    pub fn login_url(&self) -> String {
        format!("{}/loginform", self.backend_url)
    }

    pub fn friend_request_url(&self) -> String {
        format!("{}/sendfriendrequest", self.backend_url)
    }

    pub fn legacy_friend_url(&self) -> String {
        format!("{}/addtofriends", self.backend_url)
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("dropcito-sdk")
    } else {
        PathBuf::from(".dropcito-sdk-cache")
    }
}
