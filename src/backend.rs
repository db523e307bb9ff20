//! Client for the auth and friend-request backend.
//!
//! The current flow authenticates with a bearer token obtained from
//! `/loginform` and kept in a [`TokenStore`]. A 401 clears the token and the
//! request is retried exactly once with a fresh one. The deprecated
//! unauthenticated `/addtofriends` endpoint lives in [`LegacyBackendClient`].

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::contact::{FriendRequest, FriendRequestSender};
use crate::error::{DropcitoError, Result};
use crate::models::{AddToFriends, LoginRequest, LoginResponse, SendFriendRequest};
use crate::token_store::TokenStore;
use crate::transport::HttpTransport;

// ---------------------------------------------------------------------------
// BackendClient
// ---------------------------------------------------------------------------

/// Token-authenticated backend client.
pub struct BackendClient<'a> {
    transport: &'a dyn HttpTransport,
    tokens: &'a dyn TokenStore,
    settings: &'a Settings,
}

impl<'a> BackendClient<'a> {
    pub fn new(
        transport: &'a dyn HttpTransport,
        tokens: &'a dyn TokenStore,
        settings: &'a Settings,
    ) -> Self {
        Self {
            transport,
            tokens,
            settings,
        }
    }

    /// Stored token, or a freshly issued one when none is stored.
    pub fn auth_token(&self) -> Result<Option<String>> {
        if let Some(token) = self.tokens.get() {
            return Ok(Some(token));
        }
        self.login()
    }

    /// Log in with the configured credentials and store the issued token.
    ///
    /// Returns `Ok(None)` when the backend refuses or answers without a
    /// token; only transport failures are errors.
    pub fn login(&self) -> Result<Option<String>> {
        let url = self.settings.login_url();
        let body = serde_json::to_value(LoginRequest {
            user: self.settings.api_user.clone(),
            password: self.settings.api_password.clone(),
        })?;
        let resp = self.transport.post_json(&url, None, &body)?;
        if !resp.is_success() {
            warn!(status = resp.status, "backend login refused");
            return Ok(None);
        }
        let login: LoginResponse = match resp.json() {
            Ok(login) => login,
            Err(e) => {
                warn!(error = %e, "unreadable login response");
                return Ok(None);
            }
        };
        match login.token.filter(|t| login.success && !t.is_empty()) {
            Some(token) => {
                if let Err(e) = self.tokens.set(&token) {
                    warn!(error = %e, "could not persist auth token");
                }
                info!("obtained backend auth token");
                Ok(Some(token))
            }
            None => {
                warn!(success = login.success, "login response carried no token");
                Ok(None)
            }
        }
    }

    /// Forget the stored token.
    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()
    }

    /// Ask the backend to add `display_name` as a friend.
    pub fn add_friend(&self, display_name: &str) -> Result<()> {
        let url = self.settings.friend_request_url();
        let body = serde_json::to_value(SendFriendRequest {
            display_name: display_name.to_string(),
        })?;

        let token = self
            .auth_token()?
            .ok_or_else(|| DropcitoError::Unauthorized("no auth token available".into()))?;
        let resp = self.transport.post_json(&url, Some(&token), &body)?;
        if !resp.is_unauthorized() {
            return resp.error_for_status(&url).map(|_| ());
        }

        debug!("auth token rejected, refreshing once");
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "could not clear stale auth token");
        }
        let token = self
            .login()?
            .ok_or_else(|| DropcitoError::Unauthorized("token refresh failed".into()))?;
        let resp = self.transport.post_json(&url, Some(&token), &body)?;
        if resp.is_unauthorized() {
            return Err(DropcitoError::Unauthorized(
                "friend request rejected after token refresh".into(),
            ));
        }
        resp.error_for_status(&url).map(|_| ())
    }
}

impl FriendRequestSender for BackendClient<'_> {
    fn send_friend_request(&self, request: &FriendRequest) -> Result<()> {
        self.add_friend(&request.username)
    }
}

// ---------------------------------------------------------------------------
// LegacyBackendClient
// ---------------------------------------------------------------------------

/// Client for the deprecated `/addtofriends` endpoint (no auth).
pub struct LegacyBackendClient<'a> {
    transport: &'a dyn HttpTransport,
    settings: &'a Settings,
}

impl<'a> LegacyBackendClient<'a> {
    pub fn new(transport: &'a dyn HttpTransport, settings: &'a Settings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn add_to_friends(&self, request: &FriendRequest) -> Result<()> {
        let url = self.settings.legacy_friend_url();
        let body = serde_json::to_value(AddToFriends {
            username: request.username.clone(),
            item_name: request.item_name.clone(),
            item_price: request.item_price.clone(),
        })?;
        let resp = self.transport.post_json(&url, None, &body)?;
        resp.error_for_status(&url).map(|_| ())
    }
}

impl FriendRequestSender for LegacyBackendClient<'_> {
    fn send_friend_request(&self, request: &FriendRequest) -> Result<()> {
        self.add_to_friends(request)
    }
}
