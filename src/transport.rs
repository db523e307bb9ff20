//! HTTP seam shared by every outbound call.
//!
//! The SDK never talks to `reqwest` directly outside this module, so tests
//! can swap in a recording transport and assert on the exact calls made.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{DropcitoError, Result};

/// Status code and raw body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Shorthand for a response carrying a JSON document.
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Deserialize the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Turn a non-2xx status into [`DropcitoError::Rejected`].
    pub fn error_for_status(self, url: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(DropcitoError::Rejected {
                status: self.status,
                url: url.to_string(),
            })
        }
    }
}

/// Minimal blocking HTTP client used by the SDK.
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; `Err` is reserved for transport failures.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse>;

    /// POST a JSON body, optionally with an `Authorization: Bearer` header.
    fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<HttpResponse>;
}

// ---------------------------------------------------------------------------
// ReqwestTransport
// ---------------------------------------------------------------------------

/// [`HttpTransport`] backed by a blocking `reqwest` client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!(url, "GET");
        let resp = self.client.get(url).send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }

    fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<HttpResponse> {
        debug!(url, authenticated = bearer.is_some(), "POST");
        let mut req = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        if let Some(token) = bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
