//! Friend-request form shared by item cards and the accounts panel, plus the
//! WhatsApp handoff link.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// How long the success message stays before the form closes itself.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(2);

pub const SUCCESS_MESSAGE: &str = "✅ ¡Solicitud enviada! Te agregaremos pronto.";
pub const ERROR_MESSAGE: &str = "❌ Error al enviar. Intenta de nuevo.";
pub const EMPTY_USERNAME_MESSAGE: &str = "❌ Ingresa tu username de Fortnite.";
pub const SUBMIT_LABEL: &str = "Enviar";
pub const SUBMITTING_LABEL: &str = "Enviando...";

// ---------------------------------------------------------------------------
// FriendRequest / FriendRequestSender
// ---------------------------------------------------------------------------

/// What a visitor asks for when sharing their Fortnite username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub username: String,
    pub item_name: String,
    /// Discounted price with two decimals, e.g. `"15.00"`.
    pub item_price: String,
}

/// Delivers a [`FriendRequest`] to whoever handles it.
pub trait FriendRequestSender {
    fn send_friend_request(&self, request: &FriendRequest) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactError {
    /// Rejected locally; nothing was sent.
    EmptyUsername,
    /// The sender reported a failure.
    Failed,
}

impl ContactError {
    pub fn message(&self) -> &'static str {
        match self {
            ContactError::EmptyUsername => EMPTY_USERNAME_MESSAGE,
            ContactError::Failed => ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(ContactError),
}

impl Submission {
    /// Inline message to show under the form, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Submission::Success => Some(SUCCESS_MESSAGE),
            Submission::Error(e) => Some(e.message()),
            Submission::Idle | Submission::Submitting => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FriendForm
// ---------------------------------------------------------------------------

/// Username input plus submission status.
#[derive(Debug, Clone, Default)]
pub struct FriendForm {
    username: String,
    submission: Submission,
    succeeded_at: Option<Instant>,
}

impl FriendForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        self.submission != Submission::Submitting && !self.username.trim().is_empty()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submission == Submission::Submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Mark the form as in flight and build the request to send.
    ///
    /// A blank username is rejected here and nothing should be sent.
    pub fn begin_submit(
        &mut self,
        item_name: &str,
        item_price: &str,
    ) -> std::result::Result<FriendRequest, ContactError> {
        let username = self.username.trim();
        if username.is_empty() {
            self.submission = Submission::Error(ContactError::EmptyUsername);
            return Err(ContactError::EmptyUsername);
        }
        let request = FriendRequest {
            username: username.to_string(),
            item_name: item_name.to_string(),
            item_price: item_price.to_string(),
        };
        self.submission = Submission::Submitting;
        self.succeeded_at = None;
        Ok(request)
    }

    /// Record the sender's outcome for a request from [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(&mut self, outcome: Result<()>, now: Instant) -> Submission {
        match outcome {
            Ok(()) => {
                info!("friend request delivered");
                self.submission = Submission::Success;
                self.succeeded_at = Some(now);
            }
            Err(e) => {
                warn!(error = %e, "friend request failed");
                self.submission = Submission::Error(ContactError::Failed);
            }
        }
        self.submission
    }

    /// Validate, send and record the outcome in one step.
    pub fn submit<S>(
        &mut self,
        sender: &S,
        item_name: &str,
        item_price: &str,
        now: Instant,
    ) -> Submission
    where
        S: FriendRequestSender + ?Sized,
    {
        if self.submission == Submission::Submitting {
            return self.submission;
        }
        match self.begin_submit(item_name, item_price) {
            Ok(request) => {
                let outcome = sender.send_friend_request(&request);
                self.finish_submit(outcome, now)
            }
            Err(_) => self.submission,
        }
    }

    /// `true` once the success message has been visible for
    /// [`SUCCESS_RESET_DELAY`]; the caller then closes the form.
    pub fn success_expired(&self, now: Instant) -> bool {
        match (self.submission, self.succeeded_at) {
            (Submission::Success, Some(at)) => {
                now.saturating_duration_since(at) >= SUCCESS_RESET_DELAY
            }
            _ => false,
        }
    }

    /// Clear the username and status.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// WhatsApp handoff
// ---------------------------------------------------------------------------

/// Chat link prefilled with the item and its discounted price.
///
/// `price_label` is the symbol-prefixed amount (`"S/ 15.00"`).
pub fn whatsapp_link(
    number: &str,
    item_name: &str,
    price_label: &str,
    currency_code: &str,
) -> String {
    let message = format!("Hola! Me interesa comprar: {item_name} - {price_label} {currency_code}");
    format!(
        "https://wa.me/{}?text={}",
        number.trim_start_matches('+'),
        urlencoding::encode(&message)
    )
}
