//! View model for one listing in the shop grid.
//!
//! A card owns its contact flow:
//!
//! ```text
//! Idle --buy--> ShowingContactOptions --whatsapp--> Idle
//!                     |          \--close--> Idle
//!                     \--friend--> ShowingFriendForm --close / success+2s--> Idle
//! ```
//!
//! Everything else shown on the card (prices, gradient, border, countdown)
//! is derived on demand from the item, country and rates.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::STORE_ACCOUNT;
use crate::contact::{self, FriendForm, FriendRequestSender, Submission};
use crate::countdown;
use crate::models::{Country, DisplayItem, ExchangeRates, ItemSelected, PriceQuote};
use crate::pricing;
use crate::style;

pub const BUY_LABEL: &str = "Comprar";
pub const COUNTDOWN_PREFIX: &str = "⏳ Disponible por:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ContactState {
    #[default]
    Idle,
    ShowingContactOptions,
    ShowingFriendForm,
}

// ---------------------------------------------------------------------------
// CardKey: Inputs that change what a card renders
// ---------------------------------------------------------------------------

/// Identity and pricing inputs of a card. Two equal keys render the same
/// static content, so a frontend may skip re-rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CardKey {
    pub id: String,
    pub expires_at: Option<String>,
    pub v_bucks: u64,
    pub country: Country,
    pub regular_rate: f64,
    pub discounted_rate: f64,
}

// ---------------------------------------------------------------------------
// CardView: Everything a frontend needs to draw the card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub item_type: String,
    pub rarity: String,
    pub border_class: &'static str,
    pub image_gradient: String,
    pub v_bucks_label: String,
    pub regular_price: String,
    pub discounted_price: String,
    pub countdown: String,
    pub contact: ContactState,
    /// Instructions above the username box, only while the form is open.
    pub friend_form_header: Option<String>,
    pub username: String,
    pub submission: Submission,
    pub message: Option<&'static str>,
    pub submit_label: &'static str,
    pub can_submit: bool,
}

// ---------------------------------------------------------------------------
// ItemCard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ItemCard {
    item: DisplayItem,
    country: Country,
    rates: ExchangeRates,
    whatsapp_number: String,
    contact: ContactState,
    form: FriendForm,
}

impl ItemCard {
    pub fn new(
        item: DisplayItem,
        country: Country,
        rates: ExchangeRates,
        whatsapp_number: impl Into<String>,
    ) -> Self {
        Self {
            item,
            country,
            rates,
            whatsapp_number: whatsapp_number.into(),
            contact: ContactState::Idle,
            form: FriendForm::new(),
        }
    }

    pub fn item(&self) -> &DisplayItem {
        &self.item
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn rates(&self) -> ExchangeRates {
        self.rates
    }

    pub fn contact_state(&self) -> ContactState {
        self.contact
    }

    pub fn submission(&self) -> Submission {
        self.form.submission()
    }

    pub fn username(&self) -> &str {
        self.form.username()
    }

    /// Switch country and rates together; contact state is kept.
    pub fn set_pricing(&mut self, country: Country, rates: ExchangeRates) {
        self.country = country;
        self.rates = rates;
    }

    pub fn quote(&self) -> PriceQuote {
        pricing::quote(self.item.price.v_bucks, self.country, self.rates)
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        countdown::remaining_text(now, self.item.expires_at.as_deref())
    }

    pub fn render_key(&self) -> CardKey {
        CardKey {
            id: self.item.id.clone(),
            expires_at: self.item.expires_at.clone(),
            v_bucks: self.item.price.v_bucks,
            country: self.country,
            regular_rate: self.rates.regular,
            discounted_rate: self.rates.discounted,
        }
    }

    // -- Contact flow -------------------------------------------------------

    /// "Comprar": open the contact options and report the selection.
    pub fn buy(&mut self) -> Option<ItemSelected> {
        if self.contact != ContactState::Idle {
            return None;
        }
        self.contact = ContactState::ShowingContactOptions;
        Some(ItemSelected {
            id: self.item.id.clone(),
            name: self.item.name.clone(),
            v_bucks: self.item.price.v_bucks,
        })
    }

    /// Build the WhatsApp link to open and close the options.
    pub fn whatsapp(&mut self) -> Option<String> {
        if self.contact != ContactState::ShowingContactOptions {
            return None;
        }
        self.contact = ContactState::Idle;
        Some(self.whatsapp_link())
    }

    pub fn whatsapp_link(&self) -> String {
        let quote = self.quote();
        contact::whatsapp_link(
            &self.whatsapp_number,
            &self.item.name,
            &quote.discounted_label(),
            quote.currency.code(),
        )
    }

    /// Switch from the contact options to the friend-request form.
    pub fn request_friend(&mut self) -> bool {
        if self.contact != ContactState::ShowingContactOptions {
            return false;
        }
        self.contact = ContactState::ShowingFriendForm;
        true
    }

    pub fn close(&mut self) {
        self.contact = ContactState::Idle;
        self.form.reset();
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        if self.contact == ContactState::ShowingFriendForm {
            self.form.set_username(username);
        }
    }

    /// Submit the friend form with the item's discounted price.
    ///
    /// Ignored outside the form. A blank username fails locally without
    /// calling `sender`; a failed send keeps the form open for a retry.
    pub fn submit<S>(&mut self, sender: &S, now: Instant) -> Submission
    where
        S: FriendRequestSender + ?Sized,
    {
        if self.contact != ContactState::ShowingFriendForm {
            return self.form.submission();
        }
        let price = self.quote().discounted_amount();
        self.form.submit(sender, &self.item.name, &price, now)
    }

    /// Close the form once a success has been shown long enough.
    ///
    /// Returns `true` when the card changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.form.success_expired(now) {
            self.close();
            return true;
        }
        false
    }

    // -- Rendering ----------------------------------------------------------

    pub fn view(&self, now: DateTime<Utc>) -> CardView {
        let quote = self.quote();
        let submission = self.form.submission();
        CardView {
            id: self.item.id.clone(),
            name: self.item.name.clone(),
            image: self.item.image.clone(),
            item_type: self.item.item_type.clone(),
            rarity: self.item.rarity.clone(),
            border_class: style::rarity_border(&self.item.rarity),
            image_gradient: style::image_gradient(&self.item.colors),
            v_bucks_label: format!("{} PAVOS", self.item.price.v_bucks),
            regular_price: quote.regular_label(),
            discounted_price: quote.discounted_label(),
            countdown: format!("{} {}", COUNTDOWN_PREFIX, self.countdown(now)),
            contact: self.contact,
            friend_form_header: (self.contact == ContactState::ShowingFriendForm)
                .then(|| format!("Agrega {STORE_ACCOUNT} y comparte tu username")),
            username: self.form.username().to_string(),
            submission,
            message: submission.message(),
            submit_label: self.form.submit_label(),
            can_submit: self.form.can_submit(),
        }
    }
}
