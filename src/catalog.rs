//! Shop catalog: fetching, grouping, filtering, and the page view model that
//! ties cards, search and pricing together.

use std::time::Instant;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::accounts::AccountsPanel;
use crate::card::ItemCard;
use crate::config::Settings;
use crate::debounce::{Debounced, SEARCH_DEBOUNCE};
use crate::error::Result;
use crate::models::{CatalogEntry, Country, DisplayItem, ExchangeRates, ItemSelected, ShopResponse};
use crate::normalize;
use crate::pricing::{self, RateProvider};
use crate::transport::HttpTransport;
use crate::DropcitoSdk;

pub const PAGE_TITLE: &str = "🛍️ Tienda de Fortnite";
pub const SEARCH_PLACEHOLDER: &str = "🔍 Buscar objeto...";
pub const LOADING_TEXT: &str = "Cargando tienda...";

// ---------------------------------------------------------------------------
// CatalogQuery
// ---------------------------------------------------------------------------

/// Fetches the item shop.
pub struct CatalogQuery<'a> {
    transport: &'a dyn HttpTransport,
    settings: &'a Settings,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(transport: &'a dyn HttpTransport, settings: &'a Settings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Raw listings from `GET /shop`.
    pub fn fetch(&self) -> Result<Vec<CatalogEntry>> {
        let url = self.settings.shop_url();
        let resp = self.transport.get(&url)?.error_for_status(&url)?;
        let shop: ShopResponse = resp.json()?;
        let entries = shop.catalog_entries();
        debug!(count = entries.len(), "fetched shop entries");
        Ok(entries)
    }

    /// Fetch, normalize and group. Never fails: errors are logged and give
    /// an empty catalog.
    pub fn load(&self) -> Catalog {
        match self.fetch() {
            Ok(entries) => {
                let catalog = Catalog::from_items(normalize::normalize_all(&entries));
                info!(
                    items = catalog.len(),
                    categories = catalog.sections().len(),
                    "catalog loaded"
                );
                catalog
            }
            Err(e) => {
                warn!(error = %e, "could not load shop catalog");
                Catalog::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Display items bucketed by category, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    sections: IndexMap<String, Vec<DisplayItem>>,
}

/// One category with the items that survived filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySection<'a> {
    pub category: &'a str,
    pub items: Vec<&'a DisplayItem>,
}

impl Catalog {
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = DisplayItem>,
    {
        let mut sections: IndexMap<String, Vec<DisplayItem>> = IndexMap::new();
        for item in items {
            sections.entry(item.category.clone()).or_default().push(item);
        }
        Self { sections }
    }

    pub fn sections(&self) -> &IndexMap<String, Vec<DisplayItem>> {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &DisplayItem> {
        self.sections.values().flatten()
    }

    pub fn get(&self, id: &str) -> Option<&DisplayItem> {
        self.items().find(|item| item.id == id)
    }

    /// Sections whose items' names contain `query`, case-insensitively.
    /// Sections left empty are omitted.
    pub fn filter(&self, query: &str) -> Vec<CategorySection<'_>> {
        let needle = query.to_lowercase();
        self.sections
            .iter()
            .filter_map(|(category, items)| {
                let items: Vec<&DisplayItem> = items
                    .iter()
                    .filter(|item| matches_name(&item.name, &needle))
                    .collect();
                (!items.is_empty()).then_some(CategorySection {
                    category: category.as_str(),
                    items,
                })
            })
            .collect()
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
pub fn matches_name(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

// ---------------------------------------------------------------------------
// CatalogPage
// ---------------------------------------------------------------------------

/// Cards of one category that match the current search.
#[derive(Debug)]
pub struct SectionView<'a> {
    pub category: &'a str,
    pub cards: Vec<&'a ItemCard>,
}

/// The shop page: catalog, pricing, search and the accounts panel.
#[derive(Debug)]
pub struct CatalogPage {
    loading: bool,
    country: Country,
    rates: ExchangeRates,
    whatsapp_number: String,
    search: Debounced<String>,
    sections: IndexMap<String, Vec<ItemCard>>,
    accounts: AccountsPanel,
    last_selected: Option<ItemSelected>,
}

impl CatalogPage {
    /// A page in its loading state, priced with fallback rates.
    pub fn new(country: Country, whatsapp_number: impl Into<String>) -> Self {
        Self {
            loading: true,
            country,
            rates: ExchangeRates::fallback(country),
            whatsapp_number: whatsapp_number.into(),
            search: Debounced::new(String::new(), SEARCH_DEBOUNCE),
            sections: IndexMap::new(),
            accounts: AccountsPanel::default(),
            last_selected: None,
        }
    }

    /// Load the catalog and resolve rates for the current country.
    pub fn mount(&mut self, sdk: &DropcitoSdk) {
        self.set_catalog(sdk.catalog().load());
        if self.country == Country::Argentina {
            self.refresh_rates(&sdk.rates());
        }
    }

    /// Replace every card with the given catalog; ends the loading state.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.sections = catalog
            .sections
            .into_iter()
            .map(|(category, items)| {
                let cards: Vec<ItemCard> = items
                    .into_iter()
                    .map(|item| {
                        ItemCard::new(item, self.country, self.rates, self.whatsapp_number.clone())
                    })
                    .collect();
                (category, cards)
            })
            .collect();
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn rates(&self) -> ExchangeRates {
        self.rates
    }

    /// Change country and re-resolve rates; the catalog is not refetched.
    pub fn set_country(&mut self, country: Country, rates: &RateProvider<'_>) {
        self.country = country;
        self.refresh_rates(rates);
    }

    pub fn refresh_rates(&mut self, rates: &RateProvider<'_>) {
        let resolved = rates.resolve(self.country);
        self.apply_rates(resolved);
    }

    /// Reprice with an already known base rate.
    pub fn apply_base_rate(&mut self, base_rate: f64) {
        self.apply_rates(pricing::rates_for(self.country, base_rate));
    }

    /// Publish new rates to the page and every card.
    pub fn apply_rates(&mut self, rates: ExchangeRates) {
        self.rates = rates;
        let country = self.country;
        for card in self.sections.values_mut().flatten() {
            card.set_pricing(country, rates);
        }
    }

    // -- Search -------------------------------------------------------------

    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text.into(), now);
    }

    /// What the visitor typed.
    pub fn search_input(&self) -> &str {
        self.search.raw()
    }

    /// The search currently applied to the grid.
    pub fn active_search(&self) -> &str {
        self.search.value()
    }

    /// Drive time-based state: search debounce and form auto-resets.
    ///
    /// Returns `true` if anything visible changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = self.search.poll(now);
        for card in self.sections.values_mut().flatten() {
            changed |= card.poll(now);
        }
        changed |= self.accounts.poll(now);
        changed
    }

    /// Sections with at least one card matching the active search.
    pub fn visible_sections(&self) -> Vec<SectionView<'_>> {
        let needle = self.search.value().to_lowercase();
        self.sections
            .iter()
            .filter_map(|(category, cards)| {
                let cards: Vec<&ItemCard> = cards
                    .iter()
                    .filter(|card| matches_name(&card.item().name, &needle))
                    .collect();
                (!cards.is_empty()).then_some(SectionView {
                    category: category.as_str(),
                    cards,
                })
            })
            .collect()
    }

    pub fn cards(&self) -> impl Iterator<Item = &ItemCard> {
        self.sections.values().flatten()
    }

    pub fn card(&self, id: &str) -> Option<&ItemCard> {
        self.cards().find(|card| card.item().id == id)
    }

    pub fn card_mut(&mut self, id: &str) -> Option<&mut ItemCard> {
        self.sections
            .values_mut()
            .flatten()
            .find(|card| card.item().id == id)
    }

    /// Click "Comprar" on a card and remember the selection.
    pub fn buy(&mut self, id: &str) -> Option<ItemSelected> {
        let selected = self.card_mut(id)?.buy()?;
        info!(item = %selected.name, v_bucks = selected.v_bucks, "item selected");
        self.last_selected = Some(selected.clone());
        Some(selected)
    }

    pub fn last_selected(&self) -> Option<&ItemSelected> {
        self.last_selected.as_ref()
    }

    pub fn accounts(&self) -> &AccountsPanel {
        &self.accounts
    }

    pub fn accounts_mut(&mut self) -> &mut AccountsPanel {
        &mut self.accounts
    }
}
